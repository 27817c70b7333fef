use std::cell::RefCell;
use std::rc::Rc;

use chrono::Datelike;
use gtk4::prelude::*;
use libadwaita::prelude::*;

use super::about::build_about;
use super::analyze::{build_analyze, AnalyzeWidgets};
use super::dashboard::{build_dashboard, DashboardWidgets};
use super::login::{build_login, LoginWidgets};
use super::signup::{build_signup, SignupWidgets};
use super::upload::{build_upload, UploadWidgets};
use crate::app::{AppState, BackendEvent, Page};

/// Handles for the main window and all pages.
pub struct ShellWidgets {
    pub window: libadwaita::ApplicationWindow,
    pub stack: gtk4::Stack,
    pub toasts: libadwaita::ToastOverlay,
    pub login: LoginWidgets,
    pub signup: SignupWidgets,
    pub upload: UploadWidgets,
    pub analyze: AnalyzeWidgets,
    pub dashboard: DashboardWidgets,
}

/// Switch pages, redirecting protected pages to login when no session
/// token is stored.
pub fn navigate(state: &Rc<RefCell<AppState>>, page: Page) {
    let s = state.borrow();
    let target = if page.is_protected() && s.session.get().is_none() {
        log::info!("No session token, redirecting {page:?} to login");
        Page::Login
    } else {
        page
    };
    if let Some(ref shell) = s.shell {
        shell.stack.set_visible_child_name(target.name());
    }
}

/// Build the main window: header with navigation, page stack inside a
/// toast overlay, footer chrome.
pub fn build_shell(
    app: &libadwaita::Application,
    sender: async_channel::Sender<BackendEvent>,
) -> ShellWidgets {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("Emotion Analysis")
        .default_width(720)
        .default_height(640)
        .build();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    // Header navigation, mirroring the site chrome: Home / About / Analyze.
    let nav = gtk4::Box::new(gtk4::Orientation::Horizontal, 4);
    for (label, page) in [
        ("Home", Page::Upload),
        ("About", Page::About),
        ("Analyze", Page::Analyze),
    ] {
        let button = gtk4::Button::builder().label(label).build();
        button.add_css_class("flat");
        let nav_sender = sender.clone();
        button.connect_clicked(move |_| {
            let _ = nav_sender.try_send(BackendEvent::NavigateRequested(page));
        });
        nav.append(&button);
    }
    header.pack_start(&nav);

    toolbar_view.add_top_bar(&header);

    // Pages
    let login = build_login();
    let signup = build_signup();
    let upload = build_upload();
    let analyze = build_analyze();
    let dashboard = build_dashboard();
    let about = build_about();

    let stack = gtk4::Stack::new();
    stack.set_transition_type(gtk4::StackTransitionType::Crossfade);
    stack.add_named(&login.root, Some(Page::Login.name()));
    stack.add_named(&signup.root, Some(Page::Signup.name()));
    stack.add_named(&upload.root, Some(Page::Upload.name()));
    stack.add_named(&analyze.root, Some(Page::Analyze.name()));
    stack.add_named(&dashboard.root, Some(Page::Dashboard.name()));
    stack.add_named(&about, Some(Page::About.name()));

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&stack)
        .build();

    let toasts = libadwaita::ToastOverlay::new();
    toasts.set_child(Some(&scrolled));
    toolbar_view.set_content(Some(&toasts));

    // Footer chrome
    let footer = gtk4::Label::new(Some(&format!(
        "\u{00a9} {} Emotion Analysis App",
        chrono::Local::now().year()
    )));
    footer.add_css_class("dim-label");
    footer.set_margin_top(6);
    footer.set_margin_bottom(6);
    toolbar_view.add_bottom_bar(&footer);

    window.set_content(Some(&toolbar_view));

    ShellWidgets {
        window,
        stack,
        toasts,
        login,
        signup,
        upload,
        analyze,
        dashboard,
    }
}
