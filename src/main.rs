mod api;
mod app;
mod config;
mod recorder;
mod session;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use app::{AppState, BackendEvent, Page};

fn main() {
    env_logger::init();
    log::info!("Emotion Studio starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.emotion-studio.emotion-studio")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    // Async channel for UI intents and backend completions
    let (backend_tx, backend_rx) = async_channel::unbounded::<BackendEvent>();

    let state = Rc::new(RefCell::new(AppState::new(backend_tx.clone())));
    log::info!(
        "Analysis service at {}",
        state.borrow().config.endpoints.api_base
    );

    // Build UI
    let shell = ui::shell::build_shell(app, backend_tx.clone());

    // Wire page controls to backend events
    wire(&shell.login.submit_button, &backend_tx, || {
        BackendEvent::LoginSubmitted
    });
    wire(&shell.login.signup_link, &backend_tx, || {
        BackendEvent::NavigateRequested(Page::Signup)
    });
    wire(&shell.signup.submit_button, &backend_tx, || {
        BackendEvent::SignupSubmitted
    });
    wire(&shell.signup.login_link, &backend_tx, || {
        BackendEvent::NavigateRequested(Page::Login)
    });
    wire(&shell.upload.text_button, &backend_tx, || {
        BackendEvent::UploadTextSubmitted
    });
    wire(&shell.upload.file_button, &backend_tx, || {
        BackendEvent::UploadFileSubmitted
    });
    wire(&shell.upload.record_button, &backend_tx, || {
        BackendEvent::SpeechStartRequested
    });
    wire(&shell.upload.dashboard_button, &backend_tx, || {
        BackendEvent::NavigateRequested(Page::Dashboard)
    });
    wire(&shell.upload.logout_button, &backend_tx, || {
        BackendEvent::LogoutRequested
    });
    wire(&shell.analyze.submit_button, &backend_tx, || {
        BackendEvent::AnalyzeSubmitted
    });
    wire(&shell.dashboard.upload_button, &backend_tx, || {
        BackendEvent::NavigateRequested(Page::Upload)
    });

    // File picker for the upload page
    {
        let parent = shell.window.clone();
        let sender = backend_tx.clone();
        shell.upload.choose_button.connect_clicked(move |_| {
            let filter = gtk4::FileFilter::new();
            filter.add_mime_type("audio/*");
            filter.add_mime_type("video/*");
            filter.set_name(Some("Audio and video"));
            let filters = gtk4::gio::ListStore::new::<gtk4::FileFilter>();
            filters.append(&filter);

            let dialog = gtk4::FileDialog::builder()
                .title("Select an audio or media file")
                .filters(&filters)
                .build();

            let sender = sender.clone();
            dialog.open(
                Some(&parent),
                gtk4::gio::Cancellable::NONE,
                move |result| {
                    if let Ok(file) = result {
                        if let Some(path) = file.path() {
                            let _ = sender.try_send(BackendEvent::FileChosen(path));
                        }
                    }
                },
            );
        });
    }

    // Store UI handles, then land on the right page: a stored token goes
    // straight to upload, otherwise to login.
    let landing = {
        let mut s = state.borrow_mut();
        s.shell = Some(shell);
        if s.session.get().is_some() {
            Page::Upload
        } else {
            Page::Login
        }
    };
    ui::shell::navigate(&state, landing);

    state.borrow().shell.as_ref().unwrap().window.present();

    // Attach backend event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = backend_rx.recv().await {
                app::handle_backend_event(&state_clone, event);
            }
        });
    }

    // One-shot service probe for the dashboard status row
    app::dispatch_health_check(&state);
}

fn wire(
    button: &gtk4::Button,
    sender: &async_channel::Sender<BackendEvent>,
    make: fn() -> BackendEvent,
) {
    let sender = sender.clone();
    button.connect_clicked(move |_| {
        let _ = sender.try_send(make());
    });
}
