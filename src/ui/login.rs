use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Handles for the login page.
pub struct LoginWidgets {
    pub root: gtk4::Box,
    pub username: libadwaita::EntryRow,
    pub password: libadwaita::PasswordEntryRow,
    pub error_label: gtk4::Label,
    pub submit_button: gtk4::Button,
    pub signup_link: gtk4::Button,
}

/// Build the login page.
pub fn build_login() -> LoginWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    root.set_margin_start(32);
    root.set_margin_end(32);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_valign(gtk4::Align::Center);
    root.set_halign(gtk4::Align::Center);
    root.set_width_request(380);

    let title = gtk4::Label::new(Some("Welcome Back"));
    title.add_css_class("title-1");
    root.append(&title);

    let form = libadwaita::PreferencesGroup::new();

    let username = libadwaita::EntryRow::builder().title("Username").build();
    form.add(&username);

    let password = libadwaita::PasswordEntryRow::builder().title("Password").build();
    form.add(&password);

    root.append(&form);

    let error_label = gtk4::Label::new(None);
    error_label.add_css_class("error");
    error_label.set_wrap(true);
    error_label.set_visible(false);
    root.append(&error_label);

    let submit_button = gtk4::Button::builder().label("Log In").build();
    submit_button.add_css_class("suggested-action");
    submit_button.add_css_class("pill");
    root.append(&submit_button);

    let signup_link = gtk4::Button::builder()
        .label("Don't have an account? Sign Up")
        .build();
    signup_link.add_css_class("flat");
    root.append(&signup_link);

    let tip = gtk4::Label::new(Some("Tip: Use admin / admin to log in"));
    tip.add_css_class("dim-label");
    root.append(&tip);

    LoginWidgets {
        root,
        username,
        password,
        error_label,
        submit_button,
        signup_link,
    }
}
