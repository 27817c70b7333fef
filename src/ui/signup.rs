use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Handles for the signup page.
pub struct SignupWidgets {
    pub root: gtk4::Box,
    pub username: libadwaita::EntryRow,
    pub password: libadwaita::PasswordEntryRow,
    pub error_label: gtk4::Label,
    pub success_label: gtk4::Label,
    pub submit_button: gtk4::Button,
    pub login_link: gtk4::Button,
}

/// Build the signup page.
pub fn build_signup() -> SignupWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    root.set_margin_start(32);
    root.set_margin_end(32);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_valign(gtk4::Align::Center);
    root.set_halign(gtk4::Align::Center);
    root.set_width_request(380);

    let title = gtk4::Label::new(Some("Create an Account"));
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

    let success_label = gtk4::Label::new(None);
    success_label.add_css_class("success");
    success_label.set_wrap(true);
    success_label.set_visible(false);
    root.append(&success_label);

    let submit_button = gtk4::Button::builder().label("Sign Up").build();
    submit_button.add_css_class("suggested-action");
    submit_button.add_css_class("pill");
    root.append(&submit_button);

    let login_link = gtk4::Button::builder()
        .label("Already have an account? Log In")
        .build();
    login_link.add_css_class("flat");
    root.append(&login_link);

    SignupWidgets {
        root,
        username,
        password,
        error_label,
        success_label,
        submit_button,
        login_link,
    }
}
