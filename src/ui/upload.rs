use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Handles for the upload page: text, file, and speech analysis share one
/// result area at the bottom.
pub struct UploadWidgets {
    pub root: gtk4::Box,
    pub text_view: gtk4::TextView,
    pub text_button: gtk4::Button,
    pub choose_button: gtk4::Button,
    pub file_label: gtk4::Label,
    pub file_button: gtk4::Button,
    pub record_button: gtk4::Button,
    pub dashboard_button: gtk4::Button,
    pub logout_button: gtk4::Button,
    pub result_group: libadwaita::PreferencesGroup,
    pub result_label: gtk4::Label,
}

impl UploadWidgets {
    /// Put text into the shared result area and reveal it.
    pub fn show_result(&self, text: &str) {
        self.result_label.set_text(text);
        self.result_group.set_visible(true);
    }
}

/// Build the upload page.
pub fn build_upload() -> UploadWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 16);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root.set_margin_top(16);
    root.set_margin_bottom(16);

    // Page header with shortcuts
    let bar = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    let title = gtk4::Label::new(Some("Emotion Analysis Studio"));
    title.add_css_class("title-2");
    title.set_hexpand(true);
    title.set_xalign(0.0);
    bar.append(&title);

    let dashboard_button = gtk4::Button::builder().label("Dashboard").build();
    bar.append(&dashboard_button);

    let logout_button = gtk4::Button::builder().label("Logout").build();
    logout_button.add_css_class("destructive-action");
    bar.append(&logout_button);

    root.append(&bar);

    // --- Text analysis ---
    let text_group = libadwaita::PreferencesGroup::new();
    text_group.set_title("Text-Based Emotion Analysis");

    let text_view = gtk4::TextView::new();
    text_view.set_wrap_mode(gtk4::WrapMode::WordChar);
    text_view.set_top_margin(8);
    text_view.set_bottom_margin(8);
    text_view.set_left_margin(8);
    text_view.set_right_margin(8);

    let text_scroll = gtk4::ScrolledWindow::builder()
        .child(&text_view)
        .min_content_height(120)
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .build();
    text_scroll.add_css_class("card");
    text_group.add(&text_scroll);

    let text_button = gtk4::Button::builder()
        .label("Analyze Text Emotions")
        .margin_top(8)
        .build();
    text_button.add_css_class("suggested-action");
    text_group.add(&text_button);

    root.append(&text_group);

    // --- File analysis ---
    let file_group = libadwaita::PreferencesGroup::new();
    file_group.set_title("File Upload Emotion Analysis");

    let file_row = libadwaita::ActionRow::builder()
        .title("Audio or video file")
        .build();
    let file_label = gtk4::Label::new(Some("No file selected"));
    file_label.add_css_class("dim-label");
    file_label.set_ellipsize(gtk4::pango::EllipsizeMode::Middle);
    file_row.add_suffix(&file_label);

    let choose_button = gtk4::Button::builder()
        .label("Choose\u{2026}")
        .valign(gtk4::Align::Center)
        .build();
    file_row.add_suffix(&choose_button);
    file_group.add(&file_row);

    let file_button = gtk4::Button::builder()
        .label("Analyze File Emotions")
        .margin_top(8)
        .build();
    file_button.add_css_class("suggested-action");
    file_group.add(&file_button);

    root.append(&file_group);

    // --- Speech analysis ---
    let speech_group = libadwaita::PreferencesGroup::new();
    speech_group.set_title("Speech to Text Emotion Analysis");
    speech_group.set_description(Some(
        "Record your voice to auto-convert speech to text and analyze emotions instantly.",
    ));

    let record_button = gtk4::Button::builder()
        .label("Start Speech Analysis")
        .margin_top(8)
        .build();
    record_button.add_css_class("suggested-action");
    speech_group.add(&record_button);

    root.append(&speech_group);

    // --- Shared result area ---
    let result_group = libadwaita::PreferencesGroup::new();
    result_group.set_title("Emotion Analysis Result");
    result_group.set_visible(false);

    let result_label = gtk4::Label::new(None);
    result_label.set_wrap(true);
    result_label.set_xalign(0.0);
    result_label.set_selectable(true);
    result_label.set_margin_top(8);
    result_label.set_margin_bottom(8);
    result_group.add(&result_label);

    root.append(&result_group);

    UploadWidgets {
        root,
        text_view,
        text_button,
        choose_button,
        file_label,
        file_button,
        record_button,
        dashboard_button,
        logout_button,
        result_group,
        result_label,
    }
}
