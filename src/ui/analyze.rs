use gtk4::prelude::*;

/// Handles for the analyze page (raw JSON result view).
pub struct AnalyzeWidgets {
    pub root: gtk4::Box,
    pub text_view: gtk4::TextView,
    pub submit_button: gtk4::Button,
    pub error_label: gtk4::Label,
    pub result_view: gtk4::TextView,
    pub result_scroll: gtk4::ScrolledWindow,
}

impl AnalyzeWidgets {
    pub fn show_result(&self, dump: &str) {
        self.result_view.buffer().set_text(dump);
        self.result_scroll.set_visible(true);
    }
}

/// Build the analyze page.
pub fn build_analyze() -> AnalyzeWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root.set_margin_top(16);
    root.set_margin_bottom(16);

    let title = gtk4::Label::new(Some("Emotion Analysis"));
    title.add_css_class("title-2");
    title.set_xalign(0.0);
    root.append(&title);

    let text_view = gtk4::TextView::new();
    text_view.set_wrap_mode(gtk4::WrapMode::WordChar);
    text_view.set_top_margin(8);
    text_view.set_bottom_margin(8);
    text_view.set_left_margin(8);
    text_view.set_right_margin(8);

    let input_scroll = gtk4::ScrolledWindow::builder()
        .child(&text_view)
        .min_content_height(120)
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .build();
    input_scroll.add_css_class("card");
    root.append(&input_scroll);

    let submit_button = gtk4::Button::builder()
        .label("Analyze")
        .halign(gtk4::Align::Start)
        .build();
    submit_button.add_css_class("suggested-action");
    root.append(&submit_button);

    let error_label = gtk4::Label::new(None);
    error_label.add_css_class("error");
    error_label.set_xalign(0.0);
    error_label.set_visible(false);
    root.append(&error_label);

    let result_view = gtk4::TextView::new();
    result_view.set_editable(false);
    result_view.set_monospace(true);
    result_view.set_top_margin(8);
    result_view.set_bottom_margin(8);
    result_view.set_left_margin(8);
    result_view.set_right_margin(8);

    let result_scroll = gtk4::ScrolledWindow::builder()
        .child(&result_view)
        .min_content_height(180)
        .vexpand(true)
        .build();
    result_scroll.add_css_class("card");
    result_scroll.set_visible(false);
    root.append(&result_scroll);

    AnalyzeWidgets {
        root,
        text_view,
        submit_button,
        error_label,
        result_view,
        result_scroll,
    }
}
