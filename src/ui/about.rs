use gtk4::prelude::*;

/// Build the static about page.
pub fn build_about() -> gtk4::Box {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    root.set_margin_start(32);
    root.set_margin_end(32);
    root.set_margin_top(24);
    root.set_margin_bottom(24);

    let title = gtk4::Label::new(Some("About Emotion Analysis"));
    title.add_css_class("title-2");
    title.set_xalign(0.0);
    root.append(&title);

    let body = gtk4::Label::new(Some(
        "This application uses advanced emotion analysis models to interpret \
         the tone and emotional state from user text, media files, and speech. \
         It connects to a remote analysis service for real-time emotional \
         insight generation.",
    ));
    body.set_wrap(true);
    body.set_xalign(0.0);
    root.append(&body);

    root
}
