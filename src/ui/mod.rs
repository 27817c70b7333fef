pub mod about;
pub mod analyze;
pub mod dashboard;
pub mod login;
pub mod notify;
pub mod shell;
pub mod signup;
pub mod upload;

use gtk4::prelude::*;

/// Full contents of a multi-line text input.
pub fn text_view_contents(view: &gtk4::TextView) -> String {
    let buffer = view.buffer();
    buffer
        .text(&buffer.start_iter(), &buffer.end_iter(), false)
        .to_string()
}
