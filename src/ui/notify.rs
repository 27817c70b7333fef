use gtk4::prelude::*;
use libadwaita::{Toast, ToastOverlay, ToastPriority};

/// Kind of transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Info,
    Success,
    Error,
}

impl Variant {
    /// Style class applied to the toast title; Info keeps the default look.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Variant::Info => None,
            Variant::Success => Some("success"),
            Variant::Error => Some("error"),
        }
    }
}

/// A transient notification described as data; `present` renders it.
/// Replaces ad-hoc popup construction with one state-driven component.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub variant: Variant,
    /// Seconds before auto-dismiss; 0 keeps the toast until dismissed.
    pub timeout: u32,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Info,
            timeout: 5,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Success,
            timeout: 6,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Error,
            timeout: 8,
        }
    }
}

/// Render a notice through the window's toast overlay.
pub fn present(overlay: &ToastOverlay, notice: Notice) {
    let toast = Toast::new(&notice.message);
    if let Some(class) = notice.variant.css_class() {
        let title = gtk4::Label::new(Some(&notice.message));
        title.add_css_class(class);
        title.set_wrap(true);
        toast.set_custom_title(Some(&title));
    }
    toast.set_timeout(notice.timeout);
    toast.set_priority(match notice.variant {
        Variant::Error => ToastPriority::High,
        Variant::Info | Variant::Success => ToastPriority::Normal,
    });
    overlay.add_toast(toast);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_variant_and_timeout() {
        let n = Notice::info("hello");
        assert_eq!(n.variant, Variant::Info);
        assert_eq!(n.timeout, 5);

        let n = Notice::error("bad");
        assert_eq!(n.variant, Variant::Error);
        assert_eq!(n.timeout, 8);
        assert_eq!(n.message, "bad");
    }

    #[test]
    fn variants_map_to_style_classes() {
        assert_eq!(Variant::Info.css_class(), None);
        assert_eq!(Variant::Success.css_class(), Some("success"));
        assert_eq!(Variant::Error.css_class(), Some("error"));
    }
}
