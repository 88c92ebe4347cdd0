//! User-facing strings of the detail screen.

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A short message shown to the user after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn deleted(title: &str) -> Self {
        Self::new(
            NoticeKind::Success,
            format!("Deleted {title} from your collection"),
        )
    }

    pub fn delete_failed(title: &str) -> Self {
        Self::new(NoticeKind::Error, format!("Failed to delete {title}"))
    }

    pub fn already_owned() -> Self {
        Self::new(NoticeKind::Info, "You already own this movie")
    }

    pub fn added() -> Self {
        Self::new(NoticeKind::Success, "Movie added to your collection")
    }

    pub fn add_failed() -> Self {
        Self::new(NoticeKind::Error, "Failed to add movie")
    }
}

/// Title of the delete confirmation dialog.
pub fn delete_prompt_title(title: &str) -> String {
    format!("Delete {title}?")
}

pub const DELETE_PROMPT_BODY: &str =
    "This movie will be removed from your collection. This cannot be undone.";

pub const CONFIRM_LABEL: &str = "Confirm";
pub const CANCEL_LABEL: &str = "Cancel";
