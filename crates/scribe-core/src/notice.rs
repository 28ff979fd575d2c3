//! User-visible acknowledgements queued by the session.
//!
//! A host drains these after each interaction and shows them however it likes (toast,
//! status line, log). The core never renders them.

/// Visual weight of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeVariant {
    /// The action completed.
    Success,
    /// The action was rejected or failed; nothing was committed.
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            title,
            description: description.into(),
            variant: NoticeVariant::Success,
        }
    }

    pub fn destructive(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            title,
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.description)
        }
    }
}
