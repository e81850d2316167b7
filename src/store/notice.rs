//! User-facing feedback about store operations
//!
//! The board holds a single message at a time, the way a snackbar does: a new post replaces
//! whatever was on display, and a notice stops being reported once its display window has
//! elapsed, whether or not anyone dismissed it.

use std::time::{Duration, Instant};

/// How long a notice stays visible before it dismisses itself
const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Whether a notice reports a success or a failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// One displayable message
#[derive(Clone, Debug)]
pub struct Notice {
    text: String,
    severity: Severity,
    posted_at: Instant,
}

impl Notice {
    fn new(text: String, severity: Severity) -> Self {
        Self {
            text,
            severity,
            posted_at: Instant::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    fn is_expired(&self) -> bool {
        self.posted_at.elapsed() >= AUTO_DISMISS_AFTER
    }
}

/// Holds the single most-recent notice
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The notice to display, if one is still within its display window
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| notice.is_expired() == false)
    }

    /// Clear the displayed notice before its window elapses
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub(crate) fn post_success(&mut self, text: &str) {
        self.current = Some(Notice::new(text.to_string(), Severity::Success));
    }

    pub(crate) fn post_error(&mut self, text: &str) {
        self.current = Some(Notice::new(text.to_string(), Severity::Error));
    }

    #[cfg(test)]
    fn backdate(&mut self, by: Duration) {
        if let Some(notice) = &mut self.current {
            notice.posted_at -= by;
        }
    }
}
