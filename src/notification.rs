//! Transient user-facing messages.
//!
//! Every outcome a page wants to surface (an API error, a validation failure,
//! a successful login) becomes a [`Notification`]. The renderer decides how
//! to show it; the only contract is that it stays visible for
//! [`Notification::DISPLAY_FOR`].

use std::time::Duration;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

/// A message shown to the user for a short time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    /// How long a notification stays on screen.
    pub const DISPLAY_FOR: Duration = Duration::from_secs(5);

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// The message split on line breaks, one entry per rendered line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }
}
