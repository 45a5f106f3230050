//! Notification system error types.

use thiserror::Error;

/// Errors that can occur while showing a desktop notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to send a notification.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// Invalid input provided to the notification system.
    #[error("invalid notification: {0}")]
    InvalidInput(String),

    /// No notification server is reachable (e.g. no D-Bus session).
    #[error("notification service is not available")]
    NotAvailable,
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "check that a notification daemon is running",
            Self::InvalidInput(_) => "check the notification text",
            Self::NotAvailable => "pass --no-notify to silence desktop notifications",
        }
    }
}
