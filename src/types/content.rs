//! Notification content for engine events.
//!
//! The engine builds every notification it emits through the `create_*`
//! functions here, so the wording lives in one place.

use super::{Notification, NotificationKind, Severity, NOTIFICATION_DURATION_MS};

/// Maximum length for notification titles and bodies.
const MAX_TEXT_LENGTH: usize = 200;

/// Builder for constructing notification content.
#[derive(Debug, Clone)]
pub struct NotificationContentBuilder {
    event: NotificationKind,
    title: String,
    body: String,
    severity: Severity,
}

impl NotificationContentBuilder {
    /// Creates a builder for an `event` notification.
    #[must_use]
    pub fn new(event: NotificationKind) -> Self {
        Self {
            event,
            title: String::new(),
            body: String::new(),
            severity: Severity::Info,
        }
    }

    /// Sets the notification title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = sanitize_text(title);
        self
    }

    /// Sets the notification body text.
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.body = sanitize_text(body);
        self
    }

    /// Sets the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Builds the notification. Every notification stays up for
    /// [`NOTIFICATION_DURATION_MS`] and may be dismissed early.
    #[must_use]
    pub fn build(self) -> Notification {
        Notification {
            event: self.event,
            title: self.title,
            body: self.body,
            severity: self.severity,
            duration_ms: NOTIFICATION_DURATION_MS,
            dismissible: true,
        }
    }
}

/// Strips control characters and truncates overly long text.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .take(MAX_TEXT_LENGTH)
        .collect()
}

/// Notification for a session started from the top.
#[must_use]
pub fn create_session_started_content(session_minutes: u32) -> Notification {
    NotificationContentBuilder::new(NotificationKind::SessionStarted)
        .title("Pomodoro started")
        .body(&format!(
            "Your pomodoro timer has started, with a duration of {} minutes.",
            session_minutes
        ))
        .severity(Severity::Success)
        .build()
}

/// Notification for a countdown resumed mid-way.
#[must_use]
pub fn create_session_resumed_content() -> Notification {
    NotificationContentBuilder::new(NotificationKind::SessionResumed)
        .title("Pomodoro resumed.")
        .body("Your pomodoro timer has resumed.")
        .severity(Severity::Info)
        .build()
}

/// Notification for a paused countdown.
#[must_use]
pub fn create_session_paused_content() -> Notification {
    NotificationContentBuilder::new(NotificationKind::SessionPaused)
        .title("Pomodoro paused")
        .body("Your pomodoro timer has been paused.")
        .severity(Severity::Info)
        .build()
}

/// Notification for a restart back to the top of a session.
#[must_use]
pub fn create_session_restarted_content() -> Notification {
    NotificationContentBuilder::new(NotificationKind::SessionRestarted)
        .title("Pomodoro restarted.")
        .body("Your pomodoro timer has been restarted.")
        .severity(Severity::Info)
        .build()
}

/// Notification for a finished work session.
///
/// # Arguments
/// * `break_minutes` - Length of the break that starts now
#[must_use]
pub fn create_session_completed_content(break_minutes: u32) -> Notification {
    NotificationContentBuilder::new(NotificationKind::SessionCompleted)
        .title("Pomodoro completed.")
        .body(&format!(
            "Congratulations, you have finished your pomodoro! Your break of {} minutes is starting.",
            break_minutes
        ))
        .severity(Severity::Success)
        .build()
}

/// Notification for a finished break.
#[must_use]
pub fn create_break_completed_content() -> Notification {
    NotificationContentBuilder::new(NotificationKind::BreakCompleted)
        .title("Break completed.")
        .body("Your break is over. Time to get back to work!")
        .severity(Severity::Success)
        .build()
}
