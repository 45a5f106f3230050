//! Desktop notifications through the platform notification service.

use notify_rust::Timeout;
use tracing::debug;

use super::error::NotificationError;
use super::NotificationSender;
use crate::types::Notification;

/// Application name shown by the notification service.
const APP_NAME: &str = "pomodoro";

/// Sends notifications through `notify-rust` (D-Bus, macOS or WinRT).
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// Creates a notifier using the default application name.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    /// Returns the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl NotificationSender for DesktopNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        if notification.title.is_empty() {
            return Err(NotificationError::InvalidInput(
                "notification title is empty".to_string(),
            ));
        }

        let mut desktop = notify_rust::Notification::new();
        desktop
            .appname(&self.app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .timeout(Timeout::Milliseconds(notification.duration_ms));

        #[cfg(all(unix, not(target_os = "macos")))]
        desktop.urgency(urgency_for(notification.severity));

        desktop
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        debug!(title = %notification.title, "Desktop notification sent");
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Maps a severity to a freedesktop urgency level.
#[cfg(all(unix, not(target_os = "macos")))]
fn urgency_for(severity: crate::types::Severity) -> notify_rust::Urgency {
    use crate::types::Severity;

    match severity {
        Severity::Success => notify_rust::Urgency::Normal,
        Severity::Info => notify_rust::Urgency::Low,
    }
}
