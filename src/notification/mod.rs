//! Notification delivery.
//!
//! This module provides:
//!
//! - A [`NotificationSender`] trait the effect executor delivers through
//! - A desktop implementation backed by `notify-rust`
//! - A mock sender for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use pomodoro_timer::notification::{DesktopNotifier, NotificationSender};
//! use pomodoro_timer::types::content::create_session_paused_content;
//!
//! let notifier = DesktopNotifier::new();
//! if let Err(e) = notifier.send(&create_session_paused_content()) {
//!     eprintln!("notification failed: {}", e);
//! }
//! ```

mod desktop;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;
use std::time::Duration;

pub use self::desktop::DesktopNotifier;
pub use self::error::NotificationError;

use crate::types::{Notification, NotificationKind};

/// Trait for notification delivery implementations.
///
/// Senders are called from tokio's blocking pool and may block.
pub trait NotificationSender: Send + Sync {
    /// Shows `notification`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn send(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// Returns true if the sender can deliver notifications.
    fn is_available(&self) -> bool;
}

/// Longest time a held mock send waits for its release.
const MOCK_HOLD_TIMEOUT: Duration = Duration::from_secs(5);

/// Mock notification sender for testing.
#[derive(Debug, Default)]
pub struct MockNotificationSender {
    notifications: Mutex<Vec<Notification>>,
    available: AtomicBool,
    should_fail: AtomicBool,
    hold: Mutex<Option<Receiver<()>>>,
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
            hold: Mutex::new(None),
        }
    }

    /// Makes each `send` block until `release` yields a message or is
    /// dropped, like a notification daemon that stops responding.
    pub fn block_until_released(&self, release: Receiver<()>) {
        *self.hold.lock().unwrap() = Some(release);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    /// Returns the events of all recorded notifications, in order.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationKind> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.event)
            .collect()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn clear_recorded(&self) {
        self.notifications.lock().unwrap().clear();
    }
}

impl NotificationSender for MockNotificationSender {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        if let Some(release) = self.hold.lock().unwrap().as_ref() {
            let _ = release.recv_timeout(MOCK_HOLD_TIMEOUT);
        }
        if !self.available.load(Ordering::SeqCst) {
            return Err(NotificationError::NotAvailable);
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
