//! Execution of engine effects.
//!
//! The executor is the only place sound players and notification senders
//! are called from. Failures are logged and swallowed; nothing flows back
//! into the engine.
//!
//! Desktop notifications are handed to a background worker that calls the
//! sender on tokio's blocking pool, so a slow notification daemon never
//! delays the tick loop. Sound cues are played inline; the player only
//! queues them on a detached sink.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SoundConfig;
use crate::notification::NotificationSender;
use crate::sound::SoundPlayer;
use crate::types::{AudioCue, Effect, Notification};

// ============================================================================
// Notification Worker
// ============================================================================

/// Delivers queued notifications one at a time, in order.
struct NotificationWorker {
    queue: mpsc::UnboundedSender<Notification>,
    handle: JoinHandle<()>,
}

impl NotificationWorker {
    /// Spawns the worker on the current tokio runtime.
    fn spawn(notifier: Arc<dyn NotificationSender>) -> Self {
        let (queue, mut pending) = mpsc::unbounded_channel::<Notification>();
        let handle = tokio::spawn(async move {
            while let Some(notification) = pending.recv().await {
                let delivered = tokio::task::spawn_blocking({
                    let notifier = Arc::clone(&notifier);
                    move || deliver(notifier.as_ref(), &notification)
                })
                .await;
                if let Err(e) = delivered {
                    warn!("Notification delivery task failed: {}", e);
                }
            }
            debug!("notification worker stopped");
        });
        Self { queue, handle }
    }
}

fn deliver(notifier: &dyn NotificationSender, notification: &Notification) {
    if !notifier.is_available() {
        debug!("notifier unavailable, skipping: {}", notification.title);
        return;
    }
    if let Err(e) = notifier.send(notification) {
        warn!(
            "Failed to send notification '{}': {} ({})",
            notification.title,
            e,
            e.suggestion()
        );
    }
}

// ============================================================================
// EffectExecutor
// ============================================================================

/// Runs effects against the configured collaborators.
pub struct EffectExecutor {
    sound_player: Option<Arc<dyn SoundPlayer>>,
    notifications: Option<NotificationWorker>,
    sound: SoundConfig,
}

impl EffectExecutor {
    /// Creates an executor. A missing collaborator turns its effects into log lines.
    ///
    /// # Panics
    ///
    /// Panics if a notifier is given outside a tokio runtime.
    pub fn new(
        sound_player: Option<Arc<dyn SoundPlayer>>,
        notifier: Option<Arc<dyn NotificationSender>>,
        sound: SoundConfig,
    ) -> Self {
        Self {
            sound_player,
            notifications: notifier.map(NotificationWorker::spawn),
            sound,
        }
    }

    /// Creates an executor with no collaborators.
    pub fn silent() -> Self {
        Self::new(None, None, SoundConfig::default())
    }

    /// Returns true if audio cues reach a player.
    #[must_use]
    pub fn has_sound(&self) -> bool {
        self.sound.enabled && self.sound_player.is_some()
    }

    /// Returns true if notifications reach a desktop notifier.
    #[must_use]
    pub fn has_notifier(&self) -> bool {
        self.notifications.is_some()
    }

    /// Executes `effects` in order without waiting for notification delivery.
    pub fn execute(&self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Notification(notification) => self.notify(notification),
                Effect::AudioCue { cue } => self.play_cue(*cue),
            }
        }
    }

    /// Waits until every queued notification has been handed to the notifier.
    pub async fn finish(self) {
        let Some(NotificationWorker { queue, handle }) = self.notifications else {
            return;
        };
        drop(queue);
        if let Err(e) = handle.await {
            warn!("Notification worker failed: {}", e);
        }
    }

    fn notify(&self, notification: &Notification) {
        let Some(worker) = &self.notifications else {
            debug!("notification not sent (no notifier): {}", notification.title);
            return;
        };
        if worker.queue.send(notification.clone()).is_err() {
            warn!(
                "Notification worker is gone, dropping '{}'",
                notification.title
            );
        }
    }

    fn play_cue(&self, cue: AudioCue) {
        if !self.sound.enabled {
            debug!("{} cue skipped (sound disabled)", cue.as_str());
            return;
        }
        let Some(player) = &self.sound_player else {
            debug!("{} cue skipped (no audio device)", cue.as_str());
            return;
        };
        if !player.is_available() {
            debug!("{} cue skipped (player unavailable)", cue.as_str());
            return;
        }
        let source = self.sound.source_for(cue);
        if let Err(e) = player.play(&source) {
            warn!(
                "Failed to play {} cue '{}': {} ({})",
                cue.as_str(),
                source.name(),
                e,
                e.suggestion()
            );
        }
    }
}

impl std::fmt::Debug for EffectExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectExecutor")
            .field("has_sound_player", &self.sound_player.is_some())
            .field("has_notifier", &self.notifications.is_some())
            .field("sound", &self.sound)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
