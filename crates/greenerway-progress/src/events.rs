//! Progress events and their delivery.
//!
//! The tracker emits a [`ProgressEvent`] for every unlocked badge and level
//! change. A [`ProgressNotifier`] forwards them to the notification
//! collaborator; delivery failures are the notifier's concern and never
//! undo a recorded journey.

use greenerway_types::UserId;
use serde::Serialize;

/// Something the user should hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A catalog badge was unlocked.
    BadgeUnlocked {
        /// Owner.
        user_id: UserId,
        /// Catalog id.
        badge_id: &'static str,
        /// Display title.
        title: &'static str,
        /// Bonus points awarded.
        points: u32,
    },
    /// The point total crossed into a new level.
    LevelChanged {
        /// Owner.
        user_id: UserId,
        /// Level before the journey.
        from: u8,
        /// Level after the journey.
        to: u8,
        /// Title of the new level.
        title: &'static str,
    },
}

/// Receiver of progress events.
pub trait ProgressNotifier: Send + Sync {
    /// Deliver one event.
    fn notify(&self, event: &ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

impl ProgressNotifier for NoOpNotifier {
    fn notify(&self, _event: &ProgressEvent) {}
}

/// Logs every event at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl ProgressNotifier for TracingNotifier {
    fn notify(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::BadgeUnlocked {
                user_id,
                badge_id,
                title,
                points,
            } => tracing::info!(%user_id, badge_id, title, points, "Badge unlocked"),
            ProgressEvent::LevelChanged {
                user_id,
                from,
                to,
                title,
            } => tracing::info!(%user_id, from, to, title, "Level changed"),
        }
    }
}
