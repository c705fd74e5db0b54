//! The progress tracker service.
//!
//! [`ProgressTracker`] owns the stats and journey stores and serializes
//! updates per user: two journeys recorded concurrently for the same user
//! are both counted, while different users never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use greenerway_types::{JourneyId, JourneyRecord, UserId, UserProfile, UserStats};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::catalog::{self, Badge, BadgeProgress};
use crate::config::ProgressConfig;
use crate::error::ProgressError;
use crate::events::{NoOpNotifier, ProgressEvent, ProgressNotifier};
use crate::goals::Goal;
use crate::history::JourneyFilter;
use crate::level::{self, LevelInfo};
use crate::profile_badges;
use crate::stats::{self, CompletedJourney, StreakChange};
use crate::store::{JourneyStore, StatsStore};

/// What recording one journey did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyOutcome {
    /// The stored record.
    pub journey: JourneyRecord,
    /// Stats after the journey, as persisted.
    pub stats: UserStats,
    /// Badges unlocked by this journey, in catalog order.
    pub unlocked: Vec<&'static Badge>,
    /// Effect on the streak.
    pub streak: StreakChange,
    /// Level before the journey.
    pub level_before: u8,
    /// Level after the journey.
    pub level_after: u8,
    /// Events delivered to the notifier.
    pub events: Vec<ProgressEvent>,
}

/// A user's progress for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Current stats.
    pub stats: UserStats,
    /// Level derived from `stats.total_points`.
    pub level: LevelInfo,
    /// Every catalog badge with unlock state and progress.
    pub badges: Vec<BadgeProgress>,
}

/// Records journeys and answers progress queries.
pub struct ProgressTracker<S, J> {
    stats: S,
    journeys: J,
    config: ProgressConfig,
    notifier: Arc<dyn ProgressNotifier>,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl<S: StatsStore, J: JourneyStore> ProgressTracker<S, J> {
    /// Create a tracker that discards events.
    pub fn new(stats: S, journeys: J, config: ProgressConfig) -> Self {
        Self::with_notifier(stats, journeys, config, Arc::new(NoOpNotifier))
    }

    /// Create a tracker that delivers events to `notifier`.
    pub fn with_notifier(
        stats: S,
        journeys: J,
        config: ProgressConfig,
        notifier: Arc<dyn ProgressNotifier>,
    ) -> Self {
        Self {
            stats,
            journeys,
            config,
            notifier,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Effective configuration.
    pub const fn config(&self) -> &ProgressConfig {
        &self.config
    }

    async fn user_lock(&self, user: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        Arc::clone(locks.entry(user.clone()).or_default())
    }

    /// Drop the user's lock entry once no other call holds or awaits it.
    async fn release_user_lock(&self, user: &UserId, lock: Arc<Mutex<()>>) {
        let mut locks = self.user_locks.lock().await;
        drop(lock);
        if locks.get(user).is_some_and(|held| Arc::strong_count(held) == 1) {
            locks.remove(user);
        }
    }

    /// Record a completed journey.
    ///
    /// Loads the user's stats, folds the journey in, appends the record,
    /// and persists the new stats, all under the user's lock. Events are
    /// delivered after the stats are saved.
    ///
    /// # Errors
    ///
    /// Validation and overflow errors from
    /// [`record_journey`](stats::record_journey) leave both stores
    /// untouched. Store errors are passed through.
    pub async fn record(&self, journey: JourneyRecord) -> Result<JourneyOutcome, ProgressError> {
        let user = journey.user_id.clone();
        let lock = self.user_lock(&user).await;
        let result = {
            let _guard = lock.lock().await;
            self.record_locked(journey).await
        };
        self.release_user_lock(&user, lock).await;
        result
    }

    async fn record_locked(&self, journey: JourneyRecord) -> Result<JourneyOutcome, ProgressError> {
        let user = journey.user_id.clone();
        let before = self.stats.load(&user).await?;
        let update = stats::record_journey(&before, &CompletedJourney::from(&journey), &self.config)?;

        self.journeys.append(&journey).await?;
        self.stats.save(&user, &update.stats).await?;

        let level_before = level::level_for_points(before.total_points);
        let level_after = level::level_for_points(update.stats.total_points);

        let mut events: Vec<ProgressEvent> = update
            .unlocked
            .iter()
            .map(|badge| ProgressEvent::BadgeUnlocked {
                user_id: user.clone(),
                badge_id: badge.id,
                title: badge.title,
                points: badge.points,
            })
            .collect();
        if level_after != level_before {
            events.push(ProgressEvent::LevelChanged {
                user_id: user.clone(),
                from: level_before,
                to: level_after,
                title: level::level_title(level_after),
            });
        }
        for event in &events {
            self.notifier.notify(event);
        }

        tracing::info!(
            user_id = %user,
            journey_id = %journey.id,
            mode = %journey.mode,
            total_points = update.stats.total_points,
            unlocked = update.unlocked.len(),
            level = level_after,
            "Journey recorded"
        );

        Ok(JourneyOutcome {
            journey,
            stats: update.stats,
            unlocked: update.unlocked,
            streak: update.streak,
            level_before,
            level_after,
            events,
        })
    }

    /// Current stats of a user.
    pub async fn stats(&self, user: &UserId) -> Result<UserStats, ProgressError> {
        self.stats.load(user).await
    }

    /// Stats, level, and badge progress of a user.
    pub async fn progress(&self, user: &UserId) -> Result<ProgressSummary, ProgressError> {
        let stats = self.stats.load(user).await?;
        Ok(ProgressSummary {
            level: LevelInfo::for_points(stats.total_points),
            badges: catalog::badge_progress(&stats),
            stats,
        })
    }

    /// A user's journeys matching `filter`, newest first.
    pub async fn history(
        &self,
        user: &UserId,
        filter: JourneyFilter,
    ) -> Result<Vec<JourneyRecord>, ProgressError> {
        let records = self.journeys.list(user).await?;
        Ok(filter.apply(&records).into_iter().cloned().collect())
    }

    /// Delete one journey record.
    ///
    /// Stats are not recomputed: points and badges already earned stay.
    pub async fn delete_journey(
        &self,
        user: &UserId,
        id: JourneyId,
    ) -> Result<JourneyRecord, ProgressError> {
        let lock = self.user_lock(user).await;
        let result = {
            let _guard = lock.lock().await;
            self.journeys.delete(user, id).await
        };
        self.release_user_lock(user, lock).await;
        let removed = result?;
        tracing::info!(user_id = %user, journey_id = %id, "Journey deleted");
        Ok(removed)
    }

    /// Award the profile-level badges a newly recorded journey earns.
    ///
    /// Returns the ids newly added to `profile.earned_badge_ids`. The
    /// caller persists the profile.
    pub async fn award_profile_badges(
        &self,
        profile: &mut UserProfile,
        journey: &JourneyRecord,
    ) -> Result<Vec<&'static str>, ProgressError> {
        let mut earned = Vec::new();
        if profile_badges::award_first_green_journey(profile, journey) {
            earned.push(profile_badges::FIRST_GREEN_JOURNEY);
        }
        let records = self.journeys.list(&journey.user_id).await?;
        if profile_badges::award_ten_kg_savings(profile, &records) {
            earned.push(profile_badges::TEN_KG_SAVINGS);
        }
        Ok(earned)
    }

    /// Recompute a goal from the user's journey history.
    pub async fn refresh_goal(&self, user: &UserId, goal: &mut Goal) -> Result<(), ProgressError> {
        let records = self.journeys.list(user).await?;
        goal.refresh(&records, &self.config);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, TimeZone, Utc};
    use greenerway_types::{HealthStatus, TransportMode, VehicleType};

    use super::*;
    use crate::goals::GoalDuration;
    use crate::history::new_journey;
    use crate::store::{InMemoryJourneyStore, InMemoryStatsStore};

    type MemTracker = ProgressTracker<InMemoryStatsStore, InMemoryJourneyStore>;

    fn tracker() -> MemTracker {
        ProgressTracker::new(
            InMemoryStatsStore::new(),
            InMemoryJourneyStore::new(),
            ProgressConfig::default(),
        )
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 9, 0, 0).unwrap()
    }

    fn walk(user: &str, d: u32, km: f64) -> JourneyRecord {
        new_journey(
            UserId::new(user),
            day(d),
            km,
            TransportMode::Walking,
            VehicleType::Unknown,
            km * 12.0,
            false,
        )
        .unwrap()
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl ProgressNotifier for Counting {
        fn notify(&self, _event: &ProgressEvent) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[tokio::test]
    async fn record_persists_stats_and_history() {
        let t = tracker();
        let outcome = t.record(walk("u1", 1, 2.0)).await.unwrap();
        assert_eq!(outcome.streak, StreakChange::Started);
        assert_eq!(outcome.stats.total_journeys, 1);

        let stored = t.stats(&UserId::new("u1")).await.unwrap();
        assert_eq!(stored, outcome.stats);
        let history = t.history(&UserId::new("u1"), JourneyFilter::All).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn user_locks_are_released_after_each_call() {
        let t = tracker();
        let outcome = t.record(walk("u1", 1, 2.0)).await.unwrap();
        t.record(walk("u2", 1, 1.0)).await.unwrap();
        assert!(t.user_locks.lock().await.is_empty());

        let mut bad = walk("u3", 1, 1.0);
        bad.distance_km = -1.0;
        assert!(t.record(bad).await.is_err());
        t.delete_journey(&UserId::new("u1"), outcome.journey.id).await.unwrap();
        assert!(t.user_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_journey_leaves_stores_untouched() {
        let t = tracker();
        let mut bad = walk("u1", 1, 1.0);
        bad.distance_km = -3.0;
        assert!(t.record(bad).await.is_err());
        assert!(t.history(&UserId::new("u1"), JourneyFilter::All).await.unwrap().is_empty());
        assert_eq!(t.stats(&UserId::new("u1")).await.unwrap(), UserStats::default());
    }

    #[tokio::test]
    async fn events_reach_the_notifier() {
        let counting = Arc::new(Counting::default());
        let t = ProgressTracker::with_notifier(
            InMemoryStatsStore::new(),
            InMemoryJourneyStore::new(),
            ProgressConfig::default(),
            Arc::clone(&counting) as Arc<dyn ProgressNotifier>,
        );
        // 6 km walk: three badges; 192 activity points plus 200 bonus
        // crosses into level 2.
        let outcome = t.record(walk("u1", 1, 6.0)).await.unwrap();
        assert_eq!(outcome.unlocked.len(), 3);
        assert_eq!(outcome.level_before, 1);
        assert_eq!(outcome.level_after, 2);
        assert_eq!(outcome.events.len(), 4);
        assert_eq!(counting.0.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn delete_keeps_stats() {
        let t = tracker();
        let outcome = t.record(walk("u1", 1, 1.0)).await.unwrap();
        let user = UserId::new("u1");
        t.delete_journey(&user, outcome.journey.id).await.unwrap();
        assert!(t.history(&user, JourneyFilter::All).await.unwrap().is_empty());
        assert_eq!(t.stats(&user).await.unwrap().total_journeys, 1);
        assert!(matches!(
            t.delete_journey(&user, outcome.journey.id).await,
            Err(ProgressError::JourneyNotFound(_))
        ));
    }

    #[tokio::test]
    async fn profile_badges_and_goals_use_history() {
        let t = tracker();
        let mut profile = UserProfile::new(30, 0.5, HealthStatus::Normal, false, VehicleType::Petrol);
        let first = t.record(walk("u1", 1, 30.0)).await.unwrap();
        let earned = t.award_profile_badges(&mut profile, &first.journey).await.unwrap();
        // 30 km * 0.192 = 5.76 kg
        assert_eq!(earned, vec![profile_badges::FIRST_GREEN_JOURNEY]);

        let second = t.record(walk("u1", 2, 30.0)).await.unwrap();
        let earned = t.award_profile_badges(&mut profile, &second.journey).await.unwrap();
        assert_eq!(earned, vec![profile_badges::TEN_KG_SAVINGS]);

        let mut goal = Goal::new("March", 5.0, GoalDuration::Monthly, day(1)).unwrap();
        t.refresh_goal(&UserId::new("u1"), &mut goal).await.unwrap();
        assert!(goal.is_completed);
    }

    #[tokio::test]
    async fn summary_reports_level_and_badges() {
        let t = tracker();
        t.record(walk("u1", 1, 1.0)).await.unwrap();
        let summary = t.progress(&UserId::new("u1")).await.unwrap();
        assert_eq!(summary.badges.len(), 20);
        assert_eq!(summary.level.points, summary.stats.total_points);
    }
}
