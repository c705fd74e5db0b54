//! End-to-end journey recording through the tracker with in-memory stores.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::sync::Arc;

use chrono::{DateTime, Days, TimeZone, Utc};
use greenerway_progress::{
    InMemoryJourneyStore, InMemoryStatsStore, JourneyFilter, LevelInfo, ProgressConfig,
    ProgressEvent, ProgressTracker, StreakChange, new_journey,
};
use greenerway_types::{JourneyRecord, TransportMode, UserId, VehicleType};

type MemTracker = ProgressTracker<InMemoryStatsStore, InMemoryJourneyStore>;

fn tracker() -> MemTracker {
    ProgressTracker::new(
        InMemoryStatsStore::new(),
        InMemoryJourneyStore::new(),
        ProgressConfig::default(),
    )
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap()
}

fn journey(user: &str, date: DateTime<Utc>, mode: TransportMode, km: f64) -> JourneyRecord {
    new_journey(UserId::new(user), date, km, mode, VehicleType::Petrol, 15.0, false).unwrap()
}

fn unlocked_ids(events: &[ProgressEvent]) -> Vec<&'static str> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::BadgeUnlocked { badge_id, .. } => Some(*badge_id),
            ProgressEvent::LevelChanged { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn tenth_journey_unlocks_journey_10_once() {
    let t = tracker();
    let mut seen = Vec::new();
    for n in 0..12_u32 {
        let date = start() + chrono::Duration::minutes(i64::from(n));
        let outcome = t.record(journey("u1", date, TransportMode::Car, 2.0)).await.unwrap();
        for id in unlocked_ids(&outcome.events) {
            seen.push((n, id));
        }
    }
    let journey_10: Vec<_> = seen.iter().filter(|(_, id)| *id == "journey_10").collect();
    assert_eq!(journey_10.len(), 1);
    assert_eq!(journey_10[0].0, 9);

    let stats = t.stats(&UserId::new("u1")).await.unwrap();
    assert_eq!(stats.total_journeys, 12);
    assert!(stats.unlocked_badge_ids.contains("journey_10"));
}

#[tokio::test]
async fn streak_extends_next_day_and_holds_same_day() {
    let t = tracker();
    let day_one = start();
    let day_two = day_one.checked_add_days(Days::new(1)).unwrap();

    let first = t.record(journey("u1", day_one, TransportMode::Walking, 1.0)).await.unwrap();
    assert_eq!(first.streak, StreakChange::Started);
    assert_eq!(first.stats.consecutive_days, 1);

    let second = t.record(journey("u1", day_two, TransportMode::Walking, 1.0)).await.unwrap();
    assert_eq!(second.streak, StreakChange::Extended);
    assert_eq!(second.stats.consecutive_days, 2);

    let later = day_two + chrono::Duration::hours(6);
    let third = t.record(journey("u1", later, TransportMode::Transit, 4.0)).await.unwrap();
    assert_eq!(third.streak, StreakChange::Unchanged);
    assert_eq!(third.stats.consecutive_days, 2);
}

#[test]
fn two_hundred_fifty_points_is_level_two() {
    let info = LevelInfo::for_points(250);
    assert_eq!(info.level, 2);
    assert_eq!(info.title, "Rookie");
}

#[tokio::test]
async fn points_and_badges_never_shrink_on_a_daily_habit() {
    let t = tracker();
    let mut last_points = 0;
    let mut last_badges = 0;
    for d in 0..10_u64 {
        let date = start().checked_add_days(Days::new(d)).unwrap();
        let mode = if d % 2 == 0 { TransportMode::Walking } else { TransportMode::Transit };
        let outcome = t.record(journey("u1", date, mode, 3.0)).await.unwrap();
        assert!(outcome.stats.total_points >= last_points);
        assert!(outcome.stats.unlocked_badge_ids.len() >= last_badges);
        assert!(outcome.stats.counters_consistent());
        assert!(outcome.level_after >= outcome.level_before);
        last_points = outcome.stats.total_points;
        last_badges = outcome.stats.unlocked_badge_ids.len();
    }
    let stats = t.stats(&UserId::new("u1")).await.unwrap();
    assert_eq!(stats.consecutive_days, 10);
    assert!(stats.unlocked_badge_ids.contains("streak_7"));
    assert!(stats.unlocked_badge_ids.contains("transit_5"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_for_one_user_are_all_counted() {
    let t = Arc::new(tracker());
    let mut handles = Vec::new();
    for n in 0..32_i64 {
        let t = Arc::clone(&t);
        handles.push(tokio::spawn(async move {
            let date = start() + chrono::Duration::seconds(n);
            t.record(journey("shared", date, TransportMode::Walking, 0.5)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    let user = UserId::new("shared");
    let stats = t.stats(&user).await.unwrap();
    assert_eq!(stats.total_journeys, 32);
    assert_eq!(stats.walking_count, 32);
    assert!((stats.walking_distance - 16.0).abs() < 1e-9);
    assert_eq!(t.history(&user, JourneyFilter::Walking).await.unwrap().len(), 32);
}

#[tokio::test]
async fn users_are_independent() {
    let t = tracker();
    t.record(journey("a", start(), TransportMode::Car, 5.0)).await.unwrap();
    t.record(journey("b", start(), TransportMode::Walking, 5.0)).await.unwrap();
    let a = t.stats(&UserId::new("a")).await.unwrap();
    let b = t.stats(&UserId::new("b")).await.unwrap();
    assert_eq!(a.car_count, 1);
    assert_eq!(a.walking_count, 0);
    assert_eq!(b.walking_count, 1);
    assert!(t.history(&UserId::new("a"), JourneyFilter::Walking).await.unwrap().is_empty());
}
