//! Journey accumulation into [`UserStats`].
//!
//! [`record_journey`] is the only transition: it folds one completed
//! journey into the stats, updates the streak, recomputes points, and
//! unlocks any badge whose requirement is now met. It never mutates its
//! input; the caller persists the returned stats.
//!
//! `total_points` is always the full recompute of [`calculate_points`]
//! plus the bonus of every unlocked badge, so replaying the same final
//! stats yields the same total regardless of how they were reached.

use chrono::{DateTime, NaiveDate, Utc};
use greenerway_types::{JourneyRecord, TransportMode, UserStats};
use serde::Serialize;

use crate::catalog::{self, Badge};
use crate::config::{PointWeights, ProgressConfig};
use crate::error::ProgressError;

/// A completed journey as seen by the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedJourney {
    /// Mode used.
    pub mode: TransportMode,
    /// Distance in km.
    pub distance_km: f64,
    /// Actual emission in kg CO2.
    pub emission_kg: f64,
    /// Whether the user followed the recommendation.
    pub ai_used: bool,
    /// When the journey was completed.
    pub date: DateTime<Utc>,
}

impl From<&JourneyRecord> for CompletedJourney {
    fn from(record: &JourneyRecord) -> Self {
        Self {
            mode: record.mode,
            distance_km: record.distance_km,
            emission_kg: record.emission_kg,
            ai_used: record.ai_applied,
            date: record.date,
        }
    }
}

/// How a journey changed the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// First journey ever.
    Started,
    /// Journey on the day after the previous one.
    Extended,
    /// Journey on the same day as, or earlier than, the previous one.
    Unchanged,
    /// Gap of more than one day; streak back to 1.
    Reset,
}

/// Result of [`record_journey`].
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyUpdate {
    /// Stats after the journey.
    pub stats: UserStats,
    /// Badges unlocked by this journey, in catalog order.
    pub unlocked: Vec<&'static Badge>,
    /// Effect on the streak.
    pub streak: StreakChange,
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn floor_to_u64(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        // Float-to-int `as` saturates at u64::MAX.
        value.floor() as u64
    } else {
        0
    }
}

fn weighted(weight: u64, count: u32) -> u64 {
    weight.saturating_mul(u64::from(count))
}

/// Activity points of a stats snapshot, excluding badge bonuses.
///
/// `journeys*10 + floor(saved_kg*100) + floor(walking_km*5) + transit*15
/// + recommendations_used*20 + streak_days*50` with the default weights.
pub fn calculate_points(stats: &UserStats, weights: &PointWeights) -> u64 {
    let per_kg = weights.per_kg_saved;
    let per_km = weights.per_walking_km;
    [
        weighted(weights.per_journey, stats.total_journeys),
        floor_to_u64(stats.total_emission_saved * bounded_f64(per_kg)),
        floor_to_u64(stats.walking_distance * bounded_f64(per_km)),
        weighted(weights.per_transit_journey, stats.transit_count),
        weighted(weights.per_recommendation_used, stats.ai_recommendation_used),
        weighted(weights.per_streak_day, stats.consecutive_days),
    ]
    .into_iter()
    .fold(0_u64, u64::saturating_add)
}

fn bounded_f64(weight: u64) -> f64 {
    f64::from(u32::try_from(weight).unwrap_or(u32::MAX))
}

/// `calculate_points` plus the bonus of every unlocked badge.
pub fn total_points(stats: &UserStats, weights: &PointWeights) -> u64 {
    calculate_points(stats, weights).saturating_add(catalog::unlocked_bonus_points(stats))
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

fn increment(counter: &mut u32, context: &'static str) -> Result<(), ProgressError> {
    *counter = counter
        .checked_add(1)
        .ok_or(ProgressError::ArithmeticOverflow { context })?;
    Ok(())
}

fn validate(journey: &CompletedJourney) -> Result<(), ProgressError> {
    for (field, value) in [
        ("distance_km", journey.distance_km),
        ("emission_kg", journey.emission_kg),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ProgressError::invalid(
                field,
                format!("must be a non-negative number, got {value}"),
            ));
        }
    }
    Ok(())
}

/// Update the streak for a journey on `day`.
///
/// `last_journey_date` is always set to `day`, even when it is earlier
/// than the stored one.
pub fn update_streak(stats: &mut UserStats, day: NaiveDate) -> Result<StreakChange, ProgressError> {
    let change = match stats.last_journey_date {
        None => {
            stats.consecutive_days = 1;
            StreakChange::Started
        }
        Some(last) => match day.signed_duration_since(last).num_days() {
            1 => {
                increment(&mut stats.consecutive_days, "consecutive_days")?;
                StreakChange::Extended
            }
            diff if diff > 1 => {
                stats.consecutive_days = 1;
                StreakChange::Reset
            }
            _ => StreakChange::Unchanged,
        },
    };
    stats.last_journey_date = Some(day);
    Ok(change)
}

/// Fold a journey into the stats without evaluating badges.
///
/// Counters, sums, and the streak are updated and `total_points` is
/// recomputed.
pub fn apply_journey(
    stats: &UserStats,
    journey: &CompletedJourney,
    config: &ProgressConfig,
) -> Result<(UserStats, StreakChange), ProgressError> {
    validate(journey)?;
    let day = journey.date.with_timezone(&config.offset()?).date_naive();
    let km = journey.distance_km;
    let baseline_kg = km * config.savings_baseline_kg_per_km;

    let mut next = stats.clone();
    increment(&mut next.total_journeys, "total_journeys")?;
    next.total_distance += km;

    match journey.mode {
        TransportMode::Walking => {
            increment(&mut next.walking_count, "walking_count")?;
            next.walking_distance += km;
            next.total_emission_saved += baseline_kg;
        }
        TransportMode::Transit => {
            increment(&mut next.transit_count, "transit_count")?;
            next.total_emission_saved += (baseline_kg - journey.emission_kg).max(0.0);
        }
        TransportMode::Car => {
            increment(&mut next.car_count, "car_count")?;
        }
    }

    if journey.ai_used {
        increment(&mut next.ai_recommendation_used, "ai_recommendation_used")?;
    }

    let streak = update_streak(&mut next, day)?;
    next.total_points = total_points(&next, &config.points);
    Ok((next, streak))
}

/// Unlock every badge whose requirement is now met.
///
/// Already unlocked ids are skipped. Each newly unlocked badge adds its
/// bonus to `total_points`. Returns the new badges in catalog order.
pub fn unlock_badges(stats: &mut UserStats) -> Vec<&'static Badge> {
    let mut unlocked = Vec::new();
    for badge in catalog::catalog() {
        if stats.unlocked_badge_ids.contains(badge.id) || !badge.is_satisfied(stats) {
            continue;
        }
        stats.unlocked_badge_ids.insert(badge.id.to_owned());
        stats.total_points = stats.total_points.saturating_add(u64::from(badge.points));
        tracing::info!(
            badge = badge.id,
            points = badge.points,
            total_points = stats.total_points,
            "badge unlocked"
        );
        unlocked.push(badge);
    }
    unlocked
}

/// Record one completed journey.
///
/// # Errors
///
/// [`ProgressError::InvalidInput`] for a negative or non-finite distance
/// or emission, [`ProgressError::ArithmeticOverflow`] if a counter is
/// saturated. The input stats are untouched on error.
pub fn record_journey(
    stats: &UserStats,
    journey: &CompletedJourney,
    config: &ProgressConfig,
) -> Result<JourneyUpdate, ProgressError> {
    let (mut next, streak) = apply_journey(stats, journey, config)?;
    let unlocked = unlock_badges(&mut next);

    tracing::debug!(
        mode = %journey.mode,
        distance_km = journey.distance_km,
        total_journeys = next.total_journeys,
        consecutive_days = next.consecutive_days,
        total_points = next.total_points,
        unlocked = unlocked.len(),
        "journey recorded"
    );

    Ok(JourneyUpdate {
        stats: next,
        unlocked,
        streak,
    })
}
