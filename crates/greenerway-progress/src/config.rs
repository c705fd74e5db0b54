//! Progress tracker configuration.
//!
//! Point weights and savings baselines mirror the values the mobile client
//! has always used. Changing them rescales every user's points on the next
//! recorded journey, since points are fully recomputed.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Weights of [`calculate_points`](crate::stats::calculate_points).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointWeights {
    /// Points per recorded journey (default: 10).
    pub per_journey: u64,
    /// Points per kg CO2 saved, rounded down (default: 100).
    pub per_kg_saved: u64,
    /// Points per km walked, rounded down (default: 5).
    pub per_walking_km: u64,
    /// Points per transit journey (default: 15).
    pub per_transit_journey: u64,
    /// Points per journey that followed the recommendation (default: 20).
    pub per_recommendation_used: u64,
    /// Points per day of the current streak (default: 50).
    pub per_streak_day: u64,
}

impl Default for PointWeights {
    fn default() -> Self {
        Self {
            per_journey: 10,
            per_kg_saved: 100,
            per_walking_km: 5,
            per_transit_journey: 15,
            per_recommendation_used: 20,
            per_streak_day: 50,
        }
    }
}

/// Configuration for the progress tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Average-car factor (kg/km) that green journeys are compared against
    /// when accumulating `total_emission_saved` (default: 0.17).
    pub savings_baseline_kg_per_km: f64,

    /// Partial saving credited per transit km toward goals (default: 0.09).
    pub goal_transit_saving_kg_per_km: f64,

    /// Point weights.
    pub points: PointWeights,

    /// Offset from UTC, in minutes, of the calendar used for streaks
    /// (default: 0).
    pub utc_offset_minutes: i32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            savings_baseline_kg_per_km: 0.17,
            goal_transit_saving_kg_per_km: 0.09,
            points: PointWeights::default(),
            utc_offset_minutes: 0,
        }
    }
}

impl ProgressConfig {
    /// The streak calendar's offset from UTC.
    pub fn offset(&self) -> Result<FixedOffset, ProgressError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ProgressError::invalid(
                    "utc_offset_minutes",
                    format!("{} is not a valid offset", self.utc_offset_minutes),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ProgressConfig::default();
        assert!((cfg.savings_baseline_kg_per_km - 0.17).abs() < 1e-12);
        assert_eq!(cfg.points.per_streak_day, 50);
        assert_eq!(cfg.offset().ok().map(|o| o.local_minus_utc()), Some(0));
    }

    #[test]
    fn offset_in_minutes() {
        let cfg = ProgressConfig {
            utc_offset_minutes: 180,
            ..ProgressConfig::default()
        };
        assert_eq!(cfg.offset().ok().map(|o| o.local_minus_utc()), Some(10_800));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let cfg = ProgressConfig {
            utc_offset_minutes: 24 * 60,
            ..ProgressConfig::default()
        };
        assert!(cfg.offset().is_err());
    }
}
