//! Time-boxed CO2 savings goals.
//!
//! A goal's progress is recomputed from the journey history each time it
//! is refreshed, crediting walking with the full baseline saving and
//! transit with a partial one.

use chrono::{DateTime, Days, Utc};
use greenerway_types::{GoalId, JourneyRecord, TransportMode};
use serde::{Deserialize, Serialize};

use crate::config::ProgressConfig;
use crate::error::ProgressError;

/// Length of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDuration {
    /// 7 days.
    Weekly,
    /// 30 days.
    Monthly,
    /// 90 days.
    Quarterly,
}

impl GoalDuration {
    /// Length in days.
    pub const fn days(self) -> u64 {
        match self {
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Quarterly => 90,
        }
    }

    /// Display name.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
        }
    }
}

/// A savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Goal identifier.
    pub id: GoalId,
    /// User-chosen title.
    pub title: String,
    /// kg CO2 to save.
    pub target_kg: f64,
    /// kg CO2 saved so far within the window.
    pub current_kg: f64,
    /// Window start, inclusive.
    pub start: DateTime<Utc>,
    /// Window end, inclusive.
    pub end: DateTime<Utc>,
    /// `current_kg >= target_kg` at the last refresh.
    pub is_completed: bool,
}

impl Goal {
    /// Create a goal whose window starts at `start`.
    pub fn new(
        title: impl Into<String>,
        target_kg: f64,
        duration: GoalDuration,
        start: DateTime<Utc>,
    ) -> Result<Self, ProgressError> {
        if !target_kg.is_finite() || target_kg <= 0.0 {
            return Err(ProgressError::invalid(
                "target_kg",
                format!("must be positive, got {target_kg}"),
            ));
        }
        let end = start
            .checked_add_days(Days::new(duration.days()))
            .ok_or_else(|| ProgressError::invalid("start", "goal window ends out of range"))?;
        Ok(Self {
            id: GoalId::new(),
            title: title.into(),
            target_kg,
            current_kg: 0.0,
            start,
            end,
            is_completed: false,
        })
    }

    /// Saving credited for one journey.
    pub fn saving_for(record: &JourneyRecord, config: &ProgressConfig) -> f64 {
        match record.mode {
            TransportMode::Walking => record.distance_km * config.savings_baseline_kg_per_km,
            TransportMode::Transit => record.distance_km * config.goal_transit_saving_kg_per_km,
            TransportMode::Car => 0.0,
        }
    }

    /// Recompute `current_kg` and `is_completed` from the journeys inside the window.
    pub fn refresh(&mut self, records: &[JourneyRecord], config: &ProgressConfig) {
        self.current_kg = records
            .iter()
            .filter(|r| r.date >= self.start && r.date <= self.end)
            .map(|r| Self::saving_for(r, config))
            .sum();
        self.is_completed = self.current_kg >= self.target_kg;
    }

    /// Fraction of the target reached, capped at 1.
    pub fn progress(&self) -> f64 {
        if self.target_kg <= 0.0 {
            return 1.0;
        }
        (self.current_kg / self.target_kg).clamp(0.0, 1.0)
    }

    /// Whole days until the window ends, never negative.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        self.end.signed_duration_since(now).num_days().max(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use greenerway_types::{JourneyId, UserId};

    use super::*;

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, d, 12, 0, 0).unwrap()
    }

    fn record(d: u32, mode: TransportMode, km: f64) -> JourneyRecord {
        JourneyRecord {
            id: JourneyId::new(),
            user_id: UserId::new("u1"),
            date: at(d),
            distance_km: km,
            emission_kg: 0.0,
            mode,
            duration_min: 0.0,
            ai_applied: false,
        }
    }

    #[test]
    fn durations() {
        assert_eq!(GoalDuration::Weekly.days(), 7);
        assert_eq!(GoalDuration::Monthly.days(), 30);
        assert_eq!(GoalDuration::Quarterly.days(), 90);
    }

    #[test]
    fn window_and_savings() {
        let mut goal = Goal::new("June walks", 2.0, GoalDuration::Weekly, at(1)).unwrap();
        assert_eq!(goal.end, at(8));
        let records = vec![
            record(2, TransportMode::Walking, 5.0),
            record(3, TransportMode::Transit, 10.0),
            record(4, TransportMode::Car, 30.0),
            // Outside the window.
            record(9, TransportMode::Walking, 50.0),
        ];
        goal.refresh(&records, &ProgressConfig::default());
        // 5 * 0.17 + 10 * 0.09
        assert!((goal.current_kg - 1.75).abs() < 1e-9);
        assert!(!goal.is_completed);
        assert!((goal.progress() - 0.875).abs() < 1e-9);

        goal.refresh(
            &[records, vec![record(5, TransportMode::Walking, 2.0)]].concat(),
            &ProgressConfig::default(),
        );
        assert!(goal.is_completed);
        assert!((goal.progress() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_positive_target_is_rejected() {
        assert!(Goal::new("x", 0.0, GoalDuration::Monthly, at(1)).is_err());
        assert!(Goal::new("x", f64::NAN, GoalDuration::Monthly, at(1)).is_err());
    }

    #[test]
    fn days_remaining_floors_at_zero() {
        let goal = Goal::new("x", 1.0, GoalDuration::Weekly, at(1)).unwrap();
        assert_eq!(goal.days_remaining(at(5)), 3);
        assert_eq!(goal.days_remaining(at(20)), 0);
    }
}
