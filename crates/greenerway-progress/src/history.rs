//! Journey history records and filters.

use chrono::{DateTime, Utc};
use greenerway_advisor::emission::estimate_emission;
use greenerway_types::{JourneyId, JourneyRecord, TransportMode, UserId, VehicleType};
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Build a journey record. `emission_kg` is computed here once and never
/// recomputed, even if the user later changes vehicle.
pub fn new_journey(
    user_id: UserId,
    date: DateTime<Utc>,
    distance_km: f64,
    mode: TransportMode,
    vehicle: VehicleType,
    duration_min: f64,
    ai_applied: bool,
) -> Result<JourneyRecord, ProgressError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(ProgressError::invalid(
            "distance_km",
            format!("must be a non-negative number, got {distance_km}"),
        ));
    }
    if !duration_min.is_finite() || duration_min < 0.0 {
        return Err(ProgressError::invalid(
            "duration_min",
            format!("must be a non-negative number, got {duration_min}"),
        ));
    }
    Ok(JourneyRecord {
        id: JourneyId::new(),
        user_id,
        date,
        distance_km,
        emission_kg: estimate_emission(distance_km, mode, vehicle),
        mode,
        duration_min,
        ai_applied,
    })
}

/// History view filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyFilter {
    /// Every journey.
    #[default]
    All,
    /// Walking only.
    Walking,
    /// Car only.
    Car,
    /// Transit only.
    Transit,
}

impl JourneyFilter {
    /// Whether `mode` passes the filter.
    pub const fn matches(self, mode: TransportMode) -> bool {
        match self {
            Self::All => true,
            Self::Walking => matches!(mode, TransportMode::Walking),
            Self::Car => matches!(mode, TransportMode::Car),
            Self::Transit => matches!(mode, TransportMode::Transit),
        }
    }

    /// Matching records, newest first.
    pub fn apply<'a>(self, records: &'a [JourneyRecord]) -> Vec<&'a JourneyRecord> {
        let mut out: Vec<&JourneyRecord> = records.iter().filter(|r| self.matches(r.mode)).collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    /// Total km of matching records.
    pub fn total_distance(self, records: &[JourneyRecord]) -> f64 {
        records
            .iter()
            .filter(|r| self.matches(r.mode))
            .map(|r| r.distance_km)
            .sum()
    }

    /// Total kg CO2 of matching records.
    pub fn total_emission(self, records: &[JourneyRecord]) -> f64 {
        records
            .iter()
            .filter(|r| self.matches(r.mode))
            .map(|r| r.emission_kg)
            .sum()
    }
}
