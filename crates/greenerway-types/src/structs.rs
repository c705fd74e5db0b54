//! Core value structs: trip inputs, profile, estimates, journeys, and stats.
//!
//! Field names serialize in camelCase to match the documents written by the
//! mobile clients to the external store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    BusFuel, BusRouteKind, HealthStatus, TrafficCondition, TransportMode, VehicleType,
    WeatherCondition,
};
use crate::ids::{JourneyId, UserId};

// ---------------------------------------------------------------------------
// Trip inputs
// ---------------------------------------------------------------------------

/// Current weather at the trip origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    /// Sky condition.
    pub condition: WeatherCondition,
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Apparent ("feels like") temperature in degrees Celsius.
    pub feels_like_c: f64,
    /// Relative humidity, 0--100.
    pub humidity_pct: f64,
    /// Wind speed in metres per second.
    pub wind_speed_ms: f64,
    /// Probability of precipitation, 0.0--1.0.
    pub precip_chance: f64,
}

/// Travel-relevant attributes of a user.
///
/// Owned by the profile store. The advisor only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age in years. Must be positive.
    pub age: u32,
    /// How much the user cares about emissions, 0.0--1.0.
    pub carbon_sensitivity: f64,
    /// Self-reported health status.
    #[serde(default)]
    pub health_status: HealthStatus,
    /// Whether the user usually travels with a child.
    #[serde(default)]
    pub travelling_with_child: bool,
    /// Engine type of the user's car.
    #[serde(default)]
    pub vehicle_type: VehicleType,
    /// Profile-level badges (separate from the catalog badges in [`UserStats`]).
    #[serde(default)]
    pub earned_badge_ids: BTreeSet<String>,
}

impl UserProfile {
    /// Create a profile with no earned badges.
    pub const fn new(
        age: u32,
        carbon_sensitivity: f64,
        health_status: HealthStatus,
        travelling_with_child: bool,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            age,
            carbon_sensitivity,
            health_status,
            travelling_with_child,
            vehicle_type,
            earned_badge_ids: BTreeSet::new(),
        }
    }
}

/// Parameters of a bus line for the per-passenger transit model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct BusTrip {
    /// Fuel the bus runs on.
    pub fuel: BusFuel,
    /// Consumption per 100 km in the fuel's unit (L, kg, or kWh).
    pub consumption_per_100km: f64,
    /// City or intercity line.
    pub route_kind: BusRouteKind,
}

/// Everything the advisor needs to evaluate one route request.
///
/// Constructed by the caller from the routing, weather, and profile
/// collaborators, consumed once, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    /// Route length in metres.
    pub distance_meters: f64,
    /// Expected travel time in seconds for the current mode.
    pub duration_seconds: f64,
    /// The mode the user currently has selected.
    pub mode: TransportMode,
    /// Weather at the origin, if the provider answered.
    #[serde(default)]
    pub weather: Option<WeatherInfo>,
    /// Live average driving speed, if a traffic provider answered.
    #[serde(default)]
    pub traffic_avg_speed_kmh: Option<f64>,
    /// The user's profile, if loaded.
    #[serde(default)]
    pub profile: Option<UserProfile>,
    /// Bus parameters entered by the user, for the per-passenger model.
    #[serde(default)]
    pub bus: Option<BusTrip>,
}

impl TripInput {
    /// Create a bare trip with no weather, traffic, profile, or bus data.
    pub const fn new(distance_meters: f64, duration_seconds: f64, mode: TransportMode) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            mode,
            weather: None,
            traffic_avg_speed_kmh: None,
            profile: None,
            bus: None,
        }
    }

    /// Route length in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Result of evaluating a [`TripInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct EmissionEstimate {
    /// Estimated kg CO2 for each mode over the route.
    pub kg_by_mode: BTreeMap<TransportMode, f64>,
    /// The mode the user had selected.
    pub current_mode: TransportMode,
    /// The recommended mode.
    pub recommended_mode: TransportMode,
    /// `max(0, kg(current) - kg(recommended))`.
    pub potential_savings_kg: f64,
    /// Ordered trace of every rule that fired.
    pub reasons: Vec<String>,
    /// One-paragraph summary for display.
    pub summary: String,
    /// Traffic condition, when it was evaluated.
    #[serde(default)]
    pub traffic: Option<TrafficCondition>,
    /// Per-passenger bus emission, when bus parameters were supplied.
    #[serde(default)]
    pub transit_per_passenger_kg: Option<f64>,
}

impl EmissionEstimate {
    /// Estimated emission for one mode; 0.0 if the mode is missing.
    pub fn kg_for(&self, mode: TransportMode) -> f64 {
        self.kg_by_mode.get(&mode).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Persisted facts and aggregates
// ---------------------------------------------------------------------------

/// A completed trip as stored in the journey store.
///
/// `emission_kg` is fixed at creation time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct JourneyRecord {
    /// Record identifier.
    pub id: JourneyId,
    /// Owner of the record.
    pub user_id: UserId,
    /// When the journey was completed.
    pub date: DateTime<Utc>,
    /// Distance travelled in km.
    pub distance_km: f64,
    /// Emission in kg CO2 at creation time.
    pub emission_kg: f64,
    /// Mode used.
    pub mode: TransportMode,
    /// Travel time in minutes.
    #[serde(default)]
    pub duration_min: f64,
    /// Whether the user followed the advisor's recommendation.
    #[serde(default)]
    pub ai_applied: bool,
}

/// Lifetime statistics of one user.
///
/// Invariant: `total_journeys == walking_count + transit_count + car_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct UserStats {
    /// Number of recorded journeys.
    pub total_journeys: u32,
    /// Number of walking journeys.
    pub walking_count: u32,
    /// Number of transit journeys.
    pub transit_count: u32,
    /// Number of car journeys.
    pub car_count: u32,
    /// Number of journeys on which the recommendation was followed.
    pub ai_recommendation_used: u32,
    /// Current streak of consecutive calendar days with a journey.
    pub consecutive_days: u32,
    /// Sum of all journey distances in km.
    pub total_distance: f64,
    /// Sum of walking distances in km.
    pub walking_distance: f64,
    /// kg CO2 saved relative to an average car.
    pub total_emission_saved: f64,
    /// Calendar day of the most recent journey.
    pub last_journey_date: Option<NaiveDate>,
    /// Activity points plus bonus points of every unlocked badge.
    pub total_points: u64,
    /// Catalog badges unlocked so far. Never shrinks.
    pub unlocked_badge_ids: BTreeSet<String>,
}

impl UserStats {
    /// Whether the per-mode counters add up to the journey total.
    pub fn counters_consistent(&self) -> bool {
        u64::from(self.walking_count)
            .saturating_add(u64::from(self.transit_count))
            .saturating_add(u64::from(self.car_count))
            == u64::from(self.total_journeys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_distance_in_km() {
        let trip = TripInput::new(2500.0, 600.0, TransportMode::Car);
        assert!((trip.distance_km() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn stats_parse_from_partial_document() {
        let json = r#"{"totalJourneys": 3, "walkingCount": 2, "carCount": 1}"#;
        let stats: Result<UserStats, _> = serde_json::from_str(json);
        assert!(stats.is_ok());
        let stats = stats.unwrap_or_default();
        assert_eq!(stats.total_journeys, 3);
        assert_eq!(stats.consecutive_days, 0);
        assert!(stats.last_journey_date.is_none());
        assert!(stats.counters_consistent());
    }

    #[test]
    fn empty_stats_are_consistent() {
        assert!(UserStats::default().counters_consistent());
    }

    #[test]
    fn profile_defaults_optional_fields() {
        let json = r#"{"age": 30, "carbonSensitivity": 0.5}"#;
        let profile: Result<UserProfile, _> = serde_json::from_str(json);
        assert!(profile.is_ok());
        if let Ok(profile) = profile {
            assert_eq!(profile.health_status, HealthStatus::Normal);
            assert_eq!(profile.vehicle_type, VehicleType::Unknown);
            assert!(!profile.travelling_with_child);
            assert!(profile.earned_badge_ids.is_empty());
        }
    }

    #[test]
    fn estimate_missing_mode_is_zero() {
        let estimate = EmissionEstimate {
            kg_by_mode: BTreeMap::new(),
            current_mode: TransportMode::Car,
            recommended_mode: TransportMode::Walking,
            potential_savings_kg: 0.0,
            reasons: Vec::new(),
            summary: String::new(),
            traffic: None,
            transit_per_passenger_kg: None,
        };
        assert!(estimate.kg_for(TransportMode::Car).abs() < 1e-12);
    }
}
