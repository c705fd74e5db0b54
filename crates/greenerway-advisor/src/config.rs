//! Tunable thresholds for the recommendation heuristics.
//!
//! The [`AdvisorConfig`] struct bundles every constant of the rule set so
//! that callers (engine, tests) can override defaults. The engine builds it
//! from the `advisor` section of `greenerway-config.yaml`; any key left out
//! keeps its default.

use serde::{Deserialize, Serialize};

/// Configuration for [`EmissionAdvisor`](crate::EmissionAdvisor).
///
/// Distances are in km, speeds in km/h, wind in m/s, temperatures in
/// degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Soft upper bound for a walking recommendation (default: 1.8).
    pub walk_max_km: f64,

    /// Soft upper bound for a transit recommendation (default: 15.0).
    pub transit_max_km: f64,

    /// Age at or above which the walking bound is reduced (default: 60).
    pub senior_age: u32,

    /// Walking bound reduction for seniors (default: 0.6).
    pub senior_walk_reduction_km: f64,

    /// Walking bound reduction for a chronic health condition (default: 0.7).
    pub chronic_walk_reduction_km: f64,

    /// Walking bound reduction when travelling with a child (default: 0.5).
    pub child_walk_reduction_km: f64,

    /// Carbon sensitivity at or above which low-emission modes are favoured (default: 0.7).
    pub high_sensitivity: f64,

    /// Transit bound increase for high sensitivity (default: 5.0).
    pub high_sensitivity_transit_bonus_km: f64,

    /// Walking bound increase for high sensitivity (default: 0.2).
    pub high_sensitivity_walk_bonus_km: f64,

    /// Carbon sensitivity at or below which practicality is favoured (default: 0.3).
    pub low_sensitivity: f64,

    /// Transit bound reduction for low sensitivity (default: 2.0).
    pub low_sensitivity_transit_penalty_km: f64,

    /// Walking bound reduction for low sensitivity (default: 0.2).
    pub low_sensitivity_walk_penalty_km: f64,

    /// Wind speed at or above which walking is penalised (default: 10.0).
    pub windy_ms: f64,

    /// Feels-like temperature below which walking is penalised (default: 5.0).
    pub cold_feels_like_c: f64,

    /// Feels-like temperature above which walking is penalised (default: 32.0).
    pub hot_feels_like_c: f64,

    /// Lower end of the comfortable feels-like band, inclusive (default: 10.0).
    pub mild_min_c: f64,

    /// Upper end of the comfortable feels-like band, inclusive (default: 28.0).
    pub mild_max_c: f64,

    /// Wind speed below which the weather counts as calm (default: 8.0).
    pub calm_wind_ms: f64,

    /// Cap on the walking bound under a weather penalty (default: 0.8).
    pub bad_weather_walk_cap_km: f64,

    /// Walking bound increase under favourable weather (default: 0.5).
    pub good_weather_walk_bonus_km: f64,

    /// Floor applied to the final walking bound (default: 0.5).
    pub walk_floor_km: f64,

    /// Average driving speed below which traffic is heavy (default: 15.0).
    pub heavy_traffic_kmh: f64,

    /// Average driving speed below which traffic is moderate (default: 25.0).
    pub moderate_traffic_kmh: f64,

    /// Extra distance beyond the transit bound where congestion still
    /// favours transit (default: 5.0).
    pub traffic_transit_slack_km: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            walk_max_km: 1.8,
            transit_max_km: 15.0,
            senior_age: 60,
            senior_walk_reduction_km: 0.6,
            chronic_walk_reduction_km: 0.7,
            child_walk_reduction_km: 0.5,
            high_sensitivity: 0.7,
            high_sensitivity_transit_bonus_km: 5.0,
            high_sensitivity_walk_bonus_km: 0.2,
            low_sensitivity: 0.3,
            low_sensitivity_transit_penalty_km: 2.0,
            low_sensitivity_walk_penalty_km: 0.2,
            windy_ms: 10.0,
            cold_feels_like_c: 5.0,
            hot_feels_like_c: 32.0,
            mild_min_c: 10.0,
            mild_max_c: 28.0,
            calm_wind_ms: 8.0,
            bad_weather_walk_cap_km: 0.8,
            good_weather_walk_bonus_km: 0.5,
            walk_floor_km: 0.5,
            heavy_traffic_kmh: 15.0,
            moderate_traffic_kmh: 25.0,
            traffic_transit_slack_km: 5.0,
        }
    }
}
