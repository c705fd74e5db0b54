//! Traffic classification from observed driving times.
//!
//! Two classifications exist. [`classify_speed`] is the coarse three-way
//! split the recommender uses. [`assess`] also accounts for the delay
//! against a free-flow baseline and produces a four-level
//! [`TrafficSeverity`] for display and travel-time adjustment.

use greenerway_types::TrafficCondition;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;

/// Speed assumed for a trip without any congestion, in km/h.
pub const FREE_FLOW_SPEED_KMH: f64 = 50.0;

/// Average speed in km/h, or `None` when either input is not positive.
pub fn average_speed_kmh(distance_km: f64, duration_seconds: f64) -> Option<f64> {
    if !(distance_km > 0.0 && duration_seconds > 0.0) {
        return None;
    }
    let speed = distance_km / (duration_seconds / 3600.0);
    speed.is_finite().then_some(speed)
}

/// Three-way split on average speed against the configured breakpoints.
pub fn classify_speed(speed_kmh: f64, config: &AdvisorConfig) -> TrafficCondition {
    if speed_kmh < config.heavy_traffic_kmh {
        TrafficCondition::Heavy
    } else if speed_kmh < config.moderate_traffic_kmh {
        TrafficCondition::Moderate
    } else {
        TrafficCondition::FreeFlowing
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Four-level traffic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficSeverity {
    /// Flowing, negligible delay.
    Low,
    /// Some slowdowns.
    Moderate,
    /// Dense traffic.
    Heavy,
    /// Stop-and-go.
    Severe,
}

impl TrafficSeverity {
    /// Classify by average speed and delay, first match wins.
    pub fn classify(average_speed_kmh: f64, delay_seconds: f64) -> Self {
        if average_speed_kmh >= 45.0 && delay_seconds < 60.0 {
            Self::Low
        } else if average_speed_kmh >= 30.0 && delay_seconds < 300.0 {
            Self::Moderate
        } else if average_speed_kmh >= 15.0 && delay_seconds < 600.0 {
            Self::Heavy
        } else {
            Self::Severe
        }
    }

    /// Factor applied to a travel time under this severity.
    pub const fn delay_multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Moderate => 1.3,
            Self::Heavy => 1.6,
            Self::Severe => 2.0,
        }
    }

    /// Short advice for the user.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Traffic is flowing. Your trip should be smooth.",
            Self::Moderate => "Moderate traffic. Expect minor delays.",
            Self::Heavy => "Heavy traffic. Consider an alternative route.",
            Self::Severe => {
                "Very heavy traffic! Postpone the trip or take public transit if you can."
            }
        }
    }
}

/// Result of [`assess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficReport {
    /// Severity bucket.
    pub severity: TrafficSeverity,
    /// Observed average speed in km/h.
    pub average_speed_kmh: f64,
    /// Seconds lost against the free-flow baseline, never negative.
    pub delay_seconds: f64,
}

impl TrafficReport {
    /// Delay as a display string.
    pub fn delay_text(&self) -> String {
        let minutes = (self.delay_seconds / 60.0).floor();
        if minutes < 1.0 {
            "No delay".to_owned()
        } else if minutes < 2.0 {
            "~1 min delay".to_owned()
        } else {
            format!("~{minutes:.0} min delay")
        }
    }
}

/// Assess traffic on a driving route from its observed travel time.
///
/// Returns `None` if the distance or duration is not positive.
pub fn assess(distance_km: f64, observed_seconds: f64) -> Option<TrafficReport> {
    let average_speed_kmh = average_speed_kmh(distance_km, observed_seconds)?;
    let free_flow_seconds = distance_km / FREE_FLOW_SPEED_KMH * 3600.0;
    let delay_seconds = (observed_seconds - free_flow_seconds).max(0.0);
    let severity = TrafficSeverity::classify(average_speed_kmh, delay_seconds);

    tracing::debug!(
        distance_km,
        observed_seconds,
        average_speed_kmh,
        delay_seconds,
        ?severity,
        "traffic assessed"
    );

    Some(TrafficReport {
        severity,
        average_speed_kmh,
        delay_seconds,
    })
}

/// Scale a travel time by the severity multiplier. Unchanged without a report.
pub fn adjusted_travel_time(original_seconds: f64, report: Option<&TrafficReport>) -> f64 {
    report.map_or(original_seconds, |r| {
        original_seconds * r.severity.delay_multiplier()
    })
}
