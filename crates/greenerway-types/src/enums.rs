//! Enumeration types shared by the advisor and the progress tracker.
//!
//! Serialized names match the document fields written by the mobile
//! application (`"walking"`, `"car"`, `"transit"`, `"totalJourneys"`, ...),
//! so records produced by older clients deserialize unchanged.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A way of making a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// On foot. Zero emission.
    Walking,
    /// Private car, emission depends on the vehicle type.
    Car,
    /// Public transit (bus, tram, metro).
    Transit,
}

impl TransportMode {
    /// Every mode, in the order used for per-mode tables.
    pub const ALL: [Self; 3] = [Self::Walking, Self::Car, Self::Transit];

    /// Stable lowercase name, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Car => "car",
            Self::Transit => "transit",
        }
    }

    /// Human-readable label for recommendation text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::Car => "Car",
            Self::Transit => "Public transit",
        }
    }

    /// Whether this mode counts as a low-emission ("green") choice.
    pub const fn is_green(self) -> bool {
        matches!(self, Self::Walking | Self::Transit)
    }
}

impl core::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine type of the user's car.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Petrol (gasoline) engine.
    Petrol,
    /// Diesel engine.
    Diesel,
    /// Petrol/electric hybrid.
    Hybrid,
    /// Battery electric. Counted as zero tailpipe emission.
    Electric,
    /// Motorcycle or scooter.
    Motorcycle,
    /// Not specified by the user. Uses the legacy average car factor.
    #[default]
    Unknown,
}

/// Fuel used by a bus, for the per-passenger transit model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum BusFuel {
    /// Diesel, consumption in litres per 100 km.
    Diesel,
    /// Compressed natural gas, consumption in kg per 100 km.
    Cng,
    /// Battery electric, consumption in kWh per 100 km.
    Electric,
}

/// Kind of bus line, which determines the assumed occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum BusRouteKind {
    /// Urban line.
    City,
    /// Long-distance coach.
    Intercity,
}

/// Coarse traffic condition derived from the average driving speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum TrafficCondition {
    /// Average speed at or above the moderate breakpoint.
    FreeFlowing,
    /// Average speed between the heavy and moderate breakpoints.
    Moderate,
    /// Average speed below the heavy breakpoint.
    Heavy,
}

impl TrafficCondition {
    /// Whether this condition biases the recommendation toward transit.
    pub const fn is_congested(self) -> bool {
        matches!(self, Self::Moderate | Self::Heavy)
    }
}

// ---------------------------------------------------------------------------
// Weather and profile
// ---------------------------------------------------------------------------

/// Sky condition reported by the weather collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    /// No cloud cover worth mentioning.
    Clear,
    /// Overcast or partly cloudy.
    Clouds,
    /// Rain or drizzle.
    Rain,
    /// Snow or sleet.
    Snow,
    /// Provider returned a condition we do not map.
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Whether the condition is falling precipitation.
    pub const fn is_precipitation(self) -> bool {
        matches!(self, Self::Rain | Self::Snow)
    }

    /// Human-readable label for recommendation text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "cloudy",
            Self::Rain => "rainy",
            Self::Snow => "snowy",
            Self::Unknown => "unknown",
        }
    }
}

/// Self-reported health status of the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// No restrictions.
    #[default]
    Normal,
    /// Sensitive (e.g. allergies, asthma). Informational only.
    Sensitive,
    /// Chronic condition. Shortens the comfortable walking distance.
    Chronic,
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

/// Grouping of badges in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    /// Journey counts and distances.
    Journey,
    /// CO2 saved.
    Emission,
    /// Consecutive-day streaks.
    Streak,
    /// Use of a particular mode.
    Mode,
    /// Everything else (recommendation usage).
    Special,
}

impl BadgeCategory {
    /// Every category, in catalog display order.
    pub const ALL: [Self; 5] = [
        Self::Journey,
        Self::Emission,
        Self::Streak,
        Self::Mode,
        Self::Special,
    ];

    /// Display name for the category.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Journey => "Journeys",
            Self::Emission => "Environment",
            Self::Streak => "Streaks",
            Self::Mode => "Transport",
            Self::Special => "Special",
        }
    }
}

/// The [`UserStats`](crate::UserStats) field a badge requirement is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub enum RequirementType {
    /// `total_journeys`.
    TotalJourneys,
    /// `total_emission_saved` (kg CO2).
    TotalEmissionSaved,
    /// `consecutive_days`.
    ConsecutiveDays,
    /// `walking_distance` (km).
    WalkingDistance,
    /// `transit_count`.
    TransitCount,
    /// `ai_recommendation_used`.
    AiRecommendationUsed,
    /// `total_distance` (km).
    TotalDistance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mode_wire_names() {
        for mode in TransportMode::ALL {
            let json = serde_json::to_string(&mode).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }

    #[test]
    fn requirement_type_uses_document_field_names() {
        let json = serde_json::to_string(&RequirementType::AiRecommendationUsed).unwrap_or_default();
        assert_eq!(json, "\"aiRecommendationUsed\"");
        let parsed: Result<RequirementType, _> = serde_json::from_str("\"totalEmissionSaved\"");
        assert_eq!(parsed.ok(), Some(RequirementType::TotalEmissionSaved));
    }

    #[test]
    fn precipitation_conditions() {
        assert!(WeatherCondition::Rain.is_precipitation());
        assert!(WeatherCondition::Snow.is_precipitation());
        assert!(!WeatherCondition::Clouds.is_precipitation());
        assert!(!WeatherCondition::Unknown.is_precipitation());
    }

    #[test]
    fn green_modes() {
        assert!(TransportMode::Walking.is_green());
        assert!(TransportMode::Transit.is_green());
        assert!(!TransportMode::Car.is_green());
    }

    #[test]
    fn vehicle_defaults_to_unknown() {
        assert_eq!(VehicleType::default(), VehicleType::Unknown);
    }
}
