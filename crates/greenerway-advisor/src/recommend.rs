//! Rule-based mode recommendation.
//!
//! The recommender works on two soft distance bounds, a walking bound and a
//! transit bound, adjusted by the user profile and the weather. Traffic is
//! only considered when the user is about to drive. The final choice is the
//! first match of:
//!
//! 1. distance within the walking bound and no weather penalty: walking
//! 2. distance within the transit bound, congestion within the transit bound
//!    plus slack, or a per-passenger bus emission below the car's: transit
//! 3. otherwise: car
//!
//! The order is fixed. Every rule that fires appends a line to
//! [`EmissionEstimate::reasons`].

use greenerway_types::{
    EmissionEstimate, HealthStatus, TrafficCondition, TransportMode, TripInput, UserProfile,
    VehicleType, WeatherInfo,
};

use crate::config::AdvisorConfig;
use crate::emission::{self, kg_by_mode};
use crate::error::AdvisorError;
use crate::traffic;

/// Savings below this many kg are not mentioned in the summary.
const SAVINGS_EPSILON_KG: f64 = 0.0001;

/// Stateless recommender configured with an [`AdvisorConfig`].
#[derive(Debug, Clone, Default)]
pub struct EmissionAdvisor {
    config: AdvisorConfig,
}

/// Walking and transit bounds after profile and weather adjustments.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    walk_max_km: f64,
    transit_max_km: f64,
    weather_penalty: bool,
    weather_favourable: bool,
}

impl EmissionAdvisor {
    /// Create an advisor with the given thresholds.
    pub const fn new(config: AdvisorConfig) -> Self {
        Self { config }
    }

    /// The thresholds in use.
    pub const fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Estimate per-mode emissions for a trip and recommend a mode.
    ///
    /// Missing weather, traffic, or profile data skips the corresponding
    /// adjustment. Out-of-range numeric inputs are rejected rather than
    /// clamped.
    pub fn recommend(&self, trip: &TripInput) -> Result<EmissionEstimate, AdvisorError> {
        validate(trip)?;

        let km = trip.distance_km();
        let vehicle = trip
            .profile
            .as_ref()
            .map_or(VehicleType::Unknown, |p| p.vehicle_type);
        let kg = kg_by_mode(km, vehicle);
        let car_kg = emission::estimate_emission(km, TransportMode::Car, vehicle);
        let transit_kg = emission::estimate_emission(km, TransportMode::Transit, vehicle);

        let mut reasons = Vec::new();
        let mut bounds = Bounds {
            walk_max_km: self.config.walk_max_km,
            transit_max_km: self.config.transit_max_km,
            weather_penalty: false,
            weather_favourable: false,
        };
        if let Some(profile) = &trip.profile {
            self.apply_profile(profile, &mut bounds, &mut reasons);
        }
        if let Some(weather) = &trip.weather {
            self.apply_weather(weather, &mut bounds, &mut reasons);
        }
        if bounds.weather_penalty {
            bounds.walk_max_km = bounds.walk_max_km.min(self.config.bad_weather_walk_cap_km);
        }
        if bounds.weather_favourable {
            bounds.walk_max_km += self.config.good_weather_walk_bonus_km;
        }
        bounds.walk_max_km = bounds.walk_max_km.max(self.config.walk_floor_km);

        let traffic = self.traffic_condition(trip, km, &mut reasons);

        let per_passenger_kg = match &trip.bus {
            Some(bus) if trip.mode == TransportMode::Transit && km > 0.0 => {
                Some(emission::transit_per_passenger(km, bus)?.per_passenger_kg)
            }
            _ => None,
        };

        reasons.push(format!("Distance {km:.1} km."));
        reasons.push(per_passenger_kg.map_or_else(
            || {
                format!(
                    "Estimated emissions: walking 0.00 kg, transit {transit_kg:.2} kg, car {car_kg:.2} kg."
                )
            },
            |pax| {
                format!(
                    "Estimated emissions: walking 0.00 kg, bus (per passenger) {pax:.3} kg, \
                     car (total) {car_kg:.2} kg (transit average for comparison: {transit_kg:.2} kg)."
                )
            },
        ));

        let recommended =
            self.decide(km, &bounds, traffic, per_passenger_kg, car_kg, &mut reasons);

        let current_kg = kg.get(&trip.mode).copied().unwrap_or(0.0);
        let recommended_kg = kg.get(&recommended).copied().unwrap_or(0.0);
        let potential_savings_kg = (current_kg - recommended_kg).max(0.0);

        let summary = summarize(
            recommended,
            &bounds,
            traffic,
            per_passenger_kg,
            potential_savings_kg,
        );

        tracing::debug!(
            distance_km = km,
            current = %trip.mode,
            recommended = %recommended,
            walk_max_km = bounds.walk_max_km,
            transit_max_km = bounds.transit_max_km,
            potential_savings_kg,
            "recommendation computed"
        );

        Ok(EmissionEstimate {
            kg_by_mode: kg,
            current_mode: trip.mode,
            recommended_mode: recommended,
            potential_savings_kg,
            reasons,
            summary,
            traffic,
            transit_per_passenger_kg: per_passenger_kg,
        })
    }

    fn apply_profile(&self, profile: &UserProfile, bounds: &mut Bounds, reasons: &mut Vec<String>) {
        let cfg = &self.config;
        if profile.age >= cfg.senior_age {
            bounds.walk_max_km -= cfg.senior_walk_reduction_km;
            reasons.push(format!(
                "At age {}, long walks are recommended less often.",
                profile.age
            ));
        }
        if profile.health_status == HealthStatus::Chronic {
            bounds.walk_max_km -= cfg.chronic_walk_reduction_km;
            reasons.push("Walking limit lowered to account for your health condition.".to_owned());
        }
        if profile.travelling_with_child {
            bounds.walk_max_km -= cfg.child_walk_reduction_km;
            reasons.push("Walking distance shortened because you travel with a child.".to_owned());
        }
        if profile.carbon_sensitivity >= cfg.high_sensitivity {
            bounds.transit_max_km += cfg.high_sensitivity_transit_bonus_km;
            bounds.walk_max_km += cfg.high_sensitivity_walk_bonus_km;
            reasons.push("High carbon sensitivity: low-emission modes prioritised.".to_owned());
        } else if profile.carbon_sensitivity <= cfg.low_sensitivity {
            bounds.transit_max_km -= cfg.low_sensitivity_transit_penalty_km;
            bounds.walk_max_km -= cfg.low_sensitivity_walk_penalty_km;
            reasons.push("Low carbon sensitivity: practicality weighted a bit more.".to_owned());
        }
    }

    fn apply_weather(&self, weather: &WeatherInfo, bounds: &mut Bounds, reasons: &mut Vec<String>) {
        let cfg = &self.config;
        let precipitation = weather.condition.is_precipitation();
        if precipitation {
            bounds.weather_penalty = true;
            reasons.push(format!(
                "Precipitation ({}); long walks are not recommended.",
                weather.condition.label()
            ));
        }
        if weather.wind_speed_ms >= cfg.windy_ms {
            bounds.weather_penalty = true;
            reasons.push(format!(
                "Strong wind ({:.1} m/s); walking is less comfortable.",
                weather.wind_speed_ms
            ));
        }
        let feels = weather.feels_like_c;
        if feels < cfg.cold_feels_like_c {
            bounds.weather_penalty = true;
            reasons.push(format!(
                "Low feels-like temperature ({feels:.1}°C); walking is limited."
            ));
        } else if feels > cfg.hot_feels_like_c {
            bounds.weather_penalty = true;
            reasons.push(format!(
                "Extreme heat ({feels:.1}°C); walking is not recommended."
            ));
        } else if (cfg.mild_min_c..=cfg.mild_max_c).contains(&feels)
            && weather.wind_speed_ms < cfg.calm_wind_ms
            && !precipitation
        {
            bounds.weather_favourable = true;
            reasons.push("The weather is good for walking.".to_owned());
        }
    }

    fn traffic_condition(
        &self,
        trip: &TripInput,
        km: f64,
        reasons: &mut Vec<String>,
    ) -> Option<TrafficCondition> {
        if trip.mode != TransportMode::Car || !(trip.duration_seconds > 0.0 && km > 0.0) {
            return None;
        }
        let speed = trip
            .traffic_avg_speed_kmh
            .or_else(|| traffic::average_speed_kmh(km, trip.duration_seconds))?;
        let condition = traffic::classify_speed(speed, &self.config);
        reasons.push(match condition {
            TrafficCondition::Heavy => format!("Heavy traffic: average speed {speed:.1} km/h."),
            TrafficCondition::Moderate => {
                format!("Moderate traffic: average speed {speed:.1} km/h.")
            }
            TrafficCondition::FreeFlowing => {
                format!("Traffic looks free-flowing: average speed {speed:.1} km/h.")
            }
        });
        Some(condition)
    }

    fn decide(
        &self,
        km: f64,
        bounds: &Bounds,
        traffic: Option<TrafficCondition>,
        per_passenger_kg: Option<f64>,
        car_kg: f64,
        reasons: &mut Vec<String>,
    ) -> TransportMode {
        if km <= bounds.walk_max_km && !bounds.weather_penalty {
            reasons.push("Distance and weather suit walking.".to_owned());
            return TransportMode::Walking;
        }

        let congested = traffic.is_some_and(TrafficCondition::is_congested);
        let traffic_bias =
            congested && km <= bounds.transit_max_km + self.config.traffic_transit_slack_km;
        let mut transit = km <= bounds.transit_max_km || traffic_bias;
        if let Some(pax) = per_passenger_kg
            && pax < car_kg
        {
            transit = true;
            reasons.push(format!(
                "Per-passenger bus emission ({pax:.3} kg) is below the car's total emission."
            ));
        }

        if !transit {
            reasons.push("The distance or conditions make the car more practical.".to_owned());
            return TransportMode::Car;
        }
        reasons.push(
            match traffic {
                Some(TrafficCondition::Heavy) => {
                    "Heavy traffic makes transit more predictable and lower-emission."
                }
                Some(TrafficCondition::Moderate) => {
                    "Traffic is moderate; transit has the emission advantage."
                }
                _ => "Transit is a balanced choice for medium and long distances.",
            }
            .to_owned(),
        );
        TransportMode::Transit
    }
}

fn summarize(
    recommended: TransportMode,
    bounds: &Bounds,
    traffic: Option<TrafficCondition>,
    per_passenger_kg: Option<f64>,
    potential_savings_kg: f64,
) -> String {
    let mut parts: Vec<String> = vec![format!("Recommendation: {}.", recommended.label())];
    match recommended {
        TransportMode::Walking => {
            if bounds.weather_favourable {
                parts.push("The weather supports it.".to_owned());
            }
            parts.push("Zero emission makes it the greenest option for a short trip.".to_owned());
        }
        TransportMode::Transit => {
            if let Some(pax) = per_passenger_kg {
                parts.push(format!(
                    "The entered values give a per-passenger emission advantage ({pax:.3} kg)."
                ));
            } else if traffic == Some(TrafficCondition::Heavy) {
                parts.push(
                    "Traffic is heavy, so transit can be more predictable and lower-emission."
                        .to_owned(),
                );
            } else {
                parts.push("A good balance of emission and comfort at this distance.".to_owned());
            }
        }
        TransportMode::Car => {
            parts.push("The distance is long and the car may save time.".to_owned());
        }
    }
    if potential_savings_kg > SAVINGS_EPSILON_KG {
        parts.push(format!(
            "Your choice could save about {potential_savings_kg:.2} kg CO2."
        ));
    }
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn non_negative(field: &'static str, value: f64) -> Result<(), AdvisorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AdvisorError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ))
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), AdvisorError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AdvisorError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), AdvisorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AdvisorError::invalid(
            field,
            format!("must be within [0, 1], got {value}"),
        ))
    }
}

fn validate(trip: &TripInput) -> Result<(), AdvisorError> {
    non_negative("distance_meters", trip.distance_meters)?;
    non_negative("duration_seconds", trip.duration_seconds)?;
    if let Some(speed) = trip.traffic_avg_speed_kmh {
        non_negative("traffic_avg_speed_kmh", speed)?;
    }
    if let Some(profile) = &trip.profile {
        if profile.age == 0 {
            return Err(AdvisorError::invalid("profile.age", "must be positive"));
        }
        unit_interval("profile.carbon_sensitivity", profile.carbon_sensitivity)?;
    }
    if let Some(weather) = &trip.weather {
        finite("weather.temperature_c", weather.temperature_c)?;
        finite("weather.feels_like_c", weather.feels_like_c)?;
        finite("weather.humidity_pct", weather.humidity_pct)?;
        non_negative("weather.wind_speed_ms", weather.wind_speed_ms)?;
        unit_interval("weather.precip_chance", weather.precip_chance)?;
    }
    if let Some(bus) = &trip.bus
        && !(bus.consumption_per_100km.is_finite() && bus.consumption_per_100km > 0.0)
    {
        return Err(AdvisorError::invalid(
            "bus.consumption_per_100km",
            format!("must be positive, got {}", bus.consumption_per_100km),
        ));
    }
    Ok(())
}
