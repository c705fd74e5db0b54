//! Profile-level badges.
//!
//! These predate the catalog and live on the [`UserProfile`] rather than in
//! [`UserStats`](greenerway_types::UserStats). They award no points.

use greenerway_types::{JourneyRecord, UserProfile, VehicleType};

use greenerway_advisor::emission::vehicle_factor;

/// Awarded for the first walking or transit journey.
pub const FIRST_GREEN_JOURNEY: &str = "firstGreenJourney";

/// Awarded once green journeys have saved 10 kg against an average car.
pub const TEN_KG_SAVINGS: &str = "tenKgSavings";

/// kg CO2 required for [`TEN_KG_SAVINGS`].
pub const TEN_KG_THRESHOLD: f64 = 10.0;

/// Award [`FIRST_GREEN_JOURNEY`] if `journey` is green. Returns whether it was newly added.
pub fn award_first_green_journey(profile: &mut UserProfile, journey: &JourneyRecord) -> bool {
    if !journey.mode.is_green() || profile.earned_badge_ids.contains(FIRST_GREEN_JOURNEY) {
        return false;
    }
    tracing::info!(badge = FIRST_GREEN_JOURNEY, "profile badge earned");
    profile.earned_badge_ids.insert(FIRST_GREEN_JOURNEY.to_owned())
}

/// kg CO2 the user's green journeys saved against the average car.
pub fn green_savings_kg(journeys: &[JourneyRecord]) -> f64 {
    let car_factor = vehicle_factor(VehicleType::Unknown);
    journeys
        .iter()
        .filter(|j| j.mode.is_green())
        .map(|j| (j.distance_km * car_factor - j.emission_kg).max(0.0))
        .sum()
}

/// Award [`TEN_KG_SAVINGS`] once [`green_savings_kg`] reaches 10 kg.
/// Returns whether it was newly added.
pub fn award_ten_kg_savings(profile: &mut UserProfile, journeys: &[JourneyRecord]) -> bool {
    if profile.earned_badge_ids.contains(TEN_KG_SAVINGS) {
        return false;
    }
    let saved = green_savings_kg(journeys);
    if saved < TEN_KG_THRESHOLD {
        return false;
    }
    tracing::info!(badge = TEN_KG_SAVINGS, saved_kg = saved, "profile badge earned");
    profile.earned_badge_ids.insert(TEN_KG_SAVINGS.to_owned())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use greenerway_types::{HealthStatus, JourneyId, TransportMode, UserId};

    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(30, 0.5, HealthStatus::Normal, false, VehicleType::Petrol)
    }

    fn journey(mode: TransportMode, km: f64, kg: f64) -> JourneyRecord {
        JourneyRecord {
            id: JourneyId::new(),
            user_id: UserId::new("u1"),
            date: Utc::now(),
            distance_km: km,
            emission_kg: kg,
            mode,
            duration_min: 10.0,
            ai_applied: false,
        }
    }

    #[test]
    fn first_green_journey_is_idempotent() {
        let mut p = profile();
        assert!(!award_first_green_journey(&mut p, &journey(TransportMode::Car, 3.0, 0.5)));
        assert!(award_first_green_journey(&mut p, &journey(TransportMode::Walking, 1.0, 0.0)));
        assert!(!award_first_green_journey(&mut p, &journey(TransportMode::Transit, 5.0, 0.5)));
        assert_eq!(p.earned_badge_ids.len(), 1);
    }

    #[test]
    fn ten_kg_needs_enough_green_savings() {
        let mut p = profile();
        // 30 km walked = 5.76 kg; car trips do not count.
        let mut journeys = vec![
            journey(TransportMode::Walking, 30.0, 0.0),
            journey(TransportMode::Car, 500.0, 96.0),
        ];
        assert!(!award_ten_kg_savings(&mut p, &journeys));

        // 50 km transit at 0.105: (0.192 - 0.105) * 50 = 4.35 kg, total 10.11.
        journeys.push(journey(TransportMode::Transit, 50.0, 5.25));
        assert!(award_ten_kg_savings(&mut p, &journeys));
        assert!(p.earned_badge_ids.contains(TEN_KG_SAVINGS));
        assert!(!award_ten_kg_savings(&mut p, &journeys));
    }

    #[test]
    fn dirty_transit_contributes_nothing() {
        let journeys = vec![journey(TransportMode::Transit, 1.0, 3.0)];
        assert!(green_savings_kg(&journeys).abs() < 1e-12);
    }
}
