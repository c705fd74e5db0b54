//! Emission factors and per-trip CO2 estimates.
//!
//! Factors are kg CO2 per km:
//!
//! | Mode / vehicle | Factor |
//! |----------------|--------|
//! | Walking        | 0.000  |
//! | Transit (avg)  | 0.105  |
//! | Car, petrol    | 0.190  |
//! | Car, diesel    | 0.170  |
//! | Car, hybrid    | 0.110  |
//! | Car, electric  | 0.000  |
//! | Motorcycle     | 0.100  |
//! | Car, unknown   | 0.192  |
//!
//! The flat transit factor is a fleet average. When the user enters the
//! parameters of a specific bus line, [`transit_per_passenger`] computes a
//! per-passenger figure from fuel use and assumed occupancy instead.

use std::collections::BTreeMap;

use greenerway_types::{BusFuel, BusRouteKind, BusTrip, TransportMode, VehicleType};
use serde::Serialize;

use crate::error::AdvisorError;

/// Walking emits nothing.
pub const WALKING_FACTOR: f64 = 0.0;

/// Average car factor, used when the vehicle type is unknown.
pub const AVERAGE_CAR_FACTOR: f64 = 0.192;

/// Average public transit factor per passenger-km.
pub const TRANSIT_FACTOR: f64 = 0.105;

/// Emission factor of a car with the given engine type.
pub const fn vehicle_factor(vehicle: VehicleType) -> f64 {
    match vehicle {
        VehicleType::Petrol => 0.190,
        VehicleType::Diesel => 0.170,
        VehicleType::Hybrid => 0.110,
        VehicleType::Electric => 0.0,
        VehicleType::Motorcycle => 0.100,
        VehicleType::Unknown => AVERAGE_CAR_FACTOR,
    }
}

/// Emission factor of a mode. `vehicle` only matters for [`TransportMode::Car`].
pub const fn mode_factor(mode: TransportMode, vehicle: VehicleType) -> f64 {
    match mode {
        TransportMode::Walking => WALKING_FACTOR,
        TransportMode::Transit => TRANSIT_FACTOR,
        TransportMode::Car => vehicle_factor(vehicle),
    }
}

/// Estimated kg CO2 for travelling `distance_km` by `mode`.
///
/// Total over its domain: negative or non-finite distances count as 0 km.
pub fn estimate_emission(distance_km: f64, mode: TransportMode, vehicle: VehicleType) -> f64 {
    let km = if distance_km.is_finite() { distance_km.max(0.0) } else { 0.0 };
    km * mode_factor(mode, vehicle)
}

/// Estimated kg CO2 for every mode over the same distance.
pub fn kg_by_mode(distance_km: f64, vehicle: VehicleType) -> BTreeMap<TransportMode, f64> {
    TransportMode::ALL
        .iter()
        .map(|&mode| (mode, estimate_emission(distance_km, mode, vehicle)))
        .collect()
}

// ---------------------------------------------------------------------------
// Per-passenger transit model
// ---------------------------------------------------------------------------

/// CO2 emitted per unit of fuel consumed, and the unit label.
pub const fn bus_fuel_factor(fuel: BusFuel) -> (f64, &'static str) {
    match fuel {
        BusFuel::Diesel => (2.68, "L"),
        BusFuel::Cng => (2.75, "kg"),
        BusFuel::Electric => (0.0, "kWh"),
    }
}

/// Occupancy assumed when splitting a bus's emission between passengers.
pub const fn assumed_passengers(kind: BusRouteKind) -> u32 {
    match kind {
        BusRouteKind::City => 30,
        BusRouteKind::Intercity => 40,
    }
}

/// Breakdown of a per-passenger bus emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitEmission {
    /// Route distance in km.
    pub distance_km: f64,
    /// Fuel the bus runs on.
    pub fuel: BusFuel,
    /// Fuel consumed over the route, in `unit`.
    pub total_consumption: f64,
    /// Unit of `total_consumption`.
    pub unit: &'static str,
    /// kg CO2 per unit of fuel.
    pub emission_factor: f64,
    /// kg CO2 emitted by the whole bus.
    pub total_co2_kg: f64,
    /// Assumed number of passengers.
    pub passenger_count: u32,
    /// `total_co2_kg / passenger_count`.
    pub per_passenger_kg: f64,
}

/// Compute the per-passenger emission of a bus trip.
///
/// # Errors
///
/// Returns [`AdvisorError::InvalidInput`] if the distance is negative or
/// non-finite, or the consumption is not a positive finite number.
pub fn transit_per_passenger(
    distance_km: f64,
    bus: &BusTrip,
) -> Result<TransitEmission, AdvisorError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(AdvisorError::invalid(
            "distance_km",
            format!("must be a non-negative number, got {distance_km}"),
        ));
    }
    if !bus.consumption_per_100km.is_finite() || bus.consumption_per_100km <= 0.0 {
        return Err(AdvisorError::invalid(
            "bus.consumption_per_100km",
            format!("must be positive, got {}", bus.consumption_per_100km),
        ));
    }

    let total_consumption = distance_km / 100.0 * bus.consumption_per_100km;
    let (emission_factor, unit) = bus_fuel_factor(bus.fuel);
    let total_co2_kg = total_consumption * emission_factor;
    let passenger_count = assumed_passengers(bus.route_kind);
    let per_passenger_kg = total_co2_kg / f64::from(passenger_count);

    Ok(TransitEmission {
        distance_km,
        fuel: bus.fuel,
        total_consumption,
        unit,
        emission_factor,
        total_co2_kg,
        passenger_count,
        per_passenger_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn walking_is_always_zero() {
        for km in [0.0, 0.4, 3.0, 120.0] {
            for vehicle in [VehicleType::Petrol, VehicleType::Unknown] {
                assert!(estimate_emission(km, TransportMode::Walking, vehicle).abs() < EPS);
            }
        }
    }

    #[test]
    fn electric_car_is_zero() {
        assert!(estimate_emission(42.0, TransportMode::Car, VehicleType::Electric).abs() < EPS);
    }

    #[test]
    fn unknown_car_uses_average_factor() {
        let kg = estimate_emission(10.0, TransportMode::Car, VehicleType::Unknown);
        assert!((kg - 1.92).abs() < EPS);
    }

    #[test]
    fn car_factor_follows_vehicle_type() {
        let cases = [
            (VehicleType::Petrol, 1.90),
            (VehicleType::Diesel, 1.70),
            (VehicleType::Hybrid, 1.10),
            (VehicleType::Motorcycle, 1.00),
        ];
        for (vehicle, expected) in cases {
            let kg = estimate_emission(10.0, TransportMode::Car, vehicle);
            assert!((kg - expected).abs() < EPS, "{vehicle:?}: {kg}");
        }
    }

    #[test]
    fn transit_ignores_vehicle_type() {
        let a = estimate_emission(8.0, TransportMode::Transit, VehicleType::Electric);
        let b = estimate_emission(8.0, TransportMode::Transit, VehicleType::Diesel);
        assert!((a - 0.84).abs() < EPS);
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn negative_and_nan_distance_count_as_zero() {
        assert!(estimate_emission(-5.0, TransportMode::Car, VehicleType::Petrol).abs() < EPS);
        assert!(estimate_emission(f64::NAN, TransportMode::Car, VehicleType::Petrol).abs() < EPS);
    }

    #[test]
    fn kg_by_mode_covers_all_modes() {
        let table = kg_by_mode(5.0, VehicleType::Unknown);
        assert_eq!(table.len(), 3);
        assert!((table.get(&TransportMode::Car).copied().unwrap_or(0.0) - 0.96).abs() < EPS);
        assert!((table.get(&TransportMode::Transit).copied().unwrap_or(0.0) - 0.525).abs() < EPS);
    }

    #[test]
    fn diesel_city_bus_per_passenger() {
        // 10 km at 40 L/100km = 4 L; 4 * 2.68 = 10.72 kg; / 30 = 0.357333 kg
        let bus = BusTrip {
            fuel: BusFuel::Diesel,
            consumption_per_100km: 40.0,
            route_kind: BusRouteKind::City,
        };
        let result = transit_per_passenger(10.0, &bus);
        assert!(result.is_ok());
        if let Ok(r) = result {
            assert!((r.total_consumption - 4.0).abs() < EPS);
            assert!((r.total_co2_kg - 10.72).abs() < EPS);
            assert_eq!(r.passenger_count, 30);
            assert!((r.per_passenger_kg - 10.72 / 30.0).abs() < EPS);
            assert_eq!(r.unit, "L");
        }
    }

    #[test]
    fn electric_bus_is_zero_per_passenger() {
        let bus = BusTrip {
            fuel: BusFuel::Electric,
            consumption_per_100km: 120.0,
            route_kind: BusRouteKind::Intercity,
        };
        let result = transit_per_passenger(50.0, &bus);
        assert!(result.is_ok_and(|r| r.per_passenger_kg.abs() < EPS && r.passenger_count == 40));
    }

    #[test]
    fn zero_consumption_is_rejected() {
        let bus = BusTrip {
            fuel: BusFuel::Cng,
            consumption_per_100km: 0.0,
            route_kind: BusRouteKind::City,
        };
        assert!(matches!(
            transit_per_passenger(5.0, &bus),
            Err(AdvisorError::InvalidInput { field: "bus.consumption_per_100km", .. })
        ));
    }
}
