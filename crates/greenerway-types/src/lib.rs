//! Shared type definitions for the `GreenerWay` trip advisor.
//!
//! This crate is the single source of truth for the values that cross
//! crate boundaries: trip inputs, emission estimates, journey records, and
//! per-user statistics. Types flow downstream to `TypeScript` via `ts-rs`
//! for the mobile client.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier wrappers (`UserId`, `JourneyId`, `GoalId`)
//! - [`enums`] -- Modes, weather, profile, traffic, and badge enumerations
//! - [`structs`] -- Trip inputs, estimates, journeys, and stats

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BadgeCategory, BusFuel, BusRouteKind, HealthStatus, RequirementType, TrafficCondition,
    TransportMode, VehicleType, WeatherCondition,
};
pub use ids::{GoalId, JourneyId, UserId};
pub use structs::{
    BusTrip, EmissionEstimate, JourneyRecord, TripInput, UserProfile, UserStats, WeatherInfo,
};
