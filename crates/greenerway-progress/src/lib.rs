//! Gamification for `GreenerWay`.
//!
//! Completed journeys are folded into per-user [`UserStats`]: counters,
//! distances, the day streak, CO2 saved against an average car, and a point
//! total. Reaching a catalog threshold unlocks a badge exactly once and adds
//! its bonus points; the point total maps to one of ten levels.
//!
//! # Modules
//!
//! - [`stats`] -- the journey accumulator and point formula
//! - [`catalog`] -- the static badge catalog
//! - [`level`] -- level tiers
//! - [`goals`] -- time-boxed savings goals
//! - [`history`] -- journey record construction and history filters
//! - [`profile_badges`] -- the two badges stored on the profile
//! - [`store`] -- persistence traits and in-memory stores
//! - [`events`] -- unlock and level-change notifications
//! - [`tracker`] -- the per-user serialized service tying it together
//!
//! [`UserStats`]: greenerway_types::UserStats

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod goals;
pub mod history;
pub mod level;
pub mod profile_badges;
pub mod stats;
pub mod store;
pub mod tracker;

pub use catalog::{Badge, BadgeProgress, Requirement, badge_by_id, catalog};
pub use config::{PointWeights, ProgressConfig};
pub use error::ProgressError;
pub use events::{NoOpNotifier, ProgressEvent, ProgressNotifier, TracingNotifier};
pub use goals::{Goal, GoalDuration};
pub use history::{JourneyFilter, new_journey};
pub use level::LevelInfo;
pub use stats::{CompletedJourney, JourneyUpdate, StreakChange, calculate_points, record_journey};
pub use store::{InMemoryJourneyStore, InMemoryStatsStore, JourneyStore, StatsStore};
pub use tracker::{JourneyOutcome, ProgressSummary, ProgressTracker};
