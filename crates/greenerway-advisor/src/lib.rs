//! Emission estimation and transport mode recommendation.
//!
//! Everything in this crate is a pure computation over its inputs. Weather,
//! traffic, routing, and profile data arrive already fetched inside a
//! [`TripInput`](greenerway_types::TripInput); missing data skips the
//! matching adjustment.
//!
//! # Modules
//!
//! - [`config`] -- [`AdvisorConfig`] with every threshold of the rule set.
//! - [`emission`] -- Per-mode emission factors and the per-passenger bus model.
//! - [`error`] -- [`AdvisorError`].
//! - [`insights`] -- History series, trends, and the car-trip conversion simulation.
//! - [`recommend`] -- [`EmissionAdvisor`], the rule-based recommender.
//! - [`traffic`] -- Speed classification and traffic severity.

pub mod config;
pub mod emission;
pub mod error;
pub mod insights;
pub mod recommend;
pub mod traffic;

pub use config::AdvisorConfig;
pub use emission::{TransitEmission, estimate_emission, kg_by_mode, transit_per_passenger};
pub use error::AdvisorError;
pub use insights::{ConversionOpportunity, InsightConfig, MonthlyTrend};
pub use recommend::EmissionAdvisor;
pub use traffic::{TrafficReport, TrafficSeverity};
