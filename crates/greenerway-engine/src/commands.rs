//! Subcommand implementations.
//!
//! Each command reads its JSON inputs, runs the library operation, and
//! returns a serializable report. `main` prints it.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use greenerway_advisor::insights::{self, ConversionOpportunity, MonthlyTrend};
use greenerway_advisor::EmissionAdvisor;
use greenerway_progress::{
    JourneyFilter, JourneyOutcome, ProgressSummary, ProgressTracker, TracingNotifier, new_journey,
};
use greenerway_types::{
    EmissionEstimate, JourneyId, JourneyRecord, TransportMode, TripInput, UserId, UserProfile,
    VehicleType,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::error::EngineError;
use crate::store::{JsonJourneyStore, JsonStatsStore};

/// Months compared by the car trend.
const TREND_MONTHS: u32 = 2;

/// The tracker over the JSON-file stores.
pub type FileTracker = ProgressTracker<JsonStatsStore, JsonJourneyStore>;

/// Build the tracker for the configured data directory.
pub fn tracker(config: &AppConfig) -> FileTracker {
    ProgressTracker::with_notifier(
        JsonStatsStore::new(config.storage.stats_path()),
        JsonJourneyStore::new(config.storage.journeys_path()),
        config.progress.clone(),
        Arc::new(TracingNotifier),
    )
}

async fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| EngineError::Input {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&contents)?)
}

// ---------------------------------------------------------------------------
// recommend
// ---------------------------------------------------------------------------

/// Evaluate the trip in `trip_path`.
pub async fn recommend(config: &AppConfig, trip_path: &Path) -> Result<EmissionEstimate, EngineError> {
    let trip: TripInput = read_input(trip_path).await?;
    let advisor = EmissionAdvisor::new(config.advisor.clone());
    let estimate = advisor.recommend(&trip)?;
    info!(
        current = %estimate.current_mode,
        recommended = %estimate.recommended_mode,
        savings_kg = estimate.potential_savings_kg,
        "Recommendation made"
    );
    Ok(estimate)
}

// ---------------------------------------------------------------------------
// record
// ---------------------------------------------------------------------------

/// A completed journey as entered by the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyInput {
    /// Distance in km.
    pub distance_km: f64,
    /// Mode used.
    pub mode: TransportMode,
    /// Engine type, for the car emission factor.
    #[serde(default)]
    pub vehicle_type: VehicleType,
    /// Travel time in minutes.
    #[serde(default)]
    pub duration_min: f64,
    /// Whether the recommendation was followed.
    #[serde(default)]
    pub ai_applied: bool,
    /// Completion time; now when absent.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl JourneyInput {
    /// Build the stored record for `user`.
    pub fn into_record(self, user: UserId, now: DateTime<Utc>) -> Result<JourneyRecord, EngineError> {
        Ok(new_journey(
            user,
            self.date.unwrap_or(now),
            self.distance_km,
            self.mode,
            self.vehicle_type,
            self.duration_min,
            self.ai_applied,
        )?)
    }
}

/// Record the journey in `journey_path` for `user`.
pub async fn record(
    tracker: &FileTracker,
    user: UserId,
    journey_path: &Path,
) -> Result<JourneyOutcome, EngineError> {
    let input: JourneyInput = read_input(journey_path).await?;
    let journey = input.into_record(user, Utc::now())?;
    Ok(tracker.record(journey).await?)
}

// ---------------------------------------------------------------------------
// progress / history / delete
// ---------------------------------------------------------------------------

/// Stats, level, and badge progress of `user`.
pub async fn progress(tracker: &FileTracker, user: &UserId) -> Result<ProgressSummary, EngineError> {
    Ok(tracker.progress(user).await?)
}

/// Journeys of `user` matching `filter`, newest first.
pub async fn history(
    tracker: &FileTracker,
    user: &UserId,
    filter: JourneyFilter,
) -> Result<Vec<JourneyRecord>, EngineError> {
    Ok(tracker.history(user, filter).await?)
}

/// Delete one journey of `user`.
pub async fn delete(
    tracker: &FileTracker,
    user: &UserId,
    id: JourneyId,
) -> Result<JourneyRecord, EngineError> {
    Ok(tracker.delete_journey(user, id).await?)
}

// ---------------------------------------------------------------------------
// insights
// ---------------------------------------------------------------------------

/// History insights for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    /// Car trips of the last 30 days that a greener mode could have replaced.
    pub conversion: Option<ConversionOpportunity>,
    /// Car emission this month against last month.
    pub car_trend: Option<MonthlyTrend>,
    /// Weekday with the most car emission.
    pub car_peak_weekday: Option<String>,
}

/// Insights over the recorded history of `user`.
pub async fn insights(
    tracker: &FileTracker,
    config: &AppConfig,
    user: &UserId,
    profile_path: Option<&Path>,
) -> Result<InsightsReport, EngineError> {
    let profile: Option<UserProfile> = match profile_path {
        Some(path) => Some(read_input(path).await?),
        None => None,
    };
    let records = tracker.history(user, JourneyFilter::All).await?;
    let offset = config.progress.offset()?;
    Ok(build_insights(
        &records,
        profile.as_ref(),
        Utc::now(),
        offset,
        &config.insights,
    ))
}

fn build_insights(
    records: &[JourneyRecord],
    profile: Option<&UserProfile>,
    now: DateTime<Utc>,
    offset: chrono::FixedOffset,
    config: &insights::InsightConfig,
) -> InsightsReport {
    let today = insights::local_day(now, offset);
    let monthly = insights::monthly_series(records, TransportMode::Car, today, TREND_MONTHS, offset);
    InsightsReport {
        conversion: insights::conversion_opportunity(records, profile, today, offset, config),
        car_trend: insights::monthly_trend(&monthly),
        car_peak_weekday: insights::weekday_peak(records, TransportMode::Car, offset)
            .map(|day| day.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::config::StorageConfig;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            storage: StorageConfig {
                data_dir: dir.to_path_buf(),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn journey_input_defaults() {
        let input: JourneyInput =
            serde_json::from_str(r#"{"distanceKm": 3.0, "mode": "car"}"#).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 8, 0, 0).unwrap();
        let record = input.into_record(UserId::new("u1"), now).unwrap();
        assert_eq!(record.date, now);
        assert!(!record.ai_applied);
        // Unknown vehicle: 3 km * 0.192
        assert!((record.emission_kg - 0.576).abs() < 1e-9);
    }

    #[test]
    fn negative_distance_is_rejected() {
        let input: JourneyInput =
            serde_json::from_str(r#"{"distanceKm": -1.0, "mode": "walking"}"#).unwrap();
        let result = input.into_record(UserId::new("u1"), Utc::now());
        assert!(matches!(result, Err(EngineError::Progress { .. })));
    }

    #[tokio::test]
    async fn record_then_progress_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let journey_path = dir.path().join("walk.json");
        std::fs::write(&journey_path, r#"{"distanceKm": 2.0, "mode": "walking", "aiApplied": true}"#)
            .unwrap();

        let t = tracker(&config);
        let user = UserId::new("u1");
        let outcome = record(&t, user.clone(), &journey_path).await.unwrap();
        assert_eq!(outcome.stats.ai_recommendation_used, 1);
        assert!(config.storage.stats_path().exists());
        assert!(config.storage.journeys_path().exists());

        let summary = progress(&tracker(&config), &user).await.unwrap();
        assert_eq!(summary.stats, outcome.stats);
        assert!(summary.badges.iter().any(|b| b.unlocked && b.badge.id == "first_journey"));

        let listed = history(&t, &user, JourneyFilter::Walking).await.unwrap();
        assert_eq!(listed.len(), 1);
        delete(&t, &user, outcome.journey.id).await.unwrap();
        assert!(history(&t, &user, JourneyFilter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_input_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let result = recommend(&config, &dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(EngineError::Input { .. })));
    }

    #[tokio::test]
    async fn recommend_reads_trip_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let trip_path = dir.path().join("trip.json");
        std::fs::write(
            &trip_path,
            r#"{"distanceMeters": 400.0, "durationSeconds": 120.0, "mode": "car"}"#,
        )
        .unwrap();
        let estimate = recommend(&config, &trip_path).await.unwrap();
        assert_eq!(estimate.recommended_mode, TransportMode::Walking);
    }

    #[test]
    fn insights_over_short_car_trips() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap();
        let records: Vec<JourneyRecord> = (10..14)
            .map(|d| {
                new_journey(
                    UserId::new("u1"),
                    Utc.with_ymd_and_hms(2026, 5, d, 8, 0, 0).unwrap(),
                    1.0,
                    TransportMode::Car,
                    VehicleType::Unknown,
                    5.0,
                    false,
                )
                .unwrap()
            })
            .collect();
        let report = build_insights(&records, None, now, utc, &insights::InsightConfig::default());
        let conversion = report.conversion.unwrap();
        assert_eq!(conversion.suggested_mode, TransportMode::Walking);
        assert_eq!(conversion.affected_trips, 4);
        // All car emission is in May; April was zero.
        assert!(report.car_trend.is_none());
        assert!(report.car_peak_weekday.is_some());
    }
}
