//! Insights over a user's journey history.
//!
//! All functions bucket journeys by the calendar day in a caller-supplied
//! time zone offset, so a late-evening trip lands on the user's day rather
//! than the UTC day.
//!
//! The conversion simulation uses its own, more conservative thresholds
//! ([`InsightConfig`]) rather than the live recommender's.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, Utc, Weekday};
use greenerway_types::{HealthStatus, JourneyRecord, TransportMode, UserProfile, VehicleType};
use serde::{Deserialize, Serialize};

use crate::emission::{TRANSIT_FACTOR, vehicle_factor};

/// Length of the conversion window, today included.
pub const CONVERSION_WINDOW_DAYS: u64 = 30;

/// Relative month-over-month change, in percent, treated as "similar".
pub const TREND_BAND_PCT: f64 = 5.0;

/// Thresholds for [`conversion_opportunity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Base walking limit in km (default: 1.8).
    pub walk_max_km: f64,
    /// Base transit limit in km (default: 12.0).
    pub transit_max_km: f64,
    /// Age at or above which the walking limit is reduced (default: 60).
    pub senior_age: u32,
    /// Walking reduction for seniors (default: 0.5).
    pub senior_walk_reduction_km: f64,
    /// Walking reduction for a chronic condition (default: 0.7).
    pub chronic_walk_reduction_km: f64,
    /// Walking reduction when travelling with a child (default: 0.5).
    pub child_walk_reduction_km: f64,
    /// High sensitivity threshold (default: 0.7).
    pub high_sensitivity: f64,
    /// Transit increase for high sensitivity (default: 6.0).
    pub high_sensitivity_transit_bonus_km: f64,
    /// Low sensitivity threshold (default: 0.3).
    pub low_sensitivity: f64,
    /// Transit reduction for low sensitivity (default: 2.0).
    pub low_sensitivity_transit_penalty_km: f64,
    /// Floor on the walking limit (default: 0.5).
    pub walk_floor_km: f64,
    /// Floor on the transit limit (default: 6.0).
    pub transit_floor_km: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            walk_max_km: 1.8,
            transit_max_km: 12.0,
            senior_age: 60,
            senior_walk_reduction_km: 0.5,
            chronic_walk_reduction_km: 0.7,
            child_walk_reduction_km: 0.5,
            high_sensitivity: 0.7,
            high_sensitivity_transit_bonus_km: 6.0,
            low_sensitivity: 0.3,
            low_sensitivity_transit_penalty_km: 2.0,
            walk_floor_km: 0.5,
            transit_floor_km: 6.0,
        }
    }
}

impl InsightConfig {
    /// Walking and transit limits for a user, floors applied.
    pub fn limits_for(&self, profile: Option<&UserProfile>) -> (f64, f64) {
        let mut walk = self.walk_max_km;
        let mut transit = self.transit_max_km;
        if let Some(p) = profile {
            if p.age >= self.senior_age {
                walk -= self.senior_walk_reduction_km;
            }
            if p.health_status == HealthStatus::Chronic {
                walk -= self.chronic_walk_reduction_km;
            }
            if p.travelling_with_child {
                walk -= self.child_walk_reduction_km;
            }
            if p.carbon_sensitivity >= self.high_sensitivity {
                transit += self.high_sensitivity_transit_bonus_km;
            }
            if p.carbon_sensitivity <= self.low_sensitivity {
                transit -= self.low_sensitivity_transit_penalty_km;
            }
        }
        (walk.max(self.walk_floor_km), transit.max(self.transit_floor_km))
    }
}

/// Calendar day of an instant at the given offset.
pub fn local_day(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Emission total for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPoint {
    /// The day.
    pub day: NaiveDate,
    /// kg CO2 recorded on that day.
    pub kg: f64,
}

/// Emission total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    /// First day of the month.
    pub month_start: NaiveDate,
    /// kg CO2 recorded in that month.
    pub kg: f64,
}

fn emission_where<F>(records: &[JourneyRecord], mode: TransportMode, keep: F) -> f64
where
    F: Fn(&JourneyRecord) -> bool,
{
    records
        .iter()
        .filter(|r| r.mode == mode && keep(r))
        .map(|r| r.emission_kg)
        .sum()
}

/// Per-day emission of `mode` for the `days` days ending at `end_day`, oldest first.
pub fn daily_series(
    records: &[JourneyRecord],
    mode: TransportMode,
    end_day: NaiveDate,
    days: u32,
    offset: FixedOffset,
) -> Vec<DayPoint> {
    (0..days)
        .rev()
        .filter_map(|back| end_day.checked_sub_days(Days::new(u64::from(back))))
        .map(|day| DayPoint {
            day,
            kg: emission_where(records, mode, |r| local_day(r.date, offset) == day),
        })
        .collect()
}

fn month_start(day: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
}

/// Per-month emission of `mode` for the `months` months ending with the month
/// of `end_day`, oldest first.
pub fn monthly_series(
    records: &[JourneyRecord],
    mode: TransportMode,
    end_day: NaiveDate,
    months: u32,
    offset: FixedOffset,
) -> Vec<MonthPoint> {
    let Some(current) = month_start(end_day) else {
        return Vec::new();
    };
    (0..months)
        .rev()
        .filter_map(|back| {
            let start = current.checked_sub_months(Months::new(back))?;
            let next = start.checked_add_months(Months::new(1))?;
            Some((start, next))
        })
        .map(|(start, next)| MonthPoint {
            month_start: start,
            kg: emission_where(records, mode, |r| {
                let day = local_day(r.date, offset);
                day >= start && day < next
            }),
        })
        .collect()
}

/// Direction of the latest month against the one before.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "direction", content = "percent")]
pub enum MonthlyTrend {
    /// Emission dropped by more than the band (whole percent, rounded down).
    Decreased(f64),
    /// Emission rose by more than the band (whole percent, rounded down).
    Increased(f64),
    /// Within the band.
    Similar,
}

/// Compare the last two points of a monthly series.
///
/// `None` with fewer than two points or when the earlier month is zero.
pub fn monthly_trend(series: &[MonthPoint]) -> Option<MonthlyTrend> {
    let [.., prev, last] = series else {
        return None;
    };
    if prev.kg <= 0.0 {
        return None;
    }
    let change = (last.kg - prev.kg) / prev.kg * 100.0;
    Some(if change < -TREND_BAND_PCT {
        MonthlyTrend::Decreased(change.abs().floor())
    } else if change > TREND_BAND_PCT {
        MonthlyTrend::Increased(change.floor())
    } else {
        MonthlyTrend::Similar
    })
}

/// Weekday with the highest total emission for `mode`.
///
/// Ties go to the earlier weekday, Monday first. `None` when no journey of
/// that mode has a positive emission.
pub fn weekday_peak(
    records: &[JourneyRecord],
    mode: TransportMode,
    offset: FixedOffset,
) -> Option<Weekday> {
    let mut totals = [0.0_f64; 7];
    for record in records.iter().filter(|r| r.mode == mode) {
        let index = local_day(record.date, offset).weekday().num_days_from_monday();
        if let Ok(index) = usize::try_from(index)
            && let Some(slot) = totals.get_mut(index)
        {
            *slot += record.emission_kg;
        }
    }
    let mut best: Option<(Weekday, f64)> = None;
    let mut day = Weekday::Mon;
    for kg in totals {
        if kg > 0.0 && best.is_none_or(|(_, top)| kg > top) {
            best = Some((day, kg));
        }
        day = day.succ();
    }
    best.map(|(weekday, _)| weekday)
}

// ---------------------------------------------------------------------------
// Conversion opportunity
// ---------------------------------------------------------------------------

/// Recent car trips that could have used a greener mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOpportunity {
    /// Walking or transit.
    pub suggested_mode: TransportMode,
    /// Distance limit the suggestion applies to.
    pub limit_km: f64,
    /// Number of car trips in the window within that limit.
    pub affected_trips: u32,
    /// kg CO2 those trips would have saved.
    pub potential_savings_kg: f64,
    /// What was found.
    pub rationale: String,
    /// Rule of thumb for the user.
    pub rule: String,
}

/// Simulate switching the last 30 days of short and medium car trips.
///
/// A car trip within the walking limit counts toward walking, saving the
/// average car emission. Otherwise, within the transit limit, it counts
/// toward transit, saving the difference to the transit factor. The
/// suggestion with the larger total wins; walking wins ties.
pub fn conversion_opportunity(
    records: &[JourneyRecord],
    profile: Option<&UserProfile>,
    today: NaiveDate,
    offset: FixedOffset,
    config: &InsightConfig,
) -> Option<ConversionOpportunity> {
    let (walk_limit, transit_limit) = config.limits_for(profile);
    let window_start = today.checked_sub_days(Days::new(CONVERSION_WINDOW_DAYS.saturating_sub(1)))?;
    let car_factor = vehicle_factor(VehicleType::Unknown);

    let mut walk_trips: u32 = 0;
    let mut walk_savings = 0.0;
    let mut transit_trips: u32 = 0;
    let mut transit_savings = 0.0;

    for record in records.iter().filter(|r| r.mode == TransportMode::Car) {
        let day = local_day(record.date, offset);
        if day < window_start || day > today {
            continue;
        }
        let km = record.distance_km;
        if km <= walk_limit {
            walk_trips = walk_trips.saturating_add(1);
            walk_savings += car_factor * km;
        } else if km <= transit_limit {
            let saved = (car_factor - TRANSIT_FACTOR) * km;
            if saved > 0.0 {
                transit_trips = transit_trips.saturating_add(1);
                transit_savings += saved;
            }
        }
    }

    tracing::debug!(
        walk_limit,
        transit_limit,
        walk_trips,
        walk_savings,
        transit_trips,
        transit_savings,
        "conversion simulated"
    );

    if walk_trips > 0 && walk_savings >= transit_savings {
        Some(ConversionOpportunity {
            suggested_mode: TransportMode::Walking,
            limit_km: walk_limit,
            affected_trips: walk_trips,
            potential_savings_kg: walk_savings,
            rationale: format!(
                "{walk_trips} short car trips (<= {walk_limit:.1} km) in the last 30 days."
            ),
            rule: format!("Prefer walking for trips up to {walk_limit:.1} km."),
        })
    } else if transit_trips > 0 {
        Some(ConversionOpportunity {
            suggested_mode: TransportMode::Transit,
            limit_km: transit_limit,
            affected_trips: transit_trips,
            potential_savings_kg: transit_savings,
            rationale: format!(
                "{transit_trips} medium-distance car trips (<= {transit_limit:.1} km) in the last 30 days."
            ),
            rule: format!("Prefer public transit for trips up to {transit_limit:.1} km."),
        })
    } else {
        None
    }
}
