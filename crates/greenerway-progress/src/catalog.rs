//! The static badge catalog.
//!
//! Twenty badges across five categories. Ids, requirements, and point
//! bonuses are part of the stored user documents and must not change.
//! Evaluation order is declaration order.

use greenerway_types::{BadgeCategory, BadgeCategory as C, RequirementType, RequirementType as R, UserStats};
use serde::Serialize;

/// The stats field and threshold a badge is unlocked at (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// The [`UserStats`] field compared.
    #[serde(rename = "type")]
    pub kind: RequirementType,
    /// Unlock threshold.
    pub threshold: f64,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Stable id stored in `unlocked_badge_ids`.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// What the user has to do.
    pub description: &'static str,
    /// SF Symbol name used by the mobile client.
    pub icon: &'static str,
    /// Grouping.
    pub category: BadgeCategory,
    /// Unlock condition.
    pub requirement: Requirement,
    /// Bonus points awarded once on unlock.
    pub points: u32,
}

#[allow(clippy::too_many_arguments)]
const fn badge(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    category: BadgeCategory,
    kind: RequirementType,
    threshold: f64,
    points: u32,
) -> Badge {
    Badge {
        id,
        title,
        description,
        icon,
        category,
        requirement: Requirement { kind, threshold },
        points,
    }
}

/// Every badge, in evaluation order.
#[rustfmt::skip]
pub static CATALOG: [Badge; 20] = [
    // Journeys
    badge("first_journey", "First Step", "Complete your first journey", "figure.walk", C::Journey, R::TotalJourneys, 1.0, 50),
    badge("journey_10", "Traveller", "Complete 10 journeys", "map.fill", C::Journey, R::TotalJourneys, 10.0, 100),
    badge("journey_50", "Wanderer", "Complete 50 journeys", "globe.europe.africa.fill", C::Journey, R::TotalJourneys, 50.0, 250),
    badge("journey_100", "Explorer", "Complete 100 journeys", "star.fill", C::Journey, R::TotalJourneys, 100.0, 500),
    // CO2 saved
    badge("eco_starter", "Green Start", "Save 1 kg of CO2", "leaf.fill", C::Emission, R::TotalEmissionSaved, 1.0, 50),
    badge("eco_saver", "Eco Friend", "Save 10 kg of CO2", "leaf.circle.fill", C::Emission, R::TotalEmissionSaved, 10.0, 150),
    badge("eco_hero", "Eco Hero", "Save 50 kg of CO2", "tree.fill", C::Emission, R::TotalEmissionSaved, 50.0, 300),
    badge("eco_legend", "Planet Guardian", "Save 100 kg of CO2", "globe.americas.fill", C::Emission, R::TotalEmissionSaved, 100.0, 500),
    // Streaks
    badge("streak_3", "Three-Day Streak", "Travel 3 days in a row", "flame.fill", C::Streak, R::ConsecutiveDays, 3.0, 75),
    badge("streak_7", "Weekly Streak", "Travel 7 days in a row", "flame.circle.fill", C::Streak, R::ConsecutiveDays, 7.0, 150),
    badge("streak_30", "Monthly Streak", "Travel 30 days in a row", "bolt.fill", C::Streak, R::ConsecutiveDays, 30.0, 500),
    // Walking
    badge("walker_5km", "Walker", "Walk 5 km in total", "figure.walk.circle.fill", C::Mode, R::WalkingDistance, 5.0, 100),
    badge("walker_25km", "Walking Master", "Walk 25 km in total", "figure.walk.diamond.fill", C::Mode, R::WalkingDistance, 25.0, 250),
    badge("walker_100km", "Marathon Hero", "Walk 100 km in total", "trophy.fill", C::Mode, R::WalkingDistance, 100.0, 500),
    // Transit
    badge("transit_5", "Transit Friend", "Use public transit 5 times", "bus.fill", C::Mode, R::TransitCount, 5.0, 75),
    badge("transit_25", "Transit Expert", "Use public transit 25 times", "tram.fill", C::Mode, R::TransitCount, 25.0, 200),
    // Recommendations
    badge("ai_user_5", "Smart Choice", "Follow the recommendation 5 times", "brain.fill", C::Special, R::AiRecommendationUsed, 5.0, 100),
    badge("ai_user_25", "Recommendation Expert", "Follow the recommendation 25 times", "cpu.fill", C::Special, R::AiRecommendationUsed, 25.0, 250),
    // Distance
    badge("distance_50", "Road Companion", "Travel 50 km in total", "road.lanes", C::Journey, R::TotalDistance, 50.0, 150),
    badge("distance_250", "Long Hauler", "Travel 250 km in total", "car.rear.road.lane", C::Journey, R::TotalDistance, 250.0, 350),
];

/// Every badge, in evaluation order.
pub fn catalog() -> &'static [Badge] {
    &CATALOG
}

/// Look a badge up by id.
pub fn badge_by_id(id: &str) -> Option<&'static Badge> {
    CATALOG.iter().find(|b| b.id == id)
}

/// Badges of one category, in catalog order.
pub fn badges_in_category(category: BadgeCategory) -> impl Iterator<Item = &'static Badge> {
    CATALOG.iter().filter(move |b| b.category == category)
}

/// Current value of the stats field a requirement refers to.
pub fn current_value(stats: &UserStats, kind: RequirementType) -> f64 {
    match kind {
        RequirementType::TotalJourneys => f64::from(stats.total_journeys),
        RequirementType::TotalEmissionSaved => stats.total_emission_saved,
        RequirementType::ConsecutiveDays => f64::from(stats.consecutive_days),
        RequirementType::WalkingDistance => stats.walking_distance,
        RequirementType::TransitCount => f64::from(stats.transit_count),
        RequirementType::AiRecommendationUsed => f64::from(stats.ai_recommendation_used),
        RequirementType::TotalDistance => stats.total_distance,
    }
}

impl Badge {
    /// Whether `stats` meet the requirement.
    pub fn is_satisfied(&self, stats: &UserStats) -> bool {
        current_value(stats, self.requirement.kind) >= self.requirement.threshold
    }

    /// Fraction of the requirement met, in `[0, 1]`.
    ///
    /// A non-positive threshold counts as met.
    pub fn progress(&self, stats: &UserStats) -> f64 {
        let threshold = self.requirement.threshold;
        if threshold <= 0.0 {
            return 1.0;
        }
        (current_value(stats, self.requirement.kind) / threshold).clamp(0.0, 1.0)
    }
}

/// Unlock state and progress of one badge for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    /// The badge.
    pub badge: &'static Badge,
    /// Whether the id is in `unlocked_badge_ids`.
    pub unlocked: bool,
    /// [`Badge::progress`] for the current stats.
    pub progress: f64,
}

/// Progress of every catalog badge, in catalog order.
pub fn badge_progress(stats: &UserStats) -> Vec<BadgeProgress> {
    CATALOG
        .iter()
        .map(|badge| BadgeProgress {
            badge,
            unlocked: stats.unlocked_badge_ids.contains(badge.id),
            progress: badge.progress(stats),
        })
        .collect()
}

/// Sum of the bonus points of every unlocked catalog badge.
///
/// Ids not in the catalog contribute nothing.
pub fn unlocked_bonus_points(stats: &UserStats) -> u64 {
    stats
        .unlocked_badge_ids
        .iter()
        .filter_map(|id| badge_by_id(id.as_str()))
        .fold(0_u64, |acc, b| acc.saturating_add(u64::from(b.points)))
}
