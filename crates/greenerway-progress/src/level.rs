//! Level tiers derived from total points.
//!
//! | Level | Points from | Title           |
//! |-------|-------------|-----------------|
//! | 1     | 0           | Beginner        |
//! | 2     | 200         | Rookie          |
//! | 3     | 500         | Wanderer        |
//! | 4     | 1000        | Explorer        |
//! | 5     | 1500        | Traveller       |
//! | 6     | 2000        | Expert          |
//! | 7     | 2500        | Master          |
//! | 8     | 3000        | Legend          |
//! | 9     | 4000        | Champion        |
//! | 10    | 5000        | Planet Guardian |

use serde::Serialize;

/// Highest level.
pub const MAX_LEVEL: u8 = 10;

/// `(level, first point total of the level, title)`, ascending.
const LEVELS: [(u8, u64, &str); 10] = [
    (1, 0, "Beginner"),
    (2, 200, "Rookie"),
    (3, 500, "Wanderer"),
    (4, 1000, "Explorer"),
    (5, 1500, "Traveller"),
    (6, 2000, "Expert"),
    (7, 2500, "Master"),
    (8, 3000, "Legend"),
    (9, 4000, "Champion"),
    (10, 5000, "Planet Guardian"),
];

fn entry(level: u8) -> (u8, u64, &'static str) {
    LEVELS
        .iter()
        .copied()
        .find(|&(l, _, _)| l == level)
        .unwrap_or((1, 0, "Beginner"))
}

/// Level for a point total, 1 to 10.
pub fn level_for_points(points: u64) -> u8 {
    LEVELS
        .iter()
        .rev()
        .find(|&&(_, from, _)| points >= from)
        .map_or(1, |&(level, _, _)| level)
}

/// Title of a level. Unknown levels read as level 1.
pub fn level_title(level: u8) -> &'static str {
    entry(level).2
}

/// Points at which the level after `level` starts; 5000 at the top level.
pub fn next_level_points(level: u8) -> u64 {
    let next = level.saturating_add(1).min(MAX_LEVEL);
    entry(next).1
}

/// Fraction of the way from the current level's start to the next, in `[0, 1]`.
///
/// Always 1.0 at the top level.
pub fn progress_to_next_level(points: u64) -> f64 {
    let level = level_for_points(points);
    let start = entry(level).1;
    let next = next_level_points(level);
    let span = next.saturating_sub(start);
    if span == 0 {
        return 1.0;
    }
    let into = points.saturating_sub(start).min(span);
    let as_f64 = |v: u64| f64::from(u32::try_from(v).unwrap_or(u32::MAX));
    (as_f64(into) / as_f64(span)).min(1.0)
}

/// Level summary for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    /// Current level.
    pub level: u8,
    /// Title of the current level.
    pub title: &'static str,
    /// Point total.
    pub points: u64,
    /// Points at which the next level starts.
    pub next_level_points: u64,
    /// [`progress_to_next_level`].
    pub progress: f64,
}

impl LevelInfo {
    /// Summarise a point total.
    pub fn for_points(points: u64) -> Self {
        let level = level_for_points(points);
        Self {
            level,
            title: level_title(level),
            points,
            next_level_points: next_level_points(level),
            progress: progress_to_next_level(points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints() {
        let cases = [
            (0, 1),
            (199, 1),
            (200, 2),
            (250, 2),
            (499, 2),
            (500, 3),
            (1000, 4),
            (1500, 5),
            (2000, 6),
            (2500, 7),
            (3000, 8),
            (3999, 8),
            (4000, 9),
            (5000, 10),
            (u64::MAX, 10),
        ];
        for (points, level) in cases {
            assert_eq!(level_for_points(points), level, "{points} points");
        }
    }

    #[test]
    fn titles_and_next_points() {
        assert_eq!(level_title(1), "Beginner");
        assert_eq!(level_title(10), "Planet Guardian");
        assert_eq!(level_title(0), "Beginner");
        assert_eq!(next_level_points(1), 200);
        assert_eq!(next_level_points(8), 4000);
        assert_eq!(next_level_points(9), 5000);
        assert_eq!(next_level_points(10), 5000);
    }

    #[test]
    fn progress_within_level() {
        assert!((progress_to_next_level(350) - 0.5).abs() < 1e-12);
        assert!(progress_to_next_level(0).abs() < 1e-12);
        assert!((progress_to_next_level(5000) - 1.0).abs() < 1e-12);
        assert!((progress_to_next_level(99_999) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn info_for_250_points() {
        let info = LevelInfo::for_points(250);
        assert_eq!(info.level, 2);
        assert_eq!(info.title, "Rookie");
        assert_eq!(info.next_level_points, 500);
    }
}
