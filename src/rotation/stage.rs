//! Orientation normalization and stage classification
//!
//! The island face turned toward the camera selects a stage that the page
//! uses to pick which info panel to show.

use serde::Serialize;
use std::f64::consts::TAU;

/// Discrete stage derived from the island orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "Option<u8>")]
pub enum Stage {
    /// No window matched
    #[default]
    Unset,
    One,
    Two,
    Three,
    Four,
}

impl Stage {
    /// Numeric index as shown by the page, `None` when unset
    pub fn index(self) -> Option<u8> {
        match self {
            Stage::Unset => None,
            Stage::One => Some(1),
            Stage::Two => Some(2),
            Stage::Three => Some(3),
            Stage::Four => Some(4),
        }
    }
}

impl From<Stage> for Option<u8> {
    fn from(stage: Stage) -> Self {
        stage.index()
    }
}

/// Inclusive angular window mapped to a stage
#[derive(Debug, Clone, Copy)]
pub struct StageRule {
    pub min: f64,
    pub max: f64,
    pub stage: Stage,
}

impl StageRule {
    const fn new(min: f64, max: f64, stage: Stage) -> Self {
        Self { min, max, stage }
    }

    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.min && angle <= self.max
    }
}

/// Stage windows in priority order; the first match wins
pub const STAGE_RULES: [StageRule; 4] = [
    StageRule::new(5.45, 5.85, Stage::Four),
    StageRule::new(0.85, 1.30, Stage::Three),
    StageRule::new(2.40, 2.60, Stage::Two),
    StageRule::new(4.25, 4.75, Stage::One),
];

/// Wrap an angle into `[0, 2π)`
///
/// `%` keeps the sign of the dividend, so the remainder is shifted up by a
/// full turn and wrapped again.
pub fn normalize_angle(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}

/// Classify a normalized angle against [`STAGE_RULES`]
pub fn classify(normalized: f64) -> Stage {
    STAGE_RULES
        .iter()
        .find(|rule| rule.contains(normalized))
        .map_or(Stage::Unset, |rule| rule.stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_angles_select_expected_stage() {
        assert_eq!(classify(5.6), Stage::Four);
        assert_eq!(classify(1.0), Stage::Three);
        assert_eq!(classify(2.5), Stage::Two);
        assert_eq!(classify(4.5), Stage::One);
        assert_eq!(classify(3.0), Stage::Unset);
    }

    #[test]
    fn windows_are_inclusive() {
        assert_eq!(classify(5.45), Stage::Four);
        assert_eq!(classify(5.85), Stage::Four);
        assert_eq!(classify(0.85), Stage::Three);
        assert_eq!(classify(1.30), Stage::Three);
        assert_eq!(classify(4.75), Stage::One);
        assert_eq!(classify(4.7501), Stage::Unset);
    }

    #[test]
    fn classification_is_repeatable() {
        let first = classify(4.5);
        for _ in 0..10 {
            assert_eq!(classify(4.5), first);
        }
    }

    #[test]
    fn normalize_stays_in_range_and_is_idempotent() {
        let samples = [
            0.0, 1.0, -1.0, TAU, -TAU, 7.5, -7.5, 100.0, -100.0, 1e6, -1e6, -1e-18,
        ];
        for angle in samples {
            let once = normalize_angle(angle);
            assert!((0.0..TAU).contains(&once), "{angle} -> {once}");
            assert_eq!(normalize_angle(once), once);
        }
    }

    #[test]
    fn negative_angles_wrap_forward() {
        let normalized = normalize_angle(-1.0);
        assert!((normalized - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(classify(normalize_angle(5.6 - 2.0 * TAU)), Stage::Four);
    }

    #[test]
    fn stage_serializes_as_index_or_null() {
        assert_eq!(serde_json::to_string(&Stage::Three).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Stage::Unset).unwrap(), "null");
    }
}
