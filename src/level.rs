use crate::error::ScaleError;
use serde::Serialize;
use std::fmt;
use std::iter::zip;

/// Display intensity of a day's activity, from 0 (none) to 4 (most)
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Level(u8);

impl Level {
    pub const NONE: Level = Level(0);
    pub const MAX: Level = Level(4);

    /// All levels in ascending order
    pub const ALL: [Level; 5] = [Level(0), Level(1), Level(2), Level(3), Level(4)];

    /// Construct a level from an arbitrary integer, clamping it into `0..=4`
    pub fn clamped(value: i64) -> Level {
        Level::ALL
            .into_iter()
            .rev()
            .find(|lv| i64::from(lv.0) <= value)
            .unwrap_or(Level::NONE)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

/// Monotonic step function mapping a day's count to a [`Level`]
///
/// A count of zero is always level 0.  Any other count gets the number of
/// thresholds it meets or exceeds, with a minimum of 1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LevelScale {
    thresholds: [u64; 4],
}

impl LevelScale {
    /// Counts of 1–3 map to level 1, 4–6 to level 2, 7–9 to level 3, and 10 or
    /// more to level 4.
    pub const DEFAULT_THRESHOLDS: [u64; 4] = [1, 4, 7, 10];

    pub fn new(thresholds: [u64; 4]) -> Result<LevelScale, ScaleError> {
        if thresholds.contains(&0) {
            return Err(ScaleError::ZeroThreshold);
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ScaleError::NotAscending);
        }
        Ok(LevelScale { thresholds })
    }

    pub fn level_for(&self, count: u64) -> Level {
        if count == 0 {
            return Level::NONE;
        }
        // Thresholds ascend, so the last one met decides the level
        zip(self.thresholds, &Level::ALL[1..])
            .rev()
            .find(|&(t, _)| count >= t)
            .map_or(Level(1), |(_, &lv)| lv)
    }
}

impl Default for LevelScale {
    fn default() -> LevelScale {
        LevelScale {
            thresholds: LevelScale::DEFAULT_THRESHOLDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped() {
        assert_eq!(Level::clamped(-1), Level::NONE);
        assert_eq!(Level::clamped(0), Level::NONE);
        assert_eq!(Level::clamped(3).get(), 3);
        assert_eq!(Level::clamped(7), Level::MAX);
        assert_eq!(Level::clamped(i64::MIN), Level::NONE);
        assert_eq!(Level::clamped(i64::MAX), Level::MAX);
    }

    #[test]
    fn test_default_scale() {
        let scale = LevelScale::default();
        let levels = [0, 1, 3, 4, 6, 7, 9, 10, 500].map(|c| scale.level_for(c).get());
        assert_eq!(levels, [0, 1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn test_custom_scale_minimum_level() {
        let scale = LevelScale::new([5, 10, 20, 40]).unwrap();
        assert_eq!(scale.level_for(1).get(), 1);
        assert_eq!(scale.level_for(5).get(), 1);
        assert_eq!(scale.level_for(19).get(), 2);
        assert_eq!(scale.level_for(40).get(), 4);
    }

    #[test]
    fn test_scale_is_monotonic() {
        let scale = LevelScale::new([2, 3, 8, 13]).unwrap();
        let mut prev = Level::NONE;
        for count in 0..50 {
            let level = scale.level_for(count);
            assert!(level >= prev, "level dropped at count {count}");
            prev = level;
        }
    }

    #[test]
    fn test_bad_thresholds() {
        assert_eq!(LevelScale::new([0, 1, 2, 3]), Err(ScaleError::ZeroThreshold));
        assert_eq!(LevelScale::new([1, 4, 4, 9]), Err(ScaleError::NotAscending));
        assert_eq!(LevelScale::new([9, 4, 2, 1]), Err(ScaleError::NotAscending));
    }
}
