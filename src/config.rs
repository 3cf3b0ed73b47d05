//! Game settings and the per-level tuning table.

use crate::maze::WallPolicy;
use std::path::PathBuf;

/// Highest level; advancing past it replays the last level.
pub const MAX_LEVEL: u32 = 10;

/// Reveal radius before the per-level adjustment.
pub const BASE_REVEAL_RADIUS: usize = 3;

/// How long the hint arrow stays up after a hint is requested.
pub const PINGER_SHOW_SECS: f64 = 2.0;

/// How long the "level cleared" overlay is shown before advancing.
pub const LEVEL_CLEARED_SECS: f64 = 3.0;

/// File name of the best-time table inside the home directory.
pub const RECORDS_FILE_NAME: &str = ".maze_dungeon_records.json";

/// Requested maze size per level, index 0 = level 1.
const LEVEL_SIZES: [(usize, usize); MAX_LEVEL as usize] = [
    (31, 21),
    (41, 27),
    (55, 35),
    (65, 45),
    (75, 50),
    (85, 54),
    (95, 56),
    (100, 58),
    (105, 60),
    (110, 62),
];

/// Size used for levels missing from the table.
const FALLBACK_SIZE: (usize, usize) = (33, 21);

/// Clamps a level number into `1..=MAX_LEVEL`.
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(1, MAX_LEVEL)
}

/// Requested (pre-normalization) maze size for `level`.
pub fn level_size(level: u32) -> (usize, usize) {
    level
        .checked_sub(1)
        .and_then(|i| LEVEL_SIZES.get(i as usize))
        .copied()
        .unwrap_or(FALLBACK_SIZE)
}

/// Reveal radius for `level`: generous on level 1, tight afterwards.
pub fn reveal_radius(level: u32) -> usize {
    if level <= 1 {
        BASE_REVEAL_RADIUS + 1
    } else {
        BASE_REVEAL_RADIUS.saturating_sub(1).max(2)
    }
}

/// Default location of the best-time table.
pub fn default_records_path() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(RECORDS_FILE_NAME)
}

/// Options chosen at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Level to begin on.
    pub start_level: u32,
    /// Seed reused for every generated level until the player regenerates.
    pub fixed_seed: Option<u64>,
    /// Skip opening an audio device.
    pub muted: bool,
    /// Connectivity handling of the extra-wall pass.
    pub wall_policy: WallPolicy,
    /// Where best times are stored.
    pub records_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_level: 1,
            fixed_seed: None,
            muted: false,
            wall_policy: WallPolicy::default(),
            records_path: default_records_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_table() {
        assert_eq!(level_size(1), (31, 21));
        assert_eq!(level_size(10), (110, 62));
        assert_eq!(level_size(0), FALLBACK_SIZE);
        assert_eq!(level_size(11), FALLBACK_SIZE);
    }

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(5), 5);
        assert_eq!(clamp_level(42), MAX_LEVEL);
    }

    #[test]
    fn test_reveal_radius() {
        assert_eq!(reveal_radius(1), 4);
        assert_eq!(reveal_radius(2), 2);
        assert_eq!(reveal_radius(10), 2);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.start_level, 1);
        assert_eq!(config.fixed_seed, None);
        assert_eq!(config.wall_policy, WallPolicy::Unchecked);
        assert!(config.records_path.ends_with(RECORDS_FILE_NAME));
    }
}
