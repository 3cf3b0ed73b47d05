//! Difficulty tiers.
//!
//! A tier is a coarse band of levels that selects the timbre of the
//! ambient loop and event sounds, plus their playback gains.

use crate::audio::SoundCategory;
use std::fmt;

/// Coarse difficulty band derived from the level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Levels 1-2.
    One,
    /// Levels 3-6.
    Two,
    /// Levels 7 and up.
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// Maps a level number to its tier.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=2 => Tier::One,
            3..=6 => Tier::Two,
            _ => Tier::Three,
        }
    }

    /// The tier as a number in `1..=3`.
    pub fn number(self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }

    /// Playback gain for the looping ambient track.
    pub fn ambient_gain(self) -> f32 {
        match self {
            Tier::One => 0.22,
            Tier::Two => 0.26,
            Tier::Three => 0.36,
        }
    }

    /// Playback gain for the exit fanfare.
    pub fn exit_gain(self) -> f32 {
        match self {
            Tier::One => 0.7,
            Tier::Two => 0.9,
            Tier::Three => 1.0,
        }
    }

    /// Playback gain for the hint chirp.
    pub fn hint_gain(self) -> f32 {
        match self {
            Tier::One => 0.26,
            Tier::Two => 0.5,
            Tier::Three => 0.8,
        }
    }

    /// Playback gain for a sound of `category`.
    pub fn gain(self, category: SoundCategory) -> f32 {
        match category {
            SoundCategory::Ambient => self.ambient_gain(),
            SoundCategory::Hint => self.hint_gain(),
            SoundCategory::Exit => self.exit_gain(),
        }
    }

    /// Seed for this tier's sound bank, derived from a level seed.
    pub fn sound_seed(self, level_seed: u64) -> u64 {
        level_seed.wrapping_add(u64::from(self.number()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_for_level() {
        assert_eq!(Tier::for_level(1), Tier::One);
        assert_eq!(Tier::for_level(2), Tier::One);
        assert_eq!(Tier::for_level(3), Tier::Two);
        assert_eq!(Tier::for_level(6), Tier::Two);
        assert_eq!(Tier::for_level(7), Tier::Three);
        assert_eq!(Tier::for_level(10), Tier::Three);
    }

    #[test]
    fn test_gains_grow_with_tier() {
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].ambient_gain() < pair[1].ambient_gain());
            assert!(pair[0].exit_gain() < pair[1].exit_gain());
            assert!(pair[0].hint_gain() < pair[1].hint_gain());
        }
        assert_eq!(Tier::Three.to_string(), "Tier 3");
    }

    #[test]
    fn test_gain_by_category() {
        for tier in Tier::ALL {
            assert_eq!(tier.gain(SoundCategory::Ambient), tier.ambient_gain());
            assert_eq!(tier.gain(SoundCategory::Hint), tier.hint_gain());
            assert_eq!(tier.gain(SoundCategory::Exit), tier.exit_gain());
        }
    }

    #[test]
    fn test_sound_seed() {
        assert_eq!(Tier::One.sound_seed(41), 42);
        assert_eq!(Tier::Three.sound_seed(u64::MAX), 2);
        assert_ne!(Tier::One.sound_seed(7), Tier::Two.sound_seed(7));
    }
}
