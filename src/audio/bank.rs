//! Per-tier sound sets.

use super::composer::{synthesize_ambient, synthesize_exit_event, synthesize_hint_event};
use super::encoder::{SoundAsset, SoundCategory};
use super::AudioError;
use crate::tier::Tier;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

/// The ambient loop and both event sounds for one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBank {
    tier: Tier,
    ambient: SoundAsset,
    hint: SoundAsset,
    exit: SoundAsset,
}

impl SoundBank {
    /// Renders all three sounds for `tier`.
    ///
    /// Each sound gets its own RNG seeded from a stream derived from
    /// `seed`, so the three renders run in parallel and the result is
    /// still identical for the same `(tier, seed)`.
    pub fn synthesize(tier: Tier, seed: u64) -> Result<Self, AudioError> {
        let mut master = ChaCha8Rng::seed_from_u64(seed);
        let ambient_seed: u64 = master.gen();
        let hint_seed: u64 = master.gen();
        let exit_seed: u64 = master.gen();

        let (ambient, (hint, exit)) = rayon::join(
            || synthesize_ambient(tier, &mut ChaCha8Rng::seed_from_u64(ambient_seed)),
            || {
                rayon::join(
                    || synthesize_hint_event(tier, &mut ChaCha8Rng::seed_from_u64(hint_seed)),
                    || synthesize_exit_event(tier, &mut ChaCha8Rng::seed_from_u64(exit_seed)),
                )
            },
        );

        Ok(Self {
            tier,
            ambient: ambient?,
            hint: hint?,
            exit: exit?,
        })
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn ambient(&self) -> &SoundAsset {
        &self.ambient
    }

    pub fn hint(&self) -> &SoundAsset {
        &self.hint
    }

    pub fn exit(&self) -> &SoundAsset {
        &self.exit
    }

    pub fn get(&self, category: SoundCategory) -> &SoundAsset {
        match category {
            SoundCategory::Ambient => &self.ambient,
            SoundCategory::Hint => &self.hint,
            SoundCategory::Exit => &self.exit,
        }
    }

    /// Writes all three sounds into `dir` and returns the written paths.
    pub fn persist(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, AudioError> {
        [&self.ambient, &self.hint, &self.exit]
            .into_iter()
            .map(|asset| asset.persist(dir.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_is_reproducible() {
        let a = SoundBank::synthesize(Tier::Two, 77).unwrap();
        let b = SoundBank::synthesize(Tier::Two, 77).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tier(), Tier::Two);
    }

    #[test]
    fn test_bank_categories() {
        let bank = SoundBank::synthesize(Tier::One, 1).unwrap();
        for category in [SoundCategory::Ambient, SoundCategory::Hint, SoundCategory::Exit] {
            assert_eq!(bank.get(category).category(), category);
            assert_eq!(bank.get(category).tier(), Tier::One);
            // Only the ambient track is played on the looping sink
            assert_eq!(bank.get(category).category().loops(), category == SoundCategory::Ambient);
        }
        assert!(bank.ambient().duration_secs() > bank.exit().duration_secs());
        assert!(bank.exit().duration_secs() > bank.hint().duration_secs());
    }

    #[test]
    fn test_different_seeds_change_noise() {
        let a = SoundBank::synthesize(Tier::Three, 1).unwrap();
        let b = SoundBank::synthesize(Tier::Three, 2).unwrap();
        assert_ne!(a.ambient().bytes(), b.ambient().bytes());
    }

    #[test]
    fn test_persist_writes_every_category() {
        let dir = std::env::temp_dir().join(format!("mazetui-bank-{}", std::process::id()));
        let bank = SoundBank::synthesize(Tier::One, 3).unwrap();
        let paths = bank.persist(&dir).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("ambient-tier1.wav"));
        for path in &paths {
            let bytes = std::fs::read(path).unwrap();
            assert_eq!(&bytes[0..4], b"RIFF");
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
