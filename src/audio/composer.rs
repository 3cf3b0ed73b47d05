//! Tier-specific sound design.
//!
//! Each composer is a pure function of the tier and the random source used
//! for its noise layer. Higher tiers sit lower in pitch, carry more noise
//! and modulate harder.

use super::encoder::{SoundAsset, SoundCategory};
use super::synth::{envelope, exp_decay, held_decay, mix, noise, sample_count, tone, tremolo};
use super::{AudioError, SAMPLE_RATE};
use crate::tier::Tier;
use rand::Rng;

/// Length of the ambient loop in seconds.
pub const AMBIENT_LENGTH: f64 = 8.0;

/// Background drone: two detuned sines over a noise bed, with a slow
/// tremolo from tier 2 up.
pub fn compose_ambient<R: Rng + ?Sized>(tier: Tier, rng: &mut R) -> Vec<f32> {
    let dur = AMBIENT_LENGTH;
    let sr = SAMPLE_RATE;
    match tier {
        Tier::One => mix([
            tone(60.0, dur, 0.18, sr),
            tone(140.0, dur, 0.06, sr),
            noise(dur, 0.02, sr, rng),
        ]),
        Tier::Two => {
            let raw = mix([
                tone(45.0, dur, 0.22, sr),
                tone(110.0, dur, 0.08, sr),
                noise(dur, 0.03, sr, rng),
            ]);
            envelope(raw, tremolo(0.9, 0.1, 0.18, sr))
        }
        Tier::Three => {
            let raw = mix([
                tone(32.0, dur, 0.28, sr),
                tone(90.0, dur, 0.09, sr),
                noise(dur, 0.06, sr, rng),
            ]);
            envelope(raw, tremolo(0.85, 0.15, 0.35, sr))
        }
    }
}

/// Exit fanfare: a loud short onset, a longer sustain and noise under an
/// exponential decay. Tier 3 holds full gain briefly before decaying.
pub fn compose_exit<R: Rng + ?Sized>(tier: Tier, rng: &mut R) -> Vec<f32> {
    let sr = SAMPLE_RATE;
    match tier {
        Tier::One => {
            let core = mix([
                tone(200.0, 0.15, 0.6, sr),
                tone(320.0, 0.6, 0.22, sr),
                noise(0.9, 0.05, sr, rng),
            ]);
            envelope(core, exp_decay(3.0, sr))
        }
        Tier::Two => {
            let core = mix([
                tone(220.0, 0.45, 0.6, sr),
                tone(440.0, 0.7, 0.25, sr),
                noise(0.9, 0.06, sr, rng),
            ]);
            envelope(core, exp_decay(3.0, sr))
        }
        Tier::Three => {
            let t = 1.6;
            let base = mix([
                tone(120.0, t, 0.9, sr),
                tone(60.0, t, 0.6, sr),
                noise(t, 0.35, sr, rng),
            ]);
            envelope(base, held_decay(0.02, 6.0, sample_count(t, sr)))
        }
    }
}

/// Hint chirp: one or two short tones, noisier and lower at higher tiers.
pub fn compose_hint<R: Rng + ?Sized>(tier: Tier, rng: &mut R) -> Vec<f32> {
    let sr = SAMPLE_RATE;
    match tier {
        Tier::One => mix([tone(660.0, 0.12, 0.35, sr), tone(880.0, 0.18, 0.18, sr)]),
        Tier::Two => mix([
            tone(440.0, 0.14, 0.45, sr),
            tone(660.0, 0.16, 0.2, sr),
            noise(0.3, 0.02, sr, rng),
        ]),
        Tier::Three => mix([tone(220.0, 0.25, 0.55, sr), noise(0.6, 0.06, sr, rng)]),
    }
}

/// Composes and encodes the ambient loop for `tier`.
pub fn synthesize_ambient<R: Rng + ?Sized>(
    tier: Tier,
    rng: &mut R,
) -> Result<SoundAsset, AudioError> {
    SoundAsset::from_samples(SoundCategory::Ambient, tier, &compose_ambient(tier, rng))
}

/// Composes and encodes the exit fanfare for `tier`.
pub fn synthesize_exit_event<R: Rng + ?Sized>(
    tier: Tier,
    rng: &mut R,
) -> Result<SoundAsset, AudioError> {
    SoundAsset::from_samples(SoundCategory::Exit, tier, &compose_exit(tier, rng))
}

/// Composes and encodes the hint chirp for `tier`.
pub fn synthesize_hint_event<R: Rng + ?Sized>(
    tier: Tier,
    rng: &mut R,
) -> Result<SoundAsset, AudioError> {
    SoundAsset::from_samples(SoundCategory::Hint, tier, &compose_hint(tier, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::peak;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// Mean absolute amplitude of the noise-only residue is hard to isolate,
    /// so compare how far two renders with different seeds drift apart.
    fn noise_spread(compose: fn(Tier, &mut ChaCha8Rng) -> Vec<f32>, tier: Tier) -> f32 {
        let a = compose(tier, &mut rng(1));
        let b = compose(tier, &mut rng(2));
        a.iter()
            .zip(&b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        for tier in Tier::ALL {
            assert_eq!(
                compose_ambient(tier, &mut rng(9)),
                compose_ambient(tier, &mut rng(9))
            );
            assert_eq!(compose_exit(tier, &mut rng(9)), compose_exit(tier, &mut rng(9)));
            assert_eq!(compose_hint(tier, &mut rng(9)), compose_hint(tier, &mut rng(9)));
        }
    }

    #[test]
    fn test_ambient_is_fixed_loop_length() {
        for tier in Tier::ALL {
            let samples = compose_ambient(tier, &mut rng(0));
            assert_eq!(samples.len(), sample_count(AMBIENT_LENGTH, SAMPLE_RATE));
            assert!(peak(&samples) <= 1.0);
        }
    }

    #[test]
    fn test_ambient_gets_noisier_with_tier() {
        let spreads: Vec<f32> = Tier::ALL
            .iter()
            .map(|&t| noise_spread(compose_ambient, t))
            .collect();
        assert!(spreads[0] < spreads[1]);
        assert!(spreads[1] < spreads[2]);
    }

    #[test]
    fn test_exit_lengths() {
        assert_eq!(
            compose_exit(Tier::One, &mut rng(0)).len(),
            sample_count(0.9, SAMPLE_RATE)
        );
        assert_eq!(
            compose_exit(Tier::Two, &mut rng(0)).len(),
            sample_count(0.9, SAMPLE_RATE)
        );
        assert_eq!(
            compose_exit(Tier::Three, &mut rng(0)).len(),
            sample_count(1.6, SAMPLE_RATE)
        );
    }

    #[test]
    fn test_exit_decays() {
        for tier in Tier::ALL {
            let samples = compose_exit(tier, &mut rng(4));
            let n = samples.len();
            let head = peak(&samples[..n / 10]);
            let tail = peak(&samples[n - n / 10..]);
            assert!(tail < head * 0.5, "{} exit does not decay", tier);
        }
    }

    #[test]
    fn test_tier_three_exit_holds_before_decay() {
        // With a constant signal the held segment passes through untouched
        let total = sample_count(1.6, SAMPLE_RATE);
        let gains = envelope(vec![1.0; total], held_decay(0.02, 6.0, total));
        let hold_end = (total as f64 * 0.02) as usize;
        assert!(gains[..hold_end].iter().all(|g| *g == 1.0));
        assert!(gains[hold_end + 1] < 1.0);
    }

    #[test]
    fn test_hint_is_much_shorter_than_exit() {
        for tier in Tier::ALL {
            let hint = compose_hint(tier, &mut rng(0)).len();
            let exit = compose_exit(tier, &mut rng(0)).len();
            assert!(hint * 3 / 2 <= exit, "{} hint too long", tier);
        }
    }

    #[test]
    fn test_tier_one_hint_is_noise_free() {
        assert_eq!(noise_spread(compose_hint, Tier::One), 0.0);
        assert!(noise_spread(compose_hint, Tier::Three) > 0.0);
    }

    #[test]
    fn test_synthesized_assets_are_tagged() {
        let asset = synthesize_hint_event(Tier::Three, &mut rng(0)).unwrap();
        assert_eq!(asset.category(), SoundCategory::Hint);
        assert_eq!(asset.tier(), Tier::Three);
        assert_eq!(asset.frames(), sample_count(0.6, SAMPLE_RATE));

        let exit = synthesize_exit_event(Tier::One, &mut rng(0)).unwrap();
        assert_eq!(exit.category(), SoundCategory::Exit);
    }
}
