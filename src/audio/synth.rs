//! Waveform primitives.
//!
//! Every generator returns mono `f32` samples nominally in `[-1, 1]`.
//! Randomness is always passed in, so the same generator state yields the
//! same samples bit for bit.

use rand::Rng;
use std::f64::consts::TAU;

/// Number of samples covering `duration` seconds, truncated.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    if duration <= 0.0 {
        return 0;
    }
    (duration * f64::from(sample_rate)) as usize
}

/// A sampled sine wave.
pub fn tone(frequency: f64, duration: f64, amplitude: f32, sample_rate: u32) -> Vec<f32> {
    let rate = f64::from(sample_rate);
    (0..sample_count(duration, sample_rate))
        .map(|i| (TAU * frequency * (i as f64 / rate)).sin() as f32 * amplitude)
        .collect()
}

/// Uniform white noise in `[-amplitude, amplitude]`.
pub fn noise<R: Rng + ?Sized>(
    duration: f64,
    amplitude: f32,
    sample_rate: u32,
    rng: &mut R,
) -> Vec<f32> {
    (0..sample_count(duration, sample_rate))
        .map(|_| rng.gen_range(-1.0f32..=1.0) * amplitude)
        .collect()
}

/// Largest absolute sample value, 0 for an empty signal.
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

/// Sums signals sample by sample, padding shorter ones with silence.
///
/// If the summed peak exceeds 1.0 the whole result is divided by that peak;
/// quieter mixes are returned as-is and never amplified.
pub fn mix<I, S>(signals: I) -> Vec<f32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[f32]>,
{
    let mut out: Vec<f32> = Vec::new();
    for signal in signals {
        let signal = signal.as_ref();
        if signal.len() > out.len() {
            out.resize(signal.len(), 0.0);
        }
        for (acc, s) in out.iter_mut().zip(signal) {
            *acc += s;
        }
    }

    let max = peak(&out);
    if max > 1.0 {
        for s in &mut out {
            *s /= max;
        }
    }
    out
}

/// Multiplies each sample by `curve(index)`.
pub fn envelope<F>(mut signal: Vec<f32>, mut curve: F) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    for (i, s) in signal.iter_mut().enumerate() {
        *s *= curve(i);
    }
    signal
}

/// Slow sinusoidal gain wobble: `base + depth * sin(2π rate t)`.
pub fn tremolo(base: f32, depth: f32, rate_hz: f64, sample_rate: u32) -> impl Fn(usize) -> f32 {
    let rate = f64::from(sample_rate);
    move |i| base + depth * (TAU * rate_hz * (i as f64 / rate)).sin() as f32
}

/// Exponential decay `exp(-k t)` over wall-clock time.
pub fn exp_decay(k: f64, sample_rate: u32) -> impl Fn(usize) -> f32 {
    let rate = f64::from(sample_rate);
    move |i| (-k * (i as f64 / rate)).exp() as f32
}

/// Flat at 1.0 for the first `hold` fraction of `total` samples, then
/// `exp(-k * i / total)`.
pub fn held_decay(hold: f64, k: f64, total: usize) -> impl Fn(usize) -> f32 {
    let total = total.max(1) as f64;
    move |i| {
        let progress = i as f64 / total;
        if progress < hold {
            1.0
        } else {
            (-k * progress).exp() as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const RATE: u32 = 44100;

    #[test]
    fn test_tone_length_and_shape() {
        let samples = tone(441.0, 0.5, 0.3, RATE);
        assert_eq!(samples.len(), 22050);
        assert_eq!(samples[0], 0.0);
        // A quarter period of 441 Hz is exactly 25 samples
        assert!((samples[25] - 0.3).abs() < 1e-4);
        assert!(peak(&samples) <= 0.3 + 1e-6);
    }

    #[test]
    fn test_noise_bounds_and_determinism() {
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        let first = noise(0.1, 0.2, RATE, &mut a);
        let second = noise(0.1, 0.2, RATE, &mut b);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4410);
        assert!(first.iter().all(|s| s.abs() <= 0.2));
    }

    #[test]
    fn test_mix_empty_is_silent() {
        let signals: Vec<Vec<f32>> = Vec::new();
        assert!(mix(signals).is_empty());
    }

    #[test]
    fn test_mix_single_quiet_signal_unchanged() {
        let signal = vec![0.1, -0.5, 0.9, 1.0];
        assert_eq!(mix([signal.clone()]), signal);
    }

    #[test]
    fn test_mix_normalizes_loud_sum() {
        let a = vec![1.0, 0.5, -0.25];
        let b = vec![1.0, 0.5];
        let out = mix([a, b]);
        assert_eq!(out.len(), 3);
        assert_eq!(peak(&out), 1.0);
        assert_eq!(out, vec![1.0, 0.5, -0.125]);
    }

    #[test]
    fn test_mix_pads_shorter_signals() {
        let out = mix([vec![0.1f32; 2], vec![0.2f32; 4]]);
        assert_eq!(out.len(), 4);
        assert!((out[0] - 0.3).abs() < 1e-6);
        assert!((out[3] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_envelopes() {
        let flat = vec![1.0f32; 100];
        let decayed = envelope(flat.clone(), exp_decay(3.0, 100));
        assert_eq!(decayed[0], 1.0);
        assert!(decayed.windows(2).all(|w| w[1] < w[0]));

        let held = envelope(flat.clone(), held_decay(0.02, 6.0, 100));
        assert_eq!(held[0], 1.0);
        assert_eq!(held[1], 1.0);
        assert!(held[2] < 1.0);

        let wobble = envelope(flat, tremolo(0.9, 0.1, 1.0, 100));
        assert!(wobble.iter().all(|g| (0.8 - 1e-6..=1.0 + 1e-6).contains(g)));
    }
}
