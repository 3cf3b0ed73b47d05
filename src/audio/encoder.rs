//! PCM encoding of synthesized sounds.
//!
//! Samples are quantized to 16-bit signed integers and wrapped in a mono
//! RIFF/WAVE container, so any stock audio backend can play the result.

use super::{AudioError, SAMPLE_RATE};
use crate::tier::Tier;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Full-scale value a sample of 1.0 maps to.
pub const MAX_AMPLITUDE: f32 = 32767.0;

/// What a sound is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCategory {
    /// Looping background drone.
    Ambient,
    /// One-shot chirp played when the player asks for a hint.
    Hint,
    /// One-shot fanfare played on reaching the exit.
    Exit,
}

impl SoundCategory {
    pub fn name(self) -> &'static str {
        match self {
            SoundCategory::Ambient => "ambient",
            SoundCategory::Hint => "hint",
            SoundCategory::Exit => "exit",
        }
    }

    /// Whether the host should loop this sound.
    pub fn loops(self) -> bool {
        self == SoundCategory::Ambient
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quantizes one sample, clamping to `[-1, 1]` and truncating toward zero.
pub fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * MAX_AMPLITUDE) as i16
}

/// Encodes samples as a mono 16-bit WAV byte stream.
///
/// # Errors
///
/// Returns [`AudioError::Wav`] if the container cannot be written.
pub fn encode(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            writer.write_sample(quantize(sample))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Decodes a mono 16-bit WAV byte stream back into integer samples and
/// the stream's sample rate.
///
/// # Errors
///
/// Returns [`AudioError::Wav`] for malformed data and
/// [`AudioError::Decode`] when the stream is not mono 16-bit PCM.
pub fn decode(bytes: &[u8]) -> Result<(Vec<i16>, u32), AudioError> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int
    {
        return Err(AudioError::Decode(format!(
            "expected mono 16-bit PCM, got {} channel(s) at {} bits",
            spec.channels, spec.bits_per_sample
        )));
    }
    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok((samples, spec.sample_rate))
}

/// An encoded, immutable sound ready for playback.
///
/// Cloning is cheap: the WAV bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundAsset {
    category: SoundCategory,
    tier: Tier,
    sample_rate: u32,
    frames: usize,
    bytes: Arc<[u8]>,
}

impl SoundAsset {
    /// Encodes `samples` at the default sample rate.
    pub fn from_samples(
        category: SoundCategory,
        tier: Tier,
        samples: &[f32],
    ) -> Result<Self, AudioError> {
        Self::with_sample_rate(category, tier, samples, SAMPLE_RATE)
    }

    pub fn with_sample_rate(
        category: SoundCategory,
        tier: Tier,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Self, AudioError> {
        let bytes = encode(samples, sample_rate)?;
        Ok(Self {
            category,
            tier,
            sample_rate,
            frames: samples.len(),
            bytes: bytes.into(),
        })
    }

    pub fn category(&self) -> SoundCategory {
        self.category
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of mono frames in the stream.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Length of the sound in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / f64::from(self.sample_rate)
    }

    /// The encoded WAV bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A seekable reader over the WAV bytes, for in-memory playback.
    pub fn reader(&self) -> Cursor<Arc<[u8]>> {
        Cursor::new(Arc::clone(&self.bytes))
    }

    /// Suggested file name, e.g. `ambient-tier2.wav`.
    pub fn file_name(&self) -> String {
        format!("{}-tier{}.wav", self.category, self.tier.number())
    }

    /// Writes the asset into `dir` and returns the file path.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::StorageWriteFailure`] if the directory or file
    /// cannot be written. Playback does not depend on this succeeding.
    pub fn persist(&self, dir: impl AsRef<Path>) -> Result<PathBuf, AudioError> {
        let dir = dir.as_ref();
        let path = dir.join(self.file_name());
        fs::create_dir_all(dir)
            .and_then(|_| fs::write(&path, &self.bytes))
            .map_err(|source| AudioError::StorageWriteFailure {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_clamps_and_truncates() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
        assert_eq!(quantize(2.5), 32767);
        assert_eq!(quantize(-7.0), -32767);
        assert_eq!(quantize(0.5), 16383);
    }

    #[test]
    fn test_constant_signal_survives_decode() {
        let samples = vec![0.5f32; 1000];
        let bytes = encode(&samples, SAMPLE_RATE).unwrap();
        let (decoded, rate) = decode(&bytes).unwrap();

        assert_eq!(rate, SAMPLE_RATE);
        assert_eq!(decoded.len(), 1000);
        let expected = 0.5 * MAX_AMPLITUDE;
        assert!(decoded
            .iter()
            .all(|s| (f32::from(*s) - expected).abs() <= 1.0));
    }

    #[test]
    fn test_container_layout() {
        let bytes = encode(&[0.25, -0.25], 44100).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // fmt chunk: PCM, mono, 44100 Hz, 16 bits
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);
        assert_eq!(
            u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            44100
        );
        assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
        // Little-endian payload at the end of the stream
        let n = bytes.len();
        assert_eq!(i16::from_le_bytes([bytes[n - 4], bytes[n - 3]]), 8191);
        assert_eq!(i16::from_le_bytes([bytes[n - 2], bytes[n - 1]]), -8191);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"not a wav file").is_err());
    }

    #[test]
    fn test_asset_metadata() {
        let asset =
            SoundAsset::from_samples(SoundCategory::Hint, Tier::Two, &vec![0.0; 4410]).unwrap();
        assert_eq!(asset.frames(), 4410);
        assert!((asset.duration_secs() - 0.1).abs() < 1e-9);
        assert_eq!(asset.file_name(), "hint-tier2.wav");
        assert!(!asset.category().loops());
        assert!(SoundCategory::Ambient.loops());
    }

    #[test]
    fn test_persist_writes_file() {
        let dir = std::env::temp_dir().join(format!("mazetui-persist-{}", std::process::id()));
        let asset =
            SoundAsset::from_samples(SoundCategory::Exit, Tier::One, &[0.1, 0.2, 0.3]).unwrap();
        let path = asset.persist(&dir).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), asset.bytes());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_persist_reports_unwritable_target() {
        let blocker = std::env::temp_dir().join(format!("mazetui-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let asset =
            SoundAsset::from_samples(SoundCategory::Exit, Tier::One, &[0.1]).unwrap();
        let err = asset.persist(&blocker).unwrap_err();
        assert!(matches!(err, AudioError::StorageWriteFailure { .. }));
        let _ = std::fs::remove_file(&blocker);
    }
}
