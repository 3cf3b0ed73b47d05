//! Procedural audio: synthesis, encoding and playback.
//!
//! This module builds every sound the game plays from parametric waveforms:
//! - [`synth`] generates and mixes raw sample buffers
//! - [`composer`] turns a [`Tier`](crate::tier::Tier) into ambient and event sounds
//! - [`encoder`] packs samples into 16-bit mono WAV assets
//! - [`bank`] and [`worker`] render a tier's sounds off the main thread
//! - [`engine`] plays assets through rodio

pub mod bank;
pub mod composer;
pub mod encoder;
pub mod engine;
pub mod synth;
pub mod worker;

pub use bank::SoundBank;
pub use composer::{
    synthesize_ambient, synthesize_exit_event, synthesize_hint_event, AMBIENT_LENGTH,
};
pub use encoder::{decode, encode, SoundAsset, SoundCategory};
pub use engine::AudioEngine;
pub use worker::SynthesisWorker;

use std::path::PathBuf;
use thiserror::Error;

/// Sample rate for all synthesized audio (44.1 kHz standard).
pub const SAMPLE_RATE: u32 = 44100;

/// Audio failures. None of these should end a game: the caller logs them
/// and keeps going without sound.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    BackendUnavailable(String),
    #[error("failed to write sound to {}: {source}", .path.display())]
    StorageWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
    #[error("unsupported audio stream: {0}")]
    Decode(String),
    #[error("playback failed: {0}")]
    Playback(String),
}
