//! Audio playback through rodio.
//!
//! The engine keeps two sinks: one for the looping ambient track and one
//! for event sounds. Sounds are decoded straight from their in-memory WAV
//! bytes, so nothing has to touch the filesystem.

use super::encoder::SoundAsset;
use super::AudioError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::Arc;

/// Output device plus the ambient and effect sinks.
pub struct AudioEngine {
    /// Audio output stream (must be kept alive).
    _stream: OutputStream,
    handle: OutputStreamHandle,
    ambient: Option<Sink>,
    effects: Option<Sink>,
}

impl AudioEngine {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::BackendUnavailable`] when no device can be
    /// opened. Callers are expected to carry on without sound.
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendUnavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            ambient: None,
            effects: None,
        })
    }

    fn new_sink(&self, gain: f32) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))?;
        sink.set_volume(gain.clamp(0.0, 1.0));
        Ok(sink)
    }

    fn decoder(asset: &SoundAsset) -> Result<Decoder<Cursor<Arc<[u8]>>>, AudioError> {
        Decoder::new_wav(asset.reader()).map_err(|e| AudioError::Playback(e.to_string()))
    }

    /// Plays `asset` at `gain`, looping it on the ambient sink when its
    /// category loops and as a one-shot effect otherwise.
    pub fn play(&mut self, asset: &SoundAsset, gain: f32) -> Result<(), AudioError> {
        if asset.category().loops() {
            self.play_ambient(asset, gain)
        } else {
            self.play_effect(asset, gain)
        }
    }

    /// Loops `asset` forever at `gain`, replacing any current ambient loop.
    pub fn play_ambient(&mut self, asset: &SoundAsset, gain: f32) -> Result<(), AudioError> {
        if let Some(previous) = self.ambient.take() {
            previous.stop();
        }
        let sink = self.new_sink(gain)?;
        sink.append(Self::decoder(asset)?.repeat_infinite());
        self.ambient = Some(sink);
        Ok(())
    }

    /// Plays `asset` once at `gain`, cutting off the previous effect.
    pub fn play_effect(&mut self, asset: &SoundAsset, gain: f32) -> Result<(), AudioError> {
        if let Some(previous) = self.effects.take() {
            previous.stop();
        }
        let sink = self.new_sink(gain)?;
        sink.append(Self::decoder(asset)?);
        self.effects = Some(sink);
        Ok(())
    }

    /// Stops the ambient loop.
    pub fn stop_ambient(&mut self) {
        if let Some(sink) = self.ambient.take() {
            sink.stop();
        }
    }

    /// Stops everything that is playing.
    pub fn stop_all(&mut self) {
        self.stop_ambient();
        if let Some(sink) = self.effects.take() {
            sink.stop();
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop_all();
    }
}
