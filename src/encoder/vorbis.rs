//! Ogg Vorbis frame encoder backed by vorbis_rs (libvorbis bindings)
//!
//! libvorbis writes its output through an `io::Write` sink rather than
//! returning bytes per call, so the encoder writes into a shared in-memory
//! sink that is drained after every call. The drained bytes form that
//! call's compressed chunk, preserving emission order.

use crate::encoder::{EncoderConfig, EncoderFactory, FrameEncoder, FRAME_SIZE};
use crate::error::{Error, Result};
use std::io::Write;
use std::num::{NonZeroU32, NonZeroU8};
use std::sync::{Arc, Mutex};
use tracing::debug;
use vorbis_rs::{VorbisBitrateManagementStrategy, VorbisEncoder, VorbisEncoderBuilder};

/// In-memory sink shared between the libvorbis encoder (writer side) and
/// the wrapper (drain side).
#[derive(Clone, Default)]
struct ChunkSink(Arc<Mutex<Vec<u8>>>);

impl ChunkSink {
    /// Take all bytes written since the previous drain.
    fn drain(&self) -> Vec<u8> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buf)
    }
}

impl Write for ChunkSink {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Encoder lifecycle states
enum State {
    Unconfigured,
    Encoding(Box<VorbisEncoder<ChunkSink>>),
    Finalized,
}

/// Ogg Vorbis implementation of [`FrameEncoder`].
pub struct OggVorbisEncoder {
    state: State,
    sink: ChunkSink,
}

impl OggVorbisEncoder {
    pub fn new() -> Self {
        Self {
            state: State::Unconfigured,
            sink: ChunkSink::default(),
        }
    }
}

impl Default for OggVorbisEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the user-facing VBR quality [-1, 10] to the libvorbis base
/// quality [-0.1, 1.0].
fn vorbis_base_quality(quality: f32) -> f32 {
    (quality / 10.0).clamp(-0.1, 1.0)
}

impl FrameEncoder for OggVorbisEncoder {
    fn configure(&mut self, config: &EncoderConfig) -> Result<()> {
        if !matches!(self.state, State::Unconfigured) {
            return Err(Error::InvalidState(
                "Encoder already configured".to_string(),
            ));
        }

        let sample_rate = NonZeroU32::new(config.sample_rate)
            .ok_or_else(|| Error::Encode("Sample rate must be non-zero".to_string()))?;
        let channels = u8::try_from(config.channels)
            .ok()
            .and_then(NonZeroU8::new)
            .ok_or_else(|| {
                Error::Encode(format!("Unsupported channel count: {}", config.channels))
            })?;

        debug!(
            "Configuring Vorbis encoder: {} ch, {} Hz, quality {}",
            config.channels, config.sample_rate, config.quality
        );

        let encoder = VorbisEncoderBuilder::new(sample_rate, channels, self.sink.clone())
            .map_err(|e| Error::Encode(format!("Failed to create Vorbis encoder: {}", e)))?
            .bitrate_management_strategy(VorbisBitrateManagementStrategy::QualityVbr {
                target_quality: vorbis_base_quality(config.quality),
            })
            .build()
            .map_err(|e| Error::Encode(format!("Failed to initialize Vorbis encoder: {}", e)))?;

        self.state = State::Encoding(Box::new(encoder));
        Ok(())
    }

    fn encode(&mut self, frames: &[&[f32]]) -> Result<Vec<u8>> {
        let encoder = match &mut self.state {
            State::Encoding(encoder) => encoder,
            State::Unconfigured => {
                return Err(Error::InvalidState(
                    "Encode called before configure".to_string(),
                ))
            }
            State::Finalized => {
                return Err(Error::InvalidState(
                    "Encode called after finalize".to_string(),
                ))
            }
        };

        let frame_len = frames.first().map(|ch| ch.len()).unwrap_or(0);
        if frames.iter().any(|ch| ch.len() != frame_len) {
            return Err(Error::Encode(
                "Channel slices have unequal lengths".to_string(),
            ));
        }
        if frame_len > FRAME_SIZE {
            return Err(Error::Encode(format!(
                "Frame of {} samples exceeds the {} sample limit",
                frame_len, FRAME_SIZE
            )));
        }

        encoder
            .encode_audio_block(frames)
            .map_err(|e| Error::Encode(format!("Vorbis encode failed: {}", e)))?;

        Ok(self.sink.drain())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        match std::mem::replace(&mut self.state, State::Finalized) {
            State::Encoding(encoder) => {
                encoder
                    .finish()
                    .map_err(|e| Error::Encode(format!("Vorbis finalize failed: {}", e)))?;
                Ok(self.sink.drain())
            }
            State::Unconfigured => Err(Error::InvalidState(
                "Finalize called before configure".to_string(),
            )),
            State::Finalized => Err(Error::InvalidState(
                "Finalize called twice".to_string(),
            )),
        }
    }
}

/// Factory producing [`OggVorbisEncoder`] instances.
pub struct OggVorbisFactory;

impl EncoderFactory for OggVorbisFactory {
    fn create(&self) -> Result<Box<dyn FrameEncoder>> {
        Ok(Box::new(OggVorbisEncoder::new()))
    }
}
