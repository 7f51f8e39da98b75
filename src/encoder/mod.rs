//! Frame encoder contract
//!
//! The pipeline drives any bitstream encoder through the [`FrameEncoder`]
//! trait: configure once, feed fixed-size per-channel PCM frames, finalize
//! exactly once to flush trailing data. Encoders are instantiated through
//! an [`EncoderFactory`], so the pipeline can detect a missing encoder as
//! a static precondition and tests can substitute recording fakes.

pub mod vorbis;

use crate::audio::PcmBuffer;
use crate::error::Result;

/// Fixed frame size fed to the encoder (samples per channel per call)
pub const FRAME_SIZE: usize = 4096;

/// Lowest accepted VBR quality
pub const MIN_QUALITY: f32 = -1.0;

/// Highest accepted VBR quality
pub const MAX_QUALITY: f32 = 10.0;

/// VBR quality used when the request does not specify one
pub const DEFAULT_QUALITY: f32 = 3.0;

/// Clamp a requested VBR quality into the supported range.
pub fn clamp_quality(quality: f32) -> f32 {
    quality.clamp(MIN_QUALITY, MAX_QUALITY)
}

/// One-time encoder setup parameters.
///
/// Constructed from the buffer actually fed to the encoder, never from the
/// original request, so a channel/rate mismatch between configuration and
/// PCM data is impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConfig {
    /// Number of channels
    pub channels: u16,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// VBR quality in [-1.0, 10.0]
    pub quality: f32,
}

impl EncoderConfig {
    /// Derive the configuration from the PCM buffer that will be encoded.
    pub fn for_buffer(buffer: &PcmBuffer, quality: f32) -> Self {
        Self {
            channels: buffer.channel_count(),
            sample_rate: buffer.sample_rate(),
            quality: clamp_quality(quality),
        }
    }
}

/// A frame-at-a-time bitstream encoder.
///
/// State machine: Unconfigured → Configured → Encoding (repeatable) →
/// Finalized. `configure` must be called exactly once before the first
/// `encode`; `finalize` exactly once after the last. Any other transition
/// fails with `Error::InvalidState`.
pub trait FrameEncoder {
    /// One-time setup. Must be called before any `encode` call.
    fn configure(&mut self, config: &EncoderConfig) -> Result<()>;

    /// Encode one frame: one slice per channel, all of equal length
    /// ≤ [`FRAME_SIZE`]. Returns the compressed bytes emitted by this
    /// call, which may be empty if the encoder buffers internally.
    fn encode(&mut self, frames: &[&[f32]]) -> Result<Vec<u8>>;

    /// Flush buffered state into a final chunk (may be empty). The
    /// encoder accepts no further calls afterwards.
    fn finalize(&mut self) -> Result<Vec<u8>>;
}

/// Instantiates encoders for the pipeline.
///
/// The pipeline treats the absence of a factory as "encoder not
/// available" and a `create` failure as an encoder load error.
pub trait EncoderFactory: Send + Sync {
    /// Create a fresh, unconfigured encoder.
    fn create(&self) -> Result<Box<dyn FrameEncoder>>;
}
