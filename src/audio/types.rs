//! Core audio data types
//!
//! Defines the PCM buffer passed between pipeline stages.
//!
//! **Format:**
//! - Samples are f32 (floating point -1.0 to 1.0)
//! - Planar layout: one `Vec<f32>` per channel, all of equal length
//! - Each pipeline stage produces a new buffer; buffers are never
//!   mutated in place after construction

use crate::error::{Error, Result};

/// PcmBuffer holds decoded (and possibly resampled) audio data.
///
/// The encoder consumes per-channel slices, so samples are kept planar
/// rather than interleaved: `channels[c][f]` is frame `f` of channel `c`.
#[derive(Debug, Clone)]
pub struct PcmBuffer {
    /// PCM samples, one vector per channel
    channels: Vec<Vec<f32>>,

    /// Sample rate in Hz
    sample_rate: u32,
}

impl PcmBuffer {
    /// Create a new PcmBuffer from planar channel data.
    ///
    /// # Errors
    /// - No channels
    /// - Channels of unequal length
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() {
            return Err(Error::Decode("PCM buffer has no channels".to_string()));
        }

        let frames = channels[0].len();
        if channels.iter().any(|ch| ch.len() != frames) {
            return Err(Error::Decode(
                "PCM channels have unequal lengths".to_string(),
            ));
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Number of channels
    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// All channels as planar slices
    pub fn channel_slices(&self) -> Vec<&[f32]> {
        self.channels.iter().map(|ch| ch.as_slice()).collect()
    }

    /// Per-channel slices for the frame window `[start, start + len)`.
    ///
    /// Used by the encode loop to feed fixed-size frames to the encoder.
    ///
    /// # Panics
    /// Panics if the window extends past the end of the buffer.
    pub fn frame_window(&self, start: usize, len: usize) -> Vec<&[f32]> {
        self.channels
            .iter()
            .map(|ch| &ch[start..start + len])
            .collect()
    }

    /// Consume the buffer, returning the planar channel data
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}
