//! Audio resampling and downmixing using rubato
//!
//! Produces a new PCM buffer at the requested sample rate and channel
//! count. Downmixing runs before rate conversion so the resampler only
//! processes the channels that survive.
//!
//! Downmix formula: equal-weight average of all source channels
//! (sum / N). With inputs in [-1.0, 1.0] the average cannot clip.

use crate::audio::PcmBuffer;
use crate::error::{Error, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler as RubatoResampler};
use tracing::debug;

/// Lowest accepted target sample rate
pub const MIN_SAMPLE_RATE: u32 = 8000;

/// Highest accepted target sample rate
pub const MAX_SAMPLE_RATE: u32 = 48000;

/// Target sample rate used when the request does not specify one
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Clamp a requested sample rate into the supported range.
pub fn clamp_sample_rate(rate: u32) -> u32 {
    rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE)
}

/// Resample a PCM buffer to `target_rate`, optionally downmixing to mono.
///
/// The output channel count is 1 if `to_mono`, else the source channel
/// count. The target rate is clamped to [`MIN_SAMPLE_RATE`],
/// [`MAX_SAMPLE_RATE`] before use. Always produces a new buffer, even
/// when the rate is unchanged.
///
/// # Errors
/// - Zero-length source buffer
/// - Resampler construction or processing failure
pub fn resample_and_mix(source: &PcmBuffer, target_rate: u32, to_mono: bool) -> Result<PcmBuffer> {
    let target_rate = clamp_sample_rate(target_rate);

    if source.frames() == 0 {
        return Err(Error::Resample("Source buffer is empty".to_string()));
    }

    let channels = if to_mono && source.channel_count() > 1 {
        downmix_to_mono(source)
    } else {
        source.channel_slices()
            .iter()
            .map(|ch| ch.to_vec())
            .collect()
    };

    // Already at target rate, only the channel layout changes
    if source.sample_rate() == target_rate {
        debug!("Sample rate already at {}Hz, skipping resample", target_rate);
        return PcmBuffer::new(channels, target_rate);
    }

    debug!(
        "Resampling from {}Hz to {}Hz ({} channels)",
        source.sample_rate(),
        target_rate,
        channels.len()
    );

    let input_frames = channels[0].len();

    // Whole buffer in one chunk; FastFixedIn gives a good
    // quality/performance tradeoff for offline conversion
    let mut resampler = FastFixedIn::<f32>::new(
        target_rate as f64 / source.sample_rate() as f64,
        1.0,
        PolynomialDegree::Septic,
        input_frames,
        channels.len(),
    )
    .map_err(|e| Error::Resample(format!("Failed to create resampler: {}", e)))?;

    let resampled = resampler
        .process(&channels, None)
        .map_err(|e| Error::Resample(format!("Resampling failed: {}", e)))?;

    debug!(
        "Resampled {} input frames to {} output frames",
        input_frames,
        resampled[0].len()
    );

    PcmBuffer::new(resampled, target_rate)
}

/// Downmix all source channels to one by equal-weight averaging.
fn downmix_to_mono(source: &PcmBuffer) -> Vec<Vec<f32>> {
    let frames = source.frames();
    let scale = 1.0 / source.channel_count() as f32;
    let mut mono = vec![0.0f32; frames];

    for ch_idx in 0..source.channel_count() as usize {
        for (acc, sample) in mono.iter_mut().zip(source.channel(ch_idx)) {
            *acc += sample * scale;
        }
    }

    vec![mono]
}
