//! Audio test fixture generation
//!
//! Generates deterministic in-memory WAV files with known characteristics
//! for exercising the full decode → resample → encode pipeline.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::io::Cursor;

/// Generate a sine-wave WAV file in memory.
///
/// # Arguments
/// * `channels` - Channel count (the same tone is written to every channel)
/// * `sample_rate` - Sample rate in Hz
/// * `duration_ms` - Duration in milliseconds
/// * `frequency_hz` - Tone frequency (e.g. 440.0 for A4)
/// * `amplitude` - Amplitude 0.0-1.0 (0.5 recommended to avoid clipping)
pub fn sine_wav_bytes(
    channels: u16,
    sample_rate: u32,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("create WAV writer");

        let total_frames = (sample_rate as u64 * duration_ms) / 1000;
        for i in 0..total_frames {
            let t = i as f32 / sample_rate as f32;
            let sample = (2.0 * PI * frequency_hz * t).sin() * amplitude;
            let value = (sample * i16::MAX as f32) as i16;
            for _ in 0..channels {
                writer.write_sample(value).expect("write sample");
            }
        }

        writer.finalize().expect("finalize WAV");
    }

    cursor.into_inner()
}

/// Number of frames a WAV generated by [`sine_wav_bytes`] contains.
pub fn expected_frames(sample_rate: u32, duration_ms: u64) -> usize {
    ((sample_rate as u64 * duration_ms) / 1000) as usize
}
