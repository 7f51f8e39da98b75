//! Audio decoder using symphonia
//!
//! Decodes various audio formats (WAV, MP3, FLAC, AAC, M4A, Vorbis) to
//! planar f32 PCM. The input is the raw byte content of the selected file;
//! the whole stream is decoded in one pass.

use crate::audio::PcmBuffer;
use crate::error::{Error, Result};
use std::io::Cursor;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::IntoSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// Decode an in-memory audio file to PCM samples.
///
/// # Arguments
/// - `data`: Raw byte content of the file
/// - `extension`: File extension, if known, used as a format probe hint
///
/// # Errors
/// - Unsupported or unrecognized audio format
/// - No audio track in the container
/// - Decode error before any usable audio was produced
pub fn decode(data: Vec<u8>, extension: Option<&str>) -> Result<PcmBuffer> {
    debug!("Decoding {} bytes of input", data.len());

    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    // Create a hint to help the format registry guess the format
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    // Probe the input to get the format reader
    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| Error::Decode(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // Get the default audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Decode("No audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| Error::Decode("Sample rate not found".to_string()))?;

    let channel_count = codec_params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| Error::Decode("Channel count not found".to_string()))?;

    debug!(
        "Audio format: sample_rate={}, channels={}",
        sample_rate, channel_count
    );

    let decoder_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &decoder_opts)
        .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

    // Decode all packets into planar channel vectors
    let mut channels: Vec<Vec<f32>> = vec![Vec::new(); channel_count];

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                debug!("Reached end of stream");
                break;
            }
            Err(e) => {
                warn!("Error reading packet: {}", e);
                break;
            }
        };

        // Skip packets for other tracks
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => convert_samples_to_f32(&decoded, &mut channels),
            Err(e) => {
                warn!("Decode error: {}", e);
                continue;
            }
        }
    }

    // A packet with fewer channels than declared leaves channels ragged;
    // trim all channels to the shortest so the buffer stays rectangular.
    let min_frames = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
    for ch in &mut channels {
        ch.truncate(min_frames);
    }

    debug!(
        "Decoded {} frames across {} channels",
        min_frames, channel_count
    );

    PcmBuffer::new(channels, sample_rate)
}

/// Convert a symphonia AudioBufferRef to planar f32 samples.
///
/// Handles all symphonia sample formats, normalizing to [-1.0, 1.0].
fn convert_samples_to_f32(decoded: &AudioBufferRef, output: &mut [Vec<f32>]) {
    match decoded {
        AudioBufferRef::U8(buf) => extend_planar(buf, output),
        AudioBufferRef::U16(buf) => extend_planar(buf, output),
        AudioBufferRef::U24(buf) => extend_planar(buf, output),
        AudioBufferRef::U32(buf) => extend_planar(buf, output),
        AudioBufferRef::S8(buf) => extend_planar(buf, output),
        AudioBufferRef::S16(buf) => extend_planar(buf, output),
        AudioBufferRef::S24(buf) => extend_planar(buf, output),
        AudioBufferRef::S32(buf) => extend_planar(buf, output),
        AudioBufferRef::F32(buf) => extend_planar(buf, output),
        AudioBufferRef::F64(buf) => extend_planar(buf, output),
    }
}

/// Append one decoded buffer's samples to the planar output, converting
/// from the source sample format to f32.
fn extend_planar<S>(buf: &AudioBuffer<S>, output: &mut [Vec<f32>])
where
    S: Sample + IntoSample<f32>,
{
    let decoded_channels = buf.spec().channels.count();
    let usable = decoded_channels.min(output.len());

    for (ch_idx, out) in output.iter_mut().enumerate().take(usable) {
        out.extend(buf.chan(ch_idx).iter().map(|s| (*s).into_sample()));
    }
}
