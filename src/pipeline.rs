//! Pipeline orchestrator
//!
//! Drives one conversion run as a strict sequence of stages, each gated
//! on success of the previous:
//!
//! 1. Read the request; no file selected ends the run immediately
//! 2. Decode the input bytes to PCM
//! 3. Resample/downmix with sanitized parameters
//! 4. Check encoder availability, instantiate and configure it from the
//!    resampled buffer's own channel count and sample rate
//! 5. Feed fixed-size frames to the encoder, yielding to the runtime
//!    between frames so the host stays responsive
//! 6. Finalize, assemble the chunks, publish the artifact
//!
//! The first failure sets a terminal status on the UI port and aborts the
//! run; no partial output is ever published. The returned `Result` keeps
//! the underlying cause for diagnostics, which the status text discards.

use crate::audio::resampler::{self, DEFAULT_SAMPLE_RATE};
use crate::audio::{decoder, PcmBuffer};
use crate::chunks::ChunkAssembler;
use crate::encoder::vorbis::OggVorbisFactory;
use crate::encoder::{
    self, EncoderConfig, EncoderFactory, FrameEncoder, DEFAULT_QUALITY, FRAME_SIZE,
};
use crate::error::{Error, Result};
use crate::ui::{output_file_name, OutputArtifact, SelectedFile, Status, UiPort, OGG_MIME_TYPE};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Effective target sample rate: default when unspecified, clamped to the
/// supported range.
fn effective_rate(requested: Option<u32>) -> u32 {
    resampler::clamp_sample_rate(requested.unwrap_or(DEFAULT_SAMPLE_RATE))
}

/// Effective VBR quality: default when unspecified, clamped to the
/// supported range.
fn effective_quality(requested: Option<f32>) -> f32 {
    encoder::clamp_quality(requested.unwrap_or(DEFAULT_QUALITY))
}

/// One-shot audio conversion driver.
///
/// Runs are serialized structurally: `run` borrows the converter mutably,
/// so a second run cannot start while one is in progress.
pub struct Converter<U: UiPort> {
    ui: U,
    encoder_factory: Option<Arc<dyn EncoderFactory>>,
}

impl<U: UiPort> Converter<U> {
    /// Create a converter with the built-in Ogg Vorbis encoder.
    pub fn new(ui: U) -> Self {
        Self::with_encoder_factory(ui, Some(Arc::new(OggVorbisFactory)))
    }

    /// Create a converter with an explicit encoder factory.
    ///
    /// `None` models a host without an encoder: the run stops at the
    /// availability check.
    pub fn with_encoder_factory(ui: U, encoder_factory: Option<Arc<dyn EncoderFactory>>) -> Self {
        Self {
            ui,
            encoder_factory,
        }
    }

    /// Access the UI port (primarily for inspecting fakes in tests).
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Consume the converter, returning the UI port.
    pub fn into_ui(self) -> U {
        self.ui
    }

    /// Execute one conversion run.
    ///
    /// Every failure has already been surfaced as a status by the time
    /// this returns; the error value carries the cause for logging.
    pub async fn run(&mut self) -> Result<()> {
        let request = self.ui.request();

        let Some(SelectedFile { name, data }) = request.file else {
            self.ui.set_status(Status::SelectFile);
            return Err(Error::NoInput);
        };

        // Stage: decode
        self.ui.set_status(Status::Decoding);
        let extension = Path::new(&name).extension().and_then(|e| e.to_str());
        let decoded = match decoder::decode(data, extension) {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!("Decode failed: {}", e);
                self.ui.set_status(Status::DecodingError);
                return Err(e);
            }
        };
        debug!(
            "Decoded: {} ch, {} Hz, {} frames",
            decoded.channel_count(),
            decoded.sample_rate(),
            decoded.frames()
        );

        // Stage: resample/mix with sanitized parameters
        let target_rate = effective_rate(request.target_rate);
        let quality = effective_quality(request.quality);

        self.ui.set_status(Status::Resampling {
            rate: target_rate,
            mono: request.mono,
        });
        let pcm = match resampler::resample_and_mix(&decoded, target_rate, request.mono) {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!("Resample failed: {}", e);
                self.ui.set_status(Status::ResampleError);
                return Err(e);
            }
        };
        drop(decoded);

        // Stage: encoder availability and setup
        self.ui.set_status(Status::LoadingEncoder);
        let Some(factory) = &self.encoder_factory else {
            warn!("No encoder factory registered");
            self.ui.set_status(Status::EncoderUnavailable);
            return Err(Error::EncoderUnavailable);
        };

        let mut frame_encoder = match factory.create() {
            Ok(enc) => enc,
            Err(e) => {
                warn!("Encoder instantiation failed: {}", e);
                self.ui.set_status(Status::EncoderLoadError);
                return Err(e);
            }
        };

        // Configuration comes from the resampled buffer itself, never from
        // the request, so it cannot disagree with the PCM being fed in
        let config = EncoderConfig::for_buffer(&pcm, quality);
        if let Err(e) = frame_encoder.configure(&config) {
            warn!("Encoder configure failed: {}", e);
            self.ui.set_status(Status::EncodingError);
            return Err(e);
        }

        // Stage: frame-encode loop
        self.ui.set_status(Status::Encoding { percent: None });
        let assembler = match self
            .encode_frames(frame_encoder.as_mut(), &pcm)
            .await
        {
            Ok(assembler) => assembler,
            Err(e) => {
                warn!("Encode failed: {}", e);
                self.ui.set_status(Status::EncodingError);
                return Err(e);
            }
        };

        // Stage: publish
        let artifact = OutputArtifact {
            file_name: output_file_name(&name),
            mime_type: OGG_MIME_TYPE,
            bytes: assembler.into_bytes(),
        };
        info!(
            "Encoded {} frames to {} bytes ({})",
            pcm.frames(),
            artifact.bytes.len(),
            artifact.file_name
        );
        self.ui.publish(artifact)?;
        self.ui.set_status(Status::Done);
        Ok(())
    }

    /// Feed the PCM to the encoder in fixed-size frames, collecting
    /// emitted chunks in order and finalizing exactly once.
    ///
    /// Progress is reported after every frame; `yield_now` between frames
    /// is the run's only cooperative preemption point.
    async fn encode_frames(
        &mut self,
        frame_encoder: &mut dyn FrameEncoder,
        pcm: &PcmBuffer,
    ) -> Result<ChunkAssembler> {
        let total = pcm.frames();
        let mut assembler = ChunkAssembler::new();
        let mut offset = 0usize;

        while offset < total {
            let len = FRAME_SIZE.min(total - offset);
            let frames = pcm.frame_window(offset, len);
            let chunk = frame_encoder.encode(&frames)?;
            assembler.push(chunk);
            offset += len;

            let percent = ((offset as f64 / total as f64) * 100.0).round() as u8;
            self.ui.set_status(Status::Encoding {
                percent: Some(percent),
            });
            tokio::task::yield_now().await;
        }

        let trailing = frame_encoder.finalize()?;
        assembler.push(trailing);

        debug!(
            "Collected {} chunks, {} bytes total",
            assembler.chunk_count(),
            assembler.len()
        );
        Ok(assembler)
    }
}
