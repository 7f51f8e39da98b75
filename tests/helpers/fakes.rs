//! Recording fakes for the UI port and the encoder contract
//!
//! The pipeline only talks to traits, so these fakes observe everything
//! the orchestrator does: status sequence, published artifacts, and the
//! exact encoder call order.

use std::sync::{Arc, Mutex};
use transogg::encoder::{EncoderConfig, EncoderFactory, FrameEncoder};
use transogg::error::{Error, Result};
use transogg::ui::{ConvertRequest, OutputArtifact, Status, UiPort};

/// UI port that records every status and published artifact.
pub struct RecordingPort {
    request: Option<ConvertRequest>,
    pub statuses: Vec<Status>,
    pub published: Vec<OutputArtifact>,
}

impl RecordingPort {
    pub fn new(request: ConvertRequest) -> Self {
        Self {
            request: Some(request),
            statuses: Vec::new(),
            published: Vec::new(),
        }
    }

    /// Rendered text of every recorded status, in order.
    pub fn status_texts(&self) -> Vec<String> {
        self.statuses.iter().map(|s| s.to_string()).collect()
    }

    pub fn last_status_text(&self) -> Option<String> {
        self.statuses.last().map(|s| s.to_string())
    }
}

impl UiPort for RecordingPort {
    fn request(&mut self) -> ConvertRequest {
        self.request.take().unwrap_or_default()
    }

    fn set_status(&mut self, status: Status) {
        self.statuses.push(status);
    }

    fn publish(&mut self, artifact: OutputArtifact) -> Result<()> {
        self.published.push(artifact);
        Ok(())
    }
}

/// One observed encoder call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncoderCall {
    Configure(EncoderConfig),
    /// Channel count and per-channel frame length of one encode call
    Encode { channels: usize, frames: usize },
    Finalize,
}

/// Shared log of encoder calls across factory and encoder instances.
pub type CallLog = Arc<Mutex<Vec<EncoderCall>>>;

/// Encoder fake that logs calls and emits one distinct byte per call.
///
/// Encode call `n` emits `[n]`, finalize emits `[0xAA]`, so the
/// assembled output proves chunk ordering.
pub struct RecordingEncoder {
    log: CallLog,
    encode_calls: u8,
}

impl FrameEncoder for RecordingEncoder {
    fn configure(&mut self, config: &EncoderConfig) -> Result<()> {
        self.log.lock().unwrap().push(EncoderCall::Configure(*config));
        Ok(())
    }

    fn encode(&mut self, frames: &[&[f32]]) -> Result<Vec<u8>> {
        self.log.lock().unwrap().push(EncoderCall::Encode {
            channels: frames.len(),
            frames: frames.first().map(|ch| ch.len()).unwrap_or(0),
        });
        let chunk = vec![self.encode_calls];
        self.encode_calls = self.encode_calls.wrapping_add(1);
        Ok(chunk)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.log.lock().unwrap().push(EncoderCall::Finalize);
        Ok(vec![0xAA])
    }
}

/// Factory producing [`RecordingEncoder`]s that share one call log.
pub struct RecordingFactory {
    pub log: CallLog,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl EncoderFactory for RecordingFactory {
    fn create(&self) -> Result<Box<dyn FrameEncoder>> {
        Ok(Box::new(RecordingEncoder {
            log: Arc::clone(&self.log),
            encode_calls: 0,
        }))
    }
}

/// Factory whose `create` always fails, modelling an encoder module that
/// is present but fails to load.
pub struct FailingFactory;

impl EncoderFactory for FailingFactory {
    fn create(&self) -> Result<Box<dyn FrameEncoder>> {
        Err(Error::EncoderLoad("Simulated load failure".to_string()))
    }
}
