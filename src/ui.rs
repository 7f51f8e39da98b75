//! UI port
//!
//! The pipeline never touches the presentation layer directly; it reads
//! its input from and reports back through the [`UiPort`] trait. The CLI
//! binary implements it over the terminal, tests implement it with
//! recording fakes.

use crate::error::Result;
use std::fmt;

/// MIME type of the output artifact
pub const OGG_MIME_TYPE: &str = "audio/ogg";

/// A user-selected input file: its name and raw byte content.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// One conversion request as read from the user interface.
///
/// `None` fields mean the input was empty or unparsable; the pipeline
/// substitutes defaults before use.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    /// Selected file, if any
    pub file: Option<SelectedFile>,

    /// Requested target sample rate (unclamped)
    pub target_rate: Option<u32>,

    /// Downmix to mono
    pub mono: bool,

    /// Requested VBR quality (unclamped)
    pub quality: Option<f32>,
}

/// The finished downloadable artifact.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    /// Suggested file name (`<basename>.ogg`)
    pub file_name: String,

    /// MIME type, always [`OGG_MIME_TYPE`]
    pub mime_type: &'static str,

    /// Assembled compressed bytes
    pub bytes: Vec<u8>,
}

/// Human-readable pipeline status.
///
/// Rendered text is an observable side effect only, never parsed back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// No file was selected
    SelectFile,
    /// Decode stage running
    Decoding,
    /// Resample stage running with the effective parameters
    Resampling { rate: u32, mono: bool },
    /// Encoder being instantiated
    LoadingEncoder,
    /// Encode loop running; `percent` is frames processed so far
    Encoding { percent: Option<u8> },
    /// Run finished, artifact published
    Done,
    /// Decode stage failed
    DecodingError,
    /// Resample stage failed
    ResampleError,
    /// No encoder factory registered
    EncoderUnavailable,
    /// Encoder factory failed to produce an encoder
    EncoderLoadError,
    /// Encode or finalize call failed
    EncodingError,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::SelectFile => write!(f, "Select a file"),
            Status::Decoding => write!(f, "Decoding..."),
            Status::Resampling { rate, mono: false } => write!(f, "Resampling to {} Hz...", rate),
            Status::Resampling { rate, mono: true } => {
                write!(f, "Resampling to {} Hz, mono...", rate)
            }
            Status::LoadingEncoder => write!(f, "Loading encoder..."),
            Status::Encoding { percent: None } => write!(f, "Encoding..."),
            Status::Encoding {
                percent: Some(percent),
            } => write!(f, "Encoding {}%", percent),
            Status::Done => write!(f, "Done"),
            Status::DecodingError => write!(f, "Decoding error"),
            Status::ResampleError => write!(f, "Resample error"),
            Status::EncoderUnavailable => write!(f, "Encoder not available"),
            Status::EncoderLoadError => write!(f, "Encoder load error"),
            Status::EncodingError => write!(f, "Encoding error"),
        }
    }
}

/// Interface between the pipeline and whatever hosts it.
pub trait UiPort {
    /// Read the conversion request. Called once per run; the input file's
    /// bytes move into the pipeline.
    fn request(&mut self) -> ConvertRequest;

    /// Display a status update.
    fn set_status(&mut self, status: Status);

    /// Hand the finished artifact to the user.
    fn publish(&mut self, artifact: OutputArtifact) -> Result<()>;
}

/// Output file name: the input name with its extension replaced by `.ogg`.
pub fn output_file_name(input_name: &str) -> String {
    match input_name.rfind('.') {
        Some(idx) => format!("{}.ogg", &input_name[..idx]),
        None => format!("{}.ogg", input_name),
    }
}
