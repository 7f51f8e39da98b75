//! Error types for transogg
//!
//! Defines module-specific error types using thiserror for clear error propagation.
//!
//! User-facing status text deliberately discards error detail; these variants
//! carry the original cause for logging and diagnostics.

use thiserror::Error;

/// Main error type for the transcoding pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// No input file was selected for the run
    #[error("No input file selected")]
    NoInput,

    /// Audio decoding errors
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Resampling or downmix errors
    #[error("Resample error: {0}")]
    Resample(String),

    /// No encoder factory is registered with the pipeline
    #[error("Encoder not available")]
    EncoderUnavailable,

    /// Encoder factory failed to instantiate an encoder
    #[error("Encoder load error: {0}")]
    EncoderLoad(String),

    /// Bitstream encoding errors
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid state for operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using transogg Error
pub type Result<T> = std::result::Result<T, Error>;
