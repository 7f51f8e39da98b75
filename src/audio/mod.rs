//! Audio decoding, resampling, and PCM buffer types.

pub mod decoder;
pub mod resampler;
pub mod types;

pub use types::PcmBuffer;
