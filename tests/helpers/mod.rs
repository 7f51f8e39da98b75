//! Shared test helpers

pub mod audio_generator;
pub mod fakes;
