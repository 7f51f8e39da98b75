//! # transogg
//!
//! Audio to Ogg Vorbis transcoding utility.
//!
//! **Purpose:** Decode an audio file, optionally resample and downmix it,
//! encode the result to Ogg Vorbis, and publish it as an output artifact.
//!
//! **Architecture:** Linear four-stage pipeline
//! (decode → resample/mix → frame-encode → assemble) using symphonia +
//! rubato + libvorbis, driven by [`pipeline::Converter`] against an
//! abstract [`ui::UiPort`] so the whole run is headless-testable.

pub mod audio;
pub mod chunks;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod ui;

pub use error::{Error, Result};
