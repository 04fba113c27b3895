//! Metadata extraction for Shelf.
//!
//! Given an object name and its raw bytes, derive a mapping of attribute
//! name to value. The format is chosen from the name's suffix: `wav` and
//! `mp3` are parsed, anything else yields an empty mapping.
//!
//! Extraction never blocks an upload. [`extract`] folds every failure into
//! an empty mapping; [`try_extract`] reports why, for logging and tooling.
//!
//! # Attributes
//!
//! | Format | Keys |
//! |--------|------|
//! | `wav`  | `nchannels`, `sampwidth`, `framerate`, `nframes`, `comptype`, `compname`, `duration` |
//! | `mp3`  | `version`, `layer`, `bitrate`, `sample_rate`, `mode`, `channels`, `protected`, `padding`, `bitrate_mode`, `length`, `duration` |

pub mod error;
pub mod extract;
pub mod mp3;
mod read;
pub mod wav;

pub use error::{MetaError, MetaResult};
pub use extract::{extract, try_extract, Format};
pub use mp3::Mp3Info;
pub use wav::WavInfo;
