//! Crate error types

use thiserror::Error;

/// Errors produced by the transcription pipeline.
///
/// `SyllabifierFault` is recovered inside the transcriber (the word is
/// treated as a single syllable); the other variants surface to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A resource table file is missing or malformed.
    #[error("resource table error: {0}")]
    ResourceLoad(String),

    /// A syllabifier cursor escaped the working buffer.
    #[error("syllabifier fault on {word:?}")]
    SyllabifierFault { word: String },

    /// The CECI transition table produced an action outside `0..=4`.
    #[error("unknown action code {action} for {word:?}")]
    UnknownAction { word: String, action: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
