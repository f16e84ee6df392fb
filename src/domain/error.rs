// ============================================================
// Layer 3 — Dataset Errors
// ============================================================
// Every failure the library can report, as one typed enum.
//
//   Usage          → the caller asked for something impossible
//                    (unknown split, dev-only without a vocab)
//   IndexOutOfBounds → dataset position outside [0, len)
//   DataIntegrity  → a raw example breaks the answers/offsets contract
//   SplitUnavailable → a raw source has no data for a split
//   Io / Json      → reading or parsing files on disk
//   Tokenizer      → a tokenizer could not be loaded or failed on input
//
// The application and CLI layers wrap these in anyhow with context.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::split::{Split, SquadVersion};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("malformed raw example {index}: {reason}")]
    DataIntegrity { index: usize, reason: String },

    #[error("no {split} data available for {version}")]
    SplitUnavailable { version: SquadVersion, split: Split },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}

impl DatasetError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn tokenizer(msg: impl Into<String>) -> Self {
        Self::Tokenizer(msg.into())
    }
}

pub type Result<T, E = DatasetError> = std::result::Result<T, E>;
