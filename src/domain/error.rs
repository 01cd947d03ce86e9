// ============================================================
// Layer 3 — Loader Errors
// ============================================================
// Every failure the library can report. All of them are fatal:
// nothing here is retried, callers propagate them with `?`
// up to the process boundary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("'{0}' mode not exists, expected one of: train, eval, test")]
    InvalidMode(String),

    #[error("'{0}' is not a known dataset, expected one of: clothes, makeup")]
    InvalidDataset(String),

    #[error("'{0}' is not a known phase, expected one of: load_data, test_load")]
    InvalidPhase(String),

    #[error("{} not exists, please generate it firstly", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode field '{field}' from '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        field: &'static str,
        #[source]
        source: serde_pickle::Error,
    },

    #[error("cannot encode field '{field}' into '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        field: &'static str,
        #[source]
        source: serde_pickle::Error,
    },

    #[error("field '{field}' holds {found} dialogues, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("dialogue {dialogue}: field '{field}' has {found} turns, expected {expected}")]
    TurnCountMismatch {
        dialogue: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("order of length {len} is not a permutation of 0..{expected}")]
    InvalidPermutation { expected: usize, len: usize },

    #[error("dialogue {dialogue}, turn {turn}: width {found} differs from {expected}")]
    RaggedTurn {
        dialogue: usize,
        turn: usize,
        expected: usize,
        found: usize,
    },

    #[error("label {value} in '{field}' is outside [0, {classes})")]
    LabelOutOfRange {
        field: &'static str,
        value: i64,
        classes: usize,
    },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;
