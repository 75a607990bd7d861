//! # Errors
//!
//! Typed failures of the link store and of command handlers.
//! Per-message errors are turned into replies (or silence) by the router;
//! only `StoreError::Read` at startup ever leaves the process.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a persisted document could not be loaded.
#[derive(Debug, Error)]
pub enum ReadCause {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected layout: {0}")]
    Layout(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but cannot be read or is malformed.
    #[error("failed to read link store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadCause,
    },

    /// The in-memory change was applied but could not be flushed to disk.
    #[error("failed to write link store {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a command handler that did not succeed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Wrong argument count or shape. Carries the usage line to show.
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Storage(#[from] StoreError),
}
