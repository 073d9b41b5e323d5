use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration problems detected when a dialog is asked to open.
///
/// These are returned synchronously from `open`; the result callback is
/// never invoked for a dialog that failed to open.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialogError {
    #[error("unsupported base {0}; expected 10 or 16")]
    UnsupportedBase(u32),
    #[error("minimum value {min} is not less than maximum value {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("zero must be included within the bounds")]
    ZeroOutOfRange,
    #[error("a selector needs at least one option")]
    NoOptions,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("storage decode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
