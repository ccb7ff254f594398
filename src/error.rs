//! Error types for the word frequency pipeline.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The parallel stage a task failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Map,
    Reduce,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Map => write!(f, "map"),
            Phase::Reduce => write!(f, "reduce"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch text from {address}")]
    Fetch {
        address: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("input text is not valid UTF-8")]
    Decode(#[from] std::str::Utf8Error),

    #[error("{phase} task failed")]
    Task {
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },

    #[error("key `{0}` was reduced more than once")]
    DuplicateKey(String),

    #[error("failed to build worker pool")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("no workload named `{0}`")]
    UnknownWorkload(String),

    #[error("failed to render chart")]
    Render(#[source] std::io::Error),

    #[error("failed to write frequencies to {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize frequencies")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Whether the run stopped before any pipeline work happened.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Fetch { .. })
    }
}
