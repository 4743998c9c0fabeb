//! Typed errors for the terminal surface and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of the underlying terminal backend.
///
/// Out-of-bounds drawing is never an error; only real I/O problems surface here.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to read or parse a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
