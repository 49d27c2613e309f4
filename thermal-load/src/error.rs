use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
/// Represents errors that can occur while sampling thermal state.
pub enum Error {
    /// A sensor file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A sensor file held something other than an unsigned integer.
    #[error("unexpected value {value:?} in {}", path.display())]
    Parse {
        /// File that held the value.
        path: PathBuf,
        /// The raw, trimmed contents.
        value: String,
    },
    /// The named source found nothing it could turn into a load.
    #[error("no usable sensors found by {0}")]
    NoSensors(&'static str),
    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
