use thiserror::Error;

/// Everything that can go wrong in the core: a crane id outside the closed
/// set, unparseable user input, or a log store that cannot be read/written.
#[derive(Debug, Error)]
pub enum OpsError {
    #[error("unknown crane number: {0}")]
    InvalidUnit(u8),
    #[error("invalid {field}: {value:?} is not a number")]
    Validation { field: &'static str, value: String },
    #[error("log file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log file format error: {0}")]
    Format(#[from] serde_yaml::Error),
}
