use thiserror::Error;

/// Base error type for the brief workflow crates.
///
/// Subsystem crates (client, session) define their own error enums and
/// convert where the `?` operator needs to cross a crate boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BriefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for BriefError {
    fn from(err: toml::de::Error) -> Self {
        BriefError::Config(err.to_string())
    }
}

/// A specialized `Result` type for brief workflow operations.
pub type Result<T> = std::result::Result<T, BriefError>;
