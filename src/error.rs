//! Error types for header sanitization, construction and iteration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeadersError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadersError {
    /// Name is not an HTTP token
    #[error("{0} is not a legal HTTP header name")]
    InvalidHeaderName(String),

    /// Value contains a character forbidden in a field value
    #[error("{0} is not a legal HTTP header value")]
    InvalidHeaderValue(String),

    /// Initializer is neither a pair list nor a record
    #[error("Header pairs must be iterable: {0}")]
    InvalidInitializer(String),

    /// Element of a pair list is not itself a sequence
    #[error("Each header pair must be iterable: {0}")]
    InvalidPairEntry(String),

    /// Element of a pair list does not hold exactly two items
    #[error("Each header pair must be a name/value tuple, got {0} items")]
    InvalidPairLength(usize),

    /// Cursor advanced after its store was dropped
    #[error("Value of `this` is not a HeadersIterator")]
    InvalidIteratorReceiver,
}

/// Errors raised while loading a [`HeadersConfig`](crate::config::HeadersConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid headers in config: {0}")]
    Headers(#[from] HeadersError),
}
