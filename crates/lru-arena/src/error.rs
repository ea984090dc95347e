//! Error types for lru-arena

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A capacity of zero was requested
    ZeroCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "cache capacity must be greater than zero"),
        }
    }
}

impl std::error::Error for Error {}
