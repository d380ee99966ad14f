//! Error types for cache construction.
//!
//! Lookups never fail: a miss is `None`. The only reportable failure is asking
//! for a cache that cannot hold a single entry.

use core::fmt;

/// Result alias for fallible cache construction.
pub type Result<T> = core::result::Result<T, CacheError>;

/// Errors returned when building a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The requested capacity is zero, negative, or does not fit in `usize`.
    InvalidCapacity,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidCapacity => {
                write!(f, "invalid capacity: a cache must hold at least one entry")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CacheError {}
