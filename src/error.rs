//! Error types for the arckit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: the cache was configured with invalid parameters (zero
//!   capacity, missing fetch callback). Raised at construction only.
//! - [`GetError`]: a caller-supplied callback failed during
//!   [`ArcCache::get`](crate::policy::arc::ArcCache::get). The callback's own
//!   error value is carried unchanged; the cache state is exactly what it was
//!   before the call.
//! - [`InvariantError`]: an internal invariant does not hold
//!   (returned by `check_invariants`).
//!
//! ## Example Usage
//!
//! ```
//! use arckit::builder::ArcCacheBuilder;
//! use arckit::error::GetError;
//!
//! let mut cache = ArcCacheBuilder::<u32, u32, String>::new(4)
//!     .fetch(|key: &u32| if *key == 0 { Err("no zero".to_string()) } else { Ok(key * 2) })
//!     .try_build()
//!     .unwrap();
//!
//! assert_eq!(cache.get(&3), Ok(&6));
//! assert_eq!(cache.get(&0), Err(GetError::Fetch("no zero".to_string())));
//! ```

use std::error::Error;
use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// # Example
///
/// ```
/// use arckit::builder::ArcCacheBuilder;
///
/// let err = ArcCacheBuilder::<u64, u64, ()>::new(0)
///     .fetch(|k: &u64| Ok(*k))
///     .try_build()
///     .unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when an internal cache invariant is violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for InvariantError {}

// ---------------------------------------------------------------------------
// GetError
// ---------------------------------------------------------------------------

/// A callback failure surfaced by `get`.
///
/// The variant names the callback that failed; the payload is the value that
/// callback returned. A `get` that returns `GetError` has made no change to
/// the cache, so retrying the same key is always safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetError<E> {
    /// The fetch callback failed for a missing key.
    Fetch(E),
    /// The evict callback failed while making room.
    Evict(E),
}

impl<E> GetError<E> {
    /// Returns the callback's error value.
    pub fn into_inner(self) -> E {
        match self {
            GetError::Fetch(err) | GetError::Evict(err) => err,
        }
    }

    /// Borrows the callback's error value.
    pub fn inner(&self) -> &E {
        match self {
            GetError::Fetch(err) | GetError::Evict(err) => err,
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, GetError::Fetch(_))
    }

    pub fn is_evict(&self) -> bool {
        matches!(self, GetError::Evict(_))
    }
}

impl<E: fmt::Display> fmt::Display for GetError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetError::Fetch(err) => write!(f, "fetch callback failed: {err}"),
            GetError::Evict(err) => write!(f, "evict callback failed: {err}"),
        }
    }
}

impl<E> Error for GetError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
