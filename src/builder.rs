//! Builder for closure-driven ARC caches.
//!
//! Collects a capacity and the fetch/evict callbacks, then validates them in
//! one place. A missing fetch callback or a zero capacity is a configuration
//! error reported by [`try_build`](ArcCacheBuilder::try_build).
//!
//! ## Example
//!
//! ```rust
//! use arckit::builder::ArcCacheBuilder;
//!
//! let mut cache = ArcCacheBuilder::<u64, String, std::io::Error>::new(100)
//!     .fetch(|key| Ok(format!("row-{key}")))
//!     .on_evict(|_key, _value| Ok(()))
//!     .try_build()
//!     .expect("valid configuration");
//!
//! assert_eq!(cache.get(&7).unwrap(), "row-7");
//! ```

use std::fmt;
use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::source::{EvictFn, FetchFn, FnSource};

/// Builder for an [`ArcCache`] backed by an [`FnSource`].
pub struct ArcCacheBuilder<K, V, E> {
    capacity: usize,
    fetch: Option<FetchFn<K, V, E>>,
    evict: Option<EvictFn<K, V, E>>,
}

impl<K, V, E> ArcCacheBuilder<K, V, E>
where
    K: Clone + Eq + Hash,
{
    /// Starts a builder for a cache holding at most `capacity` values.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            fetch: None,
            evict: None,
        }
    }

    /// Sets the resident-entry capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the callback that produces values for missing keys. Required.
    pub fn fetch<F>(mut self, fetch: F) -> Self
    where
        F: FnMut(&K) -> Result<V, E> + Send + 'static,
    {
        self.fetch = Some(Box::new(fetch));
        self
    }

    /// Sets the callback invoked before a resident entry is evicted.
    ///
    /// Defaults to a no-op that always succeeds.
    pub fn on_evict<D>(mut self, evict: D) -> Self
    where
        D: FnMut(&K, &V) -> Result<(), E> + Send + 'static,
    {
        self.evict = Some(Box::new(evict));
        self
    }

    /// Validates the configuration and builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no fetch callback was set or the capacity
    /// is zero.
    pub fn try_build(self) -> Result<ArcCache<K, V, FnSource<K, V, E>>, ConfigError> {
        let fetch = self
            .fetch
            .ok_or_else(|| ConfigError::new("a fetch callback is required"))?;
        ArcCache::try_new(self.capacity, FnSource::from_boxed(fetch, self.evict))
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics on invalid configuration. See [`try_build`](Self::try_build).
    pub fn build(self) -> ArcCache<K, V, FnSource<K, V, E>> {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<K, V, E> fmt::Debug for ArcCacheBuilder<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCacheBuilder")
            .field("capacity", &self.capacity)
            .field("has_fetch", &self.fetch.is_some())
            .field("has_evict", &self.evict.is_some())
            .finish()
    }
}
