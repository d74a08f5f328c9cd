//! arckit: an Adaptive Replacement Cache with fallible fetch/evict callbacks.
//!
//! [`ArcCache`](policy::arc::ArcCache) produces values through a
//! [`ValueSource`](traits::ValueSource) and reports evictions back to it. A
//! `get` whose callback fails leaves the cache exactly as it was.
//!
//! ```
//! use arckit::prelude::*;
//!
//! let mut cache = ArcCacheBuilder::<u32, u32, String>::new(2)
//!     .fetch(|key| Ok(key * 2))
//!     .build();
//!
//! assert_eq!(cache.get(&21), Ok(&42));
//! assert!(cache.contains(&21));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod source;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use builder::ArcCacheBuilder;
pub use error::GetError;
pub use policy::arc::ArcCache;
pub use traits::ValueSource;
