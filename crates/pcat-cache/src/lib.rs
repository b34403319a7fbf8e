//! PCAT Option Cache
//!
//! Loads a part type's options only when the user actually picks that part
//! type, and never twice for the same key until it is invalidated.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcat_cache::{CacheConfig, FetcherRegistry, OptionCache};
//!
//! let registry = FetcherRegistry::new()
//!     .with("cabin", cabin_fetcher)
//!     .with("engine", engine_fetcher);
//! let cache = OptionCache::new(registry, CacheConfig::default());
//!
//! let entry = cache.ensure_loaded("cabin").await?;
//! println!("{} cabin options", entry.options.len());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod registry;

pub use cache::{CacheConfig, CacheEntry, CacheStats, EntryState, OptionCache};
pub use error::CacheError;
pub use registry::FetcherRegistry;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
