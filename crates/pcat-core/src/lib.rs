//! PCAT Core
//!
//! Facade over the option-loading crates: TOML configuration, tracing
//! setup and [`CatalogOptions`], the per-screen context that owns the
//! option cache and hands out engines and loaders.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcat_core::prelude::*;
//!
//! let config = CatalogConfig::load("catalogue.toml")?;
//! let options = CatalogOptions::new(registry, config);
//!
//! let engines = options.parent_loader("engine").await;
//! engines.load_initial().await;
//!
//! let subtypes = options.subtype_loader("engine", 10);
//! subtypes.set_search("turbo").await;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod context;
pub mod telemetry;

pub use config::{CatalogConfig, ConfigError};
pub use context::CatalogOptions;

/// Commonly used types
pub mod prelude {
    pub use crate::config::{CatalogConfig, ConfigError};
    pub use crate::context::CatalogOptions;
    pub use pcat_cache::{CacheConfig, CacheError, FetcherRegistry, OptionCache};
    pub use pcat_option::{
        FetchError, OptionValue, Page, PageFetcher, PageRequest, SelectOption, StaticFetcher,
    };
    pub use pcat_paging::{
        LoadOutcome, OptionListView, OptionSource, PaginationEngine, PagingConfig, SearchableLoader,
    };
    pub use pcat_subtype::{DomainMapping, DomainTable, SubTypeFetcher, SubTypeResolver};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
