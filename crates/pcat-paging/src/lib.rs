//! PCAT Paging
//!
//! Incremental option loading for dropdowns and data tables.
//!
//! # Core Concepts
//!
//! - [`PaginationEngine`]: accumulates pages, either slicing an in-memory
//!   sequence (client mode) or fetching pages (server mode)
//! - [`SearchableLoader`]: an engine bound to a live search string; the
//!   latest query always wins
//! - [`OptionSource`]: the view-plus-load-more surface display components use
//!
//! # Example
//!
//! ```rust,ignore
//! use pcat_paging::{PagingConfig, SearchableLoader};
//!
//! let loader = SearchableLoader::new(fetcher, PagingConfig::new().with_page_size(20));
//! loader.set_search("turbo").await;
//! loader.load_more_for_current_query().await;
//! let view = loader.view();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod engine;
mod search;
mod source;
mod state;

pub use config::PagingConfig;
pub use engine::{PaginationEngine, PagingMode};
pub use search::SearchableLoader;
pub use source::OptionSource;
pub use state::{LoadOutcome, OptionListView, PaginationState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
