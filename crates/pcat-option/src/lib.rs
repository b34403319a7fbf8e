//! PCAT Option Types
//!
//! The vocabulary shared by every option-loading component:
//!
//! - [`SelectOption`]: an immutable `{ value, label }` pair shown in a dropdown
//! - [`Page`] / [`PageRequest`]: one page of results and the request for it
//! - [`PageFetcher`]: the async capability that serves pages for one data domain
//! - [`StaticFetcher`] / [`FnFetcher`]: in-memory and closure-backed fetchers
//!
//! # Example
//!
//! ```rust,ignore
//! use pcat_option::{PageFetcher, PageRequest, SelectOption, StaticFetcher};
//!
//! # async fn example() -> Result<(), pcat_option::FetchError> {
//! let fetcher = StaticFetcher::new(vec![
//!     SelectOption::new(1, "Sleeper cabin"),
//!     SelectOption::new(2, "Day cabin"),
//! ]);
//!
//! let page = fetcher.fetch(PageRequest::new(1, 10).with_search("sleeper")).await?;
//! assert_eq!(page.items.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod fetcher;
pub mod option;
pub mod page;

// Re-exports for convenience
pub use error::FetchError;
pub use fetcher::{FnFetcher, PageFetcher, Searchable, StaticFetcher};
pub use option::{OptionValue, SelectOption};
pub use page::{Page, PageRequest};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
