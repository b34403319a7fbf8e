//! PCAT Sub-Type Resolution
//!
//! Catalogue parent records (cabins, engines, axles, transmissions) each
//! carry a nested list of sub types. A [`DomainTable`] names the fields per
//! domain; [`SubTypeResolver`] uses it to search and page one parent's sub
//! types without any per-domain code.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod domain;
pub mod resolver;

pub use domain::{DomainMapping, DomainTable, Leaf};
pub use resolver::{SubTypeFetcher, SubTypeResolver};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
