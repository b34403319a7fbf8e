//! Catalogue configuration loaded from TOML

use pcat_cache::CacheConfig;
use pcat_paging::PagingConfig;
use pcat_subtype::{DomainMapping, DomainTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but violates a constraint
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one catalogue screen
///
/// ```toml
/// [paging]
/// page_size = 25
///
/// [cache]
/// first_batch_size = 200
///
/// [[domains]]
/// tag = "brake"
/// id_field = "id"
/// leaves_field = "brakeSubTypes"
/// leaf_id_field = "brakeSubTypeId"
/// name_field = "nameEn"
/// alt_name_field = "nameAr"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Paging settings for every engine and loader on the screen
    pub paging: PagingConfig,
    /// Option cache settings
    pub cache: CacheConfig,
    /// Extra or overriding domain rows, merged over the built-in table
    pub domains: Vec<DomainMapping>,
}

impl CatalogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With paging settings
    #[inline]
    #[must_use]
    pub fn with_paging(mut self, paging: PagingConfig) -> Self {
        self.paging = paging;
        self
    }

    /// With cache settings
    #[inline]
    #[must_use]
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// With an additional domain row
    #[must_use]
    pub fn with_domain(mut self, mapping: DomainMapping) -> Self {
        self.domains.push(mapping);
        self
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::Invalid` if validation fails
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - otherwise as [`from_toml_str`](Self::from_toml_str)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check constraints serde cannot express
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paging.page_size == 0 {
            return Err(ConfigError::Invalid(
                "paging.page_size must be greater than zero".to_string(),
            ));
        }
        if self.cache.first_batch_size == 0 {
            return Err(ConfigError::Invalid(
                "cache.first_batch_size must be greater than zero".to_string(),
            ));
        }
        if self.cache.ttl_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "cache.ttl_ms must be greater than zero; omit it to disable expiry".to_string(),
            ));
        }
        if let Some(row) = self.domains.iter().find(|row| row.tag.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "domain row with leaves_field {:?} has an empty tag",
                row.leaves_field
            )));
        }
        Ok(())
    }

    /// Built-in domain table with configured rows applied
    #[must_use]
    pub fn domain_table(&self) -> DomainTable {
        self.domains
            .iter()
            .cloned()
            .fold(DomainTable::builtin(), DomainTable::with)
    }
}
