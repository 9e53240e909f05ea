//! Process-wide configuration using Figment
//!
//! Configuration is loaded from multiple sources with the following
//! precedence (highest to lowest):
//! 1. Environment variables (prefix: PAGENAV_)
//! 2. Current working directory: ./pagenav.toml
//! 3. Default values (no defaults configured)
//!
//! The loaded value is installed once at application start-up and read
//! lock-free afterwards; it is the last stop of the codec's
//! default-resolution chain, behind explicit encode options and the
//! per-entity registry.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::query::{OrderSpec, SortOrder};

/// Process-wide pagination defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavConfig {
    /// Default page size / limit applied when no entity-level default
    /// exists
    #[serde(default)]
    pub default_limit: Option<u64>,

    /// Fields of the default order
    #[serde(default)]
    pub default_order_by: Vec<String>,

    /// Directions of the default order (pairwise with `default_order_by`)
    #[serde(default)]
    pub default_order_directions: Vec<SortOrder>,
}

static GLOBAL: OnceCell<NavConfig> = OnceCell::new();

impl NavConfig {
    /// Load configuration from `./pagenav.toml` and `PAGENAV_*` env vars
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when a provider value fails to
    /// deserialize.
    pub fn load() -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file("pagenav.toml"))
            .merge(Env::prefixed("PAGENAV_"))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file plus env vars
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("PAGENAV_"))
            .extract()?;
        Ok(config)
    }

    /// The configured default order, if any fields are set
    #[must_use]
    pub fn default_order(&self) -> Option<OrderSpec> {
        if self.default_order_by.is_empty() {
            return None;
        }
        Some(OrderSpec::new(
            self.default_order_by.clone(),
            self.default_order_directions.clone(),
        ))
    }

    /// Install this configuration as the process-wide snapshot
    ///
    /// Installation happens once; a second call keeps the existing
    /// snapshot, because configuration mutation is confined to start-up.
    pub fn install(self) {
        if GLOBAL.set(self).is_err() {
            tracing::warn!("pagination configuration already installed; keeping the existing one");
        } else {
            tracing::debug!("pagination configuration installed");
        }
    }

    /// The installed process-wide configuration, if any
    #[must_use]
    pub fn global() -> Option<&'static NavConfig> {
        GLOBAL.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_has_no_defaults() {
        let config = NavConfig::default();
        assert!(config.default_limit.is_none());
        assert!(config.default_order().is_none());
    }

    #[test]
    fn test_default_order_pairs_fields_and_directions() {
        let config = NavConfig {
            default_limit: None,
            default_order_by: vec!["name".to_string(), "age".to_string()],
            default_order_directions: vec![SortOrder::Asc, SortOrder::Desc],
        };
        let order = config.default_order().unwrap();
        assert_eq!(order.fields, vec!["name", "age"]);
        assert_eq!(order.directions, vec![SortOrder::Asc, SortOrder::Desc]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "default_limit = 50\ndefault_order_by = [\"id\"]\ndefault_order_directions = [\"desc\"]"
        )
        .unwrap();

        let config = NavConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_limit, Some(50));
        assert_eq!(config.default_order_by, vec!["id"]);
        assert_eq!(config.default_order_directions, vec![SortOrder::Desc]);
    }

    #[test]
    fn test_install_and_global() {
        NavConfig {
            default_limit: Some(77),
            default_order_by: Vec::new(),
            default_order_directions: Vec::new(),
        }
        .install();

        // A second install keeps the first snapshot.
        NavConfig::default().install();

        let global = NavConfig::global().unwrap();
        assert_eq!(global.default_limit, Some(77));
    }
}
