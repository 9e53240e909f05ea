//! Per-entity default registry
//!
//! Applications register the default page size and default order of each
//! listable entity once at start-up; the query codec consults the registry
//! (after explicit options, before the process-wide config) to decide which
//! parameters are default noise and can be left out of URLs.
//!
//! Lookups are lock-free reads; registration must be confined to start-up,
//! before concurrent request handling begins.

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::query::OrderSpec;

/// Defaults registered for one entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityDefaults {
    /// Default page size / limit
    pub limit: Option<u64>,
    /// Default order
    pub order: Option<OrderSpec>,
}

impl EntityDefaults {
    /// Create empty defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default limit
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the default order
    #[must_use]
    pub fn with_order(mut self, order: OrderSpec) -> Self {
        self.order = Some(order);
        self
    }
}

static REGISTRY: Lazy<DashMap<String, EntityDefaults>> = Lazy::new(DashMap::new);

/// Register defaults for an entity, replacing any previous registration
///
/// # Example
///
/// ```rust
/// use pagenav::query::{OrderSpec, SortOrder};
/// use pagenav::schema::{entity_defaults, register_entity, EntityDefaults};
///
/// register_entity(
///     "pets",
///     EntityDefaults::new()
///         .with_limit(20)
///         .with_order(OrderSpec::new(vec!["name".to_string()], vec![SortOrder::Asc])),
/// );
///
/// assert_eq!(entity_defaults("pets").unwrap().limit, Some(20));
/// assert!(entity_defaults("owners").is_none());
/// ```
pub fn register_entity(name: impl Into<String>, defaults: EntityDefaults) {
    REGISTRY.insert(name.into(), defaults);
}

/// Look up the defaults registered for an entity
#[must_use]
pub fn entity_defaults(name: &str) -> Option<EntityDefaults> {
    REGISTRY.get(name).map(|entry| entry.value().clone())
}
