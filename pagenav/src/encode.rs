//! Query codec: state to ordered query parameters
//!
//! [`encode`] turns a [`ListQuery`] into the ordered association-list form,
//! leaving out every value that equals a known default so URLs stay free
//! of default noise. The emission order is fixed and part of the
//! observable contract:
//!
//! ```rust
//! use pagenav::encode::{encode, EncodeOptions};
//! use pagenav::params::to_query_string;
//! use pagenav::query::{ListQuery, SortOrder};
//!
//! let query = ListQuery::new()
//!     .with_page(3)
//!     .with_page_size(10)
//!     .with_order("name", SortOrder::Desc)
//!     .with_order("age", SortOrder::Asc);
//!
//! let params = encode(&query, &EncodeOptions::new().with_default_limit(10));
//! assert_eq!(
//!     to_query_string(&params),
//!     "page=3&order_directions[]=desc&order_directions[]=asc&order_by[]=name&order_by[]=age"
//! );
//! ```
//!
//! Defaults resolve through an explicit chain — encode options, then the
//! per-entity registry, then the installed process configuration — and the
//! resolved values are passed down; no leaf function reads globals.

use crate::config::NavConfig;
use crate::params::{ParamEntries, ParamList, ParamValue, QueryParam, FILTERS_PARAM};
use crate::query::{FilterCondition, FilterValue, ListQuery, OrderSpec};
use crate::schema;

/// Options controlling default resolution during encoding
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions<'a> {
    /// Explicit default limit, overriding registry and config
    pub default_limit: Option<u64>,
    /// Explicit default order, overriding registry and config
    pub default_order: Option<OrderSpec>,
    /// Entity whose registered defaults apply
    pub entity: Option<&'a str>,
}

impl<'a> EncodeOptions<'a> {
    /// Create empty options (registry/config defaults still apply)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit default limit
    #[must_use]
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Set an explicit default order
    #[must_use]
    pub fn with_default_order(mut self, order: OrderSpec) -> Self {
        self.default_order = Some(order);
        self
    }

    /// Resolve defaults against the registration for this entity
    #[must_use]
    pub fn for_entity(mut self, entity: &'a str) -> Self {
        self.entity = Some(entity);
        self
    }
}

/// Defaults resolved once per encode call and passed down
#[derive(Debug, Clone, Default)]
struct ResolvedDefaults {
    limit: Option<u64>,
    order: Option<OrderSpec>,
}

/// Walk the resolution chain: explicit options, entity registry, installed
/// config, none.
fn resolve_defaults(opts: &EncodeOptions<'_>) -> ResolvedDefaults {
    let entity = opts.entity.and_then(schema::entity_defaults);
    let config = NavConfig::global();

    let limit = opts
        .default_limit
        .or_else(|| entity.as_ref().and_then(|e| e.limit))
        .or_else(|| config.and_then(|c| c.default_limit));

    let order = opts
        .default_order
        .clone()
        .or_else(|| entity.and_then(|e| e.order))
        .or_else(|| config.and_then(NavConfig::default_order));

    ResolvedDefaults { limit, order }
}

/// Encode a query state into the ordered parameter list
///
/// Emission rules, in this order:
/// 1. `offset` — only when present and not `0`
/// 2. `page` — only when present and not `1`
/// 3. `after`, `before` — whenever present (cursors have no default)
/// 4. `page_size`, `limit`, `first`, `last` — each only when not equal to
///    the resolved default limit
/// 5. `order_directions` + `order_by` — as a pair, only when the pair
///    differs from the resolved default order; never individually
/// 6. `filters` — whenever non-empty, as dense-indexed entries
///
/// The input state is not modified; the output preserves this order.
///
/// # Example
///
/// ```rust
/// use pagenav::encode::{encode, EncodeOptions};
/// use pagenav::query::ListQuery;
///
/// // Values equal to the built-in defaults are omitted entirely.
/// let query = ListQuery::new().with_page(1).with_offset(0);
/// assert!(encode(&query, &EncodeOptions::new()).is_empty());
/// ```
#[must_use]
pub fn encode(query: &ListQuery, opts: &EncodeOptions<'_>) -> ParamList {
    let defaults = resolve_defaults(opts);
    let mut params = ParamList::new();

    if let Some(offset) = query.offset {
        if offset != 0 {
            params.push(QueryParam::scalar("offset", offset));
        }
    }
    if let Some(page) = query.page {
        if page != 1 {
            params.push(QueryParam::scalar("page", page));
        }
    }
    if let Some(after) = &query.after {
        params.push(QueryParam::scalar("after", after));
    }
    if let Some(before) = &query.before {
        params.push(QueryParam::scalar("before", before));
    }
    for (name, value) in [
        ("page_size", query.page_size),
        ("limit", query.limit),
        ("first", query.first),
        ("last", query.last),
    ] {
        if let Some(value) = value {
            if defaults.limit != Some(value) {
                params.push(QueryParam::scalar(name, value));
            }
        }
    }

    if !query.order_by.is_empty() {
        let order = query.order_spec();
        if defaults.order.as_ref() != Some(&order) {
            params.push(QueryParam::list(
                "order_directions",
                order
                    .directions
                    .iter()
                    .map(|d| d.as_str().to_string())
                    .collect(),
            ));
            params.push(QueryParam::list("order_by", order.fields));
        }
    }

    if !query.filters.is_empty() {
        params.push(QueryParam::entries(
            FILTERS_PARAM,
            query.filters.iter().map(filter_entries).collect(),
        ));
    }

    params
}

/// Plain-field projection of a filter: field, op, value
///
/// The internal `default` marker is dropped; a `Null` value contributes no
/// `value` key at all.
fn filter_entries(filter: &FilterCondition) -> ParamEntries {
    let mut entry = vec![
        ("field".to_string(), ParamValue::Scalar(filter.field.clone())),
        (
            "op".to_string(),
            ParamValue::Scalar(filter.op.token().to_string()),
        ),
    ];
    if let Some(value) = filter_value_param(&filter.value) {
        entry.push(("value".to_string(), value));
    }
    entry
}

fn filter_value_param(value: &FilterValue) -> Option<ParamValue> {
    match value {
        FilterValue::String(v) => Some(ParamValue::Scalar(v.clone())),
        FilterValue::Integer(v) => Some(ParamValue::Scalar(v.to_string())),
        FilterValue::Float(v) => Some(ParamValue::Scalar(v.to_string())),
        FilterValue::Boolean(v) => Some(ParamValue::Scalar(v.to_string())),
        FilterValue::StringList(vs) => Some(ParamValue::List(vs.clone())),
        FilterValue::IntegerList(vs) => Some(ParamValue::List(
            vs.iter().map(ToString::to_string).collect(),
        )),
        FilterValue::Null => None,
    }
}
