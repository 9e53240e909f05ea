//! Pagination/sort/filter state for list views
//!
//! [`ListQuery`] is the immutable description of one query attempt: where
//! the caller is in the result set (offset/page or cursor fields), how the
//! results are ordered, and which filters apply. All methods consume or
//! borrow the value and return a new one; nothing mutates in place.
//!
//! # Example
//!
//! ```rust
//! use pagenav::query::{FilterCondition, ListQuery, SortOrder};
//!
//! let query = ListQuery::new()
//!     .with_page(2)
//!     .with_page_size(25)
//!     .with_order("inserted_at", SortOrder::Desc)
//!     .with_filter(FilterCondition::eq("status", "active"));
//!
//! assert_eq!(query.page, Some(2));
//! assert_eq!(query.order_direction_for("inserted_at"), Some(SortOrder::Desc));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction for ordered queries
///
/// # Example
///
/// ```rust
/// use pagenav::query::SortOrder;
///
/// assert_eq!(format!("{}", SortOrder::Asc), "asc");
/// assert_eq!(SortOrder::Desc.reverse(), SortOrder::Asc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl SortOrder {
    /// Flip the direction
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Stable wire token ("asc" / "desc")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order specification: fields paired with directions
///
/// The two vectors are pairwise: `directions[i]` applies to `fields[i]`.
/// Used both for a query's current order and for configured default orders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Field identifiers, highest priority first
    pub fields: Vec<String>,
    /// Direction per field
    pub directions: Vec<SortOrder>,
}

impl OrderSpec {
    /// Create an order spec from paired fields and directions
    #[must_use]
    pub fn new(fields: Vec<String>, directions: Vec<SortOrder>) -> Self {
        Self { fields, directions }
    }

    /// True when no order fields are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Comparison operators for filter conditions
///
/// Each operator carries a stable wire token used in query-string
/// encoding.
///
/// # Example
///
/// ```rust
/// use pagenav::query::FilterOperator;
///
/// assert_eq!(FilterOperator::Equal.token(), "eq");
/// assert_eq!(FilterOperator::GreaterThanOrEqual.token(), "gte");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Equal to
    #[serde(rename = "eq")]
    Equal,
    /// Not equal to
    #[serde(rename = "ne")]
    NotEqual,
    /// Greater than
    #[serde(rename = "gt")]
    GreaterThan,
    /// Greater than or equal to
    #[serde(rename = "gte")]
    GreaterThanOrEqual,
    /// Less than
    #[serde(rename = "lt")]
    LessThan,
    /// Less than or equal to
    #[serde(rename = "lte")]
    LessThanOrEqual,
    /// Pattern matching
    #[serde(rename = "like")]
    Like,
    /// Value is in a list
    #[serde(rename = "in")]
    In,
    /// Value is absent
    #[serde(rename = "is_null")]
    IsNull,
    /// Value is present
    #[serde(rename = "is_not_null")]
    IsNotNull,
}

impl FilterOperator {
    /// Stable wire token for query-string encoding
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqual => "gte",
            Self::LessThan => "lt",
            Self::LessThanOrEqual => "lte",
            Self::Like => "like",
            Self::In => "in",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A value that can appear in a filter condition
///
/// # Example
///
/// ```rust
/// use pagenav::query::FilterValue;
///
/// let string_val: FilterValue = "active".into();
/// let int_val: FilterValue = 42_i64.into();
/// let list_val: FilterValue = vec!["a".to_string(), "b".to_string()].into();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// String value
    String(String),
    /// 64-bit integer value
    Integer(i64),
    /// 64-bit floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// List of string values (for the `In` operator)
    StringList(Vec<String>),
    /// List of integer values (for the `In` operator)
    IntegerList(Vec<i64>),
    /// No value (for `IsNull` / `IsNotNull`)
    Null,
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(list: Vec<String>) -> Self {
        Self::StringList(list)
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(list: Vec<i64>) -> Self {
        Self::IntegerList(list)
    }
}

/// A single filter condition on a list query
///
/// The `default` marker records that the condition came from a
/// preconfigured default rather than user input; it is internal-only and
/// never appears in any wire projection.
///
/// # Example
///
/// ```rust
/// use pagenav::query::FilterCondition;
///
/// let status = FilterCondition::eq("status", "active");
/// let adults = FilterCondition::gte("age", 18);
/// let name = FilterCondition::like("name", "%smith%");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// The field name to filter on
    pub field: String,
    /// The comparison operator
    pub op: FilterOperator,
    /// The value to compare against
    pub value: FilterValue,
    /// Internal marker: the condition came from a configured default
    #[serde(skip)]
    pub default: bool,
}

impl FilterCondition {
    /// Create a new filter condition
    pub fn new(field: impl Into<String>, op: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
            default: false,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equal, value.into())
    }

    /// Create a not-equal filter
    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::NotEqual, value.into())
    }

    /// Create a greater-than filter
    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::GreaterThan, value.into())
    }

    /// Create a greater-than-or-equal filter
    pub fn gte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::GreaterThanOrEqual, value.into())
    }

    /// Create a less-than filter
    pub fn lt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::LessThan, value.into())
    }

    /// Create a less-than-or-equal filter
    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::LessThanOrEqual, value.into())
    }

    /// Create a LIKE pattern filter
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Like, FilterValue::String(pattern.into()))
    }

    /// Create an IN list filter for strings
    pub fn in_strings(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, FilterOperator::In, FilterValue::StringList(values))
    }

    /// Create an IN list filter for integers
    pub fn in_integers(field: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(field, FilterOperator::In, FilterValue::IntegerList(values))
    }

    /// Create an IS NULL filter
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNull, FilterValue::Null)
    }

    /// Create an IS NOT NULL filter
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNotNull, FilterValue::Null)
    }

    /// Mark the condition as coming from a configured default
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Pagination/sort/filter state for one query attempt
///
/// At most one pagination style is meaningfully populated at a time —
/// offset/page for offset-based paging, first/last plus after/before for
/// cursor-based paging. The state does not enforce this; encoding emits
/// whatever is present.
///
/// # Example
///
/// ```rust
/// use pagenav::query::{ListQuery, SortOrder};
///
/// let query = ListQuery::new()
///     .with_page(3)
///     .with_page_size(20)
///     .with_order("name", SortOrder::Asc);
///
/// // Moving to another page keeps size, order, and filters.
/// let next = query.to_page(4);
/// assert_eq!(next.page, Some(4));
/// assert_eq!(next.page_size, Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Number of results to skip (offset-based paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Page number, 1-indexed (offset-based paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// Results per page (offset/page style)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,

    /// Maximum number of results (offset style)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Number of results from the start (cursor-based paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u64>,

    /// Number of results from the end (cursor-based paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u64>,

    /// Opaque cursor to continue after (forward cursor paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    /// Opaque cursor to stop before (backward cursor paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    /// Order fields, highest priority first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<String>,

    /// Direction per order field (pairwise with `order_by`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_directions: Vec<SortOrder>,

    /// Filter conditions, in application order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterCondition>,
}

impl ListQuery {
    /// Create a new empty query state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page number (1-indexed)
    #[must_use]
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the limit
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the forward cursor page size
    #[must_use]
    pub fn with_first(mut self, first: u64) -> Self {
        self.first = Some(first);
        self
    }

    /// Set the backward cursor page size
    #[must_use]
    pub fn with_last(mut self, last: u64) -> Self {
        self.last = Some(last);
        self
    }

    /// Append an order field with its direction
    #[must_use]
    pub fn with_order(mut self, field: impl Into<String>, direction: SortOrder) -> Self {
        self.order_by.push(field.into());
        self.order_directions.push(direction);
        self
    }

    /// Replace the whole order specification
    #[must_use]
    pub fn with_order_spec(mut self, order: OrderSpec) -> Self {
        self.order_by = order.fields;
        self.order_directions = order.directions;
        self
    }

    /// Append a filter condition
    #[must_use]
    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replace all filter conditions
    #[must_use]
    pub fn with_filters(mut self, filters: Vec<FilterCondition>) -> Self {
        self.filters = filters;
        self
    }

    /// The current order as an [`OrderSpec`]
    #[must_use]
    pub fn order_spec(&self) -> OrderSpec {
        OrderSpec::new(self.order_by.clone(), self.order_directions.clone())
    }

    /// The current direction of an order field, if it participates in the
    /// order at all
    ///
    /// Useful for rendering sort indicators on column headers.
    #[must_use]
    pub fn order_direction_for(&self, field: &str) -> Option<SortOrder> {
        self.order_by
            .iter()
            .position(|f| f == field)
            .map(|pos| self.order_directions.get(pos).copied().unwrap_or_default())
    }

    /// Clear every position field (offset, page, and both cursors)
    ///
    /// Page sizes and limits are retained: the caller is changing *where*
    /// in the result set it is, not how much it fetches.
    #[must_use]
    pub fn reset_position(mut self) -> Self {
        self.offset = None;
        self.page = None;
        self.after = None;
        self.before = None;
        self
    }

    /// Target a specific page (offset style), clearing cursor fields
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagenav::query::ListQuery;
    ///
    /// let query = ListQuery::new().with_page(1).to_page(5);
    /// assert_eq!(query.page, Some(5));
    /// assert!(query.after.is_none());
    /// ```
    #[must_use]
    pub fn to_page(mut self, page: u64) -> Self {
        self = self.reset_position();
        self.page = Some(page);
        self
    }

    /// Continue after a cursor (forward paging), clearing the opposite
    /// cursor and any offset position
    #[must_use]
    pub fn after_cursor(mut self, cursor: impl Into<String>) -> Self {
        self = self.reset_position();
        self.after = Some(cursor.into());
        self
    }

    /// Stop before a cursor (backward paging), clearing the opposite
    /// cursor and any offset position
    #[must_use]
    pub fn before_cursor(mut self, cursor: impl Into<String>) -> Self {
        self = self.reset_position();
        self.before = Some(cursor.into());
        self
    }

    /// Toggle the order on a column, the way a sortable table header does
    ///
    /// If `field` is already the primary order field its direction flips.
    /// Otherwise the field moves to the front with [`SortOrder::Asc`] and
    /// the remaining order fields keep their relative order after it. The
    /// position fields are cleared in both cases, because a changed order
    /// invalidates the current position in the result set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagenav::query::{ListQuery, SortOrder};
    ///
    /// let query = ListQuery::new()
    ///     .with_order("name", SortOrder::Asc)
    ///     .with_order("age", SortOrder::Desc);
    ///
    /// // Clicking the primary column flips it.
    /// let flipped = query.clone().push_order("name");
    /// assert_eq!(flipped.order_directions[0], SortOrder::Desc);
    ///
    /// // Clicking another column promotes it.
    /// let promoted = query.push_order("age");
    /// assert_eq!(promoted.order_by, vec!["age", "name"]);
    /// assert_eq!(promoted.order_directions[0], SortOrder::Asc);
    /// ```
    #[must_use]
    pub fn push_order(mut self, field: &str) -> Self {
        match self.order_by.iter().position(|f| f == field) {
            Some(0) => {
                if let Some(direction) = self.order_directions.first_mut() {
                    *direction = direction.reverse();
                } else {
                    self.order_directions.push(SortOrder::Desc);
                }
            }
            Some(pos) => {
                let promoted = self.order_by.remove(pos);
                if pos < self.order_directions.len() {
                    self.order_directions.remove(pos);
                }
                self.order_by.insert(0, promoted);
                self.order_directions.insert(0, SortOrder::Asc);
            }
            None => {
                self.order_by.insert(0, field.to_string());
                self.order_directions.insert(0, SortOrder::Asc);
            }
        }
        self.reset_position()
    }

    /// Remove the first filter matching `field`
    ///
    /// Returns the removed condition (if any) together with the updated
    /// state; the relative order of the remaining filters is preserved. A
    /// field with no matching filter returns `(None, unchanged)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagenav::query::{FilterCondition, ListQuery};
    ///
    /// let query = ListQuery::new()
    ///     .with_filter(FilterCondition::eq("status", "active"))
    ///     .with_filter(FilterCondition::gte("age", 18));
    ///
    /// let (removed, rest) = query.pop_filter("status");
    /// assert_eq!(removed.unwrap().field, "status");
    /// assert_eq!(rest.filters.len(), 1);
    /// assert_eq!(rest.filters[0].field, "age");
    /// ```
    #[must_use]
    pub fn pop_filter(mut self, field: &str) -> (Option<FilterCondition>, Self) {
        match self.filters.iter().position(|f| f.field == field) {
            Some(pos) => {
                let removed = self.filters.remove(pos);
                (Some(removed), self)
            }
            None => (None, self),
        }
    }
}
