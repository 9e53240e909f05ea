//! Position metadata for a fetched result page
//!
//! [`PageMeta`] is produced per request by the query executor that ran the
//! list query; this crate only reads it to decide which navigation links
//! exist and where they point.

use serde::{Deserialize, Serialize};

/// Where the current result page sits within the full result set
///
/// Counts and cursors are optional because not every pagination style
/// produces them: offset-based queries fill the page/count fields,
/// cursor-based queries fill the cursor/flag fields. A non-empty `errors`
/// means the query state failed validation upstream and no position field
/// can be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// Offset of the first result on the current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_offset: Option<u64>,

    /// Current page number, 1-indexed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,

    /// Total number of matching results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    /// Total number of pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,

    /// Whether results exist before the current page
    #[serde(default)]
    pub has_previous_page: bool,

    /// Whether results exist after the current page
    #[serde(default)]
    pub has_next_page: bool,

    /// Cursor of the first result on the current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,

    /// Cursor of the last result on the current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,

    /// Validation errors reported by the query executor
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl PageMeta {
    /// True when the upstream query state failed validation
    ///
    /// With errors present the cursors and flags carry no meaning and all
    /// navigation derived from this value degrades to the disabled state.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
