//! Cursor-based previous/next link resolution
//!
//! Maps a result page's position metadata onto the two cursor navigation
//! links. Each link knows its parameter name, the cursor it carries, and
//! whether it is enabled; a disabled link is still emitted for layout
//! consistency but carries no cursor.

use serde::{Deserialize, Serialize};

use crate::meta::PageMeta;
use crate::query::ListQuery;

/// The cursor parameter a link writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorParam {
    /// Continue after a cursor (forward)
    After,
    /// Stop before a cursor (backward)
    Before,
}

impl CursorParam {
    /// Wire name of the parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Before => "before",
        }
    }
}

/// One resolved cursor navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorLink {
    /// Which cursor parameter the link writes
    pub param: CursorParam,
    /// The cursor value; always `None` when disabled
    pub cursor: Option<String>,
    /// Whether the link navigates at all
    pub enabled: bool,
}

impl CursorLink {
    fn disabled(param: CursorParam) -> Self {
        Self {
            param,
            cursor: None,
            enabled: false,
        }
    }

    fn resolved(param: CursorParam, cursor: Option<String>, available: bool) -> Self {
        // A flag without a cursor cannot navigate.
        let enabled = available && cursor.is_some();
        Self {
            param,
            cursor: if enabled { cursor } else { None },
            enabled,
        }
    }

    /// Apply this link to a query state, producing the target state
    ///
    /// Disabled links return the state unchanged (there is nowhere to go).
    #[must_use]
    pub fn apply(&self, query: ListQuery) -> ListQuery {
        match (&self.cursor, self.param) {
            (Some(cursor), CursorParam::After) => query.after_cursor(cursor.clone()),
            (Some(cursor), CursorParam::Before) => query.before_cursor(cursor.clone()),
            (None, _) => query,
        }
    }
}

/// The two cursor navigation slots of a pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorNav {
    /// The visually-previous slot; writes `before`
    pub previous: CursorLink,
    /// The visually-next slot; writes `after`
    pub next: CursorLink,
}

/// Resolve both cursor links from position metadata
///
/// Without `reverse`, previous carries the start cursor (enabled by
/// `has_previous_page`) and next carries the end cursor (enabled by
/// `has_next_page`). With `reverse` the slots swap the metadata that feeds
/// them while keeping their slot-local parameter: moving visually backward
/// through a reversed list is moving semantically forward. Metadata with
/// validation errors disables both slots — the position cannot be trusted.
///
/// # Example
///
/// ```rust
/// use pagenav::cursor::resolve;
/// use pagenav::meta::PageMeta;
///
/// let meta = PageMeta {
///     has_next_page: true,
///     end_cursor: Some("E".to_string()),
///     ..PageMeta::default()
/// };
///
/// let nav = resolve(&meta, false);
/// assert!(!nav.previous.enabled);
/// assert!(nav.next.enabled);
/// assert_eq!(nav.next.cursor.as_deref(), Some("E"));
/// ```
#[must_use]
pub fn resolve(meta: &PageMeta, reverse: bool) -> CursorNav {
    if meta.has_errors() {
        tracing::debug!(
            errors = meta.errors.len(),
            "cursor links disabled: position metadata failed validation"
        );
        return CursorNav {
            previous: CursorLink::disabled(CursorParam::Before),
            next: CursorLink::disabled(CursorParam::After),
        };
    }

    let forward = (meta.end_cursor.clone(), meta.has_next_page);
    let backward = (meta.start_cursor.clone(), meta.has_previous_page);
    let (previous_src, next_src) = if reverse {
        (forward, backward)
    } else {
        (backward, forward)
    };

    CursorNav {
        previous: CursorLink::resolved(CursorParam::Before, previous_src.0, previous_src.1),
        next: CursorLink::resolved(CursorParam::After, next_src.0, next_src.1),
    }
}
