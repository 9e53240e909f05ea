//! # pagenav
//!
//! Pagination, sorting, and filtering link engine for web UIs.
//!
//! `pagenav` computes the *values* behind pagination controls, sortable
//! tables, and filter forms: which query parameters a navigation target
//! carries, which page-number links to show, and which cursor each
//! previous/next link resolves to. It runs no queries and renders no
//! markup — the host framework turns the produced values into links or
//! navigation events.
//!
//! ## Features
//!
//! - **Query codec**: encode a [`query::ListQuery`] into ordered query
//!   parameters, omitting values equal to configured defaults
//! - **Path builder**: merge parameters into literal URIs, builder
//!   callables, registered helpers, or raw callbacks
//! - **Page-link planner**: windowed page-number sequences with ellipsis
//!   collapsing and previous/next state
//! - **Cursor resolver**: previous/next cursor links from result-set
//!   position metadata, including reversed lists
//! - **Default resolution**: explicit options, then per-entity registry,
//!   then process-wide configuration
//!
//! ## Example
//!
//! ```rust
//! use pagenav::prelude::*;
//!
//! // The state of the list view the user is looking at.
//! let query = ListQuery::new()
//!     .with_page(5)
//!     .with_page_size(20)
//!     .with_order("name", SortOrder::Asc);
//!
//! // Which page links should the control render?
//! let plan = plan(5, 10, PageWindow::Ellipsis(2));
//! assert_eq!(plan.previous, Some(4));
//!
//! // Where does the "page 6" link point?
//! let target = query.to_page(6);
//! let params = encode(&target, &EncodeOptions::new().with_default_limit(20));
//! let href = build_path(&PathSpec::uri("/pets"), params)?;
//! assert_eq!(href, "/pets?page=6&order_directions[]=asc&order_by[]=name");
//! # Ok::<(), pagenav::Error>(())
//! ```
//!
//! All operations are pure, synchronous computations over immutable
//! inputs and are safe to call concurrently; the configuration and
//! registries they read are installed once at start-up.

pub mod config;
pub mod cursor;
pub mod encode;
pub mod error;
pub mod meta;
pub mod pager;
pub mod params;
pub mod path;
pub mod query;
pub mod schema;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::NavConfig;
    pub use crate::cursor::{resolve, CursorLink, CursorNav, CursorParam};
    pub use crate::encode::{encode, EncodeOptions};
    pub use crate::error::{Error, Result};
    pub use crate::meta::PageMeta;
    pub use crate::pager::{plan, PagePlan, PageToken, PageWindow};
    pub use crate::params::{
        parse_query, pop_filter, to_query_string, ParamList, ParamValue, QueryParam,
    };
    pub use crate::path::{build_path, register_helper, PathArg, PathSpec};
    pub use crate::query::{
        FilterCondition, FilterOperator, FilterValue, ListQuery, OrderSpec, SortOrder,
    };
    pub use crate::schema::{entity_defaults, register_entity, EntityDefaults};
}
