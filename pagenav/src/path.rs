//! Destination builder: from a path specification and parameters to a
//! final navigation target
//!
//! A [`PathSpec`] describes where a link should point in one of four
//! forms: a literal URI, a path-builder callable with preset arguments, a
//! registered helper referenced by name, or a raw callback that receives
//! only the parameter list. [`build_path`] applies the parameters produced
//! by the query codec and returns the destination string.
//!
//! # Example
//!
//! ```rust
//! use pagenav::params::QueryParam;
//! use pagenav::path::{build_path, PathSpec};
//!
//! let spec = PathSpec::uri("/pets?category=dogs");
//! let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
//! assert_eq!(destination, "/pets?category=dogs&page=2");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::params::{encode_key, parse_query, to_query_string, ParamList, QueryParam};

/// One preset argument of a path-builder callable
#[derive(Debug, Clone)]
pub enum PathArg {
    /// A fixed positional value, e.g. a path segment or record id
    Segment(String),
    /// A parameter mapping; when last, new parameters merge into it
    Params(ParamList),
}

impl PathArg {
    /// Create a segment argument
    pub fn segment(value: impl Into<String>) -> Self {
        Self::Segment(value.into())
    }
}

/// A path-builder callable: receives the final argument sequence
pub type BuilderFn = Arc<dyn Fn(&[PathArg]) -> String + Send + Sync>;

/// A raw callback receiving only the parameter list
pub type CallbackFn = Arc<dyn Fn(&[QueryParam]) -> String + Send + Sync>;

/// Where a navigation link points
///
/// The four forms mirror the ways an application names a destination:
/// a literal URI, a closure it owns, a helper registered under a qualified
/// name at start-up, or a callback that takes full control of rendering
/// the parameters into a string.
#[derive(Clone)]
pub enum PathSpec {
    /// Literal URI; parameters merge into any existing query component
    Uri(String),
    /// Callable plus preset arguments; parameters merge into a trailing
    /// params argument or are appended as one
    Builder {
        /// The callable producing the destination
        build: BuilderFn,
        /// Preset positional arguments
        args: Vec<PathArg>,
    },
    /// Registered helper dispatched by qualified name, same argument
    /// handling as `Builder`
    Registered {
        /// Name the helper was registered under
        name: String,
        /// Preset positional arguments
        args: Vec<PathArg>,
    },
    /// Unary callback receiving only the parameters; no merge step
    Callback(CallbackFn),
}

impl PathSpec {
    /// Create a literal-URI spec
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    /// Create a builder spec from a callable and preset arguments
    pub fn builder<F>(build: F, args: Vec<PathArg>) -> Self
    where
        F: Fn(&[PathArg]) -> String + Send + Sync + 'static,
    {
        Self::Builder {
            build: Arc::new(build),
            args,
        }
    }

    /// Create a spec referencing a registered helper by name
    pub fn registered(name: impl Into<String>, args: Vec<PathArg>) -> Self {
        Self::Registered {
            name: name.into(),
            args,
        }
    }

    /// Create a raw-callback spec
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&[QueryParam]) -> String + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(callback))
    }
}

impl fmt::Debug for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => f.debug_tuple("Uri").field(uri).finish(),
            Self::Builder { args, .. } => f
                .debug_struct("Builder")
                .field("args", args)
                .finish_non_exhaustive(),
            Self::Registered { name, args } => f
                .debug_struct("Registered")
                .field("name", name)
                .field("args", args)
                .finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

static HELPERS: Lazy<DashMap<String, BuilderFn>> = Lazy::new(DashMap::new);

/// Register a path helper under a qualified name
///
/// Registration belongs in application start-up, next to route setup;
/// lookups during request handling are lock-free reads.
///
/// # Example
///
/// ```rust
/// use pagenav::params::{to_query_string, QueryParam};
/// use pagenav::path::{build_path, register_helper, PathArg, PathSpec};
///
/// register_helper("doc::pet_path", |args| {
///     let id = match &args[0] {
///         PathArg::Segment(id) => id.clone(),
///         PathArg::Params(_) => String::new(),
///     };
///     let query = match args.last() {
///         Some(PathArg::Params(params)) => to_query_string(params),
///         _ => String::new(),
///     };
///     format!("/pets/{id}?{query}")
/// });
///
/// let spec = PathSpec::registered("doc::pet_path", vec![PathArg::segment("42")]);
/// let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
/// assert_eq!(destination, "/pets/42?page=2");
/// ```
pub fn register_helper<F>(name: impl Into<String>, helper: F)
where
    F: Fn(&[PathArg]) -> String + Send + Sync + 'static,
{
    HELPERS.insert(name.into(), Arc::new(helper));
}

/// Build the destination for a path specification and parameter list
///
/// - [`PathSpec::Uri`]: the parameters are right-merged over the URI's
///   existing query (new values win per parameter name) and the URI is
///   reassembled. Rebuilding the result with an empty parameter list
///   yields the same string.
/// - [`PathSpec::Builder`] / [`PathSpec::Registered`]: if the last preset
///   argument is a parameter mapping the new parameters merge into it,
///   otherwise they are appended as one final argument; the callable's
///   return value is passed through verbatim.
/// - [`PathSpec::Callback`]: invoked directly with the parameters.
///
/// # Errors
///
/// [`Error::UnknownPathHelper`] when a [`PathSpec::Registered`] name has
/// no registration — a programming error in the integrating application.
pub fn build_path(spec: &PathSpec, params: ParamList) -> Result<String> {
    match spec {
        PathSpec::Uri(uri) => Ok(merge_into_uri(uri, params)),
        PathSpec::Builder { build, args } => Ok(build(&merge_args(args, params))),
        PathSpec::Registered { name, args } => {
            // Clone the helper out so no registry guard is held while the
            // helper runs (it may itself build paths).
            let Some(helper) = HELPERS.get(name).map(|h| h.value().clone()) else {
                tracing::error!(helper = %name, "path helper is not registered");
                return Err(Error::UnknownPathHelper(name.clone()));
            };
            Ok(helper(&merge_args(args, params)))
        }
        PathSpec::Callback(callback) => Ok(callback(&params)),
    }
}

/// Merge new parameters into a preset argument sequence
fn merge_args(args: &[PathArg], params: ParamList) -> Vec<PathArg> {
    let mut merged = args.to_vec();
    match merged.last_mut() {
        Some(PathArg::Params(existing)) => {
            let base = std::mem::take(existing);
            *existing = merge_params(base, params);
        }
        _ => merged.push(PathArg::Params(params)),
    }
    merged
}

/// Right-merge two parameter lists: existing parameters survive unless the
/// new list carries the same name; new parameters keep their own order at
/// the end.
fn merge_params(existing: ParamList, params: ParamList) -> ParamList {
    let new_names: HashSet<String> = params.iter().map(|p| p.name.clone()).collect();
    existing
        .into_iter()
        .filter(|p| !new_names.contains(p.name.as_str()))
        .chain(params)
        .collect()
}

/// Merge parameters into a literal URI's query component
fn merge_into_uri(uri: &str, params: ParamList) -> String {
    let (base, fragment) = match uri.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (uri, None),
    };
    let (path, existing_query) = match base.split_once('?') {
        Some((path, query)) => (path, query),
        None => (base, ""),
    };

    // Keys are grouped by base parameter name so a new `order_by` replaces
    // every existing `order_by[]` pair and a new `filters` replaces the
    // whole indexed family.
    let new_names: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
    let kept: Vec<String> = parse_query(existing_query)
        .into_iter()
        .filter(|(key, _)| !new_names.contains(base_name(key)))
        .map(|(key, value)| format!("{}={}", encode_key(&key), urlencoding::encode(&value)))
        .collect();

    let appended = to_query_string(&params);
    let query = match (kept.is_empty(), appended.is_empty()) {
        (true, true) => String::new(),
        (false, true) => kept.join("&"),
        (true, false) => appended,
        (false, false) => format!("{}&{}", kept.join("&"), appended),
    };

    let mut destination = path.to_string();
    if !query.is_empty() {
        destination.push('?');
        destination.push_str(&query);
    }
    if let Some(fragment) = fragment {
        destination.push('#');
        destination.push_str(fragment);
    }
    destination
}

/// The parameter name before any index brackets
fn base_name(key: &str) -> &str {
    key.split('[').next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_uri_without_query() {
        let spec = PathSpec::uri("/pets");
        let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
        assert_eq!(destination, "/pets?page=2");
    }

    #[test]
    fn test_uri_preserves_existing_params() {
        let spec = PathSpec::uri("/pets?category=dogs&page=9");
        let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
        // category survives, the stale page is replaced.
        assert_eq!(destination, "/pets?category=dogs&page=2");
    }

    #[test]
    fn test_uri_replaces_whole_bracket_family() {
        let spec = PathSpec::uri("/pets?order_by[]=age&order_by[]=name&category=dogs");
        let destination = build_path(
            &spec,
            vec![QueryParam::list("order_by", vec!["id".to_string()])],
        )
        .unwrap();
        assert_eq!(destination, "/pets?category=dogs&order_by[]=id");
    }

    #[test]
    fn test_uri_empty_params_is_identity() {
        let spec = PathSpec::uri("/pets?category=dogs&page=2");
        let destination = build_path(&spec, Vec::new()).unwrap();
        assert_eq!(destination, "/pets?category=dogs&page=2");
    }

    #[test]
    fn test_uri_rebuild_is_idempotent() {
        let params = vec![
            QueryParam::scalar("page", 2),
            QueryParam::entries(
                "filters",
                vec![vec![
                    ("field".to_string(), ParamValue::Scalar("name".to_string())),
                    ("op".to_string(), ParamValue::Scalar("like".to_string())),
                    ("value".to_string(), ParamValue::Scalar("a b".to_string())),
                ]],
            ),
        ];
        let first = build_path(&PathSpec::uri("/pets?category=dogs"), params).unwrap();
        let second = build_path(&PathSpec::uri(first.clone()), Vec::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_uri_keeps_fragment() {
        let spec = PathSpec::uri("/pets?category=dogs#list");
        let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
        assert_eq!(destination, "/pets?category=dogs&page=2#list");
    }

    #[test]
    fn test_builder_appends_params_argument() {
        let spec = PathSpec::builder(
            |args| {
                assert_eq!(args.len(), 2);
                let PathArg::Segment(id) = &args[0] else {
                    panic!("expected segment");
                };
                let PathArg::Params(params) = &args[1] else {
                    panic!("expected params");
                };
                format!("/pets/{id}?{}", to_query_string(params))
            },
            vec![PathArg::segment("42")],
        );

        let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
        assert_eq!(destination, "/pets/42?page=2");
    }

    #[test]
    fn test_builder_merges_into_trailing_params() {
        let spec = PathSpec::builder(
            |args| {
                let PathArg::Params(params) = args.last().unwrap() else {
                    panic!("expected params");
                };
                format!("/pets?{}", to_query_string(params))
            },
            vec![PathArg::Params(vec![
                QueryParam::scalar("category", "dogs"),
                QueryParam::scalar("page", 9),
            ])],
        );

        let destination = build_path(&spec, vec![QueryParam::scalar("page", 2)]).unwrap();
        // New page wins; category survives.
        assert_eq!(destination, "/pets?category=dogs&page=2");
    }

    #[test]
    fn test_registered_helper_dispatch() {
        register_helper("path_test::pet_path", |args| {
            let PathArg::Params(params) = args.last().unwrap() else {
                panic!("expected params");
            };
            format!("/pets?{}", to_query_string(params))
        });

        let spec = PathSpec::registered("path_test::pet_path", Vec::new());
        let destination = build_path(&spec, vec![QueryParam::scalar("page", 3)]).unwrap();
        assert_eq!(destination, "/pets?page=3");
    }

    #[test]
    fn test_unregistered_helper_is_error() {
        let spec = PathSpec::registered("path_test::never_registered", Vec::new());
        let err = build_path(&spec, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownPathHelper(name) if name.contains("never_registered")));
    }

    #[test]
    fn test_callback_receives_params_only() {
        let spec = PathSpec::callback(|params| {
            // The callback owns the split between path and query.
            let page = params
                .iter()
                .find(|p| p.name == "page")
                .map(|p| match &p.value {
                    ParamValue::Scalar(v) => v.clone(),
                    _ => String::new(),
                })
                .unwrap_or_default();
            format!("/pets/page/{page}")
        });

        let destination = build_path(&spec, vec![QueryParam::scalar("page", 7)]).unwrap();
        assert_eq!(destination, "/pets/page/7");
    }

    #[test]
    fn test_roundtrip_preserves_encoded_and_existing_params() {
        use crate::encode::{encode, EncodeOptions};
        use crate::query::{FilterCondition, ListQuery, SortOrder};

        let query = ListQuery::new()
            .with_page(3)
            .with_page_size(25)
            .with_order("name", SortOrder::Desc)
            .with_filter(FilterCondition::like("name", "a b"));

        let params = encode(&query, &EncodeOptions::new());
        let encoded_pairs: Vec<(String, String)> = parse_query(&to_query_string(&params));

        let destination = build_path(&PathSpec::uri("/pets?category=dogs"), params).unwrap();
        let (_, built_query) = destination.split_once('?').unwrap();
        let built_pairs = parse_query(built_query);

        // Every encoded pair survives into the destination...
        for pair in &encoded_pairs {
            assert!(built_pairs.contains(pair), "missing pair {pair:?}");
        }
        // ...and pre-existing parameters not touched by the encoding stay.
        assert!(built_pairs.contains(&("category".to_string(), "dogs".to_string())));
    }

    #[test]
    fn test_debug_formatting_names_variants() {
        let uri = format!("{:?}", PathSpec::uri("/pets"));
        assert!(uri.contains("Uri"));
        let callback = format!("{:?}", PathSpec::callback(|_| String::new()));
        assert!(callback.contains("Callback"));
    }
}
