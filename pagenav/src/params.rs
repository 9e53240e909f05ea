//! Ordered query parameters and their wire encoding
//!
//! The association-list form sits between the structured state and the
//! final URL: an ordered list of named parameters whose values are
//! scalars, sequences, or dense-indexed entry sets. The wire encoding is
//! the bracket style the companion query parser expects:
//!
//! ```text
//! offset=40
//! order_by[]=name&order_by[]=age
//! filters[0][field]=status&filters[0][op]=eq&filters[0][value]=active
//! ```
//!
//! Filter entries are held positionally ([`ParamValue::Entries`]) and the
//! integer indices materialize only at the wire boundary, so the dense
//! zero-based numbering can never develop holes.

use crate::error::{Error, Result};

/// Name of the filters parameter in the association-list form
pub const FILTERS_PARAM: &str = "filters";

/// The named fields of one indexed entry (e.g. one filter's projection)
pub type ParamEntries = Vec<(String, ParamValue)>;

/// A query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Single value: `name=value`
    Scalar(String),
    /// Ordered sequence: `name[]=v1&name[]=v2`
    List(Vec<String>),
    /// Dense-indexed entry sets: `name[0][k]=v&name[1][k]=v`; the vector
    /// position is the wire index
    Entries(Vec<ParamEntries>),
}

/// A named query parameter
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParam {
    /// Parameter name (without brackets)
    pub name: String,
    /// Parameter value
    pub value: ParamValue,
}

impl QueryParam {
    /// Create a scalar parameter
    pub fn scalar(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::Scalar(value.to_string()),
        }
    }

    /// Create a sequence parameter
    pub fn list(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::List(values),
        }
    }

    /// Create a dense-indexed parameter
    pub fn entries(name: impl Into<String>, entries: Vec<ParamEntries>) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::Entries(entries),
        }
    }
}

/// An ordered parameter list
pub type ParamList = Vec<QueryParam>;

/// Render a parameter list into its query-string wire form
///
/// Order is preserved; values are percent-encoded, names and brackets are
/// emitted literally.
///
/// # Example
///
/// ```rust
/// use pagenav::params::{to_query_string, QueryParam};
///
/// let params = vec![
///     QueryParam::scalar("page", 2),
///     QueryParam::list("order_by", vec!["name".to_string(), "age".to_string()]),
/// ];
/// assert_eq!(
///     to_query_string(&params),
///     "page=2&order_by[]=name&order_by[]=age"
/// );
/// ```
#[must_use]
pub fn to_query_string(params: &[QueryParam]) -> String {
    let mut pairs = Vec::new();
    for param in params {
        write_value(&mut pairs, &param.name, &param.value);
    }
    pairs.join("&")
}

fn write_value(pairs: &mut Vec<String>, key: &str, value: &ParamValue) {
    match value {
        ParamValue::Scalar(v) => pairs.push(format!("{key}={}", urlencoding::encode(v))),
        ParamValue::List(values) => {
            for v in values {
                pairs.push(format!("{key}[]={}", urlencoding::encode(v)));
            }
        }
        ParamValue::Entries(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                for (field, v) in entry {
                    write_value(pairs, &format!("{key}[{index}][{field}]"), v);
                }
            }
        }
    }
}

/// Percent-encode a raw pair key while keeping index brackets literal
#[must_use]
pub(crate) fn encode_key(key: &str) -> String {
    urlencoding::encode(key)
        .replace("%5B", "[")
        .replace("%5D", "]")
}

/// Decode a raw query component into ordered key/value pairs
///
/// Keys and values are percent-decoded; pairs without a `=` decode to an
/// empty value. Undecodable bytes fall back to the raw text.
#[must_use]
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = decode_component(parts.next().unwrap_or(""));
            let value = decode_component(parts.next().unwrap_or(""));
            (key, value)
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Remove the first filter entry matching `field` from a parameter list
///
/// Returns the removed entry (if any) together with the updated list. The
/// remaining entries keep their relative order; because entries are
/// positional, the wire indices renumber densely on the next encoding. A
/// list without a `filters` parameter is returned unchanged, and a
/// `filters` parameter that emptied out is dropped entirely.
///
/// # Errors
///
/// A `filters` parameter whose value is not [`ParamValue::Entries`] is a
/// programming error in the integrating application.
///
/// # Example
///
/// ```rust
/// use pagenav::params::{pop_filter, to_query_string, ParamValue, QueryParam};
///
/// let filters = vec![
///     vec![("field".to_string(), ParamValue::Scalar("status".to_string()))],
///     vec![("field".to_string(), ParamValue::Scalar("age".to_string()))],
///     vec![("field".to_string(), ParamValue::Scalar("name".to_string()))],
/// ];
/// let params = vec![QueryParam::entries("filters", filters)];
///
/// let (removed, rest) = pop_filter(params, "age").unwrap();
/// assert!(removed.is_some());
/// assert_eq!(
///     to_query_string(&rest),
///     "filters[0][field]=status&filters[1][field]=name"
/// );
/// ```
pub fn pop_filter(
    mut params: ParamList,
    field: &str,
) -> Result<(Option<ParamEntries>, ParamList)> {
    let Some(pos) = params.iter().position(|p| p.name == FILTERS_PARAM) else {
        return Ok((None, params));
    };

    let ParamValue::Entries(entries) = &mut params[pos].value else {
        return Err(Error::InvalidFilterShape(
            "filters must be a dense indexed mapping".to_string(),
        ));
    };

    let index = entries.iter().position(|entry| {
        entry
            .iter()
            .any(|(key, value)| key == "field" && matches!(value, ParamValue::Scalar(v) if v == field))
    });

    match index {
        Some(index) => {
            let removed = entries.remove(index);
            if entries.is_empty() {
                params.remove(pos);
            }
            Ok((Some(removed), params))
        }
        None => Ok((None, params)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_entry(field: &str, op: &str, value: &str) -> ParamEntries {
        vec![
            ("field".to_string(), ParamValue::Scalar(field.to_string())),
            ("op".to_string(), ParamValue::Scalar(op.to_string())),
            ("value".to_string(), ParamValue::Scalar(value.to_string())),
        ]
    }

    #[test]
    fn test_scalar_encoding() {
        let params = vec![QueryParam::scalar("offset", 40)];
        assert_eq!(to_query_string(&params), "offset=40");
    }

    #[test]
    fn test_list_encoding_preserves_order() {
        let params = vec![QueryParam::list(
            "order_by",
            vec!["name".to_string(), "age".to_string()],
        )];
        assert_eq!(to_query_string(&params), "order_by[]=name&order_by[]=age");
    }

    #[test]
    fn test_filters_encoding_dense_indices() {
        let params = vec![QueryParam::entries(
            "filters",
            vec![
                filter_entry("status", "eq", "active"),
                filter_entry("age", "gte", "18"),
            ],
        )];
        assert_eq!(
            to_query_string(&params),
            "filters[0][field]=status&filters[0][op]=eq&filters[0][value]=active\
             &filters[1][field]=age&filters[1][op]=gte&filters[1][value]=18"
        );
    }

    #[test]
    fn test_filter_list_value_encoding() {
        let entry = vec![
            ("field".to_string(), ParamValue::Scalar("status".to_string())),
            ("op".to_string(), ParamValue::Scalar("in".to_string())),
            (
                "value".to_string(),
                ParamValue::List(vec!["active".to_string(), "pending".to_string()]),
            ),
        ];
        let params = vec![QueryParam::entries("filters", vec![entry])];
        assert_eq!(
            to_query_string(&params),
            "filters[0][field]=status&filters[0][op]=in\
             &filters[0][value][]=active&filters[0][value][]=pending"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let params = vec![QueryParam::scalar("q", "a b&c")];
        assert_eq!(to_query_string(&params), "q=a%20b%26c");
    }

    #[test]
    fn test_parse_query_decodes_pairs() {
        let pairs = parse_query("page=2&q=a%20b&flag");
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "a b".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_encode_key_keeps_brackets() {
        assert_eq!(encode_key("filters[0][field]"), "filters[0][field]");
        assert_eq!(encode_key("a key"), "a%20key");
    }

    #[test]
    fn test_pop_filter_renumbers() {
        let params = vec![QueryParam::entries(
            "filters",
            vec![
                filter_entry("a", "eq", "1"),
                filter_entry("b", "eq", "2"),
                filter_entry("c", "eq", "3"),
            ],
        )];

        let (removed, rest) = pop_filter(params, "b").unwrap();
        assert_eq!(
            removed.unwrap()[0],
            ("field".to_string(), ParamValue::Scalar("b".to_string()))
        );
        // b's former index is reoccupied by c; no hole at index 1.
        assert_eq!(
            to_query_string(&rest),
            "filters[0][field]=a&filters[0][op]=eq&filters[0][value]=1\
             &filters[1][field]=c&filters[1][op]=eq&filters[1][value]=3"
        );
    }

    #[test]
    fn test_pop_filter_no_filters_param() {
        let params = vec![QueryParam::scalar("page", 2)];
        let (removed, rest) = pop_filter(params.clone(), "status").unwrap();
        assert!(removed.is_none());
        assert_eq!(rest, params);
    }

    #[test]
    fn test_pop_filter_absent_field() {
        let params = vec![QueryParam::entries(
            "filters",
            vec![filter_entry("a", "eq", "1")],
        )];
        let (removed, rest) = pop_filter(params.clone(), "missing").unwrap();
        assert!(removed.is_none());
        assert_eq!(rest, params);
    }

    #[test]
    fn test_pop_filter_drops_emptied_param() {
        let params = vec![
            QueryParam::scalar("page", 2),
            QueryParam::entries("filters", vec![filter_entry("a", "eq", "1")]),
        ];
        let (removed, rest) = pop_filter(params, "a").unwrap();
        assert!(removed.is_some());
        assert_eq!(rest, vec![QueryParam::scalar("page", 2)]);
    }

    #[test]
    fn test_pop_filter_rejects_malformed_shape() {
        let params = vec![QueryParam::scalar("filters", "oops")];
        assert!(pop_filter(params, "a").is_err());
    }
}
