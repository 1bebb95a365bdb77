use std::borrow::Cow;
use std::collections::HashMap;

use encoding_rs::Encoding;
use url::form_urlencoded;

use crate::error::{HttpHelperError, Result};

/// Request parameters. Entries with a `None` value are skipped when encoding.
pub type Params = HashMap<String, Option<String>>;

/// Looks up a charset label such as `"UTF-8"` or `"ISO-8859-1"`.
pub fn resolve_charset(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| HttpHelperError::UnsupportedCharset(label.to_string()))
}

/// Key/value pairs that take part in the request, in map iteration order.
pub fn form_pairs(params: &Params) -> Vec<(&str, &str)> {
    params
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
        .collect()
}

fn byte_encoder<F: Fn(&str) -> Cow<'_, [u8]>>(f: F) -> F {
    f
}

/// `application/x-www-form-urlencoded` serialization of the non-null pairs,
/// with keys and values converted to `encoding` before percent-escaping.
/// `None` if no pair survives.
pub fn encode_form(params: &Params, encoding: &'static Encoding) -> Option<String> {
    let pairs = form_pairs(params);
    if pairs.is_empty() {
        return None;
    }
    let encode = byte_encoder(move |s| encoding.encode(s).0);
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.encoding_override(Some(&encode));
    Some(serializer.extend_pairs(pairs).finish())
}

/// Appends `?<query>` to `url` when there is something to encode.
///
/// The query is appended as-is; a `url` that already carries a query string
/// ends up with two `?`.
pub fn append_query(url: &str, params: Option<&Params>, encoding: &'static Encoding) -> String {
    match params.and_then(|params| encode_form(params, encoding)) {
        Some(query) => format!("{}?{}", url, query),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    fn params(entries: &[(&str, Option<&str>)]) -> Params {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    fn split_query(query: &str) -> Vec<&str> {
        let mut parts: Vec<&str> = query.split('&').collect();
        parts.sort_unstable();
        parts
    }

    #[test]
    fn test_encode_two_pairs() {
        let query = encode_form(&params(&[("a", Some("1")), ("b", Some("2"))]), UTF_8).unwrap();
        assert_eq!(split_query(&query), vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_null_values_are_skipped() {
        let p = params(&[("a", Some("1")), ("skip", None), ("b", Some(""))]);
        assert_eq!(form_pairs(&p).len(), 2);
        let query = encode_form(&p, UTF_8).unwrap();
        assert!(!query.contains("skip"));
        assert_eq!(split_query(&query), vec!["a=1", "b="]);
    }

    #[test]
    fn test_only_null_values_encode_to_nothing() {
        assert_eq!(encode_form(&params(&[("a", None)]), UTF_8), None);
        assert_eq!(encode_form(&Params::new(), UTF_8), None);
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let query = encode_form(&params(&[("q", Some("a b&c=d/é"))]), UTF_8).unwrap();
        assert_eq!(query, "q=a+b%26c%3Dd%2F%C3%A9");
    }

    #[test]
    fn test_pairs_use_requested_charset() {
        let latin1 = resolve_charset("ISO-8859-1").unwrap();
        assert_eq!(latin1, WINDOWS_1252);
        let query = encode_form(&params(&[("café", Some("é"))]), latin1).unwrap();
        assert_eq!(query, "caf%E9=%E9");
    }

    #[test]
    fn test_resolve_charset() {
        assert_eq!(resolve_charset("UTF-8").unwrap(), UTF_8);
        assert_eq!(resolve_charset(" utf8 ").unwrap(), UTF_8);
        assert_eq!(
            resolve_charset("no-such-charset"),
            Err(HttpHelperError::UnsupportedCharset("no-such-charset".to_string()))
        );
    }

    #[test]
    fn test_append_query() {
        assert_eq!(append_query("http://example/x", None, UTF_8), "http://example/x");
        assert_eq!(
            append_query("http://example/x", Some(&params(&[("a", None)])), UTF_8),
            "http://example/x"
        );
        assert_eq!(
            append_query("http://example/x", Some(&params(&[("a", Some("1"))])), UTF_8),
            "http://example/x?a=1"
        );
    }
}
