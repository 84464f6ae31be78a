//! Serialization of an [`AttributeSet`] into a trailing SQL comment.
//!
//! Output is deterministic: keys render in ascending lexicographic order,
//! string values are percent-encoded and single-quoted, numeric and boolean
//! values render bare. Encoding is plain RFC 3986 percent-encoding, so a
//! standard percent-decode recovers the original value byte-for-byte.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::attributes::{AttributeSet, CommentValue};

/// Characters escaped inside comment values: every non-alphanumeric ASCII
/// byte except the RFC 3986 unreserved marks and `/` (kept readable in route
/// patterns). Escaping `*` means no value can ever produce a `*/` sequence
/// that would terminate the comment early; escaping `'` keeps the quoting
/// unambiguous.
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

// Matches a query whose text already ends in a closed block comment,
// optionally followed by whitespace. Such a query is left untouched so
// annotation is idempotent and never stacks comments.
static TRAILING_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*/\s*$").unwrap());

/// Percent-encode a raw attribute value.
pub fn encode_value(raw: &str) -> String {
    utf8_percent_encode(raw, VALUE_ENCODE_SET).to_string()
}

/// Render the attribute set as a `/*...*/` comment, or an empty string for
/// an empty set (the caller then appends nothing).
pub fn generate_comment(attributes: &AttributeSet) -> String {
    if attributes.is_empty() {
        return String::new();
    }

    let pairs: Vec<String> = attributes
        .iter()
        .map(|(key, value)| match value {
            CommentValue::String(s) => format!("{}='{}'", key, encode_value(s)),
            CommentValue::Int(i) => format!("{}={}", key, i),
            CommentValue::Bool(b) => format!("{}={}", key, b),
        })
        .collect();

    format!("/*{}*/", pairs.join(","))
}

/// Append the rendered comment to a query.
///
/// The query text itself is never altered: the comment is appended after a
/// single space, and an empty attribute set returns the input unchanged.
/// A query already ending in a block comment is also returned unchanged.
pub fn append_comment(sql: &str, attributes: &AttributeSet) -> String {
    if attributes.is_empty() || has_trailing_comment(sql) {
        return sql.to_string();
    }

    format!("{} {}", sql, generate_comment(attributes))
}

/// Whether the query already ends with a block comment.
pub fn has_trailing_comment(sql: &str) -> bool {
    TRAILING_COMMENT.is_match(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::keys;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_empty_set_yields_empty_comment() {
        let set = AttributeSet::new();
        assert_eq!(generate_comment(&set), "");
        assert_eq!(append_comment("SELECT 1;", &set), "SELECT 1;");
    }

    #[test]
    fn test_single_string_attribute() {
        let mut set = AttributeSet::new();
        set.insert(keys::DRIVER_PARAMSTYLE, "pyformat");
        assert_eq!(
            append_comment("SELECT 1;", &set),
            "SELECT 1; /*driver_paramstyle='pyformat'*/"
        );
    }

    #[test]
    fn test_integer_renders_bare() {
        let mut set = AttributeSet::new();
        set.insert(keys::DBAPI_THREADSAFETY, 3);
        assert_eq!(
            append_comment("SELECT 1;", &set),
            "SELECT 1; /*dbapi_threadsafety=3*/"
        );
    }

    #[test]
    fn test_bool_renders_bare() {
        let mut set = AttributeSet::new();
        set.insert("read_only", true);
        assert_eq!(generate_comment(&set), "/*read_only=true*/");
    }

    #[test]
    fn test_keys_sorted_regardless_of_insertion_order() {
        let mut a = AttributeSet::new();
        a.insert(keys::ROUTE, "/");
        a.insert(keys::FRAMEWORK, "flask");
        a.insert(keys::CONTROLLER, "c");

        let mut b = AttributeSet::new();
        b.insert(keys::CONTROLLER, "c");
        b.insert(keys::ROUTE, "/");
        b.insert(keys::FRAMEWORK, "flask");

        let rendered = generate_comment(&a);
        assert_eq!(rendered, "/*controller='c',framework='flask',route='/'*/");
        assert_eq!(rendered, generate_comment(&b));
    }

    #[test]
    fn test_reserved_characters_encoded() {
        let mut set = AttributeSet::new();
        set.insert(keys::TRACEPARENT, "00-trace id-span id-00");
        set.insert(
            keys::TRACESTATE,
            "congo=t61rcWkgMzE,rojo=00f067aa0ba902b7",
        );
        assert_eq!(
            generate_comment(&set),
            "/*traceparent='00-trace%20id-span%20id-00',\
             tracestate='congo%3Dt61rcWkgMzE%2Crojo%3D00f067aa0ba902b7'*/"
        );
    }

    #[test]
    fn test_encoding_round_trips() {
        let raw = "a b=c,d'e%f*/g:h\u{00e9}";
        let encoded = encode_value(raw);
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        assert_eq!(decoded, raw);
    }

    #[test]
    fn test_comment_terminator_never_appears_in_values() {
        let mut set = AttributeSet::new();
        set.insert("evil", "*/ DROP TABLE users; /*");
        let rendered = generate_comment(&set);
        assert_eq!(rendered.matches("*/").count(), 1);
        assert!(rendered.ends_with("*/"));
        assert!(rendered.contains("%2A/"));
    }

    #[test]
    fn test_quote_in_value_is_encoded() {
        let mut set = AttributeSet::new();
        set.insert(keys::CONTROLLER, "o'brien");
        assert_eq!(generate_comment(&set), "/*controller='o%27brien'*/");
    }

    #[test]
    fn test_percent_in_value_is_encoded_once() {
        let mut set = AttributeSet::new();
        set.insert(keys::ROUTE, "/q?pct=100%");
        assert_eq!(generate_comment(&set), "/*route='/q%3Fpct%3D100%25'*/");
    }

    #[test]
    fn test_existing_trailing_comment_left_alone() {
        let mut set = AttributeSet::new();
        set.insert(keys::FRAMEWORK, "axum");

        let already = "SELECT 1; /*framework='axum'*/";
        assert_eq!(append_comment(already, &set), already);

        let already_ws = "SELECT 1; /*framework='axum'*/  ";
        assert_eq!(append_comment(already_ws, &set), already_ws);
    }

    #[test]
    fn test_leading_comment_does_not_block_annotation() {
        let mut set = AttributeSet::new();
        set.insert(keys::FRAMEWORK, "axum");
        assert_eq!(
            append_comment("/*+ INDEX(users) */ SELECT 1;", &set),
            "/*+ INDEX(users) */ SELECT 1; /*framework='axum'*/"
        );
    }

    #[test]
    fn test_query_text_is_preserved_verbatim() {
        let mut set = AttributeSet::new();
        set.insert(keys::CONTROLLER, "c");
        let sql = "SELECT *\nFROM users\nWHERE name = $1;";
        let annotated = append_comment(sql, &set);
        assert!(annotated.starts_with(sql));
        assert_eq!(&annotated[sql.len()..], " /*controller='c'*/");
    }
}
