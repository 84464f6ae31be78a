//! Attribute model: typed comment values and the ordered attribute mapping.

use std::collections::BTreeMap;

/// The closed set of attribute names emitted in SQL comments.
///
/// These are the key names log-processing tools look for, so they are kept
/// byte-for-byte compatible with other sqlcommenter implementations.
pub mod keys {
    pub const FRAMEWORK: &str = "framework";
    pub const CONTROLLER: &str = "controller";
    pub const ROUTE: &str = "route";
    pub const DB_DRIVER: &str = "db_driver";
    pub const DBAPI_THREADSAFETY: &str = "dbapi_threadsafety";
    pub const DBAPI_LEVEL: &str = "dbapi_level";
    pub const LIBPQ_VERSION: &str = "libpq_version";
    pub const DRIVER_PARAMSTYLE: &str = "driver_paramstyle";
    pub const TRACEPARENT: &str = "traceparent";
    pub const TRACESTATE: &str = "tracestate";
}

/// A typed attribute value.
///
/// The variant decides the rendered form: strings are percent-encoded and
/// single-quoted, integers and booleans render as bare literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl From<String> for CommentValue {
    fn from(value: String) -> Self {
        CommentValue::String(value)
    }
}

impl From<&str> for CommentValue {
    fn from(value: &str) -> Self {
        CommentValue::String(value.to_string())
    }
}

impl From<i64> for CommentValue {
    fn from(value: i64) -> Self {
        CommentValue::Int(value)
    }
}

impl From<i32> for CommentValue {
    fn from(value: i32) -> Self {
        CommentValue::Int(value as i64)
    }
}

impl From<u16> for CommentValue {
    fn from(value: u16) -> Self {
        CommentValue::Int(value as i64)
    }
}

impl From<bool> for CommentValue {
    fn from(value: bool) -> Self {
        CommentValue::Bool(value)
    }
}

/// An ordered mapping of attribute name to value.
///
/// Keys are unique and iterate in ascending lexicographic order, so the
/// serialized comment is deterministic regardless of insertion order. Absent
/// attributes are simply never inserted; the set never holds a null value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: BTreeMap<String, CommentValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, overwriting any existing value for the same key.
    ///
    /// Overwrite-on-insert is what gives later sources precedence over
    /// earlier ones during collection.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CommentValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Insert only if the value is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<CommentValue>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&CommentValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommentValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut set = AttributeSet::new();
        set.insert(keys::TRACEPARENT, "old");
        set.insert(keys::TRACEPARENT, "new");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(keys::TRACEPARENT),
            Some(&CommentValue::String("new".to_string()))
        );
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut set = AttributeSet::new();
        set.insert("route", "/");
        set.insert("controller", "c");
        set.insert("framework", "flask");

        let order: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["controller", "framework", "route"]);
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut set = AttributeSet::new();
        set.insert_opt(keys::LIBPQ_VERSION, None::<i64>);
        set.insert_opt(keys::DBAPI_THREADSAFETY, Some(3));
        assert!(!set.contains_key(keys::LIBPQ_VERSION));
        assert_eq!(set.get(keys::DBAPI_THREADSAFETY), Some(&CommentValue::Int(3)));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(CommentValue::from("x"), CommentValue::String("x".to_string()));
        assert_eq!(CommentValue::from(2i32), CommentValue::Int(2));
        assert_eq!(CommentValue::from(true), CommentValue::Bool(true));
    }
}
