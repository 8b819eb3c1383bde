//! Dispatch arguments.
//!
//! [`Args`] is the tagged union describing how caller-supplied parameters
//! reach a command: as named fields, as an ordered positional list, as a
//! single value, or not at all. Commands match on the shape instead of the
//! dispatcher guessing a calling convention at runtime.
//!
//! Payloads are [`serde_json::Value`]s, so arguments can be built statically
//! (`Args::named`, `Args::positional`, `Args::single`) or lifted from
//! already-deserialized request data (`Args::from_value`).

use serde_json::{Map, Value};

/// Parameters passed to a dispatched command.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Args {
    /// Named fields, in insertion order.
    Named(Map<String, Value>),
    /// An ordered list of positional values.
    Positional(Vec<Value>),
    /// Exactly one value.
    Single(Value),
    /// No arguments.
    #[default]
    None,
}

impl Args {
    /// Builds named arguments from `(field, value)` pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use summon::Args;
    ///
    /// let args = Args::named([("email", "a@b.com"), ("password", "x")]);
    /// assert_eq!(args.get("email").and_then(|v| v.as_str()), Some("a@b.com"));
    /// ```
    pub fn named<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let map = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Args::Named(map)
    }

    /// Builds positional arguments from an ordered list of values.
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Args::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Builds a single-value argument.
    pub fn single(value: impl Into<Value>) -> Self {
        Args::Single(value.into())
    }

    /// Lifts a deserialized value into dispatch arguments: objects become
    /// [`Args::Named`], arrays become [`Args::Positional`], `null` becomes
    /// [`Args::None`], and any other value becomes [`Args::Single`].
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Args::None,
            Value::Object(map) => Args::Named(map),
            Value::Array(values) => Args::Positional(values),
            other => Args::Single(other),
        }
    }

    /// Returns true if no arguments were supplied.
    pub fn is_none(&self) -> bool {
        matches!(self, Args::None)
    }

    /// Returns true if the arguments are named fields.
    pub fn is_named(&self) -> bool {
        matches!(self, Args::Named(_))
    }

    /// Returns true if the arguments are positional.
    pub fn is_positional(&self) -> bool {
        matches!(self, Args::Positional(_))
    }

    /// Returns true if the arguments are a single value.
    pub fn is_single(&self) -> bool {
        matches!(self, Args::Single(_))
    }

    /// Looks up a named field. Returns `None` for non-named shapes.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Args::Named(map) => map.get(field),
            _ => None,
        }
    }

    /// Looks up a positional value. Returns `None` for non-positional shapes.
    pub fn position(&self, index: usize) -> Option<&Value> {
        match self {
            Args::Positional(values) => values.get(index),
            _ => None,
        }
    }

    /// Returns the single value, if that is the shape.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Args::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a required named field, with an error naming the field when
    /// it is missing or the shape is not named.
    pub fn required(&self, field: &str) -> Result<&Value, anyhow::Error> {
        self.get(field)
            .ok_or_else(|| anyhow::anyhow!("missing required argument {field:?}"))
    }

    /// Looks up a required positional value.
    pub fn required_position(&self, index: usize) -> Result<&Value, anyhow::Error> {
        self.position(index)
            .ok_or_else(|| anyhow::anyhow!("missing required argument at position {index}"))
    }

    /// Number of supplied arguments: field count, position count, 1 for a
    /// single value, 0 for none.
    pub fn len(&self) -> usize {
        match self {
            Args::Named(map) => map.len(),
            Args::Positional(values) => values.len(),
            Args::Single(_) => 1,
            Args::None => 0,
        }
    }

    /// Returns true if `len()` is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Map<String, Value>> for Args {
    fn from(map: Map<String, Value>) -> Self {
        Args::Named(map)
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Args::Positional(values)
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Args::from_value(value)
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Args::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_preserves_insertion_order() {
        let args = Args::named([("b", 1), ("a", 2)]);
        match &args {
            Args::Named(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["b", "a"]);
            }
            _ => panic!("expected named args"),
        }
    }

    #[test]
    fn test_shape_predicates() {
        assert!(Args::None.is_none());
        assert!(Args::named([("k", 1)]).is_named());
        assert!(Args::positional([1, 2]).is_positional());
        assert!(Args::single("x").is_single());
        assert!(!Args::single("x").is_named());
    }

    #[test]
    fn test_from_value_shapes() {
        assert_eq!(Args::from_value(Value::Null), Args::None);
        assert!(Args::from_value(json!({"a": 1})).is_named());
        assert!(Args::from_value(json!([1, 2])).is_positional());
        assert!(Args::from_value(json!("scalar")).is_single());
        assert!(Args::from_value(json!(42)).is_single());
    }

    #[test]
    fn test_accessors() {
        let named = Args::named([("email", "a@b.com")]);
        assert_eq!(named.get("email"), Some(&json!("a@b.com")));
        assert_eq!(named.get("missing"), None);
        assert_eq!(named.position(0), None);

        let positional = Args::positional(["first", "second"]);
        assert_eq!(positional.position(1), Some(&json!("second")));
        assert_eq!(positional.get("first"), None);

        let single = Args::single(7);
        assert_eq!(single.value(), Some(&json!(7)));
        assert_eq!(Args::None.value(), None);
    }

    #[test]
    fn test_required_errors_name_the_argument() {
        let args = Args::named([("present", 1)]);
        assert_eq!(args.required("present").unwrap(), &json!(1));

        let err = args.required("absent").unwrap_err();
        assert!(err.to_string().contains("\"absent\""));

        let err = Args::None.required_position(2).unwrap_err();
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_len_per_shape() {
        assert_eq!(Args::None.len(), 0);
        assert!(Args::None.is_empty());
        assert_eq!(Args::single(1).len(), 1);
        assert_eq!(Args::positional([1, 2, 3]).len(), 3);
        assert_eq!(Args::named([("a", 1), ("b", 2)]).len(), 2);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(Args::default(), Args::None);
    }
}
