//! Namespace specification and qualifier formatting.
//!
//! A [`Namespace`] names the ordered path of segments prefixed to a command's
//! bare name to form its fully-qualified name. It can be spelled three ways:
//!
//! - a single string, already joined or route-like (`"Api::AppName::V1"`,
//!   `"/api/app_name/v1"`);
//! - an ordered list of segments (`["Api", "AppName", "V1"]`);
//! - an ordered labeled mapping, where the labels are documentation only and
//!   never appear in output (`[("api", "Api"), ("version", "V1")]`).
//!
//! [`Namespace::qualifier`] produces the canonical form: segments joined with
//! `::`, a trailing `::` iff the namespace is non-empty, no whitespace, and
//! casing applied per [`Options`]. Blank segments are dropped, so a qualifier
//! never contains empty path components.

use serde_json::Value;

use crate::casing::{camelize, split_segments, titleize, trim_all};
use crate::error::DispatchError;
use crate::options::Options;

/// The namespace a command is dispatched into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Namespace {
    /// No namespace; the command's bare name is the fully-qualified name.
    #[default]
    Root,
    /// An already-joined or route-like string.
    Path(String),
    /// Ordered segments.
    Segments(Vec<String>),
    /// Ordered `(label, segment)` pairs; labels never appear in output.
    Labeled(Vec<(String, String)>),
}

impl Namespace {
    /// Builds a namespace from ordered segments.
    pub fn segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Namespace::Segments(segments.into_iter().map(Into::into).collect())
    }

    /// Builds a namespace from ordered `(label, segment)` pairs.
    pub fn labeled<K, S>(pairs: impl IntoIterator<Item = (K, S)>) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Namespace::Labeled(
            pairs
                .into_iter()
                .map(|(label, segment)| (label.into(), segment.into()))
                .collect(),
        )
    }

    /// Lifts a deserialized value into a namespace: strings become
    /// [`Namespace::Path`], arrays become [`Namespace::Segments`], objects
    /// become [`Namespace::Labeled`] (insertion order preserved), and `null`
    /// becomes [`Namespace::Root`].
    ///
    /// Scalar fragments inside arrays and objects are stringified; `null`
    /// fragments are blank and get dropped during formatting. Any other
    /// shape fails with [`DispatchError::InvalidNamespaceType`].
    pub fn from_value(value: &Value) -> Result<Self, DispatchError> {
        match value {
            Value::Null => Ok(Namespace::Root),
            Value::String(path) => Ok(Namespace::Path(path.clone())),
            Value::Array(items) => {
                let mut segments = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(segment) = fragment(item)? {
                        segments.push(segment);
                    }
                }
                Ok(Namespace::Segments(segments))
            }
            Value::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (label, item) in map {
                    if let Some(segment) = fragment(item)? {
                        pairs.push((label.clone(), segment));
                    }
                }
                Ok(Namespace::Labeled(pairs))
            }
            _ => Err(DispatchError::InvalidNamespaceType),
        }
    }

    /// Returns true if the namespace has no usable segments.
    pub fn is_root(&self) -> bool {
        match self {
            Namespace::Root => true,
            Namespace::Path(path) => split_segments(path).is_empty(),
            Namespace::Segments(segments) => segments.iter().all(|s| s.trim().is_empty()),
            Namespace::Labeled(pairs) => pairs.iter().all(|(_, s)| s.trim().is_empty()),
        }
    }

    /// Formats the namespace as a canonical qualifier string.
    ///
    /// The result ends in `::` unless the namespace is empty, contains no
    /// whitespace, and has casing applied per `options`. Formatting its own
    /// output again (without casing options) is a fixed point.
    ///
    /// # Example
    ///
    /// ```rust
    /// use summon::{Namespace, Options};
    ///
    /// let namespace = Namespace::segments(["Api", "AppName", "V1"]);
    /// assert_eq!(namespace.qualifier(&Options::default()), "Api::AppName::V1::");
    ///
    /// let route = Namespace::Path("/api/app_name/v1".into());
    /// assert_eq!(route.qualifier(&Options::new().camelize()), "Api::AppName::V1::");
    ///
    /// assert_eq!(Namespace::Root.qualifier(&Options::default()), "");
    /// ```
    pub fn qualifier(&self, options: &Options) -> String {
        let options = options.normalized();

        let raw = match self {
            Namespace::Root => String::new(),
            Namespace::Path(path) => path.clone(),
            Namespace::Segments(segments) => join_fragments(segments.iter().map(String::as_str)),
            Namespace::Labeled(pairs) => {
                join_fragments(pairs.iter().map(|(_, segment)| segment.as_str()))
            }
        };

        let transformed = if options.module_titleize {
            split_segments(&raw)
                .iter()
                .map(|segment| titleize(segment))
                .collect::<Vec<_>>()
                .join("::")
        } else {
            raw
        };
        let transformed = if options.module_camelize {
            camelize(&transformed)
        } else {
            transformed
        };

        // casing can leave spaces (titleize) or empty segments behind;
        // collapse once more before appending the trailing separator
        let segments = split_segments(&trim_all(&transformed));
        if segments.is_empty() {
            String::new()
        } else {
            format!("{}::", segments.join("::"))
        }
    }
}

/// Joins list/map fragments into a raw qualifier string, dropping fragments
/// that are blank after trimming.
fn join_fragments<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("::")
}

/// Stringifies one array/object fragment. `None` marks a blank fragment.
fn fragment(value: &Value) -> Result<Option<String>, DispatchError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(DispatchError::InvalidNamespaceType),
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        if path.trim().is_empty() {
            Namespace::Root
        } else {
            Namespace::Path(path.to_string())
        }
    }
}

impl From<String> for Namespace {
    fn from(path: String) -> Self {
        Namespace::from(path.as_str())
    }
}

impl From<()> for Namespace {
    fn from(_: ()) -> Self {
        Namespace::Root
    }
}

impl<S: Into<String>> From<Vec<S>> for Namespace {
    fn from(segments: Vec<S>) -> Self {
        Namespace::segments(segments)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Namespace {
    fn from(segments: [S; N]) -> Self {
        Namespace::segments(segments)
    }
}

impl<S: Into<String> + Clone> From<&[S]> for Namespace {
    fn from(segments: &[S]) -> Self {
        Namespace::segments(segments.iter().cloned())
    }
}

impl<T: Into<Namespace>> From<Option<T>> for Namespace {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Namespace::Root)
    }
}
