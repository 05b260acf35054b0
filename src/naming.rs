//! Identifier derivation from token path segments.
//!
//! A token at `Typography / Display 1 / Font Size` becomes a custom property
//! name by transforming each segment (whitespace runs replaced, optional
//! lowercasing), keeping the last `depth` segments, joining them with the
//! configured separator and finally prefixing with `--` (or `--<prefix>`).

use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker every CSS custom property starts with.
pub const CUSTOM_PROPERTY_MARKER: &str = "--";

/// How many trailing path segments take part in an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepthRepr", into = "DepthRepr")]
pub enum Depth {
    Last(usize),
    All,
}
impl Default for Depth {
    fn default() -> Self {
        Depth::Last(1)
    }
}
impl Depth {
    /// Zero is not a usable depth; it behaves like one.
    pub fn normalized(self) -> Depth {
        match self {
            Depth::Last(0) => Depth::Last(1),
            other => other,
        }
    }
}
impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Last(n) => write!(f, "{n}"),
            Depth::All => f.write_str("all"),
        }
    }
}
impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Depth::All);
        }
        s.parse::<usize>()
            .map(|n| Depth::Last(n).normalized())
            .map_err(|_| format!("expected a segment count or \"all\", got '{s}'"))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DepthRepr {
    Count(usize),
    Keyword(String),
}
impl TryFrom<DepthRepr> for Depth {
    type Error = String;

    fn try_from(repr: DepthRepr) -> Result<Self, Self::Error> {
        match repr {
            DepthRepr::Count(n) => Ok(Depth::Last(n).normalized()),
            DepthRepr::Keyword(word) => word.parse(),
        }
    }
}
impl From<Depth> for DepthRepr {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Last(n) => DepthRepr::Count(n),
            Depth::All => DepthRepr::Keyword("all".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingOptions {
    /// Joins path segments into one identifier.
    pub separator: String,
    pub lowercase: bool,
    /// Replace whitespace inside a single key while collecting segments.
    pub replace_whitespace: bool,
    pub whitespace_replacement: String,
    #[serde(rename = "propertyPathDepth")]
    pub depth: Depth,
    pub prefix: Option<String>,
    pub use_prefix: bool,
}
impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
            lowercase: true,
            replace_whitespace: true,
            whitespace_replacement: "-".to_string(),
            depth: Depth::default(),
            prefix: Some("tgds".to_string()),
            use_prefix: false,
        }
    }
}
impl NamingOptions {
    /// The path contribution of a raw key.
    pub fn segment(&self, key: &str) -> String {
        if self.replace_whitespace {
            transform_segment(key, &self.whitespace_replacement, self.lowercase)
        } else {
            key.to_string()
        }
    }
    pub fn identifier<S: AsRef<str>>(&self, path: &[S]) -> String {
        build_identifier(select_path_slice(path, self.depth), self)
    }
}

/// Replaces every whitespace run with `separator`, then lowercases if asked.
pub fn transform_segment(text: &str, separator: &str, lowercase: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push_str(separator);
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    if lowercase {
        out.to_lowercase()
    } else {
        out
    }
}

pub fn select_path_slice<S>(path: &[S], depth: Depth) -> &[S] {
    match depth.normalized() {
        Depth::All => path,
        Depth::Last(n) if n >= path.len() => path,
        Depth::Last(n) => &path[path.len() - n..],
    }
}

pub fn build_identifier<S: AsRef<str>>(slice: &[S], options: &NamingOptions) -> String {
    let joined = slice.iter().map(|s| s.as_ref()).join(&options.separator);
    let joined = if options.lowercase {
        joined.to_lowercase()
    } else {
        joined
    };
    format!(
        "{}{joined}",
        identifier_prefix(
            options.prefix.as_deref(),
            options.use_prefix,
            &options.separator
        )
    )
}

/// `--` or `--<prefix><separator>`; the separator is skipped when the prefix
/// already ends with it and the marker is never doubled.
pub fn identifier_prefix(prefix: Option<&str>, use_prefix: bool, separator: &str) -> String {
    match prefix {
        Some(prefix) if use_prefix && !prefix.is_empty() && prefix != CUSTOM_PROPERTY_MARKER => {
            let mut marked = if prefix.starts_with(CUSTOM_PROPERTY_MARKER) {
                prefix.to_string()
            } else {
                format!("{CUSTOM_PROPERTY_MARKER}{prefix}")
            };
            if !marked.ends_with(separator) {
                marked.push_str(separator);
            }
            marked
        }
        _ => CUSTOM_PROPERTY_MARKER.to_string(),
    }
}

/// Rewrites every structural key of a token tree with [`transform_segment`].
/// `$`-prefixed metadata keys are left untouched.
pub fn transform_object_keys(value: &Value, separator: &str, lowercase: bool) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| transform_object_keys(item, separator, lowercase))
                .collect(),
        ),
        Value::Object(object) => Value::Object(
            object
                .iter()
                .map(|(key, child)| {
                    let key = if key.starts_with('$') {
                        key.clone()
                    } else {
                        transform_segment(key, separator, lowercase)
                    };
                    (key, transform_object_keys(child, separator, lowercase))
                })
                .collect::<Map<_, _>>(),
        ),
        other => other.clone(),
    }
}
