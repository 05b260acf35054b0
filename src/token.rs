//! Flattening a token document into [`TokenRecord`]s.
//!
//! Any object carrying both `$type` and `$value` is a token; everything else
//! is a group whose non-`$` keys are walked depth-first in document order.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    extensions::{preferred_override, Extensions},
    keywords::KeywordSet,
    naming::NamingOptions,
    validator::is_standard_property,
};

pub const TYPE_KEY: &str = "$type";
pub const VALUE_KEY: &str = "$value";
pub const DESCRIPTION_KEY: &str = "$description";
pub const EXTENSIONS_KEY: &str = "$extensions";
/// Keys starting with this are metadata and never walked.
pub const RESERVED_MARKER: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Final path segment, as collected.
    pub name: String,
    /// Not a standard CSS property name.
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    /// Keys from the root down to the token, untouched.
    pub path: Vec<String>,
    /// The same keys after the segment transform applied during collection.
    pub segments: Vec<String>,
    pub type_: String,
    pub value: Value,
    pub description: Option<String>,
    pub extensions: Option<Extensions>,
    pub property: PropertyInfo,
}
impl TokenRecord {
    pub fn full_path(&self) -> String {
        self.path.join(".")
    }
    pub fn code_syntax(&self) -> Option<&IndexMap<String, Value>> {
        self.extensions.as_ref().and_then(Extensions::code_syntax)
    }
    /// The code-syntax override when enabled and available, else `$value`.
    pub fn effective_value(&self, use_code_syntax: bool) -> &Value {
        if use_code_syntax {
            if let Some(value) = self.code_syntax().and_then(preferred_override) {
                return value;
            }
        }
        &self.value
    }
}

fn is_set(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

pub struct Extractor<'a> {
    naming: &'a NamingOptions,
    keywords: &'a KeywordSet,
}
impl<'a> Extractor<'a> {
    pub fn new(naming: &'a NamingOptions, keywords: &'a KeywordSet) -> Self {
        Self { naming, keywords }
    }
    pub fn extract(&self, document: &Value) -> Vec<TokenRecord> {
        let mut records = Vec::new();
        self.walk(document, &mut Vec::new(), &mut Vec::new(), &mut records);
        debug!(count = records.len(), "extracted tokens");
        records
    }
    fn walk(
        &self,
        node: &Value,
        path: &mut Vec<String>,
        segments: &mut Vec<String>,
        records: &mut Vec<TokenRecord>,
    ) {
        match node {
            Value::Object(object) => {
                if is_set(object.get(TYPE_KEY)) && is_set(object.get(VALUE_KEY)) {
                    if path.is_empty() {
                        debug!("document root is a token, skipping");
                        return;
                    }
                    records.push(self.record(object, path, segments));
                    return;
                }
                for (key, child) in object {
                    if key.starts_with(RESERVED_MARKER) {
                        continue;
                    }
                    self.descend(key, child, path, segments, records);
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.descend(&index.to_string(), child, path, segments, records);
                }
            }
            _ => trace!(path = %path.join("."), "skipping scalar outside a token"),
        }
    }
    fn descend(
        &self,
        key: &str,
        child: &Value,
        path: &mut Vec<String>,
        segments: &mut Vec<String>,
        records: &mut Vec<TokenRecord>,
    ) {
        path.push(key.to_string());
        segments.push(self.naming.segment(key));
        self.walk(child, path, segments, records);
        path.pop();
        segments.pop();
    }
    fn record(
        &self,
        object: &serde_json::Map<String, Value>,
        path: &[String],
        segments: &[String],
    ) -> TokenRecord {
        let name = segments.last().cloned().unwrap_or_default();
        let is_custom = !is_standard_property(&name, self.keywords);
        TokenRecord {
            path: path.to_vec(),
            segments: segments.to_vec(),
            type_: object
                .get(TYPE_KEY)
                .map(crate::expression::literal)
                .unwrap_or_default(),
            value: object.get(VALUE_KEY).cloned().unwrap_or(Value::Null),
            description: object
                .get(DESCRIPTION_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            extensions: Extensions::from_node(object.get(EXTENSIONS_KEY)),
            property: PropertyInfo { name, is_custom },
        }
    }
}

/// Shorthand for a one-off extraction.
pub fn extract(
    document: &Value,
    naming: &NamingOptions,
    keywords: &KeywordSet,
) -> Vec<TokenRecord> {
    Extractor::new(naming, keywords).extract(document)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn run(document: &Value) -> Vec<TokenRecord> {
        extract(document, &NamingOptions::default(), &KeywordSet::builtin())
    }

    #[test]
    fn emits_one_record_per_leaf_in_document_order() {
        let doc = json!({
            "Typography": {
                "$description": "ignored group metadata",
                "Display 1": {
                    "Font Size": { "$type": "dimension", "$value": "48px" },
                    "Line Height": { "$type": "dimension", "$value": 1.2, "$description": "tight" }
                }
            },
            "Color": { "Gray": { "100": { "$type": "color", "$value": "#CCCCCC" } } }
        });
        let records = run(&doc);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].path, ["Typography", "Display 1", "Font Size"]);
        assert_eq!(records[0].segments, ["typography", "display-1", "font-size"]);
        assert_eq!(records[0].property.name, "font-size");
        assert!(!records[0].property.is_custom);
        assert_eq!(records[1].description.as_deref(), Some("tight"));
        assert_eq!(records[2].full_path(), "Color.Gray.100");
        assert_eq!(records[2].type_, "color");
    }

    #[test]
    fn reserved_keys_are_never_walked() {
        let doc = json!({
            "$meta": { "Hidden": { "$type": "color", "$value": "#000000" } },
            "Brand": {
                "$extensions": { "Nested": { "$type": "color", "$value": "#111111" } },
                "Primary": { "$type": "color", "$value": "#0055FF" }
            }
        });
        let records = run(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, ["Brand", "Primary"]);
    }

    #[test]
    fn type_without_value_is_a_group() {
        let doc = json!({
            "Spacing": {
                "$type": "dimension",
                "Small": { "$type": "dimension", "$value": 4 },
                "Broken": { "$type": "dimension" },
                "Null": { "$type": "dimension", "$value": null }
            }
        });
        let records = run(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, ["Spacing", "Small"]);
    }

    #[test]
    fn segments_keep_raw_keys_when_transform_disabled() {
        let naming = NamingOptions {
            replace_whitespace: false,
            ..Default::default()
        };
        let doc = json!({ "Padding Horizontal": { "$type": "dimension", "$value": 8 } });
        let records = extract(&doc, &naming, &KeywordSet::builtin());
        assert_eq!(records[0].segments, ["Padding Horizontal"]);
        assert!(records[0].property.is_custom);
    }

    #[test]
    fn array_indices_act_as_keys() {
        let doc = json!({ "Shadows": [ { "$type": "shadow", "$value": "0 1px 2px #000" } ] });
        let records = run(&doc);
        assert_eq!(records[0].path, ["Shadows", "0"]);
    }

    #[test]
    fn code_syntax_override_prefers_web() {
        let doc = json!({
            "Gray": {
                "$type": "color",
                "$value": "#CCCCCC",
                "$extensions": { "com.figma": { "codeSyntax": { "iOS": "gray", "web": "var(--gray)" } } }
            }
        });
        let record = &run(&doc)[0];
        assert_eq!(record.effective_value(true), &json!("var(--gray)"));
        assert_eq!(record.effective_value(false), &json!("#CCCCCC"));
    }

    fn tree() -> impl Strategy<Value = (Value, usize)> {
        let leaf = prop_oneof![
            "[a-z#0-9]{1,6}".prop_map(|v| (json!({ "$type": "color", "$value": v }), 1)),
            Just((json!({}), 0)),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(("[A-Za-z ]{1,6}", inner), 1..4).prop_map(|children| {
                let mut object = serde_json::Map::new();
                for (index, (key, (child, _))) in children.iter().enumerate() {
                    object.insert(format!("{key}{index}"), child.clone());
                }
                let leaves = children.iter().map(|(_, (_, n))| n).sum();
                (Value::Object(object), leaves)
            })
        })
    }

    proptest! {
        #[test]
        fn record_count_matches_leaf_count((doc, leaves) in tree()) {
            prop_assume!(doc.get(TYPE_KEY).is_none());
            prop_assert_eq!(run(&doc).len(), leaves);
        }
    }
}
