//! Tokens as custom properties or as a plain nested JSON object.

use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::info;

use crate::{expression::format_value, naming::NamingOptions, token::TokenRecord};

/// Value column shared by every custom-property generator.
pub fn formatted_value(record: &TokenRecord, use_code_syntax: bool, decimals: usize) -> String {
    format_value(record.effective_value(use_code_syntax), decimals)
}

/// A single `:root` block with one custom property per record.
pub fn css_vars(
    records: &[TokenRecord],
    naming: &NamingOptions,
    use_code_syntax: bool,
    decimals: usize,
) -> String {
    let body = records
        .iter()
        .map(|record| {
            format!(
                "  {}: {};\n",
                naming.identifier(&record.segments),
                formatted_value(record, use_code_syntax, decimals)
            )
        })
        .join("");
    info!(count = records.len(), "generated css variables");
    format!(":root {{\n{body}}}\n")
}

/// Nested object mirroring the token paths. A later token whose path runs
/// through an earlier token's leaf replaces that leaf with an object.
pub fn plain_json(
    records: &[TokenRecord],
    naming: &NamingOptions,
    use_code_syntax: bool,
    decimals: usize,
) -> Result<String, serde_json::Error> {
    let mut root = Map::new();
    for record in records {
        let keys = record
            .segments
            .iter()
            .map(|segment| {
                if naming.lowercase {
                    segment.to_lowercase()
                } else {
                    segment.clone()
                }
            })
            .collect_vec();
        insert_nested(
            &mut root,
            &keys,
            Value::String(formatted_value(record, use_code_syntax, decimals)),
        );
    }
    info!(count = records.len(), "generated plain json tokens");
    serde_json::to_string_pretty(&Value::Object(root))
}

fn insert_nested(node: &mut Map<String, Value>, keys: &[String], value: Value) {
    match keys {
        [] => {}
        [leaf] => {
            node.insert(leaf.clone(), value);
        }
        [key, rest @ ..] => {
            let slot = node
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(child) = slot {
                insert_nested(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{keywords::KeywordSet, naming::Depth, token::extract};

    fn records(document: &Value, naming: &NamingOptions) -> Vec<TokenRecord> {
        extract(document, naming, &KeywordSet::builtin())
    }

    #[test]
    fn root_block_with_full_path_names() {
        let naming = NamingOptions {
            depth: Depth::All,
            ..Default::default()
        };
        let doc = json!({ "Color": { "Gray": { "100": { "$type": "color", "$value": "#CCCCCC" } } } });
        let css = css_vars(&records(&doc, &naming), &naming, false, 4);
        assert_eq!(css, ":root {\n  --color-gray-100: #CCCCCC;\n}\n");
    }

    #[test]
    fn depth_and_prefix_shape_the_name() {
        let naming = NamingOptions {
            depth: Depth::Last(2),
            use_prefix: true,
            ..Default::default()
        };
        let doc = json!({ "Typography": { "Display 1": { "Font Size": { "$type": "dimension", "$value": "48.0000px" } } } });
        let css = css_vars(&records(&doc, &naming), &naming, false, 4);
        assert_eq!(css, ":root {\n  --tgds-display-1-font-size: 48px;\n}\n");
    }

    #[test]
    fn code_syntax_wins_when_enabled() {
        let naming = NamingOptions::default();
        let doc = json!({ "Radius": { "$type": "number", "$value": 4,
            "$extensions": { "com.figma": { "codeSyntax": { "web": "var(--radius-sm)" } } } } });
        let recs = records(&doc, &naming);
        assert!(css_vars(&recs, &naming, true, 4).contains("--radius: var(--radius-sm);"));
        assert!(css_vars(&recs, &naming, false, 4).contains("--radius: 4;"));
    }

    #[test]
    fn plain_json_nests_and_overwrites_scalars() {
        let naming = NamingOptions::default();
        let doc = json!({
            "Space": {
                "Small": { "$type": "dimension", "$value": 4.50000 },
                "Large": { "$type": "dimension", "$value": "24px" }
            },
            "Conflict": [
                { "$type": "dimension", "$value": 1 }
            ]
        });
        let mut recs = records(&doc, &naming);
        let mut nested = recs[0].clone();
        nested.segments.push("inner".to_string());
        recs.push(nested);

        let text = plain_json(&recs, &naming, false, 4).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["space"]["small"]["inner"], "4.5");
        assert_eq!(parsed["space"]["large"], "24px");
        assert_eq!(parsed["conflict"]["0"], "1");
        assert!(text.starts_with("{\n  \"space\""));
    }
}
