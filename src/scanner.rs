//! Heuristic scanning of free-form CSS text.
//!
//! This matches flat `selector { body }` rules and `name: value;` pairs with
//! regular expressions. It is not a CSS parser: nested blocks, comments and
//! strings containing braces are not understood.

use indexmap::IndexSet;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::{keywords::KeywordSet, mapping::PropertyMapping, naming::CUSTOM_PROPERTY_MARKER};

static RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^{}]+)\s*\{\s*([^{}]*)\s*\}").expect("rule pattern compiles"));
static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w-]+)\s*:\s*([^;]+);?").expect("declaration pattern compiles"));

/// Property names inside rule bodies that are neither standard, nor
/// variables, nor already registered. First occurrence order.
pub fn detect_custom_properties(
    css: &str,
    keywords: &KeywordSet,
    existing: &[PropertyMapping],
) -> IndexSet<String> {
    let mut detected = IndexSet::new();
    for rule in RULE.captures_iter(css) {
        for declaration in DECLARATION.captures_iter(&rule[2]) {
            let name = declaration[1].trim();
            if keywords.contains(name)
                || name.starts_with(CUSTOM_PROPERTY_MARKER)
                || existing.iter().any(|m| m.name == name)
            {
                continue;
            }
            detected.insert(name.to_string());
        }
    }
    debug!(count = detected.len(), "scanned css for custom properties");
    detected
}

/// Rewrites every `name: value;` of a mapped property into one declaration
/// per target. A declaration closed by the rule's `}` keeps the brace.
pub fn expand_custom_properties(
    css: &str,
    mappings: &[PropertyMapping],
) -> Result<String, regex::Error> {
    let mut text = css.to_string();
    for mapping in mappings.iter().filter(|m| m.is_mapped()) {
        let pattern = format!(
            r"(^|[^\w-]){}\s*:\s*([^;}}]+)([;}}])",
            regex::escape(&mapping.name)
        );
        let re = Regex::new(&pattern)?;
        text = re
            .replace_all(&text, |caps: &Captures| {
                let value = caps[2].trim();
                let closes = &caps[3] == "}";
                let last = mapping.mapped_to.len() - 1;
                let declarations = mapping
                    .mapped_to
                    .iter()
                    .enumerate()
                    .map(|(index, target)| {
                        let end = if closes && index == last { "}" } else { ";" };
                        format!("{target}: {value}{end}")
                    })
                    .join(" ");
                format!("{}{declarations}", &caps[1])
            })
            .into_owned();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::default_mappings;

    const CSS: &str = ".card {\n  padding-horizontal: 16px;\n  color: red;\n  --brand: blue;\n  elevation: 2;\n}\n.chip { inset-x: 4px }";

    #[test]
    fn detects_unknown_names_only() {
        let detected = detect_custom_properties(CSS, &KeywordSet::builtin(), &default_mappings());
        assert_eq!(
            detected.into_iter().collect::<Vec<_>>(),
            ["elevation", "inset-x"]
        );
    }

    #[test]
    fn expands_mapped_declarations() {
        let mut mappings = default_mappings();
        mappings.push(PropertyMapping::new("inset-x", ["left", "right"]));
        let out = expand_custom_properties(CSS, &mappings).unwrap();
        assert!(out.contains("  padding-left: 16px; padding-right: 16px;\n"));
        assert!(out.contains(".chip { left: 4px; right: 4px}"));
        assert!(out.contains("color: red;"));
    }

    #[test]
    fn longer_names_are_not_rewritten() {
        let mappings = vec![PropertyMapping::new("gap-x", ["column-gap"])];
        let css = ".a { row-gap-x: 1px; gap-x: 2px; }";
        let out = expand_custom_properties(css, &mappings).unwrap();
        assert_eq!(out, ".a { row-gap-x: 1px; column-gap: 2px; }");
    }
}
