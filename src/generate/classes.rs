//! CSS class rules: one class per token group, one declaration per token.

use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{default_index, SourceFile};
use crate::{
    config::{Config, ResponsiveMode},
    context::TokenContext,
    error::GenerateError,
    expression::Expression,
    generate::responsive::{comment_text, theme_label, theme_selector, WidthRange},
    naming::{select_path_slice, transform_segment},
    token::{extract, TokenRecord},
};

pub const FALLBACK_CLASS: &str = "token-default";

/// Class name to its declarations, both in first-seen order.
pub type ClassBlock = IndexMap<String, IndexMap<String, String>>;

pub fn class_name(path: &[String], config: &Config) -> String {
    let group = &path[..path.len().saturating_sub(1)];
    let name = transform_segment(
        &group.join(" "),
        &config.naming.whitespace_replacement,
        config.naming.lowercase,
    );
    if name.is_empty() {
        FALLBACK_CLASS.to_string()
    } else {
        name
    }
}

pub fn property_name(path: &[String], config: &Config) -> String {
    transform_segment(
        &select_path_slice(path, config.naming.depth).join(" "),
        &config.naming.whitespace_replacement,
        config.naming.lowercase,
    )
}

/// Groups records into classes. Property names the keyword list does not know
/// go through the mapper; each mapped target receives the same value.
pub fn collect(records: &[TokenRecord], config: &Config, ctx: &mut TokenContext) -> ClassBlock {
    let mut block = ClassBlock::new();
    for record in records {
        let class = class_name(&record.path, config);
        let property = property_name(&record.path, config);
        let value = Expression::from_value(record.effective_value(config.use_code_syntax))
            .to_css(config.decimals);
        let targets = ctx
            .mapper
            .resolve(&property, &ctx.keywords)
            .targets(&property);
        if targets.len() != 1 || targets[0] != property {
            debug!(%property, ?targets, "remapped property");
        }
        let declarations = block.entry(class).or_default();
        for target in targets {
            declarations.insert(target, value.clone());
        }
    }
    block
}

/// Rules for `block`, each line prefixed with `indent`.
pub fn write_rules(block: &ClassBlock, indent: &str) -> String {
    block
        .iter()
        .map(|(class, declarations)| {
            let body = declarations
                .iter()
                .map(|(property, value)| format!("{indent}  {property}: {value};\n"))
                .join("");
            format!("{indent}.{class} {{\n{body}{indent}}}\n")
        })
        .join("\n")
}

fn collect_document(document: &Value, config: &Config, ctx: &mut TokenContext) -> ClassBlock {
    let records = extract(document, &config.naming, &ctx.keywords);
    collect(&records, config, ctx)
}

pub fn generate(
    config: &Config,
    sources: &[SourceFile],
    ctx: &mut TokenContext,
) -> Result<String, GenerateError> {
    let default = default_index(config, sources)?;
    if sources.len() == 1 {
        let document = sources[default].document.as_ref().ok_or(GenerateError::NoInput)?;
        let block = collect_document(document, config, ctx);
        info!(classes = block.len(), "generated css classes");
        return Ok(block
            .iter()
            .map(|(class, declarations)| {
                let body = declarations
                    .iter()
                    .map(|(property, value)| format!("  {property}: {value};\n"))
                    .join("");
                format!(".{class} {{\n{body}}}\n\n")
            })
            .join(""));
    }

    let variants = config.file_variants(sources.len());
    let mut out = match config.responsive {
        ResponsiveMode::Resolution => "/* Resolution-responsive CSS */\n\n".to_string(),
        ResponsiveMode::Theme => "/* Theme-responsive CSS */\n\n".to_string(),
    };
    let base_label = match config.responsive {
        ResponsiveMode::Resolution => WidthRange::derive(default, &variants).label(),
        ResponsiveMode::Theme => comment_text(&theme_label(default, &variants[default])),
    };
    match &sources[default].document {
        Some(document) => {
            let block = collect_document(document, config, ctx);
            out.push_str(&format!("/* Base styles - {base_label} */\n"));
            out.push_str(&write_rules(&block, ""));
        }
        None => warn!(file = %sources[default].name, "default file has no usable content"),
    }

    for (index, source) in sources.iter().enumerate() {
        if index == default {
            continue;
        }
        let Some(document) = &source.document else {
            warn!(file = %source.name, "skipping file without usable content");
            continue;
        };
        let block = collect_document(document, config, ctx);
        match config.responsive {
            ResponsiveMode::Resolution => {
                let range = WidthRange::derive(index, &variants);
                let Some(query) = range.media_query() else {
                    out.push_str(&format!(
                        "\n/* {}: width range needs manual resolution */\n",
                        comment_text(&source.name)
                    ));
                    continue;
                };
                out.push_str(&format!(
                    "\n{query} {{\n  /* {} - {} */\n{}}}\n",
                    comment_text(&source.name),
                    range.label(),
                    write_rules(&block, "  ")
                ));
            }
            ResponsiveMode::Theme => {
                let label = theme_label(index, &variants[index]);
                out.push_str(&format!(
                    "\n/* Theme: {} */\n{} {{\n{}}}\n",
                    comment_text(&label),
                    theme_selector(&label),
                    write_rules(&block, "  ")
                ));
            }
        }
    }
    info!(files = sources.len(), "generated responsive css classes");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::naming::Depth;

    fn path(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn names_follow_group_and_depth() {
        let config = Config::default();
        let p = path(&["Typography", "Display 1", "Font Size"]);
        assert_eq!(class_name(&p, &config), "typography-display-1");
        assert_eq!(property_name(&p, &config), "font-size");
        assert_eq!(class_name(&path(&["Gap"]), &config), FALLBACK_CLASS);

        let mut config = Config::default();
        config.naming.depth = Depth::Last(2);
        assert_eq!(property_name(&p, &config), "display-1-font-size");
    }

    #[test]
    fn custom_properties_expand_to_targets() {
        let doc = json!({
            "Card": {
                "Padding Horizontal": { "$type": "dimension", "$value": "16.000px" },
                "Color": { "$type": "color", "$value": "{Color.Gray.100}" }
            }
        });
        let config = Config::default();
        let mut ctx = TokenContext::builtin();
        let records = extract(&doc, &config.naming, &ctx.keywords);
        let block = collect(&records, &config, &mut ctx);
        let card = &block["card"];
        assert_eq!(card["padding-left"], "16px");
        assert_eq!(card["padding-right"], "16px");
        assert_eq!(card["color"], "var(--color-gray-100)");
        assert!(!card.contains_key("padding-horizontal"));
    }

    #[test]
    fn unmapped_invalid_names_are_kept() {
        let doc = json!({ "Card": { "Elevation": { "$type": "number", "$value": 2 } } });
        let config = Config::default();
        let mut ctx = TokenContext::builtin();
        let records = extract(&doc, &config.naming, &ctx.keywords);
        let block = collect(&records, &config, &mut ctx);
        assert_eq!(block["card"]["elevation"], "2");
        assert!(ctx.mapper.pending().contains_key("elevation"));
    }

    #[test]
    fn write_rules_indents_every_line() {
        let mut block = ClassBlock::new();
        block
            .entry("a".to_string())
            .or_default()
            .insert("color".to_string(), "red".to_string());
        assert_eq!(write_rules(&block, "  "), "  .a {\n    color: red;\n  }\n");
    }
}
