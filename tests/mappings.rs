use std::path::Path;

use serde_json::json;
use token_parser::{
    mapping::Resolution,
    scanner::{detect_custom_properties, expand_custom_properties},
    store::{JsonFileStore, MappingStore},
    render, Config, SourceFile, TokenContext,
};

#[test]
fn saved_mappings_drive_class_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("mappings.json"));

    let mut ctx = TokenContext::load::<&Path>(&[], Some(&store));
    ctx.mapper
        .update("inset-inline", ["left", "right"], Some("both sides".to_string()));
    store.save(ctx.mapper.registry()).unwrap();

    let mut ctx = TokenContext::load::<&Path>(&[], Some(&store));
    let source = SourceFile::new(
        "tokens.json",
        json!({ "Overlay": { "Inset Inline": { "$type": "dimension", "$value": "0px" } } }),
    );
    let css = render(&Config::default(), &[source], &mut ctx);
    assert_eq!(css, ".overlay {\n  left: 0px;\n  right: 0px;\n}\n\n");
    assert!(!ctx.mapper.needs_confirmation());
}

#[test]
fn guesses_wait_for_confirmation() {
    let mut ctx = TokenContext::builtin();
    let source = SourceFile::new(
        "tokens.json",
        json!({ "Card": { "Item Gap Size": { "$type": "dimension", "$value": 12 } } }),
    );
    let css = render(&Config::default(), &[source], &mut ctx);
    assert!(css.contains("  gap: 12;\n"));
    assert!(ctx.mapper.needs_confirmation());
    assert_eq!(ctx.mapper.pending()["item-gap-size"], ["gap"]);

    ctx.mapper.update("item-gap-size", ["row-gap"], None);
    assert!(ctx.mapper.pending().is_empty());
    assert_eq!(
        ctx.mapper.resolve("item-gap-size", &ctx.keywords),
        Resolution::Custom(vec!["row-gap".to_string()])
    );
}

#[test]
fn scanner_uses_registry_mappings() {
    let ctx = TokenContext::builtin();
    let css = ".box { margin-vertical: 8px; shadow-depth: 2; }";
    let found = detect_custom_properties(css, &ctx.keywords, ctx.mapper.custom_properties());
    assert_eq!(found.len(), 1);
    assert!(found.contains("shadow-depth"));

    let expanded = expand_custom_properties(css, ctx.mapper.custom_properties()).unwrap();
    assert_eq!(
        expanded,
        ".box { margin-top: 8px; margin-bottom: 8px; shadow-depth: 2; }"
    );
}
