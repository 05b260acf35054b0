use serde_json::json;
use token_parser::{
    render, render_output, Artifact, Config, Depth, FileVariant, OutputMode, ResponsiveMode,
    SourceFile, TokenContext, TokenFormat,
};

fn gray_tokens() -> SourceFile {
    SourceFile::new(
        "tokens.json",
        json!({ "Color": { "Gray": { "100": { "$type": "color", "$value": "#CCCCCC" } } } }),
    )
}

#[test]
fn css_vars_end_to_end() {
    let mut config = Config::default();
    config.mode = OutputMode::JsonToToken;
    config.token_format = TokenFormat::CssVars;
    config.naming.depth = Depth::All;

    let mut ctx = TokenContext::builtin();
    let css = render(&config, &[gray_tokens()], &mut ctx);
    assert_eq!(css, ":root {\n  --color-gray-100: #CCCCCC;\n}\n");
    assert_eq!(css.matches(":root").count(), 1);
}

#[test]
fn depth_selects_trailing_segments() {
    let mut config = Config::default();
    config.mode = OutputMode::JsonToToken;
    let source = SourceFile::new(
        "type.json",
        json!({ "Typography": { "Display 1": { "Font Size": { "$type": "dimension", "$value": "48px" } } } }),
    );
    let mut ctx = TokenContext::builtin();

    for (depth, name) in [
        (Depth::Last(1), "--font-size"),
        (Depth::Last(2), "--display-1-font-size"),
        (Depth::All, "--typography-display-1-font-size"),
    ] {
        config.naming.depth = depth;
        let css = render(&config, std::slice::from_ref(&source), &mut ctx);
        assert!(css.contains(&format!("  {name}: 48px;\n")), "{depth}: {css}");
    }
}

#[test]
fn multi_file_resolution_wraps_non_default_files() {
    let desktop = SourceFile::new(
        "desktop.json",
        json!({ "Heading": { "Font Size": { "$type": "dimension", "$value": "32px" } } }),
    );
    let mobile = SourceFile::new(
        "mobile.json",
        json!({ "Heading": { "Font Size": { "$type": "dimension", "$value": "24.50px" } } }),
    );
    let mut config = Config::default();
    config.files = vec![
        FileVariant {
            min_width: Some(1440),
            ..Default::default()
        },
        FileVariant {
            max_width: Some(767),
            ..Default::default()
        },
    ];

    let mut ctx = TokenContext::builtin();
    let css = render(&config, &[desktop, mobile], &mut ctx);

    let media = css.find("@media (max-width: 767px) {").unwrap();
    let base = css.find(".heading {\n  font-size: 32px;\n}\n").unwrap();
    assert!(base < media, "{css}");
    assert!(css[media..].contains("  .heading {\n    font-size: 24.5px;\n  }\n"));
    assert_eq!(css.matches("@media").count(), 1);
    assert!(css.contains("/* Base styles - 1440px and up */"));
    assert!(css.contains("/* mobile.json - 767px and below */"));
}

#[test]
fn multi_file_theme_uses_data_attribute() {
    let light = SourceFile::new(
        "light.json",
        json!({ "Surface": { "Background Color": { "$type": "color", "$value": "#FFFFFF" } } }),
    );
    let dark = SourceFile::new(
        "dark.json",
        json!({ "Surface": { "Background Color": { "$type": "color", "$value": "{Color.Gray.900}" } } }),
    );
    let mut config = Config::default();
    config.responsive = ResponsiveMode::Theme;

    let mut ctx = TokenContext::builtin();
    let css = render(&config, &[light, dark], &mut ctx);
    assert!(css.starts_with("/* Theme-responsive CSS */"));
    assert!(css.contains("/* Base styles - light */\n.surface {\n  background-color: #FFFFFF;\n}\n"));
    assert!(css.contains(
        "/* Theme: dark */\n[data-theme=\"dark\"] {\n  .surface {\n    background-color: var(--color-gray-900);\n  }\n}\n"
    ));
}

#[test]
fn labels_and_file_names_stay_inside_comments_and_selectors() {
    let surface = json!({ "Surface": { "Color": { "$type": "color", "$value": "#000000" } } });
    let sources = [
        SourceFile::new("base.json", surface.clone()),
        SourceFile::new("dark */ .x {.json", surface),
    ];
    let mut config = Config::default();
    config.responsive = ResponsiveMode::Theme;
    config.files = vec![
        FileVariant::defaults_for(0),
        FileVariant {
            min_width: None,
            max_width: None,
            label: Some("x\"] */ .evil {".to_string()),
        },
    ];
    let mut ctx = TokenContext::builtin();
    let css = render(&config, &sources, &mut ctx);
    assert_eq!(css.matches("/*").count(), css.matches("*/").count());
    assert!(css.contains("/* Theme: x\"]  .evil { */\n"));
    let selector = css
        .lines()
        .find(|line| line.starts_with("[data-theme="))
        .unwrap();
    assert_eq!(selector.matches('"').count(), 2);
    assert!(selector.ends_with("\"] {"));

    config.responsive = ResponsiveMode::Resolution;
    config.files = vec![FileVariant::defaults_for(0), FileVariant::defaults_for(1)];
    let css = render(&config, &sources, &mut ctx);
    assert_eq!(css.matches("/*").count(), css.matches("*/").count());
    assert!(css.contains("/* dark  .x {.json - "));
}

#[test]
fn unreadable_non_default_file_is_left_out() {
    let mut config = Config::default();
    config.default_file = 1;
    let sources = [SourceFile::parse("broken.json", "{"), gray_tokens()];
    let mut ctx = TokenContext::builtin();
    let css = render(&config, &sources, &mut ctx);
    assert!(css.contains(".color-gray {\n  100: #CCCCCC;\n}\n"));
    assert!(!css.contains("@media"));
}

#[test]
fn plain_json_artifact() {
    let mut config = Config::default();
    config.mode = OutputMode::JsonToToken;
    config.token_format = TokenFormat::PlainJson;
    let mut ctx = TokenContext::builtin();
    let output = render_output(&config, &[gray_tokens()], &mut ctx);
    assert_eq!(output.artifact, Artifact::JSON);
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed, json!({ "color": { "gray": { "100": "#CCCCCC" } } }));
}

#[test]
fn token_to_token_rewrites_references() {
    let mut config = Config::default();
    config.mode = OutputMode::TokenToToken;
    config.naming.depth = Depth::All;
    let source = SourceFile::new(
        "alias.json",
        json!({
            "Button": {
                "Primary": { "$type": "color", "$value": "{Color.Blue.500}" },
                "Opacity": { "$type": "number", "$value": 0.87654321 }
            }
        }),
    );
    let mut ctx = TokenContext::builtin();
    let output = render_output(&config, &[source], &mut ctx);
    assert_eq!(output.artifact.file_name, "token-references.css");
    assert_eq!(
        output.text,
        ":root {\n  --button-primary: var(--color-blue-500);\n  --button-opacity: 0.8765;\n}\n"
    );
}

#[test]
fn generation_errors_are_embedded() {
    let mut config = Config::default();
    config.path_separator = "------".to_string();
    let mut ctx = TokenContext::builtin();
    let out = render(&config, &[gray_tokens()], &mut ctx);
    assert!(out.starts_with("/* Error while generating output: pathSeparator"));
    assert!(out.ends_with(" */"));
}
