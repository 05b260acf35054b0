//! Generated text together with the file name and MIME type it is saved under.

use crate::{
    config::{Config, OutputMode, TokenFormat},
    context::TokenContext,
    generate::{error_comment, try_render, SourceFile},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub mime: &'static str,
}
impl Artifact {
    pub const CLASSES: Artifact = Artifact {
        file_name: "generated-styles.css",
        mime: "text/css",
    };
    pub const VARIABLES: Artifact = Artifact {
        file_name: "token-variables.css",
        mime: "text/css",
    };
    pub const JSON: Artifact = Artifact {
        file_name: "tokens.json",
        mime: "application/json",
    };
    pub const REFERENCES: Artifact = Artifact {
        file_name: "token-references.css",
        mime: "text/css",
    };
    /// Used when a pass fails and the text is only an error note.
    pub const FALLBACK: Artifact = Artifact {
        file_name: "generated-output.txt",
        mime: "text/plain",
    };

    pub fn for_config(config: &Config) -> Artifact {
        match (config.mode, config.token_format) {
            (OutputMode::JsonToCss, _) => Artifact::CLASSES,
            (OutputMode::JsonToToken, TokenFormat::CssVars) => Artifact::VARIABLES,
            (OutputMode::JsonToToken, TokenFormat::PlainJson) => Artifact::JSON,
            (OutputMode::TokenToToken, _) => Artifact::REFERENCES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub artifact: Artifact,
    pub failed: bool,
}

/// Like [`render`](crate::generate::render), but keeps track of which
/// artifact the text belongs to.
pub fn render_output(config: &Config, sources: &[SourceFile], ctx: &mut TokenContext) -> Output {
    match try_render(config, sources, ctx) {
        Ok(text) => Output {
            text,
            artifact: Artifact::for_config(config),
            failed: false,
        },
        Err(err) => Output {
            text: error_comment(&err),
            artifact: Artifact::FALLBACK,
            failed: true,
        },
    }
}
