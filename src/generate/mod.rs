//! Generation passes over one or more token documents.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    config::{Config, OutputMode, TokenFormat},
    context::TokenContext,
    error::GenerateError,
    token::extract,
};

pub mod classes;
pub mod references;
pub mod responsive;
pub mod variables;

/// One input document. `document` is `None` when the file could not be read
/// or parsed; such files are left out of the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub document: Option<Value>,
}
impl SourceFile {
    pub fn new(name: impl Into<String>, document: Value) -> Self {
        Self {
            name: name.into(),
            document: Some(document),
        }
    }
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let name = name.into();
        let document = match serde_json::from_str(text) {
            Ok(document) => Some(document),
            Err(err) => {
                error!(file = %name, "failed to parse token document: {err}");
                None
            }
        };
        Self { name, document }
    }
}

pub(crate) fn default_index(config: &Config, sources: &[SourceFile]) -> Result<usize, GenerateError> {
    if sources.is_empty() {
        return Err(GenerateError::NoInput);
    }
    if config.default_file >= sources.len() {
        return Err(GenerateError::DefaultOutOfRange {
            index: config.default_file,
            count: sources.len(),
        });
    }
    Ok(config.default_file)
}

/// Runs one pass and reports failures as a CSS comment in the output.
pub fn render(config: &Config, sources: &[SourceFile], ctx: &mut TokenContext) -> String {
    match try_render(config, sources, ctx) {
        Ok(output) => output,
        Err(err) => error_comment(&err),
    }
}

pub fn error_comment(err: &GenerateError) -> String {
    format!(
        "/* Error while generating output: {} */",
        responsive::comment_text(&err.to_string())
    )
}

pub fn try_render(
    config: &Config,
    sources: &[SourceFile],
    ctx: &mut TokenContext,
) -> Result<String, GenerateError> {
    config.validate()?;
    let output = match config.mode {
        OutputMode::JsonToCss => classes::generate(config, sources, ctx)?,
        OutputMode::JsonToToken | OutputMode::TokenToToken => {
            let default = default_index(config, sources)?;
            if sources.len() > 1 {
                info!(file = %sources[default].name, "using only the default file");
            }
            let document = sources[default]
                .document
                .as_ref()
                .ok_or(GenerateError::NoInput)?;
            let records = extract(document, &config.naming, &ctx.keywords);
            match (config.mode, config.token_format) {
                (OutputMode::TokenToToken, _) => references::token_to_token(&records, config),
                (_, TokenFormat::CssVars) => variables::css_vars(
                    &records,
                    &config.naming,
                    config.use_code_syntax,
                    config.decimals,
                ),
                (_, TokenFormat::PlainJson) => variables::plain_json(
                    &records,
                    &config.naming,
                    config.use_code_syntax,
                    config.decimals,
                )?,
            }
        }
    };
    if ctx.mapper.needs_confirmation() {
        warn!(
            pending = ctx.mapper.pending().len(),
            "some property names were mapped by guess and need confirmation"
        );
    }
    info!(mode = ?config.mode, bytes = output.len(), "generation pass finished");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failures_become_comments() {
        let mut ctx = TokenContext::builtin();
        let out = render(&Config::default(), &[], &mut ctx);
        assert_eq!(out, "/* Error while generating output: no input document to convert */");

        let mut config = Config::default();
        config.default_file = 3;
        let sources = [SourceFile::new("a.json", json!({}))];
        assert!(render(&config, &sources, &mut ctx).contains("out of range"));

        let mut config = Config::default();
        config.naming.separator = String::new();
        assert!(render(&config, &sources, &mut ctx).starts_with("/* Error while generating output:"));
    }

    #[test]
    fn unparsable_source_has_no_document() {
        let source = SourceFile::parse("broken.json", "{ nope");
        assert!(source.document.is_none());
        let mut ctx = TokenContext::builtin();
        let out = render(&Config::default(), &[source], &mut ctx);
        assert!(out.contains("no input document"));
    }
}
