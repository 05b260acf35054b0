//! Conversion settings.
//!
//! Everything here is an independent toggle or value; the generators read
//! what applies to their mode and ignore the rest. Files are TOML:
//!
//! ```toml
//! mode = "tokenToToken"
//! pathSeparator = "_"
//! useSourcePrefix = true
//! sourcePrefix = "core"
//!
//! [naming]
//! separator = "-"
//! propertyPathDepth = "all"
//! usePrefix = true
//! prefix = "tgds"
//!
//! [[files]]
//! minWidth = 1440
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    expression::{ReferenceStyle, DEFAULT_DECIMALS},
    naming::NamingOptions,
};

pub const MAX_SEPARATOR_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum OutputMode {
    /// CSS class rules grouped by path.
    #[default]
    #[value(name = "jsonToCss")]
    JsonToCss,
    /// Token values as custom properties or plain JSON.
    #[value(name = "jsonToToken")]
    JsonToToken,
    /// Custom properties whose references point at other custom properties.
    #[value(name = "tokenToToken")]
    TokenToToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ResponsiveMode {
    #[default]
    #[value(name = "resolution")]
    Resolution,
    #[value(name = "theme")]
    Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum TokenFormat {
    #[default]
    #[value(name = "cssVars")]
    CssVars,
    #[value(name = "plainJson")]
    PlainJson,
}

/// Per-input metadata for multi-file class output. Widths are read in
/// resolution mode, the label in theme mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileVariant {
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub label: Option<String>,
}
impl FileVariant {
    /// Desktop, tablet, then mobile widths; `light` then `dark` themes.
    pub fn defaults_for(index: usize) -> Self {
        let (min_width, max_width) = match index {
            0 => (Some(1440), None),
            1 => (Some(768), Some(1439)),
            _ => (None, Some(767)),
        };
        Self {
            min_width,
            max_width,
            label: Some(if index == 0 { "light" } else { "dark" }.to_string()),
        }
    }
    pub fn has_bounds(&self) -> bool {
        self.min_width.is_some() || self.max_width.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub mode: OutputMode,
    pub naming: NamingOptions,
    pub decimals: usize,
    pub use_code_syntax: bool,
    pub token_format: TokenFormat,
    pub responsive: ResponsiveMode,
    /// Joins segments of token-to-token names and references.
    pub path_separator: String,
    pub source_prefix: Option<String>,
    pub use_source_prefix: bool,
    pub default_file: usize,
    pub files: Vec<FileVariant>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            naming: NamingOptions::default(),
            decimals: DEFAULT_DECIMALS,
            use_code_syntax: false,
            token_format: TokenFormat::default(),
            responsive: ResponsiveMode::default(),
            path_separator: "-".to_string(),
            source_prefix: Some("tgds".to_string()),
            use_source_prefix: false,
            default_file: 0,
            files: Vec::new(),
        }
    }
}
impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_separator("separator", &self.naming.separator, false)?;
        check_separator(
            "whitespaceReplacement",
            &self.naming.whitespace_replacement,
            true,
        )?;
        check_separator("pathSeparator", &self.path_separator, false)?;
        Ok(())
    }
    /// Metadata for input `index`, falling back to the positional defaults.
    pub fn file_variant(&self, index: usize) -> FileVariant {
        self.files
            .get(index)
            .cloned()
            .unwrap_or_else(|| FileVariant::defaults_for(index))
    }
    pub fn file_variants(&self, count: usize) -> Vec<FileVariant> {
        (0..count).map(|index| self.file_variant(index)).collect()
    }
    /// Naming for token-to-token targets: segments join with the path
    /// separator instead of the general one.
    pub fn target_naming(&self) -> NamingOptions {
        NamingOptions {
            separator: self.path_separator.clone(),
            ..self.naming.clone()
        }
    }
    pub fn reference_style(&self) -> ReferenceStyle {
        ReferenceStyle {
            separator: self.naming.separator.clone(),
            path_separator: self.path_separator.clone(),
            whitespace_replacement: self.naming.whitespace_replacement.clone(),
            lowercase: self.naming.lowercase,
            prefix: self.source_prefix.clone(),
            use_prefix: self.use_source_prefix,
        }
    }
}

fn check_separator(field: &'static str, value: &str, allow_empty: bool) -> Result<(), ConfigError> {
    if value.is_empty() && !allow_empty {
        return Err(ConfigError::EmptySeparator { field });
    }
    if value.chars().count() > MAX_SEPARATOR_LEN {
        return Err(ConfigError::SeparatorTooLong {
            field,
            value: value.to_string(),
            max: MAX_SEPARATOR_LEN,
        });
    }
    Ok(())
}
