use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptySeparator { field: &'static str },

    #[error("{field} '{value}' is longer than {max} characters")]
    SeparatorTooLong {
        field: &'static str,
        value: String,
        max: usize,
    },

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to load a standard-keyword file. Callers normally degrade to the
/// built-in list instead of surfacing this.
#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("failed to read keyword file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("keyword file {} is not a JSON array of strings: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no keyword file could be loaded")]
    NoCandidates,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access mapping store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mapping store {} holds malformed data: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised inside a generation pass. `render` turns these into a CSS
/// comment so they never reach the caller.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no input document to convert")]
    NoInput,

    #[error("default file index {index} is out of range ({count} files)")]
    DefaultOutOfRange { index: usize, count: usize },

    #[error("failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_error_names_the_field() {
        let err = ConfigError::SeparatorTooLong {
            field: "pathSeparator",
            value: "------".to_string(),
            max: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("pathSeparator"));
        assert!(msg.contains("5"));
    }

    #[test]
    fn config_error_converts_into_generate_error() {
        let err: GenerateError = ConfigError::EmptySeparator { field: "separator" }.into();
        assert_eq!(err.to_string(), "separator must not be empty");
    }
}
