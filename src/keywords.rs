//! Standard CSS property names.
//!
//! Keywords normally come from a JSON array file; when none can be read the
//! bundled list below is used instead.

use std::{collections::HashSet, fs, path::Path};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::KeywordError;

/// Commonly used CSS properties, bundled as the fallback keyword source.
pub const BUILTIN_PROPERTIES: &[&str] = &[
    "align-content", "align-items", "align-self", "animation", "animation-delay",
    "animation-direction", "animation-duration", "animation-fill-mode",
    "animation-iteration-count", "animation-name", "animation-play-state",
    "animation-timing-function", "backface-visibility", "background",
    "background-attachment", "background-blend-mode", "background-clip", "background-color",
    "background-image", "background-origin", "background-position", "background-repeat",
    "background-size", "border", "border-bottom", "border-bottom-color",
    "border-bottom-left-radius", "border-bottom-right-radius", "border-bottom-style",
    "border-bottom-width", "border-collapse", "border-color", "border-image",
    "border-image-outset", "border-image-repeat", "border-image-slice", "border-image-source",
    "border-image-width", "border-left", "border-left-color", "border-left-style",
    "border-left-width", "border-radius", "border-right", "border-right-color",
    "border-right-style", "border-right-width", "border-spacing", "border-style", "border-top",
    "border-top-color", "border-top-left-radius", "border-top-right-radius", "border-top-style",
    "border-top-width", "border-width", "bottom", "box-shadow", "box-sizing", "caption-side",
    "clear", "clip", "color", "column-count", "column-fill", "column-gap", "column-rule",
    "column-rule-color", "column-rule-style", "column-rule-width", "column-span", "column-width",
    "columns", "content", "counter-increment", "counter-reset", "cursor", "direction",
    "display", "empty-cells", "filter", "flex", "flex-basis", "flex-direction", "flex-flow",
    "flex-grow", "flex-shrink", "flex-wrap", "float", "font", "font-family", "font-size",
    "font-size-adjust", "font-stretch", "font-style", "font-variant", "font-weight", "gap",
    "grid", "grid-area", "grid-auto-columns", "grid-auto-flow", "grid-auto-rows", "grid-column",
    "grid-column-end", "grid-column-gap", "grid-column-start", "grid-gap", "grid-row",
    "grid-row-end", "grid-row-gap", "grid-row-start", "grid-template", "grid-template-areas",
    "grid-template-columns", "grid-template-rows", "height", "justify-content", "left",
    "letter-spacing", "line-height", "list-style", "list-style-image", "list-style-position",
    "list-style-type", "margin", "margin-bottom", "margin-left", "margin-right", "margin-top",
    "max-height", "max-width", "min-height", "min-width", "object-fit", "object-position",
    "opacity", "order", "outline", "outline-color", "outline-offset", "outline-style",
    "outline-width", "overflow", "overflow-x", "overflow-y", "padding", "padding-bottom",
    "padding-left", "padding-right", "padding-top", "page-break-after", "page-break-before",
    "page-break-inside", "perspective", "perspective-origin", "pointer-events", "position",
    "quotes", "resize", "right", "tab-size", "table-layout", "text-align", "text-align-last",
    "text-decoration", "text-decoration-color", "text-decoration-line",
    "text-decoration-style", "text-indent", "text-justify", "text-overflow", "text-shadow",
    "text-transform", "top", "transform", "transform-origin", "transform-style", "transition",
    "transition-delay", "transition-duration", "transition-property",
    "transition-timing-function", "vertical-align", "visibility", "white-space", "width",
    "word-break", "word-spacing", "word-wrap", "writing-mode", "z-index",
];

/// The directional shorthands accepted even when no registry knows them.
pub const DIRECTIONAL_SHORTHANDS: [&str; 4] = [
    "padding-horizontal",
    "padding-vertical",
    "margin-horizontal",
    "margin-vertical",
];

/// Keyword file names tried in order, relative to a data directory.
pub const KEYWORD_FILE_CANDIDATES: [&str; 2] = ["css-keywords.json", "css-keyword.json"];

static BUILTIN: Lazy<KeywordSet> = Lazy::new(KeywordSet::builtin);

/// Shared instance of the bundled list.
pub fn builtin_keywords() -> &'static KeywordSet {
    &BUILTIN
}

/// Lowercased set of standard property names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    names: HashSet<String>,
}
impl KeywordSet {
    pub fn builtin() -> Self {
        Self::from_names(BUILTIN_PROPERTIES.iter().copied())
    }
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }
    pub fn load(path: &Path) -> Result<Self, KeywordError> {
        let text = fs::read_to_string(path).map_err(|source| KeywordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let names: Vec<String> =
            serde_json::from_str(&text).map_err(|source| KeywordError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), count = names.len(), "loaded css keywords");
        Ok(Self::from_names(names))
    }
    /// First candidate that loads wins.
    pub fn load_first<P: AsRef<Path>>(candidates: &[P]) -> Result<Self, KeywordError> {
        let mut last_error = KeywordError::NoCandidates;
        for candidate in candidates {
            match Self::load(candidate.as_ref()) {
                Ok(set) => return Ok(set),
                Err(err) => {
                    warn!("{err}, trying next keyword source");
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
    /// Never fails: an unreadable source degrades to [`KeywordSet::builtin`].
    pub fn load_or_builtin<P: AsRef<Path>>(candidates: &[P]) -> Self {
        if candidates.is_empty() {
            return Self::builtin();
        }
        Self::load_first(candidates).unwrap_or_else(|err| {
            warn!("css keyword load failed, using built-in list: {err}");
            Self::builtin()
        })
    }
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn is_directional_shorthand(name: &str) -> bool {
    DIRECTIONAL_SHORTHANDS
        .iter()
        .any(|shorthand| shorthand.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_matches_case_insensitively() {
        let set = KeywordSet::builtin();
        assert!(set.contains("font-size"));
        assert!(set.contains("Font-Size"));
        assert!(!set.contains("padding-horizontal"));
    }

    #[test]
    fn load_first_falls_through_to_second_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("css-keyword.json");
        let mut file = fs::File::create(&good).unwrap();
        write!(file, r#"["Color", "inset"]"#).unwrap();

        let set = KeywordSet::load_first(&[dir.path().join("css-keywords.json"), good]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("inset"));
        assert!(set.contains("color"));
    }

    #[test]
    fn malformed_file_degrades_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("css-keywords.json");
        fs::write(&bad, "{ not json").unwrap();

        assert!(matches!(
            KeywordSet::load(&bad),
            Err(KeywordError::Parse { .. })
        ));
        assert_eq!(KeywordSet::load_or_builtin(&[bad]), KeywordSet::builtin());
    }
}
