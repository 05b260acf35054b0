//! Width ranges and theme selectors for the non-default inputs of a
//! multi-file class pass.

use convert_case::{Case, Casing};
use tracing::warn;

use crate::config::FileVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthRange {
    /// At least one bound is known.
    Bounded { min: Option<u32>, max: Option<u32> },
    /// No bounds on the file or its siblings.
    Unbounded,
    /// Sibling bounds leave no room (lower > upper).
    NeedsManual,
}
impl WidthRange {
    /// Explicit bounds win. Otherwise the range fills the gap between the
    /// siblings: one past the largest sibling max up to one below the
    /// smallest sibling min.
    pub fn derive(index: usize, variants: &[FileVariant]) -> WidthRange {
        let own = &variants[index];
        if own.has_bounds() {
            return WidthRange::Bounded {
                min: own.min_width,
                max: own.max_width,
            };
        }
        let siblings = || {
            variants
                .iter()
                .enumerate()
                .filter(move |(i, _)| *i != index)
                .map(|(_, variant)| variant)
        };
        let lower = siblings()
            .filter_map(|v| v.max_width)
            .max()
            .map(|max| max.saturating_add(1));
        let upper = siblings().filter_map(|v| v.min_width).min();
        let upper = match upper {
            Some(0) => return WidthRange::NeedsManual,
            Some(min) => Some(min - 1),
            None => None,
        };
        match (lower, upper) {
            (Some(lo), Some(hi)) if lo > hi => {
                warn!(index, lo, hi, "width range needs manual resolution");
                WidthRange::NeedsManual
            }
            (None, None) => WidthRange::Unbounded,
            (min, max) => WidthRange::Bounded { min, max },
        }
    }

    /// The `@media` prelude, or `None` when no query can be written.
    pub fn media_query(&self) -> Option<String> {
        match self {
            WidthRange::Bounded { min, max } => Some(
                match (min, max) {
                    (Some(min), Some(max)) => {
                        format!("@media (min-width: {min}px) and (max-width: {max}px)")
                    }
                    (Some(min), None) => format!("@media (min-width: {min}px)"),
                    (None, Some(max)) => format!("@media (max-width: {max}px)"),
                    (None, None) => "@media all".to_string(),
                },
            ),
            WidthRange::Unbounded => Some("@media all".to_string()),
            WidthRange::NeedsManual => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            WidthRange::Bounded {
                min: Some(min),
                max: Some(max),
            } => format!("{min}px - {max}px"),
            WidthRange::Bounded {
                min: Some(min),
                max: None,
            } => format!("{min}px and up"),
            WidthRange::Bounded {
                min: None,
                max: Some(max),
            } => format!("{max}px and below"),
            WidthRange::Bounded {
                min: None,
                max: None,
            }
            | WidthRange::Unbounded => "all widths".to_string(),
            WidthRange::NeedsManual => "range needs manual resolution".to_string(),
        }
    }
}

/// The label for a theme variant, falling back to the positional default.
pub fn theme_label(index: usize, variant: &FileVariant) -> String {
    variant
        .label
        .clone()
        .filter(|label| !label.trim().is_empty())
        .or_else(|| FileVariant::defaults_for(index).label)
        .unwrap_or_default()
}

/// `[data-theme="high-contrast"]` for the label `High Contrast`. Only
/// letters, digits, `-` and `_` survive into the attribute value.
pub fn theme_selector(label: &str) -> String {
    let value: String = label
        .to_case(Case::Kebab)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    format!("[data-theme=\"{value}\"]")
}

/// `text` with every `*/` removed so it cannot end a CSS comment early.
pub fn comment_text(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("*/") {
        out = out.replace("*/", "");
    }
    out
}
