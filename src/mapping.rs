//! Non-standard property names and the standard properties they stand for.
//!
//! [`PropertyRegistry`] holds confirmed mappings (the four directional
//! shorthands plus whatever a user registered). [`PropertyMapper`] owns the
//! registry and also tracks names found invalid during generation, each with a
//! heuristic suggestion, until someone confirms them through
//! [`PropertyMapper::update`].

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    keywords::{KeywordSet, DIRECTIONAL_SHORTHANDS},
    validator::{is_standard_property, is_valid_property},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMapping {
    pub name: String,
    #[serde(default)]
    pub mapped_to: IndexSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
impl PropertyMapping {
    pub fn new<I, S>(name: impl Into<String>, mapped_to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            mapped_to: mapped_to.into_iter().map(Into::into).collect(),
            description: None,
        }
    }
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
    pub fn is_mapped(&self) -> bool {
        !self.mapped_to.is_empty()
    }
}

pub fn default_mappings() -> Vec<PropertyMapping> {
    vec![
        PropertyMapping::new("padding-horizontal", ["padding-left", "padding-right"]),
        PropertyMapping::new("padding-vertical", ["padding-top", "padding-bottom"]),
        PropertyMapping::new("margin-horizontal", ["margin-left", "margin-right"]),
        PropertyMapping::new("margin-vertical", ["margin-top", "margin-bottom"]),
    ]
}

fn is_default_name(name: &str) -> bool {
    DIRECTIONAL_SHORTHANDS
        .iter()
        .any(|default| default.eq_ignore_ascii_case(name))
}

/// Confirmed mappings, unique by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRegistry {
    entries: Vec<PropertyMapping>,
}
impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
impl PropertyRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
    pub fn with_defaults() -> Self {
        Self {
            entries: default_mappings(),
        }
    }
    /// Defaults first, then every persisted entry on top of them.
    pub fn from_persisted(persisted: Vec<PropertyMapping>) -> Self {
        let mut registry = Self::with_defaults();
        for mapping in persisted {
            registry.upsert(mapping);
        }
        registry
    }
    pub fn entries(&self) -> &[PropertyMapping] {
        &self.entries
    }
    pub fn find(&self, name: &str) -> Option<&PropertyMapping> {
        self.position(name).map(|index| &self.entries[index])
    }
    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
    }
    /// Replaces the entry with the same name in place, or appends. Returns the
    /// replaced entry.
    fn upsert(&mut self, mapping: PropertyMapping) -> Option<PropertyMapping> {
        match self.position(&mapping.name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index], mapping)),
            None => {
                self.entries.push(mapping);
                None
            }
        }
    }
    fn remove(&mut self, name: &str) -> Option<PropertyMapping> {
        self.position(name).map(|index| self.entries.remove(index))
    }
    /// Entries worth persisting: the built-in defaults are re-added at load
    /// time and never stored.
    pub fn persistable(&self) -> Vec<PropertyMapping> {
        self.entries
            .iter()
            .filter(|entry| !is_default_name(&entry.name))
            .cloned()
            .collect()
    }
}

/// Best-effort guess at the standard properties behind a non-standard name.
pub fn suggest_mapping(name: &str) -> Vec<String> {
    let name = name.to_lowercase();
    let targets: &[&str] = if name.contains("padding-horizontal") {
        &["padding-left", "padding-right"]
    } else if name.contains("padding-vertical") {
        &["padding-top", "padding-bottom"]
    } else if name.contains("margin-horizontal") {
        &["margin-left", "margin-right"]
    } else if name.contains("margin-vertical") {
        &["margin-top", "margin-bottom"]
    } else if name.contains("border") && name.contains("radius") {
        &["border-radius"]
    } else if name.contains("height") {
        &["height"]
    } else if name.contains("width") {
        &["width"]
    } else if name.contains("gap") {
        &["gap"]
    } else if name.contains("horizontal") {
        let base = name.replacen("horizontal", "", 1);
        return vec![format!("{base}left"), format!("{base}right")];
    } else if name.contains("vertical") {
        let base = name.replacen("vertical", "", 1);
        return vec![format!("{base}top"), format!("{base}bottom")];
    } else {
        &[]
    };
    targets.iter().map(|t| t.to_string()).collect()
}

/// How a property name was turned into output property names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Usable as written: standard, vendor-prefixed or registered without targets.
    Valid,
    Custom(Vec<String>),
    /// Invalid name with an unconfirmed mapping (possibly empty).
    Detected(Vec<String>),
}
impl Resolution {
    /// Output property names for `name`. An empty mapping falls back to the
    /// name itself so no value is dropped.
    pub fn targets(&self, name: &str) -> Vec<String> {
        match self {
            Resolution::Custom(targets) | Resolution::Detected(targets) if !targets.is_empty() => {
                targets.clone()
            }
            _ => vec![name.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertyMapper {
    registry: PropertyRegistry,
    detected: IndexMap<String, Vec<String>>,
}
impl PropertyMapper {
    pub fn new(registry: PropertyRegistry) -> Self {
        Self {
            registry,
            detected: IndexMap::new(),
        }
    }
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }
    pub fn custom_properties(&self) -> &[PropertyMapping] {
        self.registry.entries()
    }

    /// Registers (or replaces) the mapping for `name` and clears any pending
    /// detection for it.
    pub fn update<I, S>(&mut self, name: &str, mapped_to: I, description: Option<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mapping = PropertyMapping::new(name, mapped_to);
        mapping.description = description;
        self.forget_detected(name);
        if let Some(previous) = self.registry.upsert(mapping) {
            debug!(name = %previous.name, "replaced property mapping");
        }
    }
    pub fn remove(&mut self, name: &str) -> Option<PropertyMapping> {
        self.forget_detected(name);
        self.registry.remove(name)
    }
    fn forget_detected(&mut self, name: &str) {
        self.detected
            .retain(|detected, _| !detected.eq_ignore_ascii_case(name));
    }

    /// Invalid names seen so far with their suggested targets, awaiting
    /// confirmation.
    pub fn pending(&self) -> &IndexMap<String, Vec<String>> {
        &self.detected
    }
    pub fn needs_confirmation(&self) -> bool {
        self.detected.values().any(|targets| !targets.is_empty())
    }

    pub fn resolve(&mut self, name: &str, keywords: &KeywordSet) -> Resolution {
        if is_standard_property(name, keywords) {
            return Resolution::Valid;
        }
        if let Some(custom) = self.registry.find(name).filter(|m| m.is_mapped()) {
            return Resolution::Custom(custom.mapped_to.iter().cloned().collect());
        }
        if is_valid_property(name, Some(keywords), self.registry.entries()) {
            return Resolution::Valid;
        }
        if let Some(targets) = self.detected.get(name) {
            return Resolution::Detected(targets.clone());
        }
        let suggestion = suggest_mapping(name);
        debug!(name, ?suggestion, "invalid css property detected");
        self.detected.insert(name.to_string(), suggestion.clone());
        Resolution::Detected(suggestion)
    }

    /// Replaces each invalid declaration that has targets with one declaration
    /// per target.
    pub fn apply(&self, declarations: &IndexMap<String, String>) -> IndexMap<String, String> {
        apply_mappings(declarations, &self.detected)
    }
}

pub fn apply_mappings(
    declarations: &IndexMap<String, String>,
    invalid: &IndexMap<String, Vec<String>>,
) -> IndexMap<String, String> {
    let mut result = declarations.clone();
    for (name, targets) in invalid {
        if targets.is_empty() {
            continue;
        }
        if let Some(value) = result.shift_remove(name) {
            for target in targets {
                result.insert(target.clone(), value.clone());
            }
        }
    }
    result
}
