use std::path::Path;

use tracing::{info, warn};

use crate::{
    keywords::KeywordSet,
    mapping::{PropertyMapper, PropertyRegistry},
    store::MappingStore,
};

/// Everything a generation pass consults besides its input and config: the
/// standard keyword list and the property mapper. Loaded once by the caller
/// and passed by reference into every pass.
#[derive(Debug, Clone)]
pub struct TokenContext {
    pub keywords: KeywordSet,
    pub mapper: PropertyMapper,
}
impl Default for TokenContext {
    fn default() -> Self {
        Self::builtin()
    }
}
impl TokenContext {
    pub fn new(keywords: KeywordSet, registry: PropertyRegistry) -> Self {
        Self {
            keywords,
            mapper: PropertyMapper::new(registry),
        }
    }
    pub fn builtin() -> Self {
        Self::new(KeywordSet::builtin(), PropertyRegistry::with_defaults())
    }
    /// Keyword candidates are tried in order; a store failure keeps only the
    /// default mappings. Neither failure stops loading.
    pub fn load<P: AsRef<Path>>(
        keyword_candidates: &[P],
        store: Option<&dyn MappingStore>,
    ) -> Self {
        let keywords = KeywordSet::load_or_builtin(keyword_candidates);
        let persisted = match store.map(|store| store.load()) {
            Some(Ok(mappings)) => mappings,
            Some(Err(err)) => {
                warn!("could not load saved property mappings: {err}");
                Vec::new()
            }
            None => Vec::new(),
        };
        let registry = PropertyRegistry::from_persisted(persisted);
        info!(
            keywords = keywords.len(),
            mappings = registry.entries().len(),
            "token context ready"
        );
        Self::new(keywords, registry)
    }
}
