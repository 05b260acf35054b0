use crate::{
    keywords::{builtin_keywords, is_directional_shorthand, KeywordSet},
    mapping::PropertyMapping,
};

pub const VENDOR_PREFIXES: [&str; 4] = ["-webkit-", "-moz-", "-ms-", "-o-"];

/// Standard, vendor-prefixed standard, registered custom, or one of the four
/// directional shorthands. Without a keyword source the bundled list is used.
pub fn is_valid_property(
    name: &str,
    keywords: Option<&KeywordSet>,
    custom: &[PropertyMapping],
) -> bool {
    let keywords = keywords.unwrap_or(builtin_keywords());
    if keywords.contains(name) {
        return true;
    }
    if let Some(unprefixed) = strip_vendor_prefix(name) {
        return keywords.contains(unprefixed);
    }
    if custom
        .iter()
        .any(|mapping| mapping.name.eq_ignore_ascii_case(name))
    {
        return true;
    }
    is_directional_shorthand(name)
}

/// True only for names the keyword source knows, with or without a vendor
/// prefix. Custom registrations do not count.
pub fn is_standard_property(name: &str, keywords: &KeywordSet) -> bool {
    keywords.contains(name)
        || strip_vendor_prefix(name).map_or(false, |unprefixed| keywords.contains(unprefixed))
}

pub fn strip_vendor_prefix(name: &str) -> Option<&str> {
    VENDOR_PREFIXES.iter().find_map(|prefix| {
        let head = name.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| &name[prefix.len()..])
    })
}
