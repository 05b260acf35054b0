use itertools::Itertools;
use tracing::info;

use super::variables::formatted_value;
use crate::{
    config::Config,
    expression::{extract_reference, transform_reference},
    token::TokenRecord,
};

/// Custom properties whose `{...}` values become `var(...)` calls on other
/// custom properties. Target names join with the path separator and carry
/// the target prefix; references carry the source prefix.
pub fn token_to_token(records: &[TokenRecord], config: &Config) -> String {
    let naming = config.target_naming();
    let style = config.reference_style();
    let body = records
        .iter()
        .map(|record| {
            let value = match extract_reference(&record.value) {
                Some(path) => transform_reference(path, &style),
                None => formatted_value(record, config.use_code_syntax, config.decimals),
            };
            format!("  {}: {value};\n", naming.identifier(&record.segments))
        })
        .join("");
    info!(count = records.len(), "generated token references");
    format!(":root {{\n{body}}}\n")
}
