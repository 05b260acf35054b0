use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Platform preferred when picking a code-syntax override.
pub const WEB_PLATFORM: &str = "web";

/// The `$extensions` object of a token. Only the Figma namespace is read;
/// other vendors are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Extensions {
    #[serde(rename = "com.figma", default)]
    pub figma: Option<FigmaExtension>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaExtension {
    /// Platform name → literal value for that platform.
    #[serde(default)]
    pub code_syntax: IndexMap<String, Value>,
}

impl Extensions {
    /// Lenient: a malformed `$extensions` value reads as "no extensions".
    pub fn from_node(value: Option<&Value>) -> Option<Self> {
        let value = value?;
        match Extensions::deserialize(value) {
            Ok(extensions) => Some(extensions),
            Err(err) => {
                tracing::debug!("ignoring malformed $extensions: {err}");
                None
            }
        }
    }
    pub fn code_syntax(&self) -> Option<&IndexMap<String, Value>> {
        self.figma
            .as_ref()
            .map(|figma| &figma.code_syntax)
            .filter(|syntax| !syntax.is_empty())
    }
}

/// The `web` override if set, otherwise the first platform's value. Empty,
/// null, `false` and zero values do not count as overrides.
pub fn preferred_override(code_syntax: &IndexMap<String, Value>) -> Option<&Value> {
    code_syntax
        .get(WEB_PLATFORM)
        .filter(|value| is_present(value))
        .or_else(|| code_syntax.values().next().filter(|value| is_present(value)))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
