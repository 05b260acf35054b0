use itertools::Itertools;
use serde_json::Value;

use crate::naming::{identifier_prefix, transform_segment};

/// Decimal places kept when rounding numeric values.
pub const DEFAULT_DECIMALS: usize = 4;

/// A raw token value as the generators see it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `{Color.Gray.100}`; the whole value must be the reference.
    Ref(Vec<String>),
    /// Leading number with whatever follows kept verbatim (`10.5px`).
    Quantity { number: f64, unit: String },
    Literal(String),
}
impl Expression {
    pub fn parse(value: &str) -> Expression {
        if let Ok(path) = expr_parser::reference(value) {
            return Expression::Ref(path.iter().map(|x| x.to_string()).collect());
        }
        if let Ok((number, unit)) = expr_parser::quantity(value) {
            if let Ok(number) = number.parse::<f64>() {
                return Expression::Quantity {
                    number,
                    unit: unit.to_string(),
                };
            }
        }
        Expression::Literal(value.to_string())
    }
    pub fn from_value(value: &Value) -> Expression {
        match value {
            Value::String(s) => Expression::parse(s),
            Value::Number(n) => match n.as_f64() {
                Some(number) => Expression::Quantity {
                    number,
                    unit: String::new(),
                },
                None => Expression::Literal(n.to_string()),
            },
            other => Expression::Literal(literal(other)),
        }
    }
    /// Rounded numbers, references in the fixed lowercase-dash convention.
    pub fn to_css(&self, decimals: usize) -> String {
        match self {
            Expression::Ref(path) => format!("var(--{})", path.iter().join("-").to_lowercase()),
            Expression::Quantity { number, unit } => {
                format!("{}{unit}", format_number(*number, decimals))
            }
            Expression::Literal(text) => text.clone(),
        }
    }
}

peg::parser! {
  grammar expr_parser() for str {
    rule segment() -> &'input str = $((!"}" !"." [_])+)

    pub(crate) rule reference() -> Vec<&'input str> = "{" v:(segment() ++ ".") "}" { v }

    pub(crate) rule reference_path() -> &'input str = "{" v:$(segment() ++ ".") "}" { v }

    rule number() -> &'input str
        = $("-"? (['0'..='9']+ ("." ['0'..='9']*)? / "." ['0'..='9']+))

    pub(crate) rule quantity() -> (&'input str, &'input str)
        = n:number() u:$(!['0'..='9' | '.'] [_]*) { (n, u) }
  }
}

#[test]
fn test() {
    assert_eq!(
        expr_parser::reference("{hello.world}").unwrap(),
        vec!["hello", "world"]
    );
    assert_eq!(
        expr_parser::reference("{Typography.Display 1.Font Size}").unwrap(),
        vec!["Typography", "Display 1", "Font Size"]
    );
    assert!(expr_parser::reference("{a..b}").is_err());
    assert!(expr_parser::reference("{}").is_err());
    assert!(expr_parser::reference("x {a.b}").is_err());
    assert!(expr_parser::reference("{a.b} y").is_err());
    assert_eq!(expr_parser::quantity("10.00000px").unwrap(), ("10.00000", "px"));
    assert_eq!(expr_parser::quantity("-4px").unwrap(), ("-4", "px"));
    assert_eq!(expr_parser::quantity(".5em").unwrap(), (".5", "em"));
    assert_eq!(expr_parser::quantity("90%").unwrap(), ("90", "%"));
    assert!(expr_parser::quantity("#ff00ff").is_err());
    assert!(expr_parser::quantity("ABC Diatype Variable").is_err());
    assert!(expr_parser::quantity("-").is_err());
    assert!(expr_parser::quantity("1.2.3").is_err());
}

/// The inner path of a value that is exactly one `{...}` reference.
pub fn extract_reference(value: &Value) -> Option<&str> {
    expr_parser::reference_path(value.as_str()?).ok()
}

/// Scalars as text; composite values as compact JSON.
pub fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Rounds to `decimals` places and trims trailing zeros after the point.
pub fn format_number(number: f64, decimals: usize) -> String {
    let fixed = format!("{number:.decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Rounds the leading numeric portion of a string, keeping any unit suffix.
/// Strings without a leading number come back unchanged.
pub fn format_number_value(value: &str, decimals: usize) -> String {
    match Expression::parse(value) {
        Expression::Quantity { number, unit } => format!("{}{unit}", format_number(number, decimals)),
        _ => value.to_string(),
    }
}

pub fn format_value(value: &Value, decimals: usize) -> String {
    match value {
        Value::String(s) => format_number_value(s, decimals),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| n.to_string(), |f| format_number(f, decimals)),
        other => literal(other),
    }
}

/// How a `{path}` reference is spelled as a `var(...)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceStyle {
    /// Joins the prefix to the body.
    pub separator: String,
    /// Joins reference path segments.
    pub path_separator: String,
    pub whitespace_replacement: String,
    pub lowercase: bool,
    pub prefix: Option<String>,
    pub use_prefix: bool,
}
impl Default for ReferenceStyle {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
            path_separator: "-".to_string(),
            whitespace_replacement: "-".to_string(),
            lowercase: true,
            prefix: None,
            use_prefix: false,
        }
    }
}

pub fn transform_reference(path: &str, style: &ReferenceStyle) -> String {
    let body = path
        .split('.')
        .map(|segment| transform_segment(segment, &style.whitespace_replacement, style.lowercase))
        .join(&style.path_separator);
    format!(
        "var({}{body})",
        identifier_prefix(style.prefix.as_deref(), style.use_prefix, &style.separator)
    )
}
