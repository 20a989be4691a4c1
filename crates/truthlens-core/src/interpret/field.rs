//! Declarative descriptors for the keys of a structured model response.
//!
//! One descriptor list drives both sides of the contract: the prompt lists
//! the keys it asks for from it, and the interpreter reads the same keys back.

use serde_json::Value;

/// How a field's JSON value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A short label, ideally one of the field's allowed values.
    Label,
    /// A floating-point score, nominally in `[0, 1]`.
    Fraction,
    /// Free markdown prose.
    Markdown,
}

impl FieldKind {
    /// Name of the expected JSON type, for error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Label | Self::Markdown => "a string",
            Self::Fraction => "a number",
        }
    }
}

/// Value substituted when a field is absent from the response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Text(&'static str),
    Number(f64),
}

/// One key of a structured response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub allowed: &'static [&'static str],
    pub guidance: &'static str,
    pub default: FieldDefault,
}

/// A field value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl FieldSpec {
    /// The documented substitute for a missing key.
    pub fn default_value(&self) -> FieldValue {
        match self.default {
            FieldDefault::Text(s) => FieldValue::Text(s.to_string()),
            FieldDefault::Number(n) => FieldValue::Number(n),
        }
    }

    /// Coerce a present JSON value.
    ///
    /// On failure returns a short description of what was found instead.
    pub fn coerce(&self, value: &Value) -> Result<FieldValue, String> {
        match self.kind {
            FieldKind::Label | FieldKind::Markdown => Ok(match value {
                Value::String(s) => FieldValue::Text(s.clone()),
                Value::Null => self.default_value(),
                other => FieldValue::Text(other.to_string()),
            }),
            FieldKind::Fraction => coerce_number(value).map(FieldValue::Number),
        }
    }

    /// Prompt line describing what the model should put in this key.
    pub fn describe(&self) -> String {
        if self.allowed.is_empty() {
            self.guidance.to_string()
        } else {
            quoted_list(self.allowed, "or")
        }
    }
}

fn coerce_number(value: &Value) -> Result<f64, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(describe_json(value)),
    }
}

/// Short description of a JSON value for error messages.
pub fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

/// Join items as `'a', 'b', or 'c'`.
pub fn quoted_list(items: &[&str], conjunction: &str) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} {} {}", first, conjunction, second),
        [init @ .., last] => format!("{}, {} {}", init.join(", "), conjunction, last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONFIDENCE: FieldSpec = FieldSpec {
        name: "confidence",
        kind: FieldKind::Fraction,
        allowed: &[],
        guidance: "A float score between 0.0 and 1.0",
        default: FieldDefault::Number(0.0),
    };

    const LABEL: FieldSpec = FieldSpec {
        name: "classification",
        kind: FieldKind::Label,
        allowed: &["REAL", "FAKE", "MISLEADING"],
        guidance: "",
        default: FieldDefault::Text("Error"),
    };

    #[test]
    fn test_fraction_accepts_numbers_and_numeric_strings() {
        assert_eq!(CONFIDENCE.coerce(&json!(0.75)), Ok(FieldValue::Number(0.75)));
        assert_eq!(CONFIDENCE.coerce(&json!(1)), Ok(FieldValue::Number(1.0)));
        assert_eq!(CONFIDENCE.coerce(&json!(" 0.5 ")), Ok(FieldValue::Number(0.5)));
    }

    #[test]
    fn test_fraction_rejects_non_numeric() {
        assert_eq!(CONFIDENCE.coerce(&json!("high")), Err("string \"high\"".to_string()));
        assert_eq!(CONFIDENCE.coerce(&json!(null)), Err("null".to_string()));
        assert_eq!(CONFIDENCE.coerce(&json!(true)), Err("boolean true".to_string()));
        assert_eq!(CONFIDENCE.coerce(&json!([0.5])), Err("an array".to_string()));
        assert!(CONFIDENCE.coerce(&json!("NaN")).is_err());
    }

    #[test]
    fn test_label_keeps_unlisted_values_and_stringifies_others() {
        assert_eq!(
            LABEL.coerce(&json!("SATIRE")),
            Ok(FieldValue::Text("SATIRE".to_string()))
        );
        assert_eq!(LABEL.coerce(&json!(3)), Ok(FieldValue::Text("3".to_string())));
        assert_eq!(LABEL.coerce(&json!(null)), Ok(FieldValue::Text("Error".to_string())));
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&["a"], "or"), "'a'");
        assert_eq!(quoted_list(&["a", "b"], "and"), "'a' and 'b'");
        assert_eq!(quoted_list(&["a", "b", "c"], "or"), "'a', 'b', or 'c'");
        assert_eq!(LABEL.describe(), "'REAL', 'FAKE', or 'MISLEADING'");
        assert_eq!(CONFIDENCE.describe(), "A float score between 0.0 and 1.0");
    }
}
