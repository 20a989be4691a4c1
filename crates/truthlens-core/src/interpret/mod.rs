//! Response interpretation.
//!
//! Turns the raw text of a model response into a typed [`AnalysisResult`],
//! or a [`ParseError`] that keeps the raw text for display.

pub mod field;

use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::model::AnalysisResult;
use crate::error::ParseError;
use crate::gateway::ModelResponse;
use crate::prompt::{PromptSpec, ResponseShape};

pub use field::{FieldDefault, FieldKind, FieldSpec, FieldValue};

/// Field values read from a structured response, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues(Vec<(&'static str, FieldValue)>);

impl FieldValues {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Text value of a field, or an empty string if it was not declared.
    pub fn text(&self, name: &str) -> String {
        self.get(name)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
            .to_string()
    }

    /// Numeric value of a field, or `0.0` if it was not declared.
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).and_then(FieldValue::as_number).unwrap_or(0.0)
    }
}

/// Interpret a model response against the prompt that produced it.
pub fn interpret(response: &ModelResponse, spec: &PromptSpec) -> Result<AnalysisResult, ParseError> {
    match spec.expected_shape {
        ResponseShape::FreeMarkdown => Ok(AnalysisResult::free_text(
            spec.tool,
            response.raw_text().to_string(),
        )),
        ResponseShape::StructuredJson => {
            let fields = spec.json_fields.unwrap_or(&[]);
            let values = read_fields(response.raw_text(), fields)?;
            let result = AnalysisResult::from_fields(spec.tool, &values, response.raw_text());
            if let AnalysisResult::Article(article) = &result {
                if !(0.0..=1.0).contains(&article.confidence) {
                    warn!(confidence = article.confidence, "Model returned confidence outside [0, 1]");
                }
            }
            Ok(result)
        }
    }
}

/// Read declared fields from structured model text.
///
/// Missing keys take their documented defaults; only JSON syntax errors and
/// un-coercible values fail.
pub fn read_fields(raw: &str, fields: &[FieldSpec]) -> Result<FieldValues, ParseError> {
    let cleaned = strip_code_fence(raw);

    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| ParseError::malformed(e.to_string(), raw))?;

    let object = value.as_object().ok_or_else(|| {
        ParseError::malformed(
            format!("expected a JSON object, found {}", field::describe_json(&value)),
            raw,
        )
    })?;

    let mut values = Vec::with_capacity(fields.len());
    for spec in fields {
        let value = match object.get(spec.name) {
            Some(present) => spec.coerce(present).map_err(|found| {
                ParseError::type_mismatch(spec.name, spec.kind.expected(), found, raw)
            })?,
            None => {
                debug!(field = spec.name, "Field missing from response, using default");
                spec.default_value()
            }
        };
        values.push((spec.name, value));
    }

    Ok(FieldValues(values))
}

/// Strip one leading and one trailing markdown code fence.
///
/// The opening fence may carry a language tag (```` ```json ````); it is
/// dropped along with the fence. Text outside the fences is left alone.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{Classification, CredibilityRating};
    use crate::prompt;
    use crate::tool::model::{AnalysisInput, ToolKind};

    fn article_spec() -> PromptSpec {
        prompt::build(
            ToolKind::ArticleAnalysis,
            &AnalysisInput::Text("Moon made of cheese".into()),
        )
        .unwrap()
    }

    fn source_spec() -> PromptSpec {
        prompt::build(ToolKind::SourceCredibility, &AnalysisInput::Url("bbc.com".into())).unwrap()
    }

    fn bias_spec() -> PromptSpec {
        prompt::build(ToolKind::BiasAnalysis, &AnalysisInput::Text("x".into())).unwrap()
    }

    fn article(raw: &str) -> Result<AnalysisResult, ParseError> {
        interpret(&ModelResponse::new(raw), &article_spec())
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  ```\n{\"a\":1}\n```  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON{}```"), "{}");
        assert_eq!(strip_code_fence("{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json\n{}"), "{}");
        assert_eq!(strip_code_fence("{\"a\":\"```\"}"), "{\"a\":\"```\"}");
        assert_eq!(strip_code_fence("plain"), "plain");
    }

    #[test]
    fn test_fenced_article_parses() {
        let raw = "```json\n{\"classification\":\"REAL\",\"confidence\":0.9,\"explanation\":\"x\"}\n```";
        match article(raw).unwrap() {
            AnalysisResult::Article(a) => {
                assert_eq!(a.classification, Classification::Real);
                assert_eq!(a.confidence, 0.9);
                assert_eq!(a.explanation, "x");
            }
            other => panic!("expected article result, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        match article("{}").unwrap() {
            AnalysisResult::Article(a) => {
                assert_eq!(a.classification, Classification::Unrecognized("Error".into()));
                assert_eq!(a.classification.to_string(), "Error");
                assert_eq!(a.confidence, 0.0);
                assert_eq!(a.explanation, "Could not generate explanation.");
            }
            other => panic!("expected article result, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_keeps_raw_text() {
        let err = article("{not json").unwrap_err();
        assert!(matches!(err, ParseError::MalformedJson { .. }));
        assert_eq!(err.raw(), "{not json");
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        let err = article("[1, 2, 3]").unwrap_err();
        match &err {
            ParseError::MalformedJson { message, raw } => {
                assert_eq!(message, "expected a JSON object, found an array");
                assert_eq!(raw, "[1, 2, 3]");
            }
            other => panic!("expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_confidence_is_type_mismatch() {
        let raw = "{\"classification\":\"FAKE\",\"confidence\":\"very\"}";
        let err = article(raw).unwrap_err();
        match &err {
            ParseError::TypeMismatch { field, expected, raw: kept, .. } => {
                assert_eq!(field, "confidence");
                assert_eq!(*expected, "a number");
                assert_eq!(kept, raw);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unlisted_label_and_out_of_range_confidence_pass_through() {
        let raw = "{\"classification\":\"SATIRE\",\"confidence\":1.7,\"explanation\":\"- a\"}";
        match article(raw).unwrap() {
            AnalysisResult::Article(a) => {
                assert_eq!(a.classification.to_string(), "SATIRE");
                assert_eq!(a.confidence, 1.7);
            }
            other => panic!("expected article result, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_is_idempotent() {
        let response = ModelResponse::new("```json\n{\"rating\":\"Mixed Credibility\"}\n```");
        let spec = source_spec();
        let first = interpret(&response, &spec).unwrap();
        let second = interpret(&response, &spec).unwrap();
        assert_eq!(first, second);

        match first {
            AnalysisResult::Credibility(c) => {
                assert_eq!(c.rating, CredibilityRating::MixedCredibility);
                assert_eq!(c.summary, "Could not generate summary.");
            }
            other => panic!("expected credibility result, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rating_defaults_to_error_label() {
        let response = ModelResponse::new("{\"summary\":\"Owned by X.\"}");
        match interpret(&response, &source_spec()).unwrap() {
            AnalysisResult::Credibility(c) => {
                assert_eq!(c.rating.to_string(), "Error");
                assert_eq!(c.summary, "Owned by X.");
            }
            other => panic!("expected credibility result, got {:?}", other),
        }
    }

    #[test]
    fn test_free_markdown_is_passed_through_unchanged() {
        let raw = "```json\n{\"not\": \"parsed\"}\n```\n* **Emotional language**: \"disaster\"";
        let result = interpret(&ModelResponse::new(raw), &bias_spec()).unwrap();
        match result {
            AnalysisResult::FreeText(f) => {
                assert_eq!(f.body, raw);
                assert_eq!(f.tool, ToolKind::BiasAnalysis);
            }
            other => panic!("expected free text result, got {:?}", other),
        }
    }

    #[test]
    fn test_read_fields_fills_missing_fields() {
        let values = read_fields("{\"explanation\":\"e\",\"classification\":\"FAKE\"}", article_spec().json_fields.unwrap()).unwrap();
        assert_eq!(values.get("confidence"), Some(&FieldValue::Number(0.0)));
        assert_eq!(values.text("classification"), "FAKE");
        assert_eq!(values.number("confidence"), 0.0);
        assert_eq!(values.text("explanation"), "e");
        assert_eq!(values.text("unknown"), "");
    }
}
