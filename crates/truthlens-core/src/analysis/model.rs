//! Analysis result domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interpret::FieldValues;
use crate::tool::model::ToolKind;

/// Article verdict.
///
/// Labels outside the prompt's allowed set are kept verbatim in
/// `Unrecognized`, including the `Error` placeholder used when the model
/// omits the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    Real,
    Fake,
    Misleading,
    Unrecognized(String),
}

impl Classification {
    pub fn from_label(label: &str) -> Self {
        match label {
            "REAL" => Self::Real,
            "FAKE" => Self::Fake,
            "MISLEADING" => Self::Misleading,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The label exactly as the model wrote it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Real => "REAL",
            Self::Fake => "FAKE",
            Self::Misleading => "MISLEADING",
            Self::Unrecognized(label) => label,
        }
    }

    /// Tone the presentation layer should use for this verdict.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Fake => Severity::Alarm,
            Self::Real => Severity::Ok,
            _ => Severity::Caution,
        }
    }
}

impl From<String> for Classification {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.as_str().to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source credibility rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CredibilityRating {
    HighlyCredible,
    MixedCredibility,
    NotCredible,
    Unknown,
    Unrecognized(String),
}

impl CredibilityRating {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Highly Credible" => Self::HighlyCredible,
            "Mixed Credibility" => Self::MixedCredibility,
            "Not Credible" => Self::NotCredible,
            "Unknown" => Self::Unknown,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::HighlyCredible => "Highly Credible",
            Self::MixedCredibility => "Mixed Credibility",
            Self::NotCredible => "Not Credible",
            Self::Unknown => "Unknown",
            Self::Unrecognized(label) => label,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::HighlyCredible => Severity::Ok,
            Self::NotCredible => Severity::Alarm,
            _ => Severity::Caution,
        }
    }
}

impl From<String> for CredibilityRating {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<CredibilityRating> for String {
    fn from(rating: CredibilityRating) -> Self {
        rating.as_str().to_string()
    }
}

impl fmt::Display for CredibilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation tone of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    Caution,
    Alarm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    pub classification: Classification,
    /// Nominally in `[0, 1]`; not clamped.
    pub confidence: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityResult {
    pub rating: CredibilityRating,
    pub summary: String,
}

/// Markdown returned as-is by the image and bias tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTextResult {
    pub tool: ToolKind,
    pub body: String,
}

/// Result of a settled submission, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Article(ArticleResult),
    Credibility(CredibilityResult),
    FreeText(FreeTextResult),
}

impl AnalysisResult {
    pub fn free_text(tool: ToolKind, body: String) -> Self {
        Self::FreeText(FreeTextResult { tool, body })
    }

    /// Build the typed record for a tool from interpreted fields.
    ///
    /// Tools without a structured record fall back to the raw text.
    pub fn from_fields(tool: ToolKind, values: &FieldValues, raw: &str) -> Self {
        match tool {
            ToolKind::ArticleAnalysis => Self::Article(ArticleResult {
                classification: Classification::from_label(&values.text("classification")),
                confidence: values.number("confidence"),
                explanation: values.text("explanation"),
            }),
            ToolKind::SourceCredibility => Self::Credibility(CredibilityResult {
                rating: CredibilityRating::from_label(&values.text("rating")),
                summary: values.text("summary"),
            }),
            ToolKind::ImageAuthenticity | ToolKind::BiasAnalysis => {
                Self::free_text(tool, raw.to_string())
            }
        }
    }

    pub fn tool(&self) -> ToolKind {
        match self {
            Self::Article(_) => ToolKind::ArticleAnalysis,
            Self::Credibility(_) => ToolKind::SourceCredibility,
            Self::FreeText(f) => f.tool,
        }
    }

    /// The markdown portion of the result.
    pub fn markdown(&self) -> &str {
        match self {
            Self::Article(a) => &a.explanation,
            Self::Credibility(c) => &c.summary,
            Self::FreeText(f) => &f.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::from_label("FAKE"), Classification::Fake);
        assert_eq!(Classification::from_label("fake").to_string(), "fake");
        assert_eq!(Classification::Fake.severity(), Severity::Alarm);
        assert_eq!(Classification::Real.severity(), Severity::Ok);
        assert_eq!(Classification::Misleading.severity(), Severity::Caution);
        assert_eq!(
            Classification::Unrecognized("Error".into()).severity(),
            Severity::Caution
        );
    }

    #[test]
    fn test_rating_labels() {
        for label in ["Highly Credible", "Mixed Credibility", "Not Credible", "Unknown"] {
            let rating = CredibilityRating::from_label(label);
            assert!(!matches!(rating, CredibilityRating::Unrecognized(_)));
            assert_eq!(rating.as_str(), label);
        }
        assert_eq!(CredibilityRating::from_label("Satire").to_string(), "Satire");
    }

    #[test]
    fn test_result_serializes_labels_as_strings() {
        let result = AnalysisResult::Article(ArticleResult {
            classification: Classification::Misleading,
            confidence: 0.4,
            explanation: "Half true.".into(),
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "article");
        assert_eq!(json["classification"], "MISLEADING");
        assert_eq!(json["confidence"], 0.4);

        let back: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_free_text_reports_its_tool() {
        let result = AnalysisResult::free_text(ToolKind::ImageAuthenticity, "ok".into());
        assert_eq!(result.tool(), ToolKind::ImageAuthenticity);
        assert_eq!(result.markdown(), "ok");
        assert_eq!(serde_json::to_value(&result).unwrap()["tool"], "image");
    }
}
