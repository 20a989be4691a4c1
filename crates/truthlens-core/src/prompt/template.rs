//! Prompt text and response schemas for each tool.

use crate::interpret::field::{FieldDefault, FieldKind, FieldSpec};

pub const ARTICLE_ROLE: &str = "You are an expert fact-checker. Analyze the news text.";
pub const ARTICLE_SECTION: &str = "News Text to Analyze";

pub const SOURCE_ROLE: &str =
    "You are a media analyst. Analyze the credibility of the news source URL provided.";
pub const SOURCE_SECTION: &str = "URL to Analyze";

pub const IMAGE_PROMPT: &str = "\
You are a visual forensics expert. Analyze this image. Has it been used in prominent misinformation campaigns? \
Are there signs of digital alteration? Describe the image's likely origin and context. \
Provide a brief, clear summary of your findings in markdown.";

pub const BIAS_INSTRUCTIONS: &str = "\
You are an expert in linguistics. Analyze the text to identify manipulative techniques like \
'emotional language', 'ad hominem attacks', 'loaded questions', or 'false dichotomies'. \
For each technique, provide the quote. Present findings as a markdown-formatted list.";
pub const BIAS_SECTION: &str = "Text to Analyze";

pub const ARTICLE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "classification",
        kind: FieldKind::Label,
        allowed: &["REAL", "FAKE", "MISLEADING"],
        guidance: "",
        default: FieldDefault::Text("Error"),
    },
    FieldSpec {
        name: "confidence",
        kind: FieldKind::Fraction,
        allowed: &[],
        guidance: "A float score between 0.0 and 1.0",
        default: FieldDefault::Number(0.0),
    },
    FieldSpec {
        name: "explanation",
        kind: FieldKind::Markdown,
        allowed: &[],
        guidance: "A detailed markdown explanation",
        default: FieldDefault::Text("Could not generate explanation."),
    },
];

pub const SOURCE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "rating",
        kind: FieldKind::Label,
        allowed: &["Highly Credible", "Mixed Credibility", "Not Credible", "Unknown"],
        guidance: "",
        default: FieldDefault::Text("Error"),
    },
    FieldSpec {
        name: "summary",
        kind: FieldKind::Markdown,
        allowed: &[],
        guidance: "A markdown explanation covering reputation, bias, and ownership",
        default: FieldDefault::Text("Could not generate summary."),
    },
];
