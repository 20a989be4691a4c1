//! Prompt construction.
//!
//! [`build`] is pure: the same tool and input always give the same prompt.

pub mod template;

use crate::error::InputError;
use crate::interpret::field::{quoted_list, FieldSpec};
use crate::tool::model::{AnalysisInput, ToolKind};

/// What the model is asked to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    StructuredJson,
    FreeMarkdown,
}

/// A finished prompt plus the contract its answer is checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub tool: ToolKind,
    pub instruction_text: String,
    pub expected_shape: ResponseShape,
    /// Present only for [`ResponseShape::StructuredJson`].
    pub json_fields: Option<&'static [FieldSpec]>,
}

/// Build the prompt for a tool.
///
/// Blank text or URLs and inputs of the wrong kind are refused; callers are
/// expected to have validated the request already.
pub fn build(tool: ToolKind, input: &AnalysisInput) -> Result<PromptSpec, InputError> {
    if tool.input_kind() != input.kind() {
        return Err(InputError::Mismatch {
            tool,
            input: input.kind(),
        });
    }
    if input.is_blank() {
        return Err(InputError::Empty(tool));
    }

    let spec = match (tool, input) {
        (ToolKind::ArticleAnalysis, AnalysisInput::Text(text)) => structured(
            tool,
            template::ARTICLE_ROLE,
            template::ARTICLE_FIELDS,
            template::ARTICLE_SECTION,
            text,
        ),
        (ToolKind::SourceCredibility, AnalysisInput::Url(url)) => structured(
            tool,
            template::SOURCE_ROLE,
            template::SOURCE_FIELDS,
            template::SOURCE_SECTION,
            url,
        ),
        (ToolKind::BiasAnalysis, AnalysisInput::Text(text)) => PromptSpec {
            tool,
            instruction_text: format!(
                "{}\n\n{}",
                template::BIAS_INSTRUCTIONS,
                section(template::BIAS_SECTION, text)
            ),
            expected_shape: ResponseShape::FreeMarkdown,
            json_fields: None,
        },
        // The image travels beside the prompt, never inside it.
        (ToolKind::ImageAuthenticity, _) => PromptSpec {
            tool,
            instruction_text: template::IMAGE_PROMPT.to_string(),
            expected_shape: ResponseShape::FreeMarkdown,
            json_fields: None,
        },
        (_, other) => {
            return Err(InputError::Mismatch {
                tool,
                input: other.kind(),
            })
        }
    };

    Ok(spec)
}

fn structured(
    tool: ToolKind,
    role: &str,
    fields: &'static [FieldSpec],
    section_title: &str,
    user_input: &str,
) -> PromptSpec {
    let names: Vec<&str> = fields.iter().map(|f| f.name).collect();

    let mut text = format!(
        "{} Respond with a single, clean JSON object with keys {}.\n",
        role,
        quoted_list(&names, "and")
    );
    for (i, field) in fields.iter().enumerate() {
        text.push_str(&format!("{}. '{}': {}.\n", i + 1, field.name, field.describe()));
    }
    text.push('\n');
    text.push_str(&section(section_title, user_input));

    PromptSpec {
        tool,
        instruction_text: text,
        expected_shape: ResponseShape::StructuredJson,
        json_fields: Some(fields),
    }
}

/// User input under a delimiter line, verbatim.
fn section(title: &str, body: &str) -> String {
    format!("--- {} ---\n{}", title, body)
}
