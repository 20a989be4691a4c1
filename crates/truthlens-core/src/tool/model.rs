//! Tool and request domain models.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::media;
use crate::error::InputError;

/// One of the four analysis tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    #[serde(rename = "article")]
    ArticleAnalysis,
    #[serde(rename = "source")]
    SourceCredibility,
    #[serde(rename = "image")]
    ImageAuthenticity,
    #[serde(rename = "bias")]
    BiasAnalysis,
}

impl ToolKind {
    /// All tools, in menu order.
    pub const ALL: [ToolKind; 4] = [
        Self::ArticleAnalysis,
        Self::SourceCredibility,
        Self::ImageAuthenticity,
        Self::BiasAnalysis,
    ];

    /// Machine name, as used in URLs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArticleAnalysis => "article",
            Self::SourceCredibility => "source",
            Self::ImageAuthenticity => "image",
            Self::BiasAnalysis => "bias",
        }
    }

    /// Parse from a machine name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ArticleAnalysis => "Article Analysis",
            Self::SourceCredibility => "Source Credibility",
            Self::ImageAuthenticity => "Image Authenticity",
            Self::BiasAnalysis => "Bias & Propaganda",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Self::ArticleAnalysis => "Analyze article text",
            Self::SourceCredibility => "Check website reputation",
            Self::ImageAuthenticity => "Verify image context",
            Self::BiasAnalysis => "Detect manipulative language",
        }
    }

    /// The kind of input this tool accepts.
    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::ArticleAnalysis | Self::BiasAnalysis => InputKind::Text,
            Self::SourceCredibility => InputKind::Url,
            Self::ImageAuthenticity => InputKind::Image,
        }
    }

    /// Inline warning shown when the submission is empty.
    pub fn empty_input_message(&self) -> &'static str {
        match self {
            Self::ArticleAnalysis => "Please paste an article to analyze.",
            Self::SourceCredibility => "Please enter a URL to check.",
            Self::ImageAuthenticity => "Please upload an image to analyze.",
            Self::BiasAnalysis => "Please enter text to analyze.",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Shape of a tool's user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Url,
    Image,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded image, held in the form the model gateway sends on.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Bytes,
    mime_type: &'static str,
}

impl ImagePayload {
    /// Wrap uploaded bytes, sniffing the container format.
    ///
    /// Empty uploads and formats other than PNG/JPEG are rejected.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, InputError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(InputError::Empty(ToolKind::ImageAuthenticity));
        }

        match media::sniff_mime(&bytes) {
            Some(mime) if media::is_accepted(mime) => Ok(Self {
                bytes,
                mime_type: mime,
            }),
            Some(mime) => Err(InputError::UnsupportedImage(mime.to_string())),
            None => Err(InputError::UnsupportedImage("unrecognized data".to_string())),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// User input for a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    Text(String),
    Url(String),
    Image(ImagePayload),
}

impl AnalysisInput {
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Text(_) => InputKind::Text,
            Self::Url(_) => InputKind::Url,
            Self::Image(_) => InputKind::Image,
        }
    }

    /// True for whitespace-only text or URLs and for empty images.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) | Self::Url(s) => s.trim().is_empty(),
            Self::Image(image) => image.is_empty(),
        }
    }
}

/// A single submission to one tool.
///
/// The input always matches the tool; [`AnalysisRequest::new`] refuses any
/// other pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    tool: ToolKind,
    input: AnalysisInput,
    model: Option<String>,
}

impl AnalysisRequest {
    /// Create a request, checking that the input fits the tool.
    pub fn new(tool: ToolKind, input: AnalysisInput) -> Result<Self, InputError> {
        if tool.input_kind() != input.kind() {
            return Err(InputError::Mismatch {
                tool,
                input: input.kind(),
            });
        }
        Ok(Self {
            tool,
            input,
            model: None,
        })
    }

    pub fn article(text: impl Into<String>) -> Self {
        Self::unchecked(ToolKind::ArticleAnalysis, AnalysisInput::Text(text.into()))
    }

    pub fn source(url: impl Into<String>) -> Self {
        Self::unchecked(ToolKind::SourceCredibility, AnalysisInput::Url(url.into()))
    }

    pub fn image(image: ImagePayload) -> Self {
        Self::unchecked(ToolKind::ImageAuthenticity, AnalysisInput::Image(image))
    }

    pub fn bias(text: impl Into<String>) -> Self {
        Self::unchecked(ToolKind::BiasAnalysis, AnalysisInput::Text(text.into()))
    }

    fn unchecked(tool: ToolKind, input: AnalysisInput) -> Self {
        Self {
            tool,
            input,
            model: None,
        }
    }

    /// Ask for a specific remote model for this call only.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = if model.trim().is_empty() {
            None
        } else {
            Some(model)
        };
        self
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn input(&self) -> &AnalysisInput {
        &self.input
    }

    pub fn model_override(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn image_payload(&self) -> Option<&ImagePayload> {
        match &self.input {
            AnalysisInput::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Reject blank submissions.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.input.is_blank() {
            return Err(InputError::Empty(self.tool));
        }
        Ok(())
    }

    /// Text for a busy indicator while the model call is outstanding.
    pub fn busy_message(&self) -> String {
        match (&self.tool, &self.input) {
            (ToolKind::SourceCredibility, AnalysisInput::Url(url)) => {
                format!("Analyzing credibility of {}...", url.trim())
            }
            (ToolKind::ArticleAnalysis, _) => "Performing unified AI analysis...".to_string(),
            (ToolKind::ImageAuthenticity, _) => {
                "Scanning image context and authenticity...".to_string()
            }
            (ToolKind::BiasAnalysis, _) => "Scanning for manipulative language...".to_string(),
            (ToolKind::SourceCredibility, _) => "Analyzing credibility...".to_string(),
        }
    }
}
