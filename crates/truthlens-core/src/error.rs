//! Centralized error types for TruthLens.

use thiserror::Error;

use crate::tool::model::{InputKind, ToolKind};

/// A submission that cannot be sent to the model.
///
/// Raised before any prompt is built, so no gateway call is ever made for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{}", .0.empty_input_message())]
    Empty(ToolKind),

    #[error("{tool} does not accept {input} input")]
    Mismatch { tool: ToolKind, input: InputKind },

    #[error("Unsupported image format: {0}. Upload a JPG or PNG image.")]
    UnsupportedImage(String),
}

/// Failure reported by the model provider or the transport in front of it.
///
/// Transport failures, provider-side errors and rejected requests are not
/// told apart; the message is whatever the provider (or transport) said.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    pub status: Option<u16>,
}

impl RemoteError {
    /// Create a remote error without an HTTP status.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Create a remote error tagged with the HTTP status the provider returned.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

/// The model answered, but not in the shape the prompt asked for.
///
/// Both variants keep the raw model text untouched for diagnostic display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Could not parse the AI's response. Error: {message}")]
    MalformedJson { message: String, raw: String },

    #[error("Could not parse the AI's response. Error: field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
        raw: String,
    },
}

impl ParseError {
    /// Create a malformed-JSON error.
    pub fn malformed(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
            raw: raw.into(),
        }
    }

    /// Create a type-mismatch error for a declared field.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found: found.into(),
            raw: raw.into(),
        }
    }

    /// The model text that failed to parse, exactly as received.
    pub fn raw(&self) -> &str {
        match self {
            Self::MalformedJson { raw, .. } | Self::TypeMismatch { raw, .. } => raw,
        }
    }
}

/// Main error type for TruthLens operations.
#[derive(Error, Debug)]
pub enum TruthLensError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Model call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for TruthLens operations.
pub type TruthLensResult<T> = Result<T, TruthLensError>;

impl TruthLensError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
