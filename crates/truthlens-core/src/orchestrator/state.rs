//! Submission lifecycle states.

use serde::{Deserialize, Serialize};

use crate::analysis::model::AnalysisResult;
use crate::error::{InputError, ParseError, RemoteError};
use crate::tool::model::ToolKind;

/// Where the current submission of a tool stands.
///
/// `Idle → InFlight → Settled`, or `Idle → Settled` when the input is
/// rejected before any call is made.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    InFlight { tool: ToolKind, model: String },
    Settled(Outcome),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Displayed { result: AnalysisResult },
    Failed(Failure),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Displayed { result } => Some(result),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Displayed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Input,
    Remote,
    MalformedJson,
    TypeMismatch,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Remote => "remote",
            Self::MalformedJson => "malformed_json",
            Self::TypeMismatch => "type_mismatch",
        }
    }
}

/// A displayable failure.
///
/// `raw_text` carries the model's answer when it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl From<InputError> for Failure {
    fn from(err: InputError) -> Self {
        Self {
            kind: FailureKind::Input,
            message: err.to_string(),
            raw_text: None,
        }
    }
}

impl From<RemoteError> for Failure {
    fn from(err: RemoteError) -> Self {
        Self {
            kind: FailureKind::Remote,
            message: err.message,
            raw_text: None,
        }
    }
}

impl From<ParseError> for Failure {
    fn from(err: ParseError) -> Self {
        let kind = match err {
            ParseError::MalformedJson { .. } => FailureKind::MalformedJson,
            ParseError::TypeMismatch { .. } => FailureKind::TypeMismatch,
        };
        Self {
            kind,
            message: err.to_string(),
            raw_text: Some(err.raw().to_string()),
        }
    }
}
