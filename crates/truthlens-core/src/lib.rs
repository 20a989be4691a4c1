//! TruthLens Core Library
//!
//! Prompt contracts, response interpretation and the per-tool orchestration
//! state machine shared by the CLI and the web API.

pub mod analysis;
pub mod config;
pub mod error;
pub mod gateway;
pub mod interpret;
pub mod orchestrator;
pub mod prompt;
pub mod tool;

pub use analysis::model::{
    AnalysisResult, ArticleResult, Classification, CredibilityRating, CredibilityResult,
    FreeTextResult, Severity,
};
pub use config::{ModelSelection, TruthLensConfig};
pub use error::{InputError, ParseError, RemoteError, TruthLensError, TruthLensResult};
pub use gateway::{ModelGateway, ModelResponse};
pub use orchestrator::{Failure, FailureKind, Orchestrator, Outcome, SubmissionState};
pub use prompt::{PromptSpec, ResponseShape};
pub use tool::model::{AnalysisInput, AnalysisRequest, ImagePayload, InputKind, ToolKind};
