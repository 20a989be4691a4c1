//! The four analysis tools and the requests they accept.

pub mod media;
pub mod model;

pub use model::{AnalysisInput, AnalysisRequest, ImagePayload, InputKind, ToolKind};
