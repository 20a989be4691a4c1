//! The seam between the tools and a remote generative model.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::prompt::PromptSpec;
use crate::tool::model::ImagePayload;

/// Raw text answered by the model for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    raw_text: String,
}

impl ModelResponse {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// A remote model reachable through a single call.
///
/// Implementations make exactly one outbound call per `invoke` and never
/// retry. When an image is given, the call is multimodal.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Provider name, for logs.
    fn provider(&self) -> &str;

    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<ModelResponse, RemoteError>;

    /// Send a built prompt.
    async fn invoke_prompt(
        &self,
        model: &str,
        spec: &PromptSpec,
        image: Option<&ImagePayload>,
    ) -> Result<ModelResponse, RemoteError> {
        self.invoke(model, &spec.instruction_text, image).await
    }
}
