//! Tool orchestration.
//!
//! An [`Orchestrator`] wires one tool together: input validation, prompt
//! building, the model call and response interpretation. Its state is
//! published on a watch channel so a front end can show a busy indicator
//! while a call is outstanding.

pub mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ModelSelection;
use crate::error::InputError;
use crate::gateway::ModelGateway;
use crate::interpret;
use crate::prompt;
use crate::tool::model::{AnalysisRequest, ToolKind};

pub use state::{Failure, FailureKind, Outcome, SubmissionState};

/// Drives submissions for a single tool.
///
/// `submit` takes `&mut self`, so one orchestrator never has more than one
/// model call outstanding. Calls are not cancellable.
pub struct Orchestrator {
    tool: ToolKind,
    gateway: Arc<dyn ModelGateway>,
    models: ModelSelection,
    state: watch::Sender<SubmissionState>,
}

impl Orchestrator {
    pub fn new(tool: ToolKind, gateway: Arc<dyn ModelGateway>, models: ModelSelection) -> Self {
        let (state, _rx) = watch::channel(SubmissionState::Idle);
        Self {
            tool,
            gateway,
            models,
            state,
        }
    }

    pub fn article(gateway: Arc<dyn ModelGateway>, models: ModelSelection) -> Self {
        Self::new(ToolKind::ArticleAnalysis, gateway, models)
    }

    pub fn source(gateway: Arc<dyn ModelGateway>, models: ModelSelection) -> Self {
        Self::new(ToolKind::SourceCredibility, gateway, models)
    }

    pub fn image(gateway: Arc<dyn ModelGateway>, models: ModelSelection) -> Self {
        Self::new(ToolKind::ImageAuthenticity, gateway, models)
    }

    pub fn bias(gateway: Arc<dyn ModelGateway>, models: ModelSelection) -> Self {
        Self::new(ToolKind::BiasAnalysis, gateway, models)
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Model a request will be sent to: the request's override, else the
    /// configured default for this tool.
    pub fn model_for<'a>(&'a self, request: &'a AnalysisRequest) -> &'a str {
        request
            .model_override()
            .unwrap_or_else(|| self.models.for_tool(self.tool))
    }

    /// Run one submission to completion.
    ///
    /// Every submission starts from `Idle` and ends `Settled`; the returned
    /// outcome is the same one published on the watch channel.
    pub async fn submit(&mut self, request: AnalysisRequest) -> Outcome {
        let submission = Uuid::new_v4();
        let span = info_span!("submission", %submission, tool = self.tool.as_str());
        let outcome = self.run(request).instrument(span).await;
        self.state.send_replace(SubmissionState::Settled(outcome.clone()));
        outcome
    }

    async fn run(&self, request: AnalysisRequest) -> Outcome {
        self.state.send_replace(SubmissionState::Idle);

        if request.tool() != self.tool {
            return Outcome::Failed(
                InputError::Mismatch {
                    tool: self.tool,
                    input: request.input().kind(),
                }
                .into(),
            );
        }

        if let Err(err) = request.validate() {
            debug!(error = %err, "Rejected blank submission");
            return Outcome::Failed(err.into());
        }

        let spec = match prompt::build(self.tool, request.input()) {
            Ok(spec) => spec,
            Err(err) => return Outcome::Failed(err.into()),
        };

        let model = self.model_for(&request).to_string();
        self.state.send_replace(SubmissionState::InFlight {
            tool: self.tool,
            model: model.clone(),
        });
        debug!(
            provider = self.gateway.provider(),
            model = %model,
            prompt_len = spec.instruction_text.len(),
            multimodal = request.image_payload().is_some(),
            "Calling model"
        );

        let response = match self
            .gateway
            .invoke_prompt(&model, &spec, request.image_payload())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, status = ?err.status, "Model call failed");
                return Outcome::Failed(err.into());
            }
        };

        match interpret::interpret(&response, &spec) {
            Ok(result) => Outcome::Displayed { result },
            Err(err) => {
                warn!(error = %err, "Could not interpret model response");
                Outcome::Failed(err.into())
            }
        }
    }
}
