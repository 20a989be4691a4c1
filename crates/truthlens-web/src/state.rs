//! Application state.

use std::sync::Arc;

use truthlens_core::{ModelGateway, ModelSelection, Orchestrator, ToolKind};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ModelGateway>,
    pub models: ModelSelection,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ModelGateway>, models: ModelSelection) -> Self {
        Self { gateway, models }
    }

    /// A fresh orchestrator for one request.
    pub fn orchestrator(&self, tool: ToolKind) -> Orchestrator {
        Orchestrator::new(tool, self.gateway.clone(), self.models.clone())
    }
}
