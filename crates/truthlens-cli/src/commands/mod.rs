//! CLI command definitions and handlers.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use truthlens_core::{ModelGateway, TruthLensConfig};
use truthlens_gemini::GeminiClient;

pub mod analyze;
pub mod config;
pub mod interactive;
pub mod serve;

/// TruthLens - AI-assisted fake-news detection toolkit
#[derive(Parser)]
#[command(name = "truthlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the settled outcome as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Model to call instead of the configured default
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Path to a config file (defaults to the user config directory)
    #[arg(short, long, global = true, env = "TRUTHLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify an article as real, fake or misleading
    Article(analyze::TextArgs),

    /// Rate the credibility of a news source
    Source(analyze::SourceArgs),

    /// Check an image for signs of manipulation
    Image(analyze::ImageArgs),

    /// Detect biased or manipulative language
    Bias(analyze::TextArgs),

    /// Pick tools from a menu and run them one after another
    Interactive,

    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Settings shared by every command.
pub struct Session {
    pub config: TruthLensConfig,
    pub model: Option<String>,
    pub json: bool,
}

impl Session {
    /// Gateway to the configured provider. Fails when no API key is set.
    pub fn gateway(&self) -> Result<Arc<dyn ModelGateway>> {
        let client = GeminiClient::from_config(&self.config)?;
        tracing::debug!(base_url = client.base_url(), "Using Gemini gateway");
        Ok(Arc::new(client))
    }
}

impl Cli {
    pub async fn execute(self) -> Result<ExitCode> {
        let config = TruthLensConfig::load(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load config".to_string(),
        })?;

        let session = Session {
            config,
            model: self.model,
            json: self.json,
        };

        match self.command {
            Commands::Article(args) => analyze::article(args, &session).await,
            Commands::Source(args) => analyze::source(args, &session).await,
            Commands::Image(args) => analyze::image(args, &session).await,
            Commands::Bias(args) => analyze::bias(args, &session).await,
            Commands::Interactive => interactive::execute(&session).await,
            Commands::Serve(args) => serve::execute(args, &session).await,
            Commands::Config(cmd) => config::execute(cmd, &session, self.config.as_deref()),
        }
    }
}
