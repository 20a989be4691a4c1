//! TruthLens CLI
//!
//! Fake-news detection toolkit: article classification, source credibility,
//! image authenticity and bias detection, backed by a remote model.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

const DEFAULT_FILTER: &str = "truthlens=info,truthlens_web=debug,truthlens_core=info";
const VERBOSE_FILTER: &str =
    "truthlens=debug,truthlens_web=debug,truthlens_core=debug,truthlens_gemini=debug";

/// Initialize tracing with optional file logging.
///
/// Console output goes to stderr so `--json` output on stdout stays clean.
/// The returned guard must live until exit or buffered file lines are lost.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("Log path {} has no file name", path.display()))?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .init();
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log.as_deref(), cli.verbose)?;

    cli.execute().await
}
