//! One-shot tool commands.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use truthlens_core::{AnalysisRequest, ImagePayload, Orchestrator, Outcome, SubmissionState};

use super::Session;
use crate::output;

#[derive(Args)]
pub struct TextArgs {
    /// Text to analyze (reads stdin when neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct SourceArgs {
    /// URL or domain of the news source
    pub url: String,
}

#[derive(Args)]
pub struct ImageArgs {
    /// Path to a JPG or PNG image
    pub path: PathBuf,
}

pub async fn article(args: TextArgs, session: &Session) -> Result<ExitCode> {
    let text = read_text(args)?;
    submit(session, AnalysisRequest::article(text)).await
}

pub async fn source(args: SourceArgs, session: &Session) -> Result<ExitCode> {
    submit(session, AnalysisRequest::source(args.url)).await
}

pub async fn image(args: ImageArgs, session: &Session) -> Result<ExitCode> {
    match load_image(&args.path)? {
        Ok(payload) => submit(session, AnalysisRequest::image(payload)).await,
        Err(outcome) => settle(&outcome, session),
    }
}

pub async fn bias(args: TextArgs, session: &Session) -> Result<ExitCode> {
    let text = read_text(args)?;
    submit(session, AnalysisRequest::bias(text)).await
}

/// Read an image file. A file that is not a supported image is a failed
/// submission, not a command error.
pub fn load_image(path: &Path) -> Result<Result<ImagePayload, Outcome>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(ImagePayload::from_bytes(bytes).map_err(|e| Outcome::Failed(e.into())))
}

fn read_text(args: TextArgs) -> Result<String> {
    if let Some(text) = args.text {
        return Ok(text);
    }
    if let Some(path) = args.file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Reading text from stdin (Ctrl+D to finish)...");
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

/// Run one submission and print it; the exit status reflects the outcome.
pub async fn submit(session: &Session, request: AnalysisRequest) -> Result<ExitCode> {
    let outcome = run(session, request).await?;
    Ok(exit_code(&outcome))
}

/// Run one submission, showing a spinner while the model call is in flight,
/// and print the settled outcome.
pub async fn run(session: &Session, request: AnalysisRequest) -> Result<Outcome> {
    let request = match &session.model {
        Some(model) => request.with_model(model.clone()),
        None => request,
    };
    let mut orchestrator =
        Orchestrator::new(request.tool(), session.gateway()?, session.config.models());

    let watcher = (!session.json).then(|| {
        let mut rx = orchestrator.subscribe();
        let busy = request.busy_message();
        tokio::spawn(async move {
            let mut spinner = None;
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                match state {
                    SubmissionState::InFlight { model, .. } => {
                        spinner = Some(output::spinner(format!("{} ({})", busy, model)));
                    }
                    SubmissionState::Settled(_) => break,
                    SubmissionState::Idle => {}
                }
            }
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
        })
    });

    let outcome = orchestrator.submit(request).await;
    if let Some(watcher) = watcher {
        let _ = watcher.await;
    }

    output::print_outcome(&outcome, session.json)?;
    Ok(outcome)
}

fn settle(outcome: &Outcome, session: &Session) -> Result<ExitCode> {
    output::print_outcome(outcome, session.json)?;
    Ok(exit_code(outcome))
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    if outcome.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
