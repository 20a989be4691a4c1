//! Menu-driven session: pick a tool, give it input, see the result, repeat.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};
use truthlens_core::{AnalysisRequest, InputKind, ToolKind};

use super::analyze;
use super::Session;
use crate::output;

pub async fn execute(session: &Session) -> Result<ExitCode> {
    let mut items: Vec<String> = ToolKind::ALL
        .iter()
        .map(|tool| format!("{}: {}", tool.title(), tool.caption()))
        .collect();
    items.push("Quit".to_string());

    println!();
    println!("  {} {}", "TruthLens".cyan().bold(), "AI-assisted fact checking".dimmed());
    println!();

    let mut failures = 0usize;
    let mut selected = 0;
    loop {
        selected = Select::new()
            .with_prompt("Choose a tool")
            .items(&items)
            .default(selected)
            .interact()?;

        let Some(&tool) = ToolKind::ALL.get(selected) else {
            break;
        };

        let failed = match tool.input_kind() {
            InputKind::Text | InputKind::Url => {
                let prompt = match tool {
                    ToolKind::SourceCredibility => "Website URL",
                    ToolKind::ArticleAnalysis => "Article text",
                    _ => "Text",
                };
                let value: String = Input::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text()?;
                let request = match tool {
                    ToolKind::ArticleAnalysis => AnalysisRequest::article(value),
                    ToolKind::SourceCredibility => AnalysisRequest::source(value),
                    _ => AnalysisRequest::bias(value),
                };
                analyze::run(session, request).await?.is_failed()
            }
            InputKind::Image => {
                let path: String = Input::new()
                    .with_prompt("Image path (JPG or PNG)")
                    .interact_text()?;
                match analyze::load_image(&PathBuf::from(path.trim())) {
                    Ok(Ok(payload)) => analyze::run(session, AnalysisRequest::image(payload))
                        .await?
                        .is_failed(),
                    Ok(Err(outcome)) => {
                        output::print_outcome(&outcome, session.json)?;
                        true
                    }
                    Err(err) => {
                        eprintln!("{} {:#}", "✗".red().bold(), err);
                        true
                    }
                }
            }
        };
        if failed {
            failures += 1;
        }
        println!();
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
