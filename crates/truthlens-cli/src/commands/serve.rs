//! Web server command.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use truthlens_web::AppState;

use super::Session;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn execute(args: ServeArgs, session: &Session) -> Result<ExitCode> {
    let gateway = session.gateway()?;
    let models = session.config.models();

    println!();
    println!("  {} {}", "TruthLens".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}      http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}   http://{}:{}/health", "Health".green(), args.host, args.port);
    println!("  {}    {} / {}", "Models".green(), models.text, models.image);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    truthlens_web::run_server(AppState::new(gateway, models), &args.host, args.port).await?;

    Ok(ExitCode::SUCCESS)
}
