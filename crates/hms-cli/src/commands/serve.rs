//! API server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hms_ai::{LabReportGenerator, OllamaClient};
use std::path::PathBuf;
use std::sync::Arc;

use super::Context;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to the configured port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to hms-serve.log in the user data directory)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hms"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hms-serve.log")
}

pub async fn execute(args: ServeArgs, ctx: &Context) -> Result<()> {
    let host = args.host.unwrap_or_else(|| ctx.config.web.host.clone());
    let port = args.port.unwrap_or(ctx.config.web.port);

    let client = OllamaClient::from_config(&ctx.config.generator);
    let generator = Arc::new(LabReportGenerator::new(client));

    println!();
    println!(
        "  {} {}",
        "HMS".cyan().bold(),
        "API Server".bold()
    );
    println!();
    println!(
        "  {}        http://{}:{}/api",
        "API".green(),
        host,
        port
    );
    println!(
        "  {}  ws://{}:{}/ws",
        "WebSocket".green(),
        host,
        port
    );
    println!(
        "  {}      {}",
        "Store".green(),
        ctx.pool.kind()
    );
    println!(
        "  {}  {} ({})",
        "Generator".green(),
        ctx.config.generator.base_url,
        ctx.config.generator.model
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    hms_web::run_server(ctx.pool.clone(), generator, &host, port).await?;

    Ok(())
}
