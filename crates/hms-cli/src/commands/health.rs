//! Health check command.

use anyhow::Result;
use colored::Colorize;
use hms_ai::OllamaClient;

use super::Context;

pub async fn execute(ctx: &Context) -> Result<()> {
    println!("{}", "HMS Health".bold());
    println!();

    let store_ok = ctx.pool.fetch("health", "ping").await.is_ok();
    print_check("Store", store_ok, ctx.pool.kind());

    let client = OllamaClient::from_config(&ctx.config.generator);
    let generator_ok = client.health_check().await.unwrap_or(false);
    let detail = format!("{} ({})", ctx.config.generator.base_url, client.model());
    print_check("Generator", generator_ok, &detail);

    if !generator_ok {
        println!();
        println!(
            "  {}",
            format!("Pull the model with: ollama pull {}", client.model()).dimmed()
        );
    }

    Ok(())
}

fn print_check(name: &str, ok: bool, detail: &str) {
    let mark = if ok { "✓".green() } else { "✗".red() };
    println!("  {} {:10} {}", mark, name, detail.dimmed());
}
