//! yt-transcriber CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yt_transcriber::cli::{commands, Cli, Commands};
use yt_transcriber::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(Settings::expand_path);

    // Load configuration
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging. Stdout carries JSON-RPC in serve mode, so logs go to stderr.
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("yt_transcriber={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Serve => {
            commands::run_serve(settings).await?;
        }

        Commands::Search {
            query,
            limit,
            sort,
            json,
        } => {
            commands::run_search(query, *limit, sort, *json, settings).await?;
        }

        Commands::Transcript {
            input,
            lang,
            manual,
            timestamps,
            json,
        } => {
            commands::run_transcript(input, lang.clone(), *manual, *timestamps, *json, settings)
                .await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path)?;
        }
    }

    Ok(())
}
