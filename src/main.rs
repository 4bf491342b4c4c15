//! markwise - bookmark folder recommendations
//!
//! Main entry point for the markwise CLI.

mod adapters;
mod cli;
mod cmd_bookmark;
mod cmd_key;

use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use markwise_config::markwise_dir;

use crate::adapters::{build_assistant, load_config};
use crate::cli::{Cli, Commands};

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = markwise_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("markwise")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop, so it lives for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer on stderr so command output stays pipeable
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    debug!(model = %config.gemini.model, "Configuration loaded");

    let assistant = build_assistant(&config);
    match cli.command {
        Commands::Digest { json, refresh } => cmd_bookmark::digest(&assistant, json, refresh).await,
        Commands::Check { url } => cmd_bookmark::check(&assistant, &url).await,
        Commands::Recommend { url, title, accept } => {
            cmd_bookmark::recommend(&assistant, &url, &title, accept).await
        }
        Commands::Add {
            url,
            path,
            title,
            new_folder,
        } => cmd_bookmark::add(&assistant, &url, &path, &title, new_folder).await,
        Commands::Recent => cmd_bookmark::recent(&assistant).await,
        Commands::Key { action } => cmd_key::handle_key_command(&assistant, action).await,
        Commands::Invalidate => cmd_bookmark::invalidate(&assistant).await,
        Commands::Copy { url } => cmd_bookmark::copy(&url).await,
    }
}
