//! a11ylens - component-aware accessibility scanner
//!
//! Main entry point for the a11ylens CLI.

mod cli;
mod cmd_config;
mod cmd_scan;

use std::path::PathBuf;
use std::process::ExitCode;

use a11ylens_config::ConfigLoader;
use a11ylens_protocols::ScanFailure;
use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use cmd_scan::ScanArgs;

/// Get the .a11ylens directory path.
fn a11ylens_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".a11ylens"))
        .unwrap_or_else(|| PathBuf::from(".a11ylens"))
}

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so a report on stdout stays valid JSON.
/// Log files are written to ~/.a11ylens/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = a11ylens_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("a11ylens")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the file writer flushing for the life of the process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.unwrap_or_else(ConfigLoader::default_path);

    match cli.command {
        Commands::Scan {
            url,
            browser,
            headed,
            tags,
            output,
        } => {
            let args = ScanArgs {
                url,
                browser,
                headed,
                tags,
                output,
            };
            cmd_scan::handle_scan(&config_path, args).await
        }
        Commands::Config { action } => {
            cmd_config::handle_config_command(action, &config_path).await
        }
    }
}

/// Scan failures lead with their kind so scripts can match on it.
fn format_error(e: &(dyn std::error::Error + 'static)) -> String {
    match e.downcast_ref::<ScanFailure>() {
        Some(failure) => format!("{}: {}", failure.tag(), failure),
        None => e.to_string(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("warning: file logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", format_error(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}
