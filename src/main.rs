//! HostBridge - lifecycle fan-out and thread routing for embedded native runtimes
//!
//! Main entry point for the HostBridge CLI.

use std::sync::OnceLock;

use clap::Parser;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use hostbridge_config::{Config, ConfigLoader, LogFormat, LoggingConfig};

mod cli;
mod cmd_check;
mod cmd_simulate;

use cli::{Cli, Commands};
use cmd_simulate::SimulateOptions;

/// Keeps the non-blocking file writer flushing for the program duration.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let console = match logging.format {
        LogFormat::Pretty => fmt::layer().with_target(true).with_ansi(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(false).boxed(),
    };

    let file = match logging.directory.as_ref().filter(|_| logging.file_enabled) {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(logging.file_prefix.clone())
                .filename_suffix("log")
                .max_log_files(logging.max_files)
                .build(log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = LOG_GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load(path)?,
        None => Config::default(),
    };

    init_tracing(&config.logging)?;

    let result = match cli.command {
        Commands::Simulate {
            work_items,
            render_thread,
            no_default_back,
            metrics,
        } => {
            let options = SimulateOptions {
                work_items,
                render_thread,
                no_default_back,
                metrics,
            };
            cmd_simulate::run_simulate(config, options).await
        }
        Commands::CheckConfig => cmd_check::run_check_config(cli.config.as_deref(), &config),
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}
