//! CLI definitions for HostBridge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HostBridge CLI.
#[derive(Parser)]
#[command(name = "hostbridge")]
#[command(about = "Lifecycle fan-out and thread routing for embedded native runtimes")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long, env = "HOSTBRIDGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Drive a simulated host through a full lifecycle
    Simulate {
        /// Work items the native runtime submits to the runloop route
        #[arg(long, default_value_t = 8)]
        work_items: u32,

        /// Render thread name, overriding `router.render_thread`
        #[arg(long)]
        render_thread: Option<String>,

        /// Skip the host's default back behavior
        #[arg(long)]
        no_default_back: bool,

        /// Print router metrics as JSON at the end
        #[arg(long)]
        metrics: bool,
    },

    /// Load and validate a configuration file
    CheckConfig,
}
