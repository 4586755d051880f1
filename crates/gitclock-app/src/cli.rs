use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// GitClock: dashboard layout service with an on-device and a browser editor.
#[derive(Parser, Debug)]
#[command(name = "gitclock", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. "gitclock=debug").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Preference file path override.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the device: layout store, geometry, and the remote editor endpoint.
    Serve {
        /// Serve the browser editor even if disabled in config.
        #[arg(long)]
        enable_server: bool,
    },
    /// Print where every widget lands on a screen.
    Positions {
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Clear every stored layout so all widgets use their defaults.
    Reset,
    /// Edit layouts with gesture commands read from stdin.
    Edit,
    /// Drive a running device's browser editor endpoint.
    Remote {
        /// Base URL of the device, e.g. http://192.168.1.20:8080
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        url: String,

        #[command(subcommand)]
        action: RemoteAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RemoteAction {
    /// Poll the device and print every layout change.
    Watch {
        /// Poll interval in milliseconds. Defaults to `editor.poll_interval_ms`.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Drag one widget by an offset and submit it.
    Nudge {
        widget: String,
        #[arg(allow_hyphen_values = true)]
        dx: f64,
        #[arg(allow_hyphen_values = true)]
        dy: f64,
    },
    /// Set one widget's scale and submit it.
    Scale { widget: String, scale: f64 },
    /// Reset the device layout to defaults.
    Reset,
}

pub fn parse() -> Args {
    Args::parse()
}
