mod cli;
mod device;
mod edit;
mod remote;
mod serve;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use gitclock_common::GitClockError;
use gitclock_config::GitClockConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::device::Device;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let (config, config_error) = load_config(args.config.as_deref());

    // CLI override first, then the config file's level
    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    let filter = match log_directive
        .parse()
        .or_else(|_| config.logging.level.directive().parse())
    {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("GitClock v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("gitclock: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> (GitClockConfig, Option<GitClockError>) {
    let loaded = match path {
        Some(path) => gitclock_config::load_config_from(path),
        None => gitclock_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (GitClockConfig::default(), Some(e.into())),
    }
}

fn config_path(config_override: Option<PathBuf>) -> Result<PathBuf, GitClockError> {
    match config_override {
        Some(path) => Ok(path),
        None => Ok(gitclock_config::toml_loader::default_config_path()?),
    }
}

async fn run(args: Args, config: GitClockConfig) -> Result<(), GitClockError> {
    if let Err(e) = gitclock_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let Args {
        config: config_override,
        prefs,
        command,
        ..
    } = args;

    match command {
        Command::Serve { enable_server } => {
            let path = config_path(config_override)?;
            let device = Device::open(&config, prefs)?;
            serve::run(device, path, enable_server).await
        }
        Command::Positions { width, height } => {
            let device = Device::open(&config, prefs)?;
            let screen = device.geometry.current();
            device.resize(width.unwrap_or(screen.width), height.unwrap_or(screen.height));
            print!("{}", device::format_placements(&device.placements()));
            Ok(())
        }
        Command::Reset => {
            let device = Device::open(&config, prefs)?;
            device.store.reset()?;
            println!("layout reset to defaults");
            Ok(())
        }
        Command::Edit => {
            let device = Device::open(&config, prefs)?;
            let mut editor = device.editor();
            tokio::task::block_in_place(|| {
                edit::run(&mut editor, std::io::stdin().lock(), std::io::stdout())
            })?;
            Ok(())
        }
        Command::Remote { url, action } => {
            let interval = Duration::from_millis(config.editor.poll_interval_ms);
            remote::run(url, action, interval).await
        }
    }
}
