//! SmartCare command-line front end.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use smartcare_core::{Backend, Clinic, ClinicConfig};
use tracing::debug;

use commands::Command;

/// Storage backend selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Json,
    Sqlite,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Json => Backend::Json,
            BackendArg::Sqlite => Backend::Sqlite,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "smartcare")]
#[command(about = "SmartCare: clinic patient registration and appointment booking")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the record store
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, global = true, value_enum)]
    backend: Option<BackendArg>,

    /// Log filter, e.g. `info` or `smartcare_core=debug`
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClinicConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }
    debug!(?config, "resolved configuration");

    let store = config.open_store().context("failed to open record store")?;
    let clinic = Clinic::with_system_clock(store);

    let stdout = std::io::stdout();
    commands::run(&clinic, args.command, &mut stdout.lock())
}
