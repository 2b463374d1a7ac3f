//! `partyrun` command-line client.
//!
//! This binary is the composition root for the workspace and plays the state
//! holder role for the use cases:
//!
//! 1. **Parse configuration**: load `.partyrun/config.toml` (or `--config`),
//!    apply `PARTYRUN_*` overrides, and validate.
//! 2. **Wire observability**: install `tracing-subscriber` with an `EnvFilter`
//!    and a pretty or JSON formatter. Events from every crate flow through it.
//! 3. **Construct infrastructure**: the reqwest transport, data sources,
//!    file-backed stores and repositories, injected into the use cases.
//! 4. **Run one command**: dispatch its outcome(s), print them as JSON on
//!    stdout, and exit non-zero when the command ended in failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod app;
mod commands;
mod config;
mod output;
mod telemetry;

use app::App;
use commands::Cli;
use config::{ClientConfig, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config_path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let config = ClientConfig::load(&config_path, required, |key| std::env::var(key).ok())?;
    telemetry::init(config.log_format, &config.log_filter)?;
    tracing::debug!(
        config = %config_path.display(),
        data_dir = %config.data_dir.display(),
        "configuration loaded"
    );

    let app = App::build(&config).await?;
    let report = commands::run(cli.command, &app.use_cases).await?;

    println!("{}", serde_json::to_string_pretty(&report.body)?);
    Ok(if report.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
