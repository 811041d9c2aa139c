use anyhow::Result;
use clap::Parser;
use git_push_mcp::cli::{commands::run_cli, Cli};
use git_push_mcp::config::GitPushConfig;
use git_push_mcp::telemetry::{init_telemetry, shutdown_telemetry};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // A malformed .env must not prevent startup
    let env_file = GitPushConfig::load_env_file();
    let mut config = GitPushConfig::load()?;
    cli.apply_overrides(&mut config);
    init_telemetry(&config.logging)?;

    match env_file {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "loaded environment from .env"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "ignoring .env file"),
    }

    let code = tokio::runtime::Runtime::new()?.block_on(run_cli(cli, config));

    shutdown_telemetry();
    code
}
