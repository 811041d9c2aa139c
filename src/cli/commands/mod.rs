use crate::cli::{Cli, Commands};
use crate::config::GitPushConfig;
use crate::dispatch::{CommandDispatcher, OperationResult};
use crate::external::{CommandExecutor, ProcessCommandExecutor};
use crate::git::{GitClient, RepositoryGateway};
use crate::intent::IntentInterpreter;
use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;

pub mod capabilities;
pub mod config;
pub mod exec;
pub mod interactive;
pub mod run;
pub mod serve;

use self::capabilities::CapabilitiesCommand;
use self::config::ConfigCommand;
use self::exec::ExecCommand;
use self::interactive::InteractiveCommand;
use self::run::RunCommand;
use self::serve::ServeCommand;

/// Wire the process-backed git client into a dispatcher.
pub fn build_dispatcher(config: &GitPushConfig) -> Result<CommandDispatcher> {
    let executor: Arc<dyn CommandExecutor> = Arc::new(ProcessCommandExecutor);
    let client = GitClient::with_program(executor, config.git.program.clone());
    let gateway = RepositoryGateway::new(client, config.start_dir()?)
        .with_default_remote(config.git.default_remote.clone());
    Ok(CommandDispatcher::new(IntentInterpreter::new(), gateway))
}

pub(crate) fn exit_code(result: &OperationResult) -> ExitCode {
    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub(crate) fn print_result(result: &OperationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", crate::cli::display::render(result));
    }
    Ok(())
}

/// Run the selected subcommand against an already-loaded configuration.
pub async fn run_cli(cli: Cli, config: GitPushConfig) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Run {
            text,
            context,
            json,
        }) => {
            RunCommand::new(text.join(" "), context.apply(config.context()))
                .with_json(json)
                .execute(&config)
                .await
        }
        Some(Commands::Exec {
            action,
            message,
            commit_type,
            branch_action,
            context,
            json,
        }) => {
            let mut request_context = context.apply(config.context());
            if let Some(branch_action) = branch_action {
                request_context.action = branch_action;
            }
            ExecCommand::new(action, message, request_context)
                .with_commit_type(commit_type)
                .with_json(json)
                .execute(&config)
                .await
        }
        Some(Commands::Serve { context }) => {
            ServeCommand::new(context.apply(config.context()))
                .execute(&config)
                .await
        }
        Some(Commands::Capabilities) => CapabilitiesCommand.execute(&config),
        Some(Commands::Config { write }) => ConfigCommand::new(write).execute(&config),
        Some(Commands::Interactive { context }) => {
            InteractiveCommand::new(context.apply(config.context()))
                .execute(&config)
                .await
        }
        None => {
            InteractiveCommand::new(config.context())
                .execute(&config)
                .await
        }
    }
}
