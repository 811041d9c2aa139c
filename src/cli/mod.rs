use crate::config::GitPushConfig;
use crate::dispatch::{BranchAction, CommandContext};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod display;
pub mod rpc;

#[derive(Parser)]
#[command(name = "git-push-mcp")]
#[command(version)]
#[command(about = "Run git from short natural-language phrases")]
#[command(long_about = "git-push-mcp turns phrases such as '提交代码 修复登录bug' or 'commit fix login' \
                       into git operations: status, add, commit (optionally followed by push), log, \
                       diff and branch management. Runs one-shot, as an interactive prompt, or as a \
                       line-delimited JSON-RPC server on stdio.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to start repository discovery from
    #[arg(long, global = true, help = "Working directory (defaults to the current directory)")]
    pub repo: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, global = true, help = "Log level: error, warn, info, debug, trace")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interpret and execute one natural-language command
    Run {
        /// The phrase to interpret, e.g. "提交代码 修复登录bug"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[command(flatten)]
        context: ContextArgs,
        /// Print the raw result envelope as JSON
        #[arg(long)]
        json: bool,
    },
    /// Execute an explicit action without interpretation
    Exec {
        /// One of: commit, add, status, log, diff, branch
        action: String,
        /// Commit message, path to stage, or branch name
        #[arg(long, short = 'm', default_value = "")]
        message: String,
        /// Conventional commit type (feat, fix, docs, ...)
        #[arg(long)]
        commit_type: Option<String>,
        /// Branch sub-operation
        #[arg(long, value_parser = parse_branch_action)]
        branch_action: Option<BranchAction>,
        #[command(flatten)]
        context: ContextArgs,
        /// Print the raw result envelope as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read commands line by line from stdin (default)
    Interactive {
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Serve line-delimited JSON-RPC 2.0 on stdin/stdout
    Serve {
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Print the capability document as JSON
    Capabilities,
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to this TOML file
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

/// Per-invocation overrides of the configured request defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Push after a successful commit
    #[arg(long)]
    pub auto_push: bool,
    /// Do not stage modified/untracked files before committing
    #[arg(long)]
    pub no_auto_stage: bool,
    /// Use the message as-is instead of prefixing a commit type
    #[arg(long)]
    pub no_conventional: bool,
    /// Number of log entries to show
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ContextArgs {
    pub fn apply(&self, mut context: CommandContext) -> CommandContext {
        if self.auto_push {
            context.auto_push = true;
        }
        if self.no_auto_stage {
            context.auto_stage = false;
        }
        if self.no_conventional {
            context.conventional_commits = false;
        }
        if let Some(limit) = self.limit {
            context.limit = limit;
        }
        context
    }
}

impl Cli {
    /// Fold global flags into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut GitPushConfig) {
        if let Some(repo) = &self.repo {
            config.git.working_dir = Some(repo.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}

fn parse_branch_action(value: &str) -> Result<BranchAction, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "list" => Ok(BranchAction::List),
        "create" => Ok(BranchAction::Create),
        "checkout" => Ok(BranchAction::Checkout),
        other => Err(format!("unknown branch action '{other}' (list, create, checkout)")),
    }
}
