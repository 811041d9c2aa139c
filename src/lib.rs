// git-push-mcp - natural-language front end for everyday git operations
// Exposes the interpreter, repository gateway and dispatcher for embedding and tests

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod external;
pub mod git;
pub mod intent;
pub mod telemetry;

// Re-export key types for easy access
pub use crate::config::GitPushConfig;
pub use dispatch::{
    BranchAction, Capabilities, CommandContext, CommandDispatcher, CommandRequest,
    DispatchError, OperationResult,
};
pub use external::{CommandExecutor, ProcessCommandExecutor};
pub use git::{GitClient, GitError, RepositoryGateway, RepositoryHandle, RepositoryStatus};
pub use intent::{CommandKind, CommitType, IntentInterpreter, ParsedCommand};
pub use telemetry::{generate_correlation_id, init_telemetry, shutdown_telemetry};
