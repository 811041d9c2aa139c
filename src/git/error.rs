use crate::external::CommandError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum GitError {
    #[error("Not a git repository: {message}")]
    NotARepository { message: String },
    #[error("Nothing to commit, working tree clean")]
    NothingToCommit,
    #[error("Remote not found or not configured: {remote}")]
    RemoteNotFound { remote: String },
    #[error("Branch not found: {branch}")]
    BranchNotFound { branch: String },
    #[error("HEAD is detached; specify a branch to push")]
    DetachedHead,
    #[error("Command execution error: {source}")]
    CommandError {
        #[from]
        source: CommandError,
    },
    #[error("git {command} failed: {message}")]
    GitCommandFailed { command: String, message: String },
}

impl GitError {
    /// Map a failed git invocation onto a specific variant using its output.
    pub fn classify(args: &[&str], stdout: &str, stderr: &str) -> Self {
        let subcommand = args.first().copied().unwrap_or_default();
        let text = if stderr.trim().is_empty() { stdout } else { stderr };

        if stderr.contains("not a git repository") {
            GitError::NotARepository {
                message: stderr.trim().to_string(),
            }
        } else if subcommand == "commit"
            && (stdout.contains("nothing to commit") || stdout.contains("no changes added to commit"))
        {
            GitError::NothingToCommit
        } else if subcommand == "push"
            && (stderr.contains("does not appear to be a git repository")
                || stderr.contains("No configured push destination")
                || stderr.contains("No such remote"))
        {
            GitError::RemoteNotFound {
                remote: args
                    .iter()
                    .skip(1)
                    .find(|a| !a.starts_with('-'))
                    .unwrap_or(&"unknown")
                    .to_string(),
            }
        } else if subcommand == "checkout" && stderr.contains("did not match any") {
            GitError::BranchNotFound {
                branch: args.last().unwrap_or(&"unknown").to_string(),
            }
        } else {
            GitError::GitCommandFailed {
                command: args.join(" "),
                message: text.trim().to_string(),
            }
        }
    }
}
