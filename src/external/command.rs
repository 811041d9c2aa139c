//! Base command execution abstraction
//!
//! Every toolchain call goes through [`CommandExecutor`], which lets the
//! git layer run against a scripted executor in tests.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
    #[error("Working directory does not exist: {path}")]
    MissingWorkingDirectory { path: String },
    #[error("IO error: {message}")]
    Io { message: String },
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` inside `cwd` and capture its output.
    async fn execute(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput, CommandError>;
}

/// Real implementation backed by `tokio::process`.
pub struct ProcessCommandExecutor;

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput, CommandError> {
        if !cwd.is_dir() {
            return Err(CommandError::MissingWorkingDirectory {
                path: cwd.display().to_string(),
            });
        }

        let output = tokio::process::Command::new(program)
            .args(args)
            .current_dir(cwd)
            // Keep porcelain output stable regardless of the user's locale.
            .env("LC_ALL", "C")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CommandError::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    CommandError::Io {
                        message: e.to_string(),
                    }
                }
            })?;

        Ok(CommandOutput {
            status_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
