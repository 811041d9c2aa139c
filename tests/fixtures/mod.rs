// Shared helpers for integration tests that drive a real git binary

#![allow(dead_code)]

use anyhow::Result;
use git_push_mcp::{
    CommandDispatcher, GitClient, IntentInterpreter, ProcessCommandExecutor, RepositoryGateway,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

/// Isolated scratch directory, optionally holding a git repository.
pub struct TestHarness {
    temp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Harness with an initialized repository and a local identity.
    pub fn with_git() -> Result<Self> {
        let harness = Self::new()?;
        harness.git(&["init"])?;
        harness.git(&["config", "user.name", "Test User"])?;
        harness.git(&["config", "user.email", "test@example.com"])?;
        harness.git(&["config", "commit.gpgsign", "false"])?;
        Ok(harness)
    }

    /// Repository with one committed file.
    pub fn with_initial_commit() -> Result<Self> {
        let harness = Self::with_git()?;
        harness.create_file("README.md", "# fixture\n")?;
        harness.git(&["add", "."])?;
        harness.git(&["commit", "-m", "initial commit"])?;
        Ok(harness)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn create_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Run git in the harness directory, failing on a non-zero exit.
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("LC_ALL", "C")
            .output()?;
        if !output.status.success() {
            anyhow::bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub fn gateway(&self) -> RepositoryGateway {
        RepositoryGateway::new(GitClient::new(Arc::new(ProcessCommandExecutor)), self.path())
    }

    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(IntentInterpreter::new(), self.gateway())
    }
}
