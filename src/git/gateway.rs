//! Repository gateway
//!
//! High-level repository operations built on [`GitClient`]. Discovery
//! happens once per request through [`RepositoryGateway::ensure_repository`];
//! every other operation takes the resulting [`RepositoryHandle`] so that
//! nothing depends on the process working directory.

use super::client::{parse_shortstat, GitClient};
use super::error::GitError;
use super::types::{
    BranchList, CommitAndPushReport, CommitOptions, CommitReport, DiffSummary, InitReport,
    LogEntry, PathSpec, PushOptions, PushReport, RepositoryCheck, RepositoryHandle,
    RepositoryStatus,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Directory whose presence marks a working-tree root.
pub const REPOSITORY_MARKER: &str = ".git";

pub struct RepositoryGateway {
    client: GitClient,
    start_dir: PathBuf,
    default_remote: String,
}

impl RepositoryGateway {
    pub fn new(client: GitClient, start_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            start_dir: start_dir.into(),
            default_remote: "origin".to_string(),
        }
    }

    pub fn with_default_remote(mut self, remote: impl Into<String>) -> Self {
        self.default_remote = remote.into();
        self
    }

    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Nearest ancestor of `start` (inclusive) containing the marker.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(REPOSITORY_MARKER).exists())
            .map(Path::to_path_buf)
    }

    /// A repository exists only if the marker is found and git can read its status.
    pub async fn check_repository(&self) -> RepositoryCheck {
        let Some(root) = Self::find_root(&self.start_dir) else {
            return RepositoryCheck {
                is_repository: false,
                root: None,
                error: Some(format!(
                    "no {REPOSITORY_MARKER} directory found in {} or any parent",
                    self.start_dir.display()
                )),
            };
        };

        match self.client.status(&root).await {
            Ok(_) => RepositoryCheck {
                is_repository: true,
                root: Some(root),
                error: None,
            },
            Err(e) => {
                warn!(root = %root.display(), error = %e, "marker found but status query failed");
                RepositoryCheck {
                    is_repository: false,
                    root: Some(root),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub async fn initialize_repository(&self) -> Result<InitReport, GitError> {
        let check = self.check_repository().await;
        if let (true, Some(root)) = (check.is_repository, check.root) {
            info!(root = %root.display(), "repository already exists");
            return Ok(InitReport {
                root,
                already_existed: true,
                message: "repository already exists".to_string(),
            });
        }

        info!(dir = %self.start_dir.display(), "initializing repository");
        logged("init", self.client.init(&self.start_dir).await)?;
        let root = Self::find_root(&self.start_dir).unwrap_or_else(|| self.start_dir.clone());

        Ok(InitReport {
            message: format!("initialized empty repository in {}", root.display()),
            root,
            already_existed: false,
        })
    }

    /// Resolve the repository for one request, creating it if necessary.
    pub async fn ensure_repository(&self) -> Result<RepositoryHandle, GitError> {
        let check = self.check_repository().await;
        if let (true, Some(root)) = (check.is_repository, check.root) {
            return Ok(RepositoryHandle {
                root,
                initialized: false,
            });
        }

        let report = self.initialize_repository().await?;
        Ok(RepositoryHandle {
            root: report.root,
            initialized: !report.already_existed,
        })
    }

    pub async fn get_status(&self, repo: &RepositoryHandle) -> Result<RepositoryStatus, GitError> {
        info!(root = %repo.root.display(), "reading status");
        logged("status", self.client.status(&repo.root).await)
    }

    pub async fn add_files(
        &self,
        repo: &RepositoryHandle,
        paths: impl Into<PathSpec>,
    ) -> Result<PathSpec, GitError> {
        let paths = paths.into();
        info!(root = %repo.root.display(), files = %paths.describe(), "staging files");
        logged("add", self.client.add(&repo.root, &paths).await)?;
        Ok(paths)
    }

    /// Commit staged changes, staging everything first if the index is empty.
    pub async fn commit(
        &self,
        repo: &RepositoryHandle,
        message: &str,
        options: CommitOptions,
    ) -> Result<CommitReport, GitError> {
        let status = self.get_status(repo).await?;
        if status.staged.is_empty() {
            warn!(root = %repo.root.display(), "nothing staged, staging all changes before commit");
            self.add_files(repo, PathSpec::All).await?;
        }

        info!(root = %repo.root.display(), commit_message = message, "committing");
        let output = logged(
            "commit",
            self.client.commit(&repo.root, message, options).await,
        )?;
        let commit = logged("rev-parse", self.client.head_commit(&repo.root).await)?;

        Ok(CommitReport {
            commit,
            branch: status.current_branch,
            message: message.to_string(),
            summary: parse_shortstat(&output),
        })
    }

    /// Sequential, not transactional: staged files stay staged if the commit fails.
    pub async fn add_all_and_commit(
        &self,
        repo: &RepositoryHandle,
        message: &str,
        options: CommitOptions,
    ) -> Result<CommitReport, GitError> {
        self.add_files(repo, PathSpec::All).await?;
        self.commit(repo, message, options).await
    }

    pub async fn add_files_and_commit(
        &self,
        repo: &RepositoryHandle,
        files: impl Into<PathSpec>,
        message: &str,
        options: CommitOptions,
    ) -> Result<CommitReport, GitError> {
        self.add_files(repo, files).await?;
        self.commit(repo, message, options).await
    }

    /// Push `branch` (or the current branch) to `remote` (or the default remote).
    pub async fn push(
        &self,
        repo: &RepositoryHandle,
        remote: Option<&str>,
        branch: Option<&str>,
        options: PushOptions,
    ) -> Result<PushReport, GitError> {
        let remote = remote.unwrap_or(&self.default_remote).to_string();
        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => self
                .get_status(repo)
                .await?
                .current_branch
                .ok_or(GitError::DetachedHead)?,
        };

        info!(root = %repo.root.display(), remote = %remote, branch = %branch, "pushing");
        let pushed = logged(
            "push",
            self.client.push(&repo.root, &remote, &branch, options).await,
        )?;

        Ok(PushReport {
            remote,
            branch,
            pushed,
        })
    }

    /// A push failure never undoes a successful commit; it becomes a warning.
    pub async fn commit_and_push(
        &self,
        repo: &RepositoryHandle,
        message: &str,
        commit_options: CommitOptions,
        push_options: PushOptions,
    ) -> Result<CommitAndPushReport, GitError> {
        let commit = self.commit(repo, message, commit_options).await?;

        let report = match self
            .push(repo, None, commit.branch.as_deref(), push_options)
            .await
        {
            Ok(push) => CommitAndPushReport {
                commit,
                pushed: push.pushed,
                push: Some(push),
                warning: None,
            },
            Err(e) => {
                warn!(error = %e, "commit succeeded but push failed");
                CommitAndPushReport {
                    commit,
                    pushed: false,
                    push: None,
                    warning: Some(format!("commit succeeded but push failed: {e}")),
                }
            }
        };
        Ok(report)
    }

    pub async fn get_log(
        &self,
        repo: &RepositoryHandle,
        limit: usize,
    ) -> Result<Vec<LogEntry>, GitError> {
        info!(root = %repo.root.display(), limit, "reading log");
        logged("log", self.client.log(&repo.root, limit).await)
    }

    pub async fn get_diff(&self, repo: &RepositoryHandle) -> Result<DiffSummary, GitError> {
        info!(root = %repo.root.display(), "reading diff stat");
        logged("diff", self.client.diff_stat(&repo.root).await)
    }

    pub async fn get_branches(&self, repo: &RepositoryHandle) -> Result<BranchList, GitError> {
        info!(root = %repo.root.display(), "listing branches");
        logged("branch", self.client.branches(&repo.root).await)
    }

    pub async fn create_branch(&self, repo: &RepositoryHandle, name: &str) -> Result<(), GitError> {
        info!(root = %repo.root.display(), branch = name, "creating branch");
        logged("checkout -b", self.client.create_branch(&repo.root, name).await)
    }

    pub async fn checkout_branch(
        &self,
        repo: &RepositoryHandle,
        name: &str,
    ) -> Result<(), GitError> {
        info!(root = %repo.root.display(), branch = name, "checking out branch");
        logged("checkout", self.client.checkout(&repo.root, name).await)
    }

    /// `.` discards every change in the tree; explicit paths are restored from the index.
    pub async fn reset_working_directory(
        &self,
        repo: &RepositoryHandle,
        paths: impl Into<PathSpec>,
    ) -> Result<(), GitError> {
        let paths = paths.into();
        info!(root = %repo.root.display(), files = %paths.describe(), "discarding changes");
        let result = match &paths {
            PathSpec::All => self.client.reset_hard(&repo.root).await,
            PathSpec::Paths(list) => self.client.restore_paths(&repo.root, list).await,
        };
        logged("reset", result)
    }

    pub async fn unstage_files(
        &self,
        repo: &RepositoryHandle,
        paths: impl Into<PathSpec>,
    ) -> Result<(), GitError> {
        let paths = paths.into();
        info!(root = %repo.root.display(), files = %paths.describe(), "unstaging files");
        logged("reset", self.client.unstage(&repo.root, &paths).await)
    }

    pub async fn repo_root(&self, repo: &RepositoryHandle) -> Result<String, GitError> {
        logged("rev-parse", self.client.show_toplevel(&repo.root).await)
    }

    pub async fn execute_custom_command(
        &self,
        repo: &RepositoryHandle,
        command: &str,
        args: &[String],
    ) -> Result<String, GitError> {
        info!(root = %repo.root.display(), command, args = ?args, "running custom git command");
        logged(command, self.client.raw(&repo.root, command, args).await)
    }
}

fn logged<T>(operation: &str, result: Result<T, GitError>) -> Result<T, GitError> {
    result.inspect_err(|e| error!(operation, error = %e, "git operation failed"))
}
