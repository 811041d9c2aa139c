//! Git command bindings
//!
//! [`GitClient`] wraps the `git` executable: one typed method per
//! toolchain call, each run inside an explicit working-tree root.

use super::error::GitError;
use super::types::{
    BranchList, CommitOptions, CommitSummary, DiffSummary, LogEntry, PathSpec, PushOptions,
    RepositoryStatus,
};
use crate::external::{CommandExecutor, CommandOutput};
use regex::Regex;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::debug;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

static SHORTSTAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+) files? changed(?:, (\d+) insertions?\(\+\))?(?:, (\d+) deletions?\(-\))?",
    )
    .expect("invalid shortstat pattern")
});

pub struct GitClient {
    executor: Arc<dyn CommandExecutor>,
    program: String,
}

impl GitClient {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::with_program(executor, "git")
    }

    pub fn with_program(executor: Arc<dyn CommandExecutor>, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    async fn output(&self, root: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
        debug!(root = %root.display(), args = ?args, "running git");
        let output = self.executor.execute(&self.program, args, root).await?;

        if !output.success() {
            return Err(GitError::classify(args, &output.stdout, &output.stderr));
        }
        Ok(output)
    }

    async fn execute_git_command(&self, root: &Path, args: &[&str]) -> Result<String, GitError> {
        Ok(self.output(root, args).await?.stdout)
    }

    pub async fn status(&self, root: &Path) -> Result<RepositoryStatus, GitError> {
        let output = self
            .execute_git_command(root, &["status", "--porcelain=v1", "--branch", "-z"])
            .await?;
        Ok(parse_status_output(&output))
    }

    pub async fn add(&self, root: &Path, paths: &PathSpec) -> Result<(), GitError> {
        match paths {
            PathSpec::All => self.execute_git_command(root, &["add", "."]).await?,
            PathSpec::Paths(paths) => {
                let mut args = vec!["add", "--"];
                args.extend(paths.iter().map(String::as_str));
                self.execute_git_command(root, &args).await?
            }
        };
        Ok(())
    }

    /// Returns git's own commit output, which carries the shortstat line.
    pub async fn commit(
        &self,
        root: &Path,
        message: &str,
        options: CommitOptions,
    ) -> Result<String, GitError> {
        let mut args = vec!["commit", "-m", message];
        if options.no_verify {
            args.push("--no-verify");
        }
        if options.allow_empty {
            args.push("--allow-empty");
        }
        self.execute_git_command(root, &args).await
    }

    pub async fn head_commit(&self, root: &Path) -> Result<String, GitError> {
        Ok(self
            .execute_git_command(root, &["rev-parse", "HEAD"])
            .await?
            .trim()
            .to_string())
    }

    /// Returns whether anything was actually transferred.
    pub async fn push(
        &self,
        root: &Path,
        remote: &str,
        branch: &str,
        options: PushOptions,
    ) -> Result<bool, GitError> {
        let mut args = vec!["push"];
        if options.force {
            args.push("--force");
        }
        if options.set_upstream {
            args.push("--set-upstream");
        }
        args.push(remote);
        args.push(branch);

        let output = self.output(root, &args).await?;
        let up_to_date = output.stderr.contains("Everything up-to-date")
            || output.stdout.contains("Everything up-to-date");
        Ok(!up_to_date)
    }

    pub async fn log(&self, root: &Path, limit: usize) -> Result<Vec<LogEntry>, GitError> {
        let max_count = format!("--max-count={limit}");
        let format = "--format=%H%x1f%aI%x1f%an%x1f%s%x1e";
        match self.execute_git_command(root, &["log", &max_count, format]).await {
            Ok(output) => Ok(parse_log_output(&output)),
            // Unborn branch: no history yet.
            Err(GitError::GitCommandFailed { message, .. })
                if message.contains("does not have any commits yet") =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn diff_stat(&self, root: &Path) -> Result<DiffSummary, GitError> {
        let stat = self.execute_git_command(root, &["diff", "--stat"]).await?;
        let summary = parse_shortstat(&stat);
        Ok(DiffSummary {
            stat: stat.trim_end().to_string(),
            files_changed: summary.changes,
            insertions: summary.insertions,
            deletions: summary.deletions,
        })
    }

    pub async fn branches(&self, root: &Path) -> Result<BranchList, GitError> {
        let output = self
            .execute_git_command(root, &["branch", "--all", "--format=%(refname)%09%(HEAD)"])
            .await?;
        Ok(parse_branch_output(&output))
    }

    pub async fn create_branch(&self, root: &Path, name: &str) -> Result<(), GitError> {
        self.execute_git_command(root, &["checkout", "-b", name]).await?;
        Ok(())
    }

    pub async fn checkout(&self, root: &Path, name: &str) -> Result<(), GitError> {
        self.execute_git_command(root, &["checkout", name]).await?;
        Ok(())
    }

    pub async fn init(&self, root: &Path) -> Result<(), GitError> {
        self.execute_git_command(root, &["init"]).await?;
        Ok(())
    }

    pub async fn show_toplevel(&self, root: &Path) -> Result<String, GitError> {
        Ok(self
            .execute_git_command(root, &["rev-parse", "--show-toplevel"])
            .await?
            .trim()
            .to_string())
    }

    pub async fn reset_hard(&self, root: &Path) -> Result<(), GitError> {
        self.execute_git_command(root, &["reset", "--hard"]).await?;
        Ok(())
    }

    pub async fn restore_paths(&self, root: &Path, paths: &[String]) -> Result<(), GitError> {
        let mut args = vec!["checkout", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.execute_git_command(root, &args).await?;
        Ok(())
    }

    pub async fn unstage(&self, root: &Path, paths: &PathSpec) -> Result<(), GitError> {
        match paths {
            PathSpec::All => self.execute_git_command(root, &["reset"]).await?,
            PathSpec::Paths(paths) => {
                let mut args = vec!["reset", "HEAD", "--"];
                args.extend(paths.iter().map(String::as_str));
                self.execute_git_command(root, &args).await?
            }
        };
        Ok(())
    }

    /// Arbitrary passthrough: `git <command> <args...>`.
    pub async fn raw(&self, root: &Path, command: &str, args: &[String]) -> Result<String, GitError> {
        let mut full = vec![command];
        full.extend(args.iter().map(String::as_str));
        self.execute_git_command(root, &full).await
    }
}

/// Parse `git status --porcelain=v1 --branch -z`.
pub fn parse_status_output(output: &str) -> RepositoryStatus {
    let mut status = RepositoryStatus::default();
    let mut entries = output.split('\0').filter(|e| !e.is_empty());
    let mut saw_change = false;

    while let Some(entry) = entries.next() {
        if let Some(header) = entry.strip_prefix("## ") {
            let (current, tracking) = parse_branch_header(header);
            status.current_branch = current;
            status.tracking = tracking;
            continue;
        }

        let mut chars = entry.chars();
        let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
            continue;
        };
        let Some(path) = entry.get(3..).map(str::to_string) else {
            continue;
        };
        if matches!(x, 'R' | 'C') {
            // The next entry is the source path of the rename/copy.
            entries.next();
        }
        saw_change = true;

        match (x, y) {
            ('?', '?') => status.untracked.push(path),
            ('D', 'D') | ('A', 'U') | ('U', 'D') | ('U', 'A') | ('D', 'U') | ('A', 'A')
            | ('U', 'U') => status.conflicted.push(path),
            _ => {
                if matches!(x, 'A' | 'M' | 'D' | 'R' | 'C') {
                    status.staged.push(path.clone());
                }
                if x == 'A' {
                    status.created.push(path.clone());
                }
                if x == 'M' || y == 'M' {
                    status.modified.push(path.clone());
                }
                if x == 'D' || y == 'D' {
                    status.deleted.push(path);
                }
            }
        }
    }

    status.is_clean = !saw_change;
    status
}

fn parse_branch_header(header: &str) -> (Option<String>, Option<String>) {
    let header = header.trim();
    for prefix in ["No commits yet on ", "Initial commit on "] {
        if let Some(branch) = header.strip_prefix(prefix) {
            return (Some(branch.to_string()), None);
        }
    }
    if header.starts_with("HEAD (no branch)") {
        return (None, None);
    }

    let head = header.split(' ').next().unwrap_or(header);
    match head.split_once("...") {
        Some((current, tracking)) => (Some(current.to_string()), Some(tracking.to_string())),
        None => (Some(head.to_string()), None),
    }
}

pub fn parse_shortstat(text: &str) -> CommitSummary {
    let Some(captures) = SHORTSTAT.captures(text) else {
        return CommitSummary::default();
    };
    let number = |i: usize| {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    CommitSummary {
        changes: number(1),
        insertions: number(2),
        deletions: number(3),
    }
}

fn parse_log_output(output: &str) -> Vec<LogEntry> {
    output
        .split(RECORD_SEP)
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let mut fields = record.split(FIELD_SEP);
            Some(LogEntry {
                hash: fields.next()?.to_string(),
                date: fields.next()?.to_string(),
                author: fields.next()?.to_string(),
                message: fields.next().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

fn parse_branch_output(output: &str) -> BranchList {
    let mut branches = BranchList::default();
    for line in output.lines() {
        let (refname, head) = line.split_once('\t').unwrap_or((line, ""));
        if let Some(name) = refname.strip_prefix("refs/heads/") {
            if head.trim() == "*" {
                branches.current = Some(name.to_string());
            }
            branches.local.push(name.to_string());
        } else if let Some(name) = refname.strip_prefix("refs/remotes/") {
            if !name.ends_with("/HEAD") {
                branches.remote.push(name.to_string());
            }
        }
    }
    branches
}
