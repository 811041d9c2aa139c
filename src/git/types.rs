use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Working-tree snapshot. Every list is present (possibly empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStatus {
    pub modified: Vec<String>,
    pub created: Vec<String>,
    pub deleted: Vec<String>,
    pub staged: Vec<String>,
    pub untracked: Vec<String>,
    pub conflicted: Vec<String>,
    pub is_clean: bool,
    pub current_branch: Option<String>,
    pub tracking: Option<String>,
}

impl RepositoryStatus {
    /// Modified, created and deleted paths combined.
    pub fn files_changed(&self) -> usize {
        self.modified.len() + self.created.len() + self.deleted.len()
    }

    pub fn has_unstaged_work(&self) -> bool {
        !self.untracked.is_empty() || !self.modified.is_empty()
    }
}

/// Which paths an add/reset/unstage applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    All,
    Paths(Vec<String>),
}

impl PathSpec {
    pub fn is_all(&self) -> bool {
        matches!(self, PathSpec::All)
    }

    pub fn describe(&self) -> String {
        match self {
            PathSpec::All => ".".to_string(),
            PathSpec::Paths(paths) => paths.join(" "),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "." | "all" => PathSpec::All,
            path => PathSpec::Paths(vec![path.to_string()]),
        }
    }
}

impl From<Vec<String>> for PathSpec {
    fn from(paths: Vec<String>) -> Self {
        if paths.is_empty() || paths.iter().any(|p| p == "." || p == "all") {
            PathSpec::All
        } else {
            PathSpec::Paths(paths)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Skip pre-commit and commit-msg hooks.
    pub no_verify: bool,
    pub allow_empty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushOptions {
    pub force: bool,
    pub set_upstream: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub changes: u32,
    pub insertions: u32,
    pub deletions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReport {
    pub commit: String,
    pub branch: Option<String>,
    pub message: String,
    pub summary: CommitSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReport {
    pub remote: String,
    pub branch: String,
    /// False when the remote was already up to date.
    pub pushed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAndPushReport {
    pub commit: CommitReport,
    pub pushed: bool,
    pub push: Option<PushReport>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub hash: String,
    pub date: String,
    pub message: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub stat: String,
    pub files_changed: u32,
    pub insertions: u32,
    pub deletions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchList {
    pub current: Option<String>,
    pub local: Vec<String>,
    pub remote: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryCheck {
    pub is_repository: bool,
    pub root: Option<PathBuf>,
    pub error: Option<String>,
}

/// Resolved working-tree root, valid for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    pub root: PathBuf,
    /// True when this request had to run `git init`.
    pub initialized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitReport {
    pub root: PathBuf,
    pub already_existed: bool,
    pub message: String,
}
