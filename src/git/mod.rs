//! Git operations module
//!
//! `client` binds the `git` executable, `gateway` sequences repository
//! checks, staging, commits and pushes on top of it.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::GitClient;
pub use error::GitError;
pub use gateway::{RepositoryGateway, REPOSITORY_MARKER};
pub use types::{
    BranchList, CommitAndPushReport, CommitOptions, CommitReport, CommitSummary, DiffSummary,
    InitReport, LogEntry, PathSpec, PushOptions, PushReport, RepositoryCheck, RepositoryHandle,
    RepositoryStatus,
};
