// Per-command handlers. Each one turns a parsed command into an envelope
// or a DispatchError; the dispatcher does the final conversion.

use super::dispatcher::DispatchError;
use super::envelope::OperationResult;
use super::request::{BranchAction, CommandContext};
use crate::git::{CommitOptions, PathSpec, PushOptions, RepositoryGateway, RepositoryHandle};
use crate::intent::{IntentInterpreter, ParsedCommand};
use serde_json::json;
use tracing::{debug, info};

/// Everything a handler needs for one request.
pub struct HandlerScope<'a> {
    pub gateway: &'a RepositoryGateway,
    pub interpreter: &'a IntentInterpreter,
    pub repo: &'a RepositoryHandle,
    pub context: &'a CommandContext,
}

pub async fn commit(
    scope: &HandlerScope<'_>,
    parsed: &ParsedCommand,
) -> Result<OperationResult, DispatchError> {
    let gateway = scope.gateway;
    let status = gateway.get_status(scope.repo).await?;
    if status.is_clean {
        return Err(DispatchError::NothingToCommit);
    }

    if scope.context.auto_stage && status.has_unstaged_work() {
        debug!("auto-staging modified and untracked files");
        gateway.add_files(scope.repo, PathSpec::All).await?;
    }

    let message = scope
        .interpreter
        .format_commit_message(parsed, scope.context.conventional_commits);

    let (report, pushed, warning) = if scope.context.auto_push {
        let outcome = gateway
            .commit_and_push(
                scope.repo,
                &message,
                CommitOptions::default(),
                PushOptions::default(),
            )
            .await?;
        (outcome.commit, outcome.pushed, outcome.warning)
    } else {
        let report = gateway
            .commit(scope.repo, &message, CommitOptions::default())
            .await?;
        (report, false, None)
    };

    info!(commit = %report.commit, pushed, "commit handled");
    Ok(OperationResult::ok("commit")
        .with_message(message)
        .with_details(json!({
            "commit": report.commit,
            "summary": report.summary,
            "branch": report.branch,
            "changes": {
                "filesChanged": status.files_changed(),
                "filesStaged": status.staged.len(),
            },
        }))
        .with_pushed(pushed)
        .with_warning(warning))
}

pub async fn add(
    scope: &HandlerScope<'_>,
    parsed: &ParsedCommand,
) -> Result<OperationResult, DispatchError> {
    let staged = scope
        .gateway
        .add_files(scope.repo, parsed.message.as_str())
        .await?;

    let message = if staged.is_all() {
        "staged all changes".to_string()
    } else {
        format!("staged {}", staged.describe())
    };
    Ok(OperationResult::ok("add")
        .with_message(message)
        .with_details(json!({ "files": staged.describe() })))
}

pub async fn status(scope: &HandlerScope<'_>) -> Result<OperationResult, DispatchError> {
    let status = scope.gateway.get_status(scope.repo).await?;

    let message = if status.is_clean {
        "working tree clean".to_string()
    } else {
        format!(
            "{} changed, {} staged, {} untracked",
            status.files_changed(),
            status.staged.len(),
            status.untracked.len()
        )
    };
    Ok(OperationResult::ok("status")
        .with_message(message)
        .with_details(json!({
            "isClean": status.is_clean,
            "currentBranch": status.current_branch,
            "tracking": status.tracking,
            "changes": {
                "modified": status.modified.len(),
                "created": status.created.len(),
                "deleted": status.deleted.len(),
                "staged": status.staged.len(),
                "untracked": status.untracked.len(),
                "conflicted": status.conflicted.len(),
            },
            "files": {
                "modified": status.modified,
                "created": status.created,
                "deleted": status.deleted,
                "staged": status.staged,
                "untracked": status.untracked,
                "conflicted": status.conflicted,
            },
        })))
}

pub async fn log(scope: &HandlerScope<'_>) -> Result<OperationResult, DispatchError> {
    let commits = scope
        .gateway
        .get_log(scope.repo, scope.context.limit)
        .await?;

    Ok(OperationResult::ok("log")
        .with_message(format!("{} commits", commits.len()))
        .with_details(json!({
            "count": commits.len(),
            "commits": commits,
        })))
}

pub async fn diff(scope: &HandlerScope<'_>) -> Result<OperationResult, DispatchError> {
    let diff = scope.gateway.get_diff(scope.repo).await?;

    let message = if diff.files_changed == 0 {
        "no unstaged changes".to_string()
    } else {
        format!(
            "{} files changed, {} insertions(+), {} deletions(-)",
            diff.files_changed, diff.insertions, diff.deletions
        )
    };
    Ok(OperationResult::ok("diff")
        .with_message(message)
        .with_details(json!(diff)))
}

pub async fn branch(
    scope: &HandlerScope<'_>,
    parsed: &ParsedCommand,
) -> Result<OperationResult, DispatchError> {
    let name = parsed.message.trim();
    let action = match scope.context.action {
        BranchAction::List => {
            infer_branch_action(&parsed.original_text).unwrap_or(BranchAction::List)
        }
        action => action,
    };
    if action != BranchAction::List && name.starts_with('-') {
        return Err(DispatchError::InvalidBranchName {
            name: name.to_string(),
        });
    }

    match action {
        BranchAction::Create => {
            if name.is_empty() {
                return Err(DispatchError::MissingBranchName { action: "create" });
            }
            scope.gateway.create_branch(scope.repo, name).await?;
            Ok(OperationResult::ok("branch_create")
                .with_message(format!("created and switched to branch {name}"))
                .with_details(json!({ "branch": name })))
        }
        BranchAction::Checkout => {
            if name.is_empty() {
                return Err(DispatchError::MissingBranchName { action: "checkout" });
            }
            scope.gateway.checkout_branch(scope.repo, name).await?;
            Ok(OperationResult::ok("branch_checkout")
                .with_message(format!("switched to branch {name}"))
                .with_details(json!({ "branch": name })))
        }
        BranchAction::List => {
            let branches = scope.gateway.get_branches(scope.repo).await?;
            Ok(OperationResult::ok("branch_list")
                .with_message(format!("{} local branches", branches.local.len()))
                .with_details(json!(branches)))
        }
    }
}

/// Branch verb named in the phrase itself, if any.
fn infer_branch_action(text: &str) -> Option<BranchAction> {
    let lower = text.to_lowercase();
    if ["新建", "创建", "create", "new branch"]
        .iter()
        .any(|w| lower.contains(w))
    {
        Some(BranchAction::Create)
    } else if ["切换", "checkout", "switch"].iter().any(|w| lower.contains(w)) {
        Some(BranchAction::Checkout)
    } else {
        None
    }
}
