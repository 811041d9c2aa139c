use super::envelope::OperationResult;
use super::handlers::{self, HandlerScope};
use super::request::{CommandRequest, RequestInput};
use crate::git::{GitError, RepositoryGateway};
use crate::intent::{CommandKind, IntentInterpreter, ParsedCommand};
use crate::telemetry::{create_request_span, generate_correlation_id};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn, Instrument};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("cannot initialize or access repository")]
    RepositoryUnavailable {
        #[source]
        source: GitError,
    },

    #[error("unsupported command: {command}")]
    UnsupportedCommand { command: String },

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("branch name is required to {action} a branch")]
    MissingBranchName { action: &'static str },

    #[error("invalid branch name: {name}")]
    InvalidBranchName { name: String },

    #[error(transparent)]
    Git(#[from] GitError),
}

impl DispatchError {
    /// Render the error as a failed envelope for `action`.
    pub fn into_result(self, action: &str) -> OperationResult {
        let failure = OperationResult::failure(action, self.to_string());
        match self {
            DispatchError::RepositoryUnavailable { source } => failure
                .with_details(json!({ "error": source.to_string() }))
                .with_suggestion("run inside a git working tree or a writable directory"),
            DispatchError::UnsupportedCommand { .. } => failure.with_details(json!({
                "supported": CommandKind::PRIORITY.map(|k| k.as_str()),
            })),
            DispatchError::MissingBranchName { .. } => {
                failure.with_suggestion("name the branch, e.g. 新建分支 feature-x")
            }
            DispatchError::InvalidBranchName { .. } => {
                failure.with_suggestion("branch names cannot start with '-'")
            }
            DispatchError::NothingToCommit => {
                failure.with_suggestion("modify or add files before committing")
            }
            DispatchError::Git(GitError::NotARepository { .. }) => {
                failure.with_suggestion("run inside a git working tree")
            }
            DispatchError::Git(GitError::RemoteNotFound { .. }) => {
                failure.with_suggestion("configure a remote with `git remote add`")
            }
            _ => failure,
        }
    }
}

/// What this service can do, reported without touching any repository.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub natural_language: bool,
    pub commands: Vec<CommandKind>,
    pub commit_types: Vec<&'static str>,
    pub branch_actions: Vec<&'static str>,
    pub features: Vec<&'static str>,
    pub languages: Vec<&'static str>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            natural_language: true,
            commands: CommandKind::PRIORITY.to_vec(),
            commit_types: vec![
                "feat", "fix", "docs", "style", "refactor", "perf", "test", "chore",
            ],
            branch_actions: vec!["list", "create", "checkout"],
            features: vec![
                "natural_language_parsing",
                "conventional_commits",
                "auto_stage",
                "auto_push",
                "auto_init",
            ],
            languages: vec!["zh", "en"],
        }
    }
}

/// Single entry point: interpret (or accept) a command, resolve the
/// repository and run the matching handler.
pub struct CommandDispatcher {
    interpreter: IntentInterpreter,
    gateway: RepositoryGateway,
}

impl CommandDispatcher {
    pub fn new(interpreter: IntentInterpreter, gateway: RepositoryGateway) -> Self {
        Self {
            interpreter,
            gateway,
        }
    }

    pub fn interpreter(&self) -> &IntentInterpreter {
        &self.interpreter
    }

    pub fn gateway(&self) -> &RepositoryGateway {
        &self.gateway
    }

    /// Never fails: every error is folded into the returned envelope.
    pub async fn process(&self, request: CommandRequest) -> OperationResult {
        let correlation_id = generate_correlation_id();
        let operation = match &request.input {
            RequestInput::Text(_) => "natural_language",
            RequestInput::Action { .. } => "action",
        };
        let span = create_request_span(operation, &correlation_id);

        async move {
            let (action, outcome) = self.run(&request).await;
            let result = outcome.unwrap_or_else(|e| {
                warn!(action = %action, error = %e, "request failed");
                e.into_result(&action)
            });
            info!(action = %result.action, success = result.success, "request finished");
            result.ensure_action(&action)
        }
        .instrument(span)
        .await
    }

    pub fn get_capabilities(&self) -> OperationResult {
        OperationResult::ok("get_capabilities")
            .with_message("natural-language git operations")
            .with_details(json!(Capabilities::default()))
    }

    async fn run(&self, request: &CommandRequest) -> (String, Result<OperationResult, DispatchError>) {
        let repo = match self.gateway.ensure_repository().await {
            Ok(repo) => repo,
            Err(source) => {
                return (
                    "ensure_repository".to_string(),
                    Err(DispatchError::RepositoryUnavailable { source }),
                )
            }
        };
        if repo.initialized {
            info!(root = %repo.root.display(), "initialized a new repository for this request");
        }

        let parsed = match self.route(&request.input) {
            Ok(parsed) => parsed,
            Err(e) => return ("dispatch".to_string(), Err(e)),
        };
        info!(
            command = %parsed.command,
            confidence = parsed.confidence,
            "dispatching"
        );

        let scope = HandlerScope {
            gateway: &self.gateway,
            interpreter: &self.interpreter,
            repo: &repo,
            context: &request.context,
        };
        let outcome = match parsed.command {
            CommandKind::Commit => handlers::commit(&scope, &parsed).await,
            CommandKind::Add => handlers::add(&scope, &parsed).await,
            CommandKind::Status => handlers::status(&scope).await,
            CommandKind::Log => handlers::log(&scope).await,
            CommandKind::Diff => handlers::diff(&scope).await,
            CommandKind::Branch => handlers::branch(&scope, &parsed).await,
        };
        (parsed.command.as_str().to_string(), outcome)
    }

    fn route(&self, input: &RequestInput) -> Result<ParsedCommand, DispatchError> {
        match input {
            RequestInput::Text(text) => Ok(self.interpreter.interpret(text)),
            RequestInput::Action {
                command,
                message,
                commit_type,
            } => {
                let kind = command
                    .parse::<CommandKind>()
                    .map_err(|command| DispatchError::UnsupportedCommand { command })?;
                let commit_type = match kind {
                    CommandKind::Commit => Some(
                        commit_type.unwrap_or_else(|| self.interpreter.detect_commit_type(message)),
                    ),
                    _ => None,
                };
                Ok(ParsedCommand::direct(kind, message.clone(), commit_type))
            }
        }
    }
}
