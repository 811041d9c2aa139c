use crate::intent::CommitType;
use serde::{Deserialize, Serialize};

/// Sub-operation for branch requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchAction {
    Create,
    Checkout,
    #[default]
    List,
}

/// Per-request knobs recognized by the handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandContext {
    /// Stage modified and untracked files before committing.
    pub auto_stage: bool,
    /// Push right after a successful commit.
    pub auto_push: bool,
    /// Prefix commit messages with `type: `.
    pub conventional_commits: bool,
    /// Maximum number of log entries.
    pub limit: usize,
    pub action: BranchAction,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            auto_stage: true,
            auto_push: false,
            conventional_commits: true,
            limit: 10,
            action: BranchAction::List,
        }
    }
}

/// Partial context as supplied by a transport; unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextOverrides {
    pub auto_stage: Option<bool>,
    pub auto_push: Option<bool>,
    pub conventional_commits: Option<bool>,
    pub limit: Option<usize>,
    pub action: Option<BranchAction>,
}

impl CommandContext {
    pub fn with_overrides(self, overrides: &ContextOverrides) -> Self {
        Self {
            auto_stage: overrides.auto_stage.unwrap_or(self.auto_stage),
            auto_push: overrides.auto_push.unwrap_or(self.auto_push),
            conventional_commits: overrides
                .conventional_commits
                .unwrap_or(self.conventional_commits),
            limit: overrides.limit.unwrap_or(self.limit),
            action: overrides.action.unwrap_or(self.action),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestInput {
    /// Free text to run through the interpreter.
    Text(String),
    /// Explicit action name; bypasses interpretation.
    Action {
        command: String,
        message: String,
        commit_type: Option<CommitType>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub input: RequestInput,
    pub context: CommandContext,
}

impl CommandRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            input: RequestInput::Text(text.into()),
            context: CommandContext::default(),
        }
    }

    pub fn action(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: RequestInput::Action {
                command: command.into(),
                message: message.into(),
                commit_type: None,
            },
            context: CommandContext::default(),
        }
    }

    pub fn with_commit_type(mut self, commit_type: Option<CommitType>) -> Self {
        if let RequestInput::Action {
            commit_type: slot, ..
        } = &mut self.input
        {
            *slot = commit_type;
        }
        self
    }

    pub fn with_context(mut self, context: CommandContext) -> Self {
        self.context = context;
        self
    }
}
