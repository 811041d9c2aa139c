use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six repository operations a phrase can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Commit,
    Add,
    Status,
    Log,
    Diff,
    Branch,
}

impl CommandKind {
    /// Evaluation order used by the interpreter. Earlier kinds win.
    pub const PRIORITY: [CommandKind; 6] = [
        CommandKind::Commit,
        CommandKind::Add,
        CommandKind::Status,
        CommandKind::Log,
        CommandKind::Diff,
        CommandKind::Branch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Commit => "commit",
            CommandKind::Add => "add",
            CommandKind::Status => "status",
            CommandKind::Log => "log",
            CommandKind::Diff => "diff",
            CommandKind::Branch => "branch",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(CommandKind::Commit),
            "add" => Ok(CommandKind::Add),
            "status" => Ok(CommandKind::Status),
            "log" => Ok(CommandKind::Log),
            "diff" => Ok(CommandKind::Diff),
            "branch" => Ok(CommandKind::Branch),
            other => Err(other.to_string()),
        }
    }
}

/// Conventional-commit category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

impl Default for CommitType {
    fn default() -> Self {
        CommitType::Feat
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feat" => Ok(CommitType::Feat),
            "fix" => Ok(CommitType::Fix),
            "docs" => Ok(CommitType::Docs),
            "style" => Ok(CommitType::Style),
            "refactor" => Ok(CommitType::Refactor),
            "perf" => Ok(CommitType::Perf),
            "test" => Ok(CommitType::Test),
            "chore" => Ok(CommitType::Chore),
            other => Err(other.to_string()),
        }
    }
}

/// Structured command produced from one input phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommand {
    pub command: CommandKind,
    /// Free-text payload: commit message, path to stage, branch name.
    pub message: String,
    pub commit_type: Option<CommitType>,
    pub original_text: String,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f32,
}

impl ParsedCommand {
    /// Build a command directly, bypassing interpretation.
    pub fn direct(
        command: CommandKind,
        message: impl Into<String>,
        commit_type: Option<CommitType>,
    ) -> Self {
        let message = message.into();
        Self {
            command,
            original_text: message.clone(),
            message,
            commit_type,
            confidence: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentAction {
    Commit,
    Add,
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentTarget {
    All,
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentModifier {
    Auto,
    Force,
}

/// Coarse intent breakdown for diagnostic consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentAnalysis {
    pub action: Option<IntentAction>,
    pub target: Option<IntentTarget>,
    pub modifiers: Vec<IntentModifier>,
    pub confidence: f32,
}
