//! Natural-language intent interpretation
//!
//! Maps short phrases (Chinese or English) onto one of six repository
//! commands using an ordered phrase table with a keyword fallback.

pub mod interpreter;
pub mod patterns;
pub mod types;

pub use interpreter::{default_commit_message, find_commit_type, IntentInterpreter};
pub use types::{
    CommandKind, CommitType, IntentAction, IntentAnalysis, IntentModifier, IntentTarget,
    ParsedCommand,
};
