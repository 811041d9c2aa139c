use super::{build_dispatcher, exit_code, print_result};
use crate::config::GitPushConfig;
use crate::dispatch::{CommandContext, CommandRequest};
use crate::intent::CommitType;
use anyhow::{anyhow, Result};
use std::process::ExitCode;

pub struct ExecCommand {
    pub action: String,
    pub message: String,
    pub commit_type: Option<String>,
    pub context: CommandContext,
    pub json: bool,
}

impl ExecCommand {
    pub fn new(action: String, message: String, context: CommandContext) -> Self {
        Self {
            action,
            message,
            commit_type: None,
            context,
            json: false,
        }
    }

    pub fn with_commit_type(mut self, commit_type: Option<String>) -> Self {
        self.commit_type = commit_type;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn execute(&self, config: &GitPushConfig) -> Result<ExitCode> {
        let commit_type = self
            .commit_type
            .as_deref()
            .map(|t| {
                t.parse::<CommitType>()
                    .map_err(|t| anyhow!("unknown commit type '{t}'"))
            })
            .transpose()?;

        let dispatcher = build_dispatcher(config)?;
        let request = CommandRequest::action(self.action.clone(), self.message.clone())
            .with_commit_type(commit_type)
            .with_context(self.context.clone());
        let result = dispatcher.process(request).await;

        print_result(&result, self.json)?;
        Ok(exit_code(&result))
    }
}
