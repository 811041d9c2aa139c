use super::{build_dispatcher, exit_code, print_result};
use crate::config::GitPushConfig;
use crate::dispatch::{CommandContext, CommandRequest};
use anyhow::Result;
use std::process::ExitCode;

pub struct RunCommand {
    pub text: String,
    pub context: CommandContext,
    pub json: bool,
}

impl RunCommand {
    pub fn new(text: String, context: CommandContext) -> Self {
        Self {
            text,
            context,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn execute(&self, config: &GitPushConfig) -> Result<ExitCode> {
        let dispatcher = build_dispatcher(config)?;
        let request = CommandRequest::text(self.text.clone()).with_context(self.context.clone());
        let result = dispatcher.process(request).await;

        print_result(&result, self.json)?;
        Ok(exit_code(&result))
    }
}
