use crate::config::GitPushConfig;
use crate::dispatch::Capabilities;
use anyhow::Result;
use std::process::ExitCode;

pub struct CapabilitiesCommand;

impl CapabilitiesCommand {
    /// Static document; never touches a repository.
    pub fn execute(&self, _config: &GitPushConfig) -> Result<ExitCode> {
        println!("{}", serde_json::to_string_pretty(&Capabilities::default())?);
        Ok(ExitCode::SUCCESS)
    }
}
