use super::build_dispatcher;
use crate::cli::rpc::RpcServer;
use crate::config::GitPushConfig;
use crate::dispatch::CommandContext;
use anyhow::Result;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::info;

pub struct ServeCommand {
    pub context: CommandContext,
}

impl ServeCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub async fn execute(&self, config: &GitPushConfig) -> Result<ExitCode> {
        let dispatcher = build_dispatcher(config)?;
        let server = RpcServer::new(&dispatcher, self.context.clone());

        info!("serving JSON-RPC on stdio");
        server
            .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        Ok(ExitCode::SUCCESS)
    }
}
