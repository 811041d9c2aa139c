//! Line-delimited JSON-RPC 2.0 adapter
//!
//! One request object per input line, one response object per output line.
//! Requests without an `id` member are notifications and get no response;
//! an explicit `"id": null` is still answered.

use crate::dispatch::{
    BranchAction, CommandContext, CommandDispatcher, CommandRequest, ContextOverrides,
    OperationResult,
};
use crate::intent::CommitType;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const INVALID_PARAMS: i64 = -32602;
pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExecuteCommandParams {
    command: Option<String>,
    text: Option<String>,
    context: ContextOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExecuteActionParams {
    action: String,
    message: String,
    commit_type: Option<CommitType>,
    context: ContextOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HistoryParams {
    limit: Option<usize>,
}

pub struct RpcServer<'a> {
    dispatcher: &'a CommandDispatcher,
    context: CommandContext,
}

impl<'a> RpcServer<'a> {
    pub fn new(dispatcher: &'a CommandDispatcher, context: CommandContext) -> Self {
        Self {
            dispatcher,
            context,
        }
    }

    /// Serve until the reader hits end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        debug!("rpc input closed");
        Ok(())
    }

    /// Handle one input line, returning the serialized response if one is due.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value = match serde_json::from_str::<Value>(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparsable rpc line");
                return encode(error_response(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("parse error: {e}")),
                ));
            }
        };
        // Presence of the member decides notification vs call, not its value
        let id = value.get("id").cloned();

        let request = match serde_json::from_value::<RpcRequest>(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "malformed rpc request");
                return encode(error_response(
                    id.unwrap_or(Value::Null),
                    RpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
                ));
            }
        };

        let outcome = self.call(&request.method, request.params).await;
        let id = id?;
        let response = match outcome {
            Ok(result) => RpcResponse {
                jsonrpc: "2.0",
                id,
                result: Some(result),
                error: None,
            },
            Err(error) => error_response(id, error),
        };

        encode(response)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!(method, "rpc call");
        let result = match method {
            "initialize" => return Ok(self.initialize()),
            "git_push/execute_command" => {
                let params: ExecuteCommandParams = parse_params(params)?;
                let text = params
                    .command
                    .or(params.text)
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| RpcError::new(INVALID_PARAMS, "missing 'command' text"))?;
                let request = CommandRequest::text(text)
                    .with_context(self.context.clone().with_overrides(&params.context));
                self.dispatcher.process(request).await
            }
            "git_push/execute_action" => {
                let params: ExecuteActionParams = parse_params(params)?;
                if params.action.trim().is_empty() {
                    return Err(RpcError::new(INVALID_PARAMS, "missing 'action'"));
                }
                let request = CommandRequest::action(params.action, params.message)
                    .with_commit_type(params.commit_type)
                    .with_context(self.context.clone().with_overrides(&params.context));
                self.dispatcher.process(request).await
            }
            "git_push/get_status" => {
                self.dispatcher
                    .process(CommandRequest::action("status", "").with_context(self.context.clone()))
                    .await
            }
            "git_push/get_history" => {
                let params: HistoryParams = parse_params(params)?;
                let context = CommandContext {
                    limit: params.limit.unwrap_or(self.context.limit),
                    ..self.context.clone()
                };
                self.dispatcher
                    .process(CommandRequest::action("log", "").with_context(context))
                    .await
            }
            "git_push/get_branches" => {
                let context = CommandContext {
                    action: BranchAction::List,
                    ..self.context.clone()
                };
                self.dispatcher
                    .process(CommandRequest::action("branch", "").with_context(context))
                    .await
            }
            "git_push/get_capabilities" => self.dispatcher.get_capabilities(),
            other => {
                return Err(RpcError::new(
                    METHOD_NOT_FOUND,
                    format!("method {other} not found"),
                ))
            }
        };
        to_value(&result)
    }

    fn initialize(&self) -> Value {
        let capabilities = self
            .dispatcher
            .get_capabilities()
            .details
            .unwrap_or(Value::Null);
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {
                "tools": { "list": true, "call": true },
                "git": capabilities,
            },
        })
    }
}

fn error_response(id: Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(error),
    }
}

fn encode(response: RpcResponse) -> Option<String> {
    serde_json::to_string(&response)
        .inspect_err(|e| warn!(error = %e, "failed to serialize rpc response"))
        .ok()
}

fn parse_params<T: for<'de> Deserialize<'de> + Default>(params: Value) -> Result<T, RpcError> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("invalid params: {e}")))
}

fn to_value(result: &OperationResult) -> Result<Value, RpcError> {
    serde_json::to_value(result).map_err(|e| RpcError::new(-32603, e.to_string()))
}
