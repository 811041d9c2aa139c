// Scripted executor for tests - no processes are spawned

use super::command::{CommandError, CommandExecutor, CommandOutput};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Replays canned outputs keyed on `"<program> <args...>"` and records every call.
///
/// Several responses can be queued for the same command line; they are
/// handed out in order and the last one keeps repeating.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: Mutex<HashMap<String, VecDeque<Result<CommandOutput, CommandError>>>>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command_line: &str, response: Result<CommandOutput, CommandError>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses
                .entry(command_line.to_string())
                .or_default()
                .push_back(response);
        }
        self
    }

    pub fn ok(self, command_line: &str, stdout: &str) -> Self {
        self.respond(command_line, Ok(output(0, stdout, "")))
    }

    pub fn fail(self, command_line: &str, stderr: &str) -> Self {
        self.respond(command_line, Ok(output(1, "", stderr)))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(line, _)| line.clone()).collect())
            .unwrap_or_default()
    }

    pub fn calls_in(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|line| line.starts_with(prefix))
    }
}

pub fn output(status_code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        status_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput, CommandError> {
        let key = format!("{} {}", program, args.join(" "));
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((key.clone(), cwd.to_path_buf()));
        }

        let mut responses = self.responses.lock().map_err(|e| CommandError::Io {
            message: e.to_string(),
        })?;
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| unscripted(&key)),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| unscripted(&key)),
            None => unscripted(&key),
        }
    }
}

fn unscripted(key: &str) -> Result<CommandOutput, CommandError> {
    Ok(output(1, "", &format!("unscripted command: {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queue_then_repeats_last() {
        let executor = ScriptedExecutor::new()
            .ok("git status", "first")
            .ok("git status", "second");
        let cwd = Path::new("/repo");

        let a = executor.execute("git", &["status"], cwd).await.unwrap();
        let b = executor.execute("git", &["status"], cwd).await.unwrap();
        let c = executor.execute("git", &["status"], cwd).await.unwrap();
        assert_eq!(a.stdout, "first");
        assert_eq!(b.stdout, "second");
        assert_eq!(c.stdout, "second");
        assert_eq!(executor.calls().len(), 3);
    }

    #[tokio::test]
    async fn unscripted_commands_fail() {
        let executor = ScriptedExecutor::new();
        let out = executor
            .execute("git", &["push"], Path::new("/repo"))
            .await
            .unwrap();
        assert!(!out.success());
        assert!(executor.was_called("git push"));
    }
}
