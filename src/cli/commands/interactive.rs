use super::{build_dispatcher, print_result};
use crate::config::GitPushConfig;
use crate::dispatch::{CommandContext, CommandRequest};
use anyhow::Result;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "git-push> ";

pub struct InteractiveCommand {
    pub context: CommandContext,
}

/// What a single input line asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum LineAction<'a> {
    Skip,
    Quit,
    Help,
    Capabilities,
    Request(&'a str),
}

fn classify(line: &str) -> LineAction<'_> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => LineAction::Skip,
        "quit" | "exit" | "退出" => LineAction::Quit,
        "help" | "?" | "帮助" => LineAction::Help,
        "capabilities" => LineAction::Capabilities,
        _ => LineAction::Request(line),
    }
}

impl InteractiveCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub async fn execute(&self, config: &GitPushConfig) -> Result<ExitCode> {
        let dispatcher = build_dispatcher(config)?;
        println!("🚀 git-push-mcp ready. Type 'help' for examples, 'quit' to leave.");

        let mut reader = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{PROMPT}");
            io::stdout().flush()?;
            let Some(line) = reader.next_line().await? else {
                break;
            };

            match classify(&line) {
                LineAction::Skip => continue,
                LineAction::Quit => break,
                LineAction::Help => print_help(),
                LineAction::Capabilities => print_result(&dispatcher.get_capabilities(), true)?,
                LineAction::Request(text) => {
                    let request = CommandRequest::text(text).with_context(self.context.clone());
                    let result = dispatcher.process(request).await;
                    print_result(&result, false)?;
                }
            }
        }

        println!("👋 bye");
        Ok(ExitCode::SUCCESS)
    }
}

fn print_help() {
    println!("Examples:");
    println!("  提交代码 修复登录bug     # commit with type fix");
    println!("  commit add user profile  # commit with type feat");
    println!("  添加 src/main.rs         # stage one file");
    println!("  查看状态 / status        # working tree status");
    println!("  提交历史 / log           # recent commits");
    println!("  查看改动 / diff          # unstaged diff stat");
    println!("  新建分支 feature-x       # create and switch");
    println!("  切换分支 main            # switch branch");
    println!();
    println!("  capabilities, help, quit");
}
