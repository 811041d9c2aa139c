// Human-readable rendering of result envelopes

use crate::dispatch::OperationResult;
use serde_json::Value;

/// Render `result` as a few indented lines for the terminal.
pub fn render(result: &OperationResult) -> String {
    let mut lines = Vec::new();

    if result.success {
        let message = result.message.as_deref().unwrap_or("done");
        lines.push(format!("✅ [{}] {}", result.action, message));
    } else {
        let error = result.error.as_deref().unwrap_or("unknown error");
        lines.push(format!("❌ [{}] {}", result.action, error));
    }

    if let Some(details) = &result.details {
        lines.extend(render_details(&result.action, details));
    }
    if result.pushed == Some(true) {
        lines.push("   🚀 pushed to remote".to_string());
    }
    if let Some(warning) = &result.warning {
        lines.push(format!("   ⚠️  {warning}"));
    }
    if let Some(suggestion) = &result.suggestion {
        lines.push(format!("   💡 {suggestion}"));
    }

    lines.join("\n")
}

fn render_details(action: &str, details: &Value) -> Vec<String> {
    match action {
        "commit" => {
            let mut lines = vec![format!("   📝 {}", short_hash(&details["commit"]))];
            if let Some(branch) = details["branch"].as_str() {
                lines.push(format!("   🌿 {branch}"));
            }
            lines
        }
        "status" => {
            let mut lines = Vec::new();
            if let Some(branch) = details["currentBranch"].as_str() {
                lines.push(format!("   🌿 {branch}"));
            }
            for key in ["modified", "created", "deleted", "staged", "untracked", "conflicted"] {
                let files = string_list(&details["files"][key]);
                if !files.is_empty() {
                    lines.push(format!("   {key}: {}", files.join(", ")));
                }
            }
            lines
        }
        "log" => details["commits"]
            .as_array()
            .map(|commits| {
                commits
                    .iter()
                    .map(|c| {
                        format!(
                            "   {} {} ({})",
                            short_hash(&c["hash"]),
                            c["message"].as_str().unwrap_or_default(),
                            c["author"].as_str().unwrap_or_default()
                        )
                    })
                    .collect()
            })
            .unwrap_or_default(),
        "diff" => details["stat"]
            .as_str()
            .map(|stat| stat.lines().map(|l| format!("   {l}")).collect())
            .unwrap_or_default(),
        "branch_list" => {
            let current = details["current"].as_str().unwrap_or_default();
            string_list(&details["local"])
                .into_iter()
                .map(|b| {
                    if b == current {
                        format!("   * {b}")
                    } else {
                        format!("     {b}")
                    }
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

fn short_hash(value: &Value) -> String {
    value.as_str().unwrap_or_default().chars().take(7).collect()
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
