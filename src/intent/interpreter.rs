use super::patterns::{
    phrase_rules, PhraseRule, RuleShape, COMMAND_VERBS, COMMIT_KEYWORDS, COMMIT_TYPE_KEYWORDS,
    STATUS_KEYWORDS, WHITESPACE_RUNS,
};
use super::types::{
    CommandKind, CommitType, IntentAction, IntentAnalysis, IntentModifier, IntentTarget,
    ParsedCommand,
};
use chrono::Local;
use regex::Captures;
use tracing::debug;

const BASE_CONFIDENCE: f32 = 0.8;
const LONG_MATCH_BONUS: f32 = 0.1;
const LONG_MATCH_CHARS: usize = 10;
const KEYWORD_COMMIT_CONFIDENCE: f32 = 0.7;
const KEYWORD_STATUS_CONFIDENCE: f32 = 0.6;
const FALLBACK_CONFIDENCE: f32 = 0.3;

/// Turns short natural-language phrases into [`ParsedCommand`]s.
///
/// Interpretation is total: every input yields one of the six command kinds
/// with a confidence in `[0, 1]`. Unrecognized text degrades to a
/// low-confidence status query.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentInterpreter;

impl IntentInterpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&self, text: &str) -> ParsedCommand {
        let trimmed = text.trim();

        for rule in phrase_rules() {
            let Some(captures) = rule.pattern.captures(trimmed) else {
                continue;
            };
            let captured = captured_payload(&captures);
            if captured.is_some_and(|msg| rule.rejects.contains(&msg)) {
                continue;
            }

            let message = match rule.shape {
                RuleShape::Idiom => String::new(),
                RuleShape::Payload => match captured {
                    Some(msg) => msg.to_string(),
                    // A branch verb without a name must not turn into a branch name
                    None if rule.kind == CommandKind::Branch => String::new(),
                    None => self.strip_command_verbs(trimmed, rule.kind),
                },
            };
            let matched_chars = captures
                .get(0)
                .map(|m| m.as_str().chars().count())
                .unwrap_or(0);
            let commit_type =
                (rule.kind == CommandKind::Commit).then(|| self.detect_commit_type(trimmed));

            debug!(
                command = %rule.kind,
                pattern = %rule.pattern,
                "phrase matched"
            );
            return ParsedCommand {
                command: rule.kind,
                message,
                commit_type,
                original_text: text.to_string(),
                confidence: confidence_for(rule, matched_chars),
            };
        }

        self.keyword_fallback(text)
    }

    /// Render the message that will be handed to `git commit`.
    pub fn format_commit_message(&self, parsed: &ParsedCommand, conventional: bool) -> String {
        let message = if parsed.message.trim().is_empty() {
            default_commit_message()
        } else {
            parsed.message.clone()
        };

        if !conventional {
            return message;
        }
        let commit_type = parsed.commit_type.unwrap_or_default();
        format!("{commit_type}: {message}")
    }

    /// First commit category whose keywords appear in `text`, `feat` otherwise.
    pub fn detect_commit_type(&self, text: &str) -> CommitType {
        find_commit_type(text).unwrap_or_default()
    }

    pub fn analyze_intent(&self, text: &str) -> IntentAnalysis {
        let lower = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        let action = if has(&["提交", "commit"]) {
            Some(IntentAction::Commit)
        } else if has(&["添加", "add"]) {
            Some(IntentAction::Add)
        } else if has(&["查看", "check", "view"]) {
            Some(IntentAction::View)
        } else {
            None
        };

        let target = if has(&["所有", "全部", "all"]) {
            Some(IntentTarget::All)
        } else if has(&["文件", "files"]) {
            Some(IntentTarget::Files)
        } else {
            None
        };

        let mut modifiers = Vec::new();
        if has(&["自动", "auto"]) {
            modifiers.push(IntentModifier::Auto);
        }
        if has(&["强制", "force"]) {
            modifiers.push(IntentModifier::Force);
        }

        let confidence: f32 = 0.5
            + if action.is_some() { 0.3 } else { 0.0 }
            + if target.is_some() { 0.2 } else { 0.0 };

        IntentAnalysis {
            action,
            target,
            modifiers,
            confidence: confidence.min(1.0),
        }
    }

    fn keyword_fallback(&self, text: &str) -> ParsedCommand {
        let lower = text.to_lowercase();

        if COMMIT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return ParsedCommand {
                command: CommandKind::Commit,
                message: self.strip_command_verbs(text.trim(), CommandKind::Commit),
                commit_type: Some(self.detect_commit_type(text)),
                original_text: text.to_string(),
                confidence: KEYWORD_COMMIT_CONFIDENCE,
            };
        }

        let confidence = if STATUS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            KEYWORD_STATUS_CONFIDENCE
        } else {
            FALLBACK_CONFIDENCE
        };
        debug!(confidence, "no phrase matched, falling back to status");

        ParsedCommand {
            command: CommandKind::Status,
            message: String::new(),
            commit_type: None,
            original_text: text.to_string(),
            confidence,
        }
    }

    /// Remove command verbs from the phrase. Only commits synthesize a
    /// message when nothing is left.
    fn strip_command_verbs(&self, text: &str, kind: CommandKind) -> String {
        let without_verbs = COMMAND_VERBS.replace_all(text, "");
        let cleaned = WHITESPACE_RUNS
            .replace_all(&without_verbs, " ")
            .trim()
            .to_string();

        if cleaned.is_empty() && kind == CommandKind::Commit {
            default_commit_message()
        } else {
            cleaned
        }
    }
}

fn captured_payload<'t>(captures: &Captures<'t>) -> Option<&'t str> {
    captures
        .name("msg")
        .map(|m| m.as_str().trim())
        .filter(|msg| !msg.is_empty())
}

fn confidence_for(rule: &PhraseRule, matched_chars: usize) -> f32 {
    let mut confidence = BASE_CONFIDENCE;
    if matched_chars > LONG_MATCH_CHARS {
        confidence += LONG_MATCH_BONUS;
    }
    confidence += match rule.kind {
        CommandKind::Commit => 0.05,
        CommandKind::Status => -0.1,
        CommandKind::Log => -0.05,
        _ => 0.0,
    };
    confidence.clamp(0.0, 1.0)
}

pub fn find_commit_type(text: &str) -> Option<CommitType> {
    let lower = text.to_lowercase();
    COMMIT_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(commit_type, _)| *commit_type)
}

pub fn default_commit_message() -> String {
    format!("Auto commit at {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> ParsedCommand {
        IntentInterpreter::new().interpret(text)
    }

    #[test]
    fn chinese_commit_keeps_payload() {
        let parsed = interpret("提交添加了新功能");
        assert_eq!(parsed.command, CommandKind::Commit);
        assert_eq!(parsed.message, "添加了新功能");
        assert_eq!(parsed.commit_type, Some(CommitType::Feat));
    }

    #[test]
    fn english_commit_keeps_message_casing() {
        let parsed = interpret("Commit Fix Login Bug");
        assert_eq!(parsed.command, CommandKind::Commit);
        assert_eq!(parsed.message, "Fix Login Bug");
        assert_eq!(parsed.commit_type, Some(CommitType::Fix));
    }

    #[test]
    fn add_without_separator() {
        let parsed = interpret("添加package.json");
        assert_eq!(parsed.command, CommandKind::Add);
        assert_eq!(parsed.message, "package.json");
        assert_eq!(parsed.commit_type, None);
    }

    #[test]
    fn idioms_carry_no_message() {
        assert_eq!(interpret("查看状态").message, "");
        let log = interpret("查看提交历史");
        assert_eq!(log.command, CommandKind::Log);
        assert_eq!(log.message, "");
    }

    #[test]
    fn commit_history_is_not_a_commit() {
        assert_eq!(interpret("提交历史").command, CommandKind::Log);
    }

    #[test]
    fn commit_prefixed_queries_stay_read_only() {
        assert_eq!(interpret("提交日志").command, CommandKind::Log);
        assert_eq!(interpret("提交记录").command, CommandKind::Log);
        assert_eq!(interpret("提交状态").command, CommandKind::Status);
        assert_eq!(interpret("提交差异").command, CommandKind::Diff);
        assert_eq!(interpret("提交改动").command, CommandKind::Commit);
        assert_eq!(interpret("提交分支").command, CommandKind::Branch);
        for text in ["提交日志", "提交状态", "提交差异"] {
            assert_eq!(interpret(text).commit_type, None, "{text}");
        }

        let commit = interpret("提交添加了新功能");
        assert_eq!(commit.command, CommandKind::Commit);
        assert_eq!(commit.message, "添加了新功能");
    }

    #[test]
    fn branch_verb_without_name_has_empty_message() {
        for text in ["新建分支", "创建分支", "切换分支", "切换到分支  "] {
            let parsed = interpret(text);
            assert_eq!(parsed.command, CommandKind::Branch, "{text}");
            assert_eq!(parsed.message, "", "{text}");
        }
        assert_eq!(interpret("新建分支 feature-x").message, "feature-x");
    }

    #[test]
    fn bare_commit_code_synthesizes_message() {
        let parsed = interpret("提交代码");
        assert_eq!(parsed.command, CommandKind::Commit);
        assert!(parsed.message.starts_with("Auto commit at "));
    }

    #[test]
    fn confidence_adjustments() {
        // "commit fix login bug" is 20 chars: 0.8 + 0.1 + 0.05
        assert!((interpret("commit fix login bug").confidence - 0.95).abs() < 1e-6);
        // "status" is 6 chars: 0.8 - 0.1
        assert!((interpret("status").confidence - 0.7).abs() < 1e-6);
        // "log" is 3 chars: 0.8 - 0.05
        assert!((interpret("show log").confidence - 0.75).abs() < 1e-6);
        assert!((interpret("diff").confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn keyword_fallbacks() {
        let commit = interpret("please commit");
        assert_eq!(commit.command, CommandKind::Commit);
        assert_eq!(commit.message, "please");
        assert!((commit.confidence - 0.7).abs() < 1e-6);

        let status = interpret("我改了什么修改吗");
        assert_eq!(status.command, CommandKind::Status);
        assert!((status.confidence - 0.6).abs() < 1e-6);

        let unknown = interpret("随便说点什么");
        assert_eq!(unknown.command, CommandKind::Status);
        assert_eq!(unknown.message, "");
        assert!((unknown.confidence - 0.3).abs() < 1e-6);
    }

    #[test]
    fn commit_outranks_add() {
        let parsed = interpret("commit add login page");
        assert_eq!(parsed.command, CommandKind::Commit);
        assert_eq!(parsed.message, "add login page");
    }

    #[test]
    fn status_outranks_log_and_branch() {
        assert_eq!(interpret("branch status").command, CommandKind::Status);
        assert_eq!(interpret("log diff").command, CommandKind::Log);
        assert_eq!(interpret("diff of branch").command, CommandKind::Diff);
    }

    #[test]
    fn branch_phrases_capture_name() {
        let parsed = interpret("新建分支 feature/login");
        assert_eq!(parsed.command, CommandKind::Branch);
        assert_eq!(parsed.message, "feature/login");

        let parsed = interpret("checkout develop");
        assert_eq!(parsed.command, CommandKind::Branch);
        assert_eq!(parsed.message, "develop");

        let parsed = interpret("查看分支");
        assert_eq!(parsed.command, CommandKind::Branch);
        assert_eq!(parsed.message, "");
    }

    #[test]
    fn format_commit_message_styles() {
        let interpreter = IntentInterpreter::new();
        let parsed = ParsedCommand::direct(
            CommandKind::Commit,
            "添加用户登录功能",
            Some(CommitType::Feat),
        );
        assert_eq!(
            interpreter.format_commit_message(&parsed, true),
            "feat: 添加用户登录功能"
        );

        let plain = ParsedCommand::direct(CommandKind::Commit, "普通提交消息", None);
        assert_eq!(interpreter.format_commit_message(&plain, false), "普通提交消息");
        assert_eq!(interpreter.format_commit_message(&plain, true), "feat: 普通提交消息");

        let empty = ParsedCommand::direct(CommandKind::Commit, "", Some(CommitType::Chore));
        assert!(interpreter
            .format_commit_message(&empty, true)
            .starts_with("chore: Auto commit at "));
    }

    #[test]
    fn detect_commit_type_keywords() {
        let interpreter = IntentInterpreter::new();
        assert_eq!(interpreter.detect_commit_type("添加新功能"), CommitType::Feat);
        assert_eq!(interpreter.detect_commit_type("implement new feature"), CommitType::Feat);
        assert_eq!(interpreter.detect_commit_type("修复bug"), CommitType::Fix);
        assert_eq!(interpreter.detect_commit_type("fix authentication issue"), CommitType::Fix);
        assert_eq!(interpreter.detect_commit_type("更新文档"), CommitType::Docs);
        assert_eq!(interpreter.detect_commit_type("update documentation"), CommitType::Docs);
        assert_eq!(interpreter.detect_commit_type("重构模块"), CommitType::Refactor);
        assert_eq!(interpreter.detect_commit_type("性能优化"), CommitType::Perf);
        assert_eq!(interpreter.detect_commit_type("普通提交"), CommitType::Feat);
    }

    #[test]
    fn analyze_intent_breakdown() {
        let interpreter = IntentInterpreter::new();

        let analysis = interpreter.analyze_intent("提交所有更改");
        assert_eq!(analysis.action, Some(IntentAction::Commit));
        assert_eq!(analysis.target, Some(IntentTarget::All));
        assert!((analysis.confidence - 1.0).abs() < 1e-6);

        let analysis = interpreter.analyze_intent("查看文件状态");
        assert_eq!(analysis.action, Some(IntentAction::View));
        assert_eq!(analysis.target, Some(IntentTarget::Files));

        let analysis = interpreter.analyze_intent("自动强制提交");
        assert_eq!(
            analysis.modifiers,
            vec![IntentModifier::Auto, IntentModifier::Force]
        );
        assert!((analysis.confidence - 0.8).abs() < 1e-6);

        let analysis = interpreter.analyze_intent("hello");
        assert_eq!(analysis.action, None);
        assert!((analysis.confidence - 0.5).abs() < 1e-6);
    }
}
