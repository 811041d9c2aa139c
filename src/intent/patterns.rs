//! Ordered phrase table for the intent interpreter.
//!
//! Rules are grouped by [`CommandKind`] and evaluated in
//! [`CommandKind::PRIORITY`] order, then in declaration order inside each
//! kind. The first rule that matches decides the command, so moving a rule
//! between kinds or reordering kinds changes how phrases are classified.

use super::types::{CommandKind, CommitType};
use regex::Regex;
use std::sync::LazyLock;

/// How a matching rule produces the free-text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleShape {
    /// A verb followed by free text, captured in the `msg` group.
    Payload,
    /// A fixed idiom that carries no free text.
    Idiom,
}

#[derive(Debug)]
pub struct PhraseRule {
    pub kind: CommandKind,
    pub shape: RuleShape,
    pub pattern: Regex,
    /// Captured payloads that disqualify the rule (e.g. "提交历史" is a log query).
    pub rejects: &'static [&'static str],
}

impl PhraseRule {
    fn new(kind: CommandKind, shape: RuleShape, pattern: &str) -> Self {
        Self {
            kind,
            shape,
            // Patterns are compile-time constants covered by the tests below.
            pattern: Regex::new(pattern).expect("invalid phrase pattern"),
            rejects: &[],
        }
    }

    fn rejecting(mut self, rejects: &'static [&'static str]) -> Self {
        self.rejects = rejects;
        self
    }
}

static PHRASE_RULES: LazyLock<Vec<PhraseRule>> = LazyLock::new(|| {
    use CommandKind::*;
    use RuleShape::*;

    vec![
        PhraseRule::new(Commit, Payload, r"^提交代码\s*(?P<msg>.*)$"),
        PhraseRule::new(Commit, Payload, r"^提交\s*(?P<msg>.+)$")
            .rejecting(&[
                "历史", "记录", "历史记录", "日志", "状态", "差异", "分支",
            ]),
        PhraseRule::new(Commit, Payload, r"(?i)\bcommit\s+(?P<msg>.+)$"),
        PhraseRule::new(Commit, Payload, r"把(?P<msg>.+?)提交"),
        PhraseRule::new(Commit, Payload, r"(?i)\bpush\s+(?P<msg>.+)$"),
        PhraseRule::new(Commit, Payload, r"^(?:发布|推送)\s*(?P<msg>.+)$"),
        PhraseRule::new(Add, Payload, r"^添加\s*(?P<msg>.+)$"),
        PhraseRule::new(Add, Payload, r"(?i)\badd\s+(?P<msg>.+)$"),
        PhraseRule::new(Add, Payload, r"把(?P<msg>.+?)加到暂存区"),
        PhraseRule::new(Add, Payload, r"^暂存\s*(?P<msg>.+)$"),
        PhraseRule::new(Status, Idiom, r"状态"),
        PhraseRule::new(Status, Idiom, r"(?i)\bstatus\b"),
        PhraseRule::new(Status, Idiom, r"查看修改"),
        PhraseRule::new(Status, Idiom, r"有什么变化"),
        PhraseRule::new(Status, Idiom, r"检查状态"),
        PhraseRule::new(Log, Idiom, r"日志"),
        PhraseRule::new(Log, Idiom, r"(?i)\b(?:log|history)\b"),
        PhraseRule::new(Log, Idiom, r"提交历史"),
        PhraseRule::new(Log, Idiom, r"提交记录"),
        PhraseRule::new(Log, Idiom, r"历史记录"),
        PhraseRule::new(Diff, Idiom, r"差异"),
        PhraseRule::new(Diff, Idiom, r"(?i)\bdiff\b"),
        PhraseRule::new(Diff, Idiom, r"查看改动"),
        PhraseRule::new(Diff, Idiom, r"比较变化"),
        PhraseRule::new(Diff, Idiom, r"改动详情"),
        PhraseRule::new(Branch, Payload, r"^(?:新建|创建|切换到|切换)分支\s*(?P<msg>.*)$"),
        PhraseRule::new(Branch, Payload, r"(?i)\b(?:checkout|switch to)\s+(?P<msg>\S+)$"),
        PhraseRule::new(Branch, Idiom, r"分支"),
        PhraseRule::new(Branch, Idiom, r"(?i)\bbranch(?:es)?\b"),
    ]
});

/// All phrase rules, already sorted by kind priority.
pub fn phrase_rules() -> &'static [PhraseRule] {
    &PHRASE_RULES
}

/// Command verbs stripped from a phrase when no payload was captured.
pub static COMMAND_VERBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)提交代码|提交|commit|添加|add|推送|push|发布|publish")
        .expect("invalid verb pattern")
});

pub static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));

/// Keywords that turn an unmatched phrase into a commit.
pub const COMMIT_KEYWORDS: &[&str] = &["提交", "commit", "推送", "push", "发布", "publish"];

/// Keywords that turn an unmatched phrase into a status query.
pub const STATUS_KEYWORDS: &[&str] = &["状态", "status", "变化", "修改", "检查"];

/// Keyword sets per commit category, checked in order.
pub const COMMIT_TYPE_KEYWORDS: &[(CommitType, &[&str])] = &[
    (CommitType::Feat, &["新功能", "feature", "feat", "功能"]),
    (CommitType::Fix, &["修复", "bug", "fix"]),
    (CommitType::Docs, &["文档", "document", "docs", "readme", "说明"]),
    (CommitType::Style, &["格式", "样式", "style", "format"]),
    (CommitType::Refactor, &["重构", "refactor"]),
    (CommitType::Perf, &["性能", "优化", "performance", "perf"]),
    (CommitType::Test, &["测试", "test"]),
    (CommitType::Chore, &["杂项", "维护", "chore"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_compile_and_follow_kind_priority() {
        let rules = phrase_rules();
        assert!(!rules.is_empty());

        let rank = |kind: CommandKind| {
            CommandKind::PRIORITY
                .iter()
                .position(|k| *k == kind)
                .unwrap()
        };
        for pair in rules.windows(2) {
            assert!(
                rank(pair[0].kind) <= rank(pair[1].kind),
                "{} rule declared after {} rule",
                pair[0].kind,
                pair[1].kind
            );
        }
    }

    #[test]
    fn every_kind_has_at_least_one_rule() {
        for kind in CommandKind::PRIORITY {
            assert!(phrase_rules().iter().any(|rule| rule.kind == kind), "{kind}");
        }
    }

    #[test]
    fn payload_rules_expose_msg_group() {
        for rule in phrase_rules().iter().filter(|r| r.shape == RuleShape::Payload) {
            assert!(
                rule.pattern.capture_names().flatten().any(|name| name == "msg"),
                "{}",
                rule.pattern
            );
        }
    }
}
