/// End-to-end request handling against real repositories in temp directories
use git_push_mcp::{BranchAction, CommandContext, CommandRequest};

mod fixtures;
use fixtures::TestHarness;

#[tokio::test]
async fn commit_round_trip_leaves_tree_clean() {
    let harness = TestHarness::with_git().unwrap();
    harness.create_file("README.md", "# hello\n").unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher
        .process(CommandRequest::text("提交代码 add readme"))
        .await;
    assert!(result.success, "{result:?}");
    assert_eq!(result.action, "commit");
    assert_eq!(result.message.as_deref(), Some("docs: add readme"));
    assert_eq!(result.pushed, Some(false));

    let status = dispatcher.process(CommandRequest::text("查看状态")).await;
    assert!(status.success);
    assert_eq!(status.details.unwrap()["isClean"], true);

    let log = dispatcher.process(CommandRequest::action("log", "")).await;
    let details = log.details.unwrap();
    assert_eq!(details["count"], 1);
    assert_eq!(details["commits"][0]["message"], "docs: add readme");
    assert_eq!(details["commits"][0]["author"], "Test User");
}

#[tokio::test]
async fn commit_on_clean_tree_fails_without_new_commit() {
    let harness = TestHarness::with_initial_commit().unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("提交代码")).await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("nothing to commit"));

    let count = harness.git(&["rev-list", "--count", "HEAD"]).unwrap();
    assert_eq!(count.trim(), "1");
}

#[tokio::test]
async fn push_failure_without_remote_is_a_warning() {
    let harness = TestHarness::with_initial_commit().unwrap();
    harness.create_file("src/lib.rs", "pub fn f() {}\n").unwrap();
    let dispatcher = harness.dispatcher();
    let context = CommandContext {
        auto_push: true,
        ..CommandContext::default()
    };

    let result = dispatcher
        .process(CommandRequest::text("commit fix the build").with_context(context))
        .await;
    assert!(result.success, "{result:?}");
    assert_eq!(result.message.as_deref(), Some("fix: fix the build"));
    assert_eq!(result.pushed, Some(false));
    assert!(result.warning.is_some());

    let count = harness.git(&["rev-list", "--count", "HEAD"]).unwrap();
    assert_eq!(count.trim(), "2");
}

#[tokio::test]
async fn ensure_repository_initializes_once() {
    let harness = TestHarness::new().unwrap();
    let gateway = harness.gateway();

    let first = gateway.ensure_repository().await.unwrap();
    assert!(first.initialized);
    assert!(harness.path().join(".git").is_dir());

    let second = gateway.ensure_repository().await.unwrap();
    assert!(!second.initialized);
    assert_eq!(first.root, second.root);
}

#[tokio::test]
async fn requests_in_plain_directory_create_repository() {
    let harness = TestHarness::new().unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("status")).await;
    assert!(result.success, "{result:?}");
    assert!(harness.path().join(".git").exists());
}

#[tokio::test]
async fn log_on_unborn_branch_is_empty() {
    let harness = TestHarness::with_git().unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("查看提交记录")).await;
    assert!(result.success, "{result:?}");
    assert_eq!(result.action, "log");
    assert_eq!(result.details.unwrap()["count"], 0);
}

#[tokio::test]
async fn add_single_file_stages_only_that_file() {
    let harness = TestHarness::with_initial_commit().unwrap();
    harness.create_file("a.txt", "a\n").unwrap();
    harness.create_file("b.txt", "b\n").unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("添加a.txt")).await;
    assert!(result.success, "{result:?}");
    assert_eq!(result.details.unwrap()["files"], "a.txt");

    let status = dispatcher.process(CommandRequest::action("status", "")).await;
    let details = status.details.unwrap();
    assert_eq!(details["files"]["staged"], serde_json::json!(["a.txt"]));
    assert_eq!(details["files"]["untracked"], serde_json::json!(["b.txt"]));
}

#[tokio::test]
async fn diff_reports_unstaged_changes() {
    let harness = TestHarness::with_initial_commit().unwrap();
    harness
        .create_file("README.md", "# fixture\nmore\nlines\n")
        .unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("查看改动")).await;
    assert!(result.success, "{result:?}");
    let details = result.details.unwrap();
    assert_eq!(details["filesChanged"], 1);
    assert_eq!(details["insertions"], 2);
    assert!(details["stat"].as_str().unwrap().contains("README.md"));
}

#[tokio::test]
async fn branch_create_checkout_and_list() {
    let harness = TestHarness::with_initial_commit().unwrap();
    let dispatcher = harness.dispatcher();
    let original = harness
        .git(&["rev-parse", "--abbrev-ref", "HEAD"])
        .unwrap()
        .trim()
        .to_string();

    let created = dispatcher
        .process(CommandRequest::text("新建分支 feature-x"))
        .await;
    assert!(created.success, "{created:?}");
    assert_eq!(created.action, "branch_create");

    let listed = dispatcher.process(CommandRequest::text("分支")).await;
    assert_eq!(listed.action, "branch_list");
    let details = listed.details.unwrap();
    assert_eq!(details["current"], "feature-x");
    let local = details["local"].as_array().unwrap();
    assert!(local.iter().any(|b| b == original.as_str()));

    let context = CommandContext {
        action: BranchAction::Checkout,
        ..CommandContext::default()
    };
    let switched = dispatcher
        .process(CommandRequest::action("branch", original.clone()).with_context(context))
        .await;
    assert!(switched.success, "{switched:?}");
    assert_eq!(switched.action, "branch_checkout");
    let head = harness.git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap();
    assert_eq!(head.trim(), original);
}

#[tokio::test]
async fn checkout_of_missing_branch_fails() {
    let harness = TestHarness::with_initial_commit().unwrap();
    let dispatcher = harness.dispatcher();
    let context = CommandContext {
        action: BranchAction::Checkout,
        ..CommandContext::default()
    };

    let result = dispatcher
        .process(CommandRequest::action("branch", "does-not-exist").with_context(context))
        .await;
    assert!(!result.success);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn branch_phrase_without_name_creates_nothing() {
    let harness = TestHarness::with_initial_commit().unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("新建分支")).await;
    assert!(!result.success, "{result:?}");

    let branches = harness.git(&["branch", "--list"]).unwrap();
    assert_eq!(branches.lines().count(), 1, "{branches}");
}

#[tokio::test]
async fn commit_log_phrase_leaves_history_alone() {
    let harness = TestHarness::with_initial_commit().unwrap();
    harness.create_file("wip.txt", "draft\n").unwrap();
    let dispatcher = harness.dispatcher();

    let result = dispatcher.process(CommandRequest::text("提交日志")).await;
    assert!(result.success, "{result:?}");
    assert_eq!(result.action, "log");

    let count = harness.git(&["rev-list", "--count", "HEAD"]).unwrap();
    assert_eq!(count.trim(), "1");
}
