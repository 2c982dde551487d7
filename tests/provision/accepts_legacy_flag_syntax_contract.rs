use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn legacy_single_dash_flags_reach_validation() {
    let ctx = TestContext::new();

    // Parsing succeeds; the run stops at validation on the threads value.
    ctx.provision(&[("userServerThreads", "0")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("userServerThreads"))
        .stderr(predicate::str::contains("unexpected argument").not());
}

#[test]
fn kebab_case_flags_are_aliases() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("--config")
        .arg(ctx.config_path())
        .args([
            "--user-id", "alice", "--server-id", "s1", "--server-type", "1", "--port", "0",
            "--xms", "1G", "--xmx", "2G", "--threads", "4",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("userServerPort"));
}

#[test]
fn help_lists_legacy_flag_names() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--userID"))
        .stdout(predicate::str::contains("--userServerThreads"));
}
