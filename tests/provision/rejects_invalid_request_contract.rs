use crate::harness::{TestContext, failure_record};
use predicates::prelude::*;

#[test]
fn missing_flag_is_rejected_with_usage_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["-userID", "alice", "-userServerID", "s1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));

    assert!(ctx.untouched());
}

#[test]
fn port_without_room_for_rcon_and_query_is_rejected() {
    let ctx = TestContext::new();

    ctx.provision(&[("userServerPort", "65534")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("userServerPort"));

    assert!(ctx.untouched());
}

#[test]
fn unknown_engine_code_is_rejected() {
    let ctx = TestContext::new();

    ctx.provision(&[("userServerType", "9")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("userServerType"));

    assert!(ctx.untouched());
}

#[test]
fn path_like_identifiers_are_rejected() {
    let ctx = TestContext::new();

    ctx.provision(&[("userServerID", "../escape")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("userServerID"));
    ctx.provision(&[("userID", "1alice")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("userID"));

    assert!(ctx.untouched());
}

#[test]
fn failure_is_logged_as_one_json_record() {
    let ctx = TestContext::new();

    let output = ctx.provision(&[("userServerXMX", "lots")]).assert().code(2).get_output().clone();

    let failure = failure_record(&output.stdout);
    assert_eq!(failure["level"], "ERROR");
    assert_eq!(failure["fields"]["stage"], "validated");
    assert_eq!(failure["fields"]["class"], "validation");
    assert_eq!(failure["fields"]["exit_code"], 2);
}

#[test]
fn usage_error_is_logged_as_a_validation_failure() {
    let ctx = TestContext::new();

    let output = ctx
        .cli()
        .args(["-userID", "alice", "-userServerID", "s1"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let failure = failure_record(&output.stdout);
    assert_eq!(failure["fields"]["stage"], "validated");
    assert_eq!(failure["fields"]["class"], "validation");
    assert!(failure["fields"]["error"].as_str().unwrap().contains("required"));
}
