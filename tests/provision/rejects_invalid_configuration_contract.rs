use crate::harness::{TestContext, failure_record};
use predicates::prelude::*;

#[test]
fn unknown_configuration_key_exits_with_configuration_code() {
    let ctx = TestContext::new();
    ctx.write_config("server_root = \"/srv\"\n");

    ctx.provision(&[])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("config.toml"));

    assert!(ctx.untouched());
}

#[test]
fn relative_directory_is_rejected() {
    let ctx = TestContext::new();
    ctx.write_raw_config("servers_root = \"servers\"\n");

    ctx.provision(&[])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("servers_root"));
}

#[test]
fn missing_file_named_by_environment_is_rejected() {
    let ctx = TestContext::new();

    ctx.cli()
        .env("MCDEPLOY_CONFIG", ctx.root().join("absent.toml"))
        .args([
            "-userID", "alice", "-userServerID", "s1", "-userServerType", "1",
            "-userServerPort", "25565", "-userServerXMS", "1G", "-userServerXMX", "2G",
            "-userServerThreads", "4",
        ])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("absent.toml"));

    assert!(ctx.untouched());
}

#[test]
fn invalid_log_level_is_a_configuration_error() {
    let ctx = TestContext::new();
    ctx.write_config("[logging]\nlevel = \"verbose\"\n");

    ctx.provision(&[]).assert().code(9).stderr(predicate::str::contains("logging.level"));
}

#[test]
fn configuration_failure_is_logged_as_one_json_record() {
    let ctx = TestContext::new();
    ctx.write_config("server_root = \"/srv\"\n");

    let output = ctx.provision(&[]).assert().code(9).get_output().clone();

    let failure = failure_record(&output.stdout);
    assert_eq!(failure["level"], "ERROR");
    assert_eq!(failure["fields"]["class"], "configuration");
    assert_eq!(failure["fields"]["exit_code"], 9);
}

#[test]
fn servers_root_with_shell_metacharacters_is_rejected() {
    let ctx = TestContext::new();
    ctx.write_raw_config("servers_root = \"/srv/mc $HOME\"\n");

    ctx.provision(&[])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("servers_root"));

    assert!(ctx.untouched());
}
