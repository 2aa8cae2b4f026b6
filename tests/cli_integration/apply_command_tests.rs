use super::test_utils::CliTest;
use predicates::prelude::*;

fn resource_json(exec: &std::path::Path, extra: &str) -> String {
    format!(
        r#"{{"host": "www.example.com", "role": "web", "site_directory": "/srv/site", "waffles_exec": "{}"{extra}}}"#,
        exec.display()
    )
}

#[test]
fn test_apply_streams_output_in_order() {
    let test = CliTest::new();
    let exec = test.fake_waffles(
        r#"echo "args: $*"
echo "site: $WAFFLES_SITE_DIR"
echo "done""#,
    );
    test.resource_file("site.json", &resource_json(&exec, r#", "debug": "true", "retry": 3"#));

    test.command()
        .args(["apply", "site.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Executing: WAFFLES_SITE_DIR=/srv/site {} -s www.example.com -r web -d -c 3",
            exec.display()
        )))
        .stdout(predicate::str::contains("args: -s www.example.com -r web -d -c 3"))
        .stdout(predicate::str::contains("site: /srv/site"))
        .stdout(predicate::str::is_match("(?s)Executing:.*args:.*site:.*done").unwrap());
}

#[test]
fn test_apply_overrides_from_command_line() {
    let test = CliTest::new();
    let exec = test.fake_waffles(r#"echo "args: $*"; echo "site: $WAFFLES_SITE_DIR""#);
    test.resource_file("site.json", &resource_json(&exec, ""));

    test.command()
        .args([
            "apply",
            "site.json",
            "--host",
            "db.example.com",
            "--role",
            "db",
            "--site-directory",
            "/opt/site",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("args: -s db.example.com -r db"))
        .stdout(predicate::str::contains("site: /opt/site"));
}

#[test]
fn test_apply_failure_reports_status_and_output() {
    let test = CliTest::new();
    let exec = test.fake_waffles("echo 'Error: no such role'\nexit 3");
    test.resource_file("site.json", &resource_json(&exec, ""));

    test.command()
        .args(["apply", "site.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: no such role"))
        .stderr(predicate::str::contains("exit status 3"))
        .stderr(predicate::str::contains("Output: Error: no such role"));
}

#[test]
fn test_apply_missing_executable() {
    let test = CliTest::new();
    let missing = test.path().join("not-installed.sh");
    test.resource_file("site.json", &resource_json(&missing, ""));

    test.command()
        .args(["apply", "site.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not-installed.sh"));
}

#[test]
fn test_apply_invalid_config_runs_nothing() {
    let test = CliTest::new();
    let exec = test.fake_waffles("touch ran");
    test.resource_file(
        "site.json",
        &format!(r#"{{"role": "web", "waffles_exec": "{}"}}"#, exec.display()),
    );

    test.command()
        .args(["apply", "site.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"host\": required field is not set"));
    assert!(!test.path().join("ran").exists());
}

#[test]
fn test_log_output_sends_waffles_lines_to_log() {
    let test = CliTest::new();
    let exec = test.fake_waffles("echo converged");
    test.resource_file("site.json", &resource_json(&exec, ""));

    test.command()
        .args(["apply", "site.json", "--log-output"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("waffles: converged"))
        .stderr(predicate::str::contains("waffles: Executing:"));
}

#[test]
fn test_verbose_logging_goes_to_stderr() {
    let test = CliTest::new();
    let exec = test.fake_waffles("echo hello");
    test.resource_file("site.json", &resource_json(&exec, ""));

    test.command()
        .args(["-v", "apply", "site.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("DEBUG"));
}
