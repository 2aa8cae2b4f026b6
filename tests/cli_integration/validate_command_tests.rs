use super::test_utils::CliTest;
use predicates::prelude::*;

#[test]
fn test_validate_accepts_complete_config() {
    let test = CliTest::new();
    test.resource_file(
        "site.toml",
        "host = \"www.example.com\"\nrole = \"web\"\nsite_directory = \"/srv/site\"\nsudo = true\n",
    );

    test.command()
        .args(["validate", "site.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration is valid"));
}

#[test]
fn test_validate_lists_every_problem() {
    let test = CliTest::new();
    test.resource_file("site.yaml", "role: web\ncolour: blue\n");

    test.command()
        .args(["validate", "site.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"host\": required field is not set"))
        .stderr(predicate::str::contains("\"site_directory\": required field is not set"))
        .stderr(predicate::str::contains("invalid key: colour"));
}

#[test]
fn test_validate_missing_file() {
    let test = CliTest::new();

    test.command()
        .args(["validate", "absent.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_validate_unsupported_format() {
    let test = CliTest::new();
    test.resource_file("site.ini", "host=x\n");

    test.command()
        .args(["validate", "site.ini"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported configuration format"));
}
