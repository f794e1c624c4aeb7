//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

const DB_VARS: &[&str] = &[
    "DATABASE_URL",
    "DB_HOST",
    "DB_PORT",
    "DB_USER",
    "DB_PASSWORD",
    "DB_NAME",
    "USER_CONFLICT_POLICY",
];

fn usersvc() -> Command {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    for var in DB_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    usersvc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    usersvc()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--conflict-policy"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_rejects_unknown_conflict_policy() {
    usersvc()
        .args(["serve", "--conflict-policy", "overwrite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid conflict policy value"));
}

#[test]
fn test_migrate_requires_database_settings() {
    usersvc()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("database URL not configured"));
}

#[test]
fn test_seed_help() {
    usersvc()
        .arg("seed")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--db-host"));
}
