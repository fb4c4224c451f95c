//! CLI 参数面测试（不触发网关连接）

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("aeris-cli")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("velocity"))
        .stdout(predicate::str::contains("gimbal"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn test_version() {
    Command::cargo_bin("aeris-cli")
        .expect("binary exists")
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn test_velocity_requires_linear() {
    Command::cargo_bin("aeris-cli")
        .expect("binary exists")
        .args(["velocity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--linear"));
}

#[test]
fn test_connect_attempt_is_logged() {
    // 端口 1 立即拒绝连接：日志先于连接错误出现
    Command::cargo_bin("aeris-cli")
        .expect("binary exists")
        .env("RUST_LOG", "aeris_cli=info")
        .args(["--gateway", "127.0.0.1:1", "velocity", "--linear", "1,0,0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Connecting to gateway"));
}

#[test]
fn test_velocity_rejects_malformed_vector() {
    Command::cargo_bin("aeris-cli")
        .expect("binary exists")
        .args(["velocity", "--linear", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 comma-separated components"));
}
