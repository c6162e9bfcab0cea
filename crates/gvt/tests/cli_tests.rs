//! CLI integration tests.
//!
//! These tests run the built `gvt` binary against temporary directories.

use gvt_test_utils::{BuiltTestProject, TestProject};
use std::process::{Command, Output};

fn gvt(project: &BuiltTestProject, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gvt"))
        .args(args)
        .current_dir(project.path())
        .output()
        .expect("Failed to execute command")
}

/// Exit status as the OS reports it (negative codes wrap on unix).
fn status(code: i32) -> i32 {
    if cfg!(unix) {
        code & 0xff
    } else {
        code
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_help_command() {
    let project = TestProject::new().build();
    let output = gvt(&project, &["--help"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Snapshot-based version store"));
    assert!(stdout(&output).contains("checkout <id>"));
}

#[test]
fn test_no_command() {
    let project = TestProject::new().build();
    let output = gvt(&project, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Please specify command."));
}

#[test]
fn test_unknown_command() {
    let project = TestProject::new().build();
    let output = gvt(&project, &["push"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown command push."));
}

#[test]
fn test_uninitialized_store() {
    let project = TestProject::new().with_file("a.txt", "hello").build();
    let output = gvt(&project, &["add", "a.txt"]);

    assert_eq!(output.status.code(), Some(status(-2)));
    assert!(stderr(&output).contains("not initialized"));
    assert!(!project.file_exists(".gvt"));
}

#[test]
fn test_init_twice() {
    let project = TestProject::new().build();

    let output = gvt(&project, &["init"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("initialized successfully"));

    let output = gvt(&project, &["init"]);
    assert_eq!(output.status.code(), Some(10));
}

#[test]
fn test_full_scenario() {
    let project = TestProject::new().with_file("a.txt", "hello").build();

    assert!(gvt(&project, &["init"]).status.success());
    assert_eq!(project.read_file(".gvt/HEAD"), "0");

    let output = gvt(&project, &["add", "a.txt"]);
    assert!(output.status.success());
    assert_eq!(project.read_file(".gvt/HEAD"), "1");
    assert_eq!(project.read_file(".gvt/versions/1/files/a.txt"), "hello");

    project.write_file("a.txt", "world");
    let output = gvt(&project, &["commit", "a.txt", "-m", "second words"]);
    assert!(output.status.success());
    assert_eq!(project.read_file(".gvt/versions/2/files/a.txt"), "world");
    assert_eq!(project.read_file(".gvt/versions/1/files/a.txt"), "hello");

    let output = gvt(&project, &["detach", "a.txt"]);
    assert!(output.status.success());
    assert_eq!(project.read_file(".gvt/HEAD"), "3");
    assert!(!project.file_exists(".gvt/versions/3/files/a.txt"));
    assert_eq!(project.read_file("a.txt"), "world");

    let output = gvt(&project, &["checkout", "1"]);
    assert!(output.status.success());
    assert_eq!(project.read_file("a.txt"), "hello");
    assert_eq!(project.read_file(".gvt/ACTIVE"), "1");

    let output = gvt(&project, &["history", "-last", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "3: file detached: a.txt\n2: second words\n");

    let output = gvt(&project, &["version", "99"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(stderr(&output).contains("Invalid version number: 99"));
}

#[test]
fn test_file_error_codes() {
    let project = TestProject::new().with_file("a.txt", "hello").build();
    assert!(gvt(&project, &["init"]).status.success());

    assert_eq!(gvt(&project, &["add"]).status.code(), Some(20));
    assert_eq!(gvt(&project, &["add", "ghost.txt"]).status.code(), Some(21));
    assert_eq!(gvt(&project, &["detach"]).status.code(), Some(30));
    assert_eq!(gvt(&project, &["commit", "-m", "x"]).status.code(), Some(50));
    assert_eq!(gvt(&project, &["commit", "ghost.txt"]).status.code(), Some(51));
    assert_eq!(gvt(&project, &["checkout", "abc"]).status.code(), Some(60));

    // Untracked files are no-ops, not errors
    let output = gvt(&project, &["commit", "a.txt"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("File is not added to gvt"));
    assert_eq!(project.read_file(".gvt/HEAD"), "0");
}

#[test]
fn test_dir_flag_and_config_file() {
    let project = TestProject::new()
        .with_file("work/a.txt", "hello")
        .with_config(r#"{ "init_message": "configured" }"#)
        .build();
    let work = project.path().join("work");
    let work_dir = work.to_str().unwrap();

    // The config file lives in the working directory, not the process cwd
    assert!(gvt(&project, &["-C", work_dir, "init"]).status.success());
    assert!(gvt(&project, &["-C", work_dir, "add", "a.txt"]).status.success());
    assert_eq!(project.read_file("work/.gvt/versions/1/files/a.txt"), "hello");

    let output = gvt(&project, &["-C", work_dir, "version", "0"]);
    assert_eq!(stdout(&output), "Version: 0\nstore initialized\n");

    assert!(gvt(&project, &["init"]).status.success());
    let output = gvt(&project, &["version", "0"]);
    assert_eq!(stdout(&output), "Version: 0\nconfigured\n");
}

#[test]
fn test_store_dir_flag() {
    let project = TestProject::new().with_file("a.txt", "hello").build();

    assert!(gvt(&project, &["--store-dir", ".versions", "init"]).status.success());
    assert!(project.file_exists(".versions/HEAD"));
    assert!(!project.file_exists(".gvt"));

    let output = gvt(&project, &["--store-dir", "../outside", "init"]);
    assert_eq!(output.status.code(), Some(status(-3)));
}

#[test]
fn test_storage_failure_codes() {
    let project = TestProject::new().with_file("a.txt", "hello").build();
    assert!(gvt(&project, &["init"]).status.success());

    // A regular file where the next version directory belongs
    project.write_file(".gvt/versions/1", "in the way");
    let output = gvt(&project, &["add", "a.txt"]);
    assert_eq!(output.status.code(), Some(22));
    assert!(stderr(&output).contains("File cannot be added, see ERR for details. File: a.txt"));
    assert!(stderr(&output).contains("Failed to write"));
    assert_eq!(project.read_file(".gvt/HEAD"), "0");

    project.delete_file(".gvt/versions/1");
    assert!(gvt(&project, &["commit", "a.txt"]).status.success());
    assert_eq!(project.read_file(".gvt/HEAD"), "1");

    project.write_file(".gvt/versions/2", "in the way");
    let output = gvt(&project, &["commit", "a.txt"]);
    assert_eq!(output.status.code(), Some(52));
    assert_eq!(project.read_file(".gvt/HEAD"), "1");
}
