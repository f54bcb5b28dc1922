//! End-to-end tests for publishing the commit id as a build property

#![cfg(unix)]

mod helpers;

use helpers::{stamp_cmd, TestEnvironment, FAKE_HASH};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_property_written_to_properties_file() {
    let env = TestEnvironment::new().unwrap();
    let props = env.path().join("build.properties");

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(FAKE_HASH))
        .stdout(predicate::str::contains("published as 'vcs.commit.id'"));

    assert_eq!(
        fs::read_to_string(&props).unwrap(),
        format!("vcs.commit.id={}\n", FAKE_HASH)
    );
}

#[test]
fn test_existing_properties_preserved() {
    let env = TestEnvironment::new().unwrap();
    let props = env
        .write_file(
            "build.properties",
            "# generated
project.name=demo
project.owner: alice
project.team ops
vcs.commit.id = stale
! trailing note
",
        )
        .unwrap();

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap(), "--property-name", "vcs.commit.id"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&props).unwrap(),
        format!(
            "# generated\nproject.name=demo\nproject.owner: alice\nproject.team ops\nvcs.commit.id={}\n! trailing note\n",
            FAKE_HASH
        )
    );
}

#[test]
fn test_new_property_appended_after_comments() {
    let env = TestEnvironment::new().unwrap();
    let props = env
        .write_file("build.properties", "# keep this comment
project.owner: alice
")
        .unwrap();

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&props).unwrap(),
        format!("# keep this comment\nproject.owner: alice\nvcs.commit.id={}\n", FAKE_HASH)
    );
}

#[test]
fn test_property_name_with_separator_is_escaped() {
    let env = TestEnvironment::new().unwrap();
    let props = env.path().join("build.properties");

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap(), "--property-name", "commit=id"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&props).unwrap(),
        format!("commit\\=id={}\n", FAKE_HASH)
    );
}

#[test]
fn test_empty_property_name_reports_error_and_still_updates_source() {
    let env = TestEnvironment::new().unwrap();
    let props = env.path().join("build.properties");

    stamp_cmd(&env)
        .args([
            "-p",
            props.to_str().unwrap(),
            "--property-name",
            "",
            "--class-update",
            "--class-name",
            "a.b.Foo",
            "--class-constant",
            "ID",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"))
        .stderr(predicate::str::contains("property_name"));

    assert!(!props.exists());
    let source = fs::read_to_string(env.java_file("a.b.Foo")).unwrap();
    assert!(source.contains(&format!("ID = \"{}\"", FAKE_HASH)));
}

#[test]
fn test_no_property_update_leaves_file_alone() {
    let env = TestEnvironment::new().unwrap();
    let props = env.write_file("build.properties", "a=1\n").unwrap();

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap(), "--no-property-update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Property:    disabled"));

    assert_eq!(fs::read_to_string(&props).unwrap(), "a=1\n");
}

#[test]
fn test_failing_git_publishes_fallback() {
    let env = TestEnvironment::with_git_script(
        "echo 'fatal: not a git repository' >&2\nexit 128",
    )
    .unwrap();
    let props = env.path().join("build.properties");

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("fallback"));

    let content = fs::read_to_string(&props).unwrap();
    assert!(content.contains("[128]"));
    assert!(content.contains("fatal: not a git repository"));
}

#[test]
fn test_silent_git_publishes_unresolved_placeholder() {
    let env = TestEnvironment::with_git_script("exit 0").unwrap();
    let props = env.path().join("build.properties");

    stamp_cmd(&env)
        .args(["-p", props.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&props).unwrap(),
        "vcs.commit.id=unable to resolve commit id\n"
    );
}

#[test]
fn test_missing_git_executable_degrades() {
    let env = TestEnvironment::new().unwrap();
    let missing = env.path().join("bin/not-git");

    assert_cmd::cargo_bin_cmd!("commitstamp")
        .args(["-C", env.base_arg(), "--vcs-executable", missing.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("unable to launch"));
}
