//! Shared fixtures for CLI integration tests
//!
//! Builds throwaway project directories and fake `git` executables so the
//! binary can be driven without a real repository.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FAKE_HASH: &str = "0123456789abcdef0123456789abcdef01234567";

/// Test helper for creating controlled project directories
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub git: PathBuf,
}

impl TestEnvironment {
    /// Project whose `git` prints `FAKE_HASH`
    pub fn new() -> anyhow::Result<Self> {
        Self::with_git_script(&format!("echo {}", FAKE_HASH))
    }

    /// Project whose `git` runs the given shell snippet
    pub fn with_git_script(body: &str) -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let bin_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&bin_dir)?;
        let git = bin_dir.join("git");
        fs::write(&git, format!("#!/bin/sh\n{}\n", body))?;
        fs::set_permissions(&git, fs::Permissions::from_mode(0o755))?;
        Ok(Self { temp_dir, git })
    }

    /// Get the project base directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn git_arg(&self) -> &str {
        self.git.to_str().expect("temp paths are UTF-8")
    }

    pub fn base_arg(&self) -> &str {
        self.path().to_str().expect("temp paths are UTF-8")
    }

    /// Path a fully-qualified Java type maps to under the default source root
    pub fn java_file(&self, type_name: &str) -> PathBuf {
        self.path()
            .join("src/main/java")
            .join(format!("{}.java", type_name.replace('.', "/")))
    }

    pub fn write_file(&self, relative: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Command for the binary, pointed at the environment's project and fake git
pub fn stamp_cmd(env: &TestEnvironment) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("commitstamp");
    cmd.args(["-C", env.base_arg(), "--vcs-executable", env.git_arg()]);
    cmd
}
