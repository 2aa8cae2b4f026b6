// Test utilities for CLI integration tests

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding a fake waffles script and resource files
pub struct CliTest {
    temp_dir: TempDir,
}

impl CliTest {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write an executable shell script standing in for waffles.sh
    pub fn fake_waffles(&self, body: &str) -> PathBuf {
        let script = self.path().join("waffles.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();
        script
    }

    /// Write a resource configuration file
    pub fn resource_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).expect("Failed to write resource file");
        path
    }

    /// The binary under test, run from the scratch directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("waffles-provisioner").expect("binary not built");
        cmd.current_dir(self.path()).env_remove("RUST_LOG");
        cmd
    }
}
