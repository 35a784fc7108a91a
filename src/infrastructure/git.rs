//! Git Workspace
//!
//! Current branch and repository root, read from the `git` CLI.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::BranchSource;

/// Asks `git` inside a working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: std::path::PathBuf,
}

impl GitCli {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn query(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!value.is_empty()).then_some(value)
    }

    /// Top level of the working tree, with a trailing slash
    pub fn repository_root(&self) -> Option<String> {
        self.query(&["rev-parse", "--show-toplevel"])
            .map(|root| format!("{}/", root.trim_end_matches('/')))
    }
}

impl BranchSource for GitCli {
    fn current_branch(&self) -> String {
        self.query(&["rev-parse", "--abbrev-ref", "HEAD"])
            .unwrap_or_default()
    }
}
