//! Git-backed version control for the formula repository checkout.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, anyhow};

use crate::error::Result;
use crate::update::{Revision, VersionControl};

/// Runs git against one checkout. Every call is `git -C <repository> ...`;
/// nothing depends on the process working directory.
pub struct GitRepository {
    repository: PathBuf,
}

impl GitRepository {
    pub fn new(repository: PathBuf) -> Self {
        Self { repository }
    }

    fn git(&self, args: &[&str]) -> anyhow::Result<std::process::Output> {
        let repo = self
            .repository
            .to_str()
            .ok_or_else(|| anyhow!("repository path is not valid UTF-8"))?;

        let mut command = Command::new("git");
        command.args(["-C", repo]);
        command.args(args);
        command
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))
    }

    fn git_expecting_success(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = self.git(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl VersionControl for GitRepository {
    fn available(&self) -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn current_revision(&self) -> Result<Revision> {
        let stdout = self.git_expecting_success(&["rev-parse", "HEAD"])?;
        Ok(Revision(stdout.trim().to_string()))
    }

    fn fetch_and_merge(&self) -> Result<bool> {
        self.git_expecting_success(&["fetch", "origin"])?;

        let stdout = self.git_expecting_success(&["merge", "--ff-only", "FETCH_HEAD"])?;
        // Both spellings appear across git versions
        let current =
            stdout.contains("Already up to date") || stdout.contains("Already up-to-date");
        Ok(!current)
    }

    fn changed_files(&self, old: &Revision, new: &Revision) -> Result<Vec<String>> {
        let stdout =
            self.git_expecting_success(&["diff-tree", "-r", "--name-only", &old.0, &new.0])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
