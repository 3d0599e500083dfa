//! Driving the external build helper.

use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::Command;

use crate::config::Config;
use crate::error::{BuildFailure, ExitDetail, Result, WortError};
use crate::formula::Formula;
use crate::keg;

/// Performs the actual installs. [`ProcessInstaller`] hands the work to an
/// external helper process; tests substitute their own implementation.
pub trait Installer {
    fn install(&self, formula: &Formula) -> Result<()>;
    fn is_installed(&self, name: &str) -> bool;
}

/// Spawns the helper named by `WORT_BUILD_HELPER` (default `brew`), waits,
/// and classifies how it ended.
pub struct ProcessInstaller {
    helper: String,
    cellar: PathBuf,
    verbose: bool,
}

impl ProcessInstaller {
    pub fn new(config: &Config) -> Self {
        let helper =
            std::env::var("WORT_BUILD_HELPER").unwrap_or_else(|_| "brew".to_string());
        Self {
            helper,
            cellar: config.cellar.clone(),
            verbose: config.verbose,
        }
    }
}

impl Installer for ProcessInstaller {
    fn install(&self, formula: &Formula) -> Result<()> {
        let output = Command::new(&self.helper)
            .args(["install", &formula.name])
            .output()
            .map_err(|e| {
                WortError::Execution(format!("Failed to run {}: {e}", self.helper))
            })?;

        if output.status.success() {
            if self.verbose {
                print!("{}", String::from_utf8_lossy(&output.stdout));
            }
            return Ok(());
        }

        // A helper killed by SIGINT means the user hit ctrl-c mid-build
        if output.status.signal() == Some(2) {
            return Err(WortError::Interrupted);
        }

        let status = match output.status.code() {
            Some(code) => ExitDetail::Code(code),
            None => ExitDetail::Signal(output.status.signal().unwrap_or(0)),
        };
        let trace = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string)
            .collect();

        Err(WortError::Build(BuildFailure {
            formula: formula.name.clone(),
            status,
            trace,
        }))
    }

    fn is_installed(&self, name: &str) -> bool {
        keg::is_installed(&self.cellar, name)
    }
}
