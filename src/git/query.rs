use std::path::PathBuf;
use std::process::Command;

use crate::error::VersionError;

/// A read-only version-control query returning its stdout line by line.
pub trait QueryRunner {
    fn run_read_only_query(&self, args: &[&str]) -> Result<Vec<String>, VersionError>;
}

/// Runs `git` in a working directory.
pub struct GitCommand {
    work_dir: PathBuf,
}

impl GitCommand {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

impl QueryRunner for GitCommand {
    fn run_read_only_query(&self, args: &[&str]) -> Result<Vec<String>, VersionError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| VersionError::vcs_unavailable(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(VersionError::vcs_unavailable(format!(
                "git {} exited with {}",
                args.join(" "),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
