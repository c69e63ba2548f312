use std::path::PathBuf;
use std::process::ExitStatus;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::branch::BranchName;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Talks to version control by shelling out to the `git` binary, so the
/// user's hooks and config apply exactly as they would on the command line.
pub struct GitCli {
    workspace_root: PathBuf,
}

struct GitOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run(&self, args: &[&str]) -> AppResult<GitOutput> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        Ok(GitOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn run_checked(&self, args: &[&str]) -> AppResult<GitOutput> {
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or(""),
                best_error_line(&output.stderr)
            )));
        }
        Ok(output)
    }
}

fn best_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no error output")
        .to_string()
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn ensure_repository(&self) -> AppResult<()> {
        let output = self.run(&["rev-parse", "--is-inside-work-tree"]).await?;
        if !output.status.success() || output.stdout.trim() != "true" {
            return Err(AppError::NotARepository);
        }
        Ok(())
    }

    async fn current_branch(&self) -> AppResult<String> {
        let output = self.run_checked(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(output.stdout.trim().to_string())
    }

    async fn branch_exists(&self, branch: &BranchName) -> AppResult<bool> {
        let output = self
            .run(&[
                "show-ref",
                "--verify",
                "--quiet",
                &format!("refs/heads/{branch}"),
            ])
            .await?;
        Ok(output.status.success())
    }

    async fn create_branch(&self, branch: &BranchName) -> AppResult<()> {
        self.run_checked(&["branch", branch.as_str()]).await?;
        Ok(())
    }

    async fn switch(&self, branch: &BranchName) -> AppResult<()> {
        // Older git installations predate `switch`.
        let output = self.run(&["switch", branch.as_str()]).await?;
        if output.status.success() {
            return Ok(());
        }
        self.run_checked(&["checkout", branch.as_str()]).await?;
        Ok(())
    }

    async fn has_uncommitted_changes(&self) -> AppResult<bool> {
        let output = self.run_checked(&["status", "--porcelain"]).await?;
        Ok(!output.stdout.trim().is_empty())
    }
}
