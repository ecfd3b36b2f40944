//! Publisher running the git CLI inside the export directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::ports::Publisher;
use crate::error::StorageError;

const NOTHING_TO_COMMIT: [&str; 2] = ["nothing to commit", "nothing added to commit"];

pub struct GitPublisher {
    workdir: PathBuf,
}

/// Captured result of one git invocation
struct GitOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl GitPublisher {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<GitOutput, StorageError> {
        tracing::debug!(?args, workdir = %self.workdir.display(), "Running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| StorageError::Process {
                command: command_line(args),
                message: e.to_string(),
            })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn git_ok(&self, args: &[&str]) -> Result<(), StorageError> {
        let output = self.git(args).await?;
        if output.success {
            Ok(())
        } else {
            Err(failure(args, &output))
        }
    }
}

fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

fn failure(args: &[&str], output: &GitOutput) -> StorageError {
    let message = if output.stderr.trim().is_empty() {
        output.stdout.trim()
    } else {
        output.stderr.trim()
    };
    StorageError::Process {
        command: command_line(args),
        message: message.to_string(),
    }
}

fn is_nothing_to_commit(output: &GitOutput) -> bool {
    NOTHING_TO_COMMIT
        .iter()
        .any(|needle| output.stdout.contains(needle) || output.stderr.contains(needle))
}

#[async_trait]
impl Publisher for GitPublisher {
    async fn publish(&self, message: &str) -> Result<(), StorageError> {
        self.git_ok(&["add", "-A"]).await?;

        let commit_args = ["commit", "-m", message];
        let commit = self.git(&commit_args).await?;
        if !commit.success {
            if is_nothing_to_commit(&commit) {
                tracing::info!("Export unchanged, nothing to commit");
                return Ok(());
            }
            return Err(failure(&commit_args, &commit));
        }

        self.git_ok(&["push"]).await?;
        tracing::info!(workdir = %self.workdir.display(), "Published export");
        Ok(())
    }
}
