//! Git repository operations

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use git2::{Repository, Status, StatusOptions};
use tracing::debug;

use crate::config::{RepoContext, CONFIG_RULE_KEY, CONFIG_SCOPES_KEY, CONFIG_SECTION};

/// Worktree changes picked up by `--all`.
const TRACKED_WORKTREE_CHANGES: Status = Status::WT_MODIFIED
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE);

/// Any change recorded in the index.
const STAGED_CHANGES: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Discover the repository containing the current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::discover(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Discover the repository containing `path`
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get access to the underlying git2::Repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Read `section.key` from the repository's effective git config
    pub fn config_value(&self, section: &str, key: &str) -> Option<String> {
        let config = self.repo.config().ok()?;
        let value = config.get_string(&format!("{section}.{key}")).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Repository root and configured override paths
    pub fn context(&self) -> RepoContext {
        let context = RepoContext {
            root: self.workdir().map(Path::to_path_buf),
            rule_override: self.config_value(CONFIG_SECTION, CONFIG_RULE_KEY),
            scopes_override: self.config_value(CONFIG_SECTION, CONFIG_SCOPES_KEY),
        };
        debug!(?context, "Repository context");
        context
    }

    /// Stage tracked files changed in the worktree, returning how many paths
    /// were updated in the index
    pub fn stage_tracked_changes(&self) -> Result<usize> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .context("Failed to get repository status")?;

        let mut index = self.repo.index().context("Failed to open index")?;
        let mut staged = 0;
        for entry in statuses.iter() {
            let flags = entry.status();
            if !flags.intersects(TRACKED_WORKTREE_CHANGES) {
                continue;
            }
            let Some(path) = entry.path() else { continue };
            let path = Path::new(path);

            if flags.contains(Status::WT_DELETED) {
                index
                    .remove_path(path)
                    .with_context(|| format!("Failed to unstage {}", path.display()))?;
            } else {
                index
                    .add_path(path)
                    .with_context(|| format!("Failed to stage {}", path.display()))?;
            }
            debug!(path = %path.display(), "Staged");
            staged += 1;
        }
        index.write().context("Failed to write index")?;

        Ok(staged)
    }

    /// Check whether the index differs from HEAD
    pub fn has_staged_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .context("Failed to get repository status")?;

        Ok(statuses
            .iter()
            .any(|entry| entry.status().intersects(STAGED_CHANGES)))
    }

    /// Run `git commit -F` with `message` written to a temporary file
    pub fn commit_with_message(&self, message: &str) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("git-cx-")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create commit message file")?;
        file.write_all(message.as_bytes())
            .context("Failed to write commit message file")?;
        file.flush()?;

        let workdir = self.commit_dir();
        debug!(file = %file.path().display(), dir = %workdir.display(), "Running git commit");
        let status = Command::new("git")
            .arg("commit")
            .arg("-F")
            .arg(file.path())
            .current_dir(&workdir)
            .status()
            .context("Failed to execute git commit")?;

        if !status.success() {
            anyhow::bail!("git commit failed ({status})");
        }
        Ok(())
    }

    fn commit_dir(&self) -> PathBuf {
        self.workdir()
            .map_or_else(|| self.repo.path().to_path_buf(), Path::to_path_buf)
    }
}
