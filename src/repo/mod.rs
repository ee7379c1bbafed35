//! Repository content provider
//!
//! Retrieves the current and previous version of a file from a Git
//! repository so the extractor and differ can work over both. The
//! absence of a previous version is a distinct, non-error case that
//! callers branch on; it is never collapsed into an empty diff.

mod config;

pub use config::Config;

use anyhow::{Context, Result};
use git2::Repository as GitRepo;
use std::path::{Path, PathBuf};

/// Two versions of the same file, either of which may be missing
#[derive(Debug, Clone)]
pub struct FileVersions {
    /// Content in the working tree (or at HEAD when not checked out)
    pub current: Option<String>,
    /// Content at the base revision; `None` for a first-ever version
    pub previous: Option<String>,
}

/// A Git repository being analyzed
pub struct Repository {
    /// The underlying git2 repository
    repo: GitRepo,
    /// Path to the repository root
    root: PathBuf,
    /// Repository configuration
    config: Config,
}

impl Repository {
    /// Open an existing repository at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = GitRepo::discover(path)
            .with_context(|| format!("Failed to open Git repository at {:?}", path))?;

        let root = repo
            .workdir()
            .ok_or_else(|| anyhow::anyhow!("Repository has no working directory (bare repo?)"))?
            .to_path_buf();

        let config = Config::load_or_default(&root)?;

        Ok(Self { repo, root, config })
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the current HEAD commit hash
    pub fn head_commit(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;
        let commit = head
            .peel_to_commit()
            .context("Failed to peel HEAD to commit")?;
        Ok(commit.id().to_string())
    }

    /// Read file content at a specific revision
    ///
    /// Returns `Ok(None)` when the file does not exist at that revision
    /// or is a binary blob.
    pub fn read_file_at_commit(&self, path: &Path, rev: &str) -> Result<Option<String>> {
        let commit = self
            .repo
            .revparse_single(rev)
            .with_context(|| format!("Failed to parse revision: {}", rev))?
            .peel_to_commit()
            .context("Failed to peel to commit")?;

        let tree = commit.tree().context("Failed to get tree")?;

        let entry = match tree.get_path(path) {
            Ok(entry) => entry,
            Err(_) => return Ok(None),
        };

        let object = entry.to_object(&self.repo).context("Failed to get object")?;

        if let Some(blob) = object.as_blob() {
            if blob.is_binary() {
                return Ok(None);
            }
            let content = std::str::from_utf8(blob.content())
                .context("File content is not valid UTF-8")?
                .to_string();
            Ok(Some(content))
        } else {
            Ok(None)
        }
    }

    /// Read current file content from the working directory
    pub fn read_file_current(&self, path: &Path) -> Result<Option<String>> {
        let full_path = self.root.join(path);
        if !full_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", full_path))?;
        Ok(Some(content))
    }

    /// Retrieve the current and base-revision versions of a file
    ///
    /// The current version comes from the working tree, falling back to
    /// HEAD. A base revision that cannot be resolved (a repository with
    /// a single commit has no `HEAD^`) means there is no previous
    /// version, not an error.
    pub fn file_versions(&self, path: &Path, base_rev: &str) -> Result<FileVersions> {
        let current = match self.read_file_current(path)? {
            Some(content) => Some(content),
            None => self.read_file_at_commit(path, "HEAD")?,
        };

        let previous = match self.read_file_at_commit(path, base_rev) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("no previous version at {}: {}", base_rev, e);
                None
            }
        };

        Ok(FileVersions { current, previous })
    }
}
