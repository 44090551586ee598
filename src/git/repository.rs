use std::path::{Path, PathBuf};

use git2::Repository as Git2Repository;

use super::forge::ForgeType;
use super::remote_url::RemoteUrl;
use crate::config::GitConfig;
use crate::error::Result;

/// Read-only access to the remotes of an on-disk clone.
pub struct Repository {
    repo: Git2Repository,
    path: PathBuf,
}

impl Repository {
    pub fn discover() -> Result<Self> {
        Self::discover_from(".")
    }

    pub fn discover_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repository::discover(path.as_ref())?;
        Ok(Self::wrap(repo))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repository::open(path.as_ref())?;
        Ok(Self::wrap(repo))
    }

    fn wrap(repo: Git2Repository) -> Self {
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        tracing::debug!(path = %path.display(), "opened repository");
        Self { repo, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn remotes(&self) -> Result<Vec<RemoteInfo>> {
        let mut remotes = Vec::new();
        for name in self.repo.remotes()?.iter().flatten() {
            if let Some(info) = self.remote(name)? {
                remotes.push(info);
            }
        }
        Ok(remotes)
    }

    pub fn remote(&self, name: &str) -> Result<Option<RemoteInfo>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(Some(RemoteInfo {
                name: name.to_string(),
                url: remote.url().unwrap_or("").to_string(),
                push_url: remote.pushurl().map(|s| s.to_string()),
            })),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The configured default remote, or the only remote when there is just one.
    pub fn default_remote(&self, config: &GitConfig) -> Result<Option<RemoteInfo>> {
        if let Some(remote) = self.remote(&config.default_remote)? {
            return Ok(Some(remote));
        }
        let mut remotes = self.remotes()?;
        if remotes.len() == 1 {
            Ok(remotes.pop())
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub url: String,
    pub push_url: Option<String>,
}

impl RemoteInfo {
    pub fn parsed(&self) -> Result<RemoteUrl> {
        RemoteUrl::parse(&self.url)
    }

    /// Forge of the fetch URL; `Unknown` when it does not parse.
    pub fn forge(&self) -> ForgeType {
        self.parsed()
            .map(|url| ForgeType::from_host(&url.resource))
            .unwrap_or_default()
    }

    pub fn push_or_fetch_url(&self) -> &str {
        self.push_url.as_deref().unwrap_or(&self.url)
    }
}
