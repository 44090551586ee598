use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::author::{unique_by_email, Author};
use super::commit::{commit_compare, Commit, CommitStatus, RemoteCommit};
use super::file::LocalFile;
use super::time;

/// A virtual branch as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// Applied to the workspace.
    pub active: bool,
    #[serde(default)]
    pub files: Vec<LocalFile>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub requires_force: bool,
    #[serde(default)]
    pub description: String,
    pub head: String,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub upstream: Option<RemoteBranch>,
    #[serde(default)]
    pub upstream_data: Option<RemoteBranchData>,
    #[serde(default)]
    pub upstream_name: Option<String>,
    #[serde(default)]
    pub conflicted: bool,
    #[serde(default)]
    pub ownership: String,
    /// Resolved separately from the rest of the branch; `None` while pending.
    #[serde(skip)]
    pub is_mergeable: Option<bool>,
    #[serde(deserialize_with = "time::millis::deserialize")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub selected_for_changes: bool,
    #[serde(default)]
    pub merge_base: Option<String>,
    #[serde(default)]
    pub fork_point: Option<String>,
    #[serde(default)]
    pub allow_rebasing: bool,
}

impl Branch {
    fn commits_with(&self, status: CommitStatus) -> Vec<&Commit> {
        self.commits.iter().filter(|c| c.status() == status).collect()
    }

    pub fn local_commits(&self) -> Vec<&Commit> {
        self.commits_with(CommitStatus::Local)
    }

    pub fn remote_commits(&self) -> Vec<&Commit> {
        self.commits_with(CommitStatus::LocalAndRemote)
    }

    pub fn integrated_commits(&self) -> Vec<&Commit> {
        self.commits_with(CommitStatus::Integrated)
    }

    pub fn display_name(&self) -> &str {
        self.upstream
            .as_ref()
            .map(|u| u.display_name())
            .filter(|n| !n.is_empty())
            .or_else(|| self.upstream_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or(&self.name)
    }

    pub fn with_mergeable(mut self, mergeable: bool) -> Self {
        self.is_mergeable = Some(mergeable);
        self
    }

    pub fn commit(&self, id: &str) -> Option<&Commit> {
        self.commits.iter().find(|c| c.id == id)
    }

    /// The commit listed just before `id` (the newer neighbour).
    pub fn prev_commit(&self, id: &str) -> Option<&Commit> {
        let idx = self.commits.iter().position(|c| c.id == id)?;
        idx.checked_sub(1).and_then(|i| self.commits.get(i))
    }

    /// The commit listed just after `id` (the older neighbour).
    pub fn next_commit(&self, id: &str) -> Option<&Commit> {
        let idx = self.commits.iter().position(|c| c.id == id)?;
        self.commits.get(idx + 1)
    }

    pub fn related_remote_commit(&self, commit: &Commit) -> Option<&RemoteCommit> {
        let related = commit.related_to.as_deref()?;
        self.upstream_data
            .as_ref()?
            .commits
            .iter()
            .find(|r| r.id == related)
    }

    /// Pairs every local commit with the upstream commit carrying the same
    /// change, recording each side's id on the other.
    pub fn link_upstream_commits(mut self) -> Self {
        let Some(upstream) = self.upstream_data.as_mut() else {
            return self;
        };

        let mut linked = 0;
        for local in self.commits.iter_mut() {
            if let Some(remote) = upstream
                .commits
                .iter_mut()
                .find(|r| commit_compare(&*local, &**r))
            {
                local.related_to = Some(remote.id.clone());
                remote.related_to = Some(local.id.clone());
                linked += 1;
            }
        }
        tracing::debug!(branch = %self.id, linked, "linked upstream commits");
        self
    }
}

/// A remote tracking ref.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBranch {
    pub sha: String,
    pub name: String,
    #[serde(default)]
    pub upstream: Option<String>,
    #[serde(
        default,
        rename = "lastCommitTimestampMs",
        deserialize_with = "time::option_millis::deserialize"
    )]
    pub last_commit_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_commit_author: Option<String>,
}

impl RemoteBranch {
    pub fn display_name(&self) -> &str {
        strip_prefixes(&self.name, &["refs/remotes/", "refs/heads/"])
    }
}

/// A remote branch together with the commits it has on top of the base.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBranchData {
    pub sha: String,
    pub name: String,
    #[serde(default)]
    pub upstream: Option<String>,
    #[serde(default)]
    pub behind: usize,
    /// Newest first.
    #[serde(default)]
    pub commits: Vec<RemoteCommit>,
    #[serde(default)]
    pub is_mergeable: Option<bool>,
    #[serde(default)]
    pub fork_point: Option<String>,
}

impl RemoteBranchData {
    pub fn ahead(&self) -> usize {
        self.commits.len()
    }

    pub fn last_commit_ts(&self) -> Option<DateTime<Utc>> {
        self.commits.first().map(|c| c.created_at)
    }

    pub fn first_commit_at(&self) -> Option<DateTime<Utc>> {
        self.commits.last().map(|c| c.created_at)
    }

    pub fn authors(&self) -> Vec<&Author> {
        unique_by_email(self.commits.iter().map(|c| &c.author))
    }

    pub fn display_name(&self) -> &str {
        strip_prefixes(&self.name, &["refs/remotes/", "origin/", "refs/heads/"])
    }
}

fn strip_prefixes<'a>(name: &'a str, prefixes: &[&str]) -> &'a str {
    prefixes
        .iter()
        .fold(name, |acc, prefix| acc.strip_prefix(prefix).unwrap_or(acc))
}

/// A file the backend could not assign to any branch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    #[serde(default)]
    pub old_path: Option<String>,
    #[serde(default)]
    pub new_path: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// The applied branch list as delivered by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualBranches {
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub skipped_files: Vec<SkippedFile>,
}

impl VirtualBranches {
    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.active)
    }

    pub fn selected_for_changes(&self) -> Option<&Branch> {
        self.branches.iter().find(|b| b.selected_for_changes)
    }

    /// Branches in display order.
    pub fn ordered(&self) -> Vec<&Branch> {
        let mut branches: Vec<&Branch> = self.branches.iter().collect();
        branches.sort_by_key(|b| b.order);
        branches
    }
}
