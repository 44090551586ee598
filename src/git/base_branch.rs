use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::commit::RemoteCommit;
use super::forge::{commit_base_url, ForgeLinks, ForgeType, ForkRemote};
use super::remote_url::RemoteUrl;
use crate::error::{Error, Result};

/// Wire shape of the target branch, before forge links are resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseBranchPayload {
    pub branch_name: String,
    pub remote_name: String,
    pub remote_url: String,
    #[serde(default)]
    pub push_remote_name: String,
    #[serde(default)]
    pub push_remote_url: Option<String>,
    pub base_sha: String,
    pub current_sha: String,
    pub behind: usize,
    #[serde(default)]
    pub upstream_commits: Vec<RemoteCommit>,
    #[serde(default)]
    pub recent_commits: Vec<RemoteCommit>,
    #[serde(default)]
    pub last_fetched_ms: Option<i64>,
}

/// The branch that virtual branches are based on, with its forge links.
///
/// Links are resolved exactly once, by [`BaseBranch::finalize`], when the
/// payload is deserialized.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BaseBranchPayload")]
pub struct BaseBranch {
    pub branch_name: String,
    pub remote_name: String,
    pub remote_url: String,
    pub push_remote_name: String,
    pub push_remote_url: Option<String>,
    pub base_sha: String,
    pub current_sha: String,
    pub behind: usize,
    pub upstream_commits: Vec<RemoteCommit>,
    pub recent_commits: Vec<RemoteCommit>,
    pub last_fetched_ms: Option<i64>,
    remote: RemoteUrl,
    push_remote: Option<RemoteUrl>,
    forge_type: ForgeType,
    repo_base_url: String,
    actual_push_remote_name: String,
    links: Option<ForgeLinks>,
}

impl TryFrom<BaseBranchPayload> for BaseBranch {
    type Error = Error;

    fn try_from(payload: BaseBranchPayload) -> Result<Self> {
        Self::finalize(payload)
    }
}

impl BaseBranch {
    /// Resolves forge type and link templates from the remote URLs.
    ///
    /// An unparsable `remote_url` is an error. An unparsable push remote URL
    /// is treated as absent, which leaves commit and branch links unset.
    pub fn finalize(payload: BaseBranchPayload) -> Result<Self> {
        let remote = RemoteUrl::parse(&payload.remote_url)?;
        let forge_type = ForgeType::from_host(&remote.resource);
        let repo_base_url = remote.web_url();

        let actual_push_remote_name = if payload.push_remote_name.is_empty() {
            payload.remote_name.clone()
        } else {
            payload.push_remote_name.clone()
        };

        let push_remote = payload
            .push_remote_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .and_then(|url| match RemoteUrl::parse(url) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unparsable push remote url");
                    None
                }
            });

        let links = push_remote.as_ref().map(|push| {
            let fork = (!payload.push_remote_name.is_empty() && forge_type == ForgeType::GitHub)
                .then(|| ForkRemote {
                    owner: push.owner.clone(),
                    name: push.name.clone(),
                });
            ForgeLinks {
                forge: forge_type,
                repo_base_url: repo_base_url.clone(),
                commit_base_url: commit_base_url(forge_type, push),
                fork,
            }
        });

        tracing::debug!(
            branch = %payload.branch_name,
            forge = %forge_type,
            repo_base_url = %repo_base_url,
            links = links.is_some(),
            "resolved base branch forge"
        );

        Ok(Self {
            branch_name: payload.branch_name,
            remote_name: payload.remote_name,
            remote_url: payload.remote_url,
            push_remote_name: payload.push_remote_name,
            push_remote_url: payload.push_remote_url,
            base_sha: payload.base_sha,
            current_sha: payload.current_sha,
            behind: payload.behind,
            upstream_commits: payload.upstream_commits,
            recent_commits: payload.recent_commits,
            last_fetched_ms: payload.last_fetched_ms,
            remote,
            push_remote,
            forge_type,
            repo_base_url,
            actual_push_remote_name,
            links,
        })
    }

    pub fn forge_type(&self) -> ForgeType {
        self.forge_type
    }

    pub fn repo_base_url(&self) -> &str {
        &self.repo_base_url
    }

    pub fn remote(&self) -> &RemoteUrl {
        &self.remote
    }

    pub fn push_remote(&self) -> Option<&RemoteUrl> {
        self.push_remote.as_ref()
    }

    pub fn actual_push_remote_name(&self) -> &str {
        &self.actual_push_remote_name
    }

    pub fn commit_base_url(&self) -> Option<&str> {
        self.links.as_ref().map(|l| l.commit_base_url.as_str())
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_ms
            .filter(|&ms| ms != 0)
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Last `/` segment of the branch name, e.g. `main` for `origin/main`.
    pub fn short_name(&self) -> &str {
        self.branch_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.branch_name)
    }

    pub fn commit_url(&self, commit_id: &str) -> Option<String> {
        self.links.as_ref().map(|l| l.commit_url(commit_id))
    }

    /// Comparison link between the base branch and `upstream_name`
    /// (a full ref such as `refs/remotes/origin/feature`).
    pub fn branch_url(&self, upstream_name: Option<&str>) -> Option<String> {
        let upstream_name = upstream_name.filter(|n| !n.is_empty())?;
        let links = self.links.as_ref()?;
        let base = self.branch_name.split('/').nth(1)?;
        let branch = upstream_name.split('/').skip(3).collect::<Vec<_>>().join("/");
        Some(links.branch_compare_url(base, &branch))
    }
}
