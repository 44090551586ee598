//! Parser for git remote URLs.
//!
//! Handles the scp-like form (`git@host:owner/repo.git`), URL forms with a
//! scheme (`ssh://`, `git://`, `http(s)://`) and the Azure DevOps layouts,
//! which put an organization in front of the project:
//!
//! * `git@ssh.dev.azure.com:v3/{org}/{project}/{repo}`
//! * `https://{org}@dev.azure.com/{org}/{project}/_git/{repo}`

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    /// Lower-cased scheme; `ssh` for the scp-like form.
    pub protocol: String,
    /// Host name without user or port.
    pub resource: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    /// Everything between the host (or organization) and the repository
    /// name, so GitLab subgroups stay intact.
    pub owner: String,
    /// Only set for Azure DevOps remotes.
    pub organization: Option<String>,
    /// Repository name without `.git`.
    pub name: String,
}

impl RemoteUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::remote_url(url, "empty url"));
        }

        let normalized = if url.contains("://") {
            url.to_string()
        } else {
            scp_to_ssh(url)?
        };
        let parsed = Url::parse(&normalized).map_err(|e| Error::remote_url(url, e.to_string()))?;

        let resource = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::remote_url(url, "missing host"))?
            .to_lowercase();
        let user = Some(parsed.username())
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let mut segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        if let Some(last) = segments.last_mut() {
            let name: &str = *last;
            *last = name.strip_suffix(".git").unwrap_or(name);
        }

        let (organization, owner, name) = if is_azure_host(&resource) {
            azure_segments(&segments).ok_or_else(|| {
                Error::remote_url(url, "expected {organization}/{project}/{repo}")
            })?
        } else {
            match segments.split_last() {
                Some((name, owner)) if !owner.is_empty() && !name.is_empty() => {
                    (None, owner.join("/"), name.to_string())
                }
                _ => return Err(Error::remote_url(url, "expected {owner}/{repo}")),
            }
        };

        Ok(Self {
            protocol: normalize_scheme(parsed.scheme()),
            resource,
            port: parsed.port(),
            user,
            owner,
            organization,
            name,
        })
    }

    pub fn is_ipv4_host(&self) -> bool {
        self.resource.parse::<Ipv4Addr>().is_ok()
    }

    /// Scheme to use when linking to the repository in a browser.
    pub fn web_protocol(&self) -> &'static str {
        if self.is_ipv4_host() {
            "http"
        } else {
            "https"
        }
    }

    /// `{protocol}://{host}/{owner}/{name}`
    pub fn web_url(&self) -> String {
        format!(
            "{}://{}/{}/{}",
            self.web_protocol(),
            self.resource,
            self.owner,
            self.name
        )
    }
}

impl FromStr for RemoteUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.resource)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        if let Some(org) = &self.organization {
            write!(f, "/{}", org)?;
        }
        write!(f, "/{}/{}", self.owner, self.name)
    }
}

fn normalize_scheme(scheme: &str) -> String {
    match scheme.to_lowercase().as_str() {
        "git+ssh" | "ssh+git" => "ssh".to_string(),
        other => other.to_string(),
    }
}

/// Rewrites `[user@]host:path` as `ssh://[user@]host/path`.
fn scp_to_ssh(url: &str) -> Result<String> {
    // The first ':' must come before any '/'.
    let (authority, path) = url
        .split_once(':')
        .filter(|(authority, _)| !authority.is_empty() && !authority.contains('/'))
        .ok_or_else(|| Error::remote_url(url, "not a remote url"))?;
    Ok(format!("ssh://{}/{}", authority, path.trim_start_matches('/')))
}

fn is_azure_host(host: &str) -> bool {
    host.contains("dev.azure.com") || host.ends_with("visualstudio.com")
}

fn azure_segments(segments: &[&str]) -> Option<(Option<String>, String, String)> {
    match segments {
        ["v3", org, project, repo] | [org, project, "_git", repo] => {
            Some((Some(org.to_string()), project.to_string(), repo.to_string()))
        }
        // {org}.visualstudio.com/{project}/_git/{repo}
        [project, "_git", repo] => Some((None, project.to_string(), repo.to_string())),
        _ => None,
    }
}
