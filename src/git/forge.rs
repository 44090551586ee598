use super::remote_url::RemoteUrl;

/// Git hosting provider of a remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForgeType {
    GitHub,
    GitLab,
    Bitbucket,
    AzureDevOps,
    #[default]
    Unknown,
}

impl ForgeType {
    /// First matching host substring wins.
    pub fn from_host(host: &str) -> Self {
        if host.contains("github.com") {
            ForgeType::GitHub
        } else if host.contains("gitlab.com") {
            ForgeType::GitLab
        } else if host.contains("bitbucket.org") {
            ForgeType::Bitbucket
        } else if host.contains("dev.azure.com") {
            ForgeType::AzureDevOps
        } else {
            ForgeType::Unknown
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ForgeType::GitHub => "GitHub",
            ForgeType::GitLab => "GitLab",
            ForgeType::Bitbucket => "Bitbucket",
            ForgeType::AzureDevOps => "Azure DevOps",
            ForgeType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ForgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Owner and repository of a GitHub fork that branches are pushed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkRemote {
    pub owner: String,
    pub name: String,
}

/// Web link templates for one base branch, resolved once from its remotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeLinks {
    pub forge: ForgeType,
    pub repo_base_url: String,
    pub commit_base_url: String,
    pub fork: Option<ForkRemote>,
}

impl ForgeLinks {
    pub fn commit_url(&self, commit_id: &str) -> String {
        match self.forge {
            ForgeType::Bitbucket => format!("{}/commits/{}", self.commit_base_url, commit_id),
            ForgeType::GitLab => format!("{}/-/commit/{}", self.commit_base_url, commit_id),
            ForgeType::GitHub | ForgeType::AzureDevOps | ForgeType::Unknown => {
                format!("{}/commit/{}", self.commit_base_url, commit_id)
            }
        }
    }

    pub fn branch_compare_url(&self, base: &str, branch: &str) -> String {
        if let Some(fork) = &self.fork {
            return format!(
                "{}/compare/{}...{}:{}:{}",
                self.repo_base_url, base, fork.owner, fork.name, branch
            );
        }

        match self.forge {
            ForgeType::Bitbucket => {
                format!("{}/branch/{}?dest={}", self.repo_base_url, branch, base)
            }
            ForgeType::AzureDevOps => format!(
                "{}/branchCompare?baseVersion=GB{}&targetVersion=GB{}",
                self.commit_base_url, base, branch
            ),
            ForgeType::GitHub | ForgeType::GitLab | ForgeType::Unknown => {
                format!("{}/compare/{}...{}", self.repo_base_url, base, branch)
            }
        }
    }
}

/// Web root of the push remote that commit links are built on.
///
/// The `ssh.` host prefix used by some forges for ssh access is dropped.
pub fn commit_base_url(forge: ForgeType, push: &RemoteUrl) -> String {
    let host = if push.protocol == "ssh" {
        push.resource
            .strip_prefix("ssh.")
            .unwrap_or(push.resource.as_str())
    } else {
        push.resource.as_str()
    };

    match (forge, &push.organization) {
        (ForgeType::AzureDevOps, Some(org)) => format!(
            "{}://{}/{}/{}/_git/{}",
            push.web_protocol(),
            host,
            org,
            push.owner,
            push.name
        ),
        (ForgeType::AzureDevOps, None) => format!(
            "{}://{}/{}/_git/{}",
            push.web_protocol(),
            host,
            push.owner,
            push.name
        ),
        _ => format!("{}://{}/{}/{}", push.web_protocol(), host, push.owner, push.name),
    }
}
