use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Deleted,
    Modified,
}

impl ChangeType {
    pub fn exists_in_old(&self) -> bool {
        !matches!(self, ChangeType::Added)
    }

    pub fn exists_in_new(&self) -> bool {
        !matches!(self, ChangeType::Deleted)
    }

    pub fn symbol(&self) -> char {
        match self {
            ChangeType::Added => 'A',
            ChangeType::Deleted => 'D',
            ChangeType::Modified => 'M',
        }
    }
}

/// The branch and commit currently holding a lock on a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HunkLock {
    pub branch_id: String,
    pub commit_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    pub id: String,
    pub diff: String,
    #[serde(deserialize_with = "time::millis::deserialize")]
    pub modified_at: DateTime<Utc>,
    pub file_path: String,
    #[serde(default)]
    pub hash: Option<String>,
    pub locked: bool,
    #[serde(default)]
    pub locked_to: Vec<HunkLock>,
    pub change_type: ChangeType,
    #[serde(rename = "new_start")]
    pub new_start: u32,
    #[serde(rename = "new_lines")]
    pub new_lines: u32,
}

/// Hunk of a commit that only exists upstream. Carries no lock state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteHunk {
    pub diff: String,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(rename = "new_start")]
    pub new_start: u32,
    #[serde(rename = "new_lines")]
    pub new_lines: u32,
    pub change_type: ChangeType,
}
