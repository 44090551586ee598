use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::hunk::{Hunk, HunkLock, RemoteHunk};
use super::time;

/// Last path component, splitting on either separator.
pub fn filename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Everything before the last `/`, or empty for a bare file name.
pub fn justpath(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// A changed file in the working copy.
///
/// `conflicted` and the hunk lock state only mean something while the owning
/// branch is applied to the workspace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFile {
    pub id: String,
    pub path: String,
    pub hunks: Vec<Hunk>,
    #[serde(deserialize_with = "time::millis::deserialize")]
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub conflicted: bool,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub large: bool,
}

impl LocalFile {
    pub fn filename(&self) -> &str {
        filename(&self.path)
    }

    pub fn justpath(&self) -> &str {
        justpath(&self.path)
    }

    pub fn hunk_ids(&self) -> Vec<&str> {
        self.hunks.iter().map(|h| h.id.as_str()).collect()
    }

    pub fn locked(&self) -> bool {
        self.hunks.iter().any(|h| h.locked)
    }

    pub fn locked_ids(&self) -> Vec<&HunkLock> {
        self.hunks.iter().flat_map(|h| &h.locked_to).collect()
    }
}

/// A file as it appears in an upstream-only commit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub path: String,
    #[serde(default)]
    pub hunks: Vec<RemoteHunk>,
    #[serde(default)]
    pub binary: bool,
}

impl RemoteFile {
    pub fn id(&self) -> &str {
        &self.path
    }

    pub fn filename(&self) -> &str {
        filename(&self.path)
    }

    pub fn justpath(&self) -> &str {
        justpath(&self.path)
    }

    /// Remote hunks have no id; the diff text identifies them.
    pub fn hunk_ids(&self) -> Vec<&str> {
        self.hunks.iter().map(|h| h.diff.as_str()).collect()
    }

    pub fn locked(&self) -> bool {
        false
    }

    pub fn locked_ids(&self) -> Vec<&HunkLock> {
        Vec::new()
    }

    pub fn large(&self) -> bool {
        false
    }

    pub fn conflicted(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn hunk(id: &str, locked: bool, locks: Value) -> Value {
        json!({
            "id": id,
            "diff": "",
            "modifiedAt": 0,
            "filePath": "a/b/c.rs",
            "locked": locked,
            "lockedTo": locks,
            "changeType": "added",
            "new_start": 1,
            "new_lines": 3,
        })
    }

    fn file(hunks: Vec<Value>) -> LocalFile {
        serde_json::from_value(json!({
            "id": "f1",
            "path": "a/b/c.rs",
            "hunks": hunks,
            "modifiedAt": 1_000,
        }))
        .unwrap()
    }

    #[test]
    fn path_helpers() {
        assert_eq!(filename("a/b/c.rs"), "c.rs");
        assert_eq!(filename("dir\\win.txt"), "win.txt");
        assert_eq!(filename("top.txt"), "top.txt");
        assert_eq!(justpath("a/b/c.rs"), "a/b");
        assert_eq!(justpath("top.txt"), "");
    }

    #[test]
    fn unlocked_file() {
        let f = file(vec![hunk("h1", false, json!([])), hunk("h2", false, json!([]))]);
        assert_eq!(f.filename(), "c.rs");
        assert_eq!(f.justpath(), "a/b");
        assert_eq!(f.hunk_ids(), vec!["h1", "h2"]);
        assert!(!f.locked());
        assert!(f.locked_ids().is_empty());
    }

    #[test]
    fn any_locked_hunk_locks_the_file() {
        let f = file(vec![
            hunk("h1", false, json!([])),
            hunk(
                "h2",
                true,
                json!([
                    { "branchId": "b1", "commitId": "c1" },
                    { "branchId": "b2", "commitId": "c2" }
                ]),
            ),
            hunk("h3", false, json!([{ "branchId": "b3", "commitId": "c3" }])),
        ]);
        assert!(f.locked());
        let ids: Vec<&str> = f.locked_ids().iter().map(|l| l.commit_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn remote_file_has_no_workspace_state() {
        let f: RemoteFile = serde_json::from_value(json!({
            "path": "docs/readme.md",
            "hunks": [{ "diff": "+x", "new_start": 1, "new_lines": 1, "changeType": "added" }],
            "binary": false,
        }))
        .unwrap();
        assert_eq!(f.id(), "docs/readme.md");
        assert_eq!(f.filename(), "readme.md");
        assert_eq!(f.hunk_ids(), vec!["+x"]);
        assert!(!f.locked());
        assert!(!f.large());
        assert!(!f.conflicted());
        assert!(f.locked_ids().is_empty());
    }

    #[test]
    fn missing_modified_at_fails() {
        let result = serde_json::from_value::<LocalFile>(json!({
            "id": "f1",
            "path": "x",
            "hunks": [],
        }));
        assert!(result.is_err());
    }
}
