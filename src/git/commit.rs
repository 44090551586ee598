use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::author::Author;
use super::file::{LocalFile, RemoteFile};
use super::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitStatus {
    Local,
    LocalAndRemote,
    Integrated,
    Remote,
}

impl CommitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitStatus::Local => "local",
            CommitStatus::LocalAndRemote => "localAndRemote",
            CommitStatus::Integrated => "integrated",
            CommitStatus::Remote => "remote",
        }
    }
}

impl std::fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `relatedTo` arrives either as a bare id or as the related commit object.
/// Only the id is kept; the commit itself is looked up on demand.
fn related_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Related {
        Id(String),
        Commit { id: String },
    }

    Ok(Option::<Related>::deserialize(deserializer)?.map(|r| match r {
        Related::Id(id) => id,
        Related::Commit { id } => id,
    }))
}

/// Splits a commit message into its title line and the trimmed body.
pub fn split_message(message: &str) -> (&str, &str) {
    match message.find('\n') {
        Some(idx) => (&message[..idx], message[idx..].trim()),
        None => (message, ""),
    }
}

/// First seven characters of a commit id.
fn short(id: &str) -> &str {
    match id.char_indices().nth(7) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: String,
    pub author: Author,
    pub description: String,
    #[serde(deserialize_with = "time::millis::deserialize")]
    pub created_at: DateTime<Utc>,
    pub is_remote: bool,
    pub is_integrated: bool,
    #[serde(default)]
    pub files: Vec<LocalFile>,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    pub branch_id: String,
    #[serde(default)]
    pub change_id: String,
    #[serde(default)]
    pub is_signed: bool,
    /// Id of the upstream `RemoteCommit` carrying the same change.
    #[serde(default, deserialize_with = "related_id")]
    pub related_to: Option<String>,
}

impl Commit {
    pub fn status(&self) -> CommitStatus {
        if self.is_integrated {
            CommitStatus::Integrated
        } else if self.is_remote
            && self
                .related_to
                .as_deref()
                .map_or(true, |related| related == self.id)
        {
            CommitStatus::LocalAndRemote
        } else {
            CommitStatus::Local
        }
    }

    pub fn is_local(&self) -> bool {
        !self.is_remote && !self.is_integrated
    }

    pub fn description_title(&self) -> Option<&str> {
        non_empty(split_message(&self.description).0)
    }

    pub fn description_body(&self) -> Option<&str> {
        non_empty(split_message(&self.description).1)
    }

    pub fn is_parent_of(&self, possible_child: &Commit) -> bool {
        possible_child.parent_ids.iter().any(|p| *p == self.id)
    }

    pub fn is_merge_commit(&self) -> bool {
        self.parent_ids.len() > 1
    }

    pub fn short_id(&self) -> &str {
        short(&self.id)
    }
}

/// A commit known only from the upstream branch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommit {
    pub id: String,
    pub author: Author,
    pub description: String,
    /// Sent as epoch seconds, unlike `Commit::created_at`.
    #[serde(deserialize_with = "time::seconds::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub change_id: String,
    #[serde(default)]
    pub is_signed: bool,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub files: Vec<RemoteFile>,
    /// Id of the local `Commit` carrying the same change.
    #[serde(default, deserialize_with = "related_id")]
    pub related_to: Option<String>,
}

impl RemoteCommit {
    pub fn status(&self) -> CommitStatus {
        CommitStatus::Remote
    }

    pub fn is_local(&self) -> bool {
        false
    }

    pub fn description_title(&self) -> Option<&str> {
        non_empty(split_message(&self.description).0)
    }

    pub fn description_body(&self) -> Option<&str> {
        non_empty(split_message(&self.description).1)
    }

    pub fn is_merge_commit(&self) -> bool {
        self.parent_ids.len() > 1
    }

    pub fn short_id(&self) -> &str {
        short(&self.id)
    }
}

/// Borrowed view over either commit kind.
#[derive(Debug, Clone, Copy)]
pub enum AnyCommit<'a> {
    Local(&'a Commit),
    Remote(&'a RemoteCommit),
}

impl<'a> AnyCommit<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            AnyCommit::Local(c) => &c.id,
            AnyCommit::Remote(c) => &c.id,
        }
    }

    pub fn change_id(&self) -> &'a str {
        match *self {
            AnyCommit::Local(c) => &c.change_id,
            AnyCommit::Remote(c) => &c.change_id,
        }
    }

    pub fn author(&self) -> &'a Author {
        match *self {
            AnyCommit::Local(c) => &c.author,
            AnyCommit::Remote(c) => &c.author,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match *self {
            AnyCommit::Local(c) => c.created_at,
            AnyCommit::Remote(c) => c.created_at,
        }
    }

    pub fn status(&self) -> CommitStatus {
        match *self {
            AnyCommit::Local(c) => c.status(),
            AnyCommit::Remote(c) => c.status(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, AnyCommit::Local(_))
    }
}

impl<'a> From<&'a Commit> for AnyCommit<'a> {
    fn from(c: &'a Commit) -> Self {
        AnyCommit::Local(c)
    }
}

impl<'a> From<&'a RemoteCommit> for AnyCommit<'a> {
    fn from(c: &'a RemoteCommit) -> Self {
        AnyCommit::Remote(c)
    }
}

/// Same id, or the same non-empty change id.
pub fn commit_compare<'a, 'b>(
    left: impl Into<AnyCommit<'a>>,
    right: impl Into<AnyCommit<'b>>,
) -> bool {
    let (left, right) = (left.into(), right.into());
    if left.id() == right.id() {
        return true;
    }
    let (l, r) = (left.change_id(), right.change_id());
    !l.is_empty() && !r.is_empty() && l == r
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn commit_json(id: &str, is_remote: bool, is_integrated: bool, related: Option<&str>) -> Value {
        let mut v = json!({
            "id": id,
            "author": { "name": "Ann", "email": "ann@example.com" },
            "description": "Fix parser\n\n  Handles empty input.  \n",
            "createdAt": 1_700_000_000_000i64,
            "isRemote": is_remote,
            "isIntegrated": is_integrated,
            "files": [],
            "parentIds": ["p1"],
            "branchId": "b1",
            "changeId": "",
            "isSigned": false,
        });
        if let Some(related) = related {
            v["relatedTo"] = json!(related);
        }
        v
    }

    fn commit(id: &str, is_remote: bool, is_integrated: bool, related: Option<&str>) -> Commit {
        serde_json::from_value(commit_json(id, is_remote, is_integrated, related)).unwrap()
    }

    fn remote(id: &str, change_id: &str) -> RemoteCommit {
        serde_json::from_value(json!({
            "id": id,
            "author": { "name": "Bob", "email": "bob@example.com" },
            "description": "Upstream",
            "createdAt": 1_700_000_000,
            "changeId": change_id,
            "isSigned": true,
            "parentIds": [],
        }))
        .unwrap()
    }

    #[test]
    fn status_for_every_combination() {
        let cases = [
            // (is_remote, is_integrated, related_to, expected)
            (false, false, None, CommitStatus::Local),
            (false, false, Some("c1"), CommitStatus::Local),
            (false, false, Some("other"), CommitStatus::Local),
            (true, false, None, CommitStatus::LocalAndRemote),
            (true, false, Some("c1"), CommitStatus::LocalAndRemote),
            (true, false, Some("other"), CommitStatus::Local),
            (false, true, None, CommitStatus::Integrated),
            (false, true, Some("c1"), CommitStatus::Integrated),
            (false, true, Some("other"), CommitStatus::Integrated),
            (true, true, None, CommitStatus::Integrated),
            (true, true, Some("c1"), CommitStatus::Integrated),
            (true, true, Some("other"), CommitStatus::Integrated),
        ];
        for (is_remote, is_integrated, related, expected) in cases {
            let c = commit("c1", is_remote, is_integrated, related);
            assert_eq!(
                c.status(),
                expected,
                "remote={} integrated={} related={:?}",
                is_remote,
                is_integrated,
                related
            );
            assert_eq!(c.is_local(), !is_remote && !is_integrated);
        }
    }

    #[test]
    fn related_to_accepts_object() {
        let mut v = commit_json("c1", true, false, None);
        v["relatedTo"] = json!({ "id": "r9", "description": "ignored" });
        let c: Commit = serde_json::from_value(v).unwrap();
        assert_eq!(c.related_to.as_deref(), Some("r9"));
        assert_eq!(c.status(), CommitStatus::Local);
    }

    #[test]
    fn remote_commit_is_always_remote() {
        let r = remote("r1", "");
        assert_eq!(r.status(), CommitStatus::Remote);
        assert!(!r.is_local());
        assert!(!AnyCommit::from(&r).is_local());
    }

    #[test]
    fn created_at_units_differ() {
        let c = commit("c1", false, false, None);
        let r = remote("r1", "");
        assert_eq!(c.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(r.created_at.timestamp_millis(), 1_700_000_000 * 1000);
    }

    #[test]
    fn message_split() {
        let c = commit("c1", false, false, None);
        assert_eq!(c.description_title(), Some("Fix parser"));
        assert_eq!(c.description_body(), Some("Handles empty input."));

        let r = remote("r1", "");
        assert_eq!(r.description_title(), Some("Upstream"));
        assert_eq!(r.description_body(), None);

        assert_eq!(split_message(""), ("", ""));
        assert_eq!(split_message("\nbody"), ("", "body"));
    }

    #[test]
    fn merge_and_parent() {
        let parent = commit("p1", false, false, None);
        let child = commit("c1", false, false, None);
        assert!(parent.is_parent_of(&child));
        assert!(!child.is_parent_of(&parent));
        assert!(!child.is_merge_commit());

        let mut v = commit_json("m1", false, false, None);
        v["parentIds"] = json!(["p1", "p2"]);
        let merge: Commit = serde_json::from_value(v).unwrap();
        assert!(merge.is_merge_commit());
    }

    #[test]
    fn compare_by_id_or_change_id() {
        let a = remote("r1", "chg");
        let b = remote("r2", "chg");
        let c = remote("r3", "");
        let d = remote("r4", "");
        let local = commit("r3", false, false, None);

        assert!(commit_compare(&a, &a));
        assert!(commit_compare(&a, &b));
        assert!(commit_compare(&b, &a));
        assert!(!commit_compare(&a, &c));
        assert!(!commit_compare(&c, &d));
        assert!(commit_compare(&c, &local));
        assert!(commit_compare(&local, &c));
    }

    #[test]
    fn short_id_counts_characters() {
        assert_eq!(commit("0123456789abcdef", false, false, None).short_id(), "0123456");
        assert_eq!(commit("c1", false, false, None).short_id(), "c1");
        assert_eq!(remote("r1", "").short_id(), "r1");

        let accented = commit("ab\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}", false, false, None);
        assert_eq!(accented.short_id(), "ab\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}");
        assert_eq!(remote("\u{1f600}\u{1f600}", "").short_id(), "\u{1f600}\u{1f600}");
    }

    #[test]
    fn missing_required_field_fails() {
        let mut v = commit_json("c1", false, false, None);
        v.as_object_mut().unwrap().remove("createdAt");
        assert!(serde_json::from_value::<Commit>(v).is_err());
    }
}
