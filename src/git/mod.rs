mod author;
mod base_branch;
mod branch;
mod commit;
mod file;
mod forge;
mod hunk;
pub mod payload;
mod remote_url;
mod repository;
pub mod time;

pub use author::Author;
pub use base_branch::{BaseBranch, BaseBranchPayload};
pub use branch::{Branch, RemoteBranch, RemoteBranchData, SkippedFile, VirtualBranches};
pub use commit::{commit_compare, split_message, AnyCommit, Commit, CommitStatus, RemoteCommit};
pub use file::{LocalFile, RemoteFile};
pub use forge::{ForgeLinks, ForgeType, ForkRemote};
pub use hunk::{ChangeType, Hunk, HunkLock, RemoteHunk};
pub use remote_url::RemoteUrl;
pub use repository::{RemoteInfo, Repository};
