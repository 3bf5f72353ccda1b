//! Domain types.

mod credential;
mod device;
mod diff;
mod project;
mod repo;
mod secret_set;
mod sync;

pub use credential::StoredCredential;
pub use device::{DevicePoll, DeviceSession, PollStatus, TokenInfo};
pub use diff::{Diff, DiffEntry, EntryStatus};
pub use project::{MatchType, ProjectMatch, ProviderProject};
pub use repo::RepoRef;
pub use secret_set::SecretSet;
pub use sync::{
    Direction, SyncCounts, SyncDiff, SyncOutcome, SyncPreview, SyncSummary, SyncTarget,
};
