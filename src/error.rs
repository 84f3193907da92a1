use thiserror::Error;

use crate::store::StoreError;

/// Failure classes surfaced by command handling. Store faults carry the
/// underlying gateway error; everything else is a domain outcome with its
/// own user-facing reply.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("user is not registered")]
    NotRegistered,

    #[error("caller does not have permission")]
    PermissionDenied,

    /// Carries the usage hint shown to the user.
    #[error("malformed command")]
    MalformedCommand(&'static str),

    #[error("an open check-in already exists")]
    DuplicateOpenRecord,

    #[error("no open check-in")]
    NoOpenRecord,
}
