use std::collections::TryReserveError;

/// Errors reported by submissions and commits.
///
/// Every error is returned synchronously to the immediate caller and leaves
/// the document exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The caller edited against a version that is no longer current.
    /// Re-read the document and retry against the reported version.
    #[error("Version mismatch: document is at {expected}, edit targeted {supplied}")]
    VersionMismatch { expected: u64, supplied: u64 },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Only produced under [`PositionPolicy::Reject`](crate::PositionPolicy::Reject).
    #[error("Position out of range: {pos}+{len} exceeds content length {content_len}")]
    OutOfRange {
        pos: usize,
        len: usize,
        content_len: usize,
    },

    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl EditError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EditError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
