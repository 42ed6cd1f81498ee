use thiserror::Error;

/// Errors reported by the blocking operations of [`SyncSeq`](crate::SyncSeq).
///
/// Non-blocking mutations never report errors; they have no completion channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// The mutation addressed a position which did not exist at the time it executed.
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the sequence when the mutation executed.
        len: usize,
    },

    /// The mutation was admitted but its outcome was never delivered; it panicked while executing and was discarded.
    #[error("the admitted mutation was aborted before completing")]
    MutationAborted,
}
