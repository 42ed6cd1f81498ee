use crate::SyncSeq;
use orx_split_vec::SplitVec;

impl<T> Default for SyncSeq<T, SplitVec<T>>
where
    T: Send + Sync + 'static,
{
    /// Creates a new empty sequence guarded by its own gate.
    fn default() -> Self {
        Self::new()
    }
}
