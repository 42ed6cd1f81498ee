use crate::SyncSeq;
use orx_split_vec::SplitVec;

impl<T> From<Vec<T>> for SyncSeq<T, SplitVec<T>>
where
    T: Send + Sync + 'static,
{
    fn from(value: Vec<T>) -> Self {
        Self::from_elements(value)
    }
}

impl<T> FromIterator<T> for SyncSeq<T, SplitVec<T>>
where
    T: Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}
