use crate::SyncSeq;
use core::marker::PhantomData;
use orx_pinned_vec::PinnedVec;
use std::fmt::Debug;

impl<T, P> Debug for SyncSeq<T, P>
where
    T: Debug + Send + 'static,
    P: PinnedVec<T> + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.gate().pending();
        self.read(|pinned_vec| {
            f.debug_struct("SyncSeq")
                .field("elements", &Elements(pinned_vec, PhantomData))
                .field("pending", &pending)
                .finish()
        })
    }
}

struct Elements<'a, T, P>(&'a P, PhantomData<T>);

impl<T, P> Debug for Elements<'_, T, P>
where
    T: Debug,
    P: PinnedVec<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
