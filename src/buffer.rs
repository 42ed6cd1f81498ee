use core::{cell::UnsafeCell, marker::PhantomData};
use orx_pinned_vec::PinnedVec;

/// Storage of a synchronized sequence; the pinned vector is accessed only while being admitted by the gate.
pub(crate) struct Buffer<T, P>
where
    P: PinnedVec<T>,
{
    pinned_vec: UnsafeCell<P>,
    phantom: PhantomData<T>,
}

// SAFETY: all accesses to the cell are serialized by the gate: shared references only under shared admission,
// the mutable reference only under exclusive admission.
unsafe impl<T, P: PinnedVec<T> + Send> Send for Buffer<T, P> {}
unsafe impl<T, P: PinnedVec<T> + Send + Sync> Sync for Buffer<T, P> {}

impl<T, P> Buffer<T, P>
where
    P: PinnedVec<T>,
{
    pub fn new(pinned_vec: P) -> Self {
        Self {
            pinned_vec: pinned_vec.into(),
            phantom: PhantomData,
        }
    }

    pub fn into_inner(self) -> P {
        self.pinned_vec.into_inner()
    }

    /// # Safety
    ///
    /// The caller must hold a shared or exclusive admission of the gate guarding this buffer.
    #[inline]
    pub unsafe fn get(&self) -> &P {
        unsafe { &*self.pinned_vec.get() }
    }

    /// # Safety
    ///
    /// The caller must hold the exclusive admission of the gate guarding this buffer.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_mut(&self) -> &mut P {
        unsafe { &mut *self.pinned_vec.get() }
    }
}

/// Removes every element matching the `predicate`, preserving the relative order of the remaining elements.
///
/// The predicate is evaluated exactly once per element, from front to back, before the pinned vector is modified;
/// hence, a panicking predicate leaves the pinned vector untouched.
/// Returns the number of removed elements.
pub(crate) fn remove_matching<T, P, F>(pinned_vec: &mut P, mut predicate: F) -> usize
where
    P: PinnedVec<T>,
    F: FnMut(&T) -> bool,
{
    let len = pinned_vec.len();
    let keep: Vec<bool> = (0..len)
        .map(|idx| !pinned_vec.get(idx).is_some_and(&mut predicate))
        .collect();

    let mut num_kept = 0;
    for idx in (0..len).filter(|idx| keep[*idx]) {
        if idx != num_kept {
            pinned_vec.swap(num_kept, idx);
        }
        num_kept += 1;
    }
    pinned_vec.truncate(num_kept);
    len - num_kept
}
