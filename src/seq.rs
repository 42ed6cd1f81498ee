use crate::{
    buffer::{Buffer, remove_matching},
    completion::completion,
    errors::SeqError,
    gate::Gate,
};
use core::marker::PhantomData;
use orx_pinned_vec::PinnedVec;
use orx_split_vec::SplitVec;
use std::sync::Arc;

/// An ordered sequence which can be read and mutated from multiple threads without any synchronization by the caller.
///
/// The access is arbitrated by a readers / exclusive-writer [`Gate`].
///
/// * Reads ([`snapshot`], [`get`], [`len`], [`read`]) block the caller until it is admitted as a reader; i.e., until
///   no mutation is pending or executing. Any number of reads can proceed concurrently.
/// * Mutations ([`prepend`], [`append`], [`remove_all`], [`set`]) do not block. The call returns as soon as the mutation
///   is admitted to the gate's pending order. The mutation is applied atomically later, after the readers active at the
///   time of admission are released. No completion signal is given.
/// * Mutations are applied one at a time in admission order. Mutations admitted by the same thread are applied in
///   the order they are issued.
///
/// Consequently, a mutation is visible to any read which is admitted after the mutation itself.
/// Blocking counterparts of the mutations (such as [`append_blocking`]) are provided for callers which need the
/// outcome, and [`flush`] waits until all mutations admitted so far are applied.
///
/// The storage is a [`PinnedVec`], a [`SplitVec`] with doubling growth by default.
///
/// [`snapshot`]: SyncSeq::snapshot
/// [`get`]: SyncSeq::get
/// [`len`]: SyncSeq::len
/// [`read`]: SyncSeq::read
/// [`prepend`]: SyncSeq::prepend
/// [`append`]: SyncSeq::append
/// [`remove_all`]: SyncSeq::remove_all
/// [`set`]: SyncSeq::set
/// [`append_blocking`]: SyncSeq::append_blocking
/// [`flush`]: SyncSeq::flush
///
/// # Examples
///
/// ```
/// use orx_sync_seq::prelude::*;
///
/// let seq = SyncSeq::from_elements(['a', 'b', 'c', 'd']);
///
/// std::thread::scope(|s| {
///     s.spawn(|| seq.append('e'));
///     s.spawn(|| seq.remove_all(|c| *c == 'b'));
///     s.spawn(|| assert!(seq.len() >= 3));
/// });
///
/// seq.flush();
/// assert_eq!(seq.len(), 4);
/// assert_eq!(seq.get(0), Some('a'));
/// assert_eq!(seq.get(7), None);
/// ```
pub struct SyncSeq<T, P = SplitVec<T>>
where
    P: PinnedVec<T>,
{
    buffer: Arc<Buffer<T, P>>,
    gate: Gate,
    phantom: PhantomData<T>,
}

impl<T, P> SyncSeq<T, P>
where
    T: Send + 'static,
    P: PinnedVec<T> + Send + Sync + 'static,
{
    // new

    /// Wraps the `pinned_vec` as the storage of a sequence guarded by the given `gate`.
    ///
    /// Elements of the pinned vector become the initial elements of the sequence.
    pub fn from_pinned_with_gate(pinned_vec: P, gate: Gate) -> Self {
        tracing::debug!(
            len = pinned_vec.len(),
            shared_gate = gate.is_shared(),
            "created synchronized sequence"
        );
        Self {
            buffer: Arc::new(Buffer::new(pinned_vec)),
            gate,
            phantom: PhantomData,
        }
    }

    /// Wraps the `pinned_vec` as the storage of a sequence guarded by its own gate.
    pub fn from_pinned(pinned_vec: P) -> Self {
        Self::from_pinned_with_gate(pinned_vec, Gate::new())
    }

    /// Blocks until every pending mutation is applied and returns the underlying pinned vector.
    pub fn into_inner(self) -> P {
        let mut buffer = self.buffer;
        loop {
            self.gate.flush();
            // an executing mutation holds the storage only until the drain releases the gate
            match Arc::try_unwrap(buffer) {
                Ok(buffer) => return buffer.into_inner(),
                Err(still_shared) => {
                    buffer = still_shared;
                    std::thread::yield_now();
                }
            }
        }
    }

    // getters

    /// Returns a handle to the gate guarding this sequence.
    ///
    /// The handle can be used to create other sequences sharing the same total order of mutations.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    // read

    /// Admits the caller as a reader and returns the result of `read` applied on the underlying pinned vector.
    ///
    /// The pinned vector is guaranteed not to change during the call.
    /// Mutations admitted within `read` are applied after it returns.
    ///
    /// Note that calling blocking methods, such as [`SyncSeq::append_blocking`] or [`SyncSeq::flush`], on a sequence sharing
    /// the same gate from within `read` deadlocks since the mutation can never be admitted while the caller is reading.
    pub fn read<R>(&self, read: impl FnOnce(&P) -> R) -> R {
        // SAFETY: the caller is admitted as a reader within gate.read.
        self.gate.read(|| read(unsafe { self.buffer.get() }))
    }

    /// Returns a point in time copy of all elements of the sequence.
    ///
    /// Blocks until the caller is admitted as a reader; no mutation can be interleaved with the copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use orx_sync_seq::prelude::*;
    ///
    /// let seq = SyncSeq::new();
    /// seq.append(1);
    /// seq.append(2);
    /// seq.prepend(0);
    ///
    /// assert_eq!(seq.snapshot(), vec![0, 1, 2]);
    /// ```
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.read(|pinned_vec| pinned_vec.iter().cloned().collect())
    }

    /// Returns a clone of the element at the `index`-th position; returns None if `index` is out of bounds when the read executes.
    ///
    /// Blocks until the caller is admitted as a reader.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.read(|pinned_vec| pinned_vec.get(index).cloned())
    }

    /// Returns the number of elements once all mutations admitted before the call are applied.
    pub fn len(&self) -> usize {
        self.read(|pinned_vec| pinned_vec.len())
    }

    /// Returns whether or not the sequence is empty once all mutations admitted before the call are applied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks the caller until every mutation admitted before this call is applied.
    ///
    /// When the gate is shared, this includes the mutations of the other sequences sharing it.
    pub fn flush(&self) {
        self.gate.flush();
    }

    // mutate

    /// Admits a mutation inserting `element` at position 0, shifting all existing elements one position later.
    ///
    /// Returns immediately; the element becomes visible to the reads admitted after this call.
    pub fn prepend(&self, element: T) {
        self.mutate(move |pinned_vec| pinned_vec.insert(0, element));
    }

    /// Admits a mutation pushing `element` to the end of the sequence.
    ///
    /// Returns immediately; the element becomes visible to the reads admitted after this call.
    pub fn append(&self, element: T) {
        self.mutate(move |pinned_vec| pinned_vec.push(element));
    }

    /// Admits a mutation removing every element for which the `predicate` holds, preserving the relative order of the remaining elements.
    ///
    /// The predicate is evaluated once per element when the mutation executes, against the elements as of that point of the admission order.
    /// It must not read from any sequence sharing the same gate.
    ///
    /// Returns immediately.
    pub fn remove_all<F>(&self, predicate: F)
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.mutate(move |pinned_vec| {
            remove_matching(pinned_vec, predicate);
        });
    }

    /// Admits a mutation overwriting the element at the `index`-th position with `value`.
    ///
    /// Returns immediately. The bounds are checked when the mutation executes:
    /// if `index` is out of bounds at that point, the write is ignored and a warning is logged.
    /// Use [`SyncSeq::set_blocking`] to observe the out of bounds error.
    pub fn set(&self, index: usize, value: T) {
        self.mutate(move |pinned_vec| match pinned_vec.get_mut(index) {
            Some(slot) => *slot = value,
            None => tracing::warn!(
                index,
                len = pinned_vec.len(),
                "ignored out-of-range set on synchronized sequence"
            ),
        });
    }

    // mutate - blocking

    /// Admits a mutation inserting `element` at position 0 and blocks until it is applied.
    ///
    /// Returns [`SeqError::MutationAborted`] only if the mutation panicked while executing.
    pub fn prepend_blocking(&self, element: T) -> Result<(), SeqError> {
        self.mutate_blocking(move |pinned_vec| pinned_vec.insert(0, element))
    }

    /// Admits a mutation pushing `element` to the end and blocks until it is applied.
    ///
    /// Returns [`SeqError::MutationAborted`] only if the mutation panicked while executing.
    pub fn append_blocking(&self, element: T) -> Result<(), SeqError> {
        self.mutate_blocking(move |pinned_vec| pinned_vec.push(element))
    }

    /// Admits a mutation removing every element for which the `predicate` holds, blocks until it is applied, and returns the number of removed elements.
    ///
    /// Returns [`SeqError::MutationAborted`] if the `predicate` panics; the sequence is then left unchanged.
    pub fn remove_all_blocking<F>(&self, predicate: F) -> Result<usize, SeqError>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.mutate_blocking(move |pinned_vec| remove_matching(pinned_vec, predicate))
    }

    /// Admits a mutation overwriting the element at the `index`-th position with `value`, blocks until it is applied and returns the replaced element.
    ///
    /// Returns [`SeqError::IndexOutOfRange`] if `index` is out of bounds when the mutation executes, leaving the sequence unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use orx_sync_seq::prelude::*;
    ///
    /// let seq = SyncSeq::from_elements(["a", "b", "c", "d"]);
    ///
    /// assert_eq!(seq.set_blocking(2, "z"), Ok("c"));
    /// assert_eq!(seq.snapshot(), vec!["a", "b", "z", "d"]);
    ///
    /// assert_eq!(seq.set_blocking(4, "x"), Err(SeqError::IndexOutOfRange { index: 4, len: 4 }));
    /// ```
    pub fn set_blocking(&self, index: usize, value: T) -> Result<T, SeqError> {
        self.mutate_blocking(move |pinned_vec| {
            let len = pinned_vec.len();
            match pinned_vec.get_mut(index) {
                Some(slot) => Ok(core::mem::replace(slot, value)),
                None => Err(SeqError::IndexOutOfRange { index, len }),
            }
        })?
    }

    // helpers

    /// Admits the `mutation` to the gate.
    ///
    /// The queued mutation holds a weak reference to the storage; when the sequence is dropped before the mutation
    /// executes, which is possible only when the gate is shared, the mutation is skipped.
    fn mutate<F>(&self, mutation: F)
    where
        F: FnOnce(&mut P) + Send + 'static,
    {
        let buffer = Arc::downgrade(&self.buffer);
        self.gate.enqueue(Box::new(move || match buffer.upgrade() {
            // SAFETY: admitted mutations are executed under the exclusive admission of the gate.
            Some(buffer) => mutation(unsafe { buffer.get_mut() }),
            None => tracing::trace!("skipped mutation of a dropped synchronized sequence"),
        }));
    }

    fn mutate_blocking<R, F>(&self, mutation: F) -> Result<R, SeqError>
    where
        R: Send + 'static,
        F: FnOnce(&mut P) -> R + Send + 'static,
    {
        let (completer, waiter) = completion();
        self.mutate(move |pinned_vec| completer.complete(mutation(pinned_vec)));
        waiter.wait()
    }
}
