use crate::{
    admission::Admission,
    state::{GateState, Mutation},
};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::{
    fmt::Debug,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

struct GateInner {
    state: Mutex<GateState>,
    released: Condvar,
}

/// A readers / exclusive-writer gate arbitrating the access to one or more synchronized resources.
///
/// * Any number of readers can be admitted at the same time, and read concurrently.
/// * Mutations are admitted in a single queue. Admitting a mutation never blocks the caller.
/// * Admitted mutations execute one at a time, in admission order, while no reader is active.
/// * A reader arriving while mutations are pending waits until they are executed.
///
/// The gate owns no thread. Pending mutations are executed on the global [`rayon`] pool: a drain is spawned
/// when a mutation is admitted to an idle gate, or when the last reader leaves the gate with mutations pending.
/// A reader arriving at an idle gate with pending mutations drains them itself since it must wait for them anyway.
///
/// A panicking mutation is discarded; the panic never reaches the callers of the gate and the following mutations still execute.
///
/// `Gate` is a cheap handle; its clones share the same admission state.
/// Sharing one gate among multiple [`SyncSeq`](crate::SyncSeq)s places all of their mutations into one total order.
///
/// # Examples
///
/// ```
/// use orx_sync_seq::prelude::*;
///
/// let gate = Gate::new();
/// let numbers = SyncSeq::with_gate(gate.clone());
/// let words = SyncSeq::with_gate(gate.clone());
///
/// numbers.append(1);
/// words.append("one");
/// numbers.append(2);
///
/// gate.flush();
/// assert_eq!(numbers.snapshot(), vec![1, 2]);
/// assert_eq!(words.snapshot(), vec!["one"]);
/// ```
#[derive(Clone)]
pub struct Gate {
    inner: Arc<GateInner>,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    /// Creates a new idle gate.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GateInner {
                state: Mutex::new(GateState::new()),
                released: Condvar::new(),
            }),
        }
    }

    /// Returns the number of mutations which are admitted but not yet executed.
    ///
    /// The value might already be stale when it is returned; it is useful for diagnostics only.
    pub fn pending(&self) -> usize {
        self.inner.state.lock().num_pending()
    }

    /// Blocks the caller until every mutation admitted before this call is executed.
    pub fn flush(&self) {
        self.read(|| ());
    }

    /// Returns whether or not `self` and `other` are handles to the same gate.
    pub fn same_as(&self, other: &Gate) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // crate

    /// Returns whether or not other handles to this gate exist.
    pub(crate) fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }

    /// Admits the `mutation` as the last of the pending mutations and returns without executing it.
    pub(crate) fn enqueue(&self, mutation: Mutation) {
        let must_drain = self.inner.state.lock().admit_exclusive(mutation);
        if must_drain {
            self.spawn_drain();
        }
    }

    /// Admits the caller as a reader, blocking while mutations are pending or executing, and runs `read`.
    pub(crate) fn read<R>(&self, read: impl FnOnce() -> R) -> R {
        let _admission = self.admit_shared();
        read()
    }

    // helpers

    fn admit_shared(&self) -> SharedAdmission<'_> {
        let mut state = self.inner.state.lock();
        loop {
            match state.shared_admission() {
                Admission::Read => {
                    state.add_reader();
                    return SharedAdmission { gate: self };
                }
                Admission::DrainThenRead => {
                    if state.try_begin_drain() {
                        MutexGuard::unlocked(&mut state, || self.drain());
                    }
                }
                Admission::Wait => self.inner.released.wait(&mut state),
            }
        }
    }

    /// Hands the pending mutations over to the pool; the caller must have marked the state as draining.
    fn spawn_drain(&self) {
        let gate = self.clone();
        rayon::spawn(move || gate.drain());
    }

    /// Executes pending mutations until the queue is empty.
    ///
    /// The caller must have marked the state as draining.
    fn drain(&self) {
        tracing::trace!("draining admitted mutations");
        let (mut executed, mut aborted) = (0usize, 0usize);

        loop {
            let next = self.inner.state.lock().next_mutation();
            match next {
                Some(mutation) => match catch_unwind(AssertUnwindSafe(mutation)) {
                    Ok(()) => executed += 1,
                    Err(_) => {
                        aborted += 1;
                        tracing::error!("discarded a panicking mutation");
                    }
                },
                None => break,
            }
        }

        self.inner.released.notify_all();
        tracing::trace!(executed, aborted, "drained admitted mutations");
    }
}

impl Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.inner.state.lock(), f)
    }
}

/// Releases the shared admission on drop; the last reader leaving hands the gate over to pending mutations.
struct SharedAdmission<'a> {
    gate: &'a Gate,
}

impl Drop for SharedAdmission<'_> {
    fn drop(&mut self) {
        let mut state = self.gate.inner.state.lock();
        state.remove_reader();
        let must_drain = state.try_begin_drain();
        drop(state);

        if must_drain {
            self.gate.spawn_drain();
        }
    }
}
