use crate::errors::SeqError;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

enum Outcome<R> {
    Waiting,
    Done(R),
    Abandoned,
}

struct CompletionSignal<R> {
    outcome: Mutex<Outcome<R>>,
    condvar: Condvar,
}

/// Creates a connected pair: the completer travels with the admitted mutation, the waiter stays with the caller.
pub(crate) fn completion<R>() -> (Completer<R>, Waiter<R>) {
    let signal = Arc::new(CompletionSignal {
        outcome: Mutex::new(Outcome::Waiting),
        condvar: Condvar::new(),
    });
    (
        Completer {
            signal: signal.clone(),
        },
        Waiter { signal },
    )
}

/// Delivers the outcome of a mutation. Dropping it without completing marks the mutation as abandoned.
pub(crate) struct Completer<R> {
    signal: Arc<CompletionSignal<R>>,
}

impl<R> Completer<R> {
    pub fn complete(self, value: R) {
        *self.signal.outcome.lock() = Outcome::Done(value);
    }
}

impl<R> Drop for Completer<R> {
    fn drop(&mut self) {
        let mut outcome = self.signal.outcome.lock();
        if matches!(*outcome, Outcome::Waiting) {
            *outcome = Outcome::Abandoned;
        }
        drop(outcome);
        self.signal.condvar.notify_all();
    }
}

pub(crate) struct Waiter<R> {
    signal: Arc<CompletionSignal<R>>,
}

impl<R> Waiter<R> {
    /// Blocks until the paired completer either completes or is dropped.
    pub fn wait(self) -> Result<R, SeqError> {
        let mut outcome = self.signal.outcome.lock();
        loop {
            match core::mem::replace(&mut *outcome, Outcome::Waiting) {
                Outcome::Waiting => self.signal.condvar.wait(&mut outcome),
                Outcome::Done(value) => return Ok(value),
                Outcome::Abandoned => return Err(SeqError::MutationAborted),
            }
        }
    }
}
