use crate::admission::Admission;
use std::{collections::VecDeque, fmt::Debug};

/// A mutation admitted to the gate, waiting for its exclusive execution.
pub(crate) type Mutation = Box<dyn FnOnce() + Send + 'static>;

/// Admission state of a [`Gate`](crate::Gate); only ever accessed while holding the gate's mutex.
pub(crate) struct GateState {
    readers: usize,
    draining: bool,
    pending: VecDeque<Mutation>,
}

impl GateState {
    pub fn new() -> Self {
        Self {
            readers: 0,
            draining: false,
            pending: VecDeque::new(),
        }
    }

    // get

    #[inline]
    pub fn readers(&self) -> usize {
        self.readers
    }

    #[inline]
    pub fn is_draining(&self) -> bool {
        self.draining
    }

    #[inline]
    pub fn num_pending(&self) -> usize {
        self.pending.len()
    }

    /// Neither readers nor a drainer are active; pending mutations, if any, have no owner.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.readers == 0 && !self.draining
    }

    /// Evaluates the admission of a new reader.
    ///
    /// Pending mutations take precedence over new readers so that a steady stream of readers cannot starve writers.
    pub fn shared_admission(&self) -> Admission {
        match (self.draining, self.pending.is_empty()) {
            (true, _) => Admission::Wait,
            (false, true) => Admission::Read,
            (false, false) if self.readers == 0 => Admission::DrainThenRead,
            (false, false) => Admission::Wait,
        }
    }

    // mut

    /// Appends the mutation to the admission order.
    /// Returns whether or not the caller became responsible for draining the pending mutations.
    pub fn admit_exclusive(&mut self, mutation: Mutation) -> bool {
        self.pending.push_back(mutation);
        self.try_begin_drain()
    }

    /// Marks the gate as draining if it is idle and has pending mutations.
    pub fn try_begin_drain(&mut self) -> bool {
        match self.is_idle() && !self.pending.is_empty() {
            true => {
                self.draining = true;
                true
            }
            false => false,
        }
    }

    /// Pops the next mutation in admission order; when there is none, the drain ends.
    pub fn next_mutation(&mut self) -> Option<Mutation> {
        debug_assert!(self.draining);
        let next = self.pending.pop_front();
        if next.is_none() {
            self.draining = false;
        }
        next
    }

    pub fn add_reader(&mut self) {
        debug_assert!(!self.draining);
        self.readers += 1;
    }

    pub fn remove_reader(&mut self) {
        debug_assert!(self.readers > 0);
        self.readers -= 1;
    }
}

impl Debug for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("readers", &self.readers())
            .field("draining", &self.is_draining())
            .field("pending", &self.num_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Mutation {
        Box::new(|| {})
    }

    #[test]
    fn new() {
        let state = GateState::new();
        assert_eq!(state.readers(), 0);
        assert!(!state.is_draining());
        assert_eq!(state.num_pending(), 0);
        assert!(state.is_idle());
        assert_eq!(state.shared_admission(), Admission::Read);
    }

    #[test]
    fn admit_exclusive_when_idle() {
        let mut state = GateState::new();

        assert!(state.admit_exclusive(noop()));
        assert!(state.is_draining());
        assert_eq!(state.shared_admission(), Admission::Wait);

        // a second mutation joins the ongoing drain
        assert!(!state.admit_exclusive(noop()));
        assert_eq!(state.num_pending(), 2);

        assert!(state.next_mutation().is_some());
        assert!(state.next_mutation().is_some());
        assert!(state.is_draining());
        assert!(state.next_mutation().is_none());
        assert!(!state.is_draining());
        assert_eq!(state.shared_admission(), Admission::Read);
    }

    #[test]
    fn admit_exclusive_behind_readers() {
        let mut state = GateState::new();
        state.add_reader();
        state.add_reader();

        assert!(!state.admit_exclusive(noop()));
        assert!(!state.is_draining());
        assert_eq!(state.shared_admission(), Admission::Wait);

        state.remove_reader();
        assert!(!state.try_begin_drain());

        state.remove_reader();
        assert_eq!(state.shared_admission(), Admission::DrainThenRead);
        assert!(state.try_begin_drain());
        assert!(state.is_draining());
    }

    #[test]
    fn debug() {
        let mut state = GateState::new();
        state.add_reader();
        let _ = state.admit_exclusive(noop());

        let debug = format!("{:?}", state);
        assert_eq!(debug, "Gate { readers: 1, draining: false, pending: 1 }");
    }
}
