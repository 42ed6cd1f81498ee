use crate::{gate::Gate, seq::SyncSeq};
use orx_pinned_vec::PinnedVec;
use orx_split_vec::{Doubling, Linear, Recursive, SplitVec};

impl<T> SyncSeq<T, SplitVec<T, Doubling>>
where
    T: Send + Sync + 'static,
{
    /// Creates a new empty sequence guarded by its own gate.
    pub fn new() -> Self {
        Self::with_doubling_growth()
    }

    /// Creates a new empty sequence guarded by the given `gate`.
    ///
    /// All sequences created with clones of the same gate share one total order of mutations.
    pub fn with_gate(gate: Gate) -> Self {
        Self::from_pinned_with_gate(SplitVec::with_doubling_growth(), gate)
    }

    /// Creates a new sequence containing the `elements` in order, guarded by its own gate.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_elements_with_gate(elements, Gate::new())
    }

    /// Creates a new sequence containing the `elements` in order, guarded by the given `gate`.
    pub fn from_elements_with_gate<I>(elements: I, gate: Gate) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut pinned_vec = SplitVec::with_doubling_growth();
        for x in elements {
            pinned_vec.push(x);
        }
        Self::from_pinned_with_gate(pinned_vec, gate)
    }

    /// Creates a new empty sequence by creating and wrapping up a new `SplitVec<T, Doubling>` as the underlying storage.
    pub fn with_doubling_growth() -> Self {
        Self::from_pinned(SplitVec::with_doubling_growth())
    }
}

impl<T> SyncSeq<T, SplitVec<T, Linear>>
where
    T: Send + Sync + 'static,
{
    /// Creates a new empty sequence by creating and wrapping up a new `SplitVec<T, Linear>` as the underlying storage.
    ///
    /// Each fragment of the underlying split vector will have a capacity of `2 ^ constant_fragment_capacity_exponent`.
    pub fn with_linear_growth(constant_fragment_capacity_exponent: usize) -> Self {
        Self::from_pinned(SplitVec::with_linear_growth(
            constant_fragment_capacity_exponent,
        ))
    }
}

impl<T> SyncSeq<T, SplitVec<T, Recursive>>
where
    T: Send + Sync + 'static,
{
    /// Creates a new empty sequence by creating and wrapping up a new `SplitVec<T, Recursive>` as the underlying storage.
    pub fn with_recursive_growth() -> Self {
        Self::from_pinned(SplitVec::with_recursive_growth())
    }
}
