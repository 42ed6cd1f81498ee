//! # orx-sync-seq
//!
//! An ordered sequence which can be read and mutated from multiple threads without any manual synchronization, using a [`PinnedVec`](https://crates.io/crates/orx-pinned-vec) as the underlying storage.
//!
//! Access to the storage is arbitrated by a readers / exclusive-writer [`Gate`] with the following concurrency model.
//!
//! * Reads block until admitted, and then run concurrently with each other.
//!   * [`SyncSeq::snapshot`] returns a point in time copy of all elements; no mutation is ever interleaved with it.
//!   * [`SyncSeq::get`] returns `None` rather than failing when the index is out of bounds.
//! * Mutations do not block. [`SyncSeq::prepend`], [`SyncSeq::append`], [`SyncSeq::remove_all`] and [`SyncSeq::set`] return as soon as the mutation is admitted.
//!   * Admitted mutations are applied atomically, one at a time, in admission order.
//!   * A mutation waits only for the readers which were active when it was admitted; new readers wait for pending mutations.
//!   * Mutations admitted by the same thread are applied in program order.
//! * The gate owns no thread. Pending mutations are applied on the global [`rayon`](https://crates.io/crates/rayon) pool, never on the mutating caller.
//!   * A mutation that panics is discarded; the sequence keeps its prior state and the following mutations still apply.
//! * One gate can be shared by multiple sequences, placing all their mutations into a single total order.
//!
//! Mutations do not provide a completion signal. Callers that need to observe the outcome use the blocking counterparts,
//! such as [`SyncSeq::set_blocking`], or wait for all pending mutations with [`SyncSeq::flush`].
//!
//! ```
//! use orx_sync_seq::prelude::*;
//!
//! let seq = SyncSeq::from_elements(vec![0; 800]);
//!
//! std::thread::scope(|s| {
//!     for t in 0..8 {
//!         let seq = &seq;
//!         s.spawn(move || {
//!             for i in (t..800).step_by(8) {
//!                 seq.set(i, i);
//!             }
//!         });
//!     }
//! });
//!
//! seq.flush();
//! assert_eq!(seq.snapshot(), (0..800).collect::<Vec<_>>());
//! ```
//!
//! ## Contributing
//!
//! Contributions are welcome! If you notice an error, have a question or think something could be improved, please open an [issue](https://github.com/orxfun/orx-sync-seq/issues/new) or create a PR.
//!
//! ## License
//!
//! This library is licensed under MIT license. See LICENSE for details.

#![warn(
    missing_docs,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::float_cmp,
    clippy::float_cmp_const,
    clippy::missing_panics_doc,
    clippy::todo
)]

mod admission;
mod buffer;
mod common_traits;
mod completion;
mod errors;
mod gate;
mod new;
mod seq;
mod state;

/// Common relevant traits, structs, enums.
pub mod prelude;

pub use errors::SeqError;
pub use gate::Gate;
pub use seq::SyncSeq;
