pub use crate::errors::SeqError;
pub use crate::gate::Gate;
pub use crate::seq::SyncSeq;

pub use orx_pinned_vec::PinnedVec;
pub use orx_split_vec::{Doubling, Linear, Recursive, SplitVec};
