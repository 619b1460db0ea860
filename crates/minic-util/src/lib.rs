//! minic-util - Shared foundation types for the MiniC compiler pipeline.
//!
//! Every other crate in this workspace depends on this one for:
//! - [`Symbol`] / [`Interner`]: interned identifier handles
//! - [`Span`]: source location tracking
//! - [`IndexVec`] / [`Idx`]: typed-index collections
//!
//! None of these carry any cross-run state: a fresh [`Interner`] is created
//! per [`Session`](../minic_drv/struct.Session.html), so two compilations in
//! the same process never observe each other (spec §5).

mod idx;
mod span;
mod symbol;

pub use idx::{Idx, IndexVec};
pub use span::Span;
pub use symbol::{Interner, Symbol};

pub use rustc_hash::{FxHashMap, FxHashSet};
