//! Display outline and drag-and-drop behavior.
//!
//! # Responsibility
//! - Project the store into display rows, with folder expansion and
//!   filtering.
//! - Drive the drag-and-drop move sequence end to end.
//!
//! # Invariants
//! - The outline is a projection; every mutation goes through the store.
//! - Synthetic rows expose live assets but never move bookmarks.

pub mod dragdrop;
pub mod rows;

pub use dragdrop::{perform_drop, perform_external_drop, DropAnchor};
pub use rows::{Outline, Row, RowId, RowKind};
