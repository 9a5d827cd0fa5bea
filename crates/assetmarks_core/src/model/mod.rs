//! Domain model for the bookmark store.
//!
//! # Responsibility
//! - Define canonical data structures used by store, resolver and outline.
//! - Keep asset identity semantics in one place.
//!
//! # Invariants
//! - Live handles and persisted identifiers are distinct types; nothing in
//!   this module serializes a handle.
//! - Items compare equal if and only if they reference the same asset.

pub mod asset;
pub mod bookmark;
