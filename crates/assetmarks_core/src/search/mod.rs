//! Display-side filtering over the bookmark collection.
//!
//! # Responsibility
//! - Compile user filter text into a reusable matcher.
//! - Decide row visibility for groups, items and expanded folder children.
//!
//! # Invariants
//! - Filtering never mutates the store; it only affects what is shown.
//! - Matching is case-insensitive.

pub mod filter;

pub use filter::{Filter, FilterError, FilterResult};
