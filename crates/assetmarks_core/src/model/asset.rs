//! Asset reference vocabulary.
//!
//! # Responsibility
//! - Define the handle/identifier/path types shared by store, resolver and
//!   outline layers.
//! - Keep the session-scoped vs persistence-safe distinction visible in
//!   signatures.
//!
//! # Invariants
//! - `AssetHandle` values are only meaningful to the resolver that issued
//!   them and must never be written to durable storage.
//! - `AssetGuid` survives process restarts and asset relocation.
//! - `AssetPath` separators are normalized to forward slashes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Live handle to a loaded asset, issued by an
/// [`AssetResolver`](crate::resolve::AssetResolver) implementation.
///
/// Kept as an opaque wrapper to make semantic intent explicit in signatures.
/// The raw value carries no meaning across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetHandle(u64);

impl AssetHandle {
    /// Wraps a resolver-issued raw handle value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for AssetHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable asset identifier safe to persist.
///
/// The empty identifier is the explicit "unknown" value used when a live
/// handle could not be mapped back to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetGuid(String);

impl AssetGuid {
    /// Wraps an identifier produced by a resolver.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the explicit "unknown identifier" value.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Returns whether this is the unknown identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetGuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project-relative asset path with forward-slash separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    /// Creates a path, normalizing backslash separators.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().replace('\\', "/"))
    }

    /// Returns the path text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final path segment without its extension.
    ///
    /// Dot-prefixed segments such as `.config` keep their leading dot.
    pub fn name(&self) -> &str {
        let segment = self.0.rsplit('/').next().unwrap_or("");
        match segment.rfind('.') {
            Some(index) if index > 0 => &segment[..index],
            _ => segment,
        }
    }
}

impl Display for AssetPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
