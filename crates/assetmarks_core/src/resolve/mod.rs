//! Asset resolution contracts and the in-memory catalog implementation.
//!
//! # Responsibility
//! - Define the host-facing interface between live handles and stable
//!   identifiers.
//! - Keep store and persistence code free of host asset-database details.
//!
//! # Invariants
//! - Resolution failures are per-asset and recoverable; implementations
//!   return `None` instead of panicking on stale input.
//! - A handle returned by `load_asset` stays valid for the lifetime of the
//!   resolver instance.

use crate::model::asset::{AssetGuid, AssetHandle, AssetPath};

pub mod catalog;

pub use catalog::AssetCatalog;

/// Host interface converting between live handles and persistence-safe
/// identifiers.
pub trait AssetResolver {
    /// Returns the stable identifier and local file id for a live handle,
    /// or `None` for transient assets that cannot be persisted.
    fn guid_and_local_id(&self, handle: AssetHandle) -> Option<(AssetGuid, i64)>;

    /// Maps a stable identifier to the current asset path, or `None` when
    /// the identifier no longer names an existing asset.
    fn asset_path(&self, guid: &AssetGuid) -> Option<AssetPath>;

    /// Returns the current asset path for a live handle.
    fn path_of(&self, handle: AssetHandle) -> Option<AssetPath>;

    /// Loads the asset at `path`, returning a live handle.
    fn load_asset(&self, path: &AssetPath) -> Option<AssetHandle>;

    /// Returns whether `path` names a folder asset.
    fn is_folder(&self, path: &AssetPath) -> bool;
}

/// Folder content enumeration used by outline expansion.
pub trait FolderListing {
    /// Direct children of a folder: files first, then subfolders, each block
    /// sorted by path. Empty for paths that are not folders.
    fn children(&self, path: &AssetPath) -> Vec<AssetPath>;
}
