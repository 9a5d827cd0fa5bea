//! Core domain logic for Assetmarks.
//! This crate is the single source of truth for bookmark invariants.

pub mod logging;
pub mod model;
pub mod outline;
pub mod resolve;
pub mod search;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::asset::{AssetGuid, AssetHandle, AssetPath};
pub use model::bookmark::{Group, Item};
pub use outline::{perform_drop, perform_external_drop, DropAnchor, Outline, Row, RowId, RowKind};
pub use resolve::{AssetCatalog, AssetResolver, FolderListing};
pub use search::{Filter, FilterError, FilterResult};
pub use store::{BookmarkStore, DropIndex, StoreError, StoreResult, DATA_FILE_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
