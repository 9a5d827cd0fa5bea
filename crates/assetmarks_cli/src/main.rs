//! CLI probe for bookmark documents.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `assetmarks_core` linkage.
//! - Summarize a persisted bookmark document without resolving assets.

use assetmarks_core::store::persisted::load_document;
use assetmarks_core::{core_version, DATA_FILE_NAME};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(dir) = args.next() else {
        println!("assetmarks_core version={}", core_version());
        println!("data file={DATA_FILE_NAME}");
        return ExitCode::SUCCESS;
    };

    let path = Path::new(&dir).join(DATA_FILE_NAME);
    let document = match load_document(&path) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("failed to read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    println!("{} groups in {}", document.groups.len(), path.display());
    for group in &document.groups {
        println!("  {} ({} items)", group.name, group.items.len());
        for item in &group.items {
            let guid = if item.guid.is_empty() {
                "<unknown>"
            } else {
                item.guid.as_str()
            };
            if item.note.is_empty() {
                println!("    {guid}");
            } else {
                println!("    {guid} note={}", item.note);
            }
        }
    }
    ExitCode::SUCCESS
}
