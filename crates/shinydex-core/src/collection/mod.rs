//! Collection domain module.
//!
//! Read-only collection entries, the species catalog, and the merger that
//! reconciles personal and team-wide records into one capture view.
//!
//! # Module Structure
//!
//! - `entry`: entry and catalog models plus the canonical species key
//! - `merger`: the personal/team reconciliation (`CollectionMerger`)
//! - `repository`: read-only source trait for the backing store

mod entry;
mod merger;
mod repository;

// Re-export public API
pub use entry::{CatalogItem, CollectionEntry, SpeciesKey};
pub use merger::{CaptureDetails, CollectionMerger, MergedView};
pub use repository::CollectionSource;
