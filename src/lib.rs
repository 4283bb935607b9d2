//! zhouzhi - Ghost content layer for the 望周知 resource portal
//!
//! Reads posts and tags from a Ghost headless CMS, normalizes them into
//! resources and categories, and degrades every call to fallback data when
//! the CMS cannot be reached.
//!
//! # Architecture
//!
//! - Every remote call returns `Result<T, FetchError>`
//! - The content service turns each result into a plain value through an
//!   explicit fallback (static samples, empty list, or local re-filter)
//! - Display styles come from immutable lookup tables built once
//!
//! # Modules
//!
//! - `adapters`: Content API trait, Ghost client, NQL filter builder
//! - `core`: Content service, fallback combinators, local taxonomy
//! - `domain`: Data structures (Resource, Tag, Category)
//! - `presentation`: Style tables, eras, text helpers
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! export GHOST_CONTENT_API_KEY=...
//! zhouzhi home
//! zhouzhi search 圖書館
//! zhouzhi show taiwan-library-digital-resources --full
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;

// Re-export main types at crate root for convenience
pub use adapters::{ContentApi, FetchError, GhostClient, GhostSettings};
pub use core::{BlogMarker, ContentService, ContentSettings, Degrade};
pub use domain::{Category, ContentKind, Resource, Tag};
pub use presentation::{EraTable, StyleBook};
