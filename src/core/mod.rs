//! Content retrieval and normalization.
//!
//! This module contains:
//! - ContentService: every retrieval operation, each with its own fallback
//! - Degrade: the `Result` -> value combinators the service uses
//! - BlogMarker: how blog posts are told apart from resources
//! - taxonomy: local counting, filtering and search
//! - samples: static data served while the CMS is unreachable

pub mod degrade;
pub mod partition;
pub mod samples;
pub mod service;
pub mod taxonomy;

// Re-export commonly used types
pub use degrade::Degrade;
pub use partition::BlogMarker;
pub use samples::{fallback_categories, fallback_resources};
pub use service::{BlogSnapshot, ContentService, ContentSettings, HomeSnapshot, SearchParams};
pub use taxonomy::{count_for_category, filter_by_category, search_local};
