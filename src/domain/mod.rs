//! Domain types for the content layer.
//!
//! This module contains the data structures shared by every layer:
//! - Resource: a post read from the CMS
//! - Tag: a CMS label
//! - Category: a tag with a locally computed resource count

pub mod resource;

// Re-export commonly used types
pub use resource::{Category, ContentKind, Resource, Tag, BLOG_CATEGORY_PREFIX, ERA_PREFIX};
