//! Blog / resource partition.
//!
//! The CMS marks blog posts with a tag. Two conventions exist: a public
//! `blog` tag, or a Ghost internal tag (`#blog`, slug `hash-blog`) that is
//! hidden from readers. Which one a site uses is configuration.

use serde::{Deserialize, Serialize};

use crate::adapters::Filter;
use crate::domain::{ContentKind, Resource};

/// Which tag marks a post as a blog article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "slug", rename_all = "snake_case")]
pub enum BlogMarker {
    /// Public tag; resource listings still include blog posts
    ExplicitTag(String),

    /// Internal tag; resource listings exclude blog posts
    InternalTag(String),
}

impl Default for BlogMarker {
    fn default() -> Self {
        BlogMarker::ExplicitTag("blog".to_string())
    }
}

impl BlogMarker {
    /// Internal-tag marker with Ghost's slug for `#blog`
    pub fn internal() -> Self {
        BlogMarker::InternalTag("hash-blog".to_string())
    }

    pub fn slug(&self) -> &str {
        match self {
            BlogMarker::ExplicitTag(slug) | BlogMarker::InternalTag(slug) => slug,
        }
    }

    /// Narrow a filter to blog posts
    pub fn blog_filter(&self, filter: Filter) -> Filter {
        filter.tag(self.slug())
    }

    /// Narrow a filter to non-blog resources (no-op for explicit tags)
    pub fn resource_filter(&self, filter: Filter) -> Filter {
        match self {
            BlogMarker::ExplicitTag(_) => filter,
            BlogMarker::InternalTag(slug) => filter.not("tag", slug.as_str()),
        }
    }

    pub fn classify(&self, resource: &Resource) -> ContentKind {
        if resource.has_tag(self.slug()) {
            ContentKind::BlogPost
        } else {
            ContentKind::Resource
        }
    }
}
