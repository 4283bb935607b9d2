//! Adapter interfaces for the content API.
//!
//! Adapters provide a unified interface for reading posts and tags from a
//! headless CMS. `GhostClient` talks to the Ghost Content API; tests plug
//! in their own implementation of [`ContentApi`].

pub mod error;
pub mod filter;
pub mod ghost;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Resource, Tag};

// Re-export the Ghost adapter
pub use error::{FetchError, FetchResult};
pub use filter::{Clause, Filter, Op};
pub use ghost::{GhostClient, GhostSettings};

/// How many records a browse call may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    All,
    Count(usize),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::All => write!(f, "all"),
            Limit::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Parameters for a browse request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseParams {
    pub limit: Limit,

    /// Related data to embed (`tags`, `count.posts`)
    pub include: Option<String>,

    pub filter: Option<Filter>,

    /// e.g. `published_at DESC`
    pub order: Option<String>,
}

impl Default for BrowseParams {
    fn default() -> Self {
        Self {
            limit: Limit::All,
            include: None,
            filter: None,
            order: None,
        }
    }
}

impl BrowseParams {
    /// All public posts with tags, newest first
    pub fn posts() -> Self {
        Self {
            limit: Limit::All,
            include: Some("tags".to_string()),
            filter: None,
            order: Some("published_at DESC".to_string()),
        }
    }

    /// All tags, alphabetical
    pub fn tags() -> Self {
        Self {
            limit: Limit::All,
            include: None,
            filter: None,
            order: Some("name ASC".to_string()),
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Limit::Count(limit);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = if filter.is_empty() { None } else { Some(filter) };
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

/// Key for reading a single post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadKey {
    Id(String),
    Slug(String),
}

impl ReadKey {
    pub fn slug(slug: impl Into<String>) -> Self {
        ReadKey::Slug(slug.into())
    }
}

impl fmt::Display for ReadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadKey::Id(id) => write!(f, "id:{}", id),
            ReadKey::Slug(slug) => write!(f, "slug:{}", slug),
        }
    }
}

/// Post count embedded by `include=count.posts`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPostCount {
    #[serde(default)]
    pub posts: usize,
}

/// A tag as returned by the tags endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub count: Option<TagPostCount>,
}

impl TagRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            count: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<TagRecord> for Tag {
    fn from(record: TagRecord) -> Self {
        Tag {
            id: record.id,
            name: record.name,
            slug: record.slug,
            description: record.description,
        }
    }
}

/// Read access to a headless CMS
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// List posts matching the parameters
    async fn browse_posts(&self, params: &BrowseParams) -> FetchResult<Vec<Resource>>;

    /// Read a single post
    async fn read_post(&self, key: &ReadKey, include: Option<&str>) -> FetchResult<Resource>;

    /// List tags matching the parameters
    async fn browse_tags(&self, params: &BrowseParams) -> FetchResult<Vec<TagRecord>>;
}
