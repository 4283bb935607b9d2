//! Content items as read from the CMS.
//!
//! Resources are owned by Ghost; the local side only reads and renders them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Slug prefix marking a tag as a blog category (`blog-教學`)
pub const BLOG_CATEGORY_PREFIX: &str = "blog-";

/// Slug prefix marking a tag as a history era (`era-qing`)
pub const ERA_PREFIX: &str = "era-";

/// A CMS label attached to resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
        }
    }

    /// Whether this tag encodes a blog category
    pub fn is_blog_category(&self) -> bool {
        self.slug.starts_with(BLOG_CATEGORY_PREFIX)
    }

    /// Name with the `blog-` / `era-` encoding prefix removed
    pub fn display_name(&self) -> &str {
        self.name
            .strip_prefix(BLOG_CATEGORY_PREFIX)
            .or_else(|| self.name.strip_prefix(ERA_PREFIX))
            .unwrap_or(&self.name)
    }
}

/// What a resource is, independent of its category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Listed resource (the default for anything without the blog marker)
    #[default]
    Resource,

    /// Blog article
    BlogPost,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Resource => write!(f, "resource"),
            ContentKind::BlogPost => write!(f, "blog"),
        }
    }
}

/// A post fetched from the CMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub html: String,

    /// Routing key; never rewritten locally
    pub slug: String,

    #[serde(default)]
    pub featured: bool,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub primary_tag: Option<Tag>,

    #[serde(default)]
    pub feature_image: Option<String>,

    #[serde(default)]
    pub reading_time: Option<u32>,

    /// Assigned by the content service, not read from the wire
    #[serde(skip_deserializing, default)]
    pub kind: ContentKind,
}

impl Resource {
    /// Create a resource with the given identity and no tags
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            excerpt: String::new(),
            html: String::new(),
            slug: slug.into(),
            featured: false,
            created_at: Utc::now(),
            updated_at: None,
            published_at: None,
            tags: Vec::new(),
            primary_tag: None,
            feature_image: None,
            reading_time: None,
            kind: ContentKind::Resource,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Set the primary tag (also added to `tags`)
    pub fn with_primary_tag(mut self, tag: Tag) -> Self {
        self.primary_tag = Some(tag);
        self.ensure_primary_in_tags();
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// True when the primary tag or any tag has this slug
    pub fn has_tag(&self, slug: &str) -> bool {
        self.primary_tag.as_ref().is_some_and(|t| t.slug == slug)
            || self.tags.iter().any(|t| t.slug == slug)
    }

    /// The category this resource is displayed under.
    ///
    /// Blog posts use their first `blog-` tag; everything else uses the
    /// primary tag.
    pub fn category(&self) -> Option<&Tag> {
        match self.kind {
            ContentKind::BlogPost => self.tags.iter().find(|t| t.is_blog_category()),
            ContentKind::Resource => self.primary_tag.as_ref(),
        }
    }

    /// Append the primary tag to `tags` if it is missing
    pub fn ensure_primary_in_tags(&mut self) {
        if let Some(primary) = &self.primary_tag {
            if !self.tags.iter().any(|t| t.slug == primary.slug) {
                self.tags.push(primary.clone());
            }
        }
    }

    /// Most recent of updated_at / published_at / created_at
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at
            .or(self.published_at)
            .unwrap_or(self.created_at)
    }
}

/// A tag treated as primary classification, with a locally computed count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: usize,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: description.into(),
            count: 0,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Ghost sends `null` for empty excerpts, html and tag lists
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gov() -> Tag {
        Tag::new("1", "政府服務", "gov")
    }

    #[test]
    fn test_has_tag_checks_primary_and_list() {
        let mut a = Resource::new("1", "A", "a");
        a.primary_tag = Some(gov());
        let b = Resource::new("2", "B", "b").with_tag(gov());
        let c = Resource::new("3", "C", "c");

        assert!(a.has_tag("gov"));
        assert!(b.has_tag("gov"));
        assert!(!c.has_tag("gov"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ContentKind::default().to_string(), "resource");
        assert_eq!(ContentKind::BlogPost.to_string(), "blog");
    }

    #[test]
    fn test_ensure_primary_in_tags() {
        let mut resource = Resource::new("1", "A", "a");
        resource.primary_tag = Some(gov());
        resource.ensure_primary_in_tags();
        resource.ensure_primary_in_tags();

        assert_eq!(resource.tags.len(), 1);
        assert_eq!(resource.tags[0].slug, "gov");
    }

    #[test]
    fn test_blog_category_reference() {
        let mut post = Resource::new("1", "Post", "post")
            .with_primary_tag(Tag::new("1", "blog", "blog"))
            .with_tag(Tag::new("2", "blog-教學", "blog-教學"));

        assert_eq!(post.category().map(|t| t.slug.as_str()), Some("blog"));

        post.kind = ContentKind::BlogPost;
        let category = post.category().unwrap();
        assert_eq!(category.slug, "blog-教學");
        assert_eq!(category.display_name(), "教學");
    }

    #[test]
    fn test_deserialize_ghost_post() {
        let json = r#"{
            "id": "65a1",
            "title": "台灣圖書館數位資源",
            "excerpt": null,
            "html": "<p>hi</p>",
            "slug": "taiwan-library",
            "featured": true,
            "created_at": "2024-01-05T08:00:00.000+08:00",
            "updated_at": "2024-01-06T08:00:00.000+00:00",
            "published_at": null,
            "tags": [{"id": "t1", "name": "數位學習", "slug": "digital-learning"}],
            "primary_tag": {"id": "t1", "name": "數位學習", "slug": "digital-learning"},
            "reading_time": 3,
            "visibility": "public"
        }"#;

        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.slug, "taiwan-library");
        assert_eq!(resource.excerpt, "");
        assert!(resource.featured);
        assert_eq!(resource.reading_time, Some(3));
        assert_eq!(resource.kind, ContentKind::Resource);
        assert!(resource.published_at.is_none());
        assert_eq!(resource.last_modified(), resource.updated_at.unwrap());
    }
}
