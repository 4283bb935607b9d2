//! Content retrieval with per-call fallback.
//!
//! Each public method issues its own remote request(s), normalizes the
//! result and, on any failure, substitutes the documented fallback: static
//! samples, an empty list, or a local re-filter of an already-fetched list.
//! No method returns an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::degrade::{log_degraded, Degrade};
use super::partition::BlogMarker;
use super::samples::{fallback_categories, fallback_resources};
use super::taxonomy::{
    blog_categories_from_posts, categories_from_tags, count_for_category, filter_by_category,
    search_local, search_local_with_body,
};
use crate::adapters::{BrowseParams, Clause, ContentApi, Filter, ReadKey};
use crate::domain::{Category, ContentKind, Resource, Tag, ERA_PREFIX};

/// Tunables for the content service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSettings {
    /// Which tag marks blog posts
    pub blog_marker: BlogMarker,

    /// Default number of featured resources on the home page
    pub featured_limit: usize,

    /// Default number of related posts on a detail page
    pub related_limit: usize,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            blog_marker: BlogMarker::default(),
            featured_limit: 6,
            related_limit: 4,
        }
    }
}

/// Parameters for [`ContentService::advanced_search`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Text matched against title, excerpt and body
    pub query: Option<String>,

    /// Era slug without the `era-` prefix
    pub era: Option<String>,

    /// Category tag slug
    pub category: Option<String>,
}

/// Everything the home page shows
#[derive(Debug, Clone)]
pub struct HomeSnapshot {
    pub featured: Vec<Resource>,
    pub categories: Vec<Category>,
    pub resources: Vec<Resource>,
}

/// Everything the blog index shows
#[derive(Debug, Clone)]
pub struct BlogSnapshot {
    pub posts: Vec<Resource>,
    pub categories: Vec<Category>,
}

/// Normalization and fallback layer over a [`ContentApi`]
pub struct ContentService<A> {
    api: A,
    settings: ContentSettings,
}

impl<A: ContentApi> ContentService<A> {
    /// Create a service with default settings
    pub fn new(api: A) -> Self {
        Self::with_settings(api, ContentSettings::default())
    }

    pub fn with_settings(api: A, settings: ContentSettings) -> Self {
        debug!(adapter = api.name(), marker = ?settings.blog_marker, "Content service ready");
        Self { api, settings }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn settings(&self) -> &ContentSettings {
        &self.settings
    }

    fn marker(&self) -> &BlogMarker {
        &self.settings.blog_marker
    }

    /// Enforce primary-in-tags and assign the content kind. Slug untouched.
    fn normalize(&self, mut resource: Resource) -> Resource {
        resource.ensure_primary_in_tags();
        resource.kind = self.marker().classify(&resource);
        resource
    }

    fn normalize_all(&self, resources: Vec<Resource>) -> Vec<Resource> {
        resources.into_iter().map(|r| self.normalize(r)).collect()
    }

    /// Public posts that are not blog posts, with tags
    fn resource_filter(&self) -> Filter {
        self.marker().resource_filter(Filter::new().public())
    }

    /// Public posts carrying the blog marker
    fn blog_filter(&self) -> Filter {
        self.marker().blog_filter(Filter::new()).public()
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// All public resources, newest first. Falls back to the static samples.
    #[instrument(skip(self))]
    pub async fn all_resources(&self) -> Vec<Resource> {
        let params = BrowseParams::posts().filter(self.resource_filter());
        let resources = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_fallback("all_resources", fallback_resources);
        self.normalize_all(resources)
    }

    /// Resources tagged `slug`. Falls back to re-filtering [`Self::all_resources`].
    #[instrument(skip(self))]
    pub async fn resources_by_category(&self, slug: &str) -> Vec<Resource> {
        let params = BrowseParams::posts().filter(self.resource_filter().tag(slug));
        match self.api.browse_posts(&params).await {
            Ok(resources) => self.normalize_all(resources),
            Err(e) => {
                log_degraded("resources_by_category", &e);
                filter_by_category(&self.all_resources().await, slug)
            }
        }
    }

    /// Up to `limit` featured resources
    #[instrument(skip(self))]
    pub async fn featured_resources(&self, limit: usize) -> Vec<Resource> {
        let filter = self.resource_filter().eq("featured", "true");
        let params = BrowseParams::posts().limit(limit).filter(filter);
        match self.api.browse_posts(&params).await {
            Ok(resources) => self.normalize_all(resources),
            Err(e) => {
                log_degraded("featured_resources", &e);
                self.all_resources()
                    .await
                    .into_iter()
                    .filter(|r| r.featured)
                    .take(limit)
                    .collect()
            }
        }
    }

    /// All public tags as categories, counted against [`Self::all_resources`].
    ///
    /// Tags and resources are fetched concurrently. Falls back to the static
    /// sample categories when the tag request fails.
    #[instrument(skip(self))]
    pub async fn all_categories(&self) -> Vec<Category> {
        let params = BrowseParams::tags().filter(Filter::new().public());
        let (tags, resources) = tokio::join!(self.api.browse_tags(&params), self.all_resources());

        match tags {
            Ok(tags) => categories_from_tags(tags, &resources),
            Err(e) => {
                log_degraded("all_categories", &e);
                fallback_categories()
            }
        }
    }

    /// One category by slug, with its count
    pub async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.all_categories()
            .await
            .into_iter()
            .find(|c| c.slug == slug)
    }

    /// Title/excerpt search delegated to the CMS.
    ///
    /// Falls back to a local case-insensitive match over
    /// [`Self::all_resources`]. A blank query returns nothing.
    #[instrument(skip(self))]
    pub async fn search_resources(&self, query: &str) -> Vec<Resource> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let filter = Filter::new()
            .any([Clause::contains("title", query), Clause::contains("excerpt", query)])
            .public();
        let params = BrowseParams::posts().filter(self.marker().resource_filter(filter));

        match self.api.browse_posts(&params).await {
            Ok(resources) => self.normalize_all(resources),
            Err(e) => {
                log_degraded("search_resources", &e);
                search_local(&self.all_resources().await, query)
            }
        }
    }

    /// A single resource. Falls back to a lookup in [`Self::all_resources`].
    #[instrument(skip(self))]
    pub async fn resource_by_slug(&self, slug: &str) -> Option<Resource> {
        match self.api.read_post(&ReadKey::slug(slug), Some("tags")).await {
            Ok(resource) => Some(self.normalize(resource)),
            Err(e) => {
                log_degraded("resource_by_slug", &e);
                self.all_resources()
                    .await
                    .into_iter()
                    .find(|r| r.slug == slug)
            }
        }
    }

    /// Up to `limit` resources sharing the primary tag of `slug`, excluding it
    #[instrument(skip(self))]
    pub async fn related_resources(&self, slug: &str, limit: usize) -> Vec<Resource> {
        let Some(current) = self.resource_by_slug(slug).await else {
            return Vec::new();
        };
        let Some(primary) = current.primary_tag.as_ref() else {
            debug!(slug, "No primary tag, no related resources");
            return Vec::new();
        };

        let filter = self
            .resource_filter()
            .tag(primary.slug.as_str())
            .not("slug", slug);
        let params = BrowseParams::posts().limit(limit + 1).filter(filter);

        let mut related = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("related_resources");
        related.retain(|r| r.slug != slug);
        related.truncate(limit);
        self.normalize_all(related)
    }

    /// Featured resources, categories and all resources, fetched concurrently.
    ///
    /// Each part is guarded on its own; one failing request does not affect
    /// the others.
    pub async fn home(&self) -> HomeSnapshot {
        let (featured, categories, resources) = tokio::join!(
            self.featured_resources(self.settings.featured_limit),
            self.all_categories(),
            self.all_resources()
        );

        HomeSnapshot {
            featured,
            categories,
            resources,
        }
    }

    // ========================================================================
    // Blog
    // ========================================================================

    /// All public blog posts, newest first. Falls back to an empty list.
    #[instrument(skip(self))]
    pub async fn blog_posts(&self) -> Vec<Resource> {
        let params = BrowseParams::posts().filter(self.blog_filter());
        let posts = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("blog_posts");
        self.normalize_all(posts)
    }

    /// Tags whose slug starts with `blog-`, counted against [`Self::blog_posts`].
    ///
    /// Falls back to the `blog-` tags found on the blog posts themselves.
    #[instrument(skip(self))]
    pub async fn blog_categories(&self) -> Vec<Category> {
        let filter = Filter::new()
            .and(Clause::starts_with("slug", crate::domain::BLOG_CATEGORY_PREFIX))
            .public();
        let params = BrowseParams::tags().filter(filter);
        let (tags, posts) = tokio::join!(self.api.browse_tags(&params), self.blog_posts());

        match tags {
            Ok(tags) => tags
                .into_iter()
                .map(|tag| {
                    let count = count_for_category(&posts, &tag.slug);
                    let name = tag
                        .name
                        .strip_prefix(crate::domain::BLOG_CATEGORY_PREFIX)
                        .unwrap_or(&tag.name)
                        .to_string();
                    Category {
                        id: tag.id,
                        name,
                        slug: tag.slug,
                        description: tag.description.unwrap_or_default(),
                        count,
                    }
                })
                .collect(),
            Err(e) => {
                log_degraded("blog_categories", &e);
                blog_categories_from_posts(&posts)
            }
        }
    }

    /// Blog posts tagged `slug`. Falls back to re-filtering [`Self::blog_posts`].
    #[instrument(skip(self))]
    pub async fn blog_posts_by_category(&self, slug: &str) -> Vec<Resource> {
        let params = BrowseParams::posts().filter(self.blog_filter().tag(slug));
        match self.api.browse_posts(&params).await {
            Ok(posts) => self.normalize_all(posts),
            Err(e) => {
                log_degraded("blog_posts_by_category", &e);
                filter_by_category(&self.blog_posts().await, slug)
            }
        }
    }

    /// A single blog post; `None` if the slug is not a blog post.
    ///
    /// Falls back to a lookup in [`Self::blog_posts`].
    #[instrument(skip(self))]
    pub async fn blog_post_by_slug(&self, slug: &str) -> Option<Resource> {
        match self.api.read_post(&ReadKey::slug(slug), Some("tags")).await {
            Ok(post) => Some(self.normalize(post)).filter(|p| p.kind == ContentKind::BlogPost),
            Err(e) => {
                log_degraded("blog_post_by_slug", &e);
                self.blog_posts().await.into_iter().find(|p| p.slug == slug)
            }
        }
    }

    /// Up to `limit` blog posts in the same blog category, excluding `slug`
    #[instrument(skip(self))]
    pub async fn related_blog_posts(&self, slug: &str, limit: usize) -> Vec<Resource> {
        let Some(current) = self.blog_post_by_slug(slug).await else {
            return Vec::new();
        };
        let Some(category) = current.category() else {
            return Vec::new();
        };

        let filter = self
            .blog_filter()
            .tag(category.slug.as_str())
            .not("slug", slug);
        let params = BrowseParams::posts().limit(limit + 1).filter(filter);

        let mut related = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("related_blog_posts");
        related.retain(|p| p.slug != slug);
        related.truncate(limit);
        self.normalize_all(related)
    }

    /// Blog posts and blog categories, fetched concurrently
    pub async fn blog(&self) -> BlogSnapshot {
        let (posts, categories) = tokio::join!(self.blog_posts(), self.blog_categories());
        BlogSnapshot { posts, categories }
    }

    // ========================================================================
    // Taiwan history
    // ========================================================================

    /// Resources tagged `era-{era_slug}`
    #[instrument(skip(self))]
    pub async fn resources_by_era(&self, era_slug: &str) -> Vec<Resource> {
        let filter = Filter::new().tag(format!("{}{}", ERA_PREFIX, era_slug)).public();
        let params = BrowseParams::posts().filter(filter);
        let resources = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("resources_by_era");
        self.normalize_all(resources)
    }

    /// Timeline entries, oldest first
    #[instrument(skip(self))]
    pub async fn timeline_events(&self) -> Vec<Resource> {
        let params = BrowseParams::posts()
            .filter(Filter::new().tag("timeline").public())
            .order("published_at ASC");
        let events = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("timeline_events");
        self.normalize_all(events)
    }

    /// Local gazetteers, optionally narrowed to a region tag, by title
    #[instrument(skip(self))]
    pub async fn gazetteers(&self, region: Option<&str>) -> Vec<Resource> {
        let mut filter = Filter::new().tag("gazetteer");
        if let Some(region) = region {
            filter = filter.tag(region);
        }
        let params = BrowseParams::posts()
            .filter(filter.public())
            .order("title ASC");
        let resources = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("gazetteers");
        self.normalize_all(resources)
    }

    /// Gallery resources, optionally narrowed to a collection tag
    #[instrument(skip(self))]
    pub async fn gallery_resources(&self, collection: Option<&str>) -> Vec<Resource> {
        let mut filter = Filter::new().tag("gallery");
        if let Some(collection) = collection {
            filter = filter.tag(collection);
        }
        let params = BrowseParams::posts().filter(filter.public());
        let resources = self
            .api
            .browse_posts(&params)
            .await
            .unwrap_or_empty("gallery_resources");
        self.normalize_all(resources)
    }

    /// Era / category narrowing on the CMS, then a local text match over
    /// title, excerpt and body
    #[instrument(skip(self))]
    pub async fn advanced_search(&self, params: &SearchParams) -> Vec<Resource> {
        let mut filter = Filter::new().public();
        if let Some(era) = &params.era {
            filter = filter.tag(format!("{}{}", ERA_PREFIX, era));
        }
        if let Some(category) = &params.category {
            filter = filter.tag(category.as_str());
        }

        let resources = match self
            .api
            .browse_posts(&BrowseParams::posts().filter(filter))
            .await
        {
            Ok(resources) => self.normalize_all(resources),
            Err(e) => {
                log_degraded("advanced_search", &e);
                return Vec::new();
            }
        };

        match params.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => search_local_with_body(&resources, query),
            _ => resources,
        }
    }

    /// Public `era-` tags as categories (names without the prefix, count 0)
    #[instrument(skip(self))]
    pub async fn all_eras(&self) -> Vec<Category> {
        let filter = Filter::new()
            .and(Clause::starts_with("slug", ERA_PREFIX))
            .public();
        let tags = self
            .api
            .browse_tags(&BrowseParams::tags().filter(filter))
            .await
            .unwrap_or_empty("all_eras");

        tags.into_iter()
            .map(Tag::from)
            .map(|tag| Category {
                name: tag.display_name().to_string(),
                id: tag.id,
                slug: tag.slug,
                description: tag.description.unwrap_or_default(),
                count: 0,
            })
            .collect()
    }
}
