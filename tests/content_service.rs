//! Content Service Integration Tests
//!
//! Runs the service against an in-memory content API and checks the
//! filters it sends, the normalization it applies, and the counts it derives.

use std::sync::Mutex;

use async_trait::async_trait;
use zhouzhi::adapters::{BrowseParams, ContentApi, FetchError, FetchResult, ReadKey, TagRecord};
use zhouzhi::core::{BlogMarker, ContentService, ContentSettings, SearchParams};
use zhouzhi::domain::{ContentKind, Resource, Tag};

/// One browse call as the CMS saw it: filter, limit, order
type Request = (String, String, String);

/// In-memory CMS that records every browse request it receives.
///
/// Posts are returned unfiltered; tags honour a `slug:~^'prefix'` clause.
struct MemoryApi {
    posts: Vec<Resource>,
    tags: Vec<TagRecord>,
    fail_tags: bool,
    requests: Mutex<Vec<Request>>,
}

impl MemoryApi {
    fn new(posts: Vec<Resource>, tags: Vec<TagRecord>) -> Self {
        Self {
            posts,
            tags,
            fail_tags: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, params: &BrowseParams) -> String {
        let filter = params
            .filter
            .as_ref()
            .map(|f| f.to_string())
            .unwrap_or_default();
        let order = params.order.clone().unwrap_or_default();
        self.requests
            .lock()
            .unwrap()
            .push((filter.clone(), params.limit.to_string(), order));
        filter
    }

    /// Filters of every browse call so far
    fn seen(&self) -> Vec<String> {
        self.requests().into_iter().map(|(filter, _, _)| filter).collect()
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentApi for MemoryApi {
    fn name(&self) -> &str {
        "memory"
    }

    async fn browse_posts(&self, params: &BrowseParams) -> FetchResult<Vec<Resource>> {
        self.record(params);
        Ok(self.posts.clone())
    }

    async fn read_post(&self, key: &ReadKey, _include: Option<&str>) -> FetchResult<Resource> {
        let found = match key {
            ReadKey::Slug(slug) => self.posts.iter().find(|p| &p.slug == slug),
            ReadKey::Id(id) => self.posts.iter().find(|p| &p.id == id),
        };
        found
            .cloned()
            .ok_or_else(|| FetchError::NotFound(key.to_string()))
    }

    async fn browse_tags(&self, params: &BrowseParams) -> FetchResult<Vec<TagRecord>> {
        let filter = self.record(params);
        if self.fail_tags {
            return Err(FetchError::Unavailable("tags endpoint down".to_string()));
        }

        let prefix = filter
            .split_once("slug:~^'")
            .and_then(|(_, rest)| rest.split_once('\''))
            .map(|(prefix, _)| prefix.to_string());

        Ok(self
            .tags
            .iter()
            .filter(|t| prefix.as_ref().map_or(true, |p| t.slug.starts_with(p.as_str())))
            .cloned()
            .collect())
    }
}

fn gov() -> Tag {
    Tag::new("t1", "政府服務", "gov")
}

fn blog_tag() -> Tag {
    Tag::new("t2", "blog", "blog")
}

fn tutorial() -> Tag {
    Tag::new("t3", "blog-教學", "blog-教學")
}

fn posts() -> Vec<Resource> {
    vec![
        Resource::new("1", "戶政線上申辦", "household-online").with_primary_tag(gov()),
        Resource::new("2", "稅務資訊", "tax-info")
            .with_excerpt("綜合所得稅")
            .with_tag(gov()),
        Resource::new("3", "如何使用圖書館", "how-to-library")
            .with_tag(blog_tag())
            .with_primary_tag(tutorial()),
    ]
}

fn tags() -> Vec<TagRecord> {
    vec![
        TagRecord::new("t1", "政府服務", "gov"),
        TagRecord::new("t2", "blog", "blog"),
        TagRecord::new("t3", "blog-教學", "blog-教學").with_description("使用教學"),
        TagRecord::new("t4", "空分類", "empty"),
    ]
}

fn service() -> ContentService<MemoryApi> {
    ContentService::new(MemoryApi::new(posts(), tags()))
}

#[tokio::test]
async fn test_all_resources_sends_public_filter_and_classifies() {
    let service = service();
    let resources = service.all_resources().await;

    assert_eq!(service.api().seen(), vec!["visibility:public"]);
    assert_eq!(resources.len(), 3);
    assert_eq!(resources[0].kind, ContentKind::Resource);
    assert_eq!(resources[2].kind, ContentKind::BlogPost);
}

#[tokio::test]
async fn test_internal_marker_excludes_blog_from_resources() {
    let settings = ContentSettings {
        blog_marker: BlogMarker::internal(),
        ..Default::default()
    };
    let service = ContentService::with_settings(MemoryApi::new(posts(), tags()), settings);
    service.all_resources().await;
    service.blog_posts().await;

    assert_eq!(
        service.api().seen(),
        vec!["visibility:public+tag:-hash-blog", "tag:hash-blog+visibility:public"]
    );
}

#[tokio::test]
async fn test_category_counts_join_tags_and_resources() {
    let categories = service().all_categories().await;

    let gov = categories.iter().find(|c| c.slug == "gov").unwrap();
    assert_eq!(gov.count, 2);
    assert_eq!(gov.name, "政府服務");

    let empty = categories.iter().find(|c| c.slug == "empty").unwrap();
    assert_eq!(empty.count, 0);
}

#[tokio::test]
async fn test_category_fallback_when_only_tags_fail() {
    let mut api = MemoryApi::new(posts(), tags());
    api.fail_tags = true;
    let categories = ContentService::new(api).all_categories().await;

    assert_eq!(categories.len(), 4);
    assert_eq!(categories[3].slug, "government-services");
}

#[tokio::test]
async fn test_category_by_slug() {
    let service = service();

    let category = service.category_by_slug("gov").await.unwrap();
    assert_eq!(category.count, 2);
    assert!(service.category_by_slug("nope").await.is_none());
}

#[tokio::test]
async fn test_search_sends_title_or_excerpt_filter() {
    let service = service();
    service.search_resources("圖書館").await;

    assert_eq!(
        service.api().seen(),
        vec!["(title:~'圖書館',excerpt:~'圖書館')+visibility:public"]
    );
}

#[tokio::test]
async fn test_blank_search_sends_nothing() {
    let service = service();

    assert!(service.search_resources("  ").await.is_empty());
    assert!(service.api().seen().is_empty());
}

#[tokio::test]
async fn test_slug_is_preserved_verbatim() {
    let post = Resource::new("9", "大寫與中文", "Mixed-Case-台灣").with_primary_tag(gov());
    let service = ContentService::new(MemoryApi::new(vec![post], tags()));

    let found = service.resource_by_slug("Mixed-Case-台灣").await.unwrap();
    assert_eq!(found.slug, "Mixed-Case-台灣");
}

#[tokio::test]
async fn test_primary_tag_added_to_tags() {
    let mut post = Resource::new("9", "只有主要標籤", "primary-only");
    post.primary_tag = Some(gov());
    let service = ContentService::new(MemoryApi::new(vec![post], tags()));

    let found = service.resource_by_slug("primary-only").await.unwrap();
    assert!(found.tags.iter().any(|t| t.slug == "gov"));
}

#[tokio::test]
async fn test_related_resources_exclude_current() {
    let service = service();
    let related = service.related_resources("household-online", 4).await;

    assert!(service
        .api()
        .seen()
        .contains(&"visibility:public+tag:gov+slug:-household-online".to_string()));
    assert!(related.iter().all(|r| r.slug != "household-online"));
    assert!(related.len() <= 4);
}

#[tokio::test]
async fn test_related_resources_respect_limit() {
    let related = service().related_resources("household-online", 1).await;
    assert_eq!(related.len(), 1);
}

#[tokio::test]
async fn test_blog_post_by_slug_rejects_resources() {
    let service = service();

    assert!(service.blog_post_by_slug("household-online").await.is_none());

    let post = service.blog_post_by_slug("how-to-library").await.unwrap();
    assert_eq!(post.kind, ContentKind::BlogPost);
    assert_eq!(post.category().unwrap().slug, "blog-教學");
}

#[tokio::test]
async fn test_blog_categories_strip_prefix_and_count() {
    let service = service();
    let categories = service.blog_categories().await;

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "教學");
    assert_eq!(categories[0].slug, "blog-教學");
    assert_eq!(categories[0].description, "使用教學");
    assert_eq!(categories[0].count, 1);
}

#[tokio::test]
async fn test_blog_categories_fall_back_to_post_tags() {
    let mut api = MemoryApi::new(posts(), tags());
    api.fail_tags = true;
    let categories = ContentService::new(api).blog_categories().await;

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "blog-教學");
    assert_eq!(categories[0].count, 1);
}

#[tokio::test]
async fn test_history_filters() {
    let service = service();
    service.resources_by_era("qing").await;
    service.gazetteers(Some("tainan")).await;
    service.all_eras().await;

    assert_eq!(
        service.api().seen(),
        vec![
            "tag:era-qing+visibility:public",
            "tag:gazetteer+tag:tainan+visibility:public",
            "slug:~^'era-'+visibility:public",
        ]
    );
}

#[tokio::test]
async fn test_advanced_search_matches_body_locally() {
    let mut post = Resource::new("7", "清代臺灣府城", "qing-tainan")
        .with_html("<p>府城的城牆與城門</p>");
    post.tags.push(Tag::new("e1", "era-清領時期", "era-qing"));
    let service = ContentService::new(MemoryApi::new(vec![post], tags()));

    let params = SearchParams {
        query: Some("城門".to_string()),
        era: Some("qing".to_string()),
        category: None,
    };
    let results = service.advanced_search(&params).await;

    assert_eq!(results.len(), 1);
    assert_eq!(service.api().seen(), vec!["visibility:public+tag:era-qing"]);
}

fn request(filter: &str, limit: &str, order: &str) -> Request {
    (filter.to_string(), limit.to_string(), order.to_string())
}

/// Three blog posts in the same blog category
fn tutorials() -> Vec<Resource> {
    ["a", "b", "c"]
        .into_iter()
        .map(|slug| {
            Resource::new(slug, format!("教學 {}", slug), slug)
                .with_tag(blog_tag())
                .with_primary_tag(tutorial())
        })
        .collect()
}

#[tokio::test]
async fn test_featured_resources_request() {
    let service = service();
    service.featured_resources(2).await;

    assert_eq!(
        service.api().requests(),
        vec![request("visibility:public+featured:true", "2", "published_at DESC")]
    );
}

#[tokio::test]
async fn test_resources_by_category_request() {
    let service = service();
    let resources = service.resources_by_category("gov").await;

    assert_eq!(
        service.api().requests(),
        vec![request("visibility:public+tag:gov", "all", "published_at DESC")]
    );
    assert_eq!(resources.len(), 3);
}

#[tokio::test]
async fn test_blog_posts_by_category_request() {
    let service = service();
    service.blog_posts_by_category("blog-教學").await;

    assert_eq!(
        service.api().seen(),
        vec!["tag:blog+visibility:public+tag:blog-教學"]
    );
}

#[tokio::test]
async fn test_related_blog_posts_request_and_truncation() {
    let service = ContentService::new(MemoryApi::new(tutorials(), tags()));
    let related = service.related_blog_posts("a", 1).await;

    assert_eq!(
        service.api().requests(),
        vec![request(
            "tag:blog+visibility:public+tag:blog-教學+slug:-a",
            "2",
            "published_at DESC"
        )]
    );
    let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["b"]);
    assert_eq!(related[0].kind, ContentKind::BlogPost);
}

#[tokio::test]
async fn test_related_blog_posts_need_blog_category() {
    let post = Resource::new("x", "無分類文章", "uncategorized").with_tag(blog_tag());
    let service = ContentService::new(MemoryApi::new(vec![post], tags()));

    assert!(service.related_blog_posts("uncategorized", 4).await.is_empty());
    assert!(service.api().requests().is_empty());
}

#[tokio::test]
async fn test_timeline_events_oldest_first() {
    let service = service();
    service.timeline_events().await;

    assert_eq!(
        service.api().requests(),
        vec![request("tag:timeline+visibility:public", "all", "published_at ASC")]
    );
}

#[tokio::test]
async fn test_gallery_request_with_and_without_collection() {
    let service = service();
    service.gallery_resources(Some("old-photos")).await;
    service.gallery_resources(None).await;

    assert_eq!(
        service.api().seen(),
        vec![
            "tag:gallery+tag:old-photos+visibility:public",
            "tag:gallery+visibility:public",
        ]
    );
}

#[tokio::test]
async fn test_all_eras_strip_prefix_from_names() {
    let mut era_tags = tags();
    era_tags.push(TagRecord::new("e1", "era-清領時期", "era-qing").with_description("1683-1895"));
    let service = ContentService::new(MemoryApi::new(Vec::new(), era_tags));

    let eras = service.all_eras().await;

    assert_eq!(eras.len(), 1);
    assert_eq!(eras[0].name, "清領時期");
    assert_eq!(eras[0].slug, "era-qing");
    assert_eq!(eras[0].description, "1683-1895");
    assert_eq!(eras[0].count, 0);
}
