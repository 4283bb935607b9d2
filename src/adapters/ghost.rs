//! Ghost Content API adapter.
//!
//! Read-only client for `/ghost/api/content/`. Authentication is the
//! content API key passed as the `key` query parameter; the API version is
//! sent in the `Accept-Version` header. One attempt per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{BrowseParams, ContentApi, FetchError, FetchResult, ReadKey, TagRecord};
use crate::domain::Resource;

/// Default CMS host used when `GHOST_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://iwantyouknow.zeabur.app";

/// Content API version the client speaks
pub const DEFAULT_API_VERSION: &str = "v5.0";

/// Connection settings for the Ghost Content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostSettings {
    /// Site URL (without the `/ghost/api/...` suffix)
    pub url: String,

    /// Content API key (may be empty; Ghost then answers 401)
    pub key: String,

    /// Value for the `Accept-Version` header
    pub version: String,

    /// Per-request timeout; `None` leaves the reqwest default (no timeout)
    pub timeout_seconds: Option<u64>,
}

impl Default for GhostSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            key: String::new(),
            version: DEFAULT_API_VERSION.to_string(),
            timeout_seconds: None,
        }
    }
}

/// Ghost Content API client
pub struct GhostClient {
    settings: GhostSettings,
    client: reqwest::Client,
}

/// `{"posts": [...]}`
#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    #[serde(default)]
    posts: Vec<Resource>,
}

/// `{"tags": [...]}`
#[derive(Debug, Deserialize)]
struct TagsEnvelope {
    #[serde(default)]
    tags: Vec<TagRecord>,
}

/// `{"errors": [{"message": "...", "type": "NotFoundError"}]}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<GhostErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GhostErrorItem {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl GhostClient {
    /// Create a new client
    pub fn new(settings: GhostSettings) -> FetchResult<Self> {
        if settings.url.trim().is_empty() {
            return Err(FetchError::Config("Ghost API URL is empty".to_string()));
        }
        base_url(&settings.url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GhostSettings {
        &self.settings
    }

    /// API URL for a content path such as `["posts", "slug", slug]`.
    ///
    /// Each segment is percent-encoded; the result ends with `/`.
    fn api_url(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = base_url(&self.settings.url)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Config(format!("Not a base URL: {}", self.settings.url)))?
            .pop_if_empty()
            .extend(["ghost", "api", "content"])
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// Query pairs shared by every request
    fn query(
        &self,
        params: Option<&BrowseParams>,
        include: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![("key", self.settings.key.clone())];

        if let Some(params) = params {
            query.push(("limit", params.limit.to_string()));
            if let Some(include) = &params.include {
                query.push(("include", include.clone()));
            }
            if let Some(filter) = &params.filter {
                query.push(("filter", filter.to_string()));
            }
            if let Some(order) = &params.order {
                query.push(("order", order.clone()));
            }
        }
        if let Some(include) = include {
            query.push(("include", include.to_string()));
        }

        query
    }

    /// GET a content path and decode the envelope
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> FetchResult<T> {
        let url = self.api_url(segments)?;
        debug!(%url, "Ghost request");

        let response = self
            .client
            .get(url)
            .header("Accept-Version", &self.settings.version)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16(), error_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn base_url(raw: &str) -> FetchResult<Url> {
    Url::parse(raw.trim())
        .map_err(|e| FetchError::Config(format!("Invalid Ghost API URL {}: {}", raw, e)))
}

/// Pull the first Ghost error message out of an error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope
            .errors
            .into_iter()
            .next()
            .map(|e| match e.kind {
                Some(kind) => format!("{}: {}", kind, e.message),
                None => e.message,
            })
            .unwrap_or_default(),
        Err(_) => body.chars().take(200).collect(),
    }
}

#[async_trait]
impl ContentApi for GhostClient {
    fn name(&self) -> &str {
        "ghost"
    }

    #[instrument(
        skip(self, params),
        fields(filter = ?params.filter.as_ref().map(|f| f.to_string()))
    )]
    async fn browse_posts(&self, params: &BrowseParams) -> FetchResult<Vec<Resource>> {
        let query = self.query(Some(params), None);
        let envelope: PostsEnvelope = self.get(&["posts"], &query).await?;
        Ok(envelope.posts)
    }

    #[instrument(skip(self))]
    async fn read_post(&self, key: &ReadKey, include: Option<&str>) -> FetchResult<Resource> {
        let segments = match key {
            ReadKey::Id(id) => vec!["posts", id.as_str()],
            ReadKey::Slug(slug) => vec!["posts", "slug", slug.as_str()],
        };

        let query = self.query(None, include);
        let envelope: PostsEnvelope = self.get(&segments, &query).await?;
        envelope
            .posts
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(key.to_string()))
    }

    #[instrument(skip(self, params))]
    async fn browse_tags(&self, params: &BrowseParams) -> FetchResult<Vec<TagRecord>> {
        let query = self.query(Some(params), None);
        let envelope: TagsEnvelope = self.get(&["tags"], &query).await?;
        Ok(envelope.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Filter;

    fn client(url: &str) -> GhostClient {
        GhostClient::new(GhostSettings {
            url: url.to_string(),
            key: "KEY".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_api_url() {
        let client = client("https://cms.example.com/");
        assert_eq!(
            client.api_url(&["posts"]).unwrap().as_str(),
            "https://cms.example.com/ghost/api/content/posts/"
        );

        let nested = self::client("https://example.com/cms");
        assert_eq!(
            nested.api_url(&["tags"]).unwrap().as_str(),
            "https://example.com/cms/ghost/api/content/tags/"
        );
    }

    #[test]
    fn test_slug_segment_is_encoded() {
        let client = client("https://cms.example.com");
        let url = client.api_url(&["posts", "slug", "a#b?c/d"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://cms.example.com/ghost/api/content/posts/slug/a%23b%3Fc%2Fd/"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = GhostClient::new(GhostSettings {
            url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn test_query_pairs() {
        let client = client("https://cms.example.com");
        let params = BrowseParams::posts()
            .limit(6)
            .filter(Filter::new().eq("featured", "true").public());

        let query = client.query(Some(&params), None);
        assert_eq!(query[0], ("key", "KEY".to_string()));
        assert!(query.contains(&("limit", "6".to_string())));
        assert!(query.contains(&("include", "tags".to_string())));
        assert!(query.contains(&("filter", "featured:true+visibility:public".to_string())));
        assert!(query.contains(&("order", "published_at DESC".to_string())));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = GhostClient::new(GhostSettings {
            url: "  ".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn test_error_message_parsing() {
        let body = r#"{"errors":[{"message":"Resource not found","type":"NotFoundError"}]}"#;
        assert_eq!(error_message(body), "NotFoundError: Resource not found");
        assert_eq!(error_message("gateway down"), "gateway down");
    }
}
