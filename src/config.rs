//! Configuration for the content layer.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (GHOST_API_URL, GHOST_CONTENT_API_KEY,
//!    GHOST_API_VERSION, ZHOUZHI_SITE_URL)
//! 2. Config file (.zhouzhi/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .zhouzhi/config.yaml
//! - Then the user config directory (~/.config/zhouzhi/config.yaml on Linux)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::adapters::GhostSettings;
use crate::core::{BlogMarker, ContentSettings};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_API_URL: &str = "GHOST_API_URL";
pub const ENV_API_KEY: &str = "GHOST_CONTENT_API_KEY";
pub const ENV_API_VERSION: &str = "GHOST_API_VERSION";
pub const ENV_SITE_URL: &str = "ZHOUZHI_SITE_URL";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub ghost: GhostConfig,
    #[serde(default)]
    pub content: Option<ContentConfig>,
    #[serde(default)]
    pub site: Option<SiteConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GhostConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub version: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub blog_marker: Option<BlogMarker>,
    pub featured_limit: Option<usize>,
    pub related_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Public site identity, used for absolute links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub name: String,
    pub url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "望周知".to_string(),
            url: "https://oldcity-frontend.zeabur.app".to_string(),
        }
    }
}

impl SiteSettings {
    fn link(&self, section: &str, slug: &str) -> String {
        format!("{}/{}/{}", self.url.trim_end_matches('/'), section, slug)
    }

    pub fn resource_url(&self, slug: &str) -> String {
        self.link("resource", slug)
    }

    pub fn category_url(&self, slug: &str) -> String {
        self.link("category", slug)
    }

    pub fn blog_url(&self, slug: &str) -> String {
        self.link("blog", slug)
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub ghost: GhostSettings,
    pub content: ContentSettings,
    pub site: SiteSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".zhouzhi").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("zhouzhi").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge file values and environment over the defaults
fn resolve(
    file: Option<ConfigFile>,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let defaults = GhostSettings::default();
    let (ghost_file, content_file, site_file) = match file {
        Some(f) => (f.ghost, f.content, f.site),
        None => (GhostConfig::default(), None, None),
    };

    // blank values count as unset, whether from env or file
    let set = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let non_empty = |name: &str| set(env(name));

    let ghost = GhostSettings {
        url: non_empty(ENV_API_URL)
            .or(set(ghost_file.url))
            .unwrap_or(defaults.url),
        key: non_empty(ENV_API_KEY)
            .or(set(ghost_file.key))
            .unwrap_or(defaults.key),
        version: non_empty(ENV_API_VERSION)
            .or(set(ghost_file.version))
            .unwrap_or(defaults.version),
        timeout_seconds: ghost_file.timeout_seconds,
    };

    if ghost.key.is_empty() {
        warn!(
            "{} is not set; content requests will be rejected and fallback data served",
            ENV_API_KEY
        );
    }

    let content_defaults = ContentSettings::default();
    let content = match content_file {
        Some(c) => ContentSettings {
            blog_marker: c.blog_marker.unwrap_or(content_defaults.blog_marker),
            featured_limit: c.featured_limit.unwrap_or(content_defaults.featured_limit),
            related_limit: c.related_limit.unwrap_or(content_defaults.related_limit),
        },
        None => content_defaults,
    };

    let site_defaults = SiteSettings::default();
    let (site_name, site_url) = match site_file {
        Some(s) => (s.name, s.url),
        None => (None, None),
    };
    let site = SiteSettings {
        name: site_name.unwrap_or(site_defaults.name),
        url: non_empty(ENV_SITE_URL)
            .or(set(site_url))
            .unwrap_or(site_defaults.url),
    };

    ResolvedConfig {
        ghost,
        content,
        site,
        config_file,
    }
}

/// Load configuration from an explicit file plus the environment
pub fn load_from(path: &Path) -> Result<ResolvedConfig> {
    let file = load_config_file(path)?;
    Ok(resolve(
        Some(file),
        Some(path.to_path_buf()),
        |name| std::env::var(name).ok(),
    ))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    match find_config_file() {
        Some(path) => load_from(&path),
        None => Ok(resolve(None, None, |name| std::env::var(name).ok())),
    }
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
