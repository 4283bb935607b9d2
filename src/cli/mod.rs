//! Command-line interface for zhouzhi.
//!
//! Provides commands for browsing resources, categories and blog posts,
//! searching, looking up display styles, and inspecting the resolved
//! configuration. Every command reads straight from the CMS and prints
//! fallback content when it is unreachable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::GhostClient;
use crate::config::{self, ResolvedConfig};
use crate::core::ContentService;
use crate::domain::{Category, Resource};
use crate::presentation::{format_date, sanitize_html, truncate_text, StyleBook};

pub mod history;

/// zhouzhi - Ghost content layer for the 望周知 resource portal
#[derive(Parser, Debug)]
#[command(name = "zhouzhi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to .zhouzhi/config.yaml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Featured resources, categories and latest resources
    Home,

    /// List resources
    Resources {
        /// Only resources in this category (tag slug)
        #[arg(short, long)]
        category: Option<String>,

        /// Only featured resources
        #[arg(short, long)]
        featured: bool,

        /// Maximum number of resources to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show a single resource and its related resources
    Show {
        /// Resource slug
        slug: String,

        /// Print the sanitized html body
        #[arg(short, long)]
        full: bool,
    },

    /// List categories with resource counts
    Categories,

    /// Show one category and its resources
    Category {
        /// Category slug
        slug: String,
    },

    /// Search resource titles and excerpts
    Search {
        /// Search query
        query: String,
    },

    /// List blog posts
    Blog {
        /// Only posts in this blog category (e.g. blog-教學)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List blog categories
    BlogCategories,

    /// Show a single blog post
    BlogPost {
        /// Post slug
        slug: String,

        /// Print the sanitized html body
        #[arg(short, long)]
        full: bool,
    },

    /// Look up the display style for a category, blog category or topic
    Style {
        /// Category name, blog category slug, or topic name
        name: String,

        /// Treat the name as a blog category slug
        #[arg(long, conflicts_with = "topic")]
        blog: bool,

        /// Treat the name as a history topic
        #[arg(long)]
        topic: bool,
    },

    /// Show resolved configuration (debug)
    Config,

    /// Taiwan history content
    History {
        #[command(subcommand)]
        command: history::HistoryCommands,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let styles = StyleBook::standard();

        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::config()?.clone(),
        };

        match self.command {
            Commands::Style { name, blog, topic } => {
                show_style(&styles, &name, blog, topic);
                Ok(())
            }
            Commands::Config => {
                show_config(&cfg);
                Ok(())
            }
            command => {
                let service = build_service(&cfg)?;
                run_content_command(command, &service, &cfg, &styles).await
            }
        }
    }
}

/// Build the content service from resolved configuration
pub fn build_service(cfg: &ResolvedConfig) -> Result<ContentService<GhostClient>> {
    let client = GhostClient::new(cfg.ghost.clone()).context("Failed to create Ghost client")?;
    Ok(ContentService::with_settings(client, cfg.content.clone()))
}

/// Commands that read from the CMS
async fn run_content_command(
    command: Commands,
    service: &ContentService<GhostClient>,
    cfg: &ResolvedConfig,
    styles: &StyleBook,
) -> Result<()> {
    match command {
        Commands::Home => {
            let home = service.home().await;
            println!("Featured\n");
            print_resources(&home.featured, styles);
            println!("\nCategories\n");
            print_categories(&home.categories, styles);
            println!("\nLatest\n");
            print_resources(&home.resources[..home.resources.len().min(10)], styles);
        }
        Commands::Resources {
            category,
            featured,
            limit,
        } => {
            let resources = match (category, featured) {
                (Some(slug), _) => service.resources_by_category(&slug).await,
                (None, true) => service.featured_resources(limit).await,
                (None, false) => service.all_resources().await,
            };
            print_resources(&resources[..resources.len().min(limit)], styles);
            println!("\nTotal: {} resources", resources.len());
        }
        Commands::Show { slug, full } => {
            let limit = service.settings().related_limit;
            let (resource, related) = tokio::join!(
                service.resource_by_slug(&slug),
                service.related_resources(&slug, limit)
            );
            let resource = resource.ok_or_else(|| anyhow::anyhow!("Resource not found: {}", slug))?;
            print_detail(&resource, &cfg.site.resource_url(&resource.slug), full);
            if !related.is_empty() {
                println!("\nRelated\n");
                print_resources(&related, styles);
            }
        }
        Commands::Categories => {
            let categories = service.all_categories().await;
            print_categories(&categories, styles);
        }
        Commands::Category { slug } => {
            let (category, resources) = tokio::join!(
                service.category_by_slug(&slug),
                service.resources_by_category(&slug)
            );
            let category = category.ok_or_else(|| anyhow::anyhow!("Category not found: {}", slug))?;
            let style = styles.category_style(&category.name);
            println!("{} {} ({})", style.icon, category.name, category.count);
            println!("{}", non_empty_or(&category.description, style.description));
            println!("{}\n", cfg.site.category_url(&category.slug));
            print_resources(&resources, styles);
        }
        Commands::Search { query } => {
            let results = service.search_resources(&query).await;
            if results.is_empty() {
                println!("No results found for: {}", query);
                return Ok(());
            }
            println!("Found {} result(s) for \"{}\":\n", results.len(), query);
            print_resources(&results, styles);
        }
        Commands::Blog { category } => match category {
            Some(slug) => {
                let posts = service.blog_posts_by_category(&slug).await;
                let style = styles.blog_category_style(&slug);
                println!("{} {}\n", style.icon, style.name);
                print_blog_posts(&posts, styles);
            }
            None => {
                let blog = service.blog().await;
                print_blog_categories(&blog.categories, styles);
                println!();
                print_blog_posts(&blog.posts, styles);
            }
        },
        Commands::BlogCategories => {
            let categories = service.blog_categories().await;
            print_blog_categories(&categories, styles);
        }
        Commands::BlogPost { slug, full } => {
            let limit = service.settings().related_limit;
            let (post, related) = tokio::join!(
                service.blog_post_by_slug(&slug),
                service.related_blog_posts(&slug, limit)
            );
            let post = post.ok_or_else(|| anyhow::anyhow!("Blog post not found: {}", slug))?;
            print_detail(&post, &cfg.site.blog_url(&post.slug), full);
            if !related.is_empty() {
                println!("\nRelated\n");
                print_blog_posts(&related, styles);
            }
        }
        Commands::History { command } => {
            history::execute(command, service, styles).await?;
        }
        // handled before the service is built
        Commands::Style { .. } | Commands::Config => {}
    }

    Ok(())
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Table of resources: slug, category, title
pub(crate) fn print_resources(resources: &[Resource], styles: &StyleBook) {
    if resources.is_empty() {
        println!("(none)");
        return;
    }

    println!("{:<36} {:<16} {:<40}", "SLUG", "CATEGORY", "TITLE");
    println!("{}", "-".repeat(92));

    for resource in resources {
        let category = resource
            .category()
            .map(|tag| {
                let style = styles.category_style(&tag.name);
                format!("{} {}", style.icon, tag.display_name())
            })
            .unwrap_or_default();
        let star = if resource.featured { "★ " } else { "" };
        println!(
            "{:<36} {:<16} {}{}",
            truncate_text(&resource.slug, 33),
            category,
            star,
            truncate_text(&resource.title, 37)
        );
    }
}

fn print_blog_posts(posts: &[Resource], styles: &StyleBook) {
    if posts.is_empty() {
        println!("(no posts)");
        return;
    }

    println!("{:<36} {:<12} {:<14} {:<40}", "SLUG", "CATEGORY", "PUBLISHED", "TITLE");
    println!("{}", "-".repeat(100));

    for post in posts {
        let style = post
            .category()
            .map(|tag| styles.blog_category_style(&tag.slug))
            .unwrap_or_else(|| styles.blog_category_style(""));
        let published = post
            .published_at
            .map(|d| format_date(&d.to_rfc3339()))
            .unwrap_or_default();
        println!(
            "{:<36} {:<12} {:<14} {}",
            truncate_text(&post.slug, 33),
            format!("{} {}", style.icon, style.name),
            published,
            truncate_text(&post.title, 37)
        );
    }
}

/// Table of categories with icon and count
pub(crate) fn print_categories(categories: &[Category], styles: &StyleBook) {
    if categories.is_empty() {
        println!("(no categories)");
        return;
    }

    println!("{:<28} {:<20} {:>6}  {}", "SLUG", "NAME", "COUNT", "DESCRIPTION");
    println!("{}", "-".repeat(92));

    for category in categories {
        let style = styles.category_style(&category.name);
        println!(
            "{:<28} {:<20} {:>6}  {}",
            category.slug,
            format!("{} {}", style.icon, category.name),
            category.count,
            truncate_text(non_empty_or(&category.description, style.description), 30)
        );
    }
}

fn print_blog_categories(categories: &[Category], styles: &StyleBook) {
    if categories.is_empty() {
        println!("(no blog categories)");
        return;
    }

    for category in categories {
        let style = styles.blog_category_style(&category.slug);
        println!("{} {} ({})  {}", style.icon, category.name, category.count, category.slug);
    }
}

/// Header block for a single post
fn print_detail(resource: &Resource, url: &str, full: bool) {
    println!("  Title: {}", resource.title);
    println!("  Slug: {}", resource.slug);
    println!("  Kind: {}", resource.kind);
    println!("  URL: {}", url);
    if let Some(published) = resource.published_at {
        println!("  Published: {}", format_date(&published.to_rfc3339()));
    }
    println!("  Updated: {}", format_date(&resource.last_modified().to_rfc3339()));
    if let Some(minutes) = resource.reading_time {
        println!("  Reading time: {} min", minutes);
    }
    if !resource.tags.is_empty() {
        let tags: Vec<&str> = resource.tags.iter().map(|t| t.display_name()).collect();
        println!("  Tags: {}", tags.join(", "));
    }
    if !resource.excerpt.is_empty() {
        println!("\n{}", resource.excerpt);
    }

    if full {
        println!("\n{}", sanitize_html(&resource.html));
    } else {
        println!("\nUse --full to show the body");
    }
}

/// Style lookup (no network)
fn show_style(styles: &StyleBook, name: &str, blog: bool, topic: bool) {
    if blog {
        let style = styles.blog_category_style(name);
        println!("{} {} {}  {}", style.icon, style.name, style.color, style.description);
    } else if topic {
        let style = styles.topic_style(name);
        println!("{} {}  {}", style.icon, style.color, style.description);
    } else {
        let style = styles.category_style(name);
        println!("{} {}  {}", style.icon, style.color, style.description);
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Ghost:");
    println!("  URL:      {}", cfg.ghost.url);
    println!(
        "  Key:      {}",
        if cfg.ghost.key.is_empty() { "(not set)" } else { "(set)" }
    );
    println!("  Version:  {}", cfg.ghost.version);
    println!(
        "  Timeout:  {}",
        cfg.ghost
            .timeout_seconds
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!();
    println!("Content:");
    println!("  Blog marker:    {:?}", cfg.content.blog_marker);
    println!("  Featured limit: {}", cfg.content.featured_limit);
    println!("  Related limit:  {}", cfg.content.related_limit);
    println!();
    println!("Site:");
    println!("  Name: {}", cfg.site.name);
    println!("  URL:  {}", cfg.site.url);
}
