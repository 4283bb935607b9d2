//! Local category and search computations over an already-fetched list.
//!
//! Both collections are small and live for one request, so every function
//! is a plain linear scan.

use std::collections::BTreeMap;

use crate::adapters::TagRecord;
use crate::domain::{Category, Resource, Tag};

/// Number of resources filed under `slug` (primary tag or any tag)
pub fn count_for_category(resources: &[Resource], slug: &str) -> usize {
    resources.iter().filter(|r| r.has_tag(slug)).count()
}

/// Resources filed under `slug`, order preserved
pub fn filter_by_category(resources: &[Resource], slug: &str) -> Vec<Resource> {
    resources
        .iter()
        .filter(|r| r.has_tag(slug))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title or excerpt
pub fn search_local(resources: &[Resource], query: &str) -> Vec<Resource> {
    let query_lower = query.to_lowercase();

    resources
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&query_lower)
                || r.excerpt.to_lowercase().contains(&query_lower)
        })
        .cloned()
        .collect()
}

/// Like [`search_local`] but also matches the html body
pub fn search_local_with_body(resources: &[Resource], query: &str) -> Vec<Resource> {
    let query_lower = query.to_lowercase();

    resources
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&query_lower)
                || r.excerpt.to_lowercase().contains(&query_lower)
                || r.html.to_lowercase().contains(&query_lower)
        })
        .cloned()
        .collect()
}

/// Turn tag records into categories, counting against `resources`
pub fn categories_from_tags(tags: Vec<TagRecord>, resources: &[Resource]) -> Vec<Category> {
    tags.into_iter()
        .map(|tag| {
            let count = count_for_category(resources, &tag.slug);
            Category {
                id: tag.id,
                name: tag.name,
                slug: tag.slug,
                description: tag.description.unwrap_or_default(),
                count,
            }
        })
        .collect()
}

/// Blog categories derived from the `blog-` tags present on `posts`.
///
/// Names drop the `blog-` prefix; ordered by slug.
pub fn blog_categories_from_posts(posts: &[Resource]) -> Vec<Category> {
    let mut seen: BTreeMap<String, Tag> = BTreeMap::new();
    for tag in posts.iter().flat_map(|p| p.tags.iter()) {
        if tag.is_blog_category() {
            seen.entry(tag.slug.clone()).or_insert_with(|| tag.clone());
        }
    }

    seen.into_values()
        .map(|tag| {
            let count = count_for_category(posts, &tag.slug);
            Category {
                name: tag.display_name().to_string(),
                description: tag.description.clone().unwrap_or_default(),
                id: tag.id,
                slug: tag.slug,
                count,
            }
        })
        .collect()
}
