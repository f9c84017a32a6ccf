//! Category listing pages and tag stubs.
//!
//! Both are thin mappings from posts to outputs:
//!
//! - every category gets a [`CategoryPage`] carrying SEO metadata and its
//!   posts, newest first;
//! - every tag without a stub file gets one, so the site's tag layout can
//!   render a page for it.
//!
//! Nothing here touches the filesystem; [`crate::generate`] writes the results.

use crate::types::Document;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A generated category listing page.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage<'a> {
    pub category: String,
    /// Output directory relative to the site root, e.g. `categories/rust`.
    pub dir: String,
    pub display_name: String,
    pub title: String,
    pub description: String,
    pub post_count: usize,
    /// Newest first.
    pub posts: Vec<&'a Document>,
    pub canonical_url: String,
    pub og_type: &'static str,
    pub og_title: String,
    pub og_description: String,
    pub robots: &'static str,
}

/// Build one page per category, ordered by category name.
pub fn category_pages<'a>(
    posts: &'a [Document],
    categories_dir: &str,
    site_url: &str,
    site_title: &str,
) -> Vec<CategoryPage<'a>> {
    group_by_category(posts)
        .into_iter()
        .map(|(category, posts)| category_page(category, posts, categories_dir, site_url, site_title))
        .collect()
}

/// Posts per category, in post order within each category.
///
/// Categories that cannot be a directory name are left out, like unsafe tags.
pub fn group_by_category(posts: &[Document]) -> BTreeMap<String, Vec<&Document>> {
    let mut groups: BTreeMap<String, Vec<&Document>> = BTreeMap::new();
    for post in posts {
        for category in post.categories() {
            if !is_safe_name(&category) {
                tracing::warn!(category = %category, url = %post.url, "skipping unsafe category name");
                continue;
            }
            groups.entry(category).or_default().push(post);
        }
    }
    groups
}

fn category_page<'a>(
    category: String,
    mut posts: Vec<&'a Document>,
    categories_dir: &str,
    site_url: &str,
    site_title: &str,
) -> CategoryPage<'a> {
    let dir = format!("{}/{}", categories_dir.trim_matches('/'), category);
    let display_name = display_name(&category);
    let post_count = posts.len();
    let description = category_description(&display_name, post_count);

    // Stable: posts sharing a date keep their source order.
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    CategoryPage {
        canonical_url: join_url(site_url, &dir),
        og_title: format!("{display_name} Articles | {site_title}"),
        og_description: description.clone(),
        title: format!("{display_name} Articles"),
        og_type: "website",
        robots: "index, follow",
        category,
        dir,
        display_name,
        description,
        post_count,
        posts,
    }
}

/// `web-development` → `Web Development`. Trailing dashes are dropped.
pub fn display_name(category: &str) -> String {
    let mut words: Vec<&str> = category.split('-').collect();
    while words.last() == Some(&"") {
        words.pop();
    }
    words.into_iter().map(capitalize).collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn category_description(display_name: &str, post_count: usize) -> String {
    let noun = if post_count == 1 { "article" } else { "articles" };
    format!(
        "Browse {post_count} {noun} about {display_name}. Expert tutorials, guides, and insights."
    )
}

/// Join URL parts with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

// ============================================================================
// Tags
// ============================================================================

/// Tags used by `posts` that have no stub yet, first-seen order, no repeats.
///
/// Tags that cannot be a file name are left out.
pub fn missing_tags(posts: &[Document], existing: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .flat_map(Document::tags)
        .filter(|tag| is_safe_name(tag) && !existing.contains(tag))
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Whether a category or tag can be used as a single path component:
/// non-empty, no path separators, no leading dot.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

/// Source for a tag's stub page.
pub fn tag_stub(tag: &str) -> String {
    format!("---\nlayout: tag\ntitle: {tag}\ntag: {tag}\n---\n")
}
