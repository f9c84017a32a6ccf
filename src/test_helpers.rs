//! Shared test utilities for the sitemark test suite.
//!
//! Provides document builders, an in-memory [`DocumentSource`], fixture
//! writing and lookup helpers over a scanned [`Site`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = MemorySource::new("https://example.com")
//!     .with_post(post("/hello", "![cat](/cat.png)"))
//!     .with_page(page("/about.html", ""));
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "_posts/2024-01-01-a.md", "---\ntitle: A\n---\n");
//! let site = scan(tmp.path()).unwrap();
//! let a = find_post(&site, "A");
//! ```

use std::path::Path;

use crate::front_matter::FrontMatter;
use crate::scan::Site;
use crate::types::{Document, DocumentSource};
use serde_yaml::Value;

// =========================================================================
// Document builders
// =========================================================================

/// A post with the given URL and body and no front matter.
pub fn post(url: &str, content: &str) -> Document {
    Document::new(url, Some(content).filter(|c| !c.is_empty()), FrontMatter::default())
}

/// A page with the given URL and body and no front matter.
pub fn page(url: &str, content: &str) -> Document {
    post(url, content)
}

/// A dated post with `categories` and `tags` front matter.
pub fn dated_post(url: &str, date: &str, categories: &[&str], tags: &[&str]) -> Document {
    let mut front_matter = FrontMatter::from_pairs([("title", url)]);
    front_matter.insert("categories", string_list(categories));
    front_matter.insert("tags", string_list(tags));
    Document {
        date: Some(date.to_string()),
        ..Document::new(url, None, front_matter)
    }
}

fn string_list(items: &[&str]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::from(*s)).collect())
}

/// In-memory document source.
#[derive(Debug, Default)]
pub struct MemorySource {
    pub base_url: String,
    pub posts: Vec<Document>,
    pub pages: Vec<Document>,
}

impl MemorySource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_post(mut self, doc: Document) -> Self {
        self.posts.push(doc);
        self
    }

    pub fn with_page(mut self, doc: Document) -> Self {
        self.pages.push(doc);
        self
    }
}

impl DocumentSource for MemorySource {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts(&self) -> &[Document] {
        &self.posts
    }

    fn pages(&self) -> &[Document] {
        &self.pages
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Site lookups, panicking with a clear message on miss
// =========================================================================

/// Find a post by title. Panics if not found.
pub fn find_post<'a>(site: &'a Site, title: &str) -> &'a Document {
    site.posts
        .iter()
        .find(|p| p.title() == title)
        .unwrap_or_else(|| {
            let titles: Vec<String> = site.posts.iter().map(|p| p.title()).collect();
            panic!("post '{title}' not found. Available: {titles:?}")
        })
}

/// Find a page by title. Panics if not found.
pub fn find_page<'a>(site: &'a Site, title: &str) -> &'a Document {
    site.pages
        .iter()
        .find(|p| p.title() == title)
        .unwrap_or_else(|| {
            let titles: Vec<String> = site.pages.iter().map(|p| p.title()).collect();
            panic!("page '{title}' not found. Available: {titles:?}")
        })
}

/// All page URLs in enumeration order.
pub fn page_urls(site: &Site) -> Vec<&str> {
    site.pages.iter().map(|p| p.url.as_str()).collect()
}
