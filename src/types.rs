//! Shared types passed between the loader, the generators and the CLI.
//!
//! The generators never touch the filesystem to discover content; they read
//! documents through [`DocumentSource`]. The site loader in [`crate::scan`]
//! is one implementation, tests provide their own.

use crate::front_matter::FrontMatter;
use serde::{Deserialize, Serialize};

/// An authored content unit: a post or a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Site-relative URL, always starting with `/`.
    pub url: String,
    /// Body after the front matter. `None` when the body is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub front_matter: FrontMatter,
    /// Path of the source file relative to the source root.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_path: String,
    /// Publication date as `YYYY-MM-DD` (posts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Document {
    pub fn new(url: impl Into<String>, content: Option<&str>, front_matter: FrontMatter) -> Self {
        Self {
            url: url.into(),
            content: content.map(String::from),
            front_matter,
            ..Default::default()
        }
    }

    /// Display title: the `title` front matter field, falling back to the URL.
    pub fn title(&self) -> String {
        self.front_matter
            .get_str("title")
            .unwrap_or_else(|| self.url.clone())
    }

    /// Categories from `categories` and `category`, without duplicates.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = self.front_matter.get_list("categories");
        for category in self.front_matter.get_list("category") {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Tags from the `tags` field. Empty entries are dropped.
    pub fn tags(&self) -> Vec<String> {
        self.front_matter.get_list("tags")
    }
}

/// Ordered access to a site's documents and its base URL.
pub trait DocumentSource {
    /// Configured site URL. May be empty.
    fn base_url(&self) -> &str;
    /// Posts in enumeration order.
    fn posts(&self) -> &[Document];
    /// Pages in enumeration order.
    fn pages(&self) -> &[Document];
}
