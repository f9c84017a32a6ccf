//! Site source scanning.
//!
//! Stage 1 of the build. Walks the source directory, splits front matter off
//! every document and derives each document's published URL. The result is a
//! [`Site`], which the generators read through
//! [`DocumentSource`](crate::types::DocumentSource).
//!
//! ## Directory Structure
//!
//! ```text
//! site/                                 # Source root
//! ├── config.toml                       # Site configuration (optional)
//! ├── _posts/                           # Posts: YYYY-MM-DD-slug.md
//! │   ├── 2024-03-01-hello-world.md
//! │   └── 2024-04-12-cats.md
//! ├── _site_tags/                       # Tag stubs (skipped: leading `_`)
//! ├── about.md                          # Page → /about.html
//! ├── blog/index.html                   # Page → /blog/
//! ├── feed.xml                          # Page → /feed.xml
//! └── assets/
//!     ├── css/main.scss                 # Page → /assets/css/main.css
//!     └── img/cat.png                   # Static file (no front matter)
//! ```
//!
//! ## Rules
//!
//! - Only files that open with a `---` front matter block are documents.
//!   Everything else is a static file and ignored.
//! - Names starting with `.` or `_` are skipped, except the posts directory.
//! - Posts must be named `YYYY-MM-DD-slug.(md|markdown|html)`. Their URL is
//!   `/<categories…>/YYYY/MM/DD/slug.html` unless `permalink` is set.
//! - Page URLs mirror the source path: `.md`/`.markdown` become `.html`,
//!   `.scss`/`.sass` become `.css` and `index.html` collapses to its directory.
//!   `permalink` overrides.

use crate::config::{self, SiteConfig};
use crate::front_matter::{self, FrontMatter};
use crate::types::{Document, DocumentSource};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

static POST_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)\.(?:md|markdown|html)$").unwrap()
});

static DATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// A loaded site: configuration plus every post and page.
#[derive(Debug, Serialize)]
pub struct Site {
    pub config: SiteConfig,
    pub posts: Vec<Document>,
    pub pages: Vec<Document>,
}

impl DocumentSource for Site {
    fn base_url(&self) -> &str {
        &self.config.url
    }

    fn posts(&self) -> &[Document] {
        &self.posts
    }

    fn pages(&self) -> &[Document] {
        &self.pages
    }
}

/// Load `config.toml` and scan the site at `root`.
pub fn scan(root: &Path) -> Result<Site, ScanError> {
    scan_excluding(root, &[])
}

/// Like [`scan`], also skipping the given directories (typically the
/// output directory when it lives inside the source root).
pub fn scan_excluding(root: &Path, excluded: &[&Path]) -> Result<Site, ScanError> {
    let config = config::load_config(root)?;
    scan_with_config(root, config, excluded)
}

pub fn scan_with_config(
    root: &Path,
    config: SiteConfig,
    excluded: &[&Path],
) -> Result<Site, ScanError> {
    let posts_root = root.join(&config.posts_dir);
    let posts = if posts_root.is_dir() {
        scan_posts(root, &posts_root)?
    } else {
        Vec::new()
    };
    let pages = scan_pages(root, &posts_root, excluded)?;

    Ok(Site {
        config,
        posts,
        pages,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.') || name.starts_with('_'))
            .unwrap_or(true)
}

fn scan_posts(root: &Path, posts_root: &Path) -> Result<Vec<Document>, ScanError> {
    let mut posts = Vec::new();

    for entry in WalkDir::new(posts_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let Some(caps) = POST_FILENAME_RE.captures(&name) else {
            tracing::debug!(path = %entry.path().display(), "skipping post with unrecognized name");
            continue;
        };
        let Some((front_matter, body)) = read_document(entry.path())? else {
            continue;
        };

        let date = front_matter
            .get_str("date")
            .and_then(|d| iso_date(&d))
            .unwrap_or_else(|| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
        let slug = caps[4].to_string();

        let mut doc = Document {
            url: String::new(),
            content: non_empty(body),
            front_matter,
            source_path: relative_path(root, entry.path()),
            date: Some(date),
        };
        doc.url = post_url(&doc, &slug);
        posts.push(doc);
    }

    posts.sort_by(|a, b| (&a.date, &a.source_path).cmp(&(&b.date, &b.source_path)));
    Ok(posts)
}

fn scan_pages(
    root: &Path,
    posts_root: &Path,
    excluded: &[&Path],
) -> Result<Vec<Document>, ScanError> {
    let mut pages = Vec::new();
    let excluded: Vec<PathBuf> = excluded
        .iter()
        .filter_map(|p| fs::canonicalize(p).ok())
        .collect();
    let is_excluded = |e: &DirEntry| {
        !excluded.is_empty()
            && e.file_type().is_dir()
            && fs::canonicalize(e.path()).is_ok_and(|p| excluded.contains(&p))
    };

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && e.path() != posts_root && !is_excluded(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some((front_matter, body)) = read_document(entry.path())? else {
            continue;
        };

        let source_path = relative_path(root, entry.path());
        let url = front_matter
            .get_str("permalink")
            .map(|p| ensure_leading_slash(&p))
            .unwrap_or_else(|| page_url(&source_path));

        pages.push(Document {
            url,
            content: non_empty(body),
            front_matter,
            source_path,
            date: None,
        });
    }

    Ok(pages)
}

/// Read a file and split off its front matter.
///
/// Returns `Ok(None)` for static files: no front matter, or not UTF-8.
fn read_document(path: &Path) -> Result<Option<(FrontMatter, String)>, ScanError> {
    let bytes = fs::read(path)?;
    if !bytes.starts_with(b"---") {
        return Ok(None);
    }
    let Ok(text) = String::from_utf8(bytes) else {
        return Ok(None);
    };
    let Some((raw, body)) = front_matter::split(&text) else {
        return Ok(None);
    };
    let front_matter = FrontMatter::parse(raw).map_err(|source| ScanError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some((front_matter, body.to_string())))
}

fn non_empty(body: String) -> Option<String> {
    if body.is_empty() { None } else { Some(body) }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn ensure_leading_slash(url: &str) -> String {
    if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{url}")
    }
}

/// First ten characters of a `YYYY-MM-DD…` value.
fn iso_date(value: &str) -> Option<String> {
    DATE_PREFIX_RE
        .captures(value.trim())
        .map(|caps| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// URL of a post: `permalink`, else `/<categories…>/YYYY/MM/DD/slug.html`.
fn post_url(doc: &Document, slug: &str) -> String {
    if let Some(permalink) = doc.front_matter.get_str("permalink") {
        return ensure_leading_slash(&permalink);
    }
    let date = doc.date.as_deref().unwrap_or_default().replace('-', "/");
    let mut url = String::new();
    for category in doc.categories() {
        url.push('/');
        url.push_str(&category);
    }
    format!("{url}/{date}/{slug}.html")
}

/// URL of a page from its source path.
///
/// ```text
/// about.md              → /about.html
/// docs/guide.markdown   → /docs/guide.html
/// index.html            → /
/// blog/index.md         → /blog/
/// assets/css/main.scss  → /assets/css/main.css
/// feed.xml              → /feed.xml
/// ```
pub fn page_url(source_path: &str) -> String {
    let (dir, file) = match source_path.rsplit_once('/') {
        Some((dir, file)) => (format!("/{dir}/"), file),
        None => ("/".to_string(), source_path),
    };
    let output_name = match file.rsplit_once('.') {
        Some((stem, "md" | "markdown")) => format!("{stem}.html"),
        Some((stem, "scss" | "sass")) => format!("{stem}.css"),
        _ => file.to_string(),
    };
    if output_name == "index.html" {
        dir
    } else {
        format!("{dir}{output_name}")
    }
}
