//! Artifact generation.
//!
//! Stage 2 of the build. Takes a scanned [`Site`] and writes every enabled
//! artifact:
//!
//! - **Image sitemap** (`<output>/sitemap-images.xml`)
//! - **Category pages** (`<output>/categories/<category>/index.html`)
//! - **Tag stubs** (`<source>/_site_tags/<tag>.md`), for tags without one
//!
//! ## Output Structure
//!
//! ```text
//! _site/
//! ├── sitemap-images.xml
//! └── categories/
//!     ├── rust/
//!     │   └── index.html
//!     └── web-development/
//!         └── index.html
//! ```
//!
//! Generation stops at the first error; artifacts already written stay on
//! disk, but the sitemap is only written once it has been fully rendered.

use crate::image_sitemap;
use crate::scan::Site;
use crate::taxonomy::{self, CategoryPage};
use maud::{DOCTYPE, Markup, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a generation run produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub sitemap: Option<SitemapSummary>,
    pub categories: Vec<CategorySummary>,
    /// Stub files created, relative to the source root.
    pub tags_created: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSummary {
    /// File name at the output root.
    pub filename: String,
    /// Documents with at least one image.
    pub documents: usize,
    /// Markdown/HTML images found, before deduplication.
    pub images_found: usize,
    /// `<image:image>` entries written.
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub display_name: String,
    /// Output file relative to the output root.
    pub path: String,
    pub post_count: usize,
}

/// Write every artifact enabled in the site config.
pub fn generate(site: &Site, source_root: &Path, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    let mut report = BuildReport::default();
    create_dir(output_dir)?;

    if site.config.image_sitemap.enabled {
        report.sitemap = Some(write_image_sitemap(site, output_dir)?);
    }
    if site.config.categories.enabled {
        report.categories = write_category_pages(site, output_dir)?;
    }
    if site.config.tags.enabled {
        report.tags_created = write_tag_stubs(site, source_root)?;
    }

    Ok(report)
}

/// Collect images across the site and write the image sitemap.
pub fn write_image_sitemap(site: &Site, output_dir: &Path) -> Result<SitemapSummary, GenerateError> {
    let filename = &site.config.image_sitemap.filename;
    let (sitemap, xml) = image_sitemap::build(site);

    write(&output_dir.join(filename), &xml)?;
    info!("Generated {} with {} images", filename, sitemap.image_count);

    Ok(SitemapSummary {
        filename: filename.clone(),
        documents: sitemap.records.len(),
        images_found: sitemap.image_count,
        entries: sitemap.entry_count(),
    })
}

/// Render one listing page per category.
pub fn write_category_pages(
    site: &Site,
    output_dir: &Path,
) -> Result<Vec<CategorySummary>, GenerateError> {
    let pages = taxonomy::category_pages(
        &site.posts,
        &site.config.categories.dir,
        &site.config.url,
        &site.config.title,
    );

    let mut summaries = Vec::with_capacity(pages.len());
    for page in &pages {
        let dir = output_dir.join(&page.dir);
        create_dir(&dir)?;
        write(&dir.join("index.html"), &render_category_page(page).into_string())?;

        let path = format!("{}/index.html", page.dir);
        info!("Generated {} ({} posts)", path, page.post_count);
        summaries.push(CategorySummary {
            display_name: page.display_name.clone(),
            path,
            post_count: page.post_count,
        });
    }
    Ok(summaries)
}

/// Create a stub for every tag that does not have one yet.
///
/// Returns the created files relative to the source root.
pub fn write_tag_stubs(site: &Site, source_root: &Path) -> Result<Vec<String>, GenerateError> {
    let tags_dir = source_root.join(&site.config.tags.dir);
    create_dir(&tags_dir)?;

    let existing = existing_tags(&tags_dir)?;
    let mut created = Vec::new();
    for tag in taxonomy::missing_tags(&site.posts, &existing) {
        let rel = format!("{}/{}.md", site.config.tags.dir.trim_end_matches('/'), tag);
        write(&tags_dir.join(format!("{tag}.md")), &taxonomy::tag_stub(&tag))?;
        info!("Created tag stub {}", rel);
        created.push(rel);
    }
    Ok(created)
}

/// Stems of the `.md` files already in the tags directory.
fn existing_tags(tags_dir: &Path) -> Result<HashSet<String>, GenerateError> {
    let entries = fs::read_dir(tags_dir).map_err(|source| GenerateError::Io {
        path: tags_dir.to_path_buf(),
        source,
    })?;
    Ok(entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect())
}

fn create_dir(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// HTML
// ============================================================================

/// Renders a category listing page with its SEO metadata.
fn render_category_page(page: &CategoryPage<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) }
                meta name="description" content=(page.description);
                meta name="robots" content=(page.robots);
                link rel="canonical" href=(page.canonical_url);
                meta property="og:type" content=(page.og_type);
                meta property="og:title" content=(page.og_title);
                meta property="og:description" content=(page.og_description);
                meta property="og:url" content=(page.canonical_url);
            }
            body.category-page data-category=(page.category) {
                header.category-header {
                    h1 { (page.title) }
                    p.category-description { (page.description) }
                }
                ul.post-list {
                    @for post in &page.posts {
                        li {
                            a href=(post.url) { (post.title()) }
                            @if let Some(date) = &post.date {
                                " "
                                time datetime=(date) { (date) }
                            }
                        }
                    }
                }
            }
        }
    }
}
