//! Per-document extraction and corpus-wide collection.

use super::normalize::normalize;
use super::scanner::scan_document;
use crate::types::{Document, DocumentSource};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// A resolved image on one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The images of one document, keyed by the document's absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapRecord {
    pub url: String,
    pub images: Vec<ImageReference>,
}

/// Everything collected in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageSitemap {
    pub records: Vec<SitemapRecord>,
    /// Markdown/HTML images accepted across all documents, counted before
    /// deduplication. An image mentioned twice on one page counts twice.
    pub image_count: usize,
}

impl ImageSitemap {
    /// Number of distinct `<image:image>` entries that will be emitted.
    pub fn entry_count(&self) -> usize {
        self.records.iter().map(|r| r.images.len()).sum()
    }
}

/// Result of extracting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedImages {
    /// Resolved, deduplicated images in first-occurrence order.
    pub images: Vec<ImageReference>,
    /// Accepted Markdown/HTML candidates, before deduplication.
    pub found: usize,
}

/// Scan, normalize and deduplicate the images of one document.
pub fn extract_images(
    base_url: &str,
    content: Option<&str>,
    front_matter: &crate::front_matter::FrontMatter,
) -> ExtractedImages {
    let mut images = Vec::new();
    let mut found = 0;

    for candidate in scan_document(content, front_matter) {
        let Some(url) = normalize(base_url, &candidate.path) else {
            continue;
        };
        if candidate.source.is_counted() {
            found += 1;
        }
        images.push(ImageReference {
            url,
            caption: candidate.caption,
            title: candidate.title,
        });
    }

    ExtractedImages {
        images: dedup_images(images),
        found,
    }
}

/// Drop later entries whose URL was already seen, keeping the first.
pub fn dedup_images(images: Vec<ImageReference>) -> Vec<ImageReference> {
    let mut seen = HashSet::new();
    images
        .into_iter()
        .filter(|image| seen.insert(image.url.clone()))
        .collect()
}

/// Pages under `/assets/` and XML outputs (feeds, sitemaps) are never indexed.
pub fn is_excluded_page(url: &str) -> bool {
    url.starts_with("/assets/") || url.ends_with(".xml")
}

/// Collect image records for every post, then every eligible page.
///
/// Documents are extracted in parallel; `collect` on the indexed iterator
/// keeps enumeration order.
pub fn collect<S: DocumentSource + ?Sized>(source: &S) -> ImageSitemap {
    let base_url = source.base_url();
    let documents: Vec<&Document> = source
        .posts()
        .iter()
        .chain(source.pages().iter().filter(|p| !is_excluded_page(&p.url)))
        .collect();

    let extracted: Vec<(&Document, ExtractedImages)> = documents
        .par_iter()
        .map(|doc| {
            let images = extract_images(base_url, doc.content.as_deref(), &doc.front_matter);
            (*doc, images)
        })
        .collect();

    let mut sitemap = ImageSitemap::default();
    for (doc, extracted) in extracted {
        sitemap.image_count += extracted.found;
        if extracted.images.is_empty() {
            continue;
        }
        sitemap.records.push(SitemapRecord {
            url: format!("{base_url}{}", doc.url),
            images: extracted.images,
        });
    }
    sitemap
}
