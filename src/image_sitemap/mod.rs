//! Image sitemap generation.
//!
//! Walks every post and page of a [`DocumentSource`](crate::types::DocumentSource),
//! pulls out the images each one mentions and renders them in Google's
//! image sitemap format.
//!
//! | Step | Module |
//! |---|---|
//! | **Scan** front matter, Markdown and HTML for candidates | [`scanner`] |
//! | **Normalize** paths to absolute image URLs | [`normalize`] |
//! | **Deduplicate** per document, **collect** across the site | [`collect`] |
//! | **Render** XML | [`xml`] |
//!
//! Everything here is pure: no I/O, no global state. Writing the file is the
//! job of [`crate::generate`].

pub mod collect;
pub mod normalize;
pub mod scanner;
pub mod xml;

pub use collect::{
    ExtractedImages, ImageReference, ImageSitemap, SitemapRecord, collect, dedup_images,
    extract_images,
};
pub use xml::render;

use crate::types::DocumentSource;

/// Collect and render in one step.
pub fn build<S: DocumentSource + ?Sized>(source: &S) -> (ImageSitemap, String) {
    let sitemap = collect(source);
    let xml = render(&sitemap.records);
    (sitemap, xml)
}
