//! # Sitemark
//!
//! Build-time extensions for a static blog: category listing pages, tag stubs
//! and an image sitemap, derived from the site's posts and pages.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      source/  →  Site          (files → documents with front matter and URLs)
//! 2. Generate  Site     →  _site/, tags  (image sitemap, category pages, tag stubs)
//! ```
//!
//! The generators read documents through the [`types::DocumentSource`] trait
//! and never walk the filesystem themselves, so they can be driven by any
//! host that can hand over ordered posts, ordered pages and a base URL.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the source tree, parses front matter, derives URLs |
//! | [`generate`] | Stage 2: writes the image sitemap, category pages and tag stubs |
//! | [`image_sitemap`] | Image extraction, normalization, deduplication and XML rendering |
//! | [`taxonomy`] | Category page metadata and tag stub content |
//! | [`front_matter`] | YAML front matter splitting and lenient field access |
//! | [`config`] | `config.toml` loading, merging with stock defaults, validation |
//! | [`types`] | `Document` and the `DocumentSource` trait |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pattern Matching Over Parsing
//!
//! Images are found with two regular expressions (Markdown `![alt](src)` and
//! HTML `<img src alt>`) over the raw document body. Site content is authored
//! by the site owner, so the corpus is constrained; a full Markdown/HTML
//! parse would cost more than it finds. Odd markup can under- or over-match.
//!
//! ## Templating Is Stripped, Not Evaluated
//!
//! Image paths often carry template expressions (`{{ site.baseurl }}/img/x.png`).
//! They are removed rather than rendered, then the remaining path is resolved
//! against the configured `url`.
//!
//! ## No Global State
//!
//! The "images found" total is returned alongside the records instead of
//! being accumulated in a shared counter, which keeps extraction pure and lets
//! documents be processed in parallel with rayon. Output order is the
//! document enumeration order regardless.

pub mod config;
pub mod front_matter;
pub mod generate;
pub mod image_sitemap;
pub mod output;
pub mod scan;
pub mod taxonomy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
