//! CLI output formatting.
//!
//! Every entity (post, page, category) is shown as a header line with its
//! positional index and title, followed by indented context lines (`Source:`,
//! `URL:`, taxonomy).
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Hello World (2024-03-01)
//!     Source: _posts/2024-03-01-hello-world.md
//!     URL: /news/2024/03/01/hello-world.html
//!     Categories: news
//!     Tags: rust, web
//!
//! Pages
//! 001 About
//!     Source: about.md
//!     URL: /about.html
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! ```text
//! Image sitemap → sitemap-images.xml
//!     4 pages, 7 images (6 found)
//!
//! Categories
//! 001 News → categories/news/index.html (3 posts)
//!
//! Tags
//!     created _site_tags/rust.md
//! ```
//!
//! Format functions are pure and return lines; `print_*` wrappers write them
//! to stdout.

use crate::config;
use crate::generate::BuildReport;
use crate::scan::Site;
use crate::types::Document;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn document_lines(index: usize, doc: &Document) -> Vec<String> {
    let header = match &doc.date {
        Some(date) => format!("{} {} ({})", format_index(index), doc.title(), date),
        None => format!("{} {}", format_index(index), doc.title()),
    };
    let mut lines = vec![
        header,
        format!("{}Source: {}", indent(1), doc.source_path),
        format!("{}URL: {}", indent(1), doc.url),
    ];
    let categories = doc.categories();
    if !categories.is_empty() {
        lines.push(format!("{}Categories: {}", indent(1), categories.join(", ")));
    }
    let tags = doc.tags();
    if !tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), tags.join(", ")));
    }
    lines
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the inventory of a scanned site.
pub fn format_scan_output(site: &Site, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    if site.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in site.posts.iter().enumerate() {
        lines.extend(document_lines(i + 1, post));
    }

    lines.push(String::new());
    lines.push("Pages".to_string());
    if site.pages.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, page) in site.pages.iter().enumerate() {
        lines.extend(document_lines(i + 1, page));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(config::CONFIG_FILE).exists() {
        lines.push(format!("{}{}", indent(1), config::CONFIG_FILE));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }
    if !site.config.url.is_empty() {
        lines.push(format!("{}url: {}", indent(1), site.config.url));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(site: &Site, source_root: &Path) {
    for line in format_scan_output(site, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format what a build produced.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(sitemap) = &report.sitemap {
        lines.push(format!("Image sitemap \u{2192} {}", sitemap.filename));
        lines.push(format!(
            "{}{}, {} ({} found)",
            indent(1),
            plural(sitemap.documents, "page", "pages"),
            plural(sitemap.entries, "image", "images"),
            sitemap.images_found
        ));
    }

    if !report.categories.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Categories".to_string());
        for (i, category) in report.categories.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {} ({})",
                format_index(i + 1),
                category.display_name,
                category.path,
                plural(category.post_count, "post", "posts")
            ));
        }
    }

    if !report.tags_created.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Tags".to_string());
        for path in &report.tags_created {
            lines.push(format!("{}created {}", indent(1), path));
        }
    }

    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
