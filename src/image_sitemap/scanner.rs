//! Candidate image extraction from a document.
//!
//! Three independent rules run additively, in this order:
//!
//! 1. the `image` front matter field,
//! 2. Markdown images, `![alt](src)`,
//! 3. HTML images, `<img src="…" alt="…">`.
//!
//! These are plain pattern matches over the raw text, not a structural parse.
//! Malformed or nested markup can under- or over-match; a Markdown image with
//! a title (`![a](x.png "t")`) captures `x.png "t"` as its source and is later
//! dropped by the extension check.

use crate::front_matter::FrontMatter;
use regex::Regex;
use std::sync::LazyLock;

static MARKDOWN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

// `src` must come before the optional `alt`. Only the tag name is
// case-insensitive. Each value closes on its own quote character, so
// `alt="Tom's cat"` is read whole: groups 1/2 are `src`, 3/4 are `alt`.
static HTML_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(?i:img)\s(?:[^>]*?\s)?src=(?:"([^"]+)"|'([^']+)')(?:[^>]*?\salt=(?:"([^"]*)"|'([^']*)'))?[^>]*>"#,
    )
    .unwrap()
});

/// Which rule produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    FrontMatter,
    Markdown,
    Html,
}

impl CandidateSource {
    /// Whether accepted candidates of this kind count toward the
    /// images-found total.
    pub fn is_counted(self) -> bool {
        !matches!(self, CandidateSource::FrontMatter)
    }
}

/// An image mention before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: String,
    pub caption: Option<String>,
    pub title: Option<String>,
    pub source: CandidateSource,
}

/// Extract every candidate from a document, in rule order.
///
/// Absent or empty content yields only the front matter candidate, if any.
pub fn scan_document(content: Option<&str>, front_matter: &FrontMatter) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    if let Some(image) = front_matter.get_str("image").filter(|s| !s.is_empty()) {
        candidates.push(Candidate {
            path: image,
            caption: front_matter.get_str("description"),
            title: front_matter.get_str("title"),
            source: CandidateSource::FrontMatter,
        });
    }

    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return candidates;
    };

    candidates.extend(scan_markdown(content));
    candidates.extend(scan_html(content));
    candidates
}

/// Markdown image syntax, in document order.
pub fn scan_markdown(content: &str) -> Vec<Candidate> {
    MARKDOWN_IMAGE_RE
        .captures_iter(content)
        .map(|caps| {
            let alt = alt_text(caps.get(1).map(|m| m.as_str()));
            Candidate {
                path: caps[2].to_string(),
                caption: alt.clone(),
                title: alt,
                source: CandidateSource::Markdown,
            }
        })
        .collect()
}

/// HTML `<img>` tags, in document order.
pub fn scan_html(content: &str) -> Vec<Candidate> {
    HTML_IMAGE_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let path = caps.get(1).or_else(|| caps.get(2))?;
            let alt = alt_text(caps.get(3).or_else(|| caps.get(4)).map(|m| m.as_str()));
            Some(Candidate {
                path: path.as_str().to_string(),
                caption: alt.clone(),
                title: alt,
                source: CandidateSource::Html,
            })
        })
        .collect()
}

/// Trimmed alt text; empty alt means no caption or title.
fn alt_text(alt: Option<&str>) -> Option<String> {
    alt.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
