//! Path cleaning, image classification and URL resolution.
//!
//! Every candidate goes through the same steps:
//!
//! ```text
//! "{{ site.baseurl }}/img/dog.jpg"
//!   strip templating     →  "/img/dog.jpg"
//!   classify extension   →  image (.jpg)
//!   resolve              →  "https://example.com/img/dog.jpg"
//! ```
//!
//! Templating is stripped *before* the absolute-URL check, so a templated
//! absolute URL like `{{ cdn }}https://cdn.example/a.png` resolves to
//! `https://cdn.example/a.png` rather than being glued onto the base URL.

use regex::Regex;
use std::sync::LazyLock;

/// Extensions that identify a path as an image (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

static EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{%[^%]+%\}").unwrap());

/// Remove `{{ … }}` expressions and `{% … %}` tags, then trim.
pub fn strip_templating(path: &str) -> String {
    let without_expressions = EXPRESSION_RE.replace_all(path, "");
    TAG_RE
        .replace_all(&without_expressions, "")
        .trim()
        .to_string()
}

/// Whether `path` ends with a known image extension.
pub fn is_image_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let lower = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Join a cleaned relative path onto the base URL.
///
/// One leading `/` is dropped from the path; the base URL is used verbatim.
pub fn resolve(base_url: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    let relative = path.strip_prefix('/').unwrap_or(path);
    format!("{base_url}/{relative}")
}

/// Clean, classify and resolve a raw image path.
///
/// Returns `None` when nothing is left after cleaning or the path does not
/// name an image.
pub fn normalize(base_url: &str, raw: &str) -> Option<String> {
    let cleaned = strip_templating(raw);
    if !is_image_path(&cleaned) {
        return None;
    }
    Some(resolve(base_url, &cleaned))
}
