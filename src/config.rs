//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to override.
//!
//! ## Config File Location
//!
//! Place `config.toml` at the root of the site source:
//!
//! ```text
//! site/
//! ├── config.toml              # Overrides stock defaults
//! ├── _posts/
//! │   └── 2024-03-01-hello.md
//! ├── _site_tags/              # Tag stubs (generated)
//! └── about.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! url = ""                  # Base URL of the published site
//! title = ""                # Site title
//! posts_dir = "_posts"      # Post directory, relative to the source root
//!
//! [image_sitemap]
//! enabled = true
//! filename = "sitemap-images.xml"
//!
//! [categories]
//! enabled = true
//! dir = "categories"        # Output subdirectory for category pages
//!
//! [tags]
//! enabled = true
//! dir = "_site_tags"        # Source directory holding tag stubs
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the source root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL prepended to every document and relative image path.
    pub url: String,
    /// Site title, used in category page Open Graph titles.
    pub title: String,
    /// Directory holding posts, relative to the source root.
    pub posts_dir: String,
    pub image_sitemap: ImageSitemapConfig,
    pub categories: CategoriesConfig,
    pub tags: TagsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            posts_dir: "_posts".to_string(),
            image_sitemap: ImageSitemapConfig::default(),
            categories: CategoriesConfig::default(),
            tags: TagsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty()
            && !(self.url.starts_with("http://") || self.url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "url must start with http:// or https:// (got {:?})",
                self.url
            )));
        }
        if self.posts_dir.trim().is_empty() {
            return Err(ConfigError::Validation("posts_dir must not be empty".into()));
        }
        let filename = &self.image_sitemap.filename;
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "image_sitemap.filename must be a plain file name".into(),
            ));
        }
        if self.categories.dir.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "categories.dir must not be empty".into(),
            ));
        }
        if self.tags.dir.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation("tags.dir must not be empty".into()));
        }
        Ok(())
    }
}

/// Image sitemap output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSitemapConfig {
    pub enabled: bool,
    /// File name written at the output root.
    pub filename: String,
}

impl Default for ImageSitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: "sitemap-images.xml".to_string(),
        }
    }
}

/// Category listing page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoriesConfig {
    pub enabled: bool,
    /// Output subdirectory; each category lands in `<dir>/<category>/index.html`.
    pub dir: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "categories".to_string(),
        }
    }
}

/// Tag stub settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    pub enabled: bool,
    /// Source-relative directory holding one `<tag>.md` stub per tag.
    pub dir: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "_site_tags".to_string(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Stock defaults as a TOML table, the base every `config.toml` overrides.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Deep-merge `overlay` into `base`: tables merge per key, anything else
/// in the overlay replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// The user's `config.toml` in `dir` as raw TOML, or `None` without one.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(toml::from_str(&fs::read_to_string(path)?)?))
}

/// Apply the user's overrides to the stock defaults and validate the result.
pub fn resolve_config(
    defaults: toml::Value,
    user: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = user.into_iter().fold(defaults, merge_toml);
    let config = SiteConfig::deserialize(merged)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Sitemark Configuration
# ======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Base URL of the published site, e.g. "https://example.com".
# Prepended to document URLs and to relative image paths.
url = ""

# Site title. Appears in category page Open Graph titles.
title = ""

# Directory holding posts (YYYY-MM-DD-slug.md), relative to the source root.
posts_dir = "_posts"

# ---------------------------------------------------------------------------
# Image sitemap
# ---------------------------------------------------------------------------
[image_sitemap]
enabled = true
# Written at the root of the output directory.
filename = "sitemap-images.xml"

# ---------------------------------------------------------------------------
# Category pages
# ---------------------------------------------------------------------------
[categories]
enabled = true
# Each category is rendered to <dir>/<category>/index.html in the output.
dir = "categories"

# ---------------------------------------------------------------------------
# Tag stubs
# ---------------------------------------------------------------------------
[tags]
enabled = true
# One <tag>.md stub per tag is created here (relative to the source root)
# for every tag that does not have one yet.
dir = "_site_tags"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.url, "");
        assert_eq!(config.posts_dir, "_posts");
        assert!(config.image_sitemap.enabled);
        assert_eq!(config.image_sitemap.filename, "sitemap-images.xml");
        assert_eq!(config.categories.dir, "categories");
        assert_eq!(config.tags.dir, "_site_tags");
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r#"
url = "https://example.com"

[tags]
enabled = false
"#,
        )
        .unwrap();
        assert_eq!(config.url, "https://example.com");
        assert!(!config.tags.enabled);
        // Untouched sections keep their defaults
        assert_eq!(config.tags.dir, "_site_tags");
        assert!(config.categories.enabled);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("baseurl = \"/blog\"");
        assert!(result.is_err());

        let result: Result<SiteConfig, _> = toml::from_str("[image_sitemap]\npath = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn merge_overlay_wins_and_base_preserved() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn resolve_config_overrides_nested_keys_only() {
        let user: toml::Value = toml::from_str("[image_sitemap]\nenabled = false").unwrap();
        let config = resolve_config(stock_defaults_value().unwrap(), Some(user)).unwrap();
        assert!(!config.image_sitemap.enabled);
        assert_eq!(config.image_sitemap.filename, "sitemap-images.xml");

        let typo: toml::Value = toml::from_str("[tags]\ndirectory = \"t\"").unwrap();
        assert!(matches!(
            resolve_config(stock_defaults_value().unwrap(), Some(typo)),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.image_sitemap.filename, "sitemap-images.xml");
    }

    #[test]
    fn load_config_merges_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "url = \"https://blog.example\"\ntitle = \"My Blog\"\n[categories]\ndir = \"topics\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.url, "https://blog.example");
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.categories.dir, "topics");
        assert!(config.categories.enabled);
    }

    #[test]
    fn load_config_reports_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "url = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = SiteConfig {
            url: "example.com".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_sitemap_filename_with_path() {
        let mut config = SiteConfig::default();
        config.image_sitemap.filename = "maps/images.xml".into();
        assert!(config.validate().is_err());
        config.image_sitemap.filename = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_dirs() {
        let mut config = SiteConfig::default();
        config.categories.dir = "/".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.tags.dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.url, defaults.url);
        assert_eq!(config.posts_dir, defaults.posts_dir);
        assert_eq!(config.image_sitemap.filename, defaults.image_sitemap.filename);
        assert_eq!(config.categories.dir, defaults.categories.dir);
        assert_eq!(config.tags.dir, defaults.tags.dir);
        config.validate().unwrap();
    }
}
