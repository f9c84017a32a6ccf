//! YAML front matter: splitting it off a source file and reading fields.
//!
//! A file carries front matter when its very first line is `---`. The block
//! runs until the next line that is exactly `---`; everything after that line
//! is the document body.
//!
//! ```text
//! ---
//! title: Hello
//! tags: [rust, web]
//! ---
//! Body text starts here.
//! ```
//!
//! Field lookups are lenient: scalars of any YAML type render as strings and
//! missing or null keys read as `None`. List-valued keys (`categories`,
//! `tags`) accept either a YAML sequence or a space-separated string.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Parsed front matter of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    /// Parse the YAML between the `---` fences. An empty block is an empty map.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(serde::de::Error::custom(format!(
                "front matter must be a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Build front matter from string pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (Value::from(k), Value::from(v)))
            .collect();
        Self(map)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(Value::from(key), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scalar value of `key` rendered as a string.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Null, sequences and mappings read as `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => scalar_string(&tagged.value),
            _ => None,
        }
    }

    /// List value of `key`: a sequence, or a whitespace-separated string.
    ///
    /// Empty entries are dropped.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s.split_whitespace().map(String::from).collect(),
            Some(other) => scalar_string(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Split a source file into its raw front matter block and body.
///
/// Returns `None` when the file does not open with a `---` line or the block
/// is never closed. Such files are static files, not documents.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let rest = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))?;

    // Empty block: closing fence immediately follows the opening one.
    if let Some(body) = strip_fence_line(rest) {
        return Some(("", body));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some((&rest[..start], &rest[offset..]));
        }
    }
    None
}

fn strip_fence_line(s: &str) -> Option<&str> {
    let after = s.strip_prefix("---")?;
    if after.is_empty() {
        return Some(after);
    }
    after
        .strip_prefix('\n')
        .or_else(|| after.strip_prefix("\r\n"))
}
