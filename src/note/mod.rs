//! Markdown note frontmatter
//!
//! Loads a note, exposes its YAML frontmatter as a mapping, merges property
//! diffs into it, and writes the note back. The body is carried through
//! untouched.

use crate::error::{Error, Result};
use serde_json::Value;
use serde_yml::Mapping;
use std::fs;
use std::path::{Path, PathBuf};

/// A Markdown note with an optional YAML frontmatter block
#[derive(Debug, Clone)]
pub struct Note {
    path: PathBuf,
    frontmatter: Mapping,
    body: String,
}

impl Note {
    /// Load a note from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Note(format!("Failed to read note: {}", e)))?;

        let (frontmatter, body) = match split_frontmatter(&content) {
            Some((yaml, body)) => {
                let frontmatter = if yaml.trim().is_empty() {
                    Mapping::new()
                } else {
                    serde_yml::from_str(&yaml)
                        .map_err(|e| Error::Note(format!("Invalid frontmatter: {}", e)))?
                };
                (frontmatter, body)
            }
            None => (Mapping::new(), content),
        };

        Ok(Self {
            path: path.to_path_buf(),
            frontmatter,
            body,
        })
    }

    /// The note's path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The frontmatter as a JSON object, for the property writer
    pub fn frontmatter_json(&self) -> Result<serde_json::Map<String, Value>> {
        let value = serde_json::to_value(&self.frontmatter)
            .map_err(|e| Error::Note(format!("Unsupported frontmatter: {}", e)))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        }
    }

    /// The search term for geocoding this note
    ///
    /// Frontmatter `address` wins, then `title`, then the file stem.
    pub fn search_term(&self) -> String {
        for key in ["address", "title"] {
            if let Some(value) = self.frontmatter.get(key) {
                if let Some(s) = value.as_str() {
                    if !s.is_empty() {
                        return s.to_string();
                    }
                }
            }
        }

        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Merge property entries into the frontmatter
    ///
    /// The entries are a diff: every given key is written. Skip-if-present
    /// decisions happen earlier, in the property writer.
    pub fn merge(&mut self, entries: &serde_json::Map<String, Value>) -> Result<()> {
        for (key, value) in entries {
            let yaml_value = serde_yml::to_value(value)
                .map_err(|e| Error::Note(format!("Unsupported property value: {}", e)))?;
            self.frontmatter
                .insert(serde_yml::Value::String(key.clone()), yaml_value);
        }
        Ok(())
    }

    /// Render the note back to text
    pub fn render(&self) -> Result<String> {
        if self.frontmatter.is_empty() {
            return Ok(self.body.clone());
        }

        let yaml = serde_yml::to_string(&self.frontmatter)
            .map_err(|e| Error::Note(format!("Failed to serialize frontmatter: {}", e)))?;

        Ok(format!("---\n{}---\n{}", yaml, self.body))
    }

    /// Write the note back to its file
    pub fn save(&self) -> Result<()> {
        let content = self.render()?;
        fs::write(&self.path, content)
            .map_err(|e| Error::Note(format!("Failed to write note: {}", e)))?;
        Ok(())
    }
}

/// Split a leading `---` fenced YAML block from the body
///
/// Returns None when the content has no frontmatter fence.
fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let rest = content.strip_prefix("---\n")?;

    // Empty block: the closing fence follows immediately
    if let Some(body) = rest.strip_prefix("---\n") {
        return Some((String::new(), body.to_string()));
    }
    if rest == "---" {
        return Some((String::new(), String::new()));
    }

    if let Some(pos) = rest.find("\n---\n") {
        let yaml = rest[..pos + 1].to_string();
        let body = rest[pos + 5..].to_string();
        return Some((yaml, body));
    }

    // Closing fence at end of file without a trailing newline
    rest.strip_suffix("\n---")
        .map(|yaml| (format!("{}\n", yaml), String::new()))
}
