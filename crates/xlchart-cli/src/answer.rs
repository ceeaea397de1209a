//! Answer-key loading.
//!
//! An answer key is a document whose top level maps chart names to the
//! properties being graded. TOML and JSON files carry the same shape; the
//! file extension picks the parser.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

/// Loads an answer key, dispatching on the file extension.
///
/// `.toml` and `.json` are accepted; anything else is an error rather than a
/// guess, since a mis-parsed key would grade every property wrong.
pub fn load_answer(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read answer file {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let value: Value = match ext.as_deref() {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("failed to parse TOML answer file {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON answer file {}", path.display()))?,
        _ => bail!(
            "unsupported answer file extension: {} (expected .toml or .json)",
            path.display()
        ),
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!(
            "answer file {} must contain a table of charts at the top level",
            path.display()
        ),
    }
}
