use std::path::Path;

use anyhow::Context;

use crate::catalog::model::{Catalog, CatalogEntry};
use crate::foundation::error::{SpriteError, SpriteResult};

impl Catalog {
    /// Parse a catalog from a single JSON object keyed by entry identifier.
    ///
    /// Object order is preserved and becomes the catalog's iteration order.
    pub fn from_json_str(json: &str) -> SpriteResult<Self> {
        let root: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SpriteError::serde(e.to_string()))?;
        let serde_json::Value::Object(map) = root else {
            return Err(SpriteError::catalog(
                "catalog JSON must be an object keyed by entry id",
            ));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (id, value) in map {
            entries.push(parse_entry(&id, value)?);
        }
        Ok(Self::from_entries(entries))
    }

    /// Load a catalog from a JSON file, or from a directory of per-entry `*.json` files.
    ///
    /// Directory entries are keyed by file stem and read in sorted file-name order.
    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::from_dir(path);
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    fn from_dir(dir: &Path) -> SpriteResult<Self> {
        let mut files = Vec::new();
        let read_dir = std::fs::read_dir(dir)
            .with_context(|| format!("read catalog dir '{}'", dir.display()))?;
        for entry in read_dir {
            let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
            let p = entry.path();
            if p.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(p);
            }
        }
        files.sort();

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let id = file
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    SpriteError::catalog(format!("non-utf8 file name '{}'", file.display()))
                })?
                .to_string();
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("read catalog entry '{}'", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&json)
                .map_err(|e| SpriteError::serde(format!("{}: {e}", file.display())))?;
            entries.push(parse_entry(&id, value)?);
        }
        Ok(Self::from_entries(entries))
    }
}

fn parse_entry(id: &str, value: serde_json::Value) -> SpriteResult<(String, CatalogEntry)> {
    let entry: CatalogEntry = serde_json::from_value(value)
        .map_err(|e| SpriteError::catalog(format!("entry '{id}': {e}")))?;
    Ok((id.to_string(), entry))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/load.rs"]
mod tests;
