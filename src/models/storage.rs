use crate::error::{StoreError, StoreResult};
use crate::models::Snippet;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_NAME: &str = "snipvault";
pub const DATA_FILE_NAME: &str = "snippets.json";

/// Storage Manager for disk operations
///
/// Owns the location of the snippet file. Reads it in full and rewrites it in
/// full; writes go through a temporary file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct StorageManager {
    database_file: PathBuf,
}

impl StorageManager {
    pub fn new(database_file: impl Into<PathBuf>) -> Self {
        Self {
            database_file: database_file.into(),
        }
    }

    /// Default location under the platform data directory, falling back to the
    /// working directory when no data directory is known.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(".").join(DATA_DIR_NAME))
            .join(DATA_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.database_file
    }

    /// Load every snippet in file order. A missing or blank file is an empty store.
    pub fn load(&self) -> StoreResult<Vec<Snippet>> {
        if !self.database_file.exists() {
            debug!(path = %self.database_file.display(), "no snippet file yet");
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.database_file)?;
        let snippets = decode_document(&bytes, &self.database_file)?;
        debug!(
            path = %self.database_file.display(),
            count = snippets.len(),
            "loaded snippets"
        );
        Ok(snippets)
    }

    pub fn save(&self, snippets: &[Snippet]) -> StoreResult<()> {
        let content = render_document(snippets)?;
        self.write_atomically(content.as_bytes())?;
        debug!(
            path = %self.database_file.display(),
            count = snippets.len(),
            "saved snippets"
        );
        Ok(())
    }

    fn write_atomically(&self, bytes: &[u8]) -> StoreResult<()> {
        let dir = match self.database_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        if let Ok(metadata) = fs::metadata(&self.database_file) {
            temp.as_file().set_permissions(metadata.permissions())?;
        }
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.database_file)
            .map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

/// Decode raw file bytes; content that is not UTF-8 is corrupt, not an I/O failure.
pub fn decode_document(bytes: &[u8], origin: &Path) -> StoreResult<Vec<Snippet>> {
    let content = std::str::from_utf8(bytes).map_err(|err| StoreError::corrupt(origin, err))?;
    parse_document(content, origin)
}

/// Parse the persisted layout: a JSON object keyed by title.
///
/// Records missing optional fields are backfilled with their defaults.
pub fn parse_document(content: &str, origin: &Path) -> StoreResult<Vec<Snippet>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let root: Value =
        serde_json::from_str(content).map_err(|err| StoreError::corrupt(origin, err))?;
    let Value::Object(records) = root else {
        return Err(StoreError::corrupt(
            origin,
            "top level must be an object keyed by snippet title",
        ));
    };

    records
        .into_iter()
        .map(|(title, record)| -> StoreResult<Snippet> {
            if let Value::Object(fields) = &record {
                let missing: Vec<&str> = ["category", "language", "favorite", "created_at"]
                    .into_iter()
                    .filter(|field| !fields.contains_key(*field))
                    .collect();
                if !missing.is_empty() {
                    debug!(%title, ?missing, "backfilling legacy record");
                }
            }

            let mut snippet: Snippet = serde_json::from_value(record)
                .map_err(|err| StoreError::corrupt(origin, format!("snippet '{title}': {err}")))?;
            snippet.title = title;
            Ok(snippet)
        })
        .collect()
}

/// Render snippets in the persisted layout, four-space indented, in order.
pub fn render_document(snippets: &[Snippet]) -> StoreResult<String> {
    let mut records = Map::new();
    for snippet in snippets {
        let record =
            serde_json::to_value(snippet).map_err(|err| StoreError::Serialize(err.to_string()))?;
        records.insert(snippet.title.clone(), record);
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    Value::Object(records)
        .serialize(&mut serializer)
        .map_err(|err| StoreError::Serialize(err.to_string()))?;

    String::from_utf8(buffer).map_err(|err| StoreError::Serialize(err.to_string()))
}
