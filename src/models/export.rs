use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::Snippet;
use crate::models::storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    /// Pick the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Export options for customizing what to export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub favorites_only: bool,
    pub category: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            favorites_only: false,
            category: None,
        }
    }
}

impl ExportOptions {
    fn includes(&self, snippet: &Snippet) -> bool {
        if self.favorites_only && !snippet.favorite {
            return false;
        }
        match &self.category {
            Some(category) => snippet.category == *category,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedSnippet {
    pub title: String,
    #[serde(flatten)]
    pub snippet: Snippet,
}

impl ExportedSnippet {
    fn into_snippet(self) -> Snippet {
        let mut snippet = self.snippet;
        snippet.title = self.title;
        snippet
    }
}

/// Export file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub snippets: Vec<ExportedSnippet>,
}

impl ExportData {
    pub fn from_snippets<'a>(
        snippets: impl IntoIterator<Item = &'a Snippet>,
        options: &ExportOptions,
    ) -> Self {
        let snippets = snippets
            .into_iter()
            .filter(|snippet| options.includes(snippet))
            .map(|snippet| ExportedSnippet {
                title: snippet.title.clone(),
                snippet: snippet.clone(),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            snippets,
        }
    }
}

/// Write the selected snippets to `path` and return how many were written
pub fn export_snippets<'a>(
    snippets: impl IntoIterator<Item = &'a Snippet>,
    path: &Path,
    options: &ExportOptions,
) -> StoreResult<usize> {
    let data = ExportData::from_snippets(snippets, options);

    let content = match options.format {
        ExportFormat::Json => serde_json::to_string_pretty(&data)
            .map_err(|err| StoreError::Serialize(err.to_string()))?,
        ExportFormat::Yaml => {
            serde_yaml::to_string(&data).map_err(|err| StoreError::Serialize(err.to_string()))?
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    Ok(data.snippets.len())
}

/// Read snippets from an export document or a raw store file
pub fn read_import_file(path: &Path) -> StoreResult<Vec<Snippet>> {
    let bytes = fs::read(path)?;
    let content = std::str::from_utf8(&bytes).map_err(|err| StoreError::corrupt(path, err))?;

    match ExportFormat::from_path(path) {
        ExportFormat::Yaml => {
            let data: ExportData =
                serde_yaml::from_str(content).map_err(|err| StoreError::corrupt(path, err))?;
            Ok(into_snippets(data))
        }
        ExportFormat::Json => match serde_json::from_str::<ExportData>(content) {
            Ok(data) => Ok(into_snippets(data)),
            Err(export_err) => storage::parse_document(content, path).map_err(|raw_err| {
                match raw_err {
                    StoreError::CorruptData { .. } => StoreError::corrupt(
                        path,
                        format!("not an export document ({export_err}) nor a snippet file"),
                    ),
                    other => other,
                }
            }),
        },
    }
}

fn into_snippets(data: ExportData) -> Vec<Snippet> {
    data.snippets
        .into_iter()
        .map(ExportedSnippet::into_snippet)
        .collect()
}
