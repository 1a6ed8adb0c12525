//! The snippet store: an ordered title → snippet map backed by one JSON file.
//!
//! Every mutating call is applied in memory and saved before it returns. When
//! the save fails the in-memory change is undone, so callers only ever see a
//! state that matches what is on disk.

use crate::error::{StoreError, StoreResult};
use crate::models::contributions::{self, ContributionStats};
use crate::models::{Snippet, StorageManager};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of merging snippets from another source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug)]
pub struct SnippetStore {
    storage: StorageManager,
    snippets: Vec<Snippet>,
}

impl SnippetStore {
    /// Load the store from `path`. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::load(StorageManager::new(path.as_ref()))
    }

    pub fn load(storage: StorageManager) -> StoreResult<Self> {
        let snippets = storage.load()?;
        Ok(Self { storage, snippets })
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.title == title)
    }

    fn position(&self, title: &str) -> StoreResult<usize> {
        self.snippets
            .iter()
            .position(|s| s.title == title)
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    /// Add a new snippet. An existing title is rejected and left untouched.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        code: impl Into<String>,
        category: Option<String>,
        language: Option<String>,
    ) -> StoreResult<&Snippet> {
        let title = title.into();
        if self.get(&title).is_some() {
            return Err(StoreError::DuplicateTitle(title));
        }

        self.snippets
            .push(Snippet::new(title, code.into(), category, language));
        if let Err(err) = self.storage.save(&self.snippets) {
            self.snippets.pop();
            return Err(err);
        }

        let added = &self.snippets[self.snippets.len() - 1];
        info!(title = %added.title, language = %added.language, "snippet added");
        Ok(added)
    }

    pub fn categorize(&mut self, title: &str, category: impl Into<String>) -> StoreResult<()> {
        let index = self.position(title)?;
        let previous = std::mem::replace(&mut self.snippets[index].category, category.into());

        if let Err(err) = self.storage.save(&self.snippets) {
            self.snippets[index].category = previous;
            return Err(err);
        }

        info!(%title, category = %self.snippets[index].category, "snippet categorized");
        Ok(())
    }

    /// Flip the favorite flag and return the new state
    pub fn toggle_favorite(&mut self, title: &str) -> StoreResult<bool> {
        let index = self.position(title)?;
        let favorite = self.snippets[index].toggle_favorite();

        if let Err(err) = self.storage.save(&self.snippets) {
            self.snippets[index].toggle_favorite();
            return Err(err);
        }

        info!(%title, favorite, "favorite toggled");
        Ok(favorite)
    }

    /// Remove a snippet and return it
    pub fn delete(&mut self, title: &str) -> StoreResult<Snippet> {
        let index = self.position(title)?;
        let removed = self.snippets.remove(index);

        if let Err(err) = self.storage.save(&self.snippets) {
            self.snippets.insert(index, removed);
            return Err(err);
        }

        info!(%title, "snippet deleted");
        Ok(removed)
    }

    /// Snippets whose title or code contains `query`, ignoring case.
    /// An empty query matches every snippet.
    pub fn search(&self, query: &str) -> impl Iterator<Item = &Snippet> + '_ {
        let needle = query.to_lowercase();
        self.snippets
            .iter()
            .filter(move |snippet| snippet.matches_lowercase(&needle))
    }

    pub fn list_all(&self) -> impl Iterator<Item = &Snippet> + '_ {
        self.snippets.iter()
    }

    pub fn list_favorites(&self) -> impl Iterator<Item = &Snippet> + '_ {
        self.snippets.iter().filter(|s| s.favorite)
    }

    pub fn contributions_by_period(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> BTreeMap<String, ContributionStats> {
        contributions::aggregate(&self.snippets, year, month)
    }

    /// Append snippets whose titles are not already present, keeping their
    /// own metadata. Everything is saved at once.
    pub fn import(&mut self, incoming: Vec<Snippet>) -> StoreResult<ImportReport> {
        let before = self.snippets.len();
        let mut report = ImportReport::default();

        for snippet in incoming {
            if self.get(&snippet.title).is_some() {
                warn!(title = %snippet.title, "skipping import of existing title");
                report.skipped.push(snippet.title);
                continue;
            }
            report.imported.push(snippet.title.clone());
            self.snippets.push(snippet);
        }

        if report.imported.is_empty() {
            return Ok(report);
        }

        if let Err(err) = self.storage.save(&self.snippets) {
            self.snippets.truncate(before);
            return Err(err);
        }

        info!(
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            "snippets imported"
        );
        Ok(report)
    }
}
