pub mod contributions;
pub mod export;
pub mod snippet;
pub mod storage;
pub mod store;

pub use contributions::ContributionStats;
pub use export::{ExportFormat, ExportOptions, export_snippets, read_import_file};
pub use snippet::{Snippet, SnippetLanguage};
pub use storage::StorageManager;
pub use store::{ImportReport, SnippetStore};
