use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_LANGUAGE: &str = "unknown";

/// A single stored code fragment.
///
/// The title is the store key. It is not part of the serialized record because
/// the persisted layout keys each record by its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(skip)]
    pub title: String,
    pub code: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default = "today")]
    pub created_at: NaiveDate,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Snippet {
    pub fn new(
        title: String,
        code: String,
        category: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            title,
            code,
            category: category.unwrap_or_else(default_category),
            language: language.unwrap_or_else(default_language),
            favorite: false,
            created_at: today(),
        }
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    /// Number of newline characters in the code.
    ///
    /// This is a raw separator tally, so `"a\nb\nc"` counts 2 and a single
    /// line without a trailing newline counts 0.
    pub fn newline_count(&self) -> usize {
        self.code.matches('\n').count()
    }

    /// Case-insensitive substring match on title or code.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }

    pub fn language_kind(&self) -> SnippetLanguage {
        SnippetLanguage::parse(&self.language)
    }
}

/// Known languages, resolved from the free-form `language` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnippetLanguage {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Html,
    Css,
    Sql,
    Bash,
    Yaml,
    Json,
    Markdown,
    Toml,
    Text,
    Other(String),
}

impl SnippetLanguage {
    /// Resolve a user-entered language name or file extension
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "rust" | "rs" => SnippetLanguage::Rust,
            "javascript" | "js" | "node" => SnippetLanguage::JavaScript,
            "typescript" | "ts" => SnippetLanguage::TypeScript,
            "python" | "py" | "python3" => SnippetLanguage::Python,
            "go" | "golang" => SnippetLanguage::Go,
            "java" => SnippetLanguage::Java,
            "c" | "h" => SnippetLanguage::C,
            "cpp" | "c++" | "cc" | "cxx" | "hpp" => SnippetLanguage::Cpp,
            "c#" | "csharp" | "cs" => SnippetLanguage::CSharp,
            "ruby" | "rb" => SnippetLanguage::Ruby,
            "html" | "htm" => SnippetLanguage::Html,
            "css" => SnippetLanguage::Css,
            "sql" => SnippetLanguage::Sql,
            "bash" | "sh" | "shell" | "zsh" => SnippetLanguage::Bash,
            "yaml" | "yml" => SnippetLanguage::Yaml,
            "json" => SnippetLanguage::Json,
            "markdown" | "md" => SnippetLanguage::Markdown,
            "toml" => SnippetLanguage::Toml,
            "text" | "txt" | "plain" | "" | DEFAULT_LANGUAGE => SnippetLanguage::Text,
            other => SnippetLanguage::Other(other.to_string()),
        }
    }

    /// File extension, also used as the syntax lookup token
    pub fn file_extension(&self) -> &str {
        match self {
            SnippetLanguage::Rust => "rs",
            SnippetLanguage::JavaScript => "js",
            SnippetLanguage::TypeScript => "ts",
            SnippetLanguage::Python => "py",
            SnippetLanguage::Go => "go",
            SnippetLanguage::Java => "java",
            SnippetLanguage::C => "c",
            SnippetLanguage::Cpp => "cpp",
            SnippetLanguage::CSharp => "cs",
            SnippetLanguage::Ruby => "rb",
            SnippetLanguage::Html => "html",
            SnippetLanguage::Css => "css",
            SnippetLanguage::Sql => "sql",
            SnippetLanguage::Bash => "sh",
            SnippetLanguage::Yaml => "yaml",
            SnippetLanguage::Json => "json",
            SnippetLanguage::Markdown => "md",
            SnippetLanguage::Toml => "toml",
            SnippetLanguage::Text => "txt",
            SnippetLanguage::Other(name) => name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SnippetLanguage::Rust => "Rust",
            SnippetLanguage::JavaScript => "JavaScript",
            SnippetLanguage::TypeScript => "TypeScript",
            SnippetLanguage::Python => "Python",
            SnippetLanguage::Go => "Go",
            SnippetLanguage::Java => "Java",
            SnippetLanguage::C => "C",
            SnippetLanguage::Cpp => "C++",
            SnippetLanguage::CSharp => "C#",
            SnippetLanguage::Ruby => "Ruby",
            SnippetLanguage::Html => "HTML",
            SnippetLanguage::Css => "CSS",
            SnippetLanguage::Sql => "SQL",
            SnippetLanguage::Bash => "Bash",
            SnippetLanguage::Yaml => "YAML",
            SnippetLanguage::Json => "JSON",
            SnippetLanguage::Markdown => "Markdown",
            SnippetLanguage::Toml => "TOML",
            SnippetLanguage::Text => "Text",
            SnippetLanguage::Other(name) => name,
        }
    }

    /// Languages whose indentation is whitespace-sensitive enough to expand tabs
    pub fn expands_tabs(&self) -> bool {
        matches!(
            self,
            SnippetLanguage::Python | SnippetLanguage::C | SnippetLanguage::Cpp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snippet_fills_defaults() {
        let snippet = Snippet::new("Hello".into(), "print(1)".into(), None, None);
        assert_eq!(snippet.category, DEFAULT_CATEGORY);
        assert_eq!(snippet.language, DEFAULT_LANGUAGE);
        assert!(!snippet.favorite);
        assert_eq!(snippet.created_at, today());
    }

    #[test]
    fn newline_count_counts_separators() {
        let mut snippet = Snippet::new("t".into(), "a\nb\nc".into(), None, None);
        assert_eq!(snippet.newline_count(), 2);

        snippet.code = "single line".into();
        assert_eq!(snippet.newline_count(), 0);

        snippet.code = "trailing\n".into();
        assert_eq!(snippet.newline_count(), 1);
    }

    #[test]
    fn legacy_record_gets_defaults() {
        let snippet: Snippet = serde_json::from_str(r#"{"code": "x = 1"}"#).unwrap();
        assert_eq!(snippet.code, "x = 1");
        assert_eq!(snippet.category, DEFAULT_CATEGORY);
        assert_eq!(snippet.language, DEFAULT_LANGUAGE);
        assert!(!snippet.favorite);
        assert_eq!(snippet.created_at, today());
    }

    #[test]
    fn created_at_serializes_as_plain_date() {
        let mut snippet = Snippet::new("t".into(), "x".into(), None, Some("python".into()));
        snippet.created_at = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let value = serde_json::to_value(&snippet).unwrap();
        assert_eq!(value["created_at"], "2024-03-07");
        assert!(value.get("title").is_none());
    }

    #[test]
    fn language_aliases_resolve() {
        assert_eq!(SnippetLanguage::parse("py"), SnippetLanguage::Python);
        assert_eq!(SnippetLanguage::parse(" Python "), SnippetLanguage::Python);
        assert_eq!(SnippetLanguage::parse("c++"), SnippetLanguage::Cpp);
        assert_eq!(SnippetLanguage::parse("unknown"), SnippetLanguage::Text);
        assert_eq!(
            SnippetLanguage::parse("zig"),
            SnippetLanguage::Other("zig".to_string())
        );
        assert_eq!(SnippetLanguage::parse("zig").file_extension(), "zig");
        assert_eq!(SnippetLanguage::Cpp.display_name(), "C++");
    }
}
