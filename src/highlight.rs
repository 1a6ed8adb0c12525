//! Terminal syntax highlighting for display. Highlighted text is never stored.

use crate::models::SnippetLanguage;
use once_cell::sync::Lazy;
use syntect::{
    easy::HighlightLines,
    highlighting::ThemeSet,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use tracing::debug;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

pub const DEFAULT_THEME: &str = "base16-ocean.dark";
const RESET: &str = "\x1b[0m";

pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str) -> String;
}

/// Returns code unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> String {
        code.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme: String,
}

impl SyntectHighlighter {
    /// Unknown theme names fall back to the default theme
    pub fn new(theme: &str) -> Self {
        let theme = if THEME_SET.themes.contains_key(theme) {
            theme.to_string()
        } else {
            debug!(%theme, "unknown theme, using default");
            DEFAULT_THEME.to_string()
        };
        Self { theme }
    }

    pub fn available_themes() -> Vec<&'static str> {
        THEME_SET.themes.keys().map(String::as_str).collect()
    }

    fn find_syntax(language: &str) -> &'static SyntaxReference {
        let kind = SnippetLanguage::parse(language);
        SYNTAX_SET
            .find_syntax_by_extension(kind.file_extension())
            .or_else(|| SYNTAX_SET.find_syntax_by_token(language.trim()))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> String {
        let Some(theme) = THEME_SET.themes.get(&self.theme) else {
            return code.to_string();
        };
        let syntax = Self::find_syntax(language);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(err) => {
                    debug!(%err, "highlighting failed, falling back to plain text");
                    return code.to_string();
                }
            }
        }
        output.push_str(RESET);
        output
    }
}
