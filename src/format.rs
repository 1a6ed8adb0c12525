//! Code formatting applied by the front end before a snippet is stored.

use crate::models::SnippetLanguage;
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[^\n]*\n?").unwrap());
static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

pub trait CodeFormatter {
    fn format(&self, code: &str, language: &str) -> String;
}

/// Leaves code exactly as entered
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFormatter;

impl CodeFormatter for NoopFormatter {
    fn format(&self, code: &str, _language: &str) -> String {
        code.to_string()
    }
}

/// Language-agnostic whitespace cleanup.
///
/// Drops Markdown fence lines, strips trailing whitespace, expands tabs for
/// indentation-sensitive languages, and collapses runs of blank lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceFormatter;

impl CodeFormatter for WhitespaceFormatter {
    fn format(&self, code: &str, language: &str) -> String {
        let code = code.replace("\r\n", "\n");
        let code = FENCE_LINE.replace_all(&code, "");
        let code = TRAILING_WS.replace_all(&code, "");
        let mut code = BLANK_RUNS.replace_all(&code, "\n\n").into_owned();

        if SnippetLanguage::parse(language).expands_tabs() {
            code = code.replace('\t', "    ");
        }

        code.trim_matches('\n').to_string()
    }
}
