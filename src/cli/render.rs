//! Text rendering shared by the subcommands and the interactive menu.

use crate::highlight::Highlighter;
use crate::models::{ContributionStats, Snippet};
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_COLUMN: usize = 28;
const RULE_WIDTH: usize = 60;

fn margin() -> colored::ColoredString {
    "┃".bright_magenta()
}

pub fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(RULE_WIDTH).bright_magenta())
}

pub fn message<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}  {}", margin(), text)
}

pub fn success<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}  {}", margin(), text.bright_green())
}

pub fn error<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}  {} {}", margin(), "Error:".bright_red().bold(), text)
}

/// Pad or cut `text` to exactly `width` terminal columns
pub fn fit_width(text: &str, width: usize) -> String {
    let text = text.lines().next().unwrap_or("");
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{text}{}", " ".repeat(padding));
    }

    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        fitted.push(ch);
        used += w;
    }
    fitted.push('…');
    used += 1;
    fitted.push_str(&" ".repeat(width.saturating_sub(used)));
    fitted
}

/// One-line summary: index, favorite marker, title, category, language
pub fn snippet_row<W: Write>(out: &mut W, index: usize, snippet: &Snippet) -> io::Result<()> {
    let star = if snippet.favorite { "★" } else { " " };
    writeln!(
        out,
        "{}  {:>3}. {} {} {} {}",
        margin(),
        index.to_string().bright_yellow(),
        star.yellow(),
        fit_width(&snippet.title, TITLE_COLUMN).bright_white().bold(),
        format!("[{}]", snippet.category).bright_blue(),
        snippet.language_kind().display_name().bright_green()
    )
}

pub fn snippet_list<'a, W: Write>(
    out: &mut W,
    heading: &str,
    snippets: impl IntoIterator<Item = &'a Snippet>,
    empty: &str,
) -> io::Result<usize> {
    let snippets: Vec<&Snippet> = snippets.into_iter().collect();
    if snippets.is_empty() {
        message(out, empty)?;
        return Ok(0);
    }

    writeln!(
        out,
        "{}  {} ({})",
        margin(),
        heading.bold(),
        snippets.len()
    )?;
    rule(out)?;
    for (idx, snippet) in snippets.iter().enumerate() {
        snippet_row(out, idx + 1, snippet)?;
    }
    Ok(snippets.len())
}

/// Full view of one snippet, code passed through `highlighter`
pub fn snippet_detail<W: Write>(
    out: &mut W,
    snippet: &Snippet,
    highlighter: &dyn Highlighter,
) -> io::Result<()> {
    let title = if snippet.favorite {
        format!("{} ★", snippet.title)
    } else {
        snippet.title.clone()
    };
    writeln!(
        out,
        "{}  {} {}",
        margin(),
        "SNIPPET".bright_green().bold(),
        title.bold()
    )?;
    rule(out)?;
    writeln!(
        out,
        "{}  {}: {}",
        margin(),
        "Category".bright_blue(),
        snippet.category
    )?;
    writeln!(
        out,
        "{}  {}: {}",
        margin(),
        "Language".bright_yellow(),
        snippet.language_kind().display_name()
    )?;
    writeln!(
        out,
        "{}  {}: {}",
        margin(),
        "Created".bright_cyan(),
        snippet.created_at.format("%Y-%m-%d")
    )?;
    rule(out)?;

    let highlighted = highlighter.highlight(&snippet.code, &snippet.language);
    for line in highlighted.lines() {
        writeln!(out, "{}  {}", margin(), line)?;
    }
    Ok(())
}

pub fn contributions<W: Write>(
    out: &mut W,
    periods: &BTreeMap<String, ContributionStats>,
) -> io::Result<()> {
    if periods.is_empty() {
        return message(out, "No contributions found for the specified period.");
    }

    for (period, stats) in periods {
        writeln!(
            out,
            "{}  {} {}",
            margin(),
            "CONTRIBUTIONS FOR".bold(),
            period.bright_white()
        )?;
        writeln!(out, "{}     Snippets: {}", margin(), stats.snippet_count)?;
        writeln!(out, "{}     Lines of code: {}", margin(), stats.total_code_lines)?;
        let languages: Vec<&str> = stats.languages.iter().map(String::as_str).collect();
        writeln!(out, "{}     Languages used: {}", margin(), languages.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use chrono::NaiveDate;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn fit_width_pads_and_truncates() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdefgh", 5), "abcd…");
        assert_eq!(fit_width("日本語テキスト", 6).width(), 6);
        assert_eq!(fit_width("two\nlines", 5), "two  ");
    }

    #[test]
    fn list_shows_rows_or_empty_message() {
        let mut favorite = Snippet::new("Hello".into(), "x".into(), None, Some("py".into()));
        favorite.favorite = true;

        let text = render(|out| snippet_list(out, "ALL", [&favorite], "none").map(|_| ()));
        assert!(text.contains("ALL (1)"));
        assert!(text.contains("★ Hello"));
        assert!(text.contains("[Uncategorized]"));
        assert!(text.contains("Python"));

        let text = render(|out| snippet_list(out, "ALL", Vec::<&Snippet>::new(), "nothing here").map(|_| ()));
        assert!(text.contains("nothing here"));
    }

    #[test]
    fn detail_prints_every_code_line() {
        let mut snippet = Snippet::new("t".into(), "a\nb".into(), Some("c".into()), None);
        snippet.created_at = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let text = render(|out| snippet_detail(out, &snippet, &PlainHighlighter));
        assert!(text.contains("Created: 2024-02-29"));
        assert!(text.contains("┃  a\n"));
        assert!(text.contains("┃  b\n"));
    }

    #[test]
    fn contributions_list_languages() {
        let mut periods = BTreeMap::new();
        let mut stats = ContributionStats {
            snippet_count: 2,
            total_code_lines: 5,
            ..ContributionStats::default()
        };
        stats.languages.insert("go".into());
        stats.languages.insert("python".into());
        periods.insert("2024-01".to_string(), stats);

        let text = render(|out| contributions(out, &periods));
        assert!(text.contains("2024-01"));
        assert!(text.contains("Lines of code: 5"));
        assert!(text.contains("Languages used: go, python"));

        let text = render(|out| contributions(out, &BTreeMap::new()));
        assert!(text.contains("No contributions"));
    }
}
