use crate::cli::Session;
use crate::cli::input::{self, optional};
use crate::cli::render;
use crate::error::StoreError;
use crate::highlight::SyntectHighlighter;
use crate::models::{ExportFormat, ExportOptions, export_snippets, read_import_file};
use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use std::path::Path;

/// Title words joined with spaces, trimmed the same way the menu trims input
pub(crate) fn title_from(words: &[String]) -> Result<String> {
    match optional(&words.join(" ")) {
        Some(title) => Ok(title),
        None => bail!(StoreError::InvalidInput("title cannot be empty".to_string())),
    }
}

pub fn add<R: BufRead, W: Write>(
    session: &mut Session,
    title: &[String],
    language: Option<String>,
    category: Option<String>,
    reader: &mut R,
    out: &mut W,
) -> Result<()> {
    let title = title_from(title)?;
    let language = language.and_then(|l| optional(&l));
    let category = category.and_then(|c| optional(&c));

    if session.store.get(&title).is_some() {
        bail!(StoreError::DuplicateTitle(title));
    }

    let code = input::read_code_block(reader, &session.sentinel)?;
    let code = session
        .formatter
        .format(&code, language.as_deref().unwrap_or_default());
    session.store.add(title.clone(), code, category, language)?;

    render::success(out, &format!("Snippet '{title}' added successfully!"))?;
    Ok(())
}

pub fn list<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    render::snippet_list(
        out,
        "ALL SNIPPETS",
        session.store.list_all(),
        "No snippets saved yet.",
    )?;
    Ok(())
}

pub fn favorites<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    render::snippet_list(
        out,
        "FAVORITE SNIPPETS",
        session.store.list_favorites(),
        "No favorite snippets found.",
    )?;
    Ok(())
}

pub fn search<W: Write>(session: &Session, query: &[String], out: &mut W) -> Result<()> {
    let query = query.join(" ");
    render::snippet_list(
        out,
        &format!("SEARCH RESULTS FOR '{query}'"),
        session.store.search(&query),
        "No snippets found matching your query.",
    )?;
    Ok(())
}

pub fn show<W: Write>(session: &Session, title: &[String], out: &mut W) -> Result<()> {
    let title = title_from(title)?;

    match session.store.get(&title) {
        Some(snippet) => {
            render::snippet_detail(out, snippet, session.highlighter.as_ref())?;
            Ok(())
        }
        None => {
            let suggestions: Vec<_> = session.store.search(&title).take(5).collect();
            if !suggestions.is_empty() {
                render::snippet_list(out, "DID YOU MEAN", suggestions, "")?;
            }
            Err(StoreError::NotFound(title).into())
        }
    }
}

pub fn toggle_favorite<W: Write>(
    session: &mut Session,
    title: &[String],
    out: &mut W,
) -> Result<()> {
    let title = title_from(title)?;
    let favorite = session.store.toggle_favorite(&title)?;
    render::success(out, &favorite_message(&title, favorite))?;
    Ok(())
}

pub(crate) fn favorite_message(title: &str, favorite: bool) -> String {
    if favorite {
        format!("Snippet '{title}' marked as favorite")
    } else {
        format!("Snippet '{title}' removed from favorites")
    }
}

/// Everything before the last word is the title, the last word the category
pub fn categorize<W: Write>(session: &mut Session, words: &[String], out: &mut W) -> Result<()> {
    let Some((category, title)) = words.split_last().filter(|(_, title)| !title.is_empty())
    else {
        bail!(StoreError::InvalidInput(
            "usage: snipvault categorize <TITLE>... <CATEGORY>".to_string()
        ));
    };
    let title = title_from(title)?;
    session.store.categorize(&title, category.as_str())?;
    render::success(out, "Snippet category updated!")?;
    Ok(())
}

pub fn delete<W: Write>(session: &mut Session, title: &[String], out: &mut W) -> Result<()> {
    let title = title_from(title)?;
    session.store.delete(&title)?;
    render::success(out, &format!("Snippet '{title}' deleted successfully."))?;
    Ok(())
}

pub fn contributions<W: Write>(
    session: &Session,
    year: Option<&str>,
    month: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let year = input::parse_year(year.unwrap_or_default())?;
    let month = input::parse_month(month.unwrap_or_default())?;
    render::contributions(out, &session.store.contributions_by_period(year, month))?;
    Ok(())
}

pub fn export<W: Write>(
    session: &Session,
    path: &Path,
    yaml: bool,
    favorites_only: bool,
    category: Option<String>,
    out: &mut W,
) -> Result<()> {
    let format = if yaml {
        ExportFormat::Yaml
    } else {
        ExportFormat::from_path(path)
    };
    let options = ExportOptions {
        format,
        favorites_only,
        category,
    };

    let written = export_snippets(session.store.list_all(), path, &options)?;
    render::success(
        out,
        &format!("Exported {written} snippets to {}", path.display()),
    )?;
    Ok(())
}

pub fn import<W: Write>(session: &mut Session, path: &Path, out: &mut W) -> Result<()> {
    let incoming = read_import_file(path)?;
    let report = session.store.import(incoming)?;

    render::success(
        out,
        &format!("Imported {} snippets", report.imported.len()),
    )?;
    for title in &report.skipped {
        render::message(out, &format!("Skipped '{title}': title already exists"))?;
    }
    Ok(())
}

pub fn themes<W: Write>(out: &mut W) -> Result<()> {
    for theme in SyntectHighlighter::available_themes() {
        render::message(out, theme)?;
    }
    Ok(())
}
