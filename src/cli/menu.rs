//! Interactive numbered menu.
//!
//! Store errors are shown as messages and the menu prompts again; only I/O
//! failures on the console itself end the loop early.

use crate::cli::Session;
use crate::cli::commands::favorite_message;
use crate::cli::input::{self, optional, prompt};
use crate::cli::render;
use crate::error::StoreError;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const MENU: &[(&str, &str)] = &[
    ("1", "Add snippet"),
    ("2", "Categorize snippet"),
    ("3", "Search snippets"),
    ("4", "Show all snippets"),
    ("5", "Exit"),
    ("6", "Toggle favorite"),
    ("7", "Show favorite snippets"),
    ("8", "Show contributions"),
    ("9", "Delete snippet"),
    ("10", "View snippet"),
];

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Choose an action:".bold())?;
    for (key, label) in MENU {
        writeln!(out, "{}. {}", key.bright_yellow(), label)?;
    }
    Ok(())
}

pub fn run<R: BufRead, W: Write>(session: &mut Session, reader: &mut R, out: &mut W) -> Result<()> {
    loop {
        print_menu(out)?;
        let Some(choice) = prompt(reader, out, "> ")? else {
            break;
        };

        let outcome = match choice.trim() {
            "1" => add(session, reader, out),
            "2" => categorize(session, reader, out),
            "3" => search(session, reader, out),
            "4" => {
                render::snippet_list(
                    out,
                    "ALL SNIPPETS",
                    session.store.list_all(),
                    "No snippets saved yet.",
                )?;
                Ok(())
            }
            "5" | "q" | "quit" | "exit" => break,
            "6" => toggle_favorite(session, reader, out),
            "7" => {
                render::snippet_list(
                    out,
                    "FAVORITE SNIPPETS",
                    session.store.list_favorites(),
                    "No favorite snippets found.",
                )?;
                Ok(())
            }
            "8" => contributions(session, reader, out),
            "9" => delete(session, reader, out),
            "10" => view(session, reader, out),
            "" => Ok(()),
            _ => {
                render::error(out, "Invalid choice.")?;
                Ok(())
            }
        };

        if let Err(err) = outcome {
            if err.is::<io::Error>() {
                return Err(err);
            }
            render::error(out, &format!("{err:#}"))?;
        }
    }
    Ok(())
}

/// Prompt that treats end of input as an empty answer
fn ask<R: BufRead, W: Write>(reader: &mut R, out: &mut W, label: &str) -> Result<String> {
    Ok(prompt(reader, out, label)?.unwrap_or_default())
}

/// Titles are trimmed on every action so lookups match what `add` stored
fn ask_title<R: BufRead, W: Write>(reader: &mut R, out: &mut W, label: &str) -> Result<String> {
    match optional(&ask(reader, out, label)?) {
        Some(title) => Ok(title),
        None => Err(StoreError::InvalidInput("title cannot be empty".to_string()).into()),
    }
}

fn add<R: BufRead, W: Write>(session: &mut Session, reader: &mut R, out: &mut W) -> Result<()> {
    let title = ask_title(reader, out, "Title: ")?;
    if session.store.get(&title).is_some() {
        return Err(StoreError::DuplicateTitle(title).into());
    }

    writeln!(
        out,
        "Enter your code snippet. End with {} on its own line",
        session.sentinel
    )?;
    let code = input::read_code_block(reader, &session.sentinel)?;
    let language = optional(&ask(reader, out, "Language: ")?);
    let category = optional(&ask(reader, out, "Category (optional): ")?);

    let code = session
        .formatter
        .format(&code, language.as_deref().unwrap_or_default());
    let snippet = session.store.add(title, code, category, language)?;
    render::success(out, &format!("Snippet '{}' added successfully!", snippet.title))?;
    Ok(())
}

fn categorize<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    out: &mut W,
) -> Result<()> {
    let title = ask_title(reader, out, "Title of snippet to categorize: ")?;
    let category = ask(reader, out, "New category: ")?;
    session.store.categorize(&title, category)?;
    render::success(out, "Snippet category updated!")?;
    Ok(())
}

fn search<R: BufRead, W: Write>(session: &mut Session, reader: &mut R, out: &mut W) -> Result<()> {
    let query = ask(reader, out, "Search query: ")?;
    let results: Vec<String> = session
        .store
        .search(&query)
        .map(|s| s.title.clone())
        .collect();

    render::snippet_list(
        out,
        &format!("SEARCH RESULTS FOR '{query}'"),
        results.iter().filter_map(|t| session.store.get(t)),
        "No snippets found matching your query.",
    )?;
    if results.is_empty() {
        return Ok(());
    }

    let choice = ask(reader, out, "Enter number to view or manage (or press Enter to go back): ")?;
    let choice = choice.trim();
    if choice.is_empty() || choice == "0" {
        return Ok(());
    }
    let index = choice
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=results.len()).contains(n))
        .ok_or_else(|| StoreError::InvalidInput(format!("'{choice}' is not a listed number")))?;

    let title = &results[index - 1];
    loop {
        let Some(action) = prompt(
            reader,
            out,
            "Enter 'f' to toggle favorite, 'v' to view code, or 'b' to go back: ",
        )?
        else {
            return Ok(());
        };

        match action.trim().to_lowercase().as_str() {
            "f" => {
                let favorite = session.store.toggle_favorite(title)?;
                render::success(out, &favorite_message(title, favorite))?;
                return Ok(());
            }
            "v" => {
                if let Some(snippet) = session.store.get(title) {
                    render::snippet_detail(out, snippet, session.highlighter.as_ref())?;
                }
                return Ok(());
            }
            "b" | "" => return Ok(()),
            _ => render::error(out, "Invalid action.")?,
        }
    }
}

fn toggle_favorite<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    out: &mut W,
) -> Result<()> {
    let title = ask_title(reader, out, "Title of snippet to toggle favorite: ")?;
    let favorite = session.store.toggle_favorite(&title)?;
    render::success(out, &favorite_message(&title, favorite))?;
    Ok(())
}

fn contributions<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    out: &mut W,
) -> Result<()> {
    let year = input::parse_year(&ask(reader, out, "Enter year (optional, press Enter to skip): ")?)?;
    let month = input::parse_month(&ask(reader, out, "Enter month (1-12, optional): ")?)?;
    render::contributions(out, &session.store.contributions_by_period(year, month))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(session: &mut Session, reader: &mut R, out: &mut W) -> Result<()> {
    let title = ask_title(reader, out, "Title of snippet to delete: ")?;
    session.store.delete(&title)?;
    render::success(out, &format!("Snippet '{title}' deleted successfully."))?;
    Ok(())
}

fn view<R: BufRead, W: Write>(session: &mut Session, reader: &mut R, out: &mut W) -> Result<()> {
    let title = ask_title(reader, out, "Title of snippet to view: ")?;
    let snippet = session
        .store
        .get(&title)
        .ok_or_else(|| StoreError::NotFound(title.clone()))?;
    render::snippet_detail(out, snippet, session.highlighter.as_ref())?;
    Ok(())
}
