//! CLI Module
//! Subcommands for scripting plus the interactive menu. Everything here is
//! presentation: it gathers input, calls the store, and renders results.

pub mod commands;
pub mod input;
pub mod menu;
pub mod render;

use crate::config::Settings;
use crate::format::{CodeFormatter, NoopFormatter, WhitespaceFormatter};
use crate::highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
use crate::models::SnippetStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Code snippet manager. Runs the interactive menu when no command is given.
#[derive(Parser, Debug)]
#[command(name = "snipvault", version)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Snippet file to use instead of the configured one
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a snippet, code read from stdin up to the sentinel line
    #[command(visible_alias = "new")]
    Add {
        /// Snippet title, several words are joined with spaces
        #[arg(required = true)]
        title: Vec<String>,

        /// Language name or file extension
        #[arg(short, long, visible_alias = "language")]
        lang: Option<String>,

        /// Category, `Uncategorized` when omitted
        #[arg(long)]
        category: Option<String>,
    },

    /// List all snippets
    #[command(visible_alias = "ls")]
    List,

    /// List favorite snippets
    #[command(visible_alias = "fav")]
    Favorites,

    /// Search titles and code, case-insensitive
    #[command(visible_alias = "find")]
    Search { query: Vec<String> },

    /// Display a snippet with highlighting
    #[command(visible_alias = "view")]
    Show {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Toggle a snippet's favorite flag
    #[command(visible_alias = "toggle")]
    Star {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Change a snippet's category; the last word is the new category
    Categorize {
        #[arg(required = true, value_name = "TITLE... CATEGORY")]
        words: Vec<String>,
    },

    /// Delete a snippet
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Show contributions per month
    #[command(visible_alias = "contributions")]
    Stats {
        year: Option<String>,

        /// 1-12
        month: Option<String>,
    },

    /// Export snippets as JSON, or YAML by extension or `--yaml`
    Export {
        path: PathBuf,

        #[arg(long)]
        yaml: bool,

        /// Only favorite snippets
        #[arg(long)]
        favorites: bool,

        /// Only snippets in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Import snippets, skipping titles that already exist
    Import { path: PathBuf },

    /// List highlighting themes
    Themes,

    /// Interactive menu
    Menu,
}

/// Store plus the presentation strategies the front end applies around it
pub struct Session {
    pub store: SnippetStore,
    pub highlighter: Box<dyn Highlighter>,
    pub formatter: Box<dyn CodeFormatter>,
    pub sentinel: String,
}

impl Session {
    pub fn new(
        store: SnippetStore,
        highlighter: Box<dyn Highlighter>,
        formatter: Box<dyn CodeFormatter>,
        sentinel: impl Into<String>,
    ) -> Self {
        Self {
            store,
            highlighter,
            formatter,
            sentinel: sentinel.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let path = settings.data_file();
        let store = SnippetStore::open(&path)
            .with_context(|| format!("Failed to load snippets from {}", path.display()))?;

        let highlighter: Box<dyn Highlighter> = if settings.highlight {
            Box::new(SyntectHighlighter::new(&settings.theme))
        } else {
            Box::new(PlainHighlighter)
        };
        let formatter: Box<dyn CodeFormatter> = if settings.format {
            Box::new(WhitespaceFormatter)
        } else {
            Box::new(NoopFormatter)
        };

        Ok(Self::new(store, highlighter, formatter, settings.sentinel.clone()))
    }
}

/// Executes the parsed command; with none, the interactive menu runs
pub fn execute_cli<R: BufRead, W: Write>(
    command: Option<Command>,
    session: &mut Session,
    reader: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(command) = command else {
        return menu::run(session, reader, out);
    };

    match command {
        Command::Add {
            title,
            lang,
            category,
        } => commands::add(session, &title, lang, category, reader, out),
        Command::List => commands::list(session, out),
        Command::Favorites => commands::favorites(session, out),
        Command::Search { query } => commands::search(session, &query, out),
        Command::Show { title } => commands::show(session, &title, out),
        Command::Star { title } => commands::toggle_favorite(session, &title, out),
        Command::Categorize { words } => commands::categorize(session, &words, out),
        Command::Delete { title } => commands::delete(session, &title, out),
        Command::Stats { year, month } => {
            commands::contributions(session, year.as_deref(), month.as_deref(), out)
        }
        Command::Export {
            path,
            yaml,
            favorites,
            category,
        } => commands::export(session, &path, yaml, favorites, category, out),
        Command::Import { path } => commands::import(session, &path, out),
        Command::Themes => commands::themes(out),
        Command::Menu => menu::run(session, reader, out),
    }
}
