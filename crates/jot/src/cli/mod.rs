//! # CLI Layer
//!
//! This module is **one possible UI client** for jot, not the application itself.
//!
//! It is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Initializes logging
//! - Parses arguments
//! - Formats output for humans
//!
//! ## Structure
//!
//! - `run()`: parse, set up logging and context, dispatch
//! - `handle_*()`: per-command handlers that call the API and print
//! - `render`: output formatting
//! - `setup`: clap definitions

mod render;
mod setup;

use clap::Parser;
use env_logger::Env;
use jotapp::api::JotApi;
use jotapp::error::{JotError, Result};
use jotapp::init::initialize;
use jotapp::store::fs::FileStore;
use render::{render_entry, render_history, render_list, render_saved, render_search};
use setup::{Cli, Commands};
use std::io::{IsTerminal, Read};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // `id` needs no store
    if let Commands::Id = cli.command {
        println!("{}", jotapp::store::naming::generate_id());
        return Ok(());
    }

    let ctx = initialize(cli.data)?;
    log::debug!(
        "using store at {} with {} content files",
        ctx.root.display(),
        ctx.config.content_ext()
    );
    let api = ctx.api;

    match cli.command {
        Commands::Id => Ok(()),
        Commands::New { title, text } => handle_new(&api, &title.join(" "), text),
        Commands::Edit { id, title, text } => handle_edit(&api, &id, title.as_deref(), text),
        Commands::View { id, html } => handle_view(&api, &id, html),
        Commands::List => handle_list(&api),
        Commands::Search { pattern } => handle_search(&api, &pattern),
        Commands::History { id } => handle_history(&api, &id),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Markdown from `--text`, else from piped stdin.
fn read_body(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(JotError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "no content: pass --text or pipe markdown on stdin",
        )));
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}

fn handle_new(api: &JotApi<FileStore>, title: &str, text: Option<String>) -> Result<()> {
    let markdown = read_body(text)?;
    let entry = api.create(title, &markdown)?;
    print!("{}", render_saved("Created", &entry));
    Ok(())
}

fn handle_edit(
    api: &JotApi<FileStore>,
    id: &str,
    title: Option<&str>,
    text: Option<String>,
) -> Result<()> {
    let markdown = read_body(text)?;
    let entry = api.update(id, title, &markdown)?;
    print!("{}", render_saved("Updated", &entry));
    Ok(())
}

fn handle_view(api: &JotApi<FileStore>, id: &str, html: bool) -> Result<()> {
    if html {
        print!("{}", api.render(id)?);
    } else {
        print!("{}", render_entry(&api.get(id)?));
    }
    Ok(())
}

fn handle_list(api: &JotApi<FileStore>) -> Result<()> {
    print!("{}", render_list(&api.list()?));
    Ok(())
}

fn handle_search(api: &JotApi<FileStore>, pattern: &str) -> Result<()> {
    print!("{}", render_search(&api.search(pattern)?));
    Ok(())
}

fn handle_history(api: &JotApi<FileStore>, id: &str) -> Result<()> {
    print!("{}", render_history(id, &api.history(id)?));
    Ok(())
}
