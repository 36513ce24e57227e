//! Terminal formatting. Every function returns the text to print so output can be
//! tested without a terminal.

use chrono::Local;
use colored::Colorize;
use jotapp::model::{ArchivedVersion, Entry, SearchMatch};
use jotapp::render::excerpt;

const EXCERPT_LEN: usize = 48;

fn updated_label(entry: &Entry) -> String {
    entry
        .updated
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_saved(verb: &str, entry: &Entry) -> String {
    format!("{} {}: {}\n", verb, entry.id.bold(), entry.title)
}

pub fn render_entry(entry: &Entry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", entry.title.bold()));
    out.push_str(&format!(
        "{}\n\n",
        format!("{} · updated {}", entry.id, updated_label(entry)).dimmed()
    ));
    out.push_str(&entry.markdown);
    if !entry.markdown.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn render_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries yet.\n".to_string();
    }
    let width = entries
        .iter()
        .map(|e| e.title.chars().count())
        .max()
        .unwrap_or(0)
        .min(40);

    let mut out = String::new();
    for entry in entries {
        let preview = excerpt(&entry.markdown, EXCERPT_LEN);
        out.push_str(&format!(
            "{}  {:<width$}  {}\n",
            entry.id.dimmed(),
            entry.title,
            preview.dimmed(),
            width = width
        ));
    }
    out
}

pub fn render_search(results: &[SearchMatch]) -> String {
    if results.is_empty() {
        return "No matches.\n".to_string();
    }
    let mut out = String::new();
    for result in results {
        out.push_str(&format!("{}  {}\n", result.id.dimmed(), result.title.bold()));
        for line in &result.lines {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}

pub fn render_history(id: &str, versions: &[ArchivedVersion]) -> String {
    if versions.is_empty() {
        return format!("{} has no archived versions.\n", id);
    }
    let mut out = String::new();
    for version in versions {
        out.push_str(&format!("{}  {}\n", version.archived_at, version.name.dimmed()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn entry(id: &str, title: &str, markdown: &str) -> Entry {
        Entry::new(title, markdown).with_id(id)
    }

    #[test]
    fn entry_view_shows_title_id_and_body() {
        plain();
        let out = render_entry(&entry("1", "Groceries", "- eggs"));
        assert_eq!(out, "Groceries\n1 · updated -\n\n- eggs\n");
    }

    #[test]
    fn list_aligns_titles_and_previews() {
        plain();
        let out = render_list(&[
            entry("1", "a", "first line\n\nsecond"),
            entry("2", "longer", "# Heading"),
        ]);
        assert_eq!(out, "1  a       first line\n2  longer  Heading\n");
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(render_list(&[]), "No entries yet.\n");
    }

    #[test]
    fn search_groups_lines_under_entry() {
        plain();
        let out = render_search(&[SearchMatch {
            id: "1".into(),
            title: "t".into(),
            lines: vec!["bar".into(), "baz".into()],
        }]);
        assert_eq!(out, "1  t\n    bar\n    baz\n");
        assert_eq!(render_search(&[]), "No matches.\n");
    }

    #[test]
    fn history_lists_stamps() {
        plain();
        let out = render_history(
            "1",
            &[ArchivedVersion {
                id: "1".into(),
                archived_at: "20240101120000".into(),
                name: "1_t_20240101120000".into(),
            }],
        );
        assert_eq!(out, "20240101120000  1_t_20240101120000\n");
        assert_eq!(render_history("1", &[]), "1 has no archived versions.\n");
    }
}
