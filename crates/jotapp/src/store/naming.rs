//! # File Naming
//!
//! Every file the store touches is named from an entry id and title:
//!
//! ```text
//! entries/<ID>_<sanitized-title>.<ext>                 live
//! entries/old/<ID>_<sanitized-title>_<archived>.<ext>  archived
//! ```
//!
//! The part before the extension is the *base name*. The id is everything before the
//! first `_`, which is why ids may not contain one. The title part is lossy and only
//! exists to make directory listings readable; titles are always read back from the
//! metadata file.
//!
//! Ids and archive timestamps share one format, `YYYYMMDDhhmmss` in UTC, so a later id
//! sorts after an earlier one even across daylight-saving changes. Two ids generated
//! within the same second are equal.
//!
//! Names must fit the 255-byte limit most filesystems put on a single component. The
//! longest name is an archived one: a [`MAX_ID_LEN`] id, `_`, a title of at most
//! [`MAX_TITLE_BYTES`], `_`, a 14-digit stamp with a `-N` suffix and the extension.

use crate::error::{JotError, Result};
use chrono::{DateTime, TimeZone, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Upper bound on a caller-supplied id, in bytes.
pub const MAX_ID_LEN: usize = 64;
/// Upper bound on the sanitized title part of a file name, in bytes.
pub const MAX_TITLE_BYTES: usize = 120;
const UNTITLED: &str = "untitled";

/// A fresh identifier from the wall clock.
pub fn generate_id() -> String {
    format_timestamp(&Utc::now())
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Ids end up in file names, so only ASCII alphanumerics and `-` are accepted, up to
/// [`MAX_ID_LEN`] of them.
pub fn validate_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(JotError::InvalidId(id.to_string()))
    }
}

/// Turn a title into something safe to embed in a file name.
///
/// Letters, digits, `-` and `_` survive, whitespace becomes `-`, everything else is
/// dropped. Runs of `-` collapse and the result is cut to [`MAX_TITLE_BYTES`] bytes on
/// a character boundary.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.trim().chars() {
        let mapped = if c.is_alphanumeric() || c == '_' {
            Some(c)
        } else if c == '-' || c.is_whitespace() {
            Some('-')
        } else {
            None
        };
        if let Some(c) = mapped {
            if c == '-' && out.ends_with('-') {
                continue;
            }
            out.push(c);
        }
    }

    let trimmed = truncate_bytes(out.trim_matches('-'), MAX_TITLE_BYTES).trim_end_matches('-');
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

pub fn live_base(id: &str, title: &str) -> String {
    format!("{}_{}", id, sanitize_title(title))
}

/// The id encoded in a live or archived base name.
pub fn id_of(base: &str) -> Option<&str> {
    base.split_once('_')
        .map(|(id, _)| id)
        .filter(|id| !id.is_empty())
}

/// Whether `base` belongs to entry `id`.
pub fn belongs_to(base: &str, id: &str) -> bool {
    id_of(base) == Some(id)
}

/// Archive base name for a live base. `attempt` 0 is the plain form; higher attempts
/// add a `-N` suffix for versions archived within the same second.
pub fn archive_base(live: &str, stamp: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{}_{}", live, stamp)
    } else {
        format!("{}_{}-{}", live, stamp, attempt)
    }
}

/// The archival stamp of an archived base: everything after the last `_`.
pub fn archive_stamp(archived: &str) -> Option<&str> {
    archived
        .rsplit_once('_')
        .map(|(_, stamp)| stamp)
        .filter(|stamp| !stamp.is_empty())
}

/// Sort key for archive stamps so `-10` orders after `-9`.
pub fn stamp_order(stamp: &str) -> (&str, usize) {
    match stamp.split_once('-') {
        Some((ts, n)) => (ts, n.parse().unwrap_or(usize::MAX)),
        None => (stamp, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_fourteen_zero_padded_digits() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_timestamp(&at), "20240305070809");
    }

    #[test]
    fn later_timestamps_sort_after_earlier_ones() {
        let a = format_timestamp(&Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap());
        let b = format_timestamp(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let c = format_timestamp(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap());
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn generated_id_is_valid() {
        let id = generate_id();
        assert_eq!(id.len(), 14);
        assert!(validate_id(&id).is_ok());
    }

    #[test]
    fn generated_id_follows_the_utc_clock() {
        let id = generate_id();
        let at = chrono::NaiveDateTime::parse_from_str(&id, TIMESTAMP_FORMAT).unwrap();
        let drift = Utc::now().naive_utc() - at;
        assert!(drift.num_seconds().abs() <= 2, "id {id} is {drift} off UTC");
    }

    #[test]
    fn rejects_ids_that_would_break_file_names() {
        for bad in ["", "a_b", "../x", "a/b", "a.b", "a b"] {
            assert!(
                matches!(validate_id(bad), Err(JotError::InvalidId(_))),
                "{bad:?} accepted"
            );
        }
        assert!(validate_id("nonexistent-id").is_ok());
        assert!(validate_id("1").is_ok());
    }

    #[test]
    fn rejects_overlong_ids() {
        assert!(validate_id(&"1".repeat(MAX_ID_LEN)).is_ok());
        assert!(matches!(
            validate_id(&"1".repeat(MAX_ID_LEN + 1)),
            Err(JotError::InvalidId(_))
        ));
    }

    #[test]
    fn sanitizes_titles() {
        assert_eq!(sanitize_title("Hello World"), "Hello-World");
        assert_eq!(sanitize_title("a/b\\c:d*e?"), "abcde");
        assert_eq!(sanitize_title("  spaced   out  "), "spaced-out");
        assert_eq!(sanitize_title("keep_under-scores"), "keep_under-scores");
        assert_eq!(sanitize_title("Crème brûlée"), "Crème-brûlée");
    }

    #[test]
    fn empty_or_symbol_only_titles_become_untitled() {
        assert_eq!(sanitize_title(""), "untitled");
        assert_eq!(sanitize_title("/// ???"), "untitled");
    }

    #[test]
    fn long_titles_are_capped_in_bytes() {
        let long = "x".repeat(200);
        assert_eq!(sanitize_title(&long).len(), MAX_TITLE_BYTES);

        // four bytes each; 120 is a multiple of four, 121 bytes would split one
        let wide = sanitize_title(&"\u{1D400}".repeat(64));
        assert_eq!(wide.len(), MAX_TITLE_BYTES);
        assert_eq!(wide.chars().count(), MAX_TITLE_BYTES / 4);

        let ragged = sanitize_title(&format!("a{}", "\u{1D400}".repeat(64)));
        assert!(ragged.len() <= MAX_TITLE_BYTES);
        assert_eq!(ragged.len(), 1 + 29 * 4);
    }

    #[test]
    fn truncation_does_not_leave_a_trailing_dash() {
        let title = format!("{} tail", "x".repeat(MAX_TITLE_BYTES - 1));
        assert_eq!(sanitize_title(&title), "x".repeat(MAX_TITLE_BYTES - 1));
    }

    #[test]
    fn longest_archive_name_fits_a_file_name() {
        let id = "9".repeat(MAX_ID_LEN);
        let live = live_base(&id, &"\u{1D400}".repeat(200));
        let archived = archive_base(&live, "20240101120000", 9999);
        assert!(format!("{archived}.json").len() <= 255);
    }

    #[test]
    fn id_is_everything_before_first_underscore() {
        let base = live_base("20240101120000", "my_title here");
        assert_eq!(base, "20240101120000_my_title-here");
        assert_eq!(id_of(&base), Some("20240101120000"));
        assert!(belongs_to(&base, "20240101120000"));
        assert!(!belongs_to(&base, "2024"));
        assert_eq!(id_of("_orphan"), None);
        assert_eq!(id_of("noseparator"), None);
    }

    #[test]
    fn archive_names_carry_stamp_and_attempt() {
        let live = "1_note";
        assert_eq!(archive_base(live, "20240101120000", 0), "1_note_20240101120000");
        assert_eq!(archive_base(live, "20240101120000", 2), "1_note_20240101120000-2");
        assert_eq!(archive_stamp("1_my_note_20240101120000-2"), Some("20240101120000-2"));
    }

    #[test]
    fn stamp_order_sorts_attempts_numerically() {
        let mut stamps = vec!["20240101120000-10", "20240101120000-9", "20240101120000"];
        stamps.sort_by(|a, b| stamp_order(a).cmp(&stamp_order(b)));
        assert_eq!(
            stamps,
            vec!["20240101120000", "20240101120000-9", "20240101120000-10"]
        );
    }
}
