//! Date token recognition over noisy OCR lines.
//!
//! A line is stripped down to letters, digits, `/`, `-`, `,` and whitespace,
//! split into whitespace tokens, and every window of 1–4 consecutive tokens is
//! tried against each format in `DATE_FORMATS`, format by format. The first
//! window that parses under the earliest format wins.
//!
//! Numeric dates are ambiguous: `03/04/2026` is read as March 4 because the
//! month-first formats are listed before the day-first ones. No locale
//! inference is attempted. Day-first input only comes out right when the
//! month-first reading is invalid (day > 12).

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Tried in this order. Month names match in either case; `%B` also
/// accepts the three-letter abbreviation.
pub const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%m-%d",
];

/// Years accepted from a parsed date. `%Y` alone would also take signed
/// and five-plus digit years.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Longest token window considered as one date.
const MAX_WINDOW: usize = 4;

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9/\-,\s]").expect("valid regex"));

/// First date found on `line`, or `None`. Never fails.
pub fn parse_date_from_line(line: &str) -> Option<NaiveDate> {
    let cleaned = NOISE.replace_all(line, "");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        for start in 0..words.len() {
            let max_len = MAX_WINDOW.min(words.len() - start);
            for len in 1..=max_len {
                let candidate = words[start..start + len].join(" ");
                match NaiveDate::parse_from_str(&candidate, format) {
                    Ok(date) if YEAR_RANGE.contains(&date.year()) => return Some(date),
                    _ => {}
                }
            }
        }
    }
    None
}

/// Canonical rendering, parseable again by `parse_date_from_line`.
pub fn format_canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
