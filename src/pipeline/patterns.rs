//! Token location primitives over recognized text.
//!
//! Everything here returns `Option`: a pattern, label or date that is not on
//! the page is the normal case, not an error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::dates::parse_date_from_line;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

/// SEVIS identifier: `N` followed by 10 digits.
pub static SEVIS_ID: LazyLock<Regex> = LazyLock::new(|| compile(r"N\d{10}"));
/// EAD card number, e.g. `SRC-21-123-4567`.
pub static EAD_CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[A-Z]{3}-\d{2}-\d{3}-\d{4}"));
/// EAD eligibility category, e.g. `C03B`.
pub static EAD_CATEGORY: LazyLock<Regex> = LazyLock::new(|| compile(r"C\d{2}[A-Z]?"));
pub static PASSPORT_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Z]{1,2}\d{7,9}"));
/// Visa class, e.g. `F-1`, `H-1B`.
pub static VISA_TYPE: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Z]-\d[A-Z]?"));
/// I-94 admission record number.
pub static ADMISSION_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"\d{11}"));
/// USCIS receipt number: service-center prefix plus 10 digits.
pub static RECEIPT_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Z]{3}\d{10}"));

/// First substring of `text` matching `pattern`.
pub fn find_first(text: &str, pattern: &Regex) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

fn contains_ignore_case(line: &str, needle_lower: &str) -> bool {
    line.to_lowercase().contains(needle_lower)
}

/// Value attached to `label`, matched case-insensitively.
///
/// A non-empty value after the first colon on any line containing the label
/// is preferred; otherwise the trimmed line right after the first label line
/// that has a non-empty successor.
pub fn value_after_label(text: &str, label: &str) -> Option<String> {
    let needle = label.to_lowercase();
    let lines: Vec<&str> = text.lines().collect();

    let colon_value = lines
        .iter()
        .filter(|line| contains_ignore_case(line, &needle))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
        .find(|value| !value.is_empty());
    if let Some(value) = colon_value {
        return Some(value.to_string());
    }

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_ignore_case(line, &needle))
        .filter_map(|(index, _)| lines.get(index + 1))
        .map(|next| next.trim())
        .find(|next| !next.is_empty())
        .map(str::to_string)
}

/// Date on the first line containing `label`, or on the line after it.
pub fn date_near(text: &str, label: &str) -> Option<NaiveDate> {
    let needle = label.to_lowercase();
    let lines: Vec<&str> = text.lines().collect();
    let index = lines
        .iter()
        .position(|line| contains_ignore_case(line, &needle))?;

    parse_date_from_line(lines[index]).or_else(|| {
        lines
            .get(index + 1)
            .and_then(|next| parse_date_from_line(next))
    })
}

/// First non-empty line after a line containing `keyword` (case-insensitive).
/// Unlike `value_after_label`, colons on the keyword line are ignored.
pub fn line_after_keyword(text: &str, keyword: &str) -> Option<String> {
    let needle = keyword.to_lowercase();
    let lines: Vec<&str> = text.lines().collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_ignore_case(line, &needle))
        .find_map(|(index, _)| {
            lines[index + 1..]
                .iter()
                .map(|l| l.trim())
                .find(|l| !l.is_empty())
        })
        .map(str::to_string)
}
