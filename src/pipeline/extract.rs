//! Per-kind field extraction.
//!
//! Each document kind owns an ordered rule table. Rules run independently:
//! a rule that finds nothing leaves its fields unset and the next rule still
//! runs. The raw text is always kept on the record.

use std::sync::LazyLock;

use regex::Regex;

use super::dates::parse_date_from_line;
use super::patterns::{
    date_near, find_first, line_after_keyword, value_after_label, ADMISSION_NUMBER,
    EAD_CARD_NUMBER, EAD_CATEGORY, PASSPORT_NUMBER, RECEIPT_NUMBER, SEVIS_ID, VISA_TYPE,
};
use super::types::RawText;
use crate::models::enums::{DocumentKind, FieldName};
use crate::models::fields::{FieldRecord, FieldValue};

/// One extraction attempt.
pub enum Rule {
    /// First regex match, stored into every listed field.
    Pattern {
        regex: &'static LazyLock<Regex>,
        into: &'static [FieldName],
    },
    /// Text value attached to a label (see `value_after_label`).
    Label {
        label: &'static str,
        into: FieldName,
    },
    /// Date on or right after the first label line.
    DateNear {
        label: &'static str,
        into: FieldName,
    },
    /// First non-empty line after a keyword line.
    LineAfter {
        keyword: &'static str,
        into: FieldName,
    },
    /// The EAD card's validity window scan.
    EadValidity,
}

static I20_RULES: &[Rule] = &[
    Rule::Pattern {
        regex: &SEVIS_ID,
        into: &[FieldName::SevisId],
    },
    Rule::Label {
        label: "Name",
        into: FieldName::FullName,
    },
    Rule::DateNear {
        label: "Issue Date",
        into: FieldName::IssuedDate,
    },
    Rule::DateNear {
        label: "Program End Date",
        into: FieldName::ProgramEndDate,
    },
];

static EAD_RULES: &[Rule] = &[
    Rule::Pattern {
        regex: &EAD_CARD_NUMBER,
        into: &[FieldName::DocumentNumber],
    },
    Rule::LineAfter {
        keyword: "name",
        into: FieldName::FullName,
    },
    Rule::Pattern {
        regex: &EAD_CATEGORY,
        into: &[FieldName::EadCategory],
    },
    Rule::EadValidity,
];

static PASSPORT_RULES: &[Rule] = &[
    Rule::Pattern {
        regex: &PASSPORT_NUMBER,
        into: &[FieldName::PassportNumber, FieldName::DocumentNumber],
    },
    Rule::Label {
        label: "Surname",
        into: FieldName::FullName,
    },
    Rule::DateNear {
        label: "Date of birth",
        into: FieldName::DateOfBirth,
    },
    Rule::DateNear {
        label: "Date of issue",
        into: FieldName::IssuedDate,
    },
    Rule::DateNear {
        label: "Date of expiry",
        into: FieldName::ExpirationDate,
    },
];

static VISA_RULES: &[Rule] = &[
    Rule::Pattern {
        regex: &VISA_TYPE,
        into: &[FieldName::VisaType],
    },
    Rule::DateNear {
        label: "Issue Date",
        into: FieldName::IssuedDate,
    },
    Rule::DateNear {
        label: "Expiration Date",
        into: FieldName::ExpirationDate,
    },
];

static I94_RULES: &[Rule] = &[
    Rule::Pattern {
        regex: &ADMISSION_NUMBER,
        into: &[FieldName::AdmissionNumber],
    },
    Rule::Label {
        label: "Class of Admission",
        into: FieldName::ClassOfAdmission,
    },
    Rule::DateNear {
        label: "Admit Until Date",
        into: FieldName::AdmitUntilDate,
    },
];

static I797_RULES: &[Rule] = &[
    Rule::Pattern {
        regex: &RECEIPT_NUMBER,
        into: &[FieldName::ReceiptNumber],
    },
    Rule::Label {
        label: "Beneficiary",
        into: FieldName::BeneficiaryName,
    },
    Rule::DateNear {
        label: "Notice Date",
        into: FieldName::IssuedDate,
    },
    // NOTE: the "Valid From" line feeds expiration_date. Kept as-is until the
    // intended I-797 validity semantics are confirmed.
    Rule::DateNear {
        label: "Valid From",
        into: FieldName::ExpirationDate,
    },
];

/// Rule table for a kind. `Other` has none.
pub fn rules_for(kind: DocumentKind) -> &'static [Rule] {
    match kind {
        DocumentKind::I20 => I20_RULES,
        DocumentKind::Ead => EAD_RULES,
        DocumentKind::Passport => PASSPORT_RULES,
        DocumentKind::Visa => VISA_RULES,
        DocumentKind::I94 => I94_RULES,
        DocumentKind::I797 => I797_RULES,
        DocumentKind::Other => &[],
    }
}

/// Structured fields for `text`, read with the rules of `kind`.
pub fn extract(text: &RawText, kind: DocumentKind) -> FieldRecord {
    let mut record = FieldRecord::with_raw_text(text.as_str());
    for rule in rules_for(kind) {
        apply(rule, text.as_str(), &mut record);
    }

    tracing::debug!(
        kind = kind.as_str(),
        populated = record.populated_count(),
        "Extracted fields"
    );
    record
}

fn apply(rule: &Rule, text: &str, record: &mut FieldRecord) {
    match rule {
        Rule::Pattern { regex, into } => {
            if let Some(found) = find_first(text, regex) {
                for field in *into {
                    record.set(*field, FieldValue::Text(found.clone()));
                }
            }
        }
        Rule::Label { label, into } => {
            if let Some(value) = value_after_label(text, label) {
                record.set(*into, FieldValue::Text(value));
            }
        }
        Rule::DateNear { label, into } => {
            if let Some(date) = date_near(text, label) {
                record.set(*into, FieldValue::Date(date));
            }
        }
        Rule::LineAfter { keyword, into } => {
            if let Some(value) = line_after_keyword(text, keyword) {
                record.set(*into, FieldValue::Text(value));
            }
        }
        Rule::EadValidity => scan_ead_validity(text, record),
    }
}

/// Two passes over the card text. Later matching lines overwrite earlier
/// ones. A "card expires" line is picked up by the first pass but only a
/// "valid from" line sets `valid_from`; "expires" lines feed the second pass.
fn scan_ead_validity(text: &str, record: &mut FieldRecord) {
    let lines: Vec<&str> = text.lines().collect();

    let date_at = |index: usize| {
        parse_date_from_line(lines[index].trim()).or_else(|| {
            lines
                .get(index + 1)
                .and_then(|next| parse_date_from_line(next))
        })
    };

    for (index, line) in lines.iter().enumerate() {
        let lower = line.trim().to_lowercase();
        if lower.contains("valid from") || lower.contains("card expires") {
            if let Some(date) = date_at(index) {
                if lower.contains("valid from") {
                    record.valid_from = Some(date);
                }
            }
        }
    }

    for (index, line) in lines.iter().enumerate() {
        let lower = line.trim().to_lowercase();
        if lower.contains("valid until") || lower.contains("expires") {
            if let Some(date) = date_at(index) {
                record.valid_until = Some(date);
                record.expiration_date = Some(date);
            }
        }
    }
}
