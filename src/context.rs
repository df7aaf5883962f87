//! Plain-text summary of a user's documents and status, handed to the
//! assistant collaborator as conversation context. No network I/O here.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::models::document::Document;
use crate::models::enums::{DocumentKind, DocumentState};
use crate::models::snapshot::StatusSnapshot;

pub const NO_DOCUMENTS_CONTEXT: &str = "The user has no documents uploaded yet.";

/// Fixed role text for the immigration assistant.
pub const SYSTEM_PROMPT: &str = "\
You are an immigration assistant for StatusVault, an app that helps users manage their U.S. immigration documents.

Your role is to:
1. Answer questions about U.S. immigration rules, visa types, travel restrictions, and document requirements
2. Provide personalized advice based on the user's specific documents and immigration status
3. Help users understand their work and study authorization
4. Advise on travel considerations and re-entry requirements
5. Explain document expiration impacts and what steps to take
6. Clarify SEVIS, OPT, CPT, H-1B, and other immigration program rules

Important guidelines:
- Base your answers on the user's actual documents when relevant
- Cite official sources when possible (USCIS, DOS)
- If you are not certain about something, say so and recommend consulting an immigration attorney
- Be concise but thorough
- Use clear language and explain technical terms when needed

You will receive the user's document information as context before each conversation.";

fn format_date(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn format_day(date: chrono::NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// One "Active Documents" bullet.
fn describe_active(doc: &Document) -> String {
    let mut line = format!("- {}", doc.kind.label());
    let fields = &doc.fields;

    if let Some(name) = &fields.full_name {
        let _ = write!(line, " (Name: {name})");
    }

    match doc.kind {
        DocumentKind::Ead => {
            if let Some(category) = &fields.ead_category {
                let _ = write!(line, ", Category: {category}");
            }
            if let Some(until) = fields.valid_until {
                let _ = write!(line, ", Valid Until: {}", format_day(until));
            }
        }
        DocumentKind::I20 => {
            if let Some(sevis) = &fields.sevis_id {
                let _ = write!(line, ", SEVIS ID: {sevis}");
            }
            if let Some(end) = fields.program_end_date {
                let _ = write!(line, ", Program Ends: {}", format_day(end));
            }
        }
        DocumentKind::Visa => {
            if let Some(visa_type) = &fields.visa_type {
                let _ = write!(line, ", Type: {visa_type}");
            }
        }
        DocumentKind::Passport => {
            if let Some(nationality) = &fields.nationality {
                let _ = write!(line, ", Nationality: {nationality}");
            }
        }
        DocumentKind::I94 | DocumentKind::I797 | DocumentKind::Other => {}
    }

    if let Some(expiry) = doc.expiry_date {
        let _ = write!(line, ", Expires: {}", format_date(expiry));
    }
    let _ = write!(line, ", Status: {}", doc.state.label());
    line
}

/// Context text for `documents`, with `snapshot` computed over the same set.
pub fn build_context(documents: &[Document], snapshot: &StatusSnapshot) -> String {
    if documents.is_empty() {
        return NO_DOCUMENTS_CONTEXT.to_string();
    }

    let mut context = String::from("User's Immigration Documents:\n\n");

    let active: Vec<&Document> = documents.iter().filter(|d| d.state.is_in_force()).collect();
    let expired: Vec<&Document> = documents
        .iter()
        .filter(|d| d.state == DocumentState::Expired)
        .collect();

    if !active.is_empty() {
        context.push_str("Active Documents:\n");
        for doc in &active {
            context.push_str(&describe_active(doc));
            context.push('\n');
        }
        context.push('\n');
    }

    if !expired.is_empty() {
        context.push_str("Expired Documents:\n");
        for doc in &expired {
            let _ = write!(context, "- {}", doc.kind.label());
            if let Some(expiry) = doc.expiry_date {
                let _ = write!(context, " (Expired: {})", format_date(expiry));
            }
            context.push('\n');
        }
        context.push('\n');
    }

    context.push_str("Current Immigration Status:\n");
    let _ = writeln!(context, "- Status: {}", snapshot.current_status);
    let _ = write!(context, "- Work Authorization: {}", yes_no(snapshot.can_work));
    if let Some(until) = snapshot.work_expiry_date {
        let _ = write!(context, " (until {})", format_date(until));
    }
    context.push('\n');
    let _ = writeln!(
        context,
        "- Study Authorization: {}",
        yes_no(snapshot.can_study)
    );

    if snapshot.has_warnings() {
        context.push_str("\nWarnings:\n");
        for warning in &snapshot.warnings {
            let _ = writeln!(context, "- {warning}");
        }
    }

    context
}
