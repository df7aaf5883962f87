//! Recognized text → typed `Document`.
//!
//! Classification and extraction touch only their own input, so callers may
//! run this per document in parallel. Lifecycle state is not derived here;
//! the new document starts Active until the next whole-set refresh.

use chrono::NaiveDateTime;

use super::classify::classify;
use super::extract::extract;
use super::types::RawText;
use crate::models::document::Document;
use crate::models::enums::DocumentKind;

/// Classify `text`, extract its fields and build the document.
pub fn ingest_text(text: &RawText, now: NaiveDateTime) -> Document {
    let kind = classify(text);
    ingest_text_as(text, kind, now)
}

/// Same as `ingest_text` with a caller-chosen kind.
pub fn ingest_text_as(text: &RawText, kind: DocumentKind, now: NaiveDateTime) -> Document {
    let fields = extract(text, kind);
    let document = Document::new(kind, now).with_fields(fields);

    tracing::info!(
        document_id = %document.id,
        kind = kind.as_str(),
        has_expiry = document.expiry_date.is_some(),
        "Ingested document"
    );
    document
}
