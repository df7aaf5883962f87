use super::events::TimelineGenerator;
use super::types::TimelineEvent;
use crate::models::document::Document;

/// Events of every document, sorted chronologically (oldest first). Events on
/// the same instant keep document order, then per-document order.
pub fn assemble_timeline(
    generator: &TimelineGenerator,
    documents: &[Document],
) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = documents
        .iter()
        .flat_map(|d| generator.document_events(d))
        .collect();

    // Stable sort keeps per-document order for equal dates
    events.sort_by(|a, b| a.date.cmp(&b.date));
    events
}
