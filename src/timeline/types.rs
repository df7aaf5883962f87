use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::EventType;

/// A single lifecycle event of one document. Derived, read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Stable across regenerations: `<document id>-<event suffix>`.
    pub id: String,
    pub event_type: EventType,
    pub date: NaiveDateTime,
    pub description: String,
    pub document_id: Option<Uuid>,
}

impl TimelineEvent {
    pub fn title(&self) -> &'static str {
        self.event_type.label()
    }
}
