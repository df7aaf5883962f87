use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DocumentKind, DocumentState};
use super::fields::FieldRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub kind: DocumentKind,
    /// Derived by the lifecycle engine; never set from user input.
    pub state: DocumentState,
    pub effective_date: Option<NaiveDateTime>,
    pub expiry_date: Option<NaiveDateTime>,
    pub superseded_date: Option<NaiveDateTime>,
    pub fields: FieldRecord,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Document {
    /// New Active document with no dates and an empty record.
    pub fn new(kind: DocumentKind, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            state: DocumentState::Active,
            effective_date: None,
            expiry_date: None,
            superseded_date: None,
            fields: FieldRecord::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach an extracted record and resolve the document's own dates from it:
    /// effective = valid_from, else issued_date; expiry = expiration_date, else
    /// valid_until.
    pub fn with_fields(mut self, fields: FieldRecord) -> Self {
        self.effective_date = fields.valid_from.or(fields.issued_date).map(start_of_day);
        self.expiry_date = fields
            .expiration_date
            .or(fields.valid_until)
            .map(start_of_day);
        self.fields = fields;
        self
    }

    pub fn with_expiry(mut self, expiry: NaiveDateTime) -> Self {
        self.expiry_date = Some(expiry);
        self
    }

    pub fn is_superseded(&self) -> bool {
        self.state == DocumentState::Superseded
    }
}

/// Field dates carry no time of day; they take effect at midnight.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}
