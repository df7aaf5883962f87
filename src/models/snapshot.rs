use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status label used when no I-20 or visa rule applies.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Point-in-time aggregate over a user's documents. Computed on demand,
/// never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub computed_at: NaiveDateTime,
    pub current_status: String,
    pub can_work: bool,
    pub work_expiry_date: Option<NaiveDateTime>,
    pub can_study: bool,
    pub study_expiry_date: Option<NaiveDateTime>,
    pub must_maintain_status: bool,
    pub warnings: Vec<String>,
    /// Ids of documents in force (Active or ExpiringSoon), in input order.
    pub active_documents: Vec<Uuid>,
}

impl StatusSnapshot {
    /// The snapshot of an empty document set.
    pub fn empty(computed_at: NaiveDateTime) -> Self {
        Self {
            computed_at,
            current_status: UNKNOWN_STATUS.to_string(),
            can_work: false,
            work_expiry_date: None,
            can_study: false,
            study_expiry_date: None,
            must_maintain_status: false,
            warnings: Vec::new(),
            active_documents: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
