//! Current-status derivation over a user's whole document set.
//!
//! Rules run in a fixed order and later rules overwrite `current_status`:
//! EAD (work authorization, no label), then I-20 (study authorization,
//! "F-1 Student"), then Visa ("<type> Visa Holder"). The order is part of the
//! contract.

use chrono::NaiveDateTime;

use crate::models::document::Document;
use crate::models::enums::{DocumentKind, DocumentState};
use crate::models::snapshot::StatusSnapshot;

pub const EAD_EXPIRING_WARNING: &str = "EAD card expiring soon";
pub const I20_EXPIRING_WARNING: &str = "I-20 expiring soon";
pub const VISA_EXPIRING_WARNING: &str = "Visa expiring soon";
pub const F1_STUDENT_STATUS: &str = "F-1 Student";

/// Document of `kind` with the latest expiry among `candidates`.
///
/// An absent expiry ranks below every date. Ties keep the first encountered.
fn latest_expiring<'a>(candidates: &[&'a Document], kind: DocumentKind) -> Option<&'a Document> {
    candidates
        .iter()
        .copied()
        .filter(|d| d.kind == kind)
        .fold(None::<&'a Document>, |best, doc| match best {
            Some(current) if doc.expiry_date <= current.expiry_date => Some(current),
            _ => Some(doc),
        })
}

/// Snapshot of `documents` at `now`. Pure; states must already be refreshed.
pub fn compute_snapshot(documents: &[Document], now: NaiveDateTime) -> StatusSnapshot {
    let mut snapshot = StatusSnapshot::empty(now);

    let in_force: Vec<&Document> = documents
        .iter()
        .filter(|d| d.state.is_in_force())
        .collect();

    if let Some(ead) = latest_expiring(&in_force, DocumentKind::Ead) {
        snapshot.can_work = true;
        snapshot.work_expiry_date = ead.expiry_date;
        if ead.state == DocumentState::ExpiringSoon {
            snapshot.warnings.push(EAD_EXPIRING_WARNING.to_string());
        }
    }

    if let Some(i20) = latest_expiring(&in_force, DocumentKind::I20) {
        snapshot.can_study = true;
        snapshot.must_maintain_status = true;
        snapshot.study_expiry_date = i20.expiry_date;
        snapshot.current_status = F1_STUDENT_STATUS.to_string();
        if i20.state == DocumentState::ExpiringSoon {
            snapshot.warnings.push(I20_EXPIRING_WARNING.to_string());
        }
    }

    if let Some(visa) = latest_expiring(&in_force, DocumentKind::Visa) {
        if let Some(visa_type) = &visa.fields.visa_type {
            snapshot.current_status = format!("{visa_type} Visa Holder");
        }
        if visa.state == DocumentState::ExpiringSoon {
            snapshot.warnings.push(VISA_EXPIRING_WARNING.to_string());
        }
    }

    let expired = documents
        .iter()
        .filter(|d| d.state == DocumentState::Expired)
        .count();
    if expired > 0 {
        snapshot.warnings.push(format!("{expired} document(s) expired"));
    }

    snapshot.active_documents = in_force.iter().map(|d| d.id).collect();

    tracing::debug!(
        documents = documents.len(),
        in_force = in_force.len(),
        status = %snapshot.current_status,
        can_work = snapshot.can_work,
        can_study = snapshot.can_study,
        warnings = snapshot.warnings.len(),
        "Computed status snapshot"
    );
    snapshot
}
