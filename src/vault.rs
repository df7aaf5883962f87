//! In-memory document vault.
//!
//! Stands in for the persistence collaborator: owns the document set and
//! drives the pipeline in its required order. Every mutation is followed by
//! a whole-set lifecycle refresh, so status and timeline queries always read
//! a settled set.

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::VaultConfig;
use crate::context::build_context;
use crate::lifecycle::LifecycleEngine;
use crate::models::document::Document;
use crate::models::enums::DocumentKind;
use crate::models::snapshot::StatusSnapshot;
use crate::pipeline::ingest::{ingest_text, ingest_text_as};
use crate::pipeline::types::{IngestError, RawText, TextSource};
use crate::status::compute_snapshot;
use crate::timeline::{assemble_timeline, TimelineEvent, TimelineGenerator};

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Document {0} cannot supersede itself")]
    SelfSupersede(Uuid),

    #[error("Ingest failed: {0}")]
    Ingest(#[from] IngestError),
}

pub struct StatusVault<C: Clock = SystemClock> {
    documents: Vec<Document>,
    lifecycle: LifecycleEngine,
    timeline: TimelineGenerator,
    clock: C,
}

impl StatusVault<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(VaultConfig::default(), SystemClock)
    }
}

impl Default for StatusVault<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StatusVault<C> {
    pub fn with_clock(config: VaultConfig, clock: C) -> Self {
        Self {
            documents: Vec::new(),
            lifecycle: LifecycleEngine::from_config(&config),
            timeline: TimelineGenerator::from_config(&config),
            clock,
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Classify, extract and store one document's text. Returns its id.
    pub fn ingest(&mut self, text: &RawText) -> Uuid {
        let document = ingest_text(text, self.now());
        self.insert(document)
    }

    /// Like `ingest`, with the kind chosen by the caller.
    pub fn ingest_as(&mut self, text: &RawText, kind: DocumentKind) -> Uuid {
        let document = ingest_text_as(text, kind, self.now());
        self.insert(document)
    }

    /// Acquire text from `source` and ingest it.
    pub fn ingest_from<S: TextSource + ?Sized>(
        &mut self,
        source: &S,
        key: &str,
    ) -> Result<Uuid, VaultError> {
        let text = source.read_text(key).map_err(|e| {
            tracing::warn!(key, error = %e, "Text acquisition failed");
            e
        })?;
        Ok(self.ingest(&text))
    }

    /// Store an already-built document.
    pub fn insert(&mut self, document: Document) -> Uuid {
        let id = document.id;
        self.documents.push(document);
        self.refresh();
        id
    }

    /// Recompute every document's state at the clock's current instant.
    pub fn refresh(&mut self) {
        let now = self.now();
        self.lifecycle.refresh_states(&mut self.documents, now);
    }

    /// Mark `old_id` as replaced by `new_id`.
    pub fn supersede(&mut self, old_id: Uuid, new_id: Uuid) -> Result<(), VaultError> {
        if old_id == new_id {
            return Err(VaultError::SelfSupersede(old_id));
        }
        let new = self
            .get(new_id)
            .cloned()
            .ok_or(VaultError::DocumentNotFound(new_id))?;
        let now = self.now();
        let old = self
            .documents
            .iter_mut()
            .find(|d| d.id == old_id)
            .ok_or(VaultError::DocumentNotFound(old_id))?;
        self.lifecycle.supersede(old, &new, now);
        self.refresh();
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: Uuid) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        compute_snapshot(&self.documents, self.now())
    }

    pub fn timeline(&self) -> Vec<TimelineEvent> {
        assemble_timeline(&self.timeline, &self.documents)
    }

    pub fn document_timeline(&self, id: Uuid) -> Option<Vec<TimelineEvent>> {
        self.get(id).map(|d| self.timeline.document_events(d))
    }

    pub fn expiring_within(&self, days: i64) -> Vec<&Document> {
        self.lifecycle
            .expiring_within(&self.documents, days, self.now())
    }

    pub fn active_documents(&self) -> Vec<&Document> {
        self.lifecycle.active_documents(&self.documents)
    }

    /// Assistant context over the current set.
    pub fn context(&self) -> String {
        build_context(&self.documents, &self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::enums::{DocumentState, EventType};
    use crate::pipeline::types::PlainTextFileSource;
    use chrono::{Duration, NaiveDate};
    use std::cell::Cell;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn vault() -> StatusVault<FixedClock> {
        StatusVault::with_clock(VaultConfig::default(), FixedClock(now()))
    }

    /// Clock the test can move.
    struct ManualClock(Cell<NaiveDateTime>);

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            self.0.get()
        }
    }

    const I20_TEXT: &str = "CERTIFICATE OF ELIGIBILITY\nSEVIS ID: N0012345678\nName: DOE, JANE";
    const VISA_TEXT: &str = "UNITED STATES VISA\nF-1\nExpiration Date: 06/20/2026";

    #[test]
    fn empty_vault() {
        let vault = vault();
        assert!(vault.documents().is_empty());
        assert_eq!(vault.snapshot().current_status, "Unknown");
        assert!(vault.timeline().is_empty());
        assert_eq!(vault.context(), crate::context::NO_DOCUMENTS_CONTEXT);
    }

    #[test]
    fn ingest_refreshes_state() {
        let mut vault = vault();
        let id = vault.ingest(&RawText::new(VISA_TEXT));
        let doc = vault.get(id).unwrap();
        assert_eq!(doc.kind, DocumentKind::Visa);
        assert_eq!(doc.state, DocumentState::ExpiringSoon);

        let snapshot = vault.snapshot();
        assert_eq!(snapshot.current_status, "F-1 Visa Holder");
        assert_eq!(snapshot.warnings, vec!["Visa expiring soon".to_string()]);
        assert_eq!(snapshot.active_documents, vec![id]);
    }

    #[test]
    fn student_with_visa() {
        let mut vault = vault();
        vault.ingest(&RawText::new(I20_TEXT));
        vault.ingest(&RawText::new(VISA_TEXT));
        let snapshot = vault.snapshot();
        assert!(snapshot.can_study);
        assert!(snapshot.must_maintain_status);
        assert_eq!(snapshot.current_status, "F-1 Visa Holder");
        assert_eq!(vault.expiring_within(30).len(), 1);
    }

    #[test]
    fn supersede_moves_old_out_of_force() {
        let mut vault = vault();
        let old = vault.ingest(&RawText::new(
            "EMPLOYMENT AUTHORIZATION\nCard Expires: 06/10/2026",
        ));
        let new = vault.ingest(&RawText::new(
            "EMPLOYMENT AUTHORIZATION\nCard Expires: 06/10/2028",
        ));
        vault.supersede(old, new).unwrap();

        assert_eq!(vault.get(old).unwrap().state, DocumentState::Superseded);
        assert_eq!(vault.get(old).unwrap().superseded_date, Some(now()));
        assert_eq!(vault.active_documents().len(), 1);

        let snapshot = vault.snapshot();
        assert!(snapshot.can_work);
        assert!(snapshot.warnings.is_empty());

        let events = vault.document_timeline(old).unwrap();
        assert_eq!(events.last().unwrap().event_type, EventType::Superseded);
    }

    #[test]
    fn supersede_errors() {
        let mut vault = vault();
        let id = vault.ingest(&RawText::new(I20_TEXT));
        let missing = Uuid::new_v4();

        assert!(matches!(
            vault.supersede(id, id),
            Err(VaultError::SelfSupersede(_))
        ));
        assert!(matches!(
            vault.supersede(id, missing),
            Err(VaultError::DocumentNotFound(m)) if m == missing
        ));
        assert!(matches!(
            vault.supersede(missing, id),
            Err(VaultError::DocumentNotFound(m)) if m == missing
        ));
        assert_eq!(vault.get(id).unwrap().state, DocumentState::Active);
    }

    #[test]
    fn refresh_follows_the_clock() {
        let clock = ManualClock(Cell::new(now()));
        let mut vault = StatusVault::with_clock(VaultConfig::default(), &clock);
        let id = vault.ingest(&RawText::new(VISA_TEXT));
        assert_eq!(vault.get(id).unwrap().state, DocumentState::ExpiringSoon);

        clock.0.set(now() + Duration::days(60));
        vault.refresh();
        assert_eq!(vault.get(id).unwrap().state, DocumentState::Expired);
        assert_eq!(
            vault.snapshot().warnings,
            vec!["1 document(s) expired".to_string()]
        );
    }

    #[test]
    fn ingest_from_file_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("i20.txt"), I20_TEXT).unwrap();
        let source = PlainTextFileSource::rooted(dir.path());

        let mut vault = vault();
        let id = vault.ingest_from(&source, "i20.txt").unwrap();
        assert_eq!(vault.get(id).unwrap().kind, DocumentKind::I20);
        assert!(matches!(
            vault.ingest_from(&source, "missing.txt"),
            Err(VaultError::Ingest(IngestError::Io(_)))
        ));
        assert_eq!(vault.documents().len(), 1);
    }

    #[test]
    fn signed_year_expiry_is_ignored() {
        let mut vault = vault();
        let id = vault.ingest(&RawText::new("VISA\nF-1\nExpiration Date: 01/01/-262143"));
        let doc = vault.get(id).unwrap();
        assert_eq!(doc.expiry_date, None);
        assert_eq!(doc.state, DocumentState::Active);
        assert_eq!(vault.timeline().len(), 1);
    }

    #[test]
    fn extreme_windows_do_not_overflow() {
        let config = VaultConfig::default().with_warning_days(100_000_000);
        let mut vault = StatusVault::with_clock(config, FixedClock(now()));
        let id = vault.ingest(&RawText::new(VISA_TEXT));
        assert_eq!(vault.get(id).unwrap().state, DocumentState::ExpiringSoon);
        assert_eq!(vault.expiring_within(i64::MAX / 100_000).len(), 1);
        assert_eq!(vault.expiring_within(i64::MAX).len(), 1);
    }

    #[test]
    fn timeline_spans_all_documents() {
        let mut vault = vault();
        vault.ingest(&RawText::new(I20_TEXT));
        vault.ingest(&RawText::new(VISA_TEXT));
        let events = vault.timeline();
        // I-20 added; visa added, warning, expired
        assert_eq!(events.len(), 4);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    }
}
