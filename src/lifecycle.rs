//! Document lifecycle: derives each document's state from its expiry date and
//! the current instant.
//!
//! State is recomputed wholesale on every refresh, never transitioned
//! incrementally. Superseded is terminal: a superseded document is skipped by
//! every refresh.

use chrono::{Duration, NaiveDateTime};

use crate::config::VaultConfig;
use crate::models::document::Document;
use crate::models::enums::DocumentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEngine {
    warning_window: Duration,
}

impl Default for LifecycleEngine {
    fn default() -> Self {
        Self::from_config(&VaultConfig::default())
    }
}

impl LifecycleEngine {
    pub fn new(warning_window: Duration) -> Self {
        Self { warning_window }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.warning_window())
    }

    pub fn warning_window(&self) -> Duration {
        self.warning_window
    }

    /// State `document` should be in at `now`.
    pub fn state_at(&self, document: &Document, now: NaiveDateTime) -> DocumentState {
        if document.is_superseded() {
            return DocumentState::Superseded;
        }
        match document.expiry_date {
            None => DocumentState::Active,
            Some(expiry) if expiry < now => DocumentState::Expired,
            // A horizon past the calendar's end covers every remaining date.
            Some(expiry) => match now.checked_add_signed(self.warning_window) {
                Some(horizon) if expiry >= horizon => DocumentState::Active,
                _ => DocumentState::ExpiringSoon,
            },
        }
    }

    /// Recompute the state of every non-superseded document and stamp
    /// `updated_at`, whether or not the state changed.
    pub fn refresh_states(&self, documents: &mut [Document], now: NaiveDateTime) {
        let mut changed = 0usize;
        for document in documents.iter_mut().filter(|d| !d.is_superseded()) {
            let next = self.state_at(document, now);
            if next != document.state {
                tracing::debug!(
                    document_id = %document.id,
                    from = document.state.as_str(),
                    to = next.as_str(),
                    "Document state changed"
                );
                document.state = next;
                changed += 1;
            }
            document.updated_at = now;
        }
        tracing::debug!(total = documents.len(), changed, "Refreshed document states");
    }

    /// Mark `old` as replaced by `new`. `new` is not modified.
    pub fn supersede(&self, old: &mut Document, new: &Document, now: NaiveDateTime) {
        tracing::info!(
            document_id = %old.id,
            superseded_by = %new.id,
            kind = old.kind.as_str(),
            "Document superseded"
        );
        old.state = DocumentState::Superseded;
        old.superseded_date = Some(now);
        old.updated_at = now;
    }

    /// Documents whose expiry falls in `(now, now + days]`, in input order.
    /// State is not consulted. A horizon that overflows the calendar is
    /// treated as unbounded.
    pub fn expiring_within<'a>(
        &self,
        documents: &'a [Document],
        days: i64,
        now: NaiveDateTime,
    ) -> Vec<&'a Document> {
        let horizon = Duration::try_days(days).and_then(|d| now.checked_add_signed(d));
        documents
            .iter()
            .filter(|d| match d.expiry_date {
                Some(e) => e > now && horizon.map_or(true, |h| e <= h),
                None => false,
            })
            .collect()
    }

    /// Documents currently Active or ExpiringSoon.
    pub fn active_documents<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|d| d.state.is_in_force()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::DocumentKind;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn doc_expiring_in(days: i64) -> Document {
        Document::new(DocumentKind::Ead, now() - Duration::days(100))
            .with_expiry(now() + Duration::days(days))
    }

    // ── State derivation ────────────────────────────────────────────────

    #[test]
    fn undated_document_stays_active() {
        let engine = LifecycleEngine::default();
        let mut docs = vec![Document::new(DocumentKind::Passport, now())];
        docs[0].state = DocumentState::Expired;
        engine.refresh_states(&mut docs, now());
        assert_eq!(docs[0].state, DocumentState::Active);
    }

    #[test]
    fn expiry_thresholds() {
        let engine = LifecycleEngine::default();
        let cases = [
            (-1, DocumentState::Expired),
            (0, DocumentState::ExpiringSoon),
            (10, DocumentState::ExpiringSoon),
            (29, DocumentState::ExpiringSoon),
            (30, DocumentState::Active),
            (200, DocumentState::Active),
        ];
        for (days, expected) in cases {
            let doc = doc_expiring_in(days);
            assert_eq!(engine.state_at(&doc, now()), expected, "{days} days");
        }
    }

    #[test]
    fn expired_one_second_ago() {
        let engine = LifecycleEngine::default();
        let doc = Document::new(DocumentKind::Visa, now())
            .with_expiry(now() - Duration::seconds(1));
        assert_eq!(engine.state_at(&doc, now()), DocumentState::Expired);
    }

    #[test]
    fn custom_window() {
        let engine = LifecycleEngine::from_config(&VaultConfig::default().with_warning_days(90));
        assert_eq!(
            engine.state_at(&doc_expiring_in(60), now()),
            DocumentState::ExpiringSoon
        );
    }

    #[test]
    fn window_past_calendar_end_does_not_overflow() {
        let engine = LifecycleEngine::new(Duration::MAX);
        assert_eq!(
            engine.state_at(&doc_expiring_in(5000), now()),
            DocumentState::ExpiringSoon
        );
        assert_eq!(
            engine.state_at(&doc_expiring_in(-1), now()),
            DocumentState::Expired
        );

        let late = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
        let doc = Document::new(DocumentKind::Visa, now()).with_expiry(late);
        assert_eq!(
            LifecycleEngine::default().state_at(&doc, late - Duration::days(1)),
            DocumentState::ExpiringSoon
        );
    }

    #[test]
    fn oversized_config_window_is_clamped() {
        let engine = LifecycleEngine::from_config(&VaultConfig::default().with_warning_days(100_000_000));
        assert_eq!(engine.warning_window(), Duration::days(crate::config::MAX_WARNING_DAYS));
        let mut docs = vec![doc_expiring_in(10)];
        engine.refresh_states(&mut docs, now());
        assert_eq!(docs[0].state, DocumentState::ExpiringSoon);
    }

    // ── Refresh ─────────────────────────────────────────────────────────

    #[test]
    fn refresh_is_idempotent_but_touches_updated_at() {
        let engine = LifecycleEngine::default();
        let mut docs = vec![doc_expiring_in(-5), doc_expiring_in(5), doc_expiring_in(50)];
        engine.refresh_states(&mut docs, now());
        let states: Vec<_> = docs.iter().map(|d| d.state).collect();
        assert_eq!(
            states,
            vec![
                DocumentState::Expired,
                DocumentState::ExpiringSoon,
                DocumentState::Active
            ]
        );

        let later = now() + Duration::minutes(1);
        engine.refresh_states(&mut docs, later);
        assert_eq!(docs.iter().map(|d| d.state).collect::<Vec<_>>(), states);
        assert!(docs.iter().all(|d| d.updated_at == later));
    }

    #[test]
    fn superseded_is_absorbing() {
        let engine = LifecycleEngine::default();
        let replacement = doc_expiring_in(400);
        let mut docs = vec![doc_expiring_in(-30)];
        engine.supersede(&mut docs[0], &replacement, now());
        let stamped = docs[0].updated_at;

        for offset in [-1000, 0, 10, 1000] {
            engine.refresh_states(&mut docs, now() + Duration::days(offset));
            assert_eq!(docs[0].state, DocumentState::Superseded);
        }
        assert_eq!(docs[0].updated_at, stamped);
        assert_eq!(engine.state_at(&docs[0], now()), DocumentState::Superseded);
    }

    #[test]
    fn supersede_stamps_old_only() {
        let engine = LifecycleEngine::default();
        let mut old = doc_expiring_in(10);
        let new = doc_expiring_in(400);
        let new_before = new.clone();
        engine.supersede(&mut old, &new, now());

        assert_eq!(old.state, DocumentState::Superseded);
        assert_eq!(old.superseded_date, Some(now()));
        assert_eq!(old.updated_at, now());
        assert_eq!(new, new_before);
    }

    // ── Queries ─────────────────────────────────────────────────────────

    #[test]
    fn expiring_within_is_half_open() {
        let engine = LifecycleEngine::default();
        let docs = vec![
            doc_expiring_in(-1),
            doc_expiring_in(0),
            doc_expiring_in(15),
            doc_expiring_in(30),
            doc_expiring_in(31),
            Document::new(DocumentKind::Passport, now()),
        ];
        let hits: Vec<_> = engine
            .expiring_within(&docs, 30, now())
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(hits, vec![docs[2].id, docs[3].id]);
    }

    #[test]
    fn expiring_within_huge_horizon_is_unbounded() {
        let engine = LifecycleEngine::default();
        let docs = vec![doc_expiring_in(-1), doc_expiring_in(10), doc_expiring_in(100_000)];
        for days in [i64::MAX / 100_000, i64::MAX] {
            let hits = engine.expiring_within(&docs, days, now());
            assert_eq!(hits.len(), 2, "{days} days");
        }
        assert!(engine.expiring_within(&docs, -10, now()).is_empty());
    }

    #[test]
    fn active_documents_include_expiring_soon() {
        let engine = LifecycleEngine::default();
        let mut docs = vec![doc_expiring_in(-1), doc_expiring_in(5), doc_expiring_in(90)];
        engine.refresh_states(&mut docs, now());
        let active: Vec<_> = engine.active_documents(&docs).iter().map(|d| d.id).collect();
        assert_eq!(active, vec![docs[1].id, docs[2].id]);
    }
}
