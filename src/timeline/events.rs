use chrono::Duration;

use super::types::TimelineEvent;
use crate::config::VaultConfig;
use crate::models::document::Document;
use crate::models::enums::EventType;

/// Builds timeline events from document dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineGenerator {
    warning_window: Duration,
}

impl Default for TimelineGenerator {
    fn default() -> Self {
        Self::from_config(&VaultConfig::default())
    }
}

impl TimelineGenerator {
    pub fn new(warning_window: Duration) -> Self {
        Self { warning_window }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.warning_window())
    }

    /// Added, then (with an expiry) ExpirationWarning and Expired, then
    /// (when superseded) Superseded. No deduplication across calls. The
    /// warning is left out when it would fall before the calendar's start.
    pub fn document_events(&self, document: &Document) -> Vec<TimelineEvent> {
        let label = document.kind.label();
        let event = |suffix: &str, event_type, date, description: String| TimelineEvent {
            id: format!("{}-{suffix}", document.id),
            event_type,
            date,
            description,
            document_id: Some(document.id),
        };

        let mut events = vec![event(
            "added",
            EventType::Added,
            document.created_at,
            format!("{label} added to vault"),
        )];

        if let Some(expiry) = document.expiry_date {
            if let Some(warn_at) = expiry.checked_sub_signed(self.warning_window) {
                events.push(event(
                    "warning",
                    EventType::ExpirationWarning,
                    warn_at,
                    format!(
                        "{label} expiring in {} days",
                        self.warning_window.num_days()
                    ),
                ));
            }
            events.push(event(
                "expired",
                EventType::Expired,
                expiry,
                format!("{label} expired"),
            ));
        }

        if let Some(superseded) = document.superseded_date {
            events.push(event(
                "superseded",
                EventType::Superseded,
                superseded,
                format!("{label} superseded by newer document"),
            ));
        }

        events
    }
}
