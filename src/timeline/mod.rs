//! Document timeline: chronological lifecycle events derived from each
//! document's dates.
//!
//! Events are regenerated from scratch on every call. Ids are deterministic,
//! so a caller that persists events can merge regenerations idempotently.

mod aggregates;
mod events;
mod types;

pub use aggregates::*;
pub use events::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
