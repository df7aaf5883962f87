//! StatusVault core: turns the recognized text of U.S. immigration documents
//! into typed documents, keeps their lifecycle state current, and derives
//! the holder's status, timeline and assistant context.
//!
//! Data moves one way: text → [`pipeline`] (classify, extract) →
//! [`lifecycle`] (state refresh) → [`status`] / [`timeline`] / [`context`].
//! [`vault::StatusVault`] drives that order over an in-memory set.

pub mod clock;
pub mod config;
pub mod context;
pub mod lifecycle;
pub mod models;
pub mod pipeline;
pub mod status;
pub mod timeline;
pub mod vault;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::VaultConfig;
pub use models::{Document, DocumentKind, DocumentState, FieldRecord, StatusSnapshot};
pub use pipeline::{classify, extract, ingest_text, RawText, TextSource};
pub use vault::{StatusVault, VaultError};
