pub mod classify;
pub mod dates;
pub mod extract;
pub mod ingest;
pub mod patterns;
pub mod types;

pub use classify::*;
pub use dates::*;
pub use extract::{extract, rules_for, Rule};
pub use ingest::*;
pub use patterns::{date_near, find_first, line_after_keyword, value_after_label};
pub use types::*;
