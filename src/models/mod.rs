pub mod document;
pub mod enums;
pub mod fields;
pub mod snapshot;

pub use document::*;
pub use enums::*;
pub use fields::*;
pub use snapshot::*;
