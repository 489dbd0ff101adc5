pub mod enums;
pub mod error;
pub mod percent;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Lever;
pub use error::CoreError;
pub use percent::{PctRange, clamp_pct, parse_pct, parse_pct_or_default};
pub use structs::CostStructureInput;
