pub mod section;

pub use section::segment_sections;

// Re-export domain types from core (canonical definitions live there)
pub use paperdigest_core::{SectionKind, SectionMap};
