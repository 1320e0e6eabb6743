pub mod index;
pub mod summarize;
