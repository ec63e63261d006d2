//! Ports consumed by the orchestration layer.

mod language;

pub use language::{LanguageId, LanguagePlugin};
