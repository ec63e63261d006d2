//! Language Plugin Port
//!
//! Defines the contract for language-specific declaration extraction.
//! Each supported source language implements this trait; dispatch from a
//! selector value to a concrete plugin is a closed lookup, not dynamic
//! registration, since the supported set is small and known at build time.

use crate::error::Result;
use crate::model::Declaration;

/// Supported language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Kotlin,
}

impl LanguageId {
    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Kotlin => "kotlin",
        }
    }

    /// Resolve a selector string. Returns None for unsupported languages;
    /// callers surface that as an explicit error before any file I/O.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "kotlin" => Some(LanguageId::Kotlin),
            _ => None,
        }
    }
}

/// Language Plugin trait
///
/// Capability set: identify the file extension, and turn one source file
/// into its ordered list of top-level declarations (with nested members).
/// Implementations must be `Send + Sync` so per-file extraction can run on
/// a rayon pool.
pub trait LanguagePlugin: Send + Sync {
    /// Get the language identifier
    fn language_id(&self) -> LanguageId;

    /// File extension this plugin handles, with the leading dot (e.g. ".kt").
    fn file_extension(&self) -> &'static str;

    /// Parse one source file and return its top-level declarations in file
    /// order. `rel_path` is the root-relative path recorded on each
    /// declaration for stable sort ordering.
    fn parse_file(&self, source: &str, rel_path: &str) -> Result<Vec<Declaration>>;
}
