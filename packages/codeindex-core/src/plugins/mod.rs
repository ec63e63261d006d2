//! Concrete language plugins.

pub mod kdoc;
pub mod kotlin;

pub use kotlin::KotlinPlugin;

use crate::ports::{LanguageId, LanguagePlugin};

/// Closed lookup from a language selector to its plugin. The supported set
/// is known at build time; no dynamic registration.
pub fn plugin_for(language: LanguageId) -> Box<dyn LanguagePlugin> {
    match language {
        LanguageId::Kotlin => Box::new(KotlinPlugin::new()),
    }
}
