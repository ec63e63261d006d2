//! codeindex-core
//!
//! Turns a tree of source files into a compact, navigable declaration index.
//!
//! Layout:
//! - model/     : Declaration and NamespaceGroup data contracts
//! - ports/     : LanguagePlugin trait and LanguageId selector
//! - plugins/   : Concrete per-language extraction (Kotlin via tree-sitter)
//! - grouping   : Namespace strip/merge/sort engine
//! - processor  : Per-module entry point (discovery, parallel extraction)
//!
//! Data flow: files -> syntax trees -> plugin extraction -> flat declaration
//! list -> grouping engine -> ordered namespace groups. Index rendering lives
//! in the CLI crate and consumes the groups as-is.

pub mod error;
pub mod grouping;
pub mod model;
pub mod plugins;
pub mod ports;
pub mod processor;

pub use error::{IndexError, Result};
pub use grouping::group_declarations;
pub use model::{Declaration, DeclarationKind, NamespaceGroup, Visibility, ROOT_NAMESPACE};
pub use ports::{LanguageId, LanguagePlugin};
pub use processor::{process_module, ModuleIndex, ModuleOutcome, ModuleSpec};
