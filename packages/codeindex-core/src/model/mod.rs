//! Data contracts shared between extraction, grouping, and rendering.

mod declaration;
mod group;

pub use declaration::{Declaration, DeclarationKind, Visibility};
pub use group::{NamespaceGroup, ROOT_NAMESPACE};
