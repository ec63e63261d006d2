//! Declaration model
//!
//! The language-neutral record produced by extraction. No logic beyond
//! sort-priority and keyword mapping; plugins fill it, grouping sorts it,
//! rendering reads it.

use serde::{Deserialize, Serialize};

/// Kind of a declaration. Determines both sort priority and signature shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Interface,
    SealedClass,
    Class,
    DataClass,
    EnumClass,
    Object,
    Function,
    Val,
    Var,
}

impl DeclarationKind {
    /// Keyword used when rendering signatures (e.g. "sealed class").
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Interface => "interface",
            DeclarationKind::SealedClass => "sealed class",
            DeclarationKind::Class => "class",
            DeclarationKind::DataClass => "data class",
            DeclarationKind::EnumClass => "enum class",
            DeclarationKind::Object => "object",
            DeclarationKind::Function => "fun",
            DeclarationKind::Val => "val",
            DeclarationKind::Var => "var",
        }
    }

    /// Sort rank within a namespace group. Architecturally significant kinds
    /// (interfaces, sealed hierarchies) surface before incidental ones.
    pub fn priority(&self) -> u8 {
        match self {
            DeclarationKind::Interface => 0,
            DeclarationKind::SealedClass => 1,
            DeclarationKind::Class => 2,
            DeclarationKind::DataClass => 3,
            DeclarationKind::EnumClass => 4,
            DeclarationKind::Object => 5,
            DeclarationKind::Function => 6,
            DeclarationKind::Val => 7,
            DeclarationKind::Var => 8,
        }
    }

    /// True for kinds that may own nested members.
    pub fn is_type(&self) -> bool {
        !matches!(
            self,
            DeclarationKind::Function | DeclarationKind::Val | DeclarationKind::Var
        )
    }
}

/// Declared visibility. Absence of an explicit modifier means public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Internal,
}

impl Visibility {
    pub fn from_modifier(text: &str) -> Self {
        match text {
            "private" => Visibility::Private,
            "internal" => Visibility::Internal,
            "protected" => Visibility::Protected,
            _ => Visibility::Public,
        }
    }

    /// Private and module-restricted declarations never reach the index.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Private | Visibility::Internal)
    }
}

/// A single public-facing unit of code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// One-line rendered summary. Human-scannable, not guaranteed to be
    /// syntactically valid source.
    pub signature: String,
    /// First sentence of the attached doc comment, or empty.
    #[serde(default)]
    pub doc_summary: String,
    /// Architecture-relevant markers, allow-list filtered.
    #[serde(default)]
    pub annotations: Vec<String>,
    pub visibility: Visibility,
    /// Qualifiers excluding visibility and annotations (suspend, const, ...).
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Path relative to the source root; used only for stable ordering.
    #[serde(default)]
    pub file_path: String,
    /// Fully qualified namespace as written in source, pre-merge.
    #[serde(default)]
    pub namespace: String,
    /// Ownership-nested members; empty for non-type declarations.
    #[serde(default)]
    pub children: Vec<Declaration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_priority_ordering() {
        assert!(DeclarationKind::Interface.priority() < DeclarationKind::Class.priority());
        assert!(DeclarationKind::Class.priority() < DeclarationKind::Function.priority());
        assert!(DeclarationKind::Function.priority() < DeclarationKind::Var.priority());
    }

    #[test]
    fn test_kind_keyword() {
        assert_eq!(DeclarationKind::SealedClass.keyword(), "sealed class");
        assert_eq!(DeclarationKind::Function.keyword(), "fun");
    }

    #[test]
    fn test_visibility_from_modifier() {
        assert_eq!(Visibility::from_modifier("private"), Visibility::Private);
        assert_eq!(Visibility::from_modifier("internal"), Visibility::Internal);
        assert_eq!(Visibility::from_modifier("protected"), Visibility::Protected);
        assert_eq!(Visibility::from_modifier("public"), Visibility::Public);
    }

    #[test]
    fn test_visibility_hidden() {
        assert!(Visibility::Private.is_hidden());
        assert!(Visibility::Internal.is_hidden());
        assert!(!Visibility::Protected.is_hidden());
        assert!(!Visibility::Public.is_hidden());
    }

    #[test]
    fn test_is_type() {
        assert!(DeclarationKind::Object.is_type());
        assert!(!DeclarationKind::Val.is_type());
    }
}
