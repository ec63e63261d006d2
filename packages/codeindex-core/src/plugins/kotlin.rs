//! Kotlin Language Plugin
//!
//! Extracts public declarations from Kotlin source using tree-sitter.
//! Supports classes (plain/data/sealed/enum), interfaces, objects, top-level
//! functions and properties, companion members, and recovery for the
//! constructor-injection parse quirk (annotation on its own line misparses
//! the class body into an ERROR node).

use std::collections::HashSet;

use tree_sitter::{Node, Parser};

use super::kdoc;
use crate::error::{IndexError, Result};
use crate::model::{Declaration, DeclarationKind, Visibility};
use crate::ports::{LanguageId, LanguagePlugin};

/// Annotations worth surfacing in the index (architecture-relevant).
const RELEVANT_ANNOTATIONS: &[&str] = &[
    "AndroidEntryPoint",
    "Composable",
    "Dao",
    "Database",
    "Entity",
    "HiltAndroidApp",
    "HiltViewModel",
    "Immutable",
    "Inject",
    "InstallIn",
    "Module",
    "Serializable",
    "Singleton",
    "Stable",
];

/// Annotations hidden unconditionally, even if ever allow-listed.
const SKIP_ANNOTATIONS: &[&str] = &["Preview", "Suppress", "SuppressLint"];

/// Node kinds whose raw text is taken verbatim as a rendered type. The tree
/// already encodes nullability and function-type syntax as text, so no
/// normalization is needed.
const TYPE_NODE_KINDS: &[&str] = &["user_type", "nullable_type", "function_type"];

/// Extracts declarations from Kotlin source files using tree-sitter.
pub struct KotlinPlugin {
    relevant_annotations: HashSet<&'static str>,
    skip_annotations: HashSet<&'static str>,
}

impl KotlinPlugin {
    pub fn new() -> Self {
        Self {
            relevant_annotations: RELEVANT_ANNOTATIONS.iter().copied().collect(),
            skip_annotations: SKIP_ANNOTATIONS.iter().copied().collect(),
        }
    }

    // ── Package extraction ──────────────────────────────────────────

    fn extract_package(&self, root: &Node, source: &str) -> String {
        for child in child_nodes(root) {
            if child.kind() == "package_header" {
                if let Some(ident) = find_child(&child, "identifier") {
                    return node_text(source, &ident).to_string();
                }
            }
        }
        String::new()
    }

    // ── Declaration extraction ──────────────────────────────────────

    /// Dispatch on node kind. Unknown kinds are skipped, never fatal.
    fn extract_declaration(
        &self,
        node: &Node,
        source: &str,
        siblings: &[Node],
        index: usize,
        namespace: &str,
        rel_path: &str,
    ) -> Option<Declaration> {
        match node.kind() {
            "class_declaration" => {
                self.extract_class(node, source, siblings, index, namespace, rel_path)
            }
            "object_declaration" => {
                self.extract_object(node, source, siblings, index, namespace, rel_path)
            }
            "function_declaration" => {
                self.extract_function(node, source, siblings, index, namespace, rel_path)
            }
            "property_declaration" => {
                self.extract_property(node, source, siblings, index, namespace, rel_path)
            }
            _ => None,
        }
    }

    // ── Class extraction ────────────────────────────────────────────

    fn extract_class(
        &self,
        node: &Node,
        source: &str,
        siblings: &[Node],
        index: usize,
        namespace: &str,
        rel_path: &str,
    ) -> Option<Declaration> {
        let visibility = self.visibility_of(node, source);
        if visibility.is_hidden() {
            return None;
        }

        let name = self.type_name(node, source)?;
        let kind = self.class_kind(node, source);
        let annotations = self.relevant_annotations_of(node, source);
        let doc_summary = self.find_kdoc(source, siblings, index);
        let modifiers = self.modifiers_of(node, source);
        let signature = self.class_signature(node, source, kind, &name, &annotations);
        let children = self.class_members(node, source, namespace, rel_path);

        Some(Declaration {
            kind,
            name,
            signature,
            doc_summary,
            annotations,
            visibility,
            modifiers,
            file_path: rel_path.to_string(),
            namespace: namespace.to_string(),
            children,
        })
    }

    /// Kind precedence: interface > enum > sealed > data > plain. A class
    /// can carry several qualifying keywords at once; only the governing
    /// tag is recorded.
    fn class_kind(&self, node: &Node, source: &str) -> DeclarationKind {
        let mut has_interface = false;
        let mut has_enum = false;
        let mut has_sealed = false;
        let mut has_data = false;

        for child in child_nodes(node) {
            match child.kind() {
                "interface" => has_interface = true,
                "enum" => has_enum = true,
                "modifiers" => {
                    for modifier in child_nodes(&child) {
                        match node_text(source, &modifier) {
                            "data" => has_data = true,
                            "sealed" => has_sealed = true,
                            "enum" => has_enum = true,
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        if has_interface {
            DeclarationKind::Interface
        } else if has_enum {
            DeclarationKind::EnumClass
        } else if has_sealed {
            DeclarationKind::SealedClass
        } else if has_data {
            DeclarationKind::DataClass
        } else {
            DeclarationKind::Class
        }
    }

    fn class_signature(
        &self,
        node: &Node,
        source: &str,
        kind: DeclarationKind,
        name: &str,
        annotations: &[String],
    ) -> String {
        let mut sig = String::new();
        for annotation in annotations {
            sig.push('@');
            sig.push_str(annotation);
            sig.push(' ');
        }
        sig.push_str(kind.keyword());
        sig.push(' ');
        sig.push_str(name);

        // Constructor parameters only for data-shaped types.
        if kind == DeclarationKind::DataClass {
            if let Some(ctor) = find_child(node, "primary_constructor") {
                let params = self.constructor_params(&ctor, source);
                if !params.is_empty() {
                    sig.push('(');
                    sig.push_str(&params.join(", "));
                    sig.push(')');
                }
            }
        }

        if let Some(supertype) = self.first_supertype(node, source) {
            sig.push_str(" : ");
            sig.push_str(&supertype);
        }
        sig
    }

    /// First declared supertype, with trailing invocation parens stripped
    /// for readability.
    fn first_supertype(&self, node: &Node, source: &str) -> Option<String> {
        find_child(node, "delegation_specifier").map(|spec| {
            let text = node_text(source, &spec);
            text.strip_suffix("()").unwrap_or(text).to_string()
        })
    }

    /// Primary constructor parameters, excluding private/internal and
    /// override ones.
    fn constructor_params(&self, ctor: &Node, source: &str) -> Vec<String> {
        let mut params = Vec::new();
        for child in child_nodes(ctor) {
            if child.kind() != "class_parameter" {
                continue;
            }

            let mut hidden = false;
            let mut is_override = false;
            let mut binding = "";
            let mut name = "";
            let mut param_type = "";

            for part in child_nodes(&child) {
                match part.kind() {
                    "modifiers" => {
                        for modifier in child_nodes(&part) {
                            match node_text(source, &modifier) {
                                "private" | "internal" => hidden = true,
                                "override" => is_override = true,
                                _ => {}
                            }
                        }
                    }
                    "binding_pattern_kind" => binding = node_text(source, &part),
                    "simple_identifier" => name = node_text(source, &part),
                    kind if TYPE_NODE_KINDS.contains(&kind) => {
                        param_type = node_text(source, &part)
                    }
                    _ => {}
                }
            }

            if hidden || is_override || name.is_empty() || param_type.is_empty() {
                continue;
            }
            if binding.is_empty() {
                params.push(format!("{}: {}", name, param_type));
            } else {
                params.push(format!("{} {}: {}", binding, name, param_type));
            }
        }
        params
    }

    // ── Constructor-injection ERROR node recovery ───────────────────

    /// Members recovered from the ERROR node that follows a class header
    /// when a constructor annotation sits on its own line: the parser wraps
    /// the real class body in a lambda_literal inside the ERROR node. The
    /// marker annotation plus that block are the positive identification;
    /// any other shape returns None and consumes nothing.
    fn recover_inject_constructor(
        &self,
        error_node: &Node,
        source: &str,
        namespace: &str,
        rel_path: &str,
    ) -> Option<(bool, Vec<Declaration>)> {
        let mut has_inject = false;
        let mut body_node = None;

        for child in child_nodes(error_node) {
            match child.kind() {
                "annotation" => {
                    if self.annotation_name(&child, source).as_deref() == Some("Inject") {
                        has_inject = true;
                    }
                }
                "lambda_literal" => body_node = Some(child),
                _ => {}
            }
        }

        let body = body_node?;
        let Some(statements) = find_child(&body, "statements") else {
            return Some((has_inject, Vec::new()));
        };

        let children = child_nodes(&statements);
        let mut members = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if let Some(decl) =
                self.extract_declaration(child, source, &children, i, namespace, rel_path)
            {
                members.push(decl);
            }
        }
        Some((has_inject, members))
    }

    // ── Object extraction ───────────────────────────────────────────

    fn extract_object(
        &self,
        node: &Node,
        source: &str,
        siblings: &[Node],
        index: usize,
        namespace: &str,
        rel_path: &str,
    ) -> Option<Declaration> {
        let visibility = self.visibility_of(node, source);
        if visibility.is_hidden() {
            return None;
        }

        let name = self.type_name(node, source)?;
        let annotations = self.relevant_annotations_of(node, source);
        let doc_summary = self.find_kdoc(source, siblings, index);

        let mut signature = format!("object {}", name);
        if let Some(supertype) = self.first_supertype(node, source) {
            signature.push_str(" : ");
            signature.push_str(&supertype);
        }

        let children = self.class_members(node, source, namespace, rel_path);

        Some(Declaration {
            kind: DeclarationKind::Object,
            name,
            signature,
            doc_summary,
            annotations,
            visibility,
            modifiers: vec![],
            file_path: rel_path.to_string(),
            namespace: namespace.to_string(),
            children,
        })
    }

    // ── Function extraction ─────────────────────────────────────────

    fn extract_function(
        &self,
        node: &Node,
        source: &str,
        siblings: &[Node],
        index: usize,
        namespace: &str,
        rel_path: &str,
    ) -> Option<Declaration> {
        let visibility = self.visibility_of(node, source);
        if visibility.is_hidden() {
            return None;
        }

        let modifiers = self.modifiers_of(node, source);
        // Overrides duplicate a definition visible at the supertype.
        if modifiers.iter().any(|m| m == "override") {
            return None;
        }

        let name = self.simple_name(node, source)?;

        let all_annotations = self.annotation_names(node, source);
        // Preview composables are noise, not API surface.
        if all_annotations.iter().any(|a| a == "Preview") {
            return None;
        }
        let annotations = self.filter_annotations(all_annotations);

        let doc_summary = self.find_kdoc(source, siblings, index);
        let signature = self.function_signature(node, source, &modifiers, &name);

        Some(Declaration {
            kind: DeclarationKind::Function,
            name,
            signature,
            doc_summary,
            annotations,
            visibility,
            modifiers,
            file_path: rel_path.to_string(),
            namespace: namespace.to_string(),
            children: vec![],
        })
    }

    fn function_signature(
        &self,
        node: &Node,
        source: &str,
        modifiers: &[String],
        name: &str,
    ) -> String {
        let mut sig = String::new();
        if modifiers.iter().any(|m| m == "suspend") {
            sig.push_str("suspend ");
        }
        sig.push_str("fun ");
        sig.push_str(name);
        sig.push('(');
        if let Some(params_node) = find_child(node, "function_value_parameters") {
            sig.push_str(&self.function_params(&params_node, source).join(", "));
        }
        sig.push(')');
        if let Some(return_type) = self.type_after_colon(node, source) {
            sig.push_str(": ");
            sig.push_str(&return_type);
        }
        sig
    }

    /// Parameter signatures as "name: Type" (no default values). A
    /// parameter whose type the tree does not render keeps its bare name.
    fn function_params(&self, params_node: &Node, source: &str) -> Vec<String> {
        let mut params = Vec::new();
        for child in child_nodes(params_node) {
            if child.kind() != "parameter" {
                continue;
            }
            let mut name = "";
            let mut param_type = "";
            for part in child_nodes(&child) {
                match part.kind() {
                    "simple_identifier" => name = node_text(source, &part),
                    kind if TYPE_NODE_KINDS.contains(&kind) => {
                        param_type = node_text(source, &part)
                    }
                    _ => {}
                }
            }
            if !name.is_empty() && !param_type.is_empty() {
                params.push(format!("{}: {}", name, param_type));
            } else if !name.is_empty() {
                params.push(name.to_string());
            }
        }
        params
    }

    /// Type node after the ':' separator (function return type, or a
    /// property type declared at the property level). None when the tree
    /// renders no type node; callers omit the suffix rather than inventing
    /// a placeholder.
    fn type_after_colon(&self, node: &Node, source: &str) -> Option<String> {
        let mut found_colon = false;
        for child in child_nodes(node) {
            if !found_colon && child.kind() == ":" {
                found_colon = true;
                continue;
            }
            if found_colon && TYPE_NODE_KINDS.contains(&child.kind()) {
                return Some(node_text(source, &child).to_string());
            }
        }
        None
    }

    // ── Property extraction ─────────────────────────────────────────

    fn extract_property(
        &self,
        node: &Node,
        source: &str,
        siblings: &[Node],
        index: usize,
        namespace: &str,
        rel_path: &str,
    ) -> Option<Declaration> {
        let visibility = self.visibility_of(node, source);
        if visibility.is_hidden() {
            return None;
        }

        let modifiers = self.modifiers_of(node, source);
        if modifiers.iter().any(|m| m == "override") {
            return None;
        }

        let mut binding = "val";
        let mut name = String::new();
        let mut property_type = String::new();

        for child in child_nodes(node) {
            match child.kind() {
                "binding_pattern_kind" => binding = node_text(source, &child),
                "variable_declaration" => {
                    for part in child_nodes(&child) {
                        match part.kind() {
                            "simple_identifier" => {
                                name = node_text(source, &part).to_string();
                            }
                            kind if TYPE_NODE_KINDS.contains(&kind) => {
                                property_type = node_text(source, &part).to_string();
                            }
                            _ => {}
                        }
                    }
                    // Fallback: the tree sometimes flattens "name: Type"
                    // into the declaration text without a type node.
                    if property_type.is_empty() {
                        let text = node_text(source, &child);
                        if let Some((n, t)) = text.split_once(':') {
                            name = n.trim().to_string();
                            property_type = t.trim().to_string();
                        }
                    }
                }
                _ => {}
            }
        }

        if name.is_empty() {
            return None;
        }

        if property_type.is_empty() {
            if let Some(t) = self.type_after_colon(node, source) {
                property_type = t;
            }
        }

        let annotations = self.relevant_annotations_of(node, source);
        let doc_summary = self.find_kdoc(source, siblings, index);

        let mut signature = String::new();
        if modifiers.iter().any(|m| m == "const") {
            signature.push_str("const ");
        }
        signature.push_str(binding);
        signature.push(' ');
        signature.push_str(&name);
        if !property_type.is_empty() {
            signature.push_str(": ");
            signature.push_str(&property_type);
        }

        let kind = if binding == "var" {
            DeclarationKind::Var
        } else {
            DeclarationKind::Val
        };

        Some(Declaration {
            kind,
            name,
            signature,
            doc_summary,
            annotations,
            visibility,
            modifiers,
            file_path: rel_path.to_string(),
            namespace: namespace.to_string(),
            children: vec![],
        })
    }

    // ── Class member extraction ─────────────────────────────────────

    fn class_members(
        &self,
        class_node: &Node,
        source: &str,
        namespace: &str,
        rel_path: &str,
    ) -> Vec<Declaration> {
        let Some(body) = find_child(class_node, "class_body")
            .or_else(|| find_child(class_node, "enum_class_body"))
        else {
            return Vec::new();
        };

        let children = child_nodes(&body);
        let mut members = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if child.kind() == "companion_object" {
                // One companion block per type; its members belong to the
                // type itself and flatten into the parent's children.
                members.extend(self.companion_members(child, source, namespace, rel_path));
                continue;
            }
            if let Some(decl) =
                self.extract_declaration(child, source, &children, i, namespace, rel_path)
            {
                members.push(decl);
            }
        }
        members
    }

    fn companion_members(
        &self,
        companion: &Node,
        source: &str,
        namespace: &str,
        rel_path: &str,
    ) -> Vec<Declaration> {
        let Some(body) = find_child(companion, "class_body") else {
            return Vec::new();
        };

        let children = child_nodes(&body);
        let mut members = Vec::new();
        for (i, child) in children.iter().enumerate() {
            let decl = match child.kind() {
                "function_declaration" => {
                    self.extract_function(child, source, &children, i, namespace, rel_path)
                }
                "property_declaration" => {
                    self.extract_property(child, source, &children, i, namespace, rel_path)
                }
                _ => None,
            };
            if let Some(d) = decl {
                members.push(d);
            }
        }
        members
    }

    // ── Annotation extraction ───────────────────────────────────────

    /// All annotation names on a declaration, unfiltered.
    fn annotation_names(&self, node: &Node, source: &str) -> Vec<String> {
        let mut names = Vec::new();
        for child in child_nodes(node) {
            if child.kind() != "modifiers" {
                continue;
            }
            for modifier in child_nodes(&child) {
                if modifier.kind() == "annotation" {
                    if let Some(name) = self.annotation_name(&modifier, source) {
                        names.push(name);
                    }
                }
            }
        }
        names
    }

    /// Deny-list first, then allow-list. Deny takes precedence even if a
    /// marker were ever added to both sets.
    fn filter_annotations(&self, names: Vec<String>) -> Vec<String> {
        names
            .into_iter()
            .filter(|a| !self.skip_annotations.contains(a.as_str()))
            .filter(|a| self.relevant_annotations.contains(a.as_str()))
            .collect()
    }

    fn relevant_annotations_of(&self, node: &Node, source: &str) -> Vec<String> {
        self.filter_annotations(self.annotation_names(node, source))
    }

    /// Annotation name without the qualifier or argument list.
    fn annotation_name(&self, annotation: &Node, source: &str) -> Option<String> {
        for child in child_nodes(annotation) {
            match child.kind() {
                "user_type" => {
                    return Some(
                        find_child(&child, "type_identifier")
                            .map(|t| node_text(source, &t).to_string())
                            .unwrap_or_else(|| node_text(source, &child).to_string()),
                    );
                }
                "constructor_invocation" => {
                    // Annotation with arguments: @Marker(arg = ...)
                    if let Some(user_type) = find_child(&child, "user_type") {
                        return Some(
                            find_child(&user_type, "type_identifier")
                                .map(|t| node_text(source, &t).to_string())
                                .unwrap_or_else(|| node_text(source, &user_type).to_string()),
                        );
                    }
                }
                _ => {}
            }
        }
        None
    }

    // ── Modifier and visibility extraction ──────────────────────────

    /// Explicit visibility modifier; absence means public.
    fn visibility_of(&self, node: &Node, source: &str) -> Visibility {
        find_child(node, "modifiers")
            .and_then(|mods| find_child(&mods, "visibility_modifier"))
            .map(|v| Visibility::from_modifier(node_text(source, &v)))
            .unwrap_or(Visibility::Public)
    }

    /// Non-annotation, non-visibility modifiers (suspend, const, override,
    /// abstract, ...).
    fn modifiers_of(&self, node: &Node, source: &str) -> Vec<String> {
        let Some(mods) = find_child(node, "modifiers") else {
            return Vec::new();
        };
        child_nodes(&mods)
            .iter()
            .filter(|m| !matches!(m.kind(), "annotation" | "visibility_modifier"))
            .map(|m| node_text(source, m).to_string())
            .collect()
    }

    // ── KDoc lookup ─────────────────────────────────────────────────

    /// Two-pass lookup: the preceding sibling comment node first, then a
    /// bounded raw-text lookback. Never fails; no match yields an empty
    /// summary.
    fn find_kdoc(&self, source: &str, siblings: &[Node], index: usize) -> String {
        if index > 0 {
            let prev = &siblings[index - 1];
            if prev.kind() == "multiline_comment" {
                let text = node_text(source, prev);
                if text.starts_with("/**") {
                    return kdoc::summarize(text);
                }
            }
        }

        siblings
            .get(index)
            .map(|node| kdoc::lookback_summary(source, node.start_byte()))
            .unwrap_or_default()
    }

    // ── Name extraction ─────────────────────────────────────────────

    fn type_name(&self, node: &Node, source: &str) -> Option<String> {
        find_child(node, "type_identifier")
            .map(|n| node_text(source, &n).to_string())
            .filter(|n| !n.is_empty())
    }

    fn simple_name(&self, node: &Node, source: &str) -> Option<String> {
        find_child(node, "simple_identifier")
            .map(|n| node_text(source, &n).to_string())
            .filter(|n| !n.is_empty())
    }
}

impl Default for KotlinPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for KotlinPlugin {
    fn language_id(&self) -> LanguageId {
        LanguageId::Kotlin
    }

    fn file_extension(&self) -> &'static str {
        ".kt"
    }

    fn parse_file(&self, source: &str, rel_path: &str) -> Result<Vec<Declaration>> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin::language())
            .map_err(|e| IndexError::parse(format!("failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| IndexError::parse("failed to parse source"))?;
        let root = tree.root_node();

        let namespace = self.extract_package(&root, source);
        let children = child_nodes(&root);

        let mut declarations = Vec::new();
        let mut skip_next = false;

        for (i, node) in children.iter().enumerate() {
            if skip_next {
                skip_next = false;
                continue;
            }

            let Some(mut decl) =
                self.extract_declaration(node, source, &children, i, &namespace, rel_path)
            else {
                continue;
            };

            // A class header followed by an ERROR node is the
            // constructor-injection misparse; only the first such node is
            // consumed, and only on a positive match.
            if node.kind() == "class_declaration" {
                if let Some(error_node) = children.get(i + 1).filter(|n| n.kind() == "ERROR") {
                    if let Some((has_inject, members)) =
                        self.recover_inject_constructor(error_node, source, &namespace, rel_path)
                    {
                        if has_inject && !decl.annotations.iter().any(|a| a == "Inject") {
                            decl.annotations.push("Inject".to_string());
                        }
                        decl.children.extend(members);
                        skip_next = true;
                    }
                }
            }

            declarations.push(decl);
        }

        Ok(declarations)
    }
}

// ── Node helpers ────────────────────────────────────────────────────

fn child_nodes<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    (0..node.child_count()).filter_map(|i| node.child(i)).collect()
}

fn node_text<'a>(source: &'a str, node: &Node) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

fn find_child<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|c| c.kind() == kind)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(source: &str) -> Vec<Declaration> {
        KotlinPlugin::new()
            .parse_file(source, "test.kt")
            .expect("parse")
    }

    #[test]
    fn test_extracts_public_class_with_members() {
        let decls = parse(
            r#"
package com.app.core

/** Runs the engine. */
class Engine {
    fun start() {}
    private fun warmUp() {}
    val status: String = "idle"
}
"#,
        );

        assert_eq!(decls.len(), 1);
        let engine = &decls[0];
        assert_eq!(engine.kind, DeclarationKind::Class);
        assert_eq!(engine.name, "Engine");
        assert_eq!(engine.namespace, "com.app.core");
        assert_eq!(engine.doc_summary, "Runs the engine.");
        assert_eq!(engine.signature, "class Engine");

        let names: Vec<&str> = engine.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["start", "status"]);
        assert_eq!(engine.children[0].signature, "fun start()");
        assert_eq!(engine.children[1].signature, "val status: String");
    }

    #[test]
    fn test_private_and_internal_dropped() {
        let decls = parse(
            r#"
package com.app

private class Hidden
internal fun helper() {}
class Visible
"#,
        );

        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Visible");
    }

    #[test]
    fn test_override_functions_excluded() {
        let decls = parse(
            r#"
package com.app

class Impl : Base() {
    override fun run() {}
    fun own() {}
}
"#,
        );

        let names: Vec<&str> = decls[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["own"]);
    }

    #[test]
    fn test_class_kind_precedence() {
        let decls = parse(
            r#"
package com.app

interface Repo
sealed class Result
data class User(val id: Int, val name: String)
enum class Color { RED, GREEN }
class Plain
"#,
        );

        let kinds: Vec<DeclarationKind> = decls.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeclarationKind::Interface,
                DeclarationKind::SealedClass,
                DeclarationKind::DataClass,
                DeclarationKind::EnumClass,
                DeclarationKind::Class,
            ]
        );
    }

    #[test]
    fn test_data_class_signature_includes_params() {
        let decls = parse("package a\n\ndata class User(val id: Int, val name: String)\n");
        assert_eq!(
            decls[0].signature,
            "data class User(val id: Int, val name: String)"
        );
    }

    #[test]
    fn test_data_class_private_param_excluded() {
        let decls = parse("package a\n\ndata class Token(val value: String, private val seed: Int)\n");
        assert_eq!(decls[0].signature, "data class Token(val value: String)");
    }

    #[test]
    fn test_supertype_invocation_parens_stripped() {
        let decls = parse("package a\n\nclass MainViewModel : ViewModel() {\n}\n");
        assert_eq!(decls[0].signature, "class MainViewModel : ViewModel");
    }

    #[test]
    fn test_function_signature_with_return_type() {
        let decls = parse("package a\n\nfun load(id: Int, flags: List<String>): User? = TODO()\n");
        assert_eq!(
            decls[0].signature,
            "fun load(id: Int, flags: List<String>): User?"
        );
    }

    #[test]
    fn test_function_without_return_type_has_no_suffix() {
        let decls = parse("package a\n\nfun fire(event: Event) {}\n");
        assert_eq!(decls[0].signature, "fun fire(event: Event)");
        assert!(!decls[0].signature.contains("): "));
    }

    #[test]
    fn test_suspend_modifier_rendered() {
        let decls = parse("package a\n\nsuspend fun sync() {}\n");
        assert_eq!(decls[0].signature, "suspend fun sync()");
        assert!(decls[0].modifiers.iter().any(|m| m == "suspend"));
    }

    #[test]
    fn test_annotation_allow_list() {
        let decls = parse("package a\n\n@Composable\nfun HomeScreen() {}\n");
        assert_eq!(decls[0].annotations, vec!["Composable".to_string()]);
    }

    #[test]
    fn test_suppress_annotation_filtered_but_declaration_kept() {
        let decls = parse("package a\n\n@Suppress(\"unused\")\nfun kept() {}\n");
        assert_eq!(decls.len(), 1);
        assert!(decls[0].annotations.is_empty());
    }

    #[test]
    fn test_preview_function_dropped_entirely() {
        let decls = parse(
            "package a\n\n@Preview\n@Composable\nfun PreviewHome() {}\n\n@Composable\nfun Home() {}\n",
        );
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Home");
    }

    #[test]
    fn test_irrelevant_annotation_not_surfaced() {
        let decls = parse("package a\n\n@JvmStatic\nfun bridge() {}\n");
        assert_eq!(decls.len(), 1);
        assert!(decls[0].annotations.is_empty());
    }

    #[test]
    fn test_object_with_supertype() {
        let decls = parse("package a\n\nobject Registry : Provider {\n    fun provide() {}\n}\n");
        assert_eq!(decls[0].kind, DeclarationKind::Object);
        assert_eq!(decls[0].signature, "object Registry : Provider");
        assert_eq!(decls[0].children.len(), 1);
    }

    #[test]
    fn test_companion_members_flattened() {
        let decls = parse(
            r#"
package a

class Holder {
    companion object {
        const val TAG: String = "holder"
        fun create(): Holder = Holder()
    }
}
"#,
        );

        let names: Vec<&str> = decls[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["TAG", "create"]);
        assert_eq!(decls[0].children[0].signature, "const val TAG: String");
    }

    #[test]
    fn test_top_level_properties() {
        let decls = parse("package a\n\nval retries: Int = 3\nvar cursor: Long = 0L\n");
        assert_eq!(decls[0].kind, DeclarationKind::Val);
        assert_eq!(decls[0].signature, "val retries: Int");
        assert_eq!(decls[1].kind, DeclarationKind::Var);
        assert_eq!(decls[1].signature, "var cursor: Long");
    }

    #[test]
    fn test_enum_members_extracted_from_enum_body() {
        let decls = parse(
            r#"
package a

enum class Direction {
    NORTH, SOUTH;

    fun flip(): Direction = this
}
"#,
        );

        assert_eq!(decls[0].kind, DeclarationKind::EnumClass);
        let names: Vec<&str> = decls[0].children.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"flip"));
    }

    #[test]
    fn test_missing_package_yields_empty_namespace() {
        let decls = parse("class Floating\n");
        assert_eq!(decls[0].namespace, "");
    }

    #[test]
    fn test_inject_constructor_recovery() {
        // The annotation on its own line misparses the class body into an
        // ERROR node; extraction must still yield one class carrying the
        // marker with its members intact.
        let decls = parse(
            r#"
package com.app.data

class UserRepository
@Inject constructor(
    private val api: ApiService
) {
    fun fetchUsers(): List<User> = api.list()
}
"#,
        );

        assert_eq!(decls.len(), 1);
        let repo = &decls[0];
        assert_eq!(repo.name, "UserRepository");
        assert!(repo.annotations.iter().any(|a| a == "Inject"));
        let names: Vec<&str> = repo.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["fetchUsers"]);
    }

    #[test]
    fn test_malformed_source_does_not_panic() {
        let result = KotlinPlugin::new().parse_file("fun fun fun ((( class", "broken.kt");
        assert!(result.is_ok());
    }

    #[test]
    fn test_kdoc_on_annotated_function() {
        let decls = parse(
            "package a\n\n/** Renders the home screen. */\n@Composable\nfun Home() {}\n",
        );
        assert_eq!(decls[0].doc_summary, "Renders the home screen.");
    }
}
