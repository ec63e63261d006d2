//! Namespace grouping and merge engine
//!
//! Pure batch transformation: strip a configured namespace prefix, bucket
//! declarations by namespace, collapse namespaces deeper than the merge
//! threshold into their ancestor, and impose a deterministic order. Output
//! is independent of input order, so parallel extraction upstream needs no
//! ordering guarantees of its own.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{Declaration, NamespaceGroup, ROOT_NAMESPACE};

/// Strip a common namespace prefix, returning the relative namespace.
///
/// Namespaces outside the expected prefix are left unchanged; they are still
/// indexed, just under their original name.
pub fn strip_prefix(namespace: &str, prefix: &str) -> String {
    match namespace.strip_prefix(prefix) {
        Some(stripped) => stripped.strip_prefix('.').unwrap_or(stripped).to_string(),
        None => namespace.to_string(),
    }
}

/// Collapse namespaces deeper than `threshold` into their ancestor.
///
/// Pure function of (namespace, threshold): with threshold 2,
/// "data.db.converters" becomes "data.db" while "core.hrv" and "data" are
/// unchanged.
pub fn merge_namespace(namespace: &str, threshold: usize) -> String {
    let parts: Vec<&str> = namespace.split('.').collect();
    if parts.len() > threshold {
        parts[..threshold].join(".")
    } else {
        namespace.to_string()
    }
}

/// Group declarations by stripped, merged namespace with deterministic
/// ordering.
///
/// Groups are ordered by ascending namespace string; within a group,
/// declarations are ordered by file path, then kind priority, then name.
pub fn group_declarations(
    declarations: Vec<Declaration>,
    prefix: &str,
    merge_threshold: usize,
) -> Vec<NamespaceGroup> {
    let mut buckets: BTreeMap<String, Vec<Declaration>> = BTreeMap::new();

    for decl in declarations {
        let mut stripped = strip_prefix(&decl.namespace, prefix);
        if stripped.is_empty() {
            stripped = ROOT_NAMESPACE.to_string();
        }
        let merged = merge_namespace(&stripped, merge_threshold);
        buckets.entry(merged).or_default().push(decl);
    }

    buckets
        .into_iter()
        .map(|(namespace, mut decls)| {
            decls.sort_by(compare_declarations);
            NamespaceGroup::new(namespace, decls)
        })
        .collect()
}

fn compare_declarations(a: &Declaration, b: &Declaration) -> Ordering {
    (a.file_path.as_str(), a.kind.priority(), a.name.as_str()).cmp(&(
        b.file_path.as_str(),
        b.kind.priority(),
        b.name.as_str(),
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DeclarationKind, Visibility};

    fn decl(kind: DeclarationKind, name: &str, namespace: &str, file_path: &str) -> Declaration {
        Declaration {
            kind,
            name: name.to_string(),
            signature: format!("{} {}", kind.keyword(), name),
            doc_summary: String::new(),
            annotations: vec![],
            visibility: Visibility::Public,
            modifiers: vec![],
            file_path: file_path.to_string(),
            namespace: namespace.to_string(),
            children: vec![],
        }
    }

    #[test]
    fn test_strip_prefix_matching() {
        assert_eq!(strip_prefix("com.app.core", "com.app"), "core");
        assert_eq!(strip_prefix("com.app", "com.app"), "");
    }

    #[test]
    fn test_strip_prefix_non_matching() {
        assert_eq!(strip_prefix("org.other.util", "com.app"), "org.other.util");
    }

    #[test]
    fn test_merge_below_threshold_unchanged() {
        assert_eq!(merge_namespace("data", 2), "data");
        assert_eq!(merge_namespace("core.hrv", 2), "core.hrv");
    }

    #[test]
    fn test_merge_above_threshold_collapses() {
        assert_eq!(merge_namespace("data.db.converters", 2), "data.db");
        assert_eq!(merge_namespace("a.b.c.d", 2), "a.b");
        assert_eq!(merge_namespace("a.b.c.d", 3), "a.b.c");
    }

    #[test]
    fn test_grouping_scenario() {
        // prefix "com.app", threshold 2: dao/converters merge into data.db,
        // core stays its own group.
        let decls = vec![
            decl(
                DeclarationKind::Interface,
                "UserDao",
                "com.app.data.db.dao",
                "data/db/dao/UserDao.kt",
            ),
            decl(
                DeclarationKind::Class,
                "Converters",
                "com.app.data.db.converters",
                "data/db/converters/Converters.kt",
            ),
            decl(
                DeclarationKind::Class,
                "Engine",
                "com.app.core",
                "core/Engine.kt",
            ),
        ];

        let groups = group_declarations(decls, "com.app", 2);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].namespace, "core");
        assert_eq!(groups[1].namespace, "data.db");
        assert_eq!(groups[1].declarations.len(), 2);
        // Internally file-path-sorted.
        assert_eq!(groups[1].declarations[0].name, "Converters");
        assert_eq!(groups[1].declarations[1].name, "UserDao");
    }

    #[test]
    fn test_empty_namespace_maps_to_root() {
        let decls = vec![decl(DeclarationKind::Function, "main", "com.app", "Main.kt")];
        let groups = group_declarations(decls, "com.app", 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].namespace, ROOT_NAMESPACE);
    }

    #[test]
    fn test_sort_by_kind_priority_within_file() {
        let decls = vec![
            decl(DeclarationKind::Var, "counter", "com.app.core", "core/A.kt"),
            decl(DeclarationKind::Function, "run", "com.app.core", "core/A.kt"),
            decl(DeclarationKind::Class, "Engine", "com.app.core", "core/A.kt"),
            decl(DeclarationKind::Interface, "Clock", "com.app.core", "core/A.kt"),
        ];

        let groups = group_declarations(decls, "com.app", 2);
        let names: Vec<&str> = groups[0]
            .declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Clock", "Engine", "run", "counter"]);
    }

    #[test]
    fn test_sort_by_name_when_kind_and_file_equal() {
        let decls = vec![
            decl(DeclarationKind::Function, "zeta", "com.app.core", "core/A.kt"),
            decl(DeclarationKind::Function, "alpha", "com.app.core", "core/A.kt"),
        ];

        let groups = group_declarations(decls, "com.app", 2);
        assert_eq!(groups[0].declarations[0].name, "alpha");
        assert_eq!(groups[0].declarations[1].name, "zeta");
    }

    #[test]
    fn test_idempotent_under_input_reordering() {
        let make = |order: &[usize]| {
            let all = vec![
                decl(DeclarationKind::Class, "B", "com.app.x.y.z", "x/B.kt"),
                decl(DeclarationKind::Interface, "A", "com.app.x.y", "x/A.kt"),
                decl(DeclarationKind::Val, "c", "com.app", "C.kt"),
            ];
            let reordered: Vec<Declaration> = order.iter().map(|&i| all[i].clone()).collect();
            group_declarations(reordered, "com.app", 2)
        };

        let forward = make(&[0, 1, 2]);
        let reversed = make(&[2, 1, 0]);
        let shuffled = make(&[1, 2, 0]);
        assert_eq!(forward, reversed);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_groups_sorted_lexicographically() {
        let decls = vec![
            decl(DeclarationKind::Class, "Z", "com.app.ui", "ui/Z.kt"),
            decl(DeclarationKind::Class, "A", "com.app.core", "core/A.kt"),
            decl(DeclarationKind::Function, "top", "com.app", "Top.kt"),
        ];

        let groups = group_declarations(decls, "com.app", 2);
        let names: Vec<&str> = groups.iter().map(|g| g.namespace.as_str()).collect();
        // "_root" sorts per its literal text, no special-casing.
        assert_eq!(names, vec!["_root", "core", "ui"]);
    }
}
