//! Markdown index assembly.
//!
//! Pure string builders over the core's namespace groups, plus thin file
//! writers. Two levels: per-namespace pages under `<out>/<module>/`, a
//! module summary at `<out>/<module>.md`, and a root index at
//! `<out>/index.md`. No extraction logic lives here.

use std::fs;
use std::path::Path;

use anyhow::Context;

use codeindex_core::{Declaration, ModuleIndex, NamespaceGroup};

/// One namespace page: declarations grouped by source file, members nested
/// one level beneath their owner.
pub fn render_namespace_page(module: &str, group: &NamespaceGroup) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}: {}\n", module, group.namespace));

    let mut current_file = "";
    for decl in &group.declarations {
        if decl.file_path != current_file {
            current_file = &decl.file_path;
            out.push_str(&format!("\n## `{}`\n\n", current_file));
        }
        push_declaration(&mut out, decl, 0);
    }
    out
}

fn push_declaration(out: &mut String, decl: &Declaration, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}- `{}`\n", indent, decl.signature));
    if !decl.doc_summary.is_empty() {
        out.push_str(&format!("{}  {}\n", indent, decl.doc_summary));
    }
    for child in &decl.children {
        push_declaration(out, child, depth + 1);
    }
}

/// Module summary: one line per namespace group with its declaration count
/// and a link to the namespace page.
pub fn render_module_index(index: &ModuleIndex) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", index.name));
    out.push_str(&format!(
        "{} declarations in {} namespaces.\n\n",
        index.declaration_count,
        index.groups.len()
    ));
    for group in &index.groups {
        out.push_str(&format!(
            "- [{}]({}/{}) ({})\n",
            group.namespace,
            index.name,
            group.file_name(),
            group.declarations.len()
        ));
    }
    out
}

/// Root index across all modules.
pub fn render_root_index(indices: &[ModuleIndex]) -> String {
    let mut out = String::new();
    out.push_str("# Code Index\n\n");
    for index in indices {
        out.push_str(&format!(
            "- [{}]({}.md): {} declarations in {} namespaces\n",
            index.name,
            index.name,
            index.declaration_count,
            index.groups.len()
        ));
    }
    out
}

/// Write the module summary and every namespace page beneath `output_dir`.
pub fn write_module(output_dir: &Path, index: &ModuleIndex) -> anyhow::Result<()> {
    let summary_path = output_dir.join(format!("{}.md", index.name));
    write_file(&summary_path, &render_module_index(index))?;

    for group in &index.groups {
        let page_path = output_dir.join(&index.name).join(group.file_name());
        write_file(&page_path, &render_namespace_page(&index.name, group))?;
    }
    Ok(())
}

/// Machine-readable dump of one module index.
pub fn write_json(output_dir: &Path, index: &ModuleIndex) -> anyhow::Result<()> {
    let path = output_dir.join(format!("{}.json", index.name));
    let json = serde_json::to_string_pretty(index).context("failed to serialize module index")?;
    write_file(&path, &json)
}

pub fn write_root_index(output_dir: &Path, indices: &[ModuleIndex]) -> anyhow::Result<()> {
    write_file(&output_dir.join("index.md"), &render_root_index(indices))
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
