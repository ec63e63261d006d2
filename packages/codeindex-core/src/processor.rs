//! Module processor
//!
//! One entry point per logical unit of work: resolve the language plugin,
//! discover source files, extract declarations per file on a rayon pool,
//! group, and report. Per-file failures are counted and logged; they never
//! abort the run. An empty module is an explicit outcome, not an error.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{IndexError, Result};
use crate::grouping::group_declarations;
use crate::model::{Declaration, NamespaceGroup};
use crate::plugins::plugin_for;
use crate::ports::{LanguageId, LanguagePlugin};

/// Default namespace depth retained before deeper segments collapse.
pub const DEFAULT_MERGE_THRESHOLD: usize = 2;

/// Everything needed to index one module.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    pub name: String,
    /// Ordered source roots; the first is the root for relative paths.
    pub source_dirs: Vec<PathBuf>,
    /// Common namespace prefix to strip (e.g. "com.example.app").
    pub namespace_prefix: String,
    /// Language selector (e.g. "kotlin"). Unsupported selectors fail
    /// before any file I/O.
    pub language: String,
    pub merge_threshold: usize,
}

/// Result of indexing one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleIndex {
    pub name: String,
    pub groups: Vec<NamespaceGroup>,
    /// Top-level declarations across all groups.
    pub declaration_count: usize,
    pub file_count: usize,
    /// Files that failed to read or parse; already logged, never fatal.
    pub failed_files: usize,
}

/// Outcome of processing one module.
#[derive(Debug)]
pub enum ModuleOutcome {
    /// No source files discovered under any configured root. A valid (if
    /// unusual) result the orchestrator reacts to, e.g. by skipping the
    /// module in a multi-module run.
    NoSources,
    Indexed(ModuleIndex),
}

/// Process a single module: discover, extract, group.
pub fn process_module(spec: &ModuleSpec) -> Result<ModuleOutcome> {
    let language = LanguageId::from_name(&spec.language)
        .ok_or_else(|| IndexError::UnsupportedLanguage(spec.language.clone()))?;
    let plugin = plugin_for(language);

    let files = discover_files(&spec.source_dirs, plugin.file_extension());
    if files.is_empty() {
        return Ok(ModuleOutcome::NoSources);
    }
    info!(module = %spec.name, files = files.len(), "discovered source files");

    let source_root = spec.source_dirs[0].as_path();
    let results: Vec<std::result::Result<Vec<Declaration>, String>> = files
        .par_iter()
        .map(|path| extract_file(plugin.as_ref(), path, source_root))
        .collect();

    let mut declarations = Vec::new();
    let mut failed_files = 0;
    for result in results {
        match result {
            Ok(decls) => declarations.extend(decls),
            Err(message) => {
                failed_files += 1;
                warn!(module = %spec.name, "{}", message);
            }
        }
    }

    let groups: Vec<NamespaceGroup> =
        group_declarations(declarations, &spec.namespace_prefix, spec.merge_threshold);
    let declaration_count = groups.iter().map(|g| g.declarations.len()).sum();
    info!(
        module = %spec.name,
        declarations = declaration_count,
        groups = groups.len(),
        failed = failed_files,
        "module indexed"
    );

    Ok(ModuleOutcome::Indexed(ModuleIndex {
        name: spec.name.clone(),
        groups,
        declaration_count,
        file_count: files.len(),
        failed_files,
    }))
}

/// Discover source files with the plugin's extension, sorted per root for a
/// stable discovery order. A missing root is a warning, not a failure.
fn discover_files(source_dirs: &[PathBuf], extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in source_dirs {
        if !dir.exists() {
            warn!("source directory not found: {}", dir.display());
            continue;
        }
        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("walk error under {}: {}", dir.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(extension)
            {
                files.push(entry.into_path());
            }
        }
    }
    files
}

fn extract_file(
    plugin: &dyn LanguagePlugin,
    path: &Path,
    source_root: &Path,
) -> std::result::Result<Vec<Declaration>, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let rel_path = path
        .strip_prefix(source_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    plugin
        .parse_file(&source, &rel_path)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
}
