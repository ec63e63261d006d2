//! codeindex CLI
//!
//! Parses source files, groups declarations by namespace, and writes a
//! compact two-level markdown index. Modules come from an `aidocs.yaml`
//! config file or directly from flags.

mod config;
mod render;

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codeindex_core::processor::DEFAULT_MERGE_THRESHOLD;
use codeindex_core::{process_module, ModuleOutcome, ModuleSpec};

#[derive(Debug, Parser)]
#[command(name = "codeindex", about = "Generate a code index from source files")]
struct Cli {
    /// Path to an aidocs.yaml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source directories, comma-separated
    #[arg(long)]
    src: Option<String>,

    /// Source language
    #[arg(long, default_value = "kotlin")]
    lang: String,

    /// Output directory (default: docs/code-index)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Module name
    #[arg(long)]
    module: Option<String>,

    /// Namespace prefix to strip
    #[arg(long)]
    prefix: Option<String>,

    /// Namespace depth at which deeper namespaces merge into their parent
    #[arg(long, default_value_t = DEFAULT_MERGE_THRESHOLD)]
    merge_threshold: usize,

    /// Also write each module index as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let (specs, output_dir) = resolve_modules(&cli)?;

    let mut indexed = Vec::new();
    for spec in &specs {
        info!("processing module: {}", spec.name);
        match process_module(spec)? {
            ModuleOutcome::NoSources => {
                info!("no sources found for module {}, skipping", spec.name);
            }
            ModuleOutcome::Indexed(index) => {
                render::write_module(&output_dir, &index)?;
                if cli.json {
                    render::write_json(&output_dir, &index)?;
                }
                indexed.push(index);
            }
        }
    }

    if indexed.is_empty() {
        bail!("no modules produced output");
    }

    render::write_root_index(&output_dir, &indexed)?;

    info!("generated code index in {}", output_dir.display());
    for index in &indexed {
        info!(
            "  {}: {} declarations in {} namespaces",
            index.name,
            index.declaration_count,
            index.groups.len()
        );
    }
    Ok(())
}

/// Resolve module specs and the output directory from the config file or
/// from direct flags. Relative paths resolve against the config file's
/// parent directory, or the working directory in flag mode.
fn resolve_modules(cli: &Cli) -> anyhow::Result<(Vec<ModuleSpec>, PathBuf)> {
    if let Some(ref config_path) = cli.config {
        let config = config::load(config_path)?;
        let project_root = config_path
            .canonicalize()?
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let specs = config
            .modules
            .iter()
            .map(|module| ModuleSpec {
                name: module.name.clone(),
                source_dirs: module
                    .source_dirs
                    .iter()
                    .map(|dir| project_root.join(dir))
                    .collect(),
                namespace_prefix: module.prefix.clone(),
                language: config.language.clone(),
                merge_threshold: config.merge_threshold,
            })
            .collect();

        let output_dir = project_root.join(&config.output_dir);
        return Ok((specs, output_dir));
    }

    let (Some(src), Some(module), Some(prefix)) = (&cli.src, &cli.module, &cli.prefix) else {
        bail!("--src, --module, and --prefix are required when not using --config");
    };

    let source_dirs = src
        .split(',')
        .map(|dir| PathBuf::from(dir.trim()))
        .collect();
    let spec = ModuleSpec {
        name: module.clone(),
        source_dirs,
        namespace_prefix: prefix.clone(),
        language: cli.lang.clone(),
        merge_threshold: cli.merge_threshold,
    };
    let output_dir = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from("docs/code-index"));
    Ok((vec![spec], output_dir))
}
