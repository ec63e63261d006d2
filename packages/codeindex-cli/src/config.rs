//! YAML configuration loading.
//!
//! An `aidocs.yaml` file declares the language, output directory, merge
//! threshold, and module list; relative paths are resolved against the
//! config file's parent directory by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use codeindex_core::processor::DEFAULT_MERGE_THRESHOLD;

#[derive(Debug, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_merge_threshold")]
    pub merge_threshold: usize,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    pub source_dirs: Vec<PathBuf>,
    pub prefix: String,
}

fn default_language() -> String {
    "kotlin".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs/code-index")
}

fn default_merge_threshold() -> usize {
    DEFAULT_MERGE_THRESHOLD
}

pub fn load(path: &Path) -> anyhow::Result<IndexConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: IndexConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let yaml = r#"
language: kotlin
output_dir: docs/index
merge_threshold: 3
modules:
  - name: app
    source_dirs:
      - app/src/main/java
    prefix: com.example.app
"#;
        let config: IndexConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.language, "kotlin");
        assert_eq!(config.merge_threshold, 3);
        assert_eq!(config.modules.len(), 1);
        assert_eq!(config.modules[0].prefix, "com.example.app");
    }

    #[test]
    fn test_merge_threshold_defaults_to_two() {
        let yaml = "modules: []\n";
        let config: IndexConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.merge_threshold, 2);
        assert_eq!(config.language, "kotlin");
        assert_eq!(config.output_dir, PathBuf::from("docs/code-index"));
    }
}
