use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Corpus analysis settings, loadable from TOML. Every field has a default
/// so a partial file (or none at all) is fine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Root of the compiler-test corpus to scan.
    pub corpus_dir: PathBuf,
    /// Extra glob patterns admitting files whose names carry no OpenMP
    /// keyword.
    pub patterns: Vec<String>,
    pub extensions: Vec<String>,
    /// Arguments handed to the external front end per file.
    pub parser_args: Vec<String>,
    pub export_path: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("."),
            patterns: vec![
                "**/openmp*.c".to_string(),
                "**/openmp*.cpp".to_string(),
                "**/OpenMP/**/*.c".to_string(),
                "**/OpenMP/**/*.cpp".to_string(),
                "**/fopenmp*.c".to_string(),
                "**/fopenmp*.cpp".to_string(),
            ],
            extensions: vec![
                "c".to_string(),
                "cpp".to_string(),
                "cc".to_string(),
                "cxx".to_string(),
            ],
            parser_args: vec!["-fopenmp".to_string(), "-std=c++17".to_string()],
            export_path: PathBuf::from("extracted_patterns.json"),
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
