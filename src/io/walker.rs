use anyhow::Result;
use ignore::WalkBuilder;
use log::debug;
use std::path::{Path, PathBuf};

/// Filename substrings that mark a candidate before reading it.
static FILENAME_KEYWORDS: &[&str] = &["openmp", "omp", "fopenmp", "parallel", "pragma_omp"];

/// Content substrings that confirm a file actually exercises OpenMP.
static CONTENT_INDICATORS: &[&str] = &["#pragma omp", "-fopenmp", "openmp", "__kmpc_", "omp_"];

/// Discovers OpenMP test files under a corpus root. Candidates come from the
/// extension filter plus either a filename keyword or an explicit glob
/// pattern; each candidate is then re-checked for OpenMP relevance by
/// content. Output is sorted and deduplicated.
pub struct CorpusWalker {
    root: PathBuf,
    patterns: Vec<String>,
    extensions: Vec<String>,
}

impl CorpusWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            patterns: vec![],
            extensions: vec![
                "c".to_string(),
                "cpp".to_string(),
                "cc".to_string(),
                "cxx".to_string(),
            ],
        }
    }

    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.is_candidate(path) && is_openmp_relevant(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn is_candidate(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }

        let name_lower = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if FILENAME_KEYWORDS.iter().any(|kw| name_lower.contains(kw)) {
            return true;
        }

        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }
}

/// Cheap content re-check before committing to full analysis.
fn is_openmp_relevant(path: &Path) -> bool {
    match std::fs::read(path) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes).to_lowercase();
            CONTENT_INDICATORS.iter().any(|ind| content.contains(ind))
        }
        Err(err) => {
            debug!("cannot check {}: {err}", path.display());
            false
        }
    }
}
