// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads a labelled text corpus from a TSV file where every line
// is `label<TAB>text`. This is the common interchange format
// for sentence classification datasets (SST, TREC, MR exports).
//
// Malformed lines are skipped with a warning rather than
// aborting the run — one bad line should not discard a corpus.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::example::LabeledExample;
use crate::domain::traits::ExampleSource;

/// Loads labelled examples from a single TSV file.
/// Implements the ExampleSource trait from Layer 3.
pub struct TsvLoader {
    /// Path to the corpus file
    path: String,
}

impl TsvLoader {
    /// Create a new TsvLoader pointed at a corpus file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl ExampleSource for TsvLoader {
    fn load_all(&self) -> Result<Vec<LabeledExample>> {
        let path = Path::new(&self.path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read corpus file '{}'", self.path))?;

        let mut examples = Vec::new();

        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            // Split on the FIRST tab only — the text may contain tabs.
            match line.split_once('\t') {
                Some((label, text)) if !label.trim().is_empty() && !text.trim().is_empty() => {
                    examples.push(LabeledExample::new(label.trim(), text.trim()));
                }
                _ => {
                    tracing::warn!(
                        "Skipping malformed line {} in '{}'",
                        lineno + 1,
                        self.path
                    );
                }
            }
        }

        tracing::info!("Loaded {} examples from '{}'", examples.len(), self.path);
        Ok(examples)
    }
}
