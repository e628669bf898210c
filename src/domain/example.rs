// ============================================================
// Layer 3 — LabeledExample Domain Type
// ============================================================
// One supervised example: a label string and the raw sentence
// it was assigned to. By the time a LabeledExample exists the
// text has already been extracted from the corpus file format,
// but it has NOT been cleaned or tokenised yet — that happens
// in Layer 4.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A single (label, text) pair as read from the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledExample {
    /// The class label as written in the corpus (e.g. "positive")
    pub label: String,

    /// The raw sentence text before cleaning or tokenisation
    pub text: String,
}

impl LabeledExample {
    /// Create a new LabeledExample.
    /// impl Into<String> lets callers pass &str or String.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text:  text.into(),
        }
    }
}
