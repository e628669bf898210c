// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits instead
// of concrete types, so implementations can be swapped without
// touching the callers:
//   - TsvLoader implements ExampleSource
//   - a future JsonlLoader could too
//   - PredictUseCase implements LabelPredictor
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::example::LabeledExample;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Any component that can load labelled examples from a source.
pub trait ExampleSource {
    /// Load every available example from this source.
    fn load_all(&self) -> Result<Vec<LabeledExample>>;
}

// ─── LabelPredictor ───────────────────────────────────────────────────────────
/// Any component that can assign a label to a raw sentence.
pub trait LabelPredictor {
    /// Given one raw input string, return the predicted label string.
    /// Fails if the input contains tokens outside the training vocabulary.
    fn predict_label(&self, text: &str) -> Result<String>;
}
