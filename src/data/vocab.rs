// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Bidirectional mapping between strings and integer ids, used
// twice: once for words (features) and once for labels.
//
// Id layout:
//   - The TEXT vocabulary reserves id 0 for <pad>, so real
//     words occupy 1..len. Padding positions in a batch are
//     therefore always id 0.
//   - The LABEL vocabulary reserves id 0 for a placeholder
//     slot, so real labels occupy 1..=K. This is why targets
//     arriving at the loss function must be shifted down by
//     one (cross-entropy wants 0..K-1), and why the predictor
//     adds one back before reverse lookup.
//
// Reference: Rust Book §8 (HashMaps)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id of the padding token in the text vocabulary.
pub const PAD_ID: usize = 0;

/// Reserved slot 0 of the text vocabulary.
pub const PAD_TOKEN: &str = "<pad>";

/// Reserved slot 0 of the label vocabulary. Never produced by
/// the model: logits cover only the real labels at ids 1..=K.
pub const LABEL_RESERVED: &str = "<unk>";

/// Split a raw sentence into lowercase word tokens.
/// Words are whitespace-separated with edge punctuation stripped,
/// so "Great movie!" becomes ["great", "movie"].
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.to_lowercase()
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

// ─── Vocabulary ───────────────────────────────────────────────────────────────
/// A frozen string ↔ id mapping. `stoi` and `itos` are kept in
/// sync by construction: itos[stoi[s]] == s for every entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    stoi: HashMap<String, usize>,
    itos: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary with the given reserved entries
    /// occupying the lowest ids (in order, starting at 0).
    pub fn new(reserved: &[&str]) -> Self {
        let mut vocab = Self {
            stoi: HashMap::new(),
            itos: Vec::new(),
        };
        for token in reserved {
            vocab.insert(token);
        }
        vocab
    }

    /// Build a text vocabulary from a corpus, most frequent words
    /// first so the smallest ids go to the commonest words.
    pub fn build_text<'a>(texts: impl Iterator<Item = &'a str>) -> Self {
        let mut freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for word in tokenize(text) {
                *freq.entry(word).or_insert(0) += 1;
            }
        }

        // Sort by frequency descending, ties broken alphabetically
        // so the id assignment is deterministic across runs.
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut vocab = Self::new(&[PAD_TOKEN]);
        for (word, _) in words {
            vocab.insert(&word);
        }
        vocab
    }

    /// Build a label vocabulary. Labels get ids 1..=K in first-seen
    /// order; slot 0 is the reserved placeholder.
    pub fn build_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Self {
        let mut vocab = Self::new(&[LABEL_RESERVED]);
        for label in labels {
            vocab.insert(label);
        }
        vocab
    }

    /// Insert a string if absent and return its id.
    pub fn insert(&mut self, s: &str) -> usize {
        if let Some(&id) = self.stoi.get(s) {
            return id;
        }
        let id = self.itos.len();
        self.stoi.insert(s.to_string(), id);
        self.itos.push(s.to_string());
        id
    }

    /// Forward lookup: string → id. None if unknown.
    pub fn lookup(&self, s: &str) -> Option<usize> {
        self.stoi.get(s).copied()
    }

    /// Reverse lookup: id → string. None if out of range.
    pub fn string(&self, id: usize) -> Option<&str> {
        self.itos.get(id).map(String::as_str)
    }

    /// Total number of entries, reserved slots included.
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// Number of real (non-reserved) labels when used as a label
    /// vocabulary: ids 1..=class_count are valid labels.
    pub fn class_count(&self) -> usize {
        self.itos.len().saturating_sub(1)
    }
}
