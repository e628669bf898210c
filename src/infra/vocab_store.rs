// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the text and label vocabularies as JSON next to the
// checkpoints. Prediction MUST use the exact id mappings the
// model was trained with — rebuilding a vocabulary from the
// corpus at predict time could assign different ids and silently
// scramble every lookup.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::vocab::Vocabulary;

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Write both vocabularies into the save directory.
    pub fn save(&self, text_vocab: &Vocabulary, label_vocab: &Vocabulary) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create save directory '{}'", self.dir.display()))?;

        let text_path = self.dir.join("text_vocab.json");
        fs::write(&text_path, serde_json::to_string(text_vocab)?)
            .with_context(|| format!("Cannot write '{}'", text_path.display()))?;

        let label_path = self.dir.join("label_vocab.json");
        fs::write(&label_path, serde_json::to_string(label_vocab)?)
            .with_context(|| format!("Cannot write '{}'", label_path.display()))?;

        tracing::debug!(
            "Saved vocabularies ({} words, {} labels)",
            text_vocab.len(),
            label_vocab.len(),
        );
        Ok(())
    }

    /// Load (text_vocab, label_vocab) back from the save directory.
    pub fn load(&self) -> Result<(Vocabulary, Vocabulary)> {
        let text_path = self.dir.join("text_vocab.json");
        let text_json = fs::read_to_string(&text_path).with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'train' before 'predict'.",
                text_path.display()
            )
        })?;

        let label_path = self.dir.join("label_vocab.json");
        let label_json = fs::read_to_string(&label_path)
            .with_context(|| format!("Cannot read '{}'", label_path.display()))?;

        Ok((
            serde_json::from_str(&text_json)?,
            serde_json::from_str(&label_json)?,
        ))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_ids() {
        let dir = std::env::temp_dir().join(format!("cnn_vocab_{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        let store = VocabStore::new(dir.to_str().unwrap());

        let text   = Vocabulary::build_text(["the cat sat on the mat"].into_iter());
        let labels = Vocabulary::build_labels(["pos", "neg"].into_iter());
        store.save(&text, &labels).unwrap();

        let (text2, labels2) = store.load().unwrap();
        assert_eq!(text2.lookup("the"), text.lookup("the"));
        assert_eq!(labels2.lookup("neg"), Some(2));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_before_save_fails() {
        let store = VocabStore::new("/nonexistent/vocab/dir");
        assert!(store.load().is_err());
    }
}
