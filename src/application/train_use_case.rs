// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the labelled corpus     (Layer 4 - data)
//   Step 2: Clean the text               (Layer 4 - data)
//   Step 3: Build vocabularies           (Layer 4 - data)
//   Step 4: Encode samples               (Layer 4 - data)
//   Step 5: Split train/dev              (Layer 4 - data)
//   Step 6: Build datasets               (Layer 4 - data)
//   Step 7: Save config + vocabularies   (Layer 6 - infra)
//   Step 8: Run the training loop        (Layer 5 - ml)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{TextDataset, TextSample},
    loader::TsvLoader,
    preprocessor::Preprocessor,
    splitter::split_train_dev,
    vocab::{tokenize, Vocabulary},
};
use crate::domain::traits::ExampleSource;
use crate::infra::{checkpoint::CheckpointManager, vocab_store::VocabStore};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All parameters of a training run. Immutable once the run
// starts; serialisable so prediction can reload it and rebuild
// the exact model architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:      String,
    pub save_dir:       String,
    pub gpu:            bool,
    pub lr:             f64,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub max_norm:       f64,
    pub log_interval:   usize,
    pub save_interval:  usize,
    pub train_fraction: f64,
    pub seed:           u64,
    pub embed_dim:      usize,
    pub num_filters:    usize,
    pub dropout:        f64,

    // Derived from the corpus by the use case, not set by the CLI.
    pub vocab_size:  usize,
    pub num_classes: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/train.tsv".to_string(),
            save_dir:       "snapshot".to_string(),
            gpu:            false,
            lr:             1e-3,
            epochs:         10,
            batch_size:     64,
            max_norm:       3.0,
            log_interval:   1,
            save_interval:  500,
            train_fraction: 0.9,
            seed:           42,
            embed_dim:      128,
            num_filters:    100,
            dropout:        0.5,
            vocab_size:     0,
            num_classes:    0,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let base = &self.config;
        ensure!(base.epochs >= 1, "epochs must be at least 1");
        ensure!(base.log_interval > 0, "log_interval must be greater than 0");
        ensure!(
            base.train_fraction > 0.0 && base.train_fraction <= 1.0,
            "train_fraction must be in (0, 1], got {}",
            base.train_fraction
        );

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        tracing::info!("Loading corpus from '{}'", base.data_path);
        let loader   = TsvLoader::new(&base.data_path);
        let examples = loader.load_all()?;
        ensure!(
            !examples.is_empty(),
            "corpus '{}' contains no usable examples",
            base.data_path
        );

        // ── Step 2: Clean the text ────────────────────────────────────────────
        let preprocessor = Preprocessor::new();
        let cleaned: Vec<(String, String)> = examples
            .iter()
            .map(|e| (e.label.clone(), preprocessor.clean(&e.text)))
            .collect();

        // ── Step 3: Build vocabularies ────────────────────────────────────────
        // Text vocab reserves id 0 for <pad>; label vocab reserves
        // slot 0 so real labels are 1-indexed (the trainer shifts
        // them down before the loss).
        let text_vocab  = Vocabulary::build_text(cleaned.iter().map(|(_, t)| t.as_str()));
        let label_vocab = Vocabulary::build_labels(cleaned.iter().map(|(l, _)| l.as_str()));
        tracing::info!(
            "Vocabulary: {} words, {} classes",
            text_vocab.len(),
            label_vocab.class_count(),
        );
        ensure!(
            label_vocab.class_count() >= 2,
            "need at least 2 distinct labels, found {}",
            label_vocab.class_count()
        );

        // ── Step 4: Encode samples ────────────────────────────────────────────
        // Every token is in the vocabulary by construction; examples
        // whose text cleans down to nothing are dropped.
        let mut samples = Vec::new();
        for (label, text) in &cleaned {
            let token_ids: Vec<usize> = tokenize(text)
                .into_iter()
                .filter_map(|t| text_vocab.lookup(&t))
                .collect();
            if token_ids.is_empty() {
                continue;
            }
            let Some(label_id) = label_vocab.lookup(label) else { continue };
            samples.push(TextSample::new(token_ids, label_id));
        }
        tracing::info!("Encoded {} samples", samples.len());

        // ── Step 5: Train/dev split ───────────────────────────────────────────
        let (train_samples, dev_samples) =
            split_train_dev(samples, base.train_fraction, base.seed);
        tracing::info!(
            "Split: {} train, {} dev",
            train_samples.len(),
            dev_samples.len(),
        );

        // ── Step 6: Build Burn datasets ───────────────────────────────────────
        let train_dataset = TextDataset::new(train_samples);
        let dev_dataset   = TextDataset::new(dev_samples);

        // ── Step 7: Save config and vocabularies for prediction ───────────────
        let mut cfg = base.clone();
        cfg.vocab_size  = text_vocab.len();
        cfg.num_classes = label_vocab.class_count();

        let ckpt_manager = CheckpointManager::new(&cfg.save_dir);
        ckpt_manager.save_config(&cfg)?;
        VocabStore::new(&cfg.save_dir).save(&text_vocab, &label_vocab)?;

        // ── Step 8: Run the training loop ─────────────────────────────────────
        let summary = run_training(&cfg, train_dataset, dev_dataset, ckpt_manager)?;
        tracing::info!(
            "Training finished: best epoch {}, best dev accuracy {:.4}%",
            summary.best_epoch,
            summary.best_accuracy,
        );

        Ok(())
    }
}
