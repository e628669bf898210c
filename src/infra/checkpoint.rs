// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder
// (MessagePack + gzip; the recorder appends its own extension).
//
// File naming inside the save directory:
//   snapshot_steps<N>   ← periodic checkpoint after N batches
//   model               ← the best dev-accuracy snapshot,
//                         written once at the end of training
//   train_config.json   ← hyperparameters, so prediction can
//                         rebuild the exact architecture before
//                         loading weights into it
//
// The directory is created on first write. Storage failures are
// fatal and propagate to the caller — there is no retry.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::TextCnn;

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create save directory '{}'", self.dir.display()))
    }

    /// Persist a periodic checkpoint named after the cumulative
    /// batch-step count.
    pub fn save_snapshot<B: AutodiffBackend>(
        &self,
        model: &TextCnn<B>,
        steps: usize,
    ) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(format!("snapshot_steps{steps}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        tracing::debug!("Saved snapshot at step {}", steps);
        Ok(())
    }

    /// Persist the best snapshot as the canonical model artifact.
    pub fn save_best<B: AutodiffBackend>(&self, model: &TextCnn<B>) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join("model");

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save best model to '{}'", path.display())
            })?;

        tracing::info!("Saved best model to '{}'", path.display());
        Ok(())
    }

    /// Load the best-model weights into a freshly built model.
    /// The architecture must match the saved record or loading fails.
    pub fn load_model<B: Backend>(
        &self,
        model:  TextCnn<B>,
        device: &B::Device,
    ) -> Result<TextCnn<B>> {
        let path = self.dir.join("model");

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load model from '{}'. Have you trained first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON. Must happen before
    /// training so prediction can always rebuild the model.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join("train_config.json");

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration back from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'predict'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::TextCnnConfig;
    use burn::module::AutodiffModule;

    type TestAutodiff = burn::backend::Autodiff<burn::backend::NdArray>;

    fn temp_manager(name: &str) -> CheckpointManager {
        let dir = std::env::temp_dir().join(format!("cnn_ckpt_{}_{}", name, std::process::id()));
        fs::remove_dir_all(&dir).ok();
        CheckpointManager::new(dir.to_str().unwrap())
    }

    #[test]
    fn test_config_round_trip() {
        let ckpt = temp_manager("config");
        let mut cfg = TrainConfig::default();
        cfg.vocab_size  = 123;
        cfg.num_classes = 4;

        ckpt.save_config(&cfg).unwrap();
        let loaded = ckpt.load_config().unwrap();

        assert_eq!(loaded.vocab_size, 123);
        assert_eq!(loaded.num_classes, 4);
        assert_eq!(loaded.lr, cfg.lr);

        fs::remove_dir_all(&ckpt.dir).ok();
    }

    #[test]
    fn test_load_config_without_training_fails() {
        let ckpt = temp_manager("missing");
        assert!(ckpt.load_config().is_err());
    }

    #[test]
    fn test_best_model_round_trip() {
        let _rng = crate::ml::test_support::rng_guard();
        let ckpt   = temp_manager("model");
        let device = burn::backend::ndarray::NdArrayDevice::default();

        let model: crate::ml::model::TextCnn<TestAutodiff> =
            TextCnnConfig::new(10, 2, 8, 4, 0.0).init(&device);
        ckpt.save_best(&model).unwrap();

        // Reload onto the plain (non-autodiff) backend, as prediction does.
        let fresh = TextCnnConfig::new(10, 2, 8, 4, 0.0)
            .init::<burn::backend::NdArray>(&device);
        let loaded = ckpt.load_model(fresh, &device).unwrap();

        // CompactRecorder stores floats at half precision, so the
        // round-trip is only accurate to ~1e-3.
        let want = model.valid().fc.weight.val().into_data();
        let got  = loaded.fc.weight.val().into_data();
        want.assert_approx_eq(&got, 2);

        fs::remove_dir_all(&ckpt.dir).ok();
    }
}
