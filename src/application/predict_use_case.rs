// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Reloads the artifacts a training run produced (config, both
// vocabularies, best-model weights) and serves one prediction.
// Backend selection mirrors training: NdArray on CPU, Wgpu when
// the run was asked for the GPU.

use anyhow::Result;
use burn::backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, NdArray, Wgpu};

use crate::domain::traits::LabelPredictor;
use crate::infra::{checkpoint::CheckpointManager, vocab_store::VocabStore};
use crate::ml::predictor::Predictor;

pub struct PredictUseCase {
    save_dir: String,
    gpu:      bool,
}

impl PredictUseCase {
    pub fn new(save_dir: impl Into<String>, gpu: bool) -> Self {
        Self { save_dir: save_dir.into(), gpu }
    }
}

impl LabelPredictor for PredictUseCase {
    fn predict_label(&self, text: &str) -> Result<String> {
        let ckpt_manager = CheckpointManager::new(&self.save_dir);
        let (text_vocab, label_vocab) = VocabStore::new(&self.save_dir).load()?;

        if self.gpu {
            tracing::info!("Predicting on the wgpu backend");
            let predictor = Predictor::<Wgpu>::from_checkpoint(
                &ckpt_manager,
                text_vocab,
                label_vocab,
                WgpuDevice::default(),
            )?;
            predictor.predict(text)
        } else {
            let predictor = Predictor::<NdArray>::from_checkpoint(
                &ckpt_manager,
                text_vocab,
                label_vocab,
                NdArrayDevice::default(),
            )?;
            predictor.predict(text)
        }
    }
}
