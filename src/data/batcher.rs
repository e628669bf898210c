// ============================================================
// Layer 4 — Text Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<TextSample>
// into tensors the model can consume.
//
// Unlike pre-padded pipelines, sentences here have different
// lengths, so the batcher pads dynamically: every sequence in a
// batch is right-padded with PAD_ID up to the longest sequence
// in that batch (and never below the widest conv window, or the
// convolution would have nothing to slide over).
//
// Tensors come out batch-first: tokens are [batch, seq] and
// labels are [batch]. Labels stay raw (1-indexed) — the shift
// to loss targets is the trainer's explicit step.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TextSample;
use crate::data::vocab::PAD_ID;
use crate::ml::model::MIN_SEQ_LEN;

// ─── TextBatch ────────────────────────────────────────────────────────────────
/// A batch of classification samples ready for the forward pass.
#[derive(Debug, Clone)]
pub struct TextBatch<B: Backend> {
    /// Padded token id sequences — shape: [batch_size, seq_len]
    pub tokens: Tensor<B, 2, Int>,

    /// Raw 1-indexed label ids — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── TextBatcher ──────────────────────────────────────────────────────────────
/// Holds the target device so tensors land on the right backend.
#[derive(Clone, Debug)]
pub struct TextBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TextBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TextSample, TextBatch<B>> for TextBatcher<B> {
    fn batch(&self, items: Vec<TextSample>) -> TextBatch<B> {
        let batch_size = items.len();

        // Pad to the longest sequence in this batch, floored at the
        // widest conv window so short sentences still convolve.
        let seq_len = items
            .iter()
            .map(|s| s.token_ids.len())
            .max()
            .unwrap_or(MIN_SEQ_LEN)
            .max(MIN_SEQ_LEN);

        let token_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| {
                s.token_ids
                    .iter()
                    .map(|&id| id as i32)
                    .chain(std::iter::repeat(PAD_ID as i32))
                    .take(seq_len)
            })
            .collect();

        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let tokens = Tensor::<B, 1, Int>::from_ints(
            token_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            labels.as_slice(), &self.device,
        );

        TextBatch { tokens, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn batcher() -> TextBatcher<TestBackend> {
        TextBatcher::new(burn::backend::ndarray::NdArrayDevice::default())
    }

    #[test]
    fn test_pads_to_longest_sequence() {
        let batch = batcher().batch(vec![
            TextSample::new(vec![1, 2, 3, 4, 5, 6, 7], 1),
            TextSample::new(vec![8, 9], 2),
        ]);
        assert_eq!(batch.tokens.dims(), [2, 7]);

        // Second row must be right-padded with PAD_ID.
        let row: Vec<i64> = batch.tokens
            .slice([1..2, 0..7])
            .reshape([7])
            .into_data()
            .to_vec()
            .unwrap();
        assert_eq!(row, vec![8, 9, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_short_batch_floors_at_min_seq_len() {
        let batch = batcher().batch(vec![TextSample::new(vec![3], 1)]);
        assert_eq!(batch.tokens.dims(), [1, MIN_SEQ_LEN]);
    }

    #[test]
    fn test_labels_stay_one_indexed() {
        let batch = batcher().batch(vec![
            TextSample::new(vec![1, 2, 3, 4, 5], 1),
            TextSample::new(vec![1, 2, 3, 4, 5], 2),
        ]);
        let labels: Vec<i64> = batch.labels.into_data().to_vec().unwrap();
        assert_eq!(labels, vec![1, 2]);
    }
}
