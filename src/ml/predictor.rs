// ============================================================
// Layer 5 — Predictor
// ============================================================
// Loads a trained checkpoint and assigns a label to one raw
// input string: tokenise → vocabulary lookup → single-example
// forward in Phase::Eval → arg-max → reverse label lookup.
//
// Unknown tokens are fatal rather than mapped to a sentinel:
// the model was never trained on a representation for them, so
// any answer would be a silent lie. The caller sees a clear
// error naming the offending token instead.
//
// Nothing here mutates the model or the vocabularies; a
// Predictor can serve any number of calls.

use anyhow::{anyhow, bail, Result};
use burn::prelude::*;

use crate::data::vocab::{tokenize, Vocabulary, PAD_ID};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{Phase, TextCnn, TextCnnConfig, MIN_SEQ_LEN};

pub struct Predictor<B: Backend> {
    model:       TextCnn<B>,
    text_vocab:  Vocabulary,
    label_vocab: Vocabulary,
    device:      B::Device,
}

impl<B: Backend> Predictor<B> {
    /// Rebuild the model architecture from the saved train config
    /// and load the best-model weights into it.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        text_vocab:   Vocabulary,
        label_vocab:  Vocabulary,
        device:       B::Device,
    ) -> Result<Self> {
        let cfg = ckpt_manager.load_config()?;

        // Dropout is irrelevant here: every forward runs in Phase::Eval.
        let model_cfg = TextCnnConfig::new(
            cfg.vocab_size, cfg.num_classes, cfg.embed_dim, cfg.num_filters, 0.0,
        );
        let model: TextCnn<B> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        Ok(Self { model, text_vocab, label_vocab, device })
    }

    /// Predict the label string for one raw sentence.
    pub fn predict(&self, text: &str) -> Result<String> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            bail!("input contains no usable tokens after cleanup");
        }

        let mut ids = encode_tokens(&self.text_vocab, &tokens)?;
        while ids.len() < MIN_SEQ_LEN {
            ids.push(PAD_ID as i32);
        }
        let seq_len = ids.len();

        let input = Tensor::<B, 1, Int>::from_ints(ids.as_slice(), &self.device)
            .reshape([1, seq_len]);

        let logits = self.model.forward(input, Phase::Eval);
        let predicted = logits
            .argmax(1)
            .flatten::<1>(0, 1)
            .into_scalar()
            .elem::<i64>() as usize;

        // Logits are 0-indexed classes; label ids are 1-indexed,
        // so add the offset back before the reverse lookup.
        self.label_vocab
            .string(predicted + 1)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("predicted class {} has no label entry", predicted))
    }
}

/// Map word tokens to text-vocabulary ids. The first unknown
/// token aborts the whole prediction.
pub fn encode_tokens(vocab: &Vocabulary, tokens: &[String]) -> Result<Vec<i32>> {
    tokens
        .iter()
        .map(|t| {
            vocab
                .lookup(t)
                .map(|id| id as i32)
                .ok_or_else(|| anyhow!("token '{}' is not in the training vocabulary", t))
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn device() -> burn::backend::ndarray::NdArrayDevice {
        burn::backend::ndarray::NdArrayDevice::default()
    }

    fn vocabs() -> (Vocabulary, Vocabulary) {
        let text   = Vocabulary::build_text(["the film was great the acting poor"].into_iter());
        let labels = Vocabulary::build_labels(["pos", "neg"].into_iter());
        (text, labels)
    }

    #[test]
    fn test_encode_known_tokens() {
        let (text_vocab, _) = vocabs();
        let tokens: Vec<String> = ["the", "film"].iter().map(|s| s.to_string()).collect();
        let ids = encode_tokens(&text_vocab, &tokens).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|&id| id > 0)); // never the pad id
    }

    #[test]
    fn test_unknown_token_is_fatal() {
        let (text_vocab, _) = vocabs();
        let tokens: Vec<String> = ["the", "zyxwvut"].iter().map(|s| s.to_string()).collect();
        let err = encode_tokens(&text_vocab, &tokens).unwrap_err();
        assert!(err.to_string().contains("zyxwvut"));
    }

    #[test]
    fn test_predict_returns_a_real_label() {
        let _rng = crate::ml::test_support::rng_guard();
        let (text_vocab, label_vocab) = vocabs();

        let model = TextCnnConfig::new(text_vocab.len(), label_vocab.class_count(), 8, 4, 0.0)
            .init(&device());
        let predictor = Predictor::<TestBackend> {
            model,
            text_vocab,
            label_vocab,
            device: device(),
        };

        // Whatever class wins, the reverse lookup must land on a
        // real label — never the reserved slot 0.
        let label = predictor.predict("the film was great").unwrap();
        assert!(label == "pos" || label == "neg");
    }

    #[test]
    fn test_predict_rejects_empty_input() {
        let _rng = crate::ml::test_support::rng_guard();
        let (text_vocab, label_vocab) = vocabs();
        let model = TextCnnConfig::new(text_vocab.len(), label_vocab.class_count(), 8, 4, 0.0)
            .init(&device());
        let predictor = Predictor::<TestBackend> {
            model,
            text_vocab,
            label_vocab,
            device: device(),
        };

        assert!(predictor.predict("  !!  ").is_err());
    }
}
