// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All the ML math lives here; outside this layer only the data
// batcher and the backend selection in the use cases touch burn.
//
// What's in this layer:
//
//   model.rs     — The CNN sentence classifier
//                  Embedding → parallel conv windows (3/4/5) →
//                  ReLU + max-over-time pooling → dropout →
//                  linear head, plus the max-norm renorm of the
//                  head weights.
//
//   trainer.rs   — The training loop
//                  Per-batch forward/backward/renorm/Adam step,
//                  step-cadenced progress logging and snapshot
//                  checkpoints, per-epoch dev evaluation and
//                  best-snapshot tracking.
//
//   evaluator.rs — One full pass over a loader in eval mode,
//                  accumulating summed loss and arg-max accuracy.
//
//   predictor.rs — Loads a checkpoint, tokenises one raw string,
//                  maps the arg-max class back to a label.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Kim (2014) Convolutional Neural Networks for
//            Sentence Classification

/// CNN sentence classifier architecture
pub mod model;

/// Full training loop with dev evaluation and checkpointing
pub mod trainer;

/// Inference-mode loss/accuracy accumulation over a loader
pub mod evaluator;

/// Single-string label prediction from a checkpoint
pub mod predictor;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    // The ndarray backend RNG is process-global; tests that draw
    // from it (weight init, dropout) must not interleave, or the
    // determinism assertions become racy.
    static RNG_LOCK: Mutex<()> = Mutex::new(());

    pub fn rng_guard() -> MutexGuard<'static, ()> {
        RNG_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }
}
