// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs  — Saving and loading model weights with
//                    Burn's CompactRecorder: step-cadenced
//                    snapshot files during training, the final
//                    best-model artifact, and the train config
//                    JSON that lets prediction rebuild the
//                    exact architecture.
//
//   vocab_store.rs — Persists the text and label vocabularies
//                    as JSON so prediction uses the same id
//                    mappings as training.
//
//   metrics.rs     — Per-epoch metrics CSV (train loss, dev
//                    loss, dev accuracy) for later plotting.
//
// Reference: Burn Book §5 (Records and Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary persistence
pub mod vocab_store;

/// Training metrics CSV logger
pub mod metrics;
