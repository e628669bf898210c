// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a raw labelled corpus file to GPU-ready
// tensor batches, in this order:
//
//   label<TAB>text file
//       │
//       ▼
//   TsvLoader         → reads lines, splits label from text
//       │
//       ▼
//   Preprocessor      → cleans text (whitespace, control chars)
//       │
//       ▼
//   Vocabulary        → words and labels ↔ integer ids
//       │
//       ▼
//   TextDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   TextBatcher       → pads and stacks samples into tensors
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module does exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads label<TAB>text lines from a corpus file
pub mod loader;

/// Cleans and normalises raw text
pub mod preprocessor;

/// Word/label ↔ integer id mappings and word tokenisation
pub mod vocab;

/// Implements Burn's Dataset trait for classification samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/dev sets
pub mod splitter;
