// ============================================================
// Layer 1 — Subcommands and Flags
// ============================================================
// Argument structs for `train` and `predict`. clap's derive
// macros turn every field into a typed --flag with help text
// and parse-error messages, so nothing here is hand-rolled.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labelled TSV corpus
    Train(TrainArgs),

    /// Predict the label of one sentence using a trained checkpoint
    Predict(PredictArgs),
}

/// Flags of the `train` subcommand, one per config field the
/// user may set (corpus-derived fields are excluded).
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Labelled corpus file, one `label<TAB>text` line per example
    #[arg(long, default_value = "data/train.tsv")]
    pub data_path: String,

    /// Directory to save checkpoints, vocabularies and metrics
    #[arg(long, default_value = "snapshot")]
    pub save_dir: String,

    /// Run on the wgpu backend instead of the CPU
    #[arg(long, default_value_t = false)]
    pub gpu: bool,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Full passes over the training split
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Examples per training batch
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// L2 cap applied to the classifier-head weight columns after
    /// every backward pass
    #[arg(long, default_value_t = 3.0)]
    pub max_norm: f64,

    /// Print running loss and accuracy every N batches
    #[arg(long, default_value_t = 1)]
    pub log_interval: usize,

    /// Write a periodic snapshot every N batches (0 disables)
    #[arg(long, default_value_t = 500)]
    pub save_interval: usize,

    /// Fraction of the corpus used for training; the rest becomes
    /// the dev split
    #[arg(long, default_value_t = 0.9)]
    pub train_fraction: f64,

    /// Seed for shuffling, the train/dev split, and weight init
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Size of each word-embedding vector
    #[arg(long, default_value_t = 128)]
    pub embed_dim: usize,

    /// Number of feature maps per convolution kernel size
    #[arg(long, default_value_t = 100)]
    pub num_filters: usize,

    /// Dropout probability on the pooled features during training
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,
}

/// The Layer 1 → Layer 2 boundary: clap types stop here.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:      a.data_path,
            save_dir:       a.save_dir,
            gpu:            a.gpu,
            lr:             a.lr,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            max_norm:       a.max_norm,
            log_interval:   a.log_interval,
            save_interval:  a.save_interval,
            train_fraction: a.train_fraction,
            seed:           a.seed,
            embed_dim:      a.embed_dim,
            num_filters:    a.num_filters,
            dropout:        a.dropout,

            // Filled in by the use case once the vocabularies exist.
            vocab_size:  0,
            num_classes: 0,
        }
    }
}

/// Flags of the `predict` subcommand
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The sentence to classify
    #[arg(long)]
    pub text: String,

    /// Directory a previous `train` run saved its artifacts to
    #[arg(long, default_value = "snapshot")]
    pub save_dir: String,

    /// Run on the wgpu backend instead of the CPU
    #[arg(long, default_value_t = false)]
    pub gpu: bool,
}
