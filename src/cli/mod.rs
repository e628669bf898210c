// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap's
// derive macros. This layer only routes: argument structs are
// converted into application-layer types and handed to Layer 2,
// and nothing below this layer ever sees a clap type.
//
//   `train`   — fit the classifier on a labelled TSV corpus
//   `predict` — label one sentence with a trained checkpoint
//
// Reference: Rust Book §12 (Building a CLI Program)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Commands;

use crate::application::predict_use_case::PredictUseCase;
use crate::application::train_use_case::TrainUseCase;
use crate::domain::traits::LabelPredictor;

#[derive(Parser, Debug)]
#[command(
    name = "cnn-text-classifier",
    version = "0.1.0",
    about = "Train a convolutional sentence classifier, then predict labels for new text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch the parsed subcommand to its use case and print
    /// the user-facing outcome.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => {
                tracing::info!("Training on corpus '{}'", args.data_path);
                TrainUseCase::new(args.into()).execute()?;
                println!("Training complete. Checkpoint saved.");
            }
            Commands::Predict(args) => {
                let label = PredictUseCase::new(args.save_dir, args.gpu)
                    .predict_label(&args.text)?;
                println!("\n[Text]  {}", args.text);
                println!("[Label] {}", label);
            }
        }
        Ok(())
    }
}
