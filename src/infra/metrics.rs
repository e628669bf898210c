// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch, one
// row per epoch, so learning curves can be plotted and compared
// across runs.
//
// Output file: <save_dir>/metrics.csv
//
//   epoch,train_loss,dev_loss,dev_acc
//   1,0.693200,0.688100,52.500000
//   2,0.541700,0.512400,71.250000
//
// The header is written only when the file is new, so a resumed
// run appends to the existing log.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

/// One row of metrics for a single training epoch.
#[derive(Debug, Clone, Copy)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Per-batch mean cross-entropy loss over the training pass
    pub train_loss: f64,

    /// Per-example mean cross-entropy loss over the dev set
    pub dev_loss: f64,

    /// Dev accuracy as a percentage (0..100)
    pub dev_acc: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, dev_loss: f64, dev_acc: f64) -> Self {
        Self { epoch, train_loss, dev_loss, dev_acc }
    }
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the save directory and the CSV (with header) if
    /// either doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,dev_loss,dev_acc")?;
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new CSV row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.dev_loss, m.dev_acc,
        )?;

        tracing::debug!(
            "Logged epoch {}: train_loss={:.4}, dev_loss={:.4}, dev_acc={:.2}%",
            m.epoch, m.train_loss, m.dev_loss, m.dev_acc,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = std::env::temp_dir().join(format!("cnn_metrics_{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();

        let logger = MetricsLogger::new(dir.to_str().unwrap()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.7, 0.69, 52.5)).unwrap();
        logger.log(&EpochMetrics::new(2, 0.5, 0.51, 71.25)).unwrap();

        let content = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "epoch,train_loss,dev_loss,dev_acc");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,0.500000"));

        fs::remove_dir_all(&dir).ok();
    }
}
