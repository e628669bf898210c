// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + dev-evaluation loop using Burn's DataLoader and
// Adam. Per batch: shift labels, forward, cross-entropy,
// backward, renorm the classifier head, one optimizer step.
//
// Step cadences (counted across epochs, not per epoch):
//   - every log_interval steps: overwrite one stdout progress
//     line with the batch loss and accuracy
//   - every save_interval steps (0 disables): write a
//     snapshot_steps<N> checkpoint
//
// After each epoch the dev set is evaluated and the best model
// so far is kept as a frozen clone; after the last epoch that
// best clone — not the final weights — becomes the saved
// model artifact.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use std::io::Write;

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::TextBatcher, dataset::TextDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::evaluator::{self, count_correct};
use crate::ml::model::{Phase, TextCnn, TextCnnConfig};

type CpuBackend = burn::backend::Autodiff<burn::backend::NdArray>;
type GpuBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

// ─── BestSnapshot ─────────────────────────────────────────────────────────────
/// Best-so-far selection with snapshot-on-improve semantics.
/// The kept state is a clone taken at the moment of improvement,
/// never a reference to the live model.
pub struct BestSnapshot<M: Clone> {
    state:    M,
    epoch:    usize,
    accuracy: f64,
}

impl<M: Clone> BestSnapshot<M> {
    /// Start from the initial state with accuracy 0, so any
    /// measured accuracy above zero replaces it.
    pub fn new(initial: &M) -> Self {
        Self {
            state:    initial.clone(),
            epoch:    1,
            accuracy: 0.0,
        }
    }

    /// Record an observation. Strictly-greater comparison: on a
    /// tie the earlier epoch keeps the crown. Returns whether the
    /// snapshot was replaced.
    pub fn observe(&mut self, accuracy: f64, epoch: usize, state: &M) -> bool {
        if accuracy > self.accuracy {
            self.accuracy = accuracy;
            self.epoch    = epoch;
            self.state    = state.clone();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> &M {
        &self.state
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

// ─── Training entry point ─────────────────────────────────────────────────────
/// Outcome of a completed run, as reported on stdout.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSummary {
    pub best_epoch:    usize,
    pub best_accuracy: f64,
}

/// Pick a backend from the config and run the loop. The loop
/// itself is backend-generic; only the device choice differs.
pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: TextDataset,
    dev_dataset:   TextDataset,
    ckpt_manager:  CheckpointManager,
) -> Result<TrainingSummary> {
    if cfg.gpu {
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        train_loop::<GpuBackend>(cfg, train_dataset, dev_dataset, ckpt_manager, device)
    } else {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        tracing::info!("Using CPU (ndarray) backend");
        train_loop::<CpuBackend>(cfg, train_dataset, dev_dataset, ckpt_manager, device)
    }
}

/// One gradient update: backward, capture gradients for every
/// parameter, renorm the classifier head, then the Adam step.
///
/// Ordering matters: gradients must be captured from the model
/// BEFORE renorm_fc rebuilds (and detaches) the head weight, or
/// from_grads finds no autodiff node for it and the head never
/// receives an update. Param::map keeps the ParamId, so the
/// captured gradient still applies to the renormed weight.
fn apply_update<B, O>(
    mut model: TextCnn<B>,
    loss:      Tensor<B, 1>,
    optim:     &mut O,
    lr:        f64,
    max_norm:  f64,
) -> TextCnn<B>
where
    B: AutodiffBackend,
    O: Optimizer<TextCnn<B>, B>,
{
    let grads = loss.backward();
    let grads = GradientsParams::from_grads(grads, &model);
    model = model.renorm_fc(max_norm);
    optim.step(lr, model, grads)
}

fn train_loop<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    train_dataset: TextDataset,
    dev_dataset:   TextDataset,
    ckpt_manager:  CheckpointManager,
    device:        B::Device,
) -> Result<TrainingSummary> {
    // Seed the backend so weight init is reproducible run to run.
    B::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = TextCnnConfig::new(
        cfg.vocab_size, cfg.num_classes, cfg.embed_dim, cfg.num_filters, cfg.dropout,
    );
    let mut model: TextCnn<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab_size={}, classes={}, filters={}",
        cfg.vocab_size, cfg.num_classes, cfg.num_filters,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = TextBatcher::<B>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Dev data loader (InnerBackend — no autodiff overhead) ─────────────────
    let dev_batcher = TextBatcher::<B::InnerBackend>::new(device.clone());
    let dev_loader  = DataLoaderBuilder::new(dev_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(dev_dataset);

    let metrics = MetricsLogger::new(&cfg.save_dir)?;

    // The best snapshot is always a frozen clone, never aliased to
    // the live model the optimizer keeps replacing.
    let mut best  = BestSnapshot::new(&model);
    let mut steps = 0usize;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let batch_size = batch.labels.dims()[0];

            // Source labels are 1-indexed; cross-entropy wants 0..K-1.
            let targets = batch.labels.clone().sub_scalar(1);

            let (loss, logits) = model.forward_loss(batch.tokens, targets.clone(), Phase::Train);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            model = apply_update(model, loss, &mut optim, cfg.lr, cfg.max_norm);

            steps += 1;
            if steps % cfg.log_interval == 0 {
                let correct  = count_correct(logits, targets);
                let accuracy = 100.0 * correct as f64 / batch_size as f64;
                print!(
                    "\rBatch[{}] - loss: {:.6}  acc: {:.4}%({}/{})",
                    steps, loss_val, accuracy, correct, batch_size,
                );
                std::io::stdout().flush().ok();
            }

            if cfg.save_interval != 0 && steps % cfg.save_interval == 0 {
                ckpt_manager.save_snapshot(&model, steps)?;
            }
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else {
            f64::NAN
        };

        // ── Dev evaluation ────────────────────────────────────────────────────
        // model.valid() → TextCnn<B::InnerBackend>; with Phase::Eval
        // the pass is gradient-free and deterministic.
        let model_valid = model.valid();
        let report      = evaluator::evaluate(&model_valid, dev_loader.as_ref(), true);

        metrics.log(&EpochMetrics::new(
            epoch, avg_train_loss, report.avg_loss, report.accuracy,
        ))?;

        if best.observe(report.accuracy, epoch, &model) {
            tracing::info!(
                "New best dev accuracy {:.4}% at epoch {}",
                report.accuracy, epoch,
            );
        }
    }

    // ── Persist the best snapshot as the canonical artifact ───────────────────
    ckpt_manager.save_best(best.state())?;
    println!("Best epoch: {}", best.epoch());
    println!("Best dev accuracy: {}", best.accuracy());

    Ok(TrainingSummary {
        best_epoch:    best.epoch(),
        best_accuracy: best.accuracy(),
    })
}
