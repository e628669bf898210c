// ============================================================
// Layer 5 — Evaluator
// ============================================================
// One full pass over a batch loader in evaluation mode, with no
// gradient tracking and no weight updates. Accumulates:
//   (a) the summed per-example loss across the WHOLE pass,
//       divided once at the end — not per-batch averages, so the
//       reported figure is exact regardless of batch sizes;
//   (b) the count of examples whose arg-max logit matches the
//       shifted label.
//
// Mode handling: forward runs with Phase::Eval. The model itself
// carries no mode flag, so evaluating cannot leave any state
// behind for the trainer to trip over.

use burn::{
    data::dataloader::DataLoader,
    prelude::*,
};

use crate::data::batcher::TextBatch;
use crate::ml::model::{Phase, TextCnn};

/// Aggregated results of one evaluation pass.
#[derive(Debug, Clone, Copy)]
pub struct EvalReport {
    /// Summed per-example loss divided by the example count.
    /// NaN when the loader produced no examples.
    pub avg_loss: f64,

    /// 100 * correct / total. Zero when the loader was empty.
    pub accuracy: f64,

    /// Examples whose arg-max logit matched the label.
    pub correct: usize,

    /// Total examples seen.
    pub total: usize,
}

/// Count examples where the arg-max logit equals the target.
pub fn count_correct<B: Backend>(
    logits:  Tensor<B, 2>,
    targets: Tensor<B, 1, Int>,
) -> usize {
    // argmax(1) keeps the dim as [batch, 1] — flatten to [batch]
    // before comparing against the targets.
    let predictions = logits.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predictions
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    correct as usize
}

/// Run the model over the entire loader once and accumulate loss
/// and accuracy. Optionally prints the standard evaluation summary
/// line before returning.
pub fn evaluate<B: Backend>(
    model:         &TextCnn<B>,
    loader:        &dyn DataLoader<TextBatch<B>>,
    print_summary: bool,
) -> EvalReport {
    let mut loss_sum = 0.0f64;
    let mut correct  = 0usize;
    let mut total    = 0usize;

    for batch in loader.iter() {
        let batch_size = batch.labels.dims()[0];

        // Source labels are 1-indexed; logits are 0-indexed.
        let targets = batch.labels.clone().sub_scalar(1);

        let (loss, logits) = model.forward_loss(batch.tokens, targets.clone(), Phase::Eval);

        // The loss layer returns the batch mean; scale back by the
        // batch size so loss_sum is a true per-example sum.
        loss_sum += loss.into_scalar().elem::<f64>() * batch_size as f64;

        correct += count_correct(logits, targets);
        total   += batch_size;
    }

    let avg_loss = if total > 0 { loss_sum / total as f64 } else { f64::NAN };
    let accuracy = if total > 0 {
        100.0 * correct as f64 / total as f64
    } else {
        0.0
    };

    let report = EvalReport { avg_loss, accuracy, correct, total };
    if print_summary {
        println!("{}", summary_line(&report));
    }
    report
}

/// The post-epoch summary. The figures end with a space and a
/// newline, leaving a blank line after the summary on the console.
fn summary_line(r: &EvalReport) -> String {
    format!(
        "\nEvaluation - loss: {:.6}  acc: {:.4}%({}/{}) \n",
        r.avg_loss, r.accuracy, r.correct, r.total,
    )
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::data::dataloader::DataLoaderBuilder;

    use crate::data::batcher::TextBatcher;
    use crate::data::dataset::{TextDataset, TextSample};
    use crate::ml::model::TextCnnConfig;

    type TestBackend = burn::backend::NdArray;

    fn device() -> burn::backend::ndarray::NdArrayDevice {
        burn::backend::ndarray::NdArrayDevice::default()
    }

    #[test]
    fn test_summary_line_exact_format() {
        let report = EvalReport { avg_loss: 0.5, accuracy: 75.0, correct: 3, total: 4 };
        assert_eq!(
            summary_line(&report),
            "\nEvaluation - loss: 0.500000  acc: 75.0000%(3/4) \n"
        );
    }

    #[test]
    fn test_count_correct_exact() {
        // Row arg-maxes: 1, 0, 2 — targets 1, 1, 2 → 2 correct.
        let logits = Tensor::<TestBackend, 1>::from_floats(
            [0.1, 0.9, 0.0, 0.8, 0.1, 0.1, 0.0, 0.2, 0.7],
            &device(),
        )
        .reshape([3, 3]);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([1, 1, 2], &device());

        assert_eq!(count_correct(logits, targets), 2);
    }

    fn tiny_loader() -> std::sync::Arc<dyn DataLoader<TextBatch<TestBackend>>> {
        // 4 examples, 2 classes — fixed data, fixed weights.
        let dataset = TextDataset::new(vec![
            TextSample::new(vec![1, 2, 3, 4, 5], 1),
            TextSample::new(vec![2, 3, 4], 2),
            TextSample::new(vec![5, 4, 3, 2, 1, 6], 1),
            TextSample::new(vec![6, 6, 6], 2),
        ]);
        DataLoaderBuilder::new(TextBatcher::<TestBackend>::new(device()))
            .batch_size(2)
            .num_workers(1)
            .build(dataset)
    }

    #[test]
    fn test_accuracy_matches_counts() {
        let _rng = crate::ml::test_support::rng_guard();
        <TestBackend as Backend>::seed(3);
        let model = TextCnnConfig::new(10, 2, 8, 4, 0.0).init(&device());

        let report = evaluate(&model, tiny_loader().as_ref(), false);

        assert_eq!(report.total, 4);
        assert_eq!(
            report.accuracy,
            100.0 * report.correct as f64 / report.total as f64
        );
        assert!(report.avg_loss.is_finite());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let _rng = crate::ml::test_support::rng_guard();
        <TestBackend as Backend>::seed(3);
        let model = TextCnnConfig::new(10, 2, 8, 4, 0.5).init(&device());

        let first  = evaluate(&model, tiny_loader().as_ref(), false);
        let second = evaluate(&model, tiny_loader().as_ref(), true);

        assert_eq!(first.accuracy, second.accuracy);
        assert_eq!(first.correct, second.correct);
        assert!((first.avg_loss - second.avg_loss).abs() < 1e-9);
    }

    #[test]
    fn test_empty_loader_reports_zero_accuracy() {
        let _rng = crate::ml::test_support::rng_guard();
        let model  = TextCnnConfig::new(10, 2, 8, 4, 0.0).init(&device());
        let loader = DataLoaderBuilder::new(TextBatcher::<TestBackend>::new(device()))
            .batch_size(2)
            .num_workers(1)
            .build(TextDataset::new(Vec::new()));

        let report = evaluate(&model, loader.as_ref(), false);
        assert_eq!(report.total, 0);
        assert_eq!(report.accuracy, 0.0);
        assert!(report.avg_loss.is_nan());
    }
}
