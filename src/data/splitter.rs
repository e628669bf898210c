// ============================================================
// Layer 4 — Train/Dev Splitter
// ============================================================
// Shuffles samples and splits them into a training set (used to
// update weights) and a held-out dev set (used to pick the best
// snapshot). The shuffle is driven by a caller-supplied seed so
// the same corpus and seed always produce the same split —
// reported accuracy figures must be reproducible run to run.
//
// Reference: rand crate documentation (SeedableRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with the given seed and split into
/// (train, dev), keeping `train_fraction` for training.
pub fn split_train_dev<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) leaves [0..n) in `samples` and returns [n..)
    let dev = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} train, {} dev",
        samples.len(),
        dev.len(),
    );

    (samples, dev)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, dev)      = split_train_dev(items, 0.8, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(dev.len(),   20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (mut train, dev)  = split_train_dev(items, 0.7, 42);
        train.extend(dev);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_dev((0..30).collect::<Vec<usize>>(), 0.8, 7);
        let b = split_train_dev((0..30).collect::<Vec<usize>>(), 0.8, 7);
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, dev)      = split_train_dev(items, 0.8, 42);
        assert!(train.is_empty());
        assert!(dev.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, dev)      = split_train_dev(items, 1.0, 42);
        assert_eq!(train.len(), 10);
        assert!(dev.is_empty());
    }
}
