use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One tokenised classification sample. The label id is the raw
/// 1-indexed id from the label vocabulary; the shift to 0-indexed
/// loss targets happens in the trainer/evaluator, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSample {
    pub token_ids: Vec<usize>,
    pub label:     usize,
}

impl TextSample {
    pub fn new(token_ids: Vec<usize>, label: usize) -> Self {
        Self { token_ids, label }
    }
}

pub struct TextDataset {
    samples: Vec<TextSample>,
}

impl TextDataset {
    pub fn new(samples: Vec<TextSample>) -> Self {
        Self { samples }
    }
}

impl Dataset<TextSample> for TextDataset {
    fn get(&self, index: usize) -> Option<TextSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let ds = TextDataset::new(vec![
            TextSample::new(vec![1, 2, 3], 1),
            TextSample::new(vec![4], 2),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).unwrap().label, 2);
        assert!(ds.get(2).is_none());
    }
}
