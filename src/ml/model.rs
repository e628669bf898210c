use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};

/// Widths of the parallel convolution windows. Each width gets its
/// own filter bank; their pooled outputs are concatenated before
/// the classifier head.
pub const KERNEL_SIZES: [usize; 3] = [3, 4, 5];

/// Shortest token sequence the model can convolve over — the widest
/// conv window. The batcher and predictor pad up to this.
pub const MIN_SEQ_LEN: usize = 5;

/// Whether a forward pass is part of training or evaluation.
/// Passed explicitly into every forward call instead of living as
/// a mutable mode flag on the model, so evaluation can never leave
/// the model in the wrong mode. Only dropout depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Eval,
}

// NOTE: #[derive(Config)] already generates Clone and
// Serialize/Deserialize internally — do NOT add them again.
#[derive(Config, Debug)]
pub struct TextCnnConfig {
    pub vocab_size:  usize,
    pub num_classes: usize,
    pub embed_dim:   usize,
    pub num_filters: usize,
    pub dropout:     f64,
}

impl TextCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TextCnn<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device);

        // One conv bank per window width. Kernel spans the full
        // embedding dimension so each filter sees whole word vectors.
        let convs: Vec<Conv2d<B>> = KERNEL_SIZES
            .iter()
            .map(|&k| {
                Conv2dConfig::new([1, self.num_filters], [k, self.embed_dim]).init(device)
            })
            .collect();

        let dropout = DropoutConfig::new(self.dropout).init();
        let fc = LinearConfig::new(self.num_filters * KERNEL_SIZES.len(), self.num_classes)
            .init(device);

        TextCnn { embedding, convs, dropout, fc }
    }
}

#[derive(Module, Debug)]
pub struct TextCnn<B: Backend> {
    pub embedding: Embedding<B>,
    pub convs:     Vec<Conv2d<B>>,
    pub dropout:   Dropout,
    pub fc:        Linear<B>,
}

impl<B: Backend> TextCnn<B> {
    /// tokens: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>, phase: Phase) -> Tensor<B, 2> {
        let [batch_size, seq_len] = tokens.dims();

        let embedded = self.embedding.forward(tokens); // [batch, seq, embed]
        let [_, _, embed_dim] = embedded.dims();

        // Treat the embedded sentence as a 1-channel image so the
        // conv windows slide along the token axis only.
        let x = embedded.reshape([batch_size, 1, seq_len, embed_dim]);

        let pooled: Vec<Tensor<B, 2>> = self
            .convs
            .iter()
            .map(|conv| {
                let features = relu(conv.forward(x.clone())); // [batch, filters, L, 1]
                features
                    .squeeze::<3>(3)
                    .max_dim(2) // max-over-time: [batch, filters, 1]
                    .squeeze::<2>(2)
            })
            .collect();

        let features = Tensor::cat(pooled, 1); // [batch, filters * windows]

        let features = match phase {
            Phase::Train => self.dropout.forward(features),
            Phase::Eval  => features,
        };

        self.fc.forward(features)
    }

    /// Forward pass plus cross-entropy loss against 0-indexed targets.
    pub fn forward_loss(
        &self,
        tokens:  Tensor<B, 2, Int>,
        targets: Tensor<B, 1, Int>,
        phase:   Phase,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(tokens, phase);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), targets);
        (loss, logits)
    }

    /// Rescale any column of the classifier head whose L2 norm
    /// exceeds `max_norm` back down to exactly `max_norm`. Columns
    /// already inside the bound are left untouched. Applied between
    /// backward and the optimizer step, mirroring weight-norm
    /// regularisation of the final layer.
    pub fn renorm_fc(mut self, max_norm: f64) -> Self {
        self.fc.weight = self.fc.weight.map(|w| {
            // Linear weight is [d_input, d_output]; one norm per output.
            let norms = (w.clone() * w.clone()).sum_dim(0).sqrt(); // [1, d_out]
            let scale = norms.recip().mul_scalar(max_norm).clamp_max(1.0);
            (w * scale).detach()
        });
        self
    }
}
