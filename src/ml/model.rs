use burn::{
    module::Param,
    nn::{
        conv::{Conv1d, Conv1dConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::embedding::matrix::EmbeddingMatrix;

/// How the embedding table is initialised, decided once at
/// construction time — no mode strings anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingInit {
    /// Random initialisation, learned from scratch
    Random,
    /// Seeded from pre-trained vectors, gradients disabled
    Frozen,
    /// Seeded from pre-trained vectors, fine-tuned during training
    FineTuned,
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SpamCnnConfig {
    /// Embedding table rows: vocabulary words + the padding row
    pub vocab_size:  usize,
    pub embed_dim:   usize,
    pub num_filters: usize,
    pub kernel_size: usize,
    pub dropout:     f64,
}

impl SpamCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SpamCnnModel<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device);
        let conv      = Conv1dConfig::new(self.embed_dim, self.num_filters, self.kernel_size)
            .init(device);
        let head    = LinearConfig::new(self.num_filters, 2).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        SpamCnnModel { embedding, conv, head, dropout }
    }
}

#[derive(Module, Debug)]
pub struct SpamCnnModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub conv:      Conv1d<B>,
    pub head:      Linear<B>,
    pub dropout:   Dropout,
}

impl<B: Backend> SpamCnnModel<B> {
    /// Replace the randomly initialised embedding table with the
    /// pre-built matrix. `trainable = false` detaches the table
    /// from gradient tracking so the optimiser never touches it.
    ///
    /// Row 0 of the matrix is the zero padding row, matching the
    /// padding index the vectorizer emits.
    pub fn with_embedding_weights(
        mut self,
        matrix:    &EmbeddingMatrix,
        trainable: bool,
        device:    &B::Device,
    ) -> Self {
        let weights = Tensor::<B, 1>::from_floats(matrix.as_slice(), device)
            .reshape([matrix.rows(), matrix.dim()])
            .set_require_grad(trainable);
        self.embedding.weight = Param::from_tensor(weights);
        self
    }

    /// input_ids: [batch, seq_len] → class logits: [batch, 2]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(input_ids); // [batch, seq_len, embed_dim]

        // Conv1d convolves over the last dimension, so the embedding
        // channels must come second: [batch, embed_dim, seq_len]
        let x = x.swap_dims(1, 2);
        let x = burn::tensor::activation::relu(self.conv.forward(x));
        let x = self.dropout.forward(x); // [batch, num_filters, conv_len]

        // Global max-pool over time: keep each filter's strongest
        // activation anywhere in the message
        let [batch_size, num_filters, _conv_len] = x.dims();
        let x = x.max_dim(2).reshape([batch_size, num_filters]);

        self.head.forward(x) // [batch, 2]
    }

    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        targets:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(input_ids);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        let loss = ce.forward(logits.clone(), targets);
        (loss, logits)
    }
}
