// ============================================================
// Layer 4 — Spam Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<SpamSample>
// into GPU-ready tensors.
//
// What is a Batcher?
//   A Batcher takes a list of individual samples and stacks
//   them into a single batch tensor. This is necessary because
//   GPUs are most efficient when processing many samples at once.
//
// How batching works here:
//   Input:  Vec of N SpamSamples, each with sequences of length S
//   Output: SpamBatch with an input tensor of shape [N, S]
//           and a target tensor of shape [N]
//
//   We flatten all input_ids into one long Vec, then reshape:
//   [s1_t1, s1_t2, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// Why is this easy here?
//   Because the Vectorizer already padded every sequence to the
//   same length. If it hadn't, we'd need dynamic padding here.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::SpamSample;

// ─── SpamBatch ────────────────────────────────────────────────────────────────
/// A batch of spam samples ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct SpamBatch<B: Backend> {
    /// Token index sequences — shape: [batch_size, seq_len]
    /// Each row is one message's padded input_ids
    pub input_ids: Tensor<B, 2, Int>,

    /// Ground truth classes — shape: [batch_size]
    /// One integer per sample: 0 = ham, 1 = spam
    pub targets: Tensor<B, 1, Int>,
}

// ─── SpamBatcher ──────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct SpamBatcher<B: Backend> {
    /// The device to create tensors on (e.g. GPU index 0)
    pub device: B::Device,
}

impl<B: Backend> SpamBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes SpamBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<SpamSample, SpamBatch<B>> for SpamBatcher<B> {
    /// Convert a Vec of SpamSamples into a single SpamBatch.
    ///
    /// Steps:
    ///   1. Flatten all input_ids into one Vec<i32>
    ///   2. Create a 1D tensor from the flat Vec
    ///   3. Reshape to [batch_size, seq_len]
    ///   4. Create a 1D tensor for the class targets
    fn batch(&self, items: Vec<SpamSample>) -> SpamBatch<B> {
        let batch_size = items.len();
        // All sequences have the same length (pre-padded);
        // an empty batch yields empty tensors instead of a panic
        let seq_len    = items.first().map_or(0, |s| s.input_ids.len());

        // ── Flatten input_ids ─────────────────────────────────────────────────
        // We go from Vec<Vec<u32>> to Vec<i32> (Burn uses i32 for Int tensors)
        // by iterating over samples and their tokens in order
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        // ── Collect class targets ─────────────────────────────────────────────
        // These are scalar values per sample, not sequences
        let classes: Vec<i32> = items
            .iter()
            .map(|s| s.class as i32)
            .collect();

        // ── Create tensors ────────────────────────────────────────────────────
        // Tensor::from_ints creates a 1D tensor from a slice,
        // then .reshape() gives it the correct 2D shape [batch, seq]

        let input_ids = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        // Targets stay as a 1D tensor [batch_size]
        let targets = Tensor::<B, 1, Int>::from_ints(
            classes.as_slice(), &self.device
        );

        SpamBatch { input_ids, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray<f32>;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = SpamBatcher::<TestBackend>::new(device);

        let items = vec![
            SpamSample::new(vec![1, 2, 3, 0], 0),
            SpamSample::new(vec![4, 5, 0, 0], 1),
            SpamSample::new(vec![6, 0, 0, 0], 0),
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.input_ids.dims(), [3, 4]);
        assert_eq!(batch.targets.dims(),   [3]);
    }

    #[test]
    fn test_empty_batch_does_not_panic() {
        let device  = Default::default();
        let batcher = SpamBatcher::<TestBackend>::new(device);

        let batch = batcher.batch(Vec::new());
        assert_eq!(batch.input_ids.dims(), [0, 0]);
        assert_eq!(batch.targets.dims(),   [0]);
    }

    #[test]
    fn test_targets_preserve_order() {
        let device  = Default::default();
        let batcher = SpamBatcher::<TestBackend>::new(device);

        let items = vec![
            SpamSample::new(vec![1, 0], 1),
            SpamSample::new(vec![2, 0], 0),
        ];

        let batch = batcher.batch(items);
        // NdArray stores Int tensors as i64
        let targets: Vec<i64> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(targets, vec![1, 0]);
    }
}
