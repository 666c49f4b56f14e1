// ============================================================
// Layer 5 — Message Classifier (Inference)
// ============================================================
// Wraps vectorisation + padding + forward pass + thresholding
// into one call: text in, ham/spam out.
//
// The classifier is a pure function of (message, model,
// vectorizer) — same inputs, same label, every time. Dropout
// is inert outside training so inference is deterministic.

use anyhow::Result;
use burn::prelude::*;

use crate::data::vectorizer::Vectorizer;
use crate::domain::label::Prediction;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{SpamCnnConfig, SpamCnnModel};

/// The concrete classifier the application layer uses —
/// same backend as the trainer, minus autodiff
pub type WgpuClassifier = MessageClassifier<burn::backend::Wgpu>;

impl WgpuClassifier {
    /// Load vectorizer-aware inference on the default WGPU device
    pub fn load(ckpt_manager: &CheckpointManager, vectorizer: Vectorizer) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        Self::from_checkpoint(ckpt_manager, vectorizer, device)
    }
}

pub struct MessageClassifier<B: Backend> {
    model:      SpamCnnModel<B>,
    vectorizer: Vectorizer,
    device:     B::Device,
}

impl<B: Backend> MessageClassifier<B> {
    /// Wrap an already-built model (used by tests)
    pub fn new(model: SpamCnnModel<B>, vectorizer: Vectorizer, device: B::Device) -> Self {
        Self { model, vectorizer, device }
    }

    /// Rebuild the trained model from the latest checkpoint.
    /// The saved config carries the resolved architecture
    /// (table size, sequence length) from training time.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        vectorizer:   Vectorizer,
        device:       B::Device,
    ) -> Result<Self> {
        let cfg = ckpt_manager.load_config()?;
        let model_cfg = SpamCnnConfig::new(
            cfg.vocab_size, cfg.embed_dim, cfg.num_filters, cfg.kernel_size, 0.0,
        );
        let model: SpamCnnModel<B> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, vectorizer, device })
    }

    /// Classify one raw message.
    ///
    /// Steps:
    ///   1. Clean and encode with the training-time vocabulary —
    ///      the vectorizer applies the same normalisation it
    ///      applied at fit time (unseen words are dropped,
    ///      sequence padded to the fixed training length)
    ///   2. Forward pass → 2 logits
    ///   3. Softmax → spam-class probability
    ///   4. Threshold at 0.5
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let input_ids = self.vectorizer.encode(text);
        let seq_len   = input_ids.len();

        let input_flat: Vec<i32> = input_ids.iter().map(|&x| x as i32).collect();
        let input_tensor = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).reshape([1, seq_len]);

        let logits = self.model.forward(input_tensor); // [1, 2]
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("Cannot read prediction tensor: {e:?}"))?;

        // probs = [p_ham, p_spam]
        let prediction = Prediction::from_probability(probs[1]);
        tracing::debug!(
            "p_spam={:.4} → {} for '{}'",
            prediction.spam_probability, prediction.label, text
        );

        Ok(prediction)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::Label;

    type TestBackend = burn::backend::NdArray<f32>;

    fn fitted_vectorizer() -> Vectorizer {
        let corpus: Vec<String> = [
            "win a free prize now call today",
            "see you at dinner tonight",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        Vectorizer::fit(&corpus, 100, 0)
    }

    fn classifier() -> MessageClassifier<TestBackend> {
        let device     = Default::default();
        let vectorizer = fitted_vectorizer();
        let model = SpamCnnConfig::new(
            vectorizer.vocabulary().table_size(),
            8, 4, 2, 0.0,
        )
        .init(&device);
        MessageClassifier::new(model, vectorizer, device)
    }

    #[test]
    fn test_predict_is_deterministic() {
        let c = classifier();
        let a = c.predict("win a free prize").unwrap();
        let b = c.predict("win a free prize").unwrap();
        assert_eq!(a.label, b.label);
        assert_eq!(a.spam_probability, b.spam_probability);
    }

    #[test]
    fn test_probability_is_valid_and_label_matches_threshold() {
        let c = classifier();
        let p = c.predict("see you tonight").unwrap();
        assert!((0.0..=1.0).contains(&p.spam_probability));
        let expected = if p.spam_probability >= 0.5 { Label::Spam } else { Label::Ham };
        assert_eq!(p.label, expected);
    }

    #[test]
    fn test_unseen_words_still_classify() {
        // Every word OOV → all-padding input; must not panic
        let c = classifier();
        assert!(c.predict("entirely novel vocabulary here").is_ok());
    }

    #[test]
    fn test_invisible_separators_match_plain_text() {
        // A zero-width space between two in-vocabulary words must
        // not fuse them into one out-of-vocabulary token — the
        // prediction must equal the plain-spaced message's
        let c     = classifier();
        let plain = c.predict("free prize").unwrap();
        let glued = c.predict("free\u{200B}prize").unwrap();
        assert_eq!(plain.label, glued.label);
        assert_eq!(plain.spam_probability, glued.spam_probability);
    }
}
