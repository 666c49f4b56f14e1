// ============================================================
// Layer 2 — Classify Use Case
// ============================================================
// Loads the fitted vectorizer and the latest checkpoint, then
// classifies raw messages on demand.
//
// Everything stateful is loaded once in new(); classify() is a
// pure function of the message text after that.

use anyhow::Result;

use crate::domain::label::Prediction;
use crate::domain::traits::SpamClassifier;
use crate::infra::{checkpoint::CheckpointManager, vectorizer_store::VectorizerStore};
use crate::ml::classifier::WgpuClassifier;

pub struct ClassifyUseCase {
    classifier: WgpuClassifier,
}

impl ClassifyUseCase {
    /// Load the vectorizer and model saved by a previous `train` run
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let store      = VectorizerStore::new(&checkpoint_dir);
        let vectorizer = store.load()?;

        let ckpt       = CheckpointManager::new(&checkpoint_dir);
        let classifier = WgpuClassifier::load(&ckpt, vectorizer)?;
        Ok(Self { classifier })
    }

    /// Classify one raw message text
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        self.classifier.predict(text)
    }
}

impl SpamClassifier for ClassifyUseCase {
    fn classify(&self, text: &str) -> Result<Prediction> {
        ClassifyUseCase::classify(self, text)
    }
}
