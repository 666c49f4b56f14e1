// ============================================================
// Layer 6 — Vectorizer Store
// ============================================================
// Persists the fitted vectorizer (vocabulary + fixed sequence
// length) as JSON in the checkpoint directory.
//
// Why persist it?
//   The word→index mapping and the padding length are fitted
//   on the training corpus. Classification MUST reuse exactly
//   the same mapping — re-fitting on different text would
//   silently scramble every index the model was trained on.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::vectorizer::Vectorizer;

pub struct VectorizerStore {
    dir: PathBuf,
}

impl VectorizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("vectorizer.json")
    }

    /// Save a fitted vectorizer as pretty-printed JSON
    pub fn save(&self, vectorizer: &Vectorizer) -> Result<()> {
        fs::create_dir_all(&self.dir).ok();

        let json = serde_json::to_string_pretty(vectorizer)
            .context("Cannot serialise vectorizer")?;
        fs::write(self.path(), json)
            .with_context(|| {
                format!("Cannot write vectorizer to '{}'", self.path().display())
            })?;

        tracing::info!("Vectorizer saved to '{}'", self.path().display());
        Ok(())
    }

    /// Load a previously saved vectorizer
    pub fn load(&self) -> Result<Vectorizer> {
        let json = fs::read_to_string(self.path())
            .with_context(|| {
                format!(
                    "Cannot read vectorizer from '{}'. \
                     Make sure you have run 'train' before 'classify'.",
                    self.path().display()
                )
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Vectorizer file '{}' is corrupt", self.path().display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir   = tempfile::tempdir().unwrap();
        let store = VectorizerStore::new(dir.path().to_str().unwrap());

        let corpus: Vec<String> = ["free prize now", "dinner at eight"]
            .iter().map(|t| t.to_string()).collect();
        let fitted = Vectorizer::fit(&corpus, 100, 0);

        store.save(&fitted).unwrap();
        let loaded = store.load().unwrap();

        // The loaded vectorizer must encode identically
        assert_eq!(loaded.max_seq_len(), fitted.max_seq_len());
        assert_eq!(loaded.encode("free dinner"), fitted.encode("free dinner"));
        assert_eq!(
            loaded.vocabulary().fingerprint(),
            fitted.vocabulary().fingerprint()
        );
    }

    #[test]
    fn test_load_without_save_is_an_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = VectorizerStore::new(dir.path().to_str().unwrap());
        assert!(store.load().is_err());
    }
}
