// ============================================================
// Layer 4 — Embedding Builder
// ============================================================
// Assembles the (vocab_size × dim) embedding matrix:
//
//   row 0              → zeros (padding index)
//   row i (word w)     → pre-trained vector for w, if the
//                        source knows it
//   row i (unknown w)  → zeros (accepted quality degradation)
//
// Building is slow relative to everything else in the pipeline
// (the pre-trained file has hundreds of thousands of entries),
// so the finished matrix is cached to a single binary file.
//
// Cache validity:
//   The cache stores the SHA-256 fingerprint of the vocabulary
//   it was built for, plus the dimension. A cache whose
//   fingerprint or dimension doesn't match the current inputs
//   is stale — it is ignored and rebuilt, never trusted as-is.
//   A cache that fails to decode at all is treated the same way.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::domain::traits::EmbeddingSource;
use crate::domain::vocabulary::Vocabulary;
use crate::embedding::matrix::EmbeddingMatrix;

/// What actually goes into the cache file: the matrix plus the
/// fingerprint of the vocabulary it covers.
#[derive(Debug, Serialize, Deserialize)]
struct CachedMatrix {
    fingerprint: String,
    matrix:      EmbeddingMatrix,
}

/// Builds the embedding matrix for a vocabulary, caching the
/// result at a configured path.
pub struct EmbeddingBuilder {
    cache_path: PathBuf,
}

impl EmbeddingBuilder {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self { cache_path: cache_path.into() }
    }

    /// Return the embedding matrix for `vocab`, from cache when a
    /// valid one exists, otherwise freshly built from `source`
    /// and persisted before returning.
    ///
    /// The result always has shape (vocab.table_size(), source.dim()).
    pub fn build(
        &self,
        vocab:  &Vocabulary,
        source: &dyn EmbeddingSource,
    ) -> Result<EmbeddingMatrix> {
        let fingerprint = vocab.fingerprint();

        if let Some(matrix) = self.load_valid_cache(&fingerprint, source.dim()) {
            tracing::info!(
                "Reusing cached embedding matrix from '{}'",
                self.cache_path.display()
            );
            return Ok(matrix);
        }

        // ── Fresh build ───────────────────────────────────────────────────────
        // Zero matrix first; only rows the source knows get filled.
        let mut matrix = EmbeddingMatrix::zeros(vocab.table_size(), source.dim());
        let mut hits   = 0usize;

        for (word, index) in vocab.iter() {
            if let Some(vector) = source.vector(word) {
                matrix.set_row(index as usize, vector);
                hits += 1;
            }
        }

        // Partial coverage is expected (slang, phone numbers, typos).
        // Report it, don't fail on it.
        tracing::info!(
            "Embedding matrix built: {}/{} words covered ({:.1}%)",
            hits,
            vocab.len(),
            (hits as f64 / vocab.len().max(1) as f64) * 100.0
        );

        self.save_cache(&fingerprint, &matrix)?;
        Ok(matrix)
    }

    /// Load the cache if it exists AND matches the current
    /// vocabulary fingerprint and dimension. Any mismatch or
    /// decode failure means "no cache".
    fn load_valid_cache(&self, fingerprint: &str, dim: usize) -> Option<EmbeddingMatrix> {
        if !self.cache_path.exists() {
            return None;
        }

        let bytes = match fs::read(&self.cache_path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(
                    "Cannot read embedding cache '{}': {} — rebuilding",
                    self.cache_path.display(), e
                );
                return None;
            }
        };

        let cached: CachedMatrix = match bincode::deserialize(&bytes) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    "Embedding cache '{}' is corrupt: {} — rebuilding",
                    self.cache_path.display(), e
                );
                return None;
            }
        };

        if cached.fingerprint != fingerprint {
            tracing::warn!(
                "Embedding cache '{}' was built for a different vocabulary — rebuilding",
                self.cache_path.display()
            );
            return None;
        }

        if cached.matrix.dim() != dim {
            tracing::warn!(
                "Embedding cache dim {} does not match source dim {} — rebuilding",
                cached.matrix.dim(), dim
            );
            return None;
        }

        Some(cached.matrix)
    }

    /// Persist the matrix and its vocabulary fingerprint
    fn save_cache(&self, fingerprint: &str, matrix: &EmbeddingMatrix) -> Result<()> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).ok();
        }

        let cached = CachedMatrix {
            fingerprint: fingerprint.to_string(),
            matrix:      matrix.clone(),
        };

        let bytes = bincode::serialize(&cached)
            .context("Cannot serialise embedding matrix")?;
        fs::write(&self.cache_path, bytes)
            .with_context(|| {
                format!("Cannot write embedding cache '{}'", self.cache_path.display())
            })?;

        tracing::debug!("Embedding cache written to '{}'", self.cache_path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory embedding source for tests
    struct MapSource {
        dim:     usize,
        vectors: HashMap<String, Vec<f32>>,
    }

    impl MapSource {
        fn new(dim: usize, pairs: &[(&str, &[f32])]) -> Self {
            let vectors = pairs
                .iter()
                .map(|(w, v)| (w.to_string(), v.to_vec()))
                .collect();
            Self { dim, vectors }
        }
    }

    impl EmbeddingSource for MapSource {
        fn dim(&self) -> usize { self.dim }
        fn vector(&self, word: &str) -> Option<&[f32]> {
            self.vectors.get(word).map(|v| v.as_slice())
        }
    }

    fn vocab_of(words: &[(&str, usize)]) -> Vocabulary {
        let counts = words.iter().map(|(w, c)| (w.to_string(), *c)).collect();
        Vocabulary::from_counts(counts, 1000)
    }

    #[test]
    fn test_matrix_covers_every_vocab_entry() {
        let dir     = tempfile::tempdir().unwrap();
        let builder = EmbeddingBuilder::new(dir.path().join("cache.bin"));
        let vocab   = vocab_of(&[("alpha", 3), ("beta", 2), ("gamma", 1)]);
        let source  = MapSource::new(2, &[("alpha", &[1.0, 2.0])]);

        let matrix = builder.build(&vocab, &source).unwrap();
        assert_eq!(matrix.rows(), vocab.table_size());
        assert_eq!(matrix.dim(),  2);
    }

    #[test]
    fn test_present_word_gets_source_vector_exactly() {
        let dir     = tempfile::tempdir().unwrap();
        let builder = EmbeddingBuilder::new(dir.path().join("cache.bin"));
        let vocab   = vocab_of(&[("known", 2), ("unknown", 1)]);
        let source  = MapSource::new(3, &[("known", &[0.25, -0.5, 0.75])]);

        let matrix    = builder.build(&vocab, &source).unwrap();
        let known_idx = vocab.index_of("known").unwrap() as usize;
        let unk_idx   = vocab.index_of("unknown").unwrap() as usize;

        assert_eq!(matrix.row(known_idx), &[0.25, -0.5, 0.75]);
        assert!(matrix.row_is_zero(unk_idx));
        // Padding row stays zero too
        assert!(matrix.row_is_zero(0));
    }

    #[test]
    fn test_second_build_reuses_cache_identically() {
        let dir     = tempfile::tempdir().unwrap();
        let path    = dir.path().join("cache.bin");
        let builder = EmbeddingBuilder::new(&path);
        let vocab   = vocab_of(&[("word", 1)]);
        let source  = MapSource::new(2, &[("word", &[0.1, 0.2])]);

        let first       = builder.build(&vocab, &source).unwrap();
        let bytes_after = fs::read(&path).unwrap();
        let second      = builder.build(&vocab, &source).unwrap();

        assert_eq!(first, second);
        // The cache file must not have been rewritten differently
        assert_eq!(bytes_after, fs::read(&path).unwrap());
    }

    #[test]
    fn test_stale_cache_is_rebuilt() {
        let dir     = tempfile::tempdir().unwrap();
        let path    = dir.path().join("cache.bin");
        let builder = EmbeddingBuilder::new(&path);
        let source  = MapSource::new(2, &[("old", &[1.0, 1.0]), ("new", &[2.0, 2.0])]);

        // Build for the first vocabulary, then swap vocabularies
        let old_vocab = vocab_of(&[("old", 1)]);
        builder.build(&old_vocab, &source).unwrap();

        let new_vocab = vocab_of(&[("new", 1)]);
        let matrix    = builder.build(&new_vocab, &source).unwrap();

        // The stale cache must not leak through
        let new_idx = new_vocab.index_of("new").unwrap() as usize;
        assert_eq!(matrix.row(new_idx), &[2.0, 2.0]);
    }

    #[test]
    fn test_corrupt_cache_is_rebuilt() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.bin");
        fs::write(&path, b"not a bincode payload").unwrap();

        let builder = EmbeddingBuilder::new(&path);
        let vocab   = vocab_of(&[("word", 1)]);
        let source  = MapSource::new(2, &[("word", &[0.5, 0.5])]);

        let matrix = builder.build(&vocab, &source).unwrap();
        let idx    = vocab.index_of("word").unwrap() as usize;
        assert_eq!(matrix.row(idx), &[0.5, 0.5]);
    }

    #[test]
    fn test_dimension_mismatch_invalidates_cache() {
        let dir     = tempfile::tempdir().unwrap();
        let path    = dir.path().join("cache.bin");
        let builder = EmbeddingBuilder::new(&path);
        let vocab   = vocab_of(&[("word", 1)]);

        builder
            .build(&vocab, &MapSource::new(2, &[("word", &[0.1, 0.2])]))
            .unwrap();

        // Same vocabulary, different source dimension
        let matrix = builder
            .build(&vocab, &MapSource::new(4, &[("word", &[1.0, 2.0, 3.0, 4.0])]))
            .unwrap();
        assert_eq!(matrix.dim(), 4);
    }
}
