// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Extract corpus from archive   (Layer 4 - data)
//   Step 2: Fit the vectorizer            (Layer 4 - data)
//   Step 3: Vectorise all messages        (Layer 4 - data)
//   Step 4: Build embedding matrix        (Layer 4 - embedding)
//   Step 5: Split train/validation        (Layer 4 - data)
//   Step 6: Build datasets                (Layer 4 - data)
//   Step 7: Save config + vectorizer      (Layer 6 - infra)
//   Step 8: Run training loop             (Layer 5 - ml)
//
// Text cleaning happens inside the Vectorizer (both fit and
// encode), so classification normalises exactly like training.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{SpamDataset, SpamSample},
    loader::ZipCorpusLoader,
    splitter::split_train_val,
    vectorizer::Vectorizer,
};
use crate::domain::traits::{EmbeddingSource, MessageSource};
use crate::embedding::{builder::EmbeddingBuilder, matrix::EmbeddingMatrix, source::GloveTextFile};
use crate::infra::{checkpoint::CheckpointManager, vectorizer_store::VectorizerStore};
use crate::ml::model::EmbeddingInit;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded for inference.
//
// Two fields change meaning between CLI input and the saved copy:
//   - vocab_size:  cap on the CLI, resolved embedding-table size
//                  (words + padding row) once saved
//   - max_seq_len: 0 = "fit to longest message" on the CLI,
//                  the resolved fixed length once saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub archive:         String,
    pub member:          Option<String>,
    pub embeddings:      String,
    pub embedding_cache: String,
    pub checkpoint_dir:  String,
    pub vocab_size:      usize,
    pub max_seq_len:     usize,
    pub batch_size:      usize,
    pub epochs:          usize,
    pub lr:              f64,
    pub embed_dim:       usize,
    pub num_filters:     usize,
    pub kernel_size:     usize,
    pub dropout:         f64,
    pub embedding_init:  EmbeddingInit,
    pub train_fraction:  f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            archive:         "data/smsspamcollection.zip".to_string(),
            member:          None,
            embeddings:      "data/glove.6B.100d.txt".to_string(),
            embedding_cache: "data/embedding_matrix.bin".to_string(),
            checkpoint_dir:  "checkpoints".to_string(),
            vocab_size:      20000,
            max_seq_len:     0,
            batch_size:      32,
            epochs:          10,
            lr:              1e-3,
            embed_dim:       100,
            num_filters:     128,
            kernel_size:     5,
            dropout:         0.5,
            embedding_init:  EmbeddingInit::FineTuned,
            train_fraction:  0.8,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Extract and parse the corpus ─────────────────────────────
        // ZipCorpusLoader opens the archive and parses label\ttext lines
        tracing::info!("Loading corpus from '{}'", cfg.archive);
        let loader   = ZipCorpusLoader::new(&cfg.archive, cfg.member.clone());
        let messages = loader.load_all()?;

        if messages.is_empty() {
            anyhow::bail!("Corpus '{}' contains no usable messages", cfg.archive);
        }

        // ── Step 2: Fit the vectorizer ────────────────────────────────────────
        // Cleans the raw texts, builds the vocabulary (index 0 =
        // padding) and fixes the sequence length every message
        // will be padded to
        let texts: Vec<String> = messages.iter().map(|m| m.text.clone()).collect();
        let vectorizer = Vectorizer::fit(&texts, cfg.vocab_size, cfg.max_seq_len);

        // A convolution filter wider than the sequence would leave
        // nothing to pool over
        if vectorizer.max_seq_len() < cfg.kernel_size {
            anyhow::bail!(
                "Sequence length {} is shorter than kernel_size {} — \
                 lower --kernel-size or raise --max-seq-len",
                vectorizer.max_seq_len(),
                cfg.kernel_size
            );
        }

        // ── Step 3: Vectorise all messages ────────────────────────────────────
        // Each message becomes a padded index sequence + class index
        let samples: Vec<SpamSample> = messages
            .iter()
            .map(|message| {
                SpamSample::new(vectorizer.encode(&message.text), message.label.class_index())
            })
            .collect();
        tracing::info!("Built {} training samples", samples.len());

        // ── Step 4: Build the embedding matrix ────────────────────────────────
        // Only needed when seeding from pre-trained vectors; the
        // builder reuses its cache when the vocabulary still matches
        let embedding_matrix = self.build_embedding_matrix(&vectorizer)?;

        // The source dictates the real vector dimension; the model
        // must be built to match it
        let embed_dim = embedding_matrix
            .as_ref()
            .map(|m| m.dim())
            .unwrap_or(cfg.embed_dim);
        if embed_dim != cfg.embed_dim {
            tracing::warn!(
                "Configured embed_dim {} overridden by pre-trained dimension {}",
                cfg.embed_dim, embed_dim
            );
        }

        // ── Step 5: Train / validation split ──────────────────────────────────
        // Shuffle and split so the model is evaluated on unseen data
        let (train_samples, val_samples) = split_train_val(samples, cfg.train_fraction);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 6: Build Burn datasets ───────────────────────────────────────
        // SpamDataset implements Burn's Dataset trait so the DataLoader
        // can call .get(index) and .len() on it
        let train_dataset = SpamDataset::new(train_samples);
        let val_dataset   = SpamDataset::new(val_samples);

        // ── Step 7: Save resolved config + fitted vectorizer ──────────────────
        // The classifier needs both to rebuild the exact model and
        // reproduce the exact word→index mapping
        let resolved = TrainConfig {
            vocab_size:  vectorizer.vocabulary().table_size(),
            max_seq_len: vectorizer.max_seq_len(),
            embed_dim,
            ..cfg.clone()
        };

        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(&resolved)?;

        let store = VectorizerStore::new(&cfg.checkpoint_dir);
        store.save(&vectorizer)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        run_training(&resolved, train_dataset, val_dataset, embedding_matrix, ckpt_manager)?;

        Ok(())
    }

    /// Build (or reuse from cache) the pre-trained embedding matrix.
    /// Returns None for the train-from-scratch variant, which never
    /// touches the embeddings file at all.
    fn build_embedding_matrix(&self, vectorizer: &Vectorizer) -> Result<Option<EmbeddingMatrix>> {
        let cfg = &self.config;

        if cfg.embedding_init == EmbeddingInit::Random {
            return Ok(None);
        }

        let source = GloveTextFile::open(&cfg.embeddings)
            .with_context(|| {
                format!("Cannot load pre-trained embeddings from '{}'", cfg.embeddings)
            })?;
        tracing::info!("Pre-trained source dimension: {}", source.dim());

        let builder = EmbeddingBuilder::new(&cfg.embedding_cache);
        let matrix  = builder.build(vectorizer.vocabulary(), &source)?;

        Ok(Some(matrix))
    }
}
