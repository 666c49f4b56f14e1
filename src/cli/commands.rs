// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `classify`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::train_use_case::TrainConfig;
use crate::ml::model::EmbeddingInit;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the spam classifier on the SMS Spam Collection archive
    Train(TrainArgs),

    /// Classify a single message using a trained checkpoint
    Classify(ClassifyArgs),
}

/// How the embedding table is initialised — CLI-facing mirror of
/// ml::model::EmbeddingInit so the ml layer never sees clap types.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum EmbeddingMode {
    /// Learn embeddings from scratch (random initialisation)
    Random,
    /// Seed from pre-trained vectors and keep them fixed
    Frozen,
    /// Seed from pre-trained vectors and fine-tune during training
    FineTuned,
}

impl From<EmbeddingMode> for EmbeddingInit {
    fn from(m: EmbeddingMode) -> Self {
        match m {
            EmbeddingMode::Random    => EmbeddingInit::Random,
            EmbeddingMode::Frozen    => EmbeddingInit::Frozen,
            EmbeddingMode::FineTuned => EmbeddingInit::FineTuned,
        }
    }
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// ZIP archive containing the tab-separated label/text corpus
    #[arg(long, default_value = "data/smsspamcollection.zip")]
    pub archive: String,

    /// Name of the corpus member inside the archive.
    /// If omitted, the first plausible data member is used.
    #[arg(long)]
    pub member: Option<String>,

    /// Pre-trained word vectors in GloVe text format (word v1 .. vD per line)
    #[arg(long, default_value = "data/glove.6B.100d.txt")]
    pub embeddings: String,

    /// Cache file for the built embedding matrix.
    /// Reused on later runs if the vocabulary fingerprint still matches.
    #[arg(long, default_value = "data/embedding_matrix.bin")]
    pub embedding_cache: String,

    /// Directory to save model checkpoints and the fitted vectorizer
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Keep only this many most-frequent words in the vocabulary
    #[arg(long, default_value_t = 20000)]
    pub vocab_size: usize,

    /// Fixed token-sequence length. 0 means "longest message seen at fit time"
    #[arg(long, default_value_t = 0)]
    pub max_seq_len: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Dimension of the word-embedding vectors.
    /// Must match the pre-trained file when seeding from it.
    #[arg(long, default_value_t = 100)]
    pub embed_dim: usize,

    /// Number of convolution filters (output channels)
    #[arg(long, default_value_t = 128)]
    pub num_filters: usize,

    /// Width of each convolution filter in tokens
    #[arg(long, default_value_t = 5)]
    pub kernel_size: usize,

    /// Dropout probability — randomly zeroes activations during training
    /// to prevent overfitting
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// How to initialise the embedding table
    #[arg(long, value_enum, default_value_t = EmbeddingMode::FineTuned)]
    pub embedding_mode: EmbeddingMode,

    /// Fraction of samples used for training (rest is validation)
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            archive:         a.archive,
            member:          a.member,
            embeddings:      a.embeddings,
            embedding_cache: a.embedding_cache,
            checkpoint_dir:  a.checkpoint_dir,
            vocab_size:      a.vocab_size,
            max_seq_len:     a.max_seq_len,
            batch_size:      a.batch_size,
            epochs:          a.epochs,
            lr:              a.lr,
            embed_dim:       a.embed_dim,
            num_filters:     a.num_filters,
            kernel_size:     a.kernel_size,
            dropout:         a.dropout,
            embedding_init:  a.embedding_mode.into(),
            train_fraction:  a.train_fraction,
        }
    }
}

/// All arguments for the `classify` command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The raw message text to classify
    #[arg(long)]
    pub message: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
