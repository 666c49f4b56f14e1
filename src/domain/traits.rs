// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - ZipCorpusLoader implements MessageSource
//   - A future CsvLoader could also implement MessageSource
//   - The application layer only sees MessageSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use crate::domain::label::Prediction;
use crate::domain::message::LabeledMessage;

// ─── MessageSource ────────────────────────────────────────────────────────────
/// Any component that can load labelled messages from a source.
///
/// Implementations:
///   - ZipCorpusLoader → the SMS Spam Collection ZIP archive
///   - (future) CsvLoader → plain tab/comma separated files
pub trait MessageSource {
    /// Load all available messages from this source.
    /// Returns a Vec of LabeledMessages or an error.
    fn load_all(&self) -> Result<Vec<LabeledMessage>>;
}

// ─── EmbeddingSource ──────────────────────────────────────────────────────────
/// Any component that can supply a pre-trained dense vector for
/// a word. Lookups miss for words the source has never seen —
/// that is normal, not an error.
///
/// Implementations:
///   - GloveTextFile → GloVe-format text file loaded into memory
pub trait EmbeddingSource {
    /// Dimension of every vector this source returns
    fn dim(&self) -> usize;

    /// The vector for `word`, or None if the source doesn't know it
    fn vector(&self, word: &str) -> Option<&[f32]>;
}

// ─── SpamClassifier ───────────────────────────────────────────────────────────
/// Any component that can classify a raw message as ham or spam.
///
/// Implementations:
///   - ClassifyUseCase → uses the trained CNN
///   - (future) KeywordClassifier → uses a blocklist
pub trait SpamClassifier {
    /// Classify one raw message text
    fn classify(&self, text: &str) -> Result<Prediction>;
}
