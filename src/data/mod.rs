// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw corpus archive
// all the way to GPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   corpus .zip
//       │
//       ▼
//   ZipCorpusLoader   → extracts the archive, parses label\ttext lines
//       │
//       ▼
//   Preprocessor      → cleans text (whitespace, control chars)
//       │
//       ▼
//   Vectorizer        → words → index sequences, padded to fixed length
//       │
//       ▼
//   SpamDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   SpamBatcher       → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Extracts the corpus archive and parses labelled lines
pub mod loader;

/// Cleans and normalises raw message text
pub mod preprocessor;

/// Fits a Vocabulary and turns texts into padded index sequences
pub mod vectorizer;

/// Implements Burn's Dataset trait for spam samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
