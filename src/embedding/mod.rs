// ============================================================
// Layer 4 — Embedding Pipeline
// ============================================================
// Everything about pre-trained word vectors lives here:
//
//   matrix.rs  — The dense (vocab_size × dim) weight matrix,
//                row i = vector for vocabulary index i,
//                row 0 = all-zero padding row
//
//   source.rs  — GloVe text-format loader implementing the
//                EmbeddingSource trait from Layer 3
//
//   builder.rs — Assembles the matrix from a Vocabulary and an
//                EmbeddingSource, with an on-disk cache that is
//                validated against the vocabulary fingerprint
//                before reuse
//
// Words missing from the pre-trained source keep their zero row.
// That is an accepted quality degradation, not an error — the
// model simply learns nothing extra for those words.
//
// Reference: Pennington et al. (2014) GloVe paper
//            Rust Book §7 (Modules)

/// The dense embedding weight matrix
pub mod matrix;

/// GloVe text-format vector source
pub mod source;

/// Matrix assembly with fingerprint-validated caching
pub mod builder;
