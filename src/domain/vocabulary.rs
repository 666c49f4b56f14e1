// ============================================================
// Layer 3 — Vocabulary
// ============================================================
// Immutable bidirectional mapping between words and integer
// indices, built once from the training corpus.
//
// Index conventions:
//   - Index 0 is reserved for padding and never maps to a word
//   - Real words get indices 1..=len(), most frequent first
//   - Ties in frequency are broken alphabetically so the same
//     corpus always produces the same mapping
//
// The vocabulary is passed explicitly to every stage that needs
// it (vectorizer, embedding builder, classifier) — there is no
// global tokenizer state shared across training and prediction.
//
// The fingerprint() method hashes the ordered word list with
// SHA-256. The embedding-matrix cache stores this fingerprint
// and refuses to reuse a matrix built for a different vocabulary.
//
// Reference: Rust Book §8 (HashMaps)
//            Rust Book §10 (Derive Macros)

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The reserved padding index. Row 0 of the embedding matrix
/// stays zero and sequences are padded with this value.
pub const PAD_INDEX: u32 = 0;

/// Immutable word ↔ index mapping. Never mutated after build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// word → index lookup (indices start at 1)
    word_to_index: HashMap<String, u32>,

    /// index → word lookup; slot 0 holds an empty placeholder
    /// so index_to_word[i] is the word for index i
    index_to_word: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from word frequencies, keeping at most
    /// `max_words` entries (the most frequent ones).
    ///
    /// Sorting is by descending count, then ascending word, so the
    /// index assignment is fully deterministic.
    pub fn from_counts(counts: HashMap<String, usize>, max_words: usize) -> Self {
        let mut words: Vec<(String, usize)> = counts.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(max_words);

        // Slot 0 is the padding placeholder
        let mut index_to_word = Vec::with_capacity(words.len() + 1);
        index_to_word.push(String::new());

        let mut word_to_index = HashMap::with_capacity(words.len());
        for (i, (word, _count)) in words.into_iter().enumerate() {
            word_to_index.insert(word.clone(), (i + 1) as u32);
            index_to_word.push(word);
        }

        Self { word_to_index, index_to_word }
    }

    /// Look up the index for a word. None means out-of-vocabulary.
    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.word_to_index.get(word).copied()
    }

    /// Look up the word for an index. None for padding or out of range.
    pub fn word_at(&self, index: u32) -> Option<&str> {
        if index == PAD_INDEX {
            return None;
        }
        self.index_to_word.get(index as usize).map(|s| s.as_str())
    }

    /// Number of real words (padding excluded)
    pub fn len(&self) -> usize {
        self.index_to_word.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rows an embedding table covering this vocabulary
    /// needs: one per word plus the padding row at index 0.
    pub fn table_size(&self) -> usize {
        self.index_to_word.len()
    }

    /// Iterate (word, index) pairs in index order, padding excluded
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.index_to_word
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, w)| (w.as_str(), i as u32))
    }

    /// SHA-256 over the index-ordered word list.
    /// Two vocabularies have equal fingerprints exactly when they
    /// assign the same index to every word.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for word in &self.index_to_word {
            hasher.update(word.as_bytes());
            // Separator byte so ["ab","c"] and ["a","bc"] hash differently
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_most_frequent_word_gets_index_one() {
        let v = Vocabulary::from_counts(counts(&[("rare", 1), ("common", 9)]), 100);
        assert_eq!(v.index_of("common"), Some(1));
        assert_eq!(v.index_of("rare"),   Some(2));
    }

    #[test]
    fn test_index_zero_is_reserved() {
        let v = Vocabulary::from_counts(counts(&[("a", 1)]), 100);
        assert_eq!(v.word_at(PAD_INDEX), None);
        assert_eq!(v.index_of("a"), Some(1));
        assert_eq!(v.table_size(), v.len() + 1);
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let v = Vocabulary::from_counts(counts(&[("zebra", 3), ("apple", 3)]), 100);
        assert_eq!(v.index_of("apple"), Some(1));
        assert_eq!(v.index_of("zebra"), Some(2));
    }

    #[test]
    fn test_max_words_cap() {
        let v = Vocabulary::from_counts(
            counts(&[("a", 5), ("b", 4), ("c", 3), ("d", 2)]),
            2,
        );
        assert_eq!(v.len(), 2);
        assert_eq!(v.index_of("a"), Some(1));
        assert_eq!(v.index_of("c"), None);
    }

    #[test]
    fn test_bidirectional_lookup() {
        let v = Vocabulary::from_counts(counts(&[("hello", 2), ("world", 1)]), 100);
        for (word, index) in v.iter() {
            assert_eq!(v.word_at(index), Some(word));
            assert_eq!(v.index_of(word), Some(index));
        }
    }

    #[test]
    fn test_fingerprint_changes_with_mapping() {
        let a = Vocabulary::from_counts(counts(&[("x", 2), ("y", 1)]), 100);
        let b = Vocabulary::from_counts(counts(&[("x", 1), ("y", 2)]), 100);
        let c = Vocabulary::from_counts(counts(&[("x", 2), ("y", 1)]), 100);
        // Same mapping → same fingerprint; swapped indices → different
        assert_eq!(a.fingerprint(), c.fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
