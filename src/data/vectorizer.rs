// ============================================================
// Layer 4 — Vectorizer
// ============================================================
// Turns raw message text into fixed-length integer sequences.
//
// Both fit() and encode() run the Preprocessor first, so the
// normalisation a message sees at training time is exactly the
// normalisation it sees at classification time. Interior
// control characters and zero-width spaces are not whitespace
// to split_whitespace, so without that shared pass the same
// message could tokenise differently on the two sides.
//
// fit() does two things over the training corpus:
//   1. Counts word frequencies and builds the Vocabulary
//      (most frequent word = index 1, index 0 = padding)
//   2. Records the longest tokenised message — that becomes
//      the fixed sequence length for every later encode()
//
// encode() then maps each word to its index. Words the
// vocabulary has never seen are dropped silently — standard
// out-of-vocabulary handling. The result is truncated or
// padded with zeros so EVERY sequence has exactly the same
// length, because the batcher stacks them into a rectangular
// [batch, seq_len] tensor.
//
// The fitted vectorizer is immutable and is saved to disk so
// training and classification always share one vocabulary.
//
// Reference: Rust Book §8 (HashMaps, Strings)
//            Burn Book §4 (Datasets)

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;
use crate::domain::vocabulary::{Vocabulary, PAD_INDEX};

/// Split a message into normalised word tokens.
/// Lowercases and strips punctuation from word edges so
/// "Free!" and "free" count as the same vocabulary entry.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|word| {
            let w = word.to_lowercase();
            let w = w.trim_matches(|c: char| !c.is_alphanumeric());
            if w.is_empty() { None } else { Some(w.to_string()) }
        })
        .collect()
}

/// A fitted text → index-sequence converter.
/// Never mutated after fit(); pass it by reference to every
/// stage that needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    vocab:       Vocabulary,
    max_seq_len: usize,
}

impl Vectorizer {
    /// Fit a vectorizer on the training corpus.
    ///
    /// # Arguments
    /// * `texts`       - raw message texts (cleaned internally)
    /// * `max_words`   - vocabulary size cap (most frequent kept)
    /// * `seq_len_cap` - fixed sequence length; 0 means "use the
    ///                   longest tokenised message in the corpus"
    pub fn fit(texts: &[String], max_words: usize, seq_len_cap: usize) -> Self {
        let preprocessor = Preprocessor::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut longest = 0usize;

        for text in texts {
            let tokens = tokenize(&preprocessor.clean(text));
            longest = longest.max(tokens.len());
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let vocab = Vocabulary::from_counts(counts, max_words);

        // Guard against a degenerate all-empty corpus
        let max_seq_len = if seq_len_cap > 0 { seq_len_cap } else { longest.max(1) };

        tracing::info!(
            "Vectorizer fitted: {} words, sequence length {}",
            vocab.len(),
            max_seq_len
        );

        Self { vocab, max_seq_len }
    }

    /// Encode one message as a fixed-length index sequence.
    ///
    /// The text is cleaned first — the same pass fit() applies —
    /// then out-of-vocabulary words are dropped, the rest is
    /// truncated to max_seq_len and right-padded with zeros. The
    /// returned Vec ALWAYS has exactly max_seq_len entries.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let clean = Preprocessor::new().clean(text);
        let mut ids: Vec<u32> = tokenize(&clean)
            .iter()
            .filter_map(|token| self.vocab.index_of(token))
            .collect();

        ids.truncate(self.max_seq_len);
        while ids.len() < self.max_seq_len {
            ids.push(PAD_INDEX);
        }

        ids
    }

    /// The fitted vocabulary (index 0 = padding)
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The fixed sequence length every encode() produces
    pub fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_normalises_case_and_punctuation() {
        assert_eq!(tokenize("Free!! Entry, now."), vec!["free", "entry", "now"]);
    }

    #[test]
    fn test_fit_uses_longest_message() {
        let v = Vectorizer::fit(&corpus(&["one two three", "one"]), 100, 0);
        assert_eq!(v.max_seq_len(), 3);
    }

    #[test]
    fn test_every_sequence_has_fixed_length() {
        let v = Vectorizer::fit(&corpus(&["a b c d e", "a b"]), 100, 0);
        for text in ["", "a", "a b c", "a b c d e f g h i j"] {
            assert_eq!(v.encode(text).len(), v.max_seq_len());
        }
    }

    #[test]
    fn test_padding_uses_index_zero() {
        let v   = Vectorizer::fit(&corpus(&["hello world again", "hello"]), 100, 0);
        let ids = v.encode("hello");
        assert_ne!(ids[0], PAD_INDEX);
        assert_eq!(ids[1], PAD_INDEX);
        assert_eq!(ids[2], PAD_INDEX);
    }

    #[test]
    fn test_oov_words_are_dropped() {
        let v   = Vectorizer::fit(&corpus(&["known words only"]), 100, 0);
        let ids = v.encode("totally unseen vocabulary");
        // Nothing matched — entire sequence is padding
        assert!(ids.iter().all(|&i| i == PAD_INDEX));
    }

    #[test]
    fn test_truncation_respects_cap() {
        let v   = Vectorizer::fit(&corpus(&["a b c d e f"]), 100, 3);
        let ids = v.encode("a b c d e f");
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|&i| i != PAD_INDEX));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let v = Vectorizer::fit(&corpus(&["win a free prize now"]), 100, 0);
        assert_eq!(v.encode("win a prize"), v.encode("win a prize"));
    }

    #[test]
    fn test_encode_cleans_like_fit() {
        // Interior control chars and zero-width spaces are not
        // whitespace to split_whitespace — the shared cleaning
        // pass must split them on both sides
        let v = Vectorizer::fit(&corpus(&["free prize hello world"]), 100, 0);
        assert_eq!(v.encode("free\u{200B}prize"), v.encode("free prize"));
        assert_eq!(v.encode("hello\u{1}world"), v.encode("hello world"));
    }

    #[test]
    fn test_fit_splits_on_invisible_characters() {
        // A zero-width space between words must yield two
        // vocabulary entries, not one fused token
        let v = Vectorizer::fit(&corpus(&["free\u{200B}prize"]), 100, 0);
        assert!(v.vocabulary().index_of("free").is_some());
        assert!(v.vocabulary().index_of("prize").is_some());
        assert!(v.vocabulary().index_of("free\u{200B}prize").is_none());
    }
}
