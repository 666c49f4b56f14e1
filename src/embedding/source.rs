// ============================================================
// Layer 4 — GloVe Text-Format Embedding Source
// ============================================================
// Loads pre-trained word vectors from the plain-text format
// GloVe distributes:
//
//   the 0.418 0.24968 -0.41242 ...
//   of 0.70853 0.57088 -0.4716 ...
//
// One word per line, followed by its vector components.
// The dimension is inferred from the first data line; every
// later line must match it or it is skipped with a warning.
//
// word2vec text exports carry an extra header line with two
// integers ("400000 100") — detected and skipped.
//
// The whole file is loaded into a HashMap up front. The 6B
// 100-d file is ~350 MB of text; if that ever becomes a
// problem the fix is an mmap'd index, not lazy parsing.
//
// Reference: Pennington et al. (2014) GloVe paper
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::traits::EmbeddingSource;

/// Pre-trained vectors parsed from a GloVe-style text file.
pub struct GloveTextFile {
    dim:     usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl GloveTextFile {
    /// Parse the file at `path`. Fails only if the file cannot be
    /// read or contains no usable vectors at all; individual bad
    /// lines are skipped with a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Cannot open embeddings file '{}'", path.display()))?;
        let reader = BufReader::new(file);

        let mut dim     = 0usize;
        let mut vectors = HashMap::new();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("Read error in '{}' at line {}", path.display(), line_no + 1))?;

            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };
            let values: Vec<f32> = parts.filter_map(|p| p.parse().ok()).collect();

            // word2vec-style "count dim" header on the first line
            if line_no == 0 && values.len() == 1 && word.parse::<usize>().is_ok() {
                continue;
            }

            if values.is_empty() {
                skipped += 1;
                continue;
            }

            // First good line fixes the dimension
            if dim == 0 {
                dim = values.len();
            }

            if values.len() != dim {
                tracing::warn!(
                    "Line {}: expected {} components, got {} — skipping '{}'",
                    line_no + 1, dim, values.len(), word
                );
                skipped += 1;
                continue;
            }

            vectors.insert(word.to_string(), values);
        }

        if vectors.is_empty() {
            anyhow::bail!("No word vectors found in '{}'", path.display());
        }
        if skipped > 0 {
            tracing::warn!("Skipped {} malformed lines in '{}'", skipped, path.display());
        }

        tracing::info!(
            "Loaded {} pre-trained vectors (dim={}) from '{}'",
            vectors.len(), dim, path.display()
        );

        Ok(Self { dim, vectors })
    }
}

impl EmbeddingSource for GloveTextFile {
    fn dim(&self) -> usize {
        self.dim
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(|v| v.as_slice())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_parses_glove_lines() {
        let f = write_file("hello 0.1 0.2 0.3\nworld -0.5 0.0 1.5\n");
        let src = GloveTextFile::open(f.path()).unwrap();

        assert_eq!(src.dim(), 3);
        assert_eq!(src.vector("hello"), Some(&[0.1, 0.2, 0.3][..]));
        assert_eq!(src.vector("world"), Some(&[-0.5, 0.0, 1.5][..]));
        assert_eq!(src.vector("missing"), None);
    }

    #[test]
    fn test_skips_word2vec_header() {
        let f = write_file("2 3\nhello 0.1 0.2 0.3\nworld 0.4 0.5 0.6\n");
        let src = GloveTextFile::open(f.path()).unwrap();
        assert_eq!(src.dim(), 3);
        assert!(src.vector("hello").is_some());
    }

    #[test]
    fn test_skips_wrong_dimension_lines() {
        let f = write_file("good 0.1 0.2\nbad 0.1 0.2 0.3\nalso 0.4 0.5\n");
        let src = GloveTextFile::open(f.path()).unwrap();
        assert_eq!(src.dim(), 2);
        assert!(src.vector("bad").is_none());
        assert!(src.vector("also").is_some());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let f = write_file("");
        assert!(GloveTextFile::open(f.path()).is_err());
    }
}
