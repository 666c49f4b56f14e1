// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw message text before tokenisation.
//
// Why do we need to clean text?
//   SMS corpus text often contains:
//   - Non-breaking spaces (U+00A0) from phone keyboards
//   - Zero-width spaces (U+200B) from copy-pasting
//   - Carriage returns (\r) from Windows line endings
//   - Control characters from encoding accidents
//   - Multiple consecutive spaces
//
// If we don't clean these, the vectorizer treats them as
// meaningful tokens and wastes vocabulary space on whitespace.
//
// Cleaning steps (applied in order):
//   1. Replace Unicode whitespace variants with plain space
//   2. Replace \r and \n with a space (messages are one line)
//   3. Remove invisible control characters
//   4. Collapse multiple spaces into one
//   5. Trim leading/trailing whitespace
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw message string for downstream tokenisation.
    /// Takes a &str and returns an owned String.
    pub fn clean(&self, text: &str) -> String {

        // ── Step 1: Normalise individual characters ───────────────────────────
        // Map problematic Unicode characters to plain spaces.
        // This uses Rust's char-level iterator for safe Unicode handling.
        let normalised: String = text
            .chars()
            .map(|c| match c {
                // Tab → space
                '\t' => ' ',
                // Non-breaking space → regular space
                '\u{00A0}' => ' ',
                // Zero-width space → regular space
                '\u{200B}' => ' ',
                // Byte order mark → space
                '\u{FEFF}' => ' ',
                // A message is a single logical line — fold line breaks away
                '\r' | '\n' => ' ',
                // Any other control character → space
                c if c.is_control() => ' ',
                // All other characters pass through unchanged
                c => c,
            })
            .collect();

        // ── Step 2: Collapse runs of spaces and trim ──────────────────────────
        let mut out        = String::with_capacity(normalised.len());
        let mut last_space = false;

        for c in normalised.chars() {
            if c == ' ' {
                // Only add a space if the last char wasn't a space
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        out.trim().to_string()
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
// These tests run with `cargo test` and verify the cleaning logic.
// Reference: Rust Book §11 (Writing Automated Tests)
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("free   entry"), "free entry");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  call me later  "), "call me later");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        // \x01 is a control character that should become a space
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_folds_line_breaks() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("two\r\nlines"), "two lines");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }
}
