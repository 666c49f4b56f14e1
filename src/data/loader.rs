// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads the SMS Spam Collection from its ZIP archive using the
// zip crate.
//
// How the corpus is laid out:
//   The archive contains one tab-separated data file plus a
//   readme. Each data line is:
//
//     label <TAB> message text
//
//   where label is the literal string "ham" or "spam", e.g.
//
//     ham	Go until jurong point, crazy..
//     spam	Free entry in 2 a wkly comp to win FA Cup final tkts
//
// Lines that don't fit this shape (no tab, unknown label) are
// skipped with a warning — one bad record must never abort a
// whole training run.
//
// Reference: zip crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs::File, io::Read, path::Path};
use zip::ZipArchive;

use crate::domain::label::Label;
use crate::domain::message::LabeledMessage;
use crate::domain::traits::MessageSource;

/// Loads labelled messages from a ZIP archive.
/// Implements the MessageSource trait from Layer 3.
pub struct ZipCorpusLoader {
    /// Path to the .zip archive
    archive: String,

    /// Optional explicit member name inside the archive.
    /// When None, the first plausible data member is used.
    member: Option<String>,
}

impl ZipCorpusLoader {
    pub fn new(archive: impl Into<String>, member: Option<String>) -> Self {
        Self { archive: archive.into(), member }
    }

    /// Pick the archive member holding the corpus.
    /// Directories, readme files and macOS resource-fork entries
    /// are never data.
    fn resolve_member(&self, zip: &ZipArchive<File>) -> Result<String> {
        if let Some(name) = &self.member {
            return Ok(name.clone());
        }

        zip.file_names()
            .find(|name| {
                let lower = name.to_lowercase();
                !name.ends_with('/')
                    && !lower.contains("readme")
                    && !name.starts_with("__MACOSX")
            })
            .map(String::from)
            .with_context(|| {
                format!("No data member found in archive '{}'", self.archive)
            })
    }
}

impl MessageSource for ZipCorpusLoader {
    fn load_all(&self) -> Result<Vec<LabeledMessage>> {
        let path = Path::new(&self.archive);
        let file = File::open(path)
            .with_context(|| format!("Cannot open archive '{}'", self.archive))?;

        let mut zip = ZipArchive::new(file)
            .with_context(|| format!("'{}' is not a valid ZIP archive", self.archive))?;

        let member = self.resolve_member(&zip)?;
        tracing::info!("Reading corpus member '{}' from '{}'", member, self.archive);

        // The corpus is small (a few hundred KB) — read it whole
        let mut raw = String::new();
        zip.by_name(&member)
            .with_context(|| format!("Member '{}' not found in archive", member))?
            .read_to_string(&mut raw)
            .with_context(|| format!("Member '{}' is not valid UTF-8", member))?;

        let messages = parse_corpus(&raw);

        let spam = messages.iter().filter(|m| m.label == Label::Spam).count();
        let ham  = messages.len() - spam;
        tracing::info!("Loaded {} messages ({} ham, {} spam)", messages.len(), ham, spam);

        Ok(messages)
    }
}

/// Parse tab-separated label/text lines into LabeledMessages.
/// Malformed lines are skipped with a warning, never an error.
pub fn parse_corpus(raw: &str) -> Vec<LabeledMessage> {
    let mut messages = Vec::new();

    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // split_once keeps tabs inside the message text intact
        let Some((label_str, text)) = line.split_once('\t') else {
            tracing::warn!("Line {}: no tab separator — skipping", line_no + 1);
            continue;
        };

        match label_str.parse::<Label>() {
            Ok(label) => messages.push(LabeledMessage::new(label, text)),
            Err(e) => {
                tracing::warn!("Line {}: {} — skipping", line_no + 1, e);
            }
        }
    }

    messages
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    #[test]
    fn test_parse_corpus_label_tally() {
        let raw = "ham\thello there\nspam\tWIN a prize now\nham\tsee you at 5\n";
        let messages = parse_corpus(raw);

        assert_eq!(messages.len(), 3);
        let spam = messages.iter().filter(|m| m.label == Label::Spam).count();
        let ham  = messages.iter().filter(|m| m.label == Label::Ham).count();
        // Tallies must match the raw lines exactly
        assert_eq!(spam, 1);
        assert_eq!(ham,  2);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let raw = "ham\tfine\nno tab here\nbogus\tlabel unknown\nspam\talso fine\n";
        let messages = parse_corpus(raw);
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_message_text_may_contain_tabs() {
        let raw = "ham\tpart one\tpart two\n";
        let messages = parse_corpus(raw);
        assert_eq!(messages[0].text, "part one\tpart two");
    }

    #[test]
    fn test_load_from_zip_archive() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.zip");

        // Build a tiny archive with a readme (must be ignored)
        // and the actual data member
        let file   = std::fs::File::create(&path).unwrap();
        let mut zw = zip::ZipWriter::new(file);
        zw.start_file("readme", FileOptions::default()).unwrap();
        zw.write_all(b"about this corpus").unwrap();
        zw.start_file("SMSSpamCollection", FileOptions::default()).unwrap();
        zw.write_all(b"ham\thello\nspam\tfree prize\n").unwrap();
        zw.finish().unwrap();

        let loader   = ZipCorpusLoader::new(path.to_str().unwrap(), None);
        let messages = loader.load_all().unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].label, Label::Ham);
        assert_eq!(messages[1].label, Label::Spam);
    }

    #[test]
    fn test_missing_archive_is_an_error() {
        let loader = ZipCorpusLoader::new("does/not/exist.zip", None);
        assert!(loader.load_all().is_err());
    }
}
