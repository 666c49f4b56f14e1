// ============================================================
// Layer 3 — Message Domain Type
// ============================================================
// Represents a single labelled message from the corpus.
// This is a plain data struct with no behaviour —
// just the label and the raw text.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::label::Label;

/// One labelled SMS message as parsed from the corpus.
/// The text is exactly as it appeared in the source file,
/// before any cleaning or tokenisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledMessage {
    /// Ham or spam, parsed from the label column
    pub label: Label,

    /// The raw message text
    pub text: String,
}

impl LabeledMessage {
    /// Create a new LabeledMessage.
    /// Uses impl Into<String> so callers can pass &str or String —
    /// this is idiomatic Rust for flexible string arguments.
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self { label, text: text.into() }
    }
}
