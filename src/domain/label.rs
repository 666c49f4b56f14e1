// ============================================================
// Layer 3 — Label Domain Type
// ============================================================
// The binary classification target. The corpus encodes it as
// the literal strings "ham" and "spam" in front of each line;
// the model sees it as class index 0 or 1.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Binary message label. Ham = legitimate, Spam = unsolicited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    /// Class index used for the loss target: ham = 0, spam = 1
    pub fn class_index(self) -> usize {
        match self {
            Label::Ham  => 0,
            Label::Spam => 1,
        }
    }

    /// Inverse of class_index — used when decoding model output
    pub fn from_class_index(index: usize) -> Self {
        if index == 1 { Label::Spam } else { Label::Ham }
    }
}

impl FromStr for Label {
    type Err = String;

    /// Parse the corpus label column. Anything other than the two
    /// known strings is an error so malformed lines can be skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ham"  => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other  => Err(format!("unknown label '{other}'")),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham  => write!(f, "ham"),
            Label::Spam => write!(f, "spam"),
        }
    }
}

/// The result of classifying one message.
/// spam_probability is the softmax probability of the Spam class;
/// the label is that probability thresholded at 0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label:            Label,
    pub spam_probability: f32,
}

impl Prediction {
    /// Decide the label from the spam-class probability
    pub fn from_probability(spam_probability: f32) -> Self {
        let label = if spam_probability >= 0.5 { Label::Spam } else { Label::Ham };
        Self { label, spam_probability }
    }
}
