//! Output blob - the single joined text artifact
//!
//! Lines are joined with one space in extraction order. Empty lines are kept,
//! so consecutive empty messages show up as runs of spaces. Same lines in,
//! same bytes out.

use crate::NormalizedLine;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBlob {
    text: String,
}

impl OutputBlob {
    pub fn join(lines: &[NormalizedLine]) -> Self {
        let text = lines
            .iter()
            .map(NormalizedLine::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in Unicode scalar values
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for OutputBlob {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OutputBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
