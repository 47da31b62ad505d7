//! Selection and normalization of one author's messages

use crate::{Archive, Message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message text flattened onto one line: every `\n` becomes a space, then the
/// result is trimmed. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedLine(String);

impl NormalizedLine {
    pub fn new(raw: &str) -> Self {
        Self(raw.replace('\n', " ").trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counters gathered during one extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Records in the archive
    pub scanned: usize,
    /// Records that passed the type/author filter
    pub selected: usize,
    /// Selected records whose normalized text is empty
    pub empty: usize,
}

/// Picks `type == "message"` records written by one author
#[derive(Debug, Clone)]
pub struct Extractor {
    author: String,
}

impl Extractor {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
        }
    }

    /// Normalized lines for every selected message, in archive order.
    /// Messages without text still produce an (empty) line.
    pub fn extract(&self, archive: &Archive) -> Vec<NormalizedLine> {
        self.extract_with_stats(archive).0
    }

    pub fn extract_with_stats(&self, archive: &Archive) -> (Vec<NormalizedLine>, ExtractStats) {
        let mut stats = ExtractStats {
            scanned: archive.len(),
            ..Default::default()
        };

        let lines: Vec<NormalizedLine> = archive
            .messages
            .iter()
            .filter(|msg| msg.is_message_from(&self.author))
            .map(normalize)
            .inspect(|line| {
                stats.selected += 1;
                if line.is_empty() {
                    stats.empty += 1;
                }
            })
            .collect();

        tracing::debug!(
            author = %self.author,
            scanned = stats.scanned,
            selected = stats.selected,
            empty = stats.empty,
            "Extracted messages"
        );

        (lines, stats)
    }
}

fn normalize(msg: &Message) -> NormalizedLine {
    NormalizedLine::new(&msg.text.flatten())
}
