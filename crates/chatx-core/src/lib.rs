//! Core domain models and logic for chatx
//!
//! This crate contains:
//! - Domain models (Archive, Message, MessageText, TextFragment)
//! - Extraction of one author's messages into normalized lines
//! - Aggregation of lines into the output blob

pub mod blob;
pub mod error;
pub mod extract;
pub mod message;

pub use blob::OutputBlob;
pub use error::{CoreError, Result};
pub use extract::{ExtractStats, Extractor, NormalizedLine};
pub use message::{Archive, Message, MessageText, TextFragment};
