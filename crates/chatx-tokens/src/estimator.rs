//! Token estimators

use crate::Encoding;
use std::fmt;

/// How an estimate was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Counted by a BPE tokenizer
    Exact(Encoding),
    /// `chars / 4`, rounded down
    Heuristic,
}

impl Strategy {
    pub fn is_exact(self) -> bool {
        matches!(self, Strategy::Exact(_))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Exact(encoding) => write!(f, "exact ({encoding})"),
            Strategy::Heuristic => f.write_str("approximate (chars / 4)"),
        }
    }
}

/// Anything that turns text into a token count
pub trait TokenEstimator {
    fn estimate(&self, text: &str) -> usize;

    fn strategy(&self) -> Strategy;

    /// Estimate tokens for multiple strings
    fn estimate_batch(&self, texts: &[&str]) -> Vec<usize> {
        texts.iter().map(|text| self.estimate(text)).collect()
    }
}

/// Length-based fallback. Not exact: the chars-per-token ratio depends on
/// language and content.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

pub const CHARS_PER_TOKEN: usize = 4;

impl TokenEstimator for HeuristicEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.chars().count() / CHARS_PER_TOKEN
    }

    fn strategy(&self) -> Strategy {
        Strategy::Heuristic
    }
}

#[cfg(feature = "tiktoken")]
pub use bpe::BpeEstimator;

#[cfg(feature = "tiktoken")]
mod bpe {
    use super::{Strategy, TokenEstimator};
    use crate::{Encoding, Result, TokenError};
    use std::sync::Arc;
    use tiktoken_rs::CoreBPE;

    /// Exact estimator backed by tiktoken
    #[derive(Clone)]
    pub struct BpeEstimator {
        bpe: Arc<CoreBPE>,
        encoding: Encoding,
    }

    impl BpeEstimator {
        pub fn new(encoding: Encoding) -> Result<Self> {
            let loaded = match encoding {
                Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
                Encoding::O200kBase => tiktoken_rs::o200k_base(),
                Encoding::P50kBase => tiktoken_rs::p50k_base(),
                Encoding::P50kEdit => tiktoken_rs::p50k_edit(),
                Encoding::R50kBase => tiktoken_rs::r50k_base(),
            };

            let bpe = loaded.map_err(|e| TokenError::Load {
                encoding: encoding.to_string(),
                message: e.to_string(),
            })?;

            Ok(Self {
                bpe: Arc::new(bpe),
                encoding,
            })
        }
    }

    impl TokenEstimator for BpeEstimator {
        // Special-token markers are counted as ordinary text.
        fn estimate(&self, text: &str) -> usize {
            self.bpe.encode_ordinary(text).len()
        }

        fn strategy(&self) -> Strategy {
            Strategy::Exact(self.encoding)
        }
    }

    impl std::fmt::Debug for BpeEstimator {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("BpeEstimator")
                .field("encoding", &self.encoding)
                .finish()
        }
    }
}
