//! Token estimation for the output blob
//!
//! The strategy is picked once by [`resolve`]: a BPE tokenizer when one is
//! compiled in and the encoding loads, the `chars / 4` heuristic otherwise.

pub mod encoding;
pub mod error;
pub mod estimator;

pub use encoding::Encoding;
pub use error::{Result, TokenError};
#[cfg(feature = "tiktoken")]
pub use estimator::BpeEstimator;
pub use estimator::{CHARS_PER_TOKEN, HeuristicEstimator, Strategy, TokenEstimator};

/// Estimator chosen at startup
pub struct Resolved {
    pub estimator: Box<dyn TokenEstimator>,
    /// Why the exact tokenizer could not be used, if it could not
    pub fallback_reason: Option<TokenError>,
}

impl Resolved {
    pub fn strategy(&self) -> Strategy {
        self.estimator.strategy()
    }
}

/// Pick an estimator for the named encoding, falling back to the heuristic
pub fn resolve(encoding: &str) -> Resolved {
    match load_exact(encoding) {
        Ok(estimator) => {
            tracing::debug!(strategy = %estimator.strategy(), "Token estimator ready");
            Resolved {
                estimator,
                fallback_reason: None,
            }
        }
        Err(reason) => {
            tracing::debug!(%reason, "Tokenizer unavailable, using chars / 4 heuristic");
            Resolved {
                estimator: Box::new(HeuristicEstimator),
                fallback_reason: Some(reason),
            }
        }
    }
}

#[cfg(feature = "tiktoken")]
fn load_exact(encoding: &str) -> Result<Box<dyn TokenEstimator>> {
    let encoding: Encoding = encoding.parse()?;
    Ok(Box::new(BpeEstimator::new(encoding)?))
}

#[cfg(not(feature = "tiktoken"))]
fn load_exact(encoding: &str) -> Result<Box<dyn TokenEstimator>> {
    let _: Encoding = encoding.parse()?;
    Err(TokenError::NotCompiled)
}
