//! Extraction pipeline: export file in, text file and token count out
//!
//! Steps run in order and stop at the first terminal error. Nothing is
//! written unless the archive parsed and matched one of the accepted shapes.

use chatx_core::{Archive, CoreError, ExtractStats, Extractor, OutputBlob};
use chatx_tokens::{Strategy, TokenEstimator};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Valid JSON of the wrong shape
    pub fn is_format_error(&self) -> bool {
        matches!(self, EngineError::Core(CoreError::Format(_)))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Blob and counters for one archive, before anything touches the disk
#[derive(Debug, Clone)]
pub struct Processed {
    pub blob: OutputBlob,
    pub stats: ExtractStats,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PathBuf,
    pub stats: ExtractStats,
    /// Blob length in chars
    pub chars: usize,
    pub tokens: usize,
    pub strategy: Strategy,
    /// blake3 of the written bytes; stable across reruns on the same input
    pub blob_hash: String,
}

pub struct Pipeline {
    extractor: Extractor,
    estimator: Box<dyn TokenEstimator>,
}

impl Pipeline {
    pub fn new(author: impl Into<String>, estimator: Box<dyn TokenEstimator>) -> Self {
        Self {
            extractor: Extractor::new(author),
            estimator,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.estimator.strategy()
    }

    /// Select, normalize and join one author's messages
    pub fn process(&self, archive: &Archive) -> Processed {
        let (lines, stats) = self.extractor.extract_with_stats(archive);
        Processed {
            blob: OutputBlob::join(&lines),
            stats,
        }
    }

    pub fn estimate(&self, blob: &OutputBlob) -> usize {
        self.estimator.estimate(blob.as_str())
    }

    /// Read `input`, write the joined text to `output`, count its tokens
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunReport> {
        // 1. Load archive
        if !input.exists() {
            return Err(EngineError::MissingInput(input.to_path_buf()));
        }
        let content = std::fs::read_to_string(input).map_err(|source| EngineError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let archive = Archive::from_json_str(&content)?;
        tracing::debug!(path = %input.display(), records = archive.len(), "Loaded archive");

        // 2. Extract and join
        let Processed { blob, stats } = self.process(&archive);

        // 3. Write blob
        std::fs::write(output, blob.as_str()).map_err(|source| EngineError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        let blob_hash = blake3::hash(blob.as_str().as_bytes()).to_hex().to_string();

        // 4. Estimate tokens
        let tokens = self.estimate(&blob);
        let strategy = self.strategy();

        tracing::debug!(
            output = %output.display(),
            selected = stats.selected,
            tokens,
            %strategy,
            "Run complete"
        );

        Ok(RunReport {
            output: output.to_path_buf(),
            stats,
            chars: blob.char_len(),
            tokens,
            strategy,
            blob_hash,
        })
    }
}
