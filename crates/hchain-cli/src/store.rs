//! JSON chain files.

use crate::algorithm::HashAlgorithm;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use hchain::Chain;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A chain persisted on disk, together with the algorithm it was built with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainFile {
    /// Algorithm every sum in the file was computed with
    pub algorithm: HashAlgorithm,

    /// When the file was last written
    pub updated: DateTime<Utc>,

    /// Hex-encoded sums, oldest first
    #[serde(default)]
    pub sums: Vec<String>,
}

impl ChainFile {
    /// Create an empty chain file.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            updated: Utc::now(),
            sums: Vec::new(),
        }
    }

    /// Load a chain file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read chain file {}", path.display()))?;
        let file: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse chain file {}", path.display()))?;
        Ok(file)
    }

    /// Load a chain file, or start a new one if `path` does not exist yet.
    ///
    /// When `algorithm` is given it must agree with an existing file.
    pub fn load_or_new<P: AsRef<Path>>(path: P, algorithm: Option<HashAlgorithm>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new(algorithm.unwrap_or_default()));
        }

        let file = Self::load(path)?;
        if let Some(requested) = algorithm {
            if requested != file.algorithm {
                bail!(
                    "algorithm mismatch: {} is recorded with {}, not {}",
                    path.display(),
                    file.algorithm,
                    requested
                );
            }
        }
        Ok(file)
    }

    /// Save the chain file as pretty-printed JSON.
    ///
    /// The JSON goes to a temporary file next to `path` which is then renamed
    /// over it, so an interrupted save never leaves a truncated chain behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("failed to serialize chain file")?;

        let mut staged = NamedTempFile::new_in(parent_dir(path))
            .with_context(|| format!("failed to stage chain file {}", path.display()))?;
        staged
            .write_all(json.as_bytes())
            .with_context(|| format!("failed to write chain file {}", path.display()))?;
        staged
            .persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("failed to replace chain file {}", path.display()))?;
        Ok(())
    }

    /// Rebuild the in-memory chain from the stored sums.
    pub fn chain(&self) -> Result<Chain> {
        Chain::from_sums(&self.sums).context("chain file holds an invalid sum")
    }

    /// Replace the stored sums with those of `chain`.
    pub fn record(&mut self, chain: &Chain) {
        self.sums = chain.all_sums();
        self.updated = Utc::now();
    }
}

/// Directory a sibling temporary file for `path` should live in.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
