//! Hash algorithm selection for chain files.

use clap::ValueEnum;
use hchain::{Chain, ChainError};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};
use sha3::{Digest, Sha3_256, Sha3_512};
use std::fmt;
use std::io::{Read, Write};

/// Digest algorithms a chain file can be recorded with.
///
/// Every operation below builds a fresh hasher, so one chain file always
/// uses a single algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "sha3-256")]
    #[value(name = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-512")]
    #[value(name = "sha3-512")]
    Sha3_512,
    #[serde(rename = "sha256")]
    #[value(name = "sha256")]
    Sha256,
    #[serde(rename = "sha512")]
    #[value(name = "sha512")]
    Sha512,
}

impl HashAlgorithm {
    /// Name used on the command line and in chain files.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_512 => "sha3-512",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Append the digest of `reader` to `chain`.
    pub fn add<R: Read>(self, chain: &mut Chain, reader: R) -> Result<String, ChainError> {
        match self {
            HashAlgorithm::Sha3_256 => chain.add(reader, Sha3_256::new()),
            HashAlgorithm::Sha3_512 => chain.add(reader, Sha3_512::new()),
            HashAlgorithm::Sha256 => chain.add(reader, Sha256::new()),
            HashAlgorithm::Sha512 => chain.add(reader, Sha512::new()),
        }
    }

    /// Append the digest of `reader` to `chain` while copying it to `writer`.
    pub fn add_inline<W: Write, R: Read>(
        self,
        chain: &mut Chain,
        writer: W,
        reader: R,
    ) -> Result<String, ChainError> {
        match self {
            HashAlgorithm::Sha3_256 => chain.add_inline(writer, reader, Sha3_256::new()),
            HashAlgorithm::Sha3_512 => chain.add_inline(writer, reader, Sha3_512::new()),
            HashAlgorithm::Sha256 => chain.add_inline(writer, reader, Sha256::new()),
            HashAlgorithm::Sha512 => chain.add_inline(writer, reader, Sha512::new()),
        }
    }

    /// Digest of the whole chain.
    pub fn sum(self, chain: &Chain) -> String {
        match self {
            HashAlgorithm::Sha3_256 => chain.sum(Sha3_256::new()),
            HashAlgorithm::Sha3_512 => chain.sum(Sha3_512::new()),
            HashAlgorithm::Sha256 => chain.sum(Sha256::new()),
            HashAlgorithm::Sha512 => chain.sum(Sha512::new()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
