//! Chain ingestion and whole-chain digests.

use crate::types::Chain;
use sha3::Digest;
use std::io::{self, Read, Write};
use thiserror::Error;

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("could not digest reader: {0}")]
    Digest(#[source] io::Error),

    #[error("could not copy from reader: {0}")]
    Copy(#[source] io::Error),

    #[error("chains do not match")]
    NoMatch,

    #[error("invalid sum at index {index}: {source}")]
    InvalidSum {
        index: usize,
        #[source]
        source: hex::FromHexError,
    },
}

/// Adapts a hasher into a writer so `io::copy` can drive it.
struct DigestWriter<'a, D>(&'a mut D);

impl<D: Digest> Write for DigestWriter<'_, D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader that feeds every byte it hands out into a hasher.
struct TeeReader<'a, R, D> {
    reader: R,
    hasher: &'a mut D,
}

impl<R: Read, D: Digest> Read for TeeReader<'_, R, D> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

impl Chain {
    /// Append the digest of everything `reader` yields.
    ///
    /// Returns the hex-encoded digest for convenience. Use the same hash
    /// algorithm for every call on one chain; the hasher itself is consumed,
    /// so each call needs a fresh instance.
    ///
    /// If the reader fails the chain is left untouched.
    pub fn add<R, D>(&mut self, mut reader: R, mut hasher: D) -> Result<String, ChainError>
    where
        R: Read,
        D: Digest,
    {
        io::copy(&mut reader, &mut DigestWriter(&mut hasher)).map_err(ChainError::Digest)?;
        Ok(self.push(hasher))
    }

    /// Same as [`Chain::add`], but also copies every byte to `writer` on the way through.
    ///
    /// On failure the chain is left untouched. Bytes that already reached
    /// `writer` stay there.
    pub fn add_inline<W, R, D>(
        &mut self,
        mut writer: W,
        reader: R,
        mut hasher: D,
    ) -> Result<String, ChainError>
    where
        W: Write,
        R: Read,
        D: Digest,
    {
        let mut tee = TeeReader {
            reader,
            hasher: &mut hasher,
        };
        io::copy(&mut tee, &mut writer).map_err(ChainError::Copy)?;
        writer.flush().map_err(ChainError::Copy)?;
        Ok(self.push(hasher))
    }

    fn push<D: Digest>(&mut self, hasher: D) -> String {
        let sum = hasher.finalize().to_vec();
        let encoded = hex::encode(&sum);
        self.sums.push(sum);
        encoded
    }

    /// Get every digest as lowercase hex, oldest first. Useful for persisting a chain.
    pub fn all_sums(&self) -> Vec<String> {
        self.sums.iter().map(hex::encode).collect()
    }

    /// Digest the concatenation of every sum in the chain.
    ///
    /// Two chains with the same sums in the same order produce the same
    /// result, which makes this a quick mismatch check before running
    /// [`Chain::first_match`] or [`Chain::last_match`].
    pub fn sum<D: Digest>(&self, mut hasher: D) -> String {
        for sum in &self.sums {
            hasher.update(sum);
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha512;
    use sha3::Sha3_256;

    const BUFFER_SHA512: &str = "6cdd012b8c0f1286f868ae4b9a7c6f559a5b83e1273b34eba9ac143dfa37097d37657aff9a492479ec310ae1af01bbbcea02676c52d1b9d6ee66481074343b9b";
    const BUFFER2_SHA512: &str = "be3724850f3fbfd673052614631df78b53e882fab130d50792c9bdf97eb469679f355bcf43c0183ac94ecf0ab63bd7e40349357cc5932d1b60234887fe4631bc";
    const CHAIN1_SHA512: &str = "4665197f1f403a20406ce66c41a54144e813073b3c81d56a36a9c94a9506f459890a788bf384feda4966e76d1deb560135875544c26975f4a2faf8834912a144";
    const CHAIN2_SHA512: &str = "3655e269134d0d6c322eaf489492e842481e4bfbff5dd664903bf7d904791fd29038c44992f27160fccb05181926090231b542d88b71d10e285e9c7d9cdde941";

    const BUFFER_SHA3: &str = "850c0962cff040fb352c8273518960d0c5ce60c961a1a01180a51e05fcf9403e";
    const BUFFER2_SHA3: &str = "33ecd16957feaf2ba8892bcdca9bc354f223d90757b9e18892e9a2636577b388";
    const CHAIN2_SHA3: &str = "6fc5d02f0cc6bfcd6ee765a54c92c8be609b62435f69aecbac1109359feedcc1";
    const EMPTY_SHA3: &str = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";

    /// Yields `data`, then fails.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("device went away"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Accepts `limit` bytes, then fails.
    struct LimitedWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.written.len();
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink full"));
            }
            let n = room.min(buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_returns_sha512_vectors() {
        let mut chain = Chain::new();

        let sum = chain.add(&b"buffer"[..], Sha512::new()).unwrap();
        assert_eq!(sum, BUFFER_SHA512);
        assert_eq!(chain.sum(Sha512::new()), CHAIN1_SHA512);

        let sum = chain.add(&b"buffer2"[..], Sha512::new()).unwrap();
        assert_eq!(sum, BUFFER2_SHA512);
        assert_eq!(chain.sum(Sha512::new()), CHAIN2_SHA512);

        assert_eq!(chain.all_sums(), vec![BUFFER_SHA512, BUFFER2_SHA512]);
    }

    #[test]
    fn test_add_returns_sha3_vectors() {
        let mut chain = Chain::new();

        assert_eq!(chain.add(&b"buffer"[..], Sha3_256::new()).unwrap(), BUFFER_SHA3);
        assert_eq!(chain.add(&b"buffer2"[..], Sha3_256::new()).unwrap(), BUFFER2_SHA3);
        assert_eq!(chain.sum(Sha3_256::new()), CHAIN2_SHA3);
    }

    #[test]
    fn test_add_digest_decodes_to_raw_sum() {
        let mut chain = Chain::new();
        let data = b"generation one";

        let sum = chain.add(&data[..], Sha3_256::new()).unwrap();

        let expected = Sha3_256::digest(data);
        assert_eq!(hex::decode(&sum).unwrap(), expected.as_slice());
        assert_eq!(chain.latest(), Some(expected.as_slice()));
    }

    #[test]
    fn test_add_empty_stream() {
        let mut chain = Chain::new();
        let sum = chain.add(io::empty(), Sha3_256::new()).unwrap();
        assert_eq!(sum, EMPTY_SHA3);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_add_read_failure_leaves_chain_untouched() {
        let mut chain = Chain::new();
        chain.add(&b"buffer"[..], Sha3_256::new()).unwrap();
        let before = chain.clone();

        let result = chain.add(FailingReader { data: b"partial" }, Sha3_256::new());

        assert!(matches!(result, Err(ChainError::Digest(_))));
        assert_eq!(chain, before);
    }

    #[test]
    fn test_add_inline_copies_stream() {
        let mut chain = Chain::new();
        let mut out = Vec::new();

        let sum = chain
            .add_inline(&mut out, &b"buffer"[..], Sha512::new())
            .unwrap();

        assert_eq!(sum, BUFFER_SHA512);
        assert_eq!(out, b"buffer");
        assert_eq!(chain.all_sums(), vec![BUFFER_SHA512]);
    }

    #[test]
    fn test_add_inline_large_stream() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        let mut chain = Chain::new();
        let mut out = Vec::new();

        let sum = chain
            .add_inline(&mut out, data.as_slice(), Sha3_256::new())
            .unwrap();

        assert_eq!(out, data);
        assert_eq!(sum, hex::encode(Sha3_256::digest(&data)));
    }

    #[test]
    fn test_add_inline_matches_add() {
        let mut plain = Chain::new();
        let mut inline = Chain::new();

        plain.add(&b"same bytes"[..], Sha3_256::new()).unwrap();
        inline
            .add_inline(io::sink(), &b"same bytes"[..], Sha3_256::new())
            .unwrap();

        assert_eq!(plain, inline);
    }

    #[test]
    fn test_add_inline_read_failure_leaves_chain_untouched() {
        let mut chain = Chain::new();
        let mut out = Vec::new();

        let result = chain.add_inline(&mut out, FailingReader { data: b"part" }, Sha3_256::new());

        assert!(matches!(result, Err(ChainError::Copy(_))));
        assert!(chain.is_empty());
        // Bytes already copied are not rolled back.
        assert_eq!(out, b"part");
    }

    #[test]
    fn test_add_inline_write_failure_leaves_chain_untouched() {
        let mut chain = Chain::new();
        let mut sink = LimitedWriter {
            written: Vec::new(),
            limit: 3,
        };

        let result = chain.add_inline(&mut sink, &b"buffer"[..], Sha3_256::new());

        assert!(matches!(result, Err(ChainError::Copy(_))));
        assert!(chain.is_empty());
        assert_eq!(sink.written, b"buf");
    }

    #[test]
    fn test_all_sums_in_insertion_order() {
        let mut chain = Chain::new();
        let inputs = ["one", "two", "three", "four"];
        let mut returned = Vec::new();

        for input in inputs {
            returned.push(chain.add(input.as_bytes(), Sha3_256::new()).unwrap());
        }

        assert_eq!(chain.all_sums(), returned);
        assert_eq!(chain.all_sums().len(), inputs.len());
    }

    #[test]
    fn test_all_sums_round_trips_through_from_sums() {
        let mut chain = Chain::new();
        chain.add(&b"buffer"[..], Sha512::new()).unwrap();
        chain.add(&b"buffer2"[..], Sha512::new()).unwrap();

        let reloaded = Chain::from_sums(chain.all_sums()).unwrap();
        assert_eq!(reloaded, chain);
    }

    #[test]
    fn test_sum_empty_chain() {
        let chain = Chain::new();
        assert_eq!(chain.sum(Sha3_256::new()), EMPTY_SHA3);
    }

    #[test]
    fn test_sum_deterministic() {
        let mut chain = Chain::new();
        chain.add(&b"buffer"[..], Sha3_256::new()).unwrap();

        let first = chain.sum(Sha3_256::new());
        let second = chain.sum(Sha3_256::new());
        assert_eq!(first, second);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_sum_changes_with_new_generation() {
        let mut chain = Chain::new();
        chain.add(&b"buffer"[..], Sha3_256::new()).unwrap();
        let before = chain.sum(Sha3_256::new());

        chain.add(&b"buffer2"[..], Sha3_256::new()).unwrap();
        let after = chain.sum(Sha3_256::new());

        assert_ne!(before, after);
    }

    #[test]
    fn test_sum_equal_for_identically_built_chains() {
        let mut chain1 = Chain::new();
        let mut chain2 = Chain::new();

        for input in ["a", "b", "c"] {
            chain1.add(input.as_bytes(), Sha3_256::new()).unwrap();
            chain2.add(input.as_bytes(), Sha3_256::new()).unwrap();
        }

        assert_eq!(chain1.sum(Sha3_256::new()), chain2.sum(Sha3_256::new()));
    }
}
