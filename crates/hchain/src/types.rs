//! Chain data structure.

use crate::chain::ChainError;

/// An ordered list of digests, one per generation of a single logical file.
///
/// Generations are stored oldest first. The chain does not care which hash
/// algorithm produced each digest, nor how long the digests are; comparing
/// chains is only meaningful when both were built with the same algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    pub(crate) sums: Vec<Vec<u8>>,
}

impl Chain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self { sums: Vec::new() }
    }

    /// Rebuild a chain from hex-encoded sums, as produced by [`Chain::all_sums`].
    ///
    /// Fails on the first entry that is not valid hex; nothing is returned
    /// for the entries before it.
    pub fn from_sums<I, S>(sums: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sums = sums
            .into_iter()
            .enumerate()
            .map(|(index, sum)| {
                hex::decode(sum.as_ref())
                    .map_err(|source| ChainError::InvalidSum { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sums })
    }

    pub(crate) fn from_slice(sums: &[Vec<u8>]) -> Self {
        Self {
            sums: sums.to_vec(),
        }
    }

    /// Get the raw digest recorded for a generation.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.sums.get(index).map(Vec::as_slice)
    }

    /// Get the most recent digest in the chain.
    pub fn latest(&self) -> Option<&[u8]> {
        self.sums.last().map(Vec::as_slice)
    }

    /// Iterate over the raw digests, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.sums.iter().map(Vec::as_slice)
    }

    /// Get the number of generations in the chain.
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chain_is_empty() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.latest().is_none());
        assert_eq!(chain, Chain::default());
    }

    #[test]
    fn test_from_sums_decodes_in_order() {
        let chain = Chain::from_sums(["00ff", "ABCD"]).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.get(0), Some(&[0x00, 0xff][..]));
        assert_eq!(chain.latest(), Some(&[0xab, 0xcd][..]));
        assert!(chain.get(2).is_none());
    }

    #[test]
    fn test_from_sums_reports_bad_index() {
        let result = Chain::from_sums(vec!["00ff".to_string(), "zz".to_string()]);
        assert!(matches!(result, Err(ChainError::InvalidSum { index: 1, .. })));
    }

    #[test]
    fn test_from_sums_empty() {
        let chain = Chain::from_sums(Vec::<String>::new()).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_iter_preserves_order() {
        let chain = Chain::from_sums(["01", "02", "03"]).unwrap();
        let raw: Vec<&[u8]> = chain.iter().collect();
        assert_eq!(raw, vec![&[1u8][..], &[2u8][..], &[3u8][..]]);
    }
}
