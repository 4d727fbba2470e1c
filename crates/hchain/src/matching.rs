//! Finding where two chains converge or diverge.
//!
//! Both searches compare digests byte for byte. The sub-chains they return
//! are owned copies of the tail of `other`, so later appends to either input
//! do not affect them.

use crate::chain::ChainError;
use crate::types::Chain;

impl Chain {
    /// Find the first digest of `self` that also appears in `other`, and
    /// return `other` from that point on.
    ///
    /// `self` is scanned in order and, for each digest, `other` is scanned
    /// from its start. The first pair found wins, so the result is not always
    /// the earliest position in `other` that matches some digest of `self`.
    pub fn first_match(&self, other: &Chain) -> Result<Chain, ChainError> {
        for sum in &self.sums {
            if let Some(index) = other.position(sum) {
                return Ok(Chain::from_slice(&other.sums[index..]));
            }
        }

        Err(ChainError::NoMatch)
    }

    /// Find where `other` stops following the history of `self`, and return
    /// the part of `other` after the last shared digest.
    ///
    /// Assumes both chains share a common prefix and then diverge. The walk
    /// stops at the first digest of `self` that is missing from `other`
    /// once at least one earlier digest matched. If every digest of `self`
    /// is found, the chains fully overlap and the result is empty.
    pub fn last_match(&self, other: &Chain) -> Result<Chain, ChainError> {
        let mut last_matched: Option<usize> = None;

        for sum in &self.sums {
            match other.position(sum) {
                Some(index) => last_matched = Some(index),
                None => {
                    if let Some(index) = last_matched {
                        return Ok(Chain::from_slice(&other.sums[index + 1..]));
                    }
                }
            }
        }

        match last_matched {
            Some(_) => Ok(Chain::new()),
            None => Err(ChainError::NoMatch),
        }
    }

    fn position(&self, sum: &[u8]) -> Option<usize> {
        self.sums.iter().position(|candidate| candidate.as_slice() == sum)
    }
}
