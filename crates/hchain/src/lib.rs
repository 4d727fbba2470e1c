//! Generational digest chains.
//!
//! A [`Chain`] records one digest per generation of a single logical file,
//! oldest first. Two chains kept in different places (a local copy and a
//! remote copy, say) can later be compared to find where their histories
//! converge or diverge.
//!
//! The hash algorithm is chosen by the caller on every call: any RustCrypto
//! hasher implementing [`sha3::Digest`] works. Chains carry no storage
//! format of their own; persist [`Chain::all_sums`] and reload it with
//! [`Chain::from_sums`].
//!
//! # Example
//!
//! ```
//! use hchain::{Chain, ChainError};
//! use sha3::{Digest, Sha3_256};
//!
//! let mut local = Chain::new();
//! let mut remote = Chain::new();
//!
//! for generation in ["v1", "v2"] {
//!     local.add(generation.as_bytes(), Sha3_256::new()).unwrap();
//!     remote.add(generation.as_bytes(), Sha3_256::new()).unwrap();
//! }
//! local.add(&b"local edit"[..], Sha3_256::new()).unwrap();
//! remote.add(&b"remote edit"[..], Sha3_256::new()).unwrap();
//!
//! // Everything `remote` recorded after the shared history.
//! let diverged = local.last_match(&remote).unwrap();
//! assert_eq!(diverged.len(), 1);
//!
//! let unrelated = Chain::from_sums(["00ff"]).unwrap();
//! assert!(matches!(local.first_match(&unrelated), Err(ChainError::NoMatch)));
//! ```

mod chain;
mod matching;
mod types;

pub use chain::ChainError;
pub use types::Chain;
