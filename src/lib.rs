//! # `loudstrie`: Compact read-only string dictionary
//!
//! `loudstrie` stores a set of strings in a trie whose shape is encoded in the
//! [level-order unary degree sequence](https://doi.org/10.1109/SFCS.1989.63533) (LOUDS)
//! and whose edge labels are split into a first character and a shared tail buffer.
//! Nodes are plain integers and navigation is done by rank/select on bit vectors,
//! so the whole dictionary is a handful of flat arrays.
//!
//! ## Data structures
//!
//! - [`CompactTrie`]
//!   - The dictionary: membership, common-prefix search, predictive search, and dense word ids.
//!   - [`LoudsTrie`] and [`LoudsPpTrie`] fix its topology.
//! - [`PatriciaTrie`]
//!   - Growable trie used to collect words before building a [`CompactTrie`].
//! - [`SuccinctBitVector`](bit_vectors::SuccinctBitVector)
//!   - Append-only bit vector with rank/select support.
//! - [`LoudsBvTree`](louds::LoudsBvTree) and [`LoudsPpBvTree`](louds::LoudsPpBvTree)
//!   - Tree topologies in LOUDS and LOUDS++, behind the [`BvTree`](louds::BvTree) trait.
//! - [`TailArray`](tails::TailArray)
//!   - Edge-label remainders, laid out by a [`TailBuilder`](tails::TailBuilder).
//!
//! ## Example
//!
//! ```
//! use loudstrie::{LoudsTrie, PatriciaTrie, Serializable, Trie};
//! use loudstrie::tails::SuffixTrieTailBuilder;
//!
//! let mut src = PatriciaTrie::new();
//! for w in ["walk", "walking", "talk", "talking"] {
//!     src.insert(w).unwrap();
//! }
//! let trie = LoudsTrie::build_with(&src, SuffixTrieTailBuilder::new()).unwrap();
//!
//! assert!(trie.contains("talk"));
//! assert_eq!(trie.predictive_search("wa").count(), 2);
//!
//! let mut bytes = vec![];
//! trie.serialize_into(&mut bytes).unwrap();
//! let other = LoudsTrie::deserialize_from(&bytes[..]).unwrap();
//! assert_eq!(trie, other);
//! ```
//!
//! ## Limitation
//!
//! This library is designed to run on 64-bit machines.
#![deny(missing_docs)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod bit_vectors;
pub mod broadword;
pub mod error;
pub mod louds;
pub mod patricia;
pub mod serial;
pub mod tails;
pub mod trie;
pub mod utils;

pub use error::Error;
pub use patricia::PatriciaTrie;
pub use serial::Serializable;
pub use trie::{CompactTrie, LoudsNode, LoudsPpTrie, LoudsTrie, SourceTrie};

use anyhow::Result;

/// An interface for string dictionaries.
pub trait Trie {
    /// Returns the number of words stored.
    fn len(&self) -> usize;

    /// Checks if no word is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if `word` is stored.
    fn contains(&self, word: &str) -> bool;

    /// Adds `word`, returning `true` if it was not stored yet.
    ///
    /// # Errors
    ///
    /// Read-only implementations return [`Error::UnsupportedOperation`].
    fn insert(&mut self, word: &str) -> Result<bool>;
}
