//! Storage of edge-label remainders ("tails").
//!
//! # Introduction
//!
//! A trie edge label is split into its first character, which the trie keeps
//! for child lookup, and the remaining characters, which are stored here.
//! Tails are written once during construction through a [`TailArrayBuilder`]
//! and read afterwards from the frozen [`TailArray`].
//!
//! Each tail is a run of characters followed by [`TAIL_TERMINATOR`] in a
//! shared buffer, addressed by the offset of its first character. How runs
//! are laid out is decided by a [`TailBuilder`]:
//!
//! - [`ConcatTailBuilder`] appends every tail as is.
//! - [`SuffixTrieTailBuilder`] reuses a stored run whenever the new tail is a
//!   suffix of one already stored, which pays off when words share endings.
//!
//! # Examples
//!
//! ```
//! use loudstrie::tails::{SuffixTrieTailBuilder, TailArrayBuilder};
//!
//! let mut builder = TailArrayBuilder::new(SuffixTrieTailBuilder::new());
//! let a = builder.append(&['i', 'n', 'g']);
//! builder.append_empty();
//! let b = builder.append(&['n', 'g']);
//! assert_eq!(b, a + 1);
//!
//! let tails = builder.freeze();
//! assert_eq!(tails.num_nodes(), 3);
//! assert_eq!(tails.node_iter(0).collect::<String>(), "ing");
//! assert_eq!(tails.node_iter(1).count(), 0);
//! assert_eq!(tails.node_iter(2).collect::<String>(), "ng");
//! assert_eq!(tails.tails().len(), 4);
//! ```
pub mod concat;
pub mod index;
pub mod iter;
pub mod suffix_trie;

pub use concat::ConcatTailBuilder;
pub use index::TailIndex;
pub use iter::TailIter;
pub use suffix_trie::SuffixTrieTailBuilder;

use std::io::{Read, Write};

use anyhow::Result;

use crate::{Error, Serializable};
use index::TailIndexBuilder;

/// Character closing every stored tail.
pub const TAIL_TERMINATOR: char = '\0';

/// Strategy for laying out tails in the shared buffer.
pub trait TailBuilder {
    /// Stores `tail` and returns the offset of its first character.
    ///
    /// `tail` must not contain [`TAIL_TERMINATOR`].
    fn append(&mut self, tail: &[char]) -> usize;

    /// Returns the number of characters written so far, terminators included.
    fn len(&self) -> usize;

    /// Checks if nothing has been written.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the builder, returning the buffer.
    fn into_tails(self) -> Vec<char>;
}

/// Builder assigning one tail slot per trie node, in node-id order.
#[derive(Default, Debug, Clone)]
pub struct TailArrayBuilder<B> {
    builder: B,
    index: TailIndexBuilder,
}

impl<B> TailArrayBuilder<B>
where
    B: TailBuilder,
{
    /// Creates a new builder laying out tails with `builder`.
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            index: TailIndexBuilder::default(),
        }
    }

    /// Stores `tail` for the next node, returning its offset.
    pub fn append(&mut self, tail: &[char]) -> usize {
        debug_assert!(!tail.contains(&TAIL_TERMINATOR));
        let offset = self.builder.append(tail);
        self.index.push(Some(offset));
        offset
    }

    /// Records that the next node has no tail.
    pub fn append_empty(&mut self) {
        self.index.push(None);
    }

    /// Returns the number of nodes recorded so far.
    pub fn num_nodes(&self) -> usize {
        self.index.len()
    }

    /// Finishes construction, returning the read-only array trimmed to size.
    pub fn freeze(self) -> TailArray {
        let mut tails = self.builder.into_tails();
        tails.shrink_to_fit();
        TailArray {
            tails,
            index: self.index.freeze(),
        }
    }
}

/// Read-only tails of all nodes of a trie.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TailArray {
    tails: Vec<char>,
    index: TailIndex,
}

impl TailArray {
    /// Returns the offset of the tail of `node_id`, or [`None`] if it has none.
    #[inline(always)]
    pub fn offset(&self, node_id: usize) -> Option<usize> {
        self.index.get(node_id)
    }

    /// Creates an iterator positioned at `offset`.
    pub fn iter(&self, offset: usize) -> TailIter {
        TailIter::new(&self.tails, offset)
    }

    /// Creates an iterator over the tail of `node_id`, empty if it has none.
    pub fn node_iter(&self, node_id: usize) -> TailIter {
        let mut it = TailIter::empty(&self.tails);
        it.set_node(self, node_id);
        it
    }

    /// Returns the shared character buffer.
    pub fn tails(&self) -> &[char] {
        &self.tails
    }

    /// Returns the number of nodes having a tail slot.
    pub fn num_nodes(&self) -> usize {
        self.index.len()
    }

    /// Returns the per-node offset index.
    pub const fn index(&self) -> &TailIndex {
        &self.index
    }
}

impl Serializable for TailArray {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = self.tails.serialize_into(&mut writer)?;
        mem += self.index.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let tails = Vec::<char>::deserialize_from(&mut reader)?;
        let index = TailIndex::deserialize_from(&mut reader)?;
        if tails.last().map_or(false, |&c| c != TAIL_TERMINATOR) {
            return Err(Error::serialization("tail buffer is not terminated."));
        }
        if let Some(&offset) = index.offsets().iter().find(|&&o| o >= tails.len()) {
            return Err(Error::serialization(format!(
                "tail offset {offset} exceeds the buffer of {} chars.",
                tails.len()
            )));
        }
        Ok(Self { tails, index })
    }

    fn size_in_bytes(&self) -> usize {
        self.tails.size_in_bytes() + self.index.size_in_bytes()
    }
}
