//! Per-node lookup of tail offsets.
use std::io::{Read, Write};

use anyhow::Result;

use crate::bit_vectors::{prelude::*, SuccinctBitVector};
use crate::{Error, Serializable};

/// Mapping from node ids to tail offsets.
///
/// A bit vector marks the nodes having a tail, and the offsets of those nodes
/// alone are kept densely in node-id order, so nodes labelled by a single
/// character cost one bit.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TailIndex {
    has_tail: SuccinctBitVector,
    offsets: Vec<usize>,
}

impl TailIndex {
    /// Returns the tail offset of `node_id`, or [`None`] if it has no tail or is out of range.
    #[inline(always)]
    pub fn get(&self, node_id: usize) -> Option<usize> {
        if self.has_tail.access(node_id)? {
            Some(self.offsets[self.has_tail.rank1(node_id)?])
        } else {
            None
        }
    }

    /// Returns the number of nodes indexed.
    pub fn len(&self) -> usize {
        self.has_tail.len()
    }

    /// Checks if no node is indexed.
    pub fn is_empty(&self) -> bool {
        self.has_tail.is_empty()
    }

    /// Returns the offsets of the nodes having a tail, in node-id order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

impl Serializable for TailIndex {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = self.has_tail.serialize_into(&mut writer)?;
        mem += self.offsets.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let has_tail = SuccinctBitVector::deserialize_from(&mut reader)?;
        let offsets = Vec::<usize>::deserialize_from(&mut reader)?;
        if has_tail.num_ones() != offsets.len() {
            return Err(Error::serialization(format!(
                "{} nodes have a tail, but got {} offsets.",
                has_tail.num_ones(),
                offsets.len()
            )));
        }
        Ok(Self { has_tail, offsets })
    }

    fn size_in_bytes(&self) -> usize {
        self.has_tail.size_in_bytes() + self.offsets.size_in_bytes()
    }
}

/// Builder of [`TailIndex`], fed one node at a time.
#[derive(Default, Debug, Clone)]
pub(crate) struct TailIndexBuilder {
    has_tail: SuccinctBitVector,
    offsets: Vec<usize>,
}

impl TailIndexBuilder {
    pub fn push(&mut self, offset: Option<usize>) {
        self.has_tail.push_bit(offset.is_some());
        self.offsets.extend(offset);
    }

    pub fn len(&self) -> usize {
        self.has_tail.len()
    }

    pub fn freeze(mut self) -> TailIndex {
        self.has_tail.trim_to_size();
        self.offsets.shrink_to_fit();
        TailIndex {
            has_tail: self.has_tail,
            offsets: self.offsets,
        }
    }
}
