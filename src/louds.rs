//! Tree topologies in the level-order unary degree sequence (LOUDS).
//!
//! A [`BvTree`] records an ordinal tree while its nodes are visited in
//! breadth-first order, and afterwards answers which node ids are the
//! children of a node. Ids are assigned in visitation order, so the root is
//! node 0 and the children of any node are consecutive.
//!
//! | Implementation | Bit vectors | Child range by |
//! | --- | --- | --- |
//! | [`LoudsBvTree`] | one, $`2n - 1`$ bits | `select0` on the whole sequence |
//! | [`LoudsPpBvTree`] | two, $`n`$ and $`n - 1`$ bits | `rank1` then `select1` on sibling-group marks |
#![cfg(target_pointer_width = "64")]

pub mod pp;

pub use pp::LoudsPpBvTree;

use std::io::{Read, Write};
use std::ops::Range;

use anyhow::Result;

use crate::bit_vectors::{prelude::*, SuccinctBitVector};
use crate::{Error, Serializable};

/// An interface for tree topologies built in breadth-first order.
pub trait BvTree: Serializable {
    /// Tag distinguishing the encodings in serialized tries.
    const KIND: u32;

    /// Creates a new empty topology with room for `num_nodes` nodes.
    fn with_capacity(num_nodes: usize) -> Self;

    /// Records one child of the node being visited.
    fn append_child(&mut self);

    /// Finishes the node being visited.
    fn append_self(&mut self);

    /// Returns the half-open range of ids of the children of `node_id`.
    ///
    /// A leaf gets an empty range starting at the id its first child would
    /// have taken. Ids out of range give `0..0`.
    fn child_range(&self, node_id: usize) -> Range<usize>;

    /// Returns the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Returns the number of bits spent on the shape.
    fn num_bits(&self) -> usize;

    /// Shrinks the buffers to fit.
    fn trim_to_size(&mut self);
}

/// Shape of an ordinal tree encoded in a single [`SuccinctBitVector`].
///
/// Each visited node contributes one set bit per child, in left-to-right
/// order, followed by one unset bit that terminates it. A node's id is the
/// index of its terminator among the unset bits. A tree of $`n`$ nodes takes
/// $`2n - 1`$ bits.
///
/// # Examples
///
/// ```
/// use loudstrie::louds::{BvTree, LoudsBvTree};
///
/// // root -> {1, 2}, 1 -> {3}
/// let mut tree = LoudsBvTree::new();
/// tree.append_child();
/// tree.append_child();
/// tree.append_self(); // 0
/// tree.append_child();
/// tree.append_self(); // 1
/// tree.append_self(); // 2
/// tree.append_self(); // 3
///
/// assert_eq!(tree.num_nodes(), 4);
/// assert_eq!(tree.child_range(0), 1..3);
/// assert_eq!(tree.child_range(1), 3..4);
/// assert_eq!(tree.child_range(2), 4..4);
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LoudsBvTree {
    bv: SuccinctBitVector,
}

impl LoudsBvTree {
    /// Creates a new empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reference of the underlying bit vector.
    pub const fn bit_vector(&self) -> &SuccinctBitVector {
        &self.bv
    }

    /// Checks that the bits describe a tree whose nodes are all reachable from the root.
    fn validate(&self) -> Result<()> {
        if self.bv.is_empty() {
            return Ok(());
        }
        let (ones, zeros) = (self.bv.num_ones(), self.bv.num_zeros());
        if zeros == 0 || ones != zeros - 1 {
            return Err(Error::serialization(format!(
                "topology of {zeros} nodes must have {} edges, but got {ones}.",
                zeros.saturating_sub(1)
            )));
        }
        // Node k (k >= 1) must have been announced as a child before it is terminated.
        let (mut ones, mut zeros) = (0, 0);
        for bit in self.bv.iter() {
            if bit {
                ones += 1;
            } else {
                if zeros > ones {
                    return Err(Error::serialization(format!(
                        "node {zeros} is terminated before its parent lists it."
                    )));
                }
                zeros += 1;
            }
        }
        Ok(())
    }
}

impl BvTree for LoudsBvTree {
    const KIND: u32 = 0;

    fn with_capacity(num_nodes: usize) -> Self {
        Self {
            bv: SuccinctBitVector::with_capacity(num_nodes * 2),
        }
    }

    #[inline(always)]
    fn append_child(&mut self) {
        self.bv.append1();
    }

    #[inline(always)]
    fn append_self(&mut self) {
        self.bv.append0();
    }

    /// # Complexity
    ///
    /// - Logarithmic
    fn child_range(&self, node_id: usize) -> Range<usize> {
        let start_pos = if node_id == 0 {
            0
        } else {
            match self.bv.select0(node_id - 1) {
                Some(pos) => pos + 1,
                None => return 0..0,
            }
        };
        let Some(end_pos) = self.bv.next0(start_pos) else {
            return 0..0;
        };
        // Children of earlier nodes precede this run, and the root is nobody's child.
        let first = self.bv.rank1(start_pos).map_or(0, |r| r + 1);
        first..first + (end_pos - start_pos)
    }

    fn num_nodes(&self) -> usize {
        self.bv.num_zeros()
    }

    fn num_bits(&self) -> usize {
        self.bv.len()
    }

    fn trim_to_size(&mut self) {
        self.bv.trim_to_size();
    }
}

impl Serializable for LoudsBvTree {
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        self.bv.serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        let bv = SuccinctBitVector::deserialize_from(reader)?;
        let tree = Self { bv };
        tree.validate()?;
        Ok(tree)
    }

    fn size_in_bytes(&self) -> usize {
        self.bv.size_in_bytes()
    }
}
