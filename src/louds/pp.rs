//! LOUDS++ topology split into two bit vectors.
#![cfg(target_pointer_width = "64")]

use std::io::{Read, Write};
use std::ops::Range;

use anyhow::Result;

use super::BvTree;
use crate::bit_vectors::{prelude::*, SuccinctBitVector};
use crate::{Error, Serializable};

/// Shape of an ordinal tree in the LOUDS++ layout of Delpratt, Rahman and Raman.
///
/// The unary degree sequence of [`LoudsBvTree`](super::LoudsBvTree) is cut into
/// its runs of ones and zeros:
///
/// - `r0` has one bit per node, set if the node has children;
/// - `r1` has one bit per non-root node, set if it is the first child of its parent.
///
/// The `j`-th set bit of `r0` and of `r1` belong to the same sibling group, so
/// a child range costs one `rank1` and two `select1`. A tree of $`n`$ nodes
/// takes $`2n - 1`$ bits, as in the single-vector layout.
///
/// # Examples
///
/// ```
/// use loudstrie::louds::{BvTree, LoudsPpBvTree};
///
/// // root -> {1, 2}, 1 -> {3}
/// let mut tree = LoudsPpBvTree::new();
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
pub struct LoudsPpBvTree {
    r0: SuccinctBitVector,
    r1: SuccinctBitVector,
    pending_children: usize,
}

impl LoudsPpBvTree {
    /// Creates a new empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the marks of nodes with children.
    pub const fn parents(&self) -> &SuccinctBitVector {
        &self.r0
    }

    /// Returns the marks of first children.
    pub const fn first_children(&self) -> &SuccinctBitVector {
        &self.r1
    }

    // Id of the first child in the `j`-th sibling group, or one past the last node.
    fn group_start(&self, j: usize) -> usize {
        self.r1.select1(j).map_or(self.r0.len(), |pos| pos + 1)
    }

    fn validate(&self) -> Result<()> {
        let num_nodes = self.r0.len();
        let num_children = num_nodes.saturating_sub(1);
        if self.r1.len() != num_children {
            return Err(Error::serialization(format!(
                "topology of {num_nodes} nodes must have {num_children} child marks, but got {}.",
                self.r1.len()
            )));
        }
        let num_groups = self.r0.num_ones();
        if self.r1.num_ones() != num_groups {
            return Err(Error::serialization(format!(
                "{num_groups} nodes have children, but got {} sibling groups.",
                self.r1.num_ones()
            )));
        }
        if self.r1.access(0) == Some(false) {
            return Err(Error::serialization("node 1 has no parent.".to_string()));
        }
        for j in 0..num_groups {
            let (Some(parent), Some(pos)) = (self.r0.select1(j), self.r1.select1(j)) else {
                break;
            };
            if pos < parent {
                return Err(Error::serialization(format!(
                    "node {} must come after its parent {parent}.",
                    pos + 1
                )));
            }
        }
        Ok(())
    }
}

impl BvTree for LoudsPpBvTree {
    const KIND: u32 = 1;

    fn with_capacity(num_nodes: usize) -> Self {
        Self {
            r0: SuccinctBitVector::with_capacity(num_nodes),
            r1: SuccinctBitVector::with_capacity(num_nodes),
            pending_children: 0,
        }
    }

    #[inline(always)]
    fn append_child(&mut self) {
        self.r1.push_bit(self.pending_children == 0);
        self.pending_children += 1;
    }

    #[inline(always)]
    fn append_self(&mut self) {
        self.r0.push_bit(self.pending_children != 0);
        self.pending_children = 0;
    }

    /// # Complexity
    ///
    /// - Logarithmic
    fn child_range(&self, node_id: usize) -> Range<usize> {
        let Some(has_children) = self.r0.access(node_id) else {
            return 0..0;
        };
        let Some(j) = self.r0.rank1(node_id) else {
            return 0..0;
        };
        let start = self.group_start(j);
        if has_children {
            start..self.group_start(j + 1)
        } else {
            start..start
        }
    }

    fn num_nodes(&self) -> usize {
        self.r0.len()
    }

    fn num_bits(&self) -> usize {
        self.r0.len() + self.r1.len()
    }

    fn trim_to_size(&mut self) {
        self.r0.trim_to_size();
        self.r1.trim_to_size();
    }
}

impl Serializable for LoudsPpBvTree {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = self.r0.serialize_into(&mut writer)?;
        mem += self.r1.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let r0 = SuccinctBitVector::deserialize_from(&mut reader)?;
        let r1 = SuccinctBitVector::deserialize_from(&mut reader)?;
        let tree = Self {
            r0,
            r1,
            pending_children: 0,
        };
        tree.validate()?;
        Ok(tree)
    }

    fn size_in_bytes(&self) -> usize {
        self.r0.size_in_bytes() + self.r1.size_in_bytes()
    }
}
