//! Read-only trie over a LOUDS-family topology with tail-compressed labels.
#![cfg(target_pointer_width = "64")]

pub mod iter;
pub mod node;

pub use iter::{CommonPrefixIter, PredictiveIter};
pub use node::LoudsNode;

use std::collections::VecDeque;
use std::io::{Read, Write};

use anyhow::Result;

use crate::bit_vectors::{prelude::*, SuccinctBitVector};
use crate::louds::{BvTree, LoudsBvTree, LoudsPpBvTree};
use crate::tails::{ConcatTailBuilder, TailArray, TailArrayBuilder, TailBuilder, TailIter, TAIL_TERMINATOR};
use crate::{Error, Serializable, Trie};

/// Label stored for the root, which has no incoming edge.
pub const NO_LABEL: char = '\u{FFFF}';

/// Child ranges longer than this are searched by bisection, shorter ones by linear scan.
pub const BINARY_SEARCH_THRESHOLD: usize = 16;

const MAGIC: u64 = u64::from_le_bytes(*b"LOUDSTR\0");
const VERSION: u32 = 1;

/// Trie read by [`CompactTrie::build()`].
///
/// Nodes are addressed by indices in `0..self.num_nodes()`. Children must be
/// listed in strictly ascending order of the first letter of their labels,
/// and every node except the root must have a non-empty label.
pub trait SourceTrie {
    /// Returns the root, or [`None`] if the trie has no node at all.
    fn root(&self) -> Option<usize>;

    /// Returns the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Returns the label of the edge leading to `node`.
    fn letters(&self, node: usize) -> &[char];

    /// Checks if a word ends at `node`.
    fn is_terminal(&self, node: usize) -> bool;

    /// Returns the children of `node`.
    fn children(&self, node: usize) -> &[usize];
}

/// Compact read-only string dictionary over the topology `T`.
///
/// The trie shape is a [`BvTree`], so nodes are plain integers assigned
/// in breadth-first order and navigation is done by rank/select. Per node,
/// the first character of its label is kept in an array for child lookup and
/// the rest of the label lives in a [`TailArray`]. A second bit vector marks
/// the nodes where words end; its rank gives each word a dense id, the
/// *term id*, in `0..self.len()`.
///
/// The trie is built once from a [`SourceTrie`] such as
/// [`PatriciaTrie`](crate::PatriciaTrie) and never changes afterwards, so it
/// can be shared among threads freely.
///
/// # Examples
///
/// ```
/// use loudstrie::{LoudsTrie, PatriciaTrie, Trie};
///
/// let src = PatriciaTrie::from_iter(["a", "ab", "abc", "b"]);
/// let trie = LoudsTrie::build(&src).unwrap();
///
/// assert_eq!(trie.len(), 4);
/// assert!(trie.contains("ab"));
/// assert!(!trie.contains("abcd"));
///
/// let prefixes: Vec<_> = trie.common_prefix_search("abc").map(|(w, _)| w).collect();
/// assert_eq!(prefixes, vec!["a", "ab", "abc"]);
///
/// let words: Vec<_> = trie.predictive_search("a").map(|(w, _)| w).collect();
/// assert_eq!(words, vec!["a", "ab", "abc"]);
///
/// assert_eq!(trie.term_id("b"), Some(1));
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CompactTrie<T> {
    tree: T,
    labels: Vec<char>,
    tails: TailArray,
    term: SuccinctBitVector,
    size: usize,
}

/// [`CompactTrie`] over the single-vector [`LoudsBvTree`].
pub type LoudsTrie = CompactTrie<LoudsBvTree>;

/// [`CompactTrie`] over the two-vector [`LoudsPpBvTree`].
///
/// # Examples
///
/// ```
/// use loudstrie::{LoudsPpTrie, PatriciaTrie};
///
/// let trie = LoudsPpTrie::build(&PatriciaTrie::from_iter(["a", "ab", "b"])).unwrap();
/// assert!(trie.contains("ab"));
/// assert_eq!(trie.term_id("b"), Some(1));
/// ```
pub type LoudsPpTrie = CompactTrie<LoudsPpBvTree>;

impl<T: BvTree> CompactTrie<T> {
    /// Builds the trie from `src`, storing tails with [`ConcatTailBuilder`].
    ///
    /// # Errors
    ///
    /// An error [`Error::Construction`] is returned if `src` is malformed.
    pub fn build<S>(src: &S) -> Result<Self>
    where
        S: SourceTrie + ?Sized,
    {
        // Room for the average tail plus its terminator.
        Self::build_with(src, ConcatTailBuilder::with_capacity(src.num_nodes() * 3))
    }

    /// Builds the trie from `src`, storing tails with `tails`.
    ///
    /// # Errors
    ///
    /// An error [`Error::Construction`] is returned if `src` is malformed.
    pub fn build_with<S, B>(src: &S, tails: B) -> Result<Self>
    where
        S: SourceTrie + ?Sized,
        B: TailBuilder,
    {
        Self::build_with_listener(src, tails, |_, _| {})
    }

    /// Builds the trie from `src`, storing tails with `tails` and reporting
    /// every id assignment to `listener`.
    ///
    /// `listener` is called once per node as `listener(src_node, node_id)`,
    /// in increasing order of `node_id`.
    ///
    /// # Errors
    ///
    /// An error [`Error::Construction`] is returned if
    ///
    ///  - a node is reached twice or lies out of `0..src.num_nodes()`,
    ///  - the root has a label or another node has none,
    ///  - a label contains [`TAIL_TERMINATOR`], or
    ///  - children are not in strictly ascending order of their first letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::{LoudsTrie, PatriciaTrie};
    /// use loudstrie::tails::SuffixTrieTailBuilder;
    ///
    /// let src = PatriciaTrie::from_iter(["run", "running", "sun", "sunning"]);
    /// let mut ids = vec![];
    /// let trie = LoudsTrie::build_with_listener(&src, SuffixTrieTailBuilder::new(), |s, id| {
    ///     ids.push((s, id));
    /// }).unwrap();
    ///
    /// assert_eq!(ids.len(), trie.num_nodes());
    /// assert_eq!(ids[0], (0, 0));
    /// ```
    pub fn build_with_listener<S, B, F>(src: &S, tails: B, mut listener: F) -> Result<Self>
    where
        S: SourceTrie + ?Sized,
        B: TailBuilder,
        F: FnMut(usize, usize),
    {
        let num_src = src.num_nodes();
        let mut tree = T::with_capacity(num_src);
        let mut labels = Vec::with_capacity(num_src);
        let mut tails = TailArrayBuilder::new(tails);
        let mut term = SuccinctBitVector::with_capacity(num_src);
        let mut visited = vec![false; num_src];

        let mut queue = VecDeque::new();
        queue.extend(src.root());
        while let Some(node) = queue.pop_front() {
            let node_id = labels.len();
            if num_src <= node {
                return Err(Error::construction(format!(
                    "node {node} is out of the {num_src} source nodes."
                )));
            }
            if std::mem::replace(&mut visited[node], true) {
                return Err(Error::construction(format!(
                    "node {node} is reachable twice."
                )));
            }
            listener(node, node_id);
            term.push_bit(src.is_terminal(node));

            let mut prev = None;
            for &child in src.children(node) {
                if num_src <= child {
                    return Err(Error::construction(format!(
                        "node {child} is out of the {num_src} source nodes."
                    )));
                }
                let Some(&first) = src.letters(child).first() else {
                    return Err(Error::construction(format!(
                        "node {child} has an empty label."
                    )));
                };
                if prev.map_or(false, |p| first <= p) {
                    return Err(Error::construction(format!(
                        "children of node {node} are not in ascending order at {first:?}."
                    )));
                }
                prev = Some(first);
                tree.append_child();
                queue.push_back(child);
            }
            tree.append_self();

            let letters = src.letters(node);
            if letters.contains(&TAIL_TERMINATOR) {
                return Err(Error::construction(format!(
                    "label of node {node} contains {TAIL_TERMINATOR:?}."
                )));
            }
            match letters.split_first() {
                None => {
                    labels.push(NO_LABEL);
                    tails.append_empty();
                }
                Some(_) if node_id == 0 => {
                    return Err(Error::construction("the root must not have a label."));
                }
                Some((&first, rest)) => {
                    labels.push(first);
                    if rest.is_empty() {
                        tails.append_empty();
                    } else {
                        tails.append(rest);
                    }
                }
            }
        }

        tree.trim_to_size();
        labels.shrink_to_fit();
        term.trim_to_size();
        let tails = tails.freeze();
        let size = term.num_ones();

        tracing::debug!(
            nodes = labels.len(),
            words = size,
            tail_chars = tails.tails().len(),
            topology_bits = tree.num_bits(),
            "compact trie built"
        );

        Ok(Self {
            tree,
            labels,
            tails,
            term,
            size,
        })
    }

    /// Returns the number of words stored.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Checks if no word is stored.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Checks if `text` is stored.
    pub fn contains(&self, text: &str) -> bool {
        self.node_id(text)
            .map_or(false, |id| self.term.access(id) == Some(true))
    }

    /// Returns the term id of `text`, or [`None`] if it is not stored.
    pub fn term_id(&self, text: &str) -> Option<usize> {
        self.term_id_of(self.node_id(text)?)
    }

    /// Returns the id of the node reached by consuming exactly `text`, or
    /// [`None`] if `text` leaves the trie or ends inside an edge label.
    ///
    /// The node need not be terminal.
    pub fn node_id(&self, text: &str) -> Option<usize> {
        let mut node_id = 0;
        let mut input = text.chars();
        let mut tail = TailIter::empty(self.tails.tails());
        while let Some(c) = input.next() {
            node_id = self.child(node_id, c)?;
            tail.set_node(&self.tails, node_id);
            for t in tail.by_ref() {
                if input.next() != Some(t) {
                    return None;
                }
            }
        }
        Some(node_id)
    }

    /// Enumerates the stored words that are prefixes of `query`, shortest first,
    /// with their term ids.
    ///
    /// The empty word is reported first when it is stored.
    pub fn common_prefix_search<'t, 'q>(&'t self, query: &'q str) -> CommonPrefixIter<'t, 'q, T> {
        CommonPrefixIter::new(self, query)
    }

    /// Enumerates the stored words starting with `prefix`, in lexicographic
    /// order of characters, with their term ids.
    pub fn predictive_search(&self, prefix: &str) -> PredictiveIter<'_, T> {
        let mut node_id = 0;
        let mut base = 0;
        let mut input = prefix.char_indices();
        let mut tail = TailIter::empty(self.tails.tails());
        'descent: while let Some((i, c)) = input.next() {
            let Some(child) = self.child(node_id, c) else {
                return PredictiveIter::empty(self);
            };
            node_id = child;
            base = i;
            tail.set_node(&self.tails, child);
            for t in tail.by_ref() {
                match input.next() {
                    Some((_, d)) if d == t => {}
                    Some(_) => return PredictiveIter::empty(self),
                    // The prefix ends inside the label, so the whole subtree matches.
                    None => break 'descent,
                }
            }
        }
        if self.num_nodes() == 0 {
            return PredictiveIter::empty(self);
        }
        let mut word = String::new();
        if node_id != 0 {
            word.push_str(&prefix[..base]);
            self.push_letters(node_id, &mut word);
        }
        PredictiveIter::new(self, node_id, word)
    }

    /// Returns the root node.
    pub const fn root(&self) -> LoudsNode<'_, T> {
        LoudsNode::new(self, 0)
    }

    /// Returns the node of `node_id`, or [`None`] if out of range.
    pub fn node(&self, node_id: usize) -> Option<LoudsNode<'_, T>> {
        (node_id < self.num_nodes()).then(|| LoudsNode::new(self, node_id))
    }

    /// Returns the child of `node_id` whose label starts with `c`.
    ///
    /// # Complexity
    ///
    /// - Logarithmic in the number of nodes plus either the number of
    ///   children or its logarithm, see [`BINARY_SEARCH_THRESHOLD`].
    pub fn child(&self, node_id: usize, c: char) -> Option<usize> {
        let range = self.tree.child_range(node_id);
        let start = range.start;
        let labels = &self.labels[range];
        if labels.len() <= BINARY_SEARCH_THRESHOLD {
            find_linear(labels, c)
        } else {
            find_binary(labels, c)
        }
        .map(|i| start + i)
    }

    /// Returns the term id of the node `node_id`, or [`None`] if no word ends there.
    #[inline(always)]
    pub fn term_id_of(&self, node_id: usize) -> Option<usize> {
        if self.term.access(node_id)? {
            self.term.rank1(node_id)
        } else {
            None
        }
    }

    /// Appends the full label of `node_id` to `buf`.
    pub(crate) fn push_letters(&self, node_id: usize, buf: &mut String) {
        if node_id == 0 {
            return;
        }
        buf.push(self.labels[node_id]);
        buf.extend(self.tails.node_iter(node_id));
    }

    /// Returns the topology.
    pub const fn tree(&self) -> &T {
        &self.tree
    }

    /// Returns the first letters of the node labels, indexed by node id.
    pub fn labels(&self) -> &[char] {
        &self.labels
    }

    /// Returns the label remainders.
    pub const fn tail_array(&self) -> &TailArray {
        &self.tails
    }

    /// Returns the bit vector marking the nodes where words end.
    pub const fn term(&self) -> &SuccinctBitVector {
        &self.term
    }
}

#[inline(always)]
fn find_linear(labels: &[char], c: char) -> Option<usize> {
    labels.iter().position(|&l| l == c)
}

#[inline(always)]
fn find_binary(labels: &[char], c: char) -> Option<usize> {
    labels.binary_search(&c).ok()
}

impl<T: BvTree> Trie for CompactTrie<T> {
    fn len(&self) -> usize {
        self.size
    }

    fn contains(&self, word: &str) -> bool {
        CompactTrie::contains(self, word)
    }

    /// Always fails with [`Error::UnsupportedOperation`].
    fn insert(&mut self, _word: &str) -> Result<bool> {
        Err(Error::UnsupportedOperation("CompactTrie is read-only.").into())
    }
}

impl<T: BvTree> Serializable for CompactTrie<T> {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = MAGIC.serialize_into(&mut writer)?;
        mem += VERSION.serialize_into(&mut writer)?;
        mem += T::KIND.serialize_into(&mut writer)?;
        mem += self.size.serialize_into(&mut writer)?;
        mem += self.num_nodes().serialize_into(&mut writer)?;
        mem += self.tree.serialize_into(&mut writer)?;
        mem += self.labels.serialize_into(&mut writer)?;
        mem += self.tails.serialize_into(&mut writer)?;
        mem += self.term.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let magic = u64::deserialize_from(&mut reader)?;
        if magic != MAGIC {
            return Err(Error::serialization("bad magic number."));
        }
        let version = u32::deserialize_from(&mut reader)?;
        if version != VERSION {
            return Err(Error::serialization(format!(
                "format version must be {VERSION}, but got {version}."
            )));
        }
        let kind = u32::deserialize_from(&mut reader)?;
        if kind != T::KIND {
            return Err(Error::serialization(format!(
                "topology kind must be {}, but got {kind}.",
                T::KIND
            )));
        }
        let size = usize::deserialize_from(&mut reader)?;
        let num_nodes = usize::deserialize_from(&mut reader)?;
        let tree = T::deserialize_from(&mut reader)?;
        let labels = Vec::<char>::deserialize_from(&mut reader)?;
        let tails = TailArray::deserialize_from(&mut reader)?;
        let term = SuccinctBitVector::deserialize_from(&mut reader)?;

        for (what, n) in [
            ("topology", tree.num_nodes()),
            ("labels", labels.len()),
            ("tails", tails.num_nodes()),
            ("terminal bits", term.len()),
        ] {
            if n != num_nodes {
                return Err(Error::serialization(format!(
                    "{what} must cover {num_nodes} nodes, but got {n}."
                )));
            }
        }
        if term.num_ones() != size {
            return Err(Error::serialization(format!(
                "{} words are marked, but the size is {size}.",
                term.num_ones()
            )));
        }

        tracing::trace!(nodes = num_nodes, words = size, "compact trie loaded");
        Ok(Self {
            tree,
            labels,
            tails,
            term,
            size,
        })
    }

    fn size_in_bytes(&self) -> usize {
        MAGIC.size_in_bytes()
            + VERSION.size_in_bytes()
            + T::KIND.size_in_bytes()
            + self.size.size_in_bytes()
            + self.num_nodes().size_in_bytes()
            + self.tree.size_in_bytes()
            + self.labels.size_in_bytes()
            + self.tails.size_in_bytes()
            + self.term.size_in_bytes()
    }
}
