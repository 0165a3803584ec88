//! Cursor for walking a [`CompactTrie`] node by node.
use super::CompactTrie;
use crate::louds::{BvTree, LoudsBvTree};

/// Node of a [`CompactTrie`], borrowed from it.
///
/// # Examples
///
/// ```
/// use loudstrie::{LoudsTrie, PatriciaTrie};
///
/// let trie = LoudsTrie::build(&PatriciaTrie::from_iter(["tea", "ten", "to"])).unwrap();
///
/// let t = trie.root().child('t').unwrap();
/// assert_eq!(t.letters(), "t");
/// assert!(!t.is_terminal());
///
/// let labels: Vec<_> = t.children().map(|n| n.letters()).collect();
/// assert_eq!(labels, vec!["e", "o"]);
///
/// let to = t.child('o').unwrap();
/// assert_eq!(to.term_id(), trie.term_id("to"));
/// ```
#[derive(Debug)]
pub struct LoudsNode<'t, T = LoudsBvTree> {
    trie: &'t CompactTrie<T>,
    id: usize,
}

impl<T> Clone for LoudsNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for LoudsNode<'_, T> {}

impl<'t, T> LoudsNode<'t, T> {
    pub(crate) const fn new(trie: &'t CompactTrie<T>, id: usize) -> Self {
        Self { trie, id }
    }

    /// Returns the node id.
    pub const fn id(&self) -> usize {
        self.id
    }
}

impl<'t, T: BvTree + 't> LoudsNode<'t, T> {
    /// Returns the label of the edge into this node, empty for the root.
    pub fn letters(&self) -> String {
        let mut buf = String::new();
        self.trie.push_letters(self.id, &mut buf);
        buf
    }

    /// Checks if a word ends here.
    pub fn is_terminal(&self) -> bool {
        self.term_id().is_some()
    }

    /// Returns the term id of the word ending here.
    pub fn term_id(&self) -> Option<usize> {
        self.trie.term_id_of(self.id)
    }

    /// Returns the child whose label starts with `c`.
    pub fn child(&self, c: char) -> Option<Self> {
        self.trie
            .child(self.id, c)
            .map(|id| Self::new(self.trie, id))
    }

    /// Returns the children in ascending order of their labels.
    pub fn children(&self) -> impl Iterator<Item = LoudsNode<'t, T>> + 't {
        let trie = self.trie;
        trie.tree()
            .child_range(self.id)
            .map(move |id| LoudsNode::new(trie, id))
    }
}

impl<T> PartialEq for LoudsNode<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.trie, other.trie) && self.id == other.id
    }
}

impl<T> Eq for LoudsNode<'_, T> {}
