//! Tails deduplicated through a trie of reversed suffixes.
use super::{TailBuilder, TAIL_TERMINATOR};

const ROOT: usize = 0;

/// Node of the reversed-suffix trie.
///
/// The path from the root spells a stored suffix backwards, and `offset` is a
/// buffer position where that suffix starts, immediately followed by a terminator.
#[derive(Debug, Clone)]
struct SuffixNode {
    /// Sorted by character.
    children: Vec<(char, usize)>,
    offset: Option<usize>,
}

impl SuffixNode {
    const fn new(offset: Option<usize>) -> Self {
        Self {
            children: Vec::new(),
            offset,
        }
    }

    fn child(&self, c: char) -> Result<usize, usize> {
        self.children
            .binary_search_by(|&(d, _)| d.cmp(&c))
            .map(|i| self.children[i].1)
    }
}

/// [`TailBuilder`] sharing storage among tails with common endings.
///
/// Every stored suffix is registered in a trie keyed on reversed characters.
/// A tail found in that trie is answered with an offset into the run that
/// already holds it; any other tail is appended and all of its suffixes are
/// registered. Construction costs one trie walk per character, and the trie
/// is dropped when the builder is consumed.
///
/// # Examples
///
/// ```
/// use loudstrie::tails::{SuffixTrieTailBuilder, TailBuilder};
///
/// let mut builder = SuffixTrieTailBuilder::new();
/// assert_eq!(builder.append(&['i', 'n', 'g']), 0);
/// assert_eq!(builder.append(&['n', 'g']), 1);
/// assert_eq!(builder.append(&['o', 'n', 'g']), 4);
/// assert_eq!(builder.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTrieTailBuilder {
    tails: Vec<char>,
    nodes: Vec<SuffixNode>,
}

impl Default for SuffixTrieTailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixTrieTailBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            tails: Vec::new(),
            nodes: vec![SuffixNode::new(None)],
        }
    }

    /// Returns the offset of an already stored run equal to `tail`.
    fn find(&self, tail: &[char]) -> Option<usize> {
        let mut node = ROOT;
        for &c in tail.iter().rev() {
            node = self.nodes[node].child(c).ok()?;
        }
        self.nodes[node].offset
    }

    fn register(&mut self, tail: &[char], offset: usize) {
        let mut node = ROOT;
        if self.nodes[ROOT].offset.is_none() {
            self.nodes[ROOT].offset = Some(offset + tail.len());
        }
        for (i, &c) in tail.iter().enumerate().rev() {
            node = match self.nodes[node].child(c) {
                Ok(child) => child,
                Err(pos) => {
                    let child = self.nodes.len();
                    self.nodes.push(SuffixNode::new(Some(offset + i)));
                    self.nodes[node].children.insert(pos, (c, child));
                    child
                }
            };
        }
    }
}

impl TailBuilder for SuffixTrieTailBuilder {
    fn append(&mut self, tail: &[char]) -> usize {
        if let Some(offset) = self.find(tail) {
            return offset;
        }
        let offset = self.tails.len();
        self.tails.extend_from_slice(tail);
        self.tails.push(TAIL_TERMINATOR);
        self.register(tail, offset);
        offset
    }

    fn len(&self) -> usize {
        self.tails.len()
    }

    fn into_tails(self) -> Vec<char> {
        self.tails
    }
}
