//! Mutable Patricia trie used as the input of [`LoudsTrie`](crate::LoudsTrie).
use anyhow::Result;

use crate::trie::SourceTrie;
use crate::Trie;

/// Node of [`PatriciaTrie`].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PatriciaNode {
    letters: Vec<char>,
    /// Ids of children, sorted by their first letter.
    children: Vec<usize>,
    terminal: bool,
}

impl PatriciaNode {
    fn new(letters: Vec<char>, terminal: bool) -> Self {
        Self {
            letters,
            children: Vec::new(),
            terminal,
        }
    }

    /// Returns the edge label leading to this node.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Returns the ids of the children in ascending order of first letter.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Checks if a word ends at this node.
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Growable Patricia trie whose nodes live in an arena indexed by id.
///
/// Edges carry whole character runs and siblings are kept sorted by the first
/// character of their labels. The root is node 0 and has an empty label.
///
/// # Examples
///
/// ```
/// use loudstrie::{PatriciaTrie, Trie};
///
/// let mut trie = PatriciaTrie::new();
/// trie.insert("hello").unwrap();
/// trie.insert("help").unwrap();
///
/// assert_eq!(trie.len(), 2);
/// assert!(trie.contains("help"));
/// assert!(!trie.contains("hel"));
/// // The root, "hel", "lo" and "p".
/// assert_eq!(trie.num_nodes(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatriciaTrie {
    nodes: Vec<PatriciaNode>,
    len: usize,
}

impl Default for PatriciaTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatriciaTrie {
    const ROOT: usize = 0;

    /// Creates a new trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![PatriciaNode::default()],
            len: 0,
        }
    }

    /// Returns the node of `id`.
    ///
    /// # Panics
    ///
    /// It will panic if `id` is out of range.
    pub fn node(&self, id: usize) -> &PatriciaNode {
        &self.nodes[id]
    }

    /// Returns the number of nodes, root included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Adds `word`, returning `true` if it was not stored yet.
    pub fn insert_chars(&mut self, word: &[char]) -> bool {
        let mut node = Self::ROOT;
        let mut rest = word;
        loop {
            let Some(&head) = rest.first() else {
                return self.mark_terminal(node);
            };
            let child = match self.find_child(node, head) {
                Ok(child) => child,
                Err(pos) => {
                    let leaf = self.push_node(PatriciaNode::new(rest.to_vec(), true));
                    self.nodes[node].children.insert(pos, leaf);
                    self.len += 1;
                    return true;
                }
            };
            let common = self.nodes[child]
                .letters
                .iter()
                .zip(rest)
                .take_while(|(a, b)| a == b)
                .count();
            if common < self.nodes[child].letters.len() {
                self.split(child, common);
            }
            node = child;
            rest = &rest[common..];
        }
    }

    /// Checks if `word` is stored.
    pub fn contains_chars(&self, word: &[char]) -> bool {
        let mut node = Self::ROOT;
        let mut rest = word;
        while let Some(&head) = rest.first() {
            let Ok(child) = self.find_child(node, head) else {
                return false;
            };
            let Some(tail) = rest.strip_prefix(self.nodes[child].letters.as_slice()) else {
                return false;
            };
            node = child;
            rest = tail;
        }
        self.nodes[node].terminal
    }

    fn mark_terminal(&mut self, node: usize) -> bool {
        let added = !self.nodes[node].terminal;
        self.nodes[node].terminal = true;
        if added {
            self.len += 1;
        }
        added
    }

    /// Cuts the label of `node` after `at` characters, moving the rest into a new only child.
    fn split(&mut self, node: usize, at: usize) {
        let letters = self.nodes[node].letters.split_off(at);
        let children = std::mem::take(&mut self.nodes[node].children);
        let terminal = std::mem::replace(&mut self.nodes[node].terminal, false);
        let lower = self.push_node(PatriciaNode {
            letters,
            children,
            terminal,
        });
        self.nodes[node].children.push(lower);
    }

    fn push_node(&mut self, node: PatriciaNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Looks up the child of `node` whose label starts with `c`, or the position to insert one.
    fn find_child(&self, node: usize, c: char) -> Result<usize, usize> {
        let children = &self.nodes[node].children;
        children
            .binary_search_by(|&id| self.nodes[id].letters[0].cmp(&c))
            .map(|i| children[i])
    }
}

impl Trie for PatriciaTrie {
    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, word: &str) -> bool {
        self.contains_chars(&word.chars().collect::<Vec<_>>())
    }

    fn insert(&mut self, word: &str) -> Result<bool> {
        Ok(self.insert_chars(&word.chars().collect::<Vec<_>>()))
    }
}

impl SourceTrie for PatriciaTrie {
    fn root(&self) -> Option<usize> {
        Some(Self::ROOT)
    }

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn letters(&self, node: usize) -> &[char] {
        &self.nodes[node].letters
    }

    fn is_terminal(&self, node: usize) -> bool {
        self.nodes[node].terminal
    }

    fn children(&self, node: usize) -> &[usize] {
        &self.nodes[node].children
    }
}

impl<S> FromIterator<S> for PatriciaTrie
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut trie = Self::new();
        for w in words {
            trie.insert_chars(&w.as_ref().chars().collect::<Vec<_>>());
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels_of_children(trie: &PatriciaTrie, node: usize) -> Vec<String> {
        trie.node(node)
            .children()
            .iter()
            .map(|&c| trie.node(c).letters().iter().collect())
            .collect()
    }

    #[test]
    fn test_split_and_sort() {
        let trie = PatriciaTrie::from_iter(["romane", "romanus", "romulus", "rubens", "ruber"]);
        assert_eq!(trie.len(), 5);
        assert_eq!(labels_of_children(&trie, 0), vec!["r"]);
        let r = trie.node(0).children()[0];
        assert_eq!(labels_of_children(&trie, r), vec!["om", "ube"]);
        let ube = trie.node(r).children()[1];
        assert_eq!(labels_of_children(&trie, ube), vec!["ns", "r"]);
        for w in ["romane", "romanus", "romulus", "rubens", "ruber"] {
            assert!(trie.contains(w), "{w}");
        }
        for w in ["r", "rom", "roman", "rube", "rubicon", ""] {
            assert!(!trie.contains(w), "{w}");
        }
    }

    #[test]
    fn test_duplicate_insert() {
        let mut trie = PatriciaTrie::new();
        assert!(trie.insert("abc").unwrap());
        assert!(!trie.insert("abc").unwrap());
        assert!(trie.insert("ab").unwrap());
        assert!(!trie.insert("ab").unwrap());
        assert_eq!(trie.len(), 2);
        assert!(trie.contains("ab"));
        assert!(trie.contains("abc"));
    }

    #[test]
    fn test_empty_word() {
        let mut trie = PatriciaTrie::new();
        assert!(!trie.contains(""));
        assert!(trie.insert("").unwrap());
        assert!(trie.contains(""));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_children_sorted() {
        let trie = PatriciaTrie::from_iter(["c", "a", "d", "b", "ab", "aa"]);
        assert_eq!(labels_of_children(&trie, 0), vec!["a", "b", "c", "d"]);
    }
}
