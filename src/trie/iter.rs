//! Iterators of search results over [`CompactTrie`].
use std::str::CharIndices;

use super::CompactTrie;
use crate::louds::{BvTree, LoudsBvTree};
use crate::tails::TailIter;

/// Iterator created by [`CompactTrie::common_prefix_search()`].
///
/// Yields `(word, term_id)` where `word` borrows from the query.
#[derive(Debug, Clone)]
pub struct CommonPrefixIter<'t, 'q, T = LoudsBvTree> {
    trie: &'t CompactTrie<T>,
    query: &'q str,
    input: CharIndices<'q>,
    tail: TailIter<'t>,
    node_id: usize,
    at_root: bool,
    done: bool,
}

impl<'t, 'q, T: BvTree> CommonPrefixIter<'t, 'q, T> {
    pub(crate) fn new(trie: &'t CompactTrie<T>, query: &'q str) -> Self {
        Self {
            trie,
            query,
            input: query.char_indices(),
            tail: TailIter::empty(trie.tail_array().tails()),
            node_id: 0,
            at_root: true,
            done: false,
        }
    }

    fn consumed(&self) -> usize {
        self.query.len() - self.input.as_str().len()
    }
}

impl<'q, T: BvTree> Iterator for CommonPrefixIter<'_, 'q, T> {
    type Item = (&'q str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if std::mem::replace(&mut self.at_root, false) {
            if let Some(term_id) = self.trie.term_id_of(0) {
                return Some(("", term_id));
            }
        }
        while !self.done {
            let Some((_, c)) = self.input.next() else {
                break;
            };
            let Some(child) = self.trie.child(self.node_id, c) else {
                break;
            };
            self.tail.set_node(self.trie.tail_array(), child);
            for t in self.tail.by_ref() {
                match self.input.next() {
                    Some((_, d)) if d == t => {}
                    _ => {
                        self.done = true;
                        return None;
                    }
                }
            }
            self.node_id = child;
            if let Some(term_id) = self.trie.term_id_of(child) {
                let query = self.query;
                return Some((&query[..self.consumed()], term_id));
            }
        }
        self.done = true;
        None
    }
}

/// Iterator created by [`CompactTrie::predictive_search()`].
///
/// Words come out in lexicographic order of characters, because subtrees are
/// visited depth first with children taken in ascending order of their labels.
#[derive(Debug, Clone)]
pub struct PredictiveIter<'t, T = LoudsBvTree> {
    trie: &'t CompactTrie<T>,
    // Nodes pending a visit with the word spelled up to them.
    stack: Vec<(usize, String)>,
}

impl<'t, T> PredictiveIter<'t, T> {
    pub(crate) fn new(trie: &'t CompactTrie<T>, node_id: usize, word: String) -> Self {
        Self {
            trie,
            stack: vec![(node_id, word)],
        }
    }

    pub(crate) const fn empty(trie: &'t CompactTrie<T>) -> Self {
        Self {
            trie,
            stack: Vec::new(),
        }
    }
}

impl<T: BvTree> Iterator for PredictiveIter<'_, T> {
    type Item = (String, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node_id, word)) = self.stack.pop() {
            for child in self.trie.tree().child_range(node_id).rev() {
                let mut next = word.clone();
                self.trie.push_letters(child, &mut next);
                self.stack.push((child, next));
            }
            if let Some(term_id) = self.trie.term_id_of(node_id) {
                return Some((word, term_id));
            }
        }
        None
    }
}
