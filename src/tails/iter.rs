//! Cursor over stored tails.
use super::{TailArray, TAIL_TERMINATOR};

/// Iterator yielding the characters of one tail up to its terminator.
///
/// The cursor can be moved to another tail at any time with
/// [`Self::set_offset()`] or [`Self::set_node()`], so a single iterator
/// serves a whole trie descent.
#[derive(Debug, Clone)]
pub struct TailIter<'a> {
    tails: &'a [char],
    pos: usize,
}

impl<'a> TailIter<'a> {
    /// Creates an iterator positioned at `offset` of `tails`.
    pub const fn new(tails: &'a [char], offset: usize) -> Self {
        Self { tails, pos: offset }
    }

    /// Creates an exhausted iterator over `tails`.
    pub const fn empty(tails: &'a [char]) -> Self {
        Self {
            tails,
            pos: tails.len(),
        }
    }

    /// Moves the cursor to the tail starting at `offset`.
    #[inline(always)]
    pub fn set_offset(&mut self, offset: usize) {
        self.pos = offset;
    }

    /// Moves the cursor to the tail of `node_id` in `tails`, which must own the
    /// buffer this iterator reads.
    #[inline(always)]
    pub fn set_node(&mut self, tails: &TailArray, node_id: usize) {
        self.pos = tails.offset(node_id).unwrap_or(self.tails.len());
    }

    /// Checks if another character follows.
    #[inline(always)]
    pub fn has_next(&self) -> bool {
        self.tails
            .get(self.pos)
            .map_or(false, |&c| c != TAIL_TERMINATOR)
    }
}

impl Iterator for TailIter<'_> {
    type Item = char;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let &c = self.tails.get(self.pos)?;
        if c == TAIL_TERMINATOR {
            return None;
        }
        self.pos += 1;
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_terminator() {
        let tails = ['a', 'b', '\0', 'c', '\0'];
        let mut it = TailIter::new(&tails, 0);
        assert!(it.has_next());
        assert_eq!(it.next(), Some('a'));
        assert_eq!(it.next(), Some('b'));
        assert!(!it.has_next());
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        it.set_offset(3);
        assert_eq!(it.collect::<String>(), "c");
    }

    #[test]
    fn test_empty() {
        let tails = ['a', '\0'];
        let mut it = TailIter::empty(&tails);
        assert!(!it.has_next());
        assert_eq!(it.next(), None);
    }
}
