//! Tails written one after another.
use super::{TailBuilder, TAIL_TERMINATOR};

/// [`TailBuilder`] appending every tail, terminator included, at the end of the buffer.
///
/// # Examples
///
/// ```
/// use loudstrie::tails::{ConcatTailBuilder, TailBuilder};
///
/// let mut builder = ConcatTailBuilder::new();
/// assert_eq!(builder.append(&['a', 'b']), 0);
/// assert_eq!(builder.append(&['b']), 3);
/// assert_eq!(builder.into_tails(), vec!['a', 'b', '\0', 'b', '\0']);
/// ```
#[derive(Default, Debug, Clone)]
pub struct ConcatTailBuilder {
    tails: Vec<char>,
}

impl ConcatTailBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new builder reserving `capa` characters.
    pub fn with_capacity(capa: usize) -> Self {
        Self {
            tails: Vec::with_capacity(capa),
        }
    }
}

impl TailBuilder for ConcatTailBuilder {
    fn append(&mut self, tail: &[char]) -> usize {
        let offset = self.tails.len();
        self.tails.extend_from_slice(tail);
        self.tails.push(TAIL_TERMINATOR);
        offset
    }

    fn len(&self) -> usize {
        self.tails.len()
    }

    fn into_tails(self) -> Vec<char> {
        self.tails
    }
}
