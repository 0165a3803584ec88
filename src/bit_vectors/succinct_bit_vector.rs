//! Append-only bit vector with a per-word rank cache.
#![cfg(target_pointer_width = "64")]

use std::io::{Read, Write};

use anyhow::Result;

use crate::bit_vectors::prelude::*;
use crate::broadword;
use crate::utils::{self, MatrixView};
use crate::{Error, Serializable};

/// The number of bits in a machine word, which is also the width of a cache block.
pub const WORD_LEN: usize = 64;

/// Append-only bit vector supporting constant-time rank and logarithmic-time select.
///
/// Bits are packed into 64-bit words, where the `i`-th bit is the `i % 64`-th
/// lowest bit of the `i / 64`-th word. Each word is a cache block: the cache
/// keeps, for every word, the number of ones up to and including it.
/// A rank query is therefore one cache lookup plus one popcount, and a select
/// query is a binary search over the cache plus an in-word select.
///
/// The only mutators are [`Self::push_bit()`], [`Self::append1()`] and
/// [`Self::append0()`], so the cache is updated in lockstep with the words and
/// is exact at any point.
///
/// # Examples
///
/// ```
/// use loudstrie::bit_vectors::{SuccinctBitVector, prelude::*};
///
/// let mut bv = SuccinctBitVector::new();
/// bv.append1();
/// bv.append0();
/// bv.append1();
///
/// assert_eq!(bv.len(), 3);
/// assert_eq!(bv.rank1(3), Some(2));
/// assert_eq!(bv.select0(0), Some(1));
/// assert_eq!(bv.next0(2), None);
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
pub struct SuccinctBitVector {
    words: Vec<u64>,
    cache: Vec<usize>,
    len: usize,
}

impl SuccinctBitVector {
    /// Creates a new empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new vector that at least `capa` bits are reserved.
    ///
    /// # Arguments
    ///
    ///  - `capa`: Number of bits reserved at least.
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::SuccinctBitVector;
    ///
    /// let bv = SuccinctBitVector::with_capacity(40);
    /// assert_eq!(bv.len(), 0);
    /// assert_eq!(bv.capacity(), 64);
    /// ```
    pub fn with_capacity(capa: usize) -> Self {
        let num_words = utils::ceiled_divide(capa, WORD_LEN);
        Self {
            words: Vec::with_capacity(num_words),
            cache: Vec::with_capacity(num_words),
            len: 0,
        }
    }

    /// Creates a new vector from input bit stream `bits`.
    ///
    /// # Arguments
    ///
    ///  - `bits`: Bit stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::{SuccinctBitVector, Access};
    ///
    /// let bv = SuccinctBitVector::from_bits([false, true, false]);
    /// assert_eq!(bv.len(), 3);
    /// assert_eq!(bv.access(1), Some(true));
    /// ```
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut this = Self::new();
        this.extend(bits);
        this
    }

    /// Pushes `bit` at the end.
    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        let pos_in_word = self.len % WORD_LEN;
        if pos_in_word == 0 {
            let prev = self.cache.last().copied().unwrap_or(0);
            self.words.push(bit as u64);
            self.cache.push(prev + bit as usize);
        } else if bit {
            // Both vectors are non-empty once len is not a multiple of WORD_LEN.
            if let (Some(cur_word), Some(cur_rank)) = (self.words.last_mut(), self.cache.last_mut())
            {
                *cur_word |= 1 << pos_in_word;
                *cur_rank += 1;
            }
        }
        self.len += 1;
    }

    /// Pushes a set bit at the end.
    #[inline(always)]
    pub fn append1(&mut self) {
        self.push_bit(true);
    }

    /// Pushes an unset bit at the end.
    #[inline(always)]
    pub fn append0(&mut self) {
        self.push_bit(false);
    }

    /// Returns the smallest position `succ` such that `succ >= pos` and the `succ`-th bit is unset, or
    /// [`None`] if not found or `self.len() <= pos`.
    ///
    /// # Arguments
    ///
    /// - `pos`: Bit position.
    ///
    /// # Complexity
    ///
    /// - Linear in the distance to the answer
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::SuccinctBitVector;
    ///
    /// let bv = SuccinctBitVector::from_bits([false, true, true, false]);
    /// assert_eq!(bv.next0(0), Some(0));
    /// assert_eq!(bv.next0(1), Some(3));
    /// assert_eq!(bv.next0(4), None);
    /// ```
    pub fn next0(&self, pos: usize) -> Option<usize> {
        if self.len() <= pos {
            return None;
        }
        let mut block = pos / WORD_LEN;
        let shift = pos % WORD_LEN;
        let mut word = (!self.words[block] >> shift) << shift;
        loop {
            if let Some(ret) = broadword::lsb(word) {
                return Some(block * WORD_LEN + ret).filter(|&i| i < self.len());
            }
            block += 1;
            if block == self.words.len() {
                return None;
            }
            word = !self.words[block];
        }
    }

    /// Creates an iterator for enumerating bits.
    pub const fn iter(&self) -> Iter {
        Iter::new(self)
    }

    /// Returns the number of bits stored.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the vector is empty.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the slice of raw words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Returns the total number of bits it can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.words.capacity() * WORD_LEN
    }

    /// Gets the number of words.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Shrinks the backing words and the cache to the minimum needed for [`Self::len()`] bits.
    pub fn trim_to_size(&mut self) {
        self.words.shrink_to_fit();
        self.cache.shrink_to_fit();
    }

    /// Number of ones in words `0..=block`.
    #[inline(always)]
    fn block_rank1(&self, block: usize) -> usize {
        self.cache[block]
    }

    /// Number of zeros in words `0..=block`, not counting padding beyond [`Self::len()`].
    #[inline(always)]
    fn block_rank0(&self, block: usize) -> usize {
        ((block + 1) * WORD_LEN).min(self.len) - self.cache[block]
    }
}

impl NumBits for SuccinctBitVector {
    fn num_bits(&self) -> usize {
        self.len()
    }

    fn num_ones(&self) -> usize {
        self.cache.last().copied().unwrap_or(0)
    }
}

impl Access for SuccinctBitVector {
    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::{SuccinctBitVector, Access};
    ///
    /// let bv = SuccinctBitVector::from_bits([true, false, false]);
    /// assert_eq!(bv.access(0), Some(true));
    /// assert_eq!(bv.access(1), Some(false));
    /// assert_eq!(bv.access(3), None);
    /// ```
    fn access(&self, pos: usize) -> Option<bool> {
        if pos < self.len {
            let (block, shift) = (pos / WORD_LEN, pos % WORD_LEN);
            Some((self.words[block] >> shift) & 1 == 1)
        } else {
            None
        }
    }
}

impl Rank for SuccinctBitVector {
    /// Returns the number of ones from the 0-th bit to the `pos-1`-th bit, or
    /// [`None`] if `self.len() < pos`.
    ///
    /// # Complexity
    ///
    /// - Constant
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::{SuccinctBitVector, Rank};
    ///
    /// let bv = SuccinctBitVector::from_bits([true, false, false, true]);
    /// assert_eq!(bv.rank1(1), Some(1));
    /// assert_eq!(bv.rank1(4), Some(2));
    /// assert_eq!(bv.rank1(5), None);
    /// ```
    fn rank1(&self, pos: usize) -> Option<usize> {
        if self.len() < pos {
            return None;
        }
        let (wpos, left) = (pos / WORD_LEN, pos % WORD_LEN);
        let mut r = if wpos == 0 {
            0
        } else {
            self.block_rank1(wpos - 1)
        };
        if left != 0 {
            r += broadword::popcount(self.words[wpos] << (WORD_LEN - left));
        }
        Some(r)
    }

    /// Returns the number of zeros from the 0-th bit to the `pos-1`-th bit, or
    /// [`None`] if `self.len() < pos`.
    ///
    /// # Complexity
    ///
    /// - Constant
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::{SuccinctBitVector, Rank};
    ///
    /// let bv = SuccinctBitVector::from_bits([true, false, false, true]);
    /// assert_eq!(bv.rank0(1), Some(0));
    /// assert_eq!(bv.rank0(3), Some(2));
    /// assert_eq!(bv.rank0(5), None);
    /// ```
    fn rank0(&self, pos: usize) -> Option<usize> {
        Some(pos - self.rank1(pos)?)
    }
}

impl Select for SuccinctBitVector {
    /// Searches the position of the `k`-th bit set, or
    /// [`None`] if `self.num_ones() <= k`.
    ///
    /// # Complexity
    ///
    /// - Logarithmic
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::{SuccinctBitVector, Select};
    ///
    /// let bv = SuccinctBitVector::from_bits([true, false, false, true]);
    /// assert_eq!(bv.select1(0), Some(0));
    /// assert_eq!(bv.select1(1), Some(3));
    /// assert_eq!(bv.select1(2), None);
    /// ```
    fn select1(&self, k: usize) -> Option<usize> {
        if self.num_ones() <= k {
            return None;
        }
        let block = self.cache.partition_point(|&r| r <= k);
        let cur_rank = if block == 0 {
            0
        } else {
            self.block_rank1(block - 1)
        };
        let sel = broadword::select_in_word(self.words[block], k - cur_rank)?;
        Some(block * WORD_LEN + sel)
    }

    /// Searches the position of the `k`-th bit unset, or
    /// [`None`] if `self.num_zeros() <= k`.
    ///
    /// # Complexity
    ///
    /// - Logarithmic
    ///
    /// # Examples
    ///
    /// ```
    /// use loudstrie::bit_vectors::{SuccinctBitVector, Select};
    ///
    /// let bv = SuccinctBitVector::from_bits([true, false, false, true]);
    /// assert_eq!(bv.select0(0), Some(1));
    /// assert_eq!(bv.select0(1), Some(2));
    /// assert_eq!(bv.select0(2), None);
    /// ```
    fn select0(&self, k: usize) -> Option<usize> {
        if self.num_zeros() <= k {
            return None;
        }
        let (mut a, mut b) = (0, self.num_words());
        while a < b {
            let mid = a + (b - a) / 2;
            if self.block_rank0(mid) <= k {
                a = mid + 1;
            } else {
                b = mid;
            }
        }
        let block = a;
        let cur_rank = if block == 0 {
            0
        } else {
            self.block_rank0(block - 1)
        };
        let valid = broadword::low_mask(self.len - block * WORD_LEN);
        let sel = broadword::select_in_word(!self.words[block] & valid, k - cur_rank)?;
        Some(block * WORD_LEN + sel)
    }
}

/// Iterator for enumerating bits, created by [`SuccinctBitVector::iter()`].
pub struct Iter<'a> {
    bv: &'a SuccinctBitVector,
    pos: usize,
}

impl<'a> Iter<'a> {
    /// Creates a new iterator.
    pub const fn new(bv: &'a SuccinctBitVector) -> Self {
        Self { bv, pos: 0 }
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.bv.access(self.pos)?;
        self.pos += 1;
        Some(x)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.bv.len() - self.pos;
        (rest, Some(rest))
    }
}

impl std::iter::Extend<bool> for SuccinctBitVector {
    fn extend<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = bool>,
    {
        bits.into_iter().for_each(|b| self.push_bit(b));
    }
}

impl std::fmt::Debug for SuccinctBitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: Vec<u8> = self.iter().map(|b| b as u8).collect();
        f.debug_struct("SuccinctBitVector")
            .field("bits", &MatrixView::new(&bits, 16))
            .field("len", &self.len)
            .field("num_ones", &self.num_ones())
            .finish()
    }
}

impl Serializable for SuccinctBitVector {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = self.len.serialize_into(&mut writer)?;
        mem += self.words.serialize_into(&mut writer)?;
        mem += self.cache.serialize_into(&mut writer)?;
        Ok(mem)
    }

    /// Reads the words and the cache verbatim, rejecting a cache that does not
    /// agree with the words.
    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let len = usize::deserialize_from(&mut reader)?;
        let words = Vec::<u64>::deserialize_from(&mut reader)?;
        let cache = Vec::<usize>::deserialize_from(&mut reader)?;
        let num_words = utils::ceiled_divide(len, WORD_LEN);
        if words.len() != num_words {
            return Err(Error::serialization(format!(
                "{len} bits need {num_words} words, but got {}.",
                words.len()
            )));
        }
        if cache.len() != words.len() {
            return Err(Error::serialization(format!(
                "rank cache must have {} entries, but got {}.",
                words.len(),
                cache.len()
            )));
        }
        let mut rank = 0;
        for (i, (&w, &r)) in words.iter().zip(cache.iter()).enumerate() {
            rank += broadword::popcount(w);
            if rank != r {
                return Err(Error::serialization(format!(
                    "rank cache entry {i} must be {rank}, but got {r}."
                )));
            }
        }
        let shift = len % WORD_LEN;
        if shift != 0 && words.last().map_or(false, |&w| w >> shift != 0) {
            return Err(Error::serialization("bits set beyond the length."));
        }
        Ok(Self { words, cache, len })
    }

    fn size_in_bytes(&self) -> usize {
        self.len.size_in_bytes() + self.words.size_in_bytes() + self.cache.size_in_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn gen_random_bits(len: usize, seed: u64) -> Vec<bool> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen::<bool>()).collect()
    }

    fn test_rank_select1(bits: &[bool], bv: &SuccinctBitVector) {
        let mut cur_rank = 0;
        for i in 0..bits.len() {
            assert_eq!(bv.rank1(i), Some(cur_rank));
            if bits[i] {
                assert_eq!(bv.select1(cur_rank), Some(i));
                cur_rank += 1;
            }
        }
        assert_eq!(bv.rank1(bits.len()), Some(cur_rank));
        assert_eq!(cur_rank, bv.num_ones());
        assert_eq!(bv.select1(cur_rank), None);
    }

    fn test_rank_select0(bits: &[bool], bv: &SuccinctBitVector) {
        let mut cur_rank = 0;
        for i in 0..bits.len() {
            assert_eq!(bv.rank0(i), Some(cur_rank));
            if !bits[i] {
                assert_eq!(bv.select0(cur_rank), Some(i));
                assert_eq!(bv.rank0(i + 1), Some(cur_rank + 1));
                cur_rank += 1;
            }
        }
        assert_eq!(cur_rank, bv.num_zeros());
        assert_eq!(bv.select0(cur_rank), None);
    }

    fn test_next0(bits: &[bool], bv: &SuccinctBitVector) {
        let mut next = None;
        for i in (0..bits.len()).rev() {
            if !bits[i] {
                next = Some(i);
            }
            assert_eq!(bv.next0(i), next);
        }
    }

    #[test]
    fn test_random_bits() {
        for seed in 0..20 {
            let bits = gen_random_bits(1000 + seed as usize * 7, seed);
            let bv = SuccinctBitVector::from_bits(bits.iter().cloned());
            test_rank_select1(&bits, &bv);
            test_rank_select0(&bits, &bv);
            test_next0(&bits, &bv);
        }
    }

    #[test]
    fn test_rank_partition() {
        let bits = gen_random_bits(777, 3);
        let bv = SuccinctBitVector::from_bits(bits);
        for pos in 0..=bv.len() {
            assert_eq!(bv.rank0(pos).unwrap() + bv.rank1(pos).unwrap(), pos);
        }
    }

    #[test]
    fn test_all_zeros() {
        let bv = SuccinctBitVector::from_bits([false; 130]);
        assert_eq!(bv.rank1(130), Some(0));
        assert_eq!(bv.select1(0), None);
        assert_eq!(bv.select0(129), Some(129));
        assert_eq!(bv.select0(130), None);
        assert_eq!(bv.next0(64), Some(64));
    }

    #[test]
    fn test_all_ones() {
        let bv = SuccinctBitVector::from_bits([true; 130]);
        assert_eq!(bv.rank0(130), Some(0));
        assert_eq!(bv.select0(0), None);
        assert_eq!(bv.select1(128), Some(128));
        assert_eq!(bv.next0(0), None);
    }

    #[test]
    fn test_append_word_boundary() {
        let mut bv = SuccinctBitVector::new();
        for _ in 0..9 {
            bv.append1();
        }
        assert_eq!(bv.rank1(8), Some(8));
        assert_eq!(bv.rank1(9), Some(9));

        let mut bv = SuccinctBitVector::new();
        for _ in 0..64 {
            bv.append1();
        }
        bv.append0();
        bv.append1();
        assert_eq!(bv.num_words(), 2);
        assert_eq!(bv.rank1(64), Some(64));
        assert_eq!(bv.rank1(66), Some(65));
        assert_eq!(bv.select0(0), Some(64));
        assert_eq!(bv.select1(64), Some(65));
    }

    #[test]
    fn test_sparse_positions() {
        let mut bits = vec![false; 68];
        for &i in &[11, 22, 28, 34, 67] {
            bits[i] = true;
        }
        let bv = SuccinctBitVector::from_bits(bits);
        assert_eq!(bv.rank1(12), Some(1));
        assert_eq!(bv.rank1(23), Some(2));
        assert_eq!(bv.rank1(29), Some(3));
        assert_eq!(bv.rank1(35), Some(4));
        assert_eq!(bv.rank1(68), Some(5));
    }

    #[test]
    fn test_empty() {
        let bv = SuccinctBitVector::new();
        assert_eq!(bv.rank1(0), Some(0));
        assert_eq!(bv.rank1(1), None);
        assert_eq!(bv.select0(0), None);
        assert_eq!(bv.next0(0), None);
        assert_eq!(bv.num_ones(), 0);
    }

    #[test]
    fn test_trim_to_size() {
        let mut bv = SuccinctBitVector::with_capacity(1 << 12);
        bv.extend(gen_random_bits(100, 5));
        let before = bv.clone();
        bv.trim_to_size();
        assert_eq!(bv, before);
        assert!(bv.capacity() < 1 << 12);
    }

    #[test]
    fn test_serialize() {
        let mut bytes = vec![];
        let bv = SuccinctBitVector::from_bits(gen_random_bits(1000, 42));
        let size = bv.serialize_into(&mut bytes).unwrap();
        let other = SuccinctBitVector::deserialize_from(&bytes[..]).unwrap();
        assert_eq!(bv, other);
        assert_eq!(size, bytes.len());
        assert_eq!(size, bv.size_in_bytes());
    }

    #[test]
    fn test_deserialize_corrupt_cache() {
        let bv = SuccinctBitVector::from_bits([true, false, true]);
        let mut bytes = vec![];
        bv.len.serialize_into(&mut bytes).unwrap();
        bv.words.serialize_into(&mut bytes).unwrap();
        vec![3usize].serialize_into(&mut bytes).unwrap();
        let e = SuccinctBitVector::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::Serialization(
                "rank cache entry 0 must be 2, but got 3.".to_string()
            ))
        );
    }

    #[test]
    fn test_deserialize_length_mismatch() {
        let mut bytes = vec![];
        100usize.serialize_into(&mut bytes).unwrap();
        vec![0u64].serialize_into(&mut bytes).unwrap();
        vec![0usize].serialize_into(&mut bytes).unwrap();
        let e = SuccinctBitVector::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::Serialization(
                "100 bits need 2 words, but got 1.".to_string()
            ))
        );
    }

    #[test]
    fn test_deserialize_huge_length() {
        let len = usize::MAX - 10;
        let mut bytes = vec![];
        len.serialize_into(&mut bytes).unwrap();
        Vec::<u64>::new().serialize_into(&mut bytes).unwrap();
        Vec::<usize>::new().serialize_into(&mut bytes).unwrap();
        let e = SuccinctBitVector::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::Serialization(format!(
                "{len} bits need {} words, but got 0.",
                1usize << 58
            )))
        );
    }

    #[test]
    fn test_deserialize_truncated() {
        let mut bytes = vec![];
        let bv = SuccinctBitVector::from_bits(gen_random_bits(200, 1));
        bv.serialize_into(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 3);
        assert!(SuccinctBitVector::deserialize_from(&bytes[..]).is_err());
    }
}
