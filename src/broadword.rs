//! Broadword tricks on 64-bit words.
#![cfg(target_pointer_width = "64")]

/// Returns the number of set bits in `x`.
///
/// # Examples
///
/// ```
/// use loudstrie::broadword::popcount;
///
/// assert_eq!(popcount(0), 0);
/// assert_eq!(popcount(0b1011), 3);
/// ```
#[inline(always)]
pub const fn popcount(x: u64) -> usize {
    x.count_ones() as usize
}

/// Returns the position of the lowest set bit, or [`None`] if `x == 0`.
///
/// # Examples
///
/// ```
/// use loudstrie::broadword::lsb;
///
/// assert_eq!(lsb(0b1000), Some(3));
/// assert_eq!(lsb(0), None);
/// ```
#[inline(always)]
pub const fn lsb(x: u64) -> Option<usize> {
    if x != 0 {
        Some(x.trailing_zeros() as usize)
    } else {
        None
    }
}

/// Returns the position of the `k`-th set bit (0-indexed) in `x`, or
/// [`None`] if `x` has no more than `k` set bits.
///
/// # Examples
///
/// ```
/// use loudstrie::broadword::select_in_word;
///
/// assert_eq!(select_in_word(0b10110, 0), Some(1));
/// assert_eq!(select_in_word(0b10110, 2), Some(4));
/// assert_eq!(select_in_word(0b10110, 3), None);
/// ```
#[inline(always)]
pub fn select_in_word(x: u64, k: usize) -> Option<usize> {
    if popcount(x) <= k {
        return None;
    }
    // Narrow down by bytes first, then clear the lowest bits one by one.
    let mut k = k;
    let mut shift = 0;
    loop {
        let cnt = popcount((x >> shift) & 0xFF);
        if k < cnt {
            break;
        }
        k -= cnt;
        shift += 8;
    }
    let mut w = (x >> shift) & 0xFF;
    for _ in 0..k {
        w &= w - 1;
    }
    lsb(w).map(|p| p + shift)
}

/// Returns a mask whose lowest `len` bits are set.
#[inline(always)]
pub const fn low_mask(len: usize) -> u64 {
    if len < 64 {
        (1 << len) - 1
    } else {
        u64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_select_in_word_all_ones() {
        for k in 0..64 {
            assert_eq!(select_in_word(u64::MAX, k), Some(k));
        }
        assert_eq!(select_in_word(u64::MAX, 64), None);
    }

    #[test]
    fn test_select_in_word_random() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = rng.gen::<u64>();
            let expected: Vec<usize> = (0..64).filter(|&i| (x >> i) & 1 == 1).collect();
            for (k, &pos) in expected.iter().enumerate() {
                assert_eq!(select_in_word(x, k), Some(pos));
            }
            assert_eq!(select_in_word(x, expected.len()), None);
        }
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(3), 0b111);
        assert_eq!(low_mask(64), u64::MAX);
    }
}
