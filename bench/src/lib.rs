//! Shared input generators for the benchmarks.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

const SYLLABLES: &[&str] = &[
    "ka", "ki", "ku", "ke", "ko", "sa", "shi", "su", "ta", "te", "to", "na", "ni", "ma", "mo",
    "ra", "ri", "ru", "ing", "er", "ed", "tion", "ly",
];

/// Generates up to `num` distinct pseudo-words, sorted.
pub fn gen_random_words(num: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut words: Vec<String> = (0..num)
        .map(|_| {
            let len = rng.gen_range(1..=5);
            (0..len)
                .map(|_| SYLLABLES[rng.gen_range(0..SYLLABLES.len())])
                .collect()
        })
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

/// Picks `num` words at random.
pub fn sample_queries(words: &[String], num: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..num)
        .map(|_| words[rng.gen_range(0..words.len())].clone())
        .collect()
}
