use std::collections::BTreeSet;

use loudstrie::louds::BvTree;
use loudstrie::tails::{ConcatTailBuilder, SuffixTrieTailBuilder, TailBuilder};
use loudstrie::{CompactTrie, LoudsPpTrie, LoudsTrie, PatriciaTrie, Serializable, Trie};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

fn gen_random_words(num: usize, alphabet: &[char], max_len: usize, seed: u64) -> BTreeSet<String> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..num)
        .map(|_| {
            let len = rng.gen_range(1..=max_len);
            (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect()
        })
        .collect()
}

fn build<B: TailBuilder>(words: &BTreeSet<String>, tails: B) -> LoudsTrie {
    LoudsTrie::build_with(&PatriciaTrie::from_iter(words), tails).unwrap()
}

fn check_against_model<T: BvTree>(
    words: &BTreeSet<String>,
    trie: &CompactTrie<T>,
    alphabet: &[char],
    seed: u64,
) {
    assert_eq!(trie.len(), words.len());

    // Term ids form a permutation of 0..len.
    let mut ids: Vec<_> = words.iter().map(|w| trie.term_id(w).unwrap()).collect();
    ids.sort_unstable();
    assert!(ids.iter().copied().eq(0..words.len()));

    let mut rng = ChaChaRng::seed_from_u64(seed);
    for _ in 0..300 {
        let len = rng.gen_range(0..=8);
        let q: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();

        assert_eq!(trie.contains(&q), words.contains(&q), "{q}");

        let expected: Vec<&str> = words
            .iter()
            .filter(|w| q.starts_with(w.as_str()))
            .map(|w| w.as_str())
            .collect();
        let found: Vec<&str> = trie.common_prefix_search(&q).map(|(w, _)| w).collect();
        assert_eq!(found, expected, "{q}");

        let expected: Vec<&String> = words.iter().filter(|w| w.starts_with(&q)).collect();
        let found: Vec<(String, usize)> = trie.predictive_search(&q).collect();
        assert_eq!(found.len(), expected.len(), "{q}");
        for ((w, id), e) in found.iter().zip(expected) {
            assert_eq!(w, e);
            assert_eq!(trie.term_id(w), Some(*id));
        }
    }
}

#[test]
fn test_random_ascii() {
    let alphabet: Vec<char> = "abcd".chars().collect();
    for seed in 0..5 {
        let words = gen_random_words(500, &alphabet, 8, seed);
        let trie = build(&words, ConcatTailBuilder::new());
        check_against_model(&words, &trie, &alphabet, seed + 100);
    }
}

#[test]
fn test_random_multibyte() {
    let alphabet: Vec<char> = "あいうえおかa🎉".chars().collect();
    let words = gen_random_words(800, &alphabet, 6, 42);
    let trie = build(&words, SuffixTrieTailBuilder::new());
    check_against_model(&words, &trie, &alphabet, 43);
}

#[test]
fn test_wide_alphabet() {
    // Fan-out beyond the linear-scan threshold at the root and below it.
    let alphabet: Vec<char> = ('a'..='z').chain('A'..='Z').collect();
    let words = gen_random_words(2000, &alphabet, 4, 7);
    let trie = build(&words, ConcatTailBuilder::new());
    check_against_model(&words, &trie, &alphabet, 8);
}

#[test]
fn test_random_louds_pp() {
    let alphabet: Vec<char> = "abcdあい".chars().collect();
    for seed in 0..3 {
        let words = gen_random_words(500, &alphabet, 8, seed);
        let src = PatriciaTrie::from_iter(&words);
        let trie = LoudsPpTrie::build_with(&src, SuffixTrieTailBuilder::new()).unwrap();
        check_against_model(&words, &trie, &alphabet, seed + 200);

        let louds = LoudsTrie::build_with(&src, SuffixTrieTailBuilder::new()).unwrap();
        assert_eq!(trie.labels(), louds.labels());
        assert_eq!(trie.tree().num_bits(), louds.tree().num_bits());
        for id in 0..trie.num_nodes() {
            assert_eq!(trie.tree().child_range(id), louds.tree().child_range(id));
        }

        let mut bytes = vec![];
        trie.serialize_into(&mut bytes).unwrap();
        assert_eq!(LoudsPpTrie::deserialize_from(&bytes[..]).unwrap(), trie);
        assert!(LoudsTrie::deserialize_from(&bytes[..]).is_err());
    }
}

#[test]
fn test_tail_strategies_agree() {
    let alphabet: Vec<char> = "xyz".chars().collect();
    let words = gen_random_words(300, &alphabet, 12, 3);
    let concat = build(&words, ConcatTailBuilder::new());
    let shared = build(&words, SuffixTrieTailBuilder::new());
    assert_eq!(concat.tree(), shared.tree());
    assert_eq!(concat.labels(), shared.labels());
    assert!(shared.tail_array().tails().len() <= concat.tail_array().tails().len());
    for w in &words {
        assert_eq!(concat.term_id(w), shared.term_id(w));
    }
    assert!(concat
        .predictive_search("")
        .eq(shared.predictive_search("")));
}

#[test]
fn test_patricia_agrees() {
    let alphabet: Vec<char> = "ab".chars().collect();
    let words = gen_random_words(100, &alphabet, 10, 9);
    let src = PatriciaTrie::from_iter(&words);
    let trie = LoudsTrie::build(&src).unwrap();
    assert_eq!(Trie::len(&src), Trie::len(&trie));
    for w in &words {
        assert!(Trie::contains(&src, w));
        assert!(Trie::contains(&trie, w));
    }
}

#[test]
fn test_serialize_roundtrip() {
    let alphabet: Vec<char> = "abcあい".chars().collect();
    let words = gen_random_words(400, &alphabet, 7, 21);
    let trie = build(&words, SuffixTrieTailBuilder::new());

    let mut bytes = vec![];
    let size = trie.serialize_into(&mut bytes).unwrap();
    assert_eq!(size, bytes.len());
    assert_eq!(size, trie.size_in_bytes());

    let other = LoudsTrie::deserialize_from(&bytes[..]).unwrap();
    assert_eq!(trie, other);
    for w in &words {
        assert_eq!(trie.term_id(w), other.term_id(w));
    }
    assert!(trie.predictive_search("a").eq(other.predictive_search("a")));
}

#[test]
fn test_empty_dictionary() {
    let trie = LoudsTrie::build(&PatriciaTrie::new()).unwrap();
    assert!(trie.is_empty());
    assert_eq!(trie.num_nodes(), 1);
    assert!(!trie.contains(""));
    assert_eq!(trie.predictive_search("").count(), 0);
    assert_eq!(trie.common_prefix_search("abc").count(), 0);

    let mut bytes = vec![];
    trie.serialize_into(&mut bytes).unwrap();
    assert_eq!(LoudsTrie::deserialize_from(&bytes[..]).unwrap(), trie);
}

#[test]
fn test_small_dictionary() {
    let trie = LoudsTrie::build(&PatriciaTrie::from_iter(["a", "ab", "abc", "b"])).unwrap();
    assert_eq!(trie.len(), 4);
    assert!(trie.contains("ab"));
    assert!(!trie.contains("abcd"));
    assert!(!trie.contains(""));
    let prefixes: Vec<_> = trie.common_prefix_search("abc").map(|(w, _)| w).collect();
    assert_eq!(prefixes, vec!["a", "ab", "abc"]);
    let words: Vec<_> = trie.predictive_search("a").map(|(w, _)| w).collect();
    assert_eq!(words, vec!["a", "ab", "abc"]);
    assert_eq!(trie.predictive_search("c").count(), 0);
}
