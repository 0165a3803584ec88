use loudstrie::tails::{ConcatTailBuilder, SuffixTrieTailBuilder};
use loudstrie::louds::BvTree;
use loudstrie::{CompactTrie, LoudsPpTrie, LoudsTrie, PatriciaTrie, Serializable};
use loudstrie_bench::gen_random_words;

const SEED_WORDS: u64 = 113;

fn main() {
    for num in [1_000, 10_000, 100_000] {
        show_memories(num);
    }
}

fn show_memories(num: usize) {
    let words = gen_random_words(num, SEED_WORDS);
    let raw: usize = words.iter().map(|w| w.len() + 1).sum();
    println!("[n = {}, raw = {} bytes]", words.len(), raw);

    let src = PatriciaTrie::from_iter(&words);
    let tries = [
        ("concat", LoudsTrie::build_with(&src, ConcatTailBuilder::new())),
        ("suffix_trie", LoudsTrie::build_with(&src, SuffixTrieTailBuilder::new())),
    ];
    for (name, trie) in tries {
        match trie {
            Ok(trie) => print_memory(name, &trie, words.len()),
            Err(e) => println!("{name}: {e}"),
        }
    }
    match LoudsPpTrie::build_with(&src, SuffixTrieTailBuilder::new()) {
        Ok(trie) => print_memory("louds_pp/suffix_trie", &trie, words.len()),
        Err(e) => println!("louds_pp/suffix_trie: {e}"),
    }
}

fn print_memory<T: BvTree>(name: &str, trie: &CompactTrie<T>, num_words: usize) {
    let bytes = trie.size_in_bytes();
    println!(
        "{}: {} bytes, {:.3} bytes per word, {} tail chars",
        name,
        bytes,
        bytes as f64 / num_words as f64,
        trie.tail_array().tails().len()
    );
}
