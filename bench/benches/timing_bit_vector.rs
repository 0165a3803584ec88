use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};

use loudstrie::bit_vectors::{NumBits, Rank, Select, SuccinctBitVector};

const SAMPLE_SIZE: usize = 30;
const WARM_UP_TIME: Duration = Duration::from_secs(5);
const MEASURE_TIME: Duration = Duration::from_secs(10);

const SEED_BITS: u64 = 334;
const SEED_QUERIES: u64 = 114514;

const NUM_BITS: &[usize] = &[1 << 10, 1 << 15, 1 << 20];
const NUM_QUERIES: usize = 1000;

fn gen_random_bits(len: usize, p: f64, seed: u64) -> Vec<bool> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_bool(p)).collect()
}

fn gen_random_ints(len: usize, max: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..max)).collect()
}

fn configure(c: &mut Criterion, name: &str) -> BenchmarkGroup<'_, WallTime> {
    let mut group = c.benchmark_group(name);
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);
    group
}

fn criterion_bit_vector(c: &mut Criterion) {
    for p in [0.5, 0.1] {
        let mut group = configure(c, &format!("timing_bit_vector_{}", (p * 100.0) as usize));
        let bits = gen_random_bits(NUM_BITS[NUM_BITS.len() - 1], p, SEED_BITS);
        perform(&mut group, &bits);
    }
}

fn perform(group: &mut BenchmarkGroup<WallTime>, bits: &[bool]) {
    for &nbits in NUM_BITS {
        let bv = SuccinctBitVector::from_bits(bits[..nbits].iter().copied());
        let positions = gen_random_ints(NUM_QUERIES, nbits, SEED_QUERIES);
        let ones = gen_random_ints(NUM_QUERIES, bv.num_ones().max(1), SEED_QUERIES);
        let zeros = gen_random_ints(NUM_QUERIES, bv.num_zeros().max(1), SEED_QUERIES);

        group.bench_function(format!("n_{nbits}/rank1"), |b| {
            b.iter(|| positions.iter().filter_map(|&q| bv.rank1(q)).sum::<usize>());
        });
        group.bench_function(format!("n_{nbits}/select1"), |b| {
            b.iter(|| ones.iter().filter_map(|&q| bv.select1(q)).sum::<usize>());
        });
        group.bench_function(format!("n_{nbits}/select0"), |b| {
            b.iter(|| zeros.iter().filter_map(|&q| bv.select0(q)).sum::<usize>());
        });
    }
}

criterion_group!(benches, criterion_bit_vector);

criterion_main!(benches);
