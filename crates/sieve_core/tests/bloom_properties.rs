use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sieve_core::{BitVec, BloomFilter, FilterPlan};

#[test]
fn no_false_negatives() {
    let mut bf = BloomFilter::new(1_000, 0.02).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let keys: Vec<u64> = (0..1_000).map(|_| rng.random()).collect();
    for &key in &keys {
        bf.insert_hashed(key);
    }
    for &key in &keys {
        assert!(bf.lookup_hashed(key));
    }

    // Insertion order does not matter.
    let mut reversed = BloomFilter::new(1_000, 0.02).unwrap();
    for &key in keys.iter().rev() {
        reversed.insert_hashed(key);
    }
    for &key in &keys {
        assert!(reversed.lookup_hashed(key));
    }
}

#[test]
fn false_positive_rate_tracks_plan() {
    let population = 1_000u64;
    let error = 0.02f64;
    let mut bf = BloomFilter::new(population, error).unwrap();

    // Inserted and probed key spaces are disjoint by construction.
    for key in 0..population {
        bf.insert(&format!("member-{key}"));
    }

    let probes = 20_000u64;
    let hits = (0..probes)
        .filter(|key| bf.lookup(&format!("stranger-{key}")))
        .count();
    let observed = hits as f64 / probes as f64;

    // 20k probes at p = 0.02 put the observed rate within a wide band
    // (mean 400, sigma ~20) unless the derivation is broken.
    assert!(observed < 2.0 * error, "observed {observed} vs planned {error}");
    assert!(observed > error / 4.0, "observed {observed} suspiciously low");
}

#[test]
fn filter_allocates_planned_bits() {
    let plan = FilterPlan::new(10, 0.01).unwrap();
    let bf = BloomFilter::with_plan(plan);
    assert_eq!(bf.bit_len() as u64, plan.filter_bits());
    assert_eq!(bf.hash_functions(), plan.hash_functions());
}

#[test]
fn random_fields_match_reference_model() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut bv: BitVec<u8> = BitVec::new(512);
    let mut model = vec![false; 512];

    for _ in 0..2_000 {
        let len = rng.random_range(1..=64usize);
        let bit = rng.random_range(0..=512 - len);
        if rng.random_bool(0.5) {
            let value: u64 = rng.random();
            bv.set_field(bit, len, value);
            for i in 0..len {
                model[bit + i] = (value >> i) & 1 != 0;
            }
        } else {
            let mut expected = 0u64;
            for i in 0..len {
                expected |= (model[bit + i] as u64) << i;
            }
            assert_eq!(bv.get_field(bit, len), expected, "field [{bit}, {bit}+{len})");
        }
    }

    for (i, &b) in model.iter().enumerate() {
        assert_eq!(bv.get(i), b, "bit {i}");
    }
}
