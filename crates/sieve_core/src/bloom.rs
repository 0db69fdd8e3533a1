//! Bloom filter over [`BitVec`], sized from a population and error rate.

use std::fmt;
use std::hash::Hash;

use crate::bitvec::BitVec;
use crate::errors::{Result, SieveError};
use crate::hash::{combine, hash_value};

// 1 / ln(2)^2
const SIZE_FACTOR: f64 = 2.0813689810056077;

/// Start of this structure's hash stream; keeps derived positions disjoint
/// from other consumers of the same base hashes.
const SEED_BASE: u64 = 0x735a_2d97;

/// Derived filter dimensions for a target population and error rate.
///
/// Pure sizing: building a plan allocates nothing, so it doubles as the
/// capacity-planning surface (its `Display` reports bits, megabytes and
/// hash-function count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPlan {
    population_size: u64,
    filter_bits: u64,
    hash_functions: u32,
}

impl FilterPlan {
    /// `population_size` is the expected number of distinct elements,
    /// `error_rate` the acceptable false-positive probability in (0, 1).
    pub fn new(population_size: u64, error_rate: f64) -> Result<Self> {
        if population_size == 0 {
            return Err(SieveError::EmptyPopulation);
        }
        if !(error_rate > 0.0 && error_rate < 1.0) {
            return Err(SieveError::BadErrorRate(error_rate));
        }

        let filter_bits = (-error_rate.ln() * population_size as f64 * SIZE_FACTOR).ceil() as u64;
        let hash_functions =
            (filter_bits as f64 * std::f64::consts::LN_2 / population_size as f64).floor() as u32;

        Ok(Self {
            population_size,
            filter_bits,
            hash_functions,
        })
    }

    pub fn population_size(&self) -> u64 {
        self.population_size
    }

    pub fn filter_bits(&self) -> u64 {
        self.filter_bits
    }

    pub fn hash_functions(&self) -> u32 {
        self.hash_functions
    }
}

impl fmt::Display for FilterPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "population size: {}, filter size (bits): {}, filter size (MB): {:.3}, hash functions: {}",
            self.population_size,
            self.filter_bits,
            self.filter_bits as f64 / (8.0 * 1024.0 * 1024.0),
            self.hash_functions,
        )
    }
}

/// Insert-only probabilistic set: lookups may report false positives at the
/// planned rate, never false negatives. Not thread-safe; share behind
/// external synchronization or not at all.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: BitVec,
    hash_functions: u32,
}

impl BloomFilter {
    pub fn new(population_size: u64, error_rate: f64) -> Result<Self> {
        Ok(Self::with_plan(FilterPlan::new(population_size, error_rate)?))
    }

    pub fn with_plan(plan: FilterPlan) -> Self {
        Self {
            bits: BitVec::new(plan.filter_bits as usize),
            hash_functions: plan.hash_functions,
        }
    }

    /// Filter length in bits.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    pub fn hash_functions(&self) -> u32 {
        self.hash_functions
    }

    /// Next derived position for hash-function index `hf`.
    #[inline]
    fn position(&self, hf: u32, hash: u64) -> usize {
        let mut seed = SEED_BASE + u64::from(hf);
        combine(&mut seed, hash);
        (seed % self.bits.len() as u64) as usize
    }

    /// Sets the k derived bits for an already-hashed key. Idempotent.
    pub fn insert_hashed(&mut self, hash: u64) {
        for hf in 0..self.hash_functions {
            let bit = self.position(hf, hash);
            self.bits.set(bit, true);
        }
    }

    /// True if every derived bit for `hash` is set; short-circuits on the
    /// first clear bit.
    pub fn lookup_hashed(&self, hash: u64) -> bool {
        (0..self.hash_functions).all(|hf| self.bits.get(self.position(hf, hash)))
    }

    pub fn insert<T: Hash + ?Sized>(&mut self, value: &T) {
        self.insert_hashed(hash_value(value));
    }

    pub fn lookup<T: Hash + ?Sized>(&self, value: &T) -> bool {
        self.lookup_hashed(hash_value(value))
    }
}
