pub mod bitvec;
pub mod bloom;
pub mod errors;
pub mod hash;

pub use bitvec::{BitVec, Block};
pub use bloom::{BloomFilter, FilterPlan};
pub use errors::{Result, SieveError};
pub use hash::{hash_bytes, hash_value, mix64};
