use thiserror::Error;

#[derive(Debug, Error)]
pub enum SieveError {
    #[error("bit index {index} out of range (capacity {capacity} bits)")]
    BitOutOfRange { index: usize, capacity: usize },

    #[error("population size must be greater than zero")]
    EmptyPopulation,

    #[error("error rate {0} outside (0, 1)")]
    BadErrorRate(f64),
}

pub type Result<T> = std::result::Result<T, SieveError>;
