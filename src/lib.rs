//! Separate-chaining hash table with power-of-two bucket counts.
//!
//! [`HashTable`] maps keys to values with amortized O(1) insert, get
//! and remove. Colliding keys share a bucket's chain, and the table
//! doubles its bucket count once the load factor reaches 0.75. The
//! hasher is pluggable through the usual [`std::hash::BuildHasher`]
//! seam.

mod chain;
mod hash_table;

pub use hash_table::{DEFAULT_CAPACITY, HashTable, Iter};

use thiserror::Error;

/// Capacities a table refuses to be built with.
///
/// Bucket indices are computed as `hash & (capacity - 1)`, which is
/// only a modulo for power-of-two capacities, so anything else is
/// rejected up front instead of being coerced.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CapacityError {
    #[error("capacity must be a power of two, got: {got}")]
    NotPowerOfTwo { got: usize },

    #[error("capacity must be nonzero")]
    Zero,
}
