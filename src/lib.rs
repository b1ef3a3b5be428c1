#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// An `i32 -> i64` hash map using open addressing and linear probing.
///
/// Keys and values are kept in flat primitive arrays, avoiding the per-entry
/// overhead of a generic map.
pub mod int_long_map;

/// Table statistics for tuning and debugging.
#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use int_long_map::DEFAULT_CAPACITY;
pub use int_long_map::DEFAULT_LOAD_FACTOR;
pub use int_long_map::IntLongHashMap;
