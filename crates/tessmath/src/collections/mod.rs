//! Collections keyed by floating-point geometry.

pub mod approx_hashmap;

pub use approx_hashmap::{ApproxHashMap, ApproxHashMapKey};
