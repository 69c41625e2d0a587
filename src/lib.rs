//! bucket-map: a single-threaded, string-keyed map built on separate
//! chaining with load-factor driven doubling.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small map whose every moving part (hash, bucket scan, growth)
//!   can be read and reasoned about in isolation.
//! - Pieces:
//!   - `hash::bucket_index`: polynomial hash over the key's chars,
//!     reduced modulo the current bucket count at every step.
//!   - `BucketMap<V>`: a `Vec` of buckets, each a `Vec` of owned
//!     `(String, V)` entries; collisions chain within a bucket.
//!   - `MapConfig`: initial bucket count and load-factor ceiling, checked
//!     once at construction. The ceiling must fit at least one entry in the
//!     initial table, which bounds growth to one doubling per insert.
//!   - `iter`: borrowing and owning walks in bucket order.
//!
//! Constraints
//! - Keys are strings; values are any `V`.
//! - `len / bucket_count <= max_load_factor` after every `set`. Growth is
//!   decided before the insert, never after.
//! - Growth doubles the bucket count and rehashes every entry; the table
//!   never shrinks, not even on `remove` or `clear`.
//! - Absence is `None`. A stored value is always reported as present, so
//!   `BucketMap<Option<T>>` can hold `None` payloads unambiguously.
//!
//! Rehashing invariants
//! - Bucket indices are not cached on entries; they are recomputed from the
//!   key against the current count, during lookups and during resize.
//! - Resize moves entries (no clones) into a freshly built bucket vector and
//!   swaps it in once complete. Entries that share a new bucket keep the
//!   order they had in the walk.
//!
//! Notes and non-goals
//! - No internal locking. Wrap the map in a mutex to share it.
//! - No shrinking, persistence, or non-string keys.
//! - Enumeration order is whatever the bucket layout gives; it is stable
//!   between calls only while the map is not mutated.
//!
//! Logging
//! - Resizes are reported at `debug` level and entry appends/removals at
//!   `trace` level through the `log` facade. No logger is installed here.

mod bucket_map;
mod bucket_map_proptest;
pub mod config;
pub mod hash;
pub mod iter;

// Public surface
pub use bucket_map::BucketMap;
pub use config::{ConfigError, MapConfig};
