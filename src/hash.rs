//! Polynomial bucket-index function.

/// Fixed multiplier of the polynomial recurrence.
pub const MULTIPLIER: u64 = 31;

/// Map `key` to a bucket in `[0, bucket_count)`.
///
/// Walks the key's chars (Unicode scalar values) with `h = (31 * h + c) mod bucket_count`,
/// reducing at every step. The result depends on `bucket_count`, so callers
/// must recompute it after the table grows.
///
/// `bucket_count` must be non-zero.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket_count must be positive");
    let n = bucket_count as u128;
    let mut h: u128 = 0;
    for c in key.chars() {
        h = (MULTIPLIER as u128 * h + c as u128) % n;
    }
    // h < n <= usize::MAX
    h as usize
}
