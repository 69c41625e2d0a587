//! Construction parameters for `BucketMap`.

use thiserror::Error;

/// Bucket count used by `BucketMap::new`.
pub const DEFAULT_INITIAL_BUCKETS: usize = 16;

/// Load-factor ceiling used by `BucketMap::new`.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Rejected construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial bucket count must be at least 1")]
    ZeroBuckets,
    #[error("max load factor must be in (0, 1], got {0}")]
    LoadFactorOutOfRange(f64),
    #[error("max load factor {load_factor} is below 1/{initial_buckets}; the first insert could not fit")]
    LoadFactorBelowOneEntry {
        load_factor: f64,
        initial_buckets: usize,
    },
}

/// Builder-style parameters for a `BucketMap`.
///
/// Setters never fail; checking happens once in [`MapConfig::validate`],
/// which `BucketMap::with_config` calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    initial_buckets: usize,
    max_load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets allocated up front.
    pub fn initial_buckets(mut self, n: usize) -> Self {
        self.initial_buckets = n;
        self
    }

    /// Ceiling on `len / bucket_count` checked before every insert.
    pub fn max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = lf;
        self
    }

    pub fn buckets(&self) -> usize {
        self.initial_buckets
    }

    pub fn load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        // NaN fails both comparisons.
        if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange(self.max_load_factor));
        }
        // One entry per initial table must fit; then a single doubling
        // always makes room for the next insert.
        if self.max_load_factor * (self.initial_buckets as f64) < 1.0 {
            return Err(ConfigError::LoadFactorBelowOneEntry {
                load_factor: self.max_load_factor,
                initial_buckets: self.initial_buckets,
            });
        }
        Ok(())
    }
}
