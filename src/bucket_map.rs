//! BucketMap: string-keyed map with separate chaining and doubling growth.

use crate::config::{ConfigError, MapConfig};
use crate::hash::bucket_index;
use crate::iter::{Entries, IntoIter, Keys, Values, ValuesMut};
use core::fmt;
use core::mem;
use core::ops::Index;
use log::{debug, trace};

#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
}

/// Entries whose key currently hashes to one slot. An empty bucket owns no
/// allocation until its first insert.
pub(crate) type Bucket<V> = Vec<Entry<V>>;

#[derive(Clone)]
pub struct BucketMap<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
    max_load_factor: f64,
}

impl<V> BucketMap<V> {
    /// 16 buckets, load factor ceiling 0.75.
    pub fn new() -> Self {
        Self::from_valid(MapConfig::default())
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub fn with_buckets(initial_buckets: usize, max_load_factor: f64) -> Result<Self, ConfigError> {
        Self::with_config(
            MapConfig::new()
                .initial_buckets(initial_buckets)
                .max_load_factor(max_load_factor),
        )
    }

    fn from_valid(config: MapConfig) -> Self {
        Self {
            buckets: empty_buckets(config.buckets()),
            len: 0,
            max_load_factor: config.load_factor(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count() as f64
    }

    fn index_of(&self, key: &str) -> usize {
        bucket_index(key, self.bucket_count())
    }

    /// Insert or overwrite. Returns the previous value when `key` was present.
    ///
    /// The table doubles before the lookup whenever one more entry would push
    /// `len / bucket_count` above the ceiling, so the ceiling holds after every
    /// call. `MapConfig::validate` guarantees `max_load_factor * bucket_count
    /// >= 1`, which makes a single doubling enough. The key is only turned
    /// into an owned `String` when a new entry is appended.
    pub fn set<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str> + Into<String>,
    {
        while (self.len + 1) as f64 / self.bucket_count() as f64 > self.max_load_factor {
            self.resize();
        }

        let idx = self.index_of(key.as_ref());
        let bucket = &mut self.buckets[idx];
        if let Some(e) = bucket.iter_mut().find(|e| e.key == key.as_ref()) {
            return Some(mem::replace(&mut e.value, value));
        }

        let key = key.into();
        trace!("bucket_map: append {:?} to bucket {}", key, idx);
        bucket.push(Entry { key, value });
        self.len += 1;
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.index_of(key)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.index_of(key);
        self.buckets[idx]
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// True iff an entry for `key` exists, whatever its value.
    pub fn has(&self, key: &str) -> bool {
        self.buckets[self.index_of(key)].iter().any(|e| e.key == key)
    }

    /// Delete `key`. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Delete `key` and hand back the owned entry. Remaining entries in the
    /// bucket keep their relative order; the bucket count never shrinks.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let idx = self.index_of(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|e| e.key == key)?;
        let Entry { key, value } = bucket.remove(pos);
        self.len -= 1;
        trace!("bucket_map: removed {:?} from bucket {}", key, idx);
        Some((key, value))
    }

    /// Drop every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Double the bucket count and rehash every entry against it.
    ///
    /// Entries are moved into a freshly built bucket vector in walk order,
    /// so two entries that land in the same new bucket keep their relative
    /// order. The new vector replaces the old one only once it is complete.
    fn resize(&mut self) {
        let old_count = self.bucket_count();
        let new_count = old_count
            .checked_mul(2)
            .unwrap_or_else(|| panic!("capacity overflow"));

        let mut fresh = empty_buckets(new_count);
        for entry in mem::take(&mut self.buckets).into_iter().flatten() {
            let idx = bucket_index(&entry.key, new_count);
            fresh[idx].push(entry);
        }
        self.buckets = fresh;

        debug!(
            "bucket_map: resized {} -> {} buckets ({} entries)",
            old_count, new_count, self.len
        );
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(&self.buckets, self.len)
    }

    pub fn values(&self) -> Values<'_, V> {
        Values::new(&self.buckets, self.len)
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(&mut self.buckets, self.len)
    }

    /// `(key, value)` pairs in bucket order, then stored order within a bucket.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries::new(&self.buckets, self.len)
    }

    pub fn iter(&self) -> Entries<'_, V> {
        self.entries()
    }
}

fn empty_buckets<V>(n: usize) -> Vec<Bucket<V>> {
    let mut buckets = Vec::with_capacity(n);
    buckets.resize_with(n, Vec::new);
    buckets
}

impl<V> Default for BucketMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for BucketMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Same key set with equal values; bucket layout and load factor are ignored.
impl<V: PartialEq> PartialEq for BucketMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.entries().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for BucketMap<V> {}

impl<V> Index<&str> for BucketMap<V> {
    type Output = V;

    /// Panics if `key` is absent.
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("no entry found for key {:?}", key),
        }
    }
}

impl<K, V> Extend<(K, V)> for BucketMap<V>
where
    K: AsRef<str> + Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BucketMap<V>
where
    K: AsRef<str> + Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<'a, V> IntoIterator for &'a BucketMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Entries<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

impl<V> IntoIterator for BucketMap<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.len)
    }
}

#[cfg(test)]
impl<V> BucketMap<V> {
    /// Panics unless `len` equals the sum of bucket lengths, every entry sits
    /// in the bucket its key hashes to, and no key repeats.
    pub(crate) fn assert_consistent(&self) {
        let total: usize = self.buckets.iter().map(Vec::len).sum();
        assert_eq!(total, self.len, "len out of sync with buckets");
        for (i, b) in self.buckets.iter().enumerate() {
            for e in b {
                assert_eq!(bucket_index(&e.key, self.bucket_count()), i, "key {:?}", e.key);
            }
        }
        let keys: std::collections::BTreeSet<&str> = self.keys().collect();
        assert_eq!(keys.len(), self.len, "duplicate keys present");
    }
}
