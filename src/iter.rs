//! Enumeration over a `BucketMap`: bucket index order, then stored order
//! within each bucket.

use crate::bucket_map::{Bucket, Entry};
use core::iter::{Flatten, FusedIterator};
use core::slice;

/// Iterator over `(key, value)` pairs.
pub struct Entries<'a, V> {
    it: Flatten<slice::Iter<'a, Bucket<V>>>,
    remaining: usize,
}

impl<'a, V> Entries<'a, V> {
    pub(crate) fn new(buckets: &'a [Bucket<V>], len: usize) -> Self {
        Self {
            it: buckets.iter().flatten(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e: &'a Entry<V> = self.it.next()?;
        self.remaining -= 1;
        Some((e.key.as_str(), &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Entries<'_, V> {}
impl<V> FusedIterator for Entries<'_, V> {}

impl<V> Clone for Entries<'_, V> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over keys, in the same order as [`Entries`].
pub struct Keys<'a, V> {
    inner: Entries<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(buckets: &'a [Bucket<V>], len: usize) -> Self {
        Self {
            inner: Entries::new(buckets, len),
        }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}
impl<V> FusedIterator for Keys<'_, V> {}

/// Iterator over values, in the same order as [`Entries`].
pub struct Values<'a, V> {
    inner: Entries<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(buckets: &'a [Bucket<V>], len: usize) -> Self {
        Self {
            inner: Entries::new(buckets, len),
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
impl<V> FusedIterator for Values<'_, V> {}

/// Iterator over mutable values.
pub struct ValuesMut<'a, V> {
    it: Flatten<slice::IterMut<'a, Bucket<V>>>,
    remaining: usize,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new(buckets: &'a mut [Bucket<V>], len: usize) -> Self {
        Self {
            it: buckets.iter_mut().flatten(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e: &'a mut Entry<V> = self.it.next()?;
        self.remaining -= 1;
        Some(&mut e.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}
impl<V> FusedIterator for ValuesMut<'_, V> {}

/// Owning iterator returned by `BucketMap::into_iter`.
pub struct IntoIter<V> {
    it: Flatten<std::vec::IntoIter<Bucket<V>>>,
    remaining: usize,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(buckets: Vec<Bucket<V>>, len: usize) -> Self {
        Self {
            it: buckets.into_iter().flatten(),
            remaining: len,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Entry { key, value } = self.it.next()?;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}
