//! Iteration over cache entries in recency order.

use std::iter::FusedIterator;

use crate::cache::{Entry, LruCache};

/// Iterator over a cache's entries from most- to least-recently-used.
///
/// Created by [`LruCache::iter`]. Yields `(&K, &V)` pairs and walks the
/// recency list by slot number, so it never touches vacated arena slots.
pub struct Iter<'a, K, V> {
    entries: &'a [Option<Entry<K, V>>],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(cache: &'a LruCache<K, V>) -> Self {
        Iter {
            entries: &cache.entries,
            front: cache.head,
            back: cache.tail,
            remaining: cache.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.entries[self.front?].as_ref()?;
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.entries[self.back?].as_ref()?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::LruCache;

    #[test]
    fn test_iter_empty() {
        let cache = LruCache::<u32, &str>::new(4).unwrap();
        let mut iter = cache.iter();

        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_order_and_len() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");

        let mut iter = cache.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some((&3, &"c")));
        assert_eq!(iter.next(), Some((&2, &"b")));
        assert_eq!(iter.next(), Some((&1, &"a")));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_double_ended_meets_once() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");

        let mut iter = cache.iter();
        assert_eq!(iter.next(), Some((&3, &"c")));
        assert_eq!(iter.next_back(), Some((&1, &"a")));
        assert_eq!(iter.next(), Some((&2, &"b")));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 10);
        cache.insert(2, 20);

        let mut sum = 0;
        for (_, value) in &cache {
            sum += value;
        }
        assert_eq!(sum, 30);
    }
}
