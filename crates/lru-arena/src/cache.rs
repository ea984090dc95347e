//! LRU cache core: entry arena, recency list, and key index.
//!
//! Entries live in an arena of `Option` slots. The recency list is a doubly
//! linked list threaded through those slots, so the index and the links both
//! name entries by stable slot number rather than by pointer, and a slot
//! vacated by eviction is reused for the next insertion.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::mem;

use ahash::RandomState;

use crate::error::{Error, Result};
use crate::iter::Iter;

/// A stored key-value pair threaded into the recency list.
///
/// `prev` points toward the most-recently-used end, `next` toward the
/// least-recently-used end; `None` marks the ends of the list.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

/// Bounded in-memory cache with least-recently-used eviction.
///
/// Lookup and insertion are O(1): a hash index resolves keys to arena slots,
/// and the recency list relinks entries through those slots without moving
/// them. When inserting a new key into a full cache, the entry at the
/// least-recently-used end is evicted first.
///
/// The cache is move-only and owns its entries exclusively. Dropping it
/// releases every live entry exactly once: the arena is the single owner,
/// while the index holds only key copies and slot numbers.
///
/// # Example
///
/// ```
/// use lru_arena::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.get(&1);        // 1 is now most recently used
/// cache.insert(3, "c"); // evicts 2, the least recently used
///
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&1), Some(&"a"));
/// assert_eq!(cache.get(&3), Some(&"c"));
/// ```
pub struct LruCache<K, V> {
    /// Key -> arena slot of the live entry.
    index: HashMap<K, usize, RandomState>,

    /// Entry arena; vacated slots are `None` and queued on `free`.
    pub(crate) entries: Vec<Option<Entry<K, V>>>,

    /// Most-recently-used end of the recency list.
    pub(crate) head: Option<usize>,

    /// Least-recently-used end of the recency list.
    pub(crate) tail: Option<usize>,

    /// Vacated slots available for reuse.
    free: Vec<usize>,

    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    /// Creates a cache that holds at most `capacity` entries.
    ///
    /// The index and the entry arena reserve room for `capacity` entries up
    /// front, so neither reallocates during use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero. A cache that
    /// could never hold an entry is rejected here rather than misbehaving on
    /// the first insertion.
    ///
    /// # Example
    ///
    /// ```
    /// use lru_arena::LruCache;
    ///
    /// let cache = LruCache::<u64, String>::new(128).unwrap();
    /// assert_eq!(cache.capacity(), 128);
    ///
    /// assert!(LruCache::<u64, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            entries: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free: Vec::new(),
            capacity,
        })
    }

    /// Returns the maximum number of entries the cache can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates over entries from most- to least-recently-used.
    ///
    /// Iterating does not count as a touch; the recency order is unchanged.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Drops every entry. Capacity is retained.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Stores `entry` in a vacant slot and returns the slot number.
    fn alloc(&mut self, entry: Entry<K, V>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.entries[slot] = Some(entry);
                slot
            }
            None => {
                self.entries.push(Some(entry));
                self.entries.len() - 1
            }
        }
    }

    /// Unlinks `slot` from the recency list, repairing its neighbours and
    /// the list ends. The entry itself stays in the arena.
    fn detach(&mut self, slot: usize) {
        let (prev, next) = match &self.entries[slot] {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(entry) = &mut self.entries[p] {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(entry) = &mut self.entries[n] {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Links a detached `slot` in at the most-recently-used end.
    fn attach_front(&mut self, slot: usize) {
        let old_head = self.head;

        if let Some(entry) = &mut self.entries[slot] {
            entry.prev = None;
            entry.next = old_head;
        }

        if let Some(h) = old_head {
            if let Some(entry) = &mut self.entries[h] {
                entry.prev = Some(slot);
            }
        }

        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }

    /// Moves `slot` to the most-recently-used position.
    fn promote(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }

        self.detach(slot);
        self.attach_front(slot);
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Looks up `key` and promotes its entry to most-recently-used.
    ///
    /// This is a mutating read: a hit reorders the recency list, which is
    /// why the receiver is `&mut self`. Use [`LruCache::peek`] to read
    /// without promoting. A miss has no side effect.
    ///
    /// # Example
    ///
    /// ```
    /// use lru_arena::LruCache;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.insert(1, "one");
    ///
    /// assert_eq!(cache.get(&1), Some(&"one"));
    /// assert_eq!(cache.get(&2), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.promote(slot);
        self.entries[slot].as_ref().map(|entry| &entry.value)
    }

    /// Looks up `key` without updating the recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.entries[slot].as_ref().map(|entry| &entry.value)
    }

    /// Inserts or updates `key`, making it the most-recently-used entry.
    ///
    /// An existing key has its value replaced in place and the old value
    /// returned; the live count does not change and nothing is evicted. A
    /// new key is inserted after evicting the least-recently-used entry if
    /// the cache is full. At most one entry is evicted per insertion.
    ///
    /// # Example
    ///
    /// ```
    /// use lru_arena::LruCache;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// assert_eq!(cache.insert(1, "one"), None);
    /// assert_eq!(cache.insert(1, "uno"), Some("one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            let old = self.entries[slot]
                .as_mut()
                .map(|entry| mem::replace(&mut entry.value, value));
            self.promote(slot);
            return old;
        }

        // The entry carries its own key copy so eviction can unindex by key.
        // Clone before the first mutation: a panicking Clone must not land
        // between the paired index/list updates.
        let entry = Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };

        if self.index.len() == self.capacity {
            self.evict();
        }

        let slot = self.alloc(entry);
        self.attach_front(slot);
        self.index.insert(key, slot);
        None
    }

    /// Removes `key` and returns its value. The slot is recycled.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.detach(slot);
        let entry = self.entries[slot].take();
        self.free.push(slot);
        entry.map(|entry| entry.value)
    }

    /// Returns true if `key` is cached. Does not count as a touch.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Drops the entry at the least-recently-used end.
    ///
    /// Detaching runs while the entry is still in the arena, so the list
    /// ends and the neighbour links are repaired before the slot is vacated.
    fn evict(&mut self) {
        if let Some(slot) = self.tail {
            self.detach(slot);
            if let Some(entry) = self.entries[slot].take() {
                self.index.remove(&entry.key);
            }
            self.free.push(slot);
        }
    }
}

/// Renders entries from most- to least-recently-used.
impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
