//! # lru-arena
//!
//! Bounded in-memory LRU cache backed by a stable entry arena.
//!
//! ## Architecture
//!
//! - **Index**: a `HashMap` keyed with AHash resolves keys to arena slots
//!   in O(1).
//! - **Recency list**: a doubly linked list threaded through the slots
//!   orders entries from most- to least-recently-used.
//! - **Arena**: entries live in a `Vec` of slots; evicted slots are
//!   recycled through a free list, so a full cache never reallocates.
//!
//! The index and the recency list are updated together in every operation;
//! a key is indexed exactly when its entry is linked.
//!
//! ## Example
//!
//! ```
//! use lru_arena::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//!
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // "b" is now the least recently used and gets evicted.
//! cache.insert("c", 3);
//! assert_eq!(cache.get(&"b"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod iter;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use iter::Iter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface() {
        let mut cache = LruCache::new(4).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);

        cache.insert(7u32, "seven".to_string());
        assert_eq!(cache.peek(&7), Some(&"seven".to_string()));
        assert!(cache.contains(&7));

        assert_eq!(cache.remove(&7), Some("seven".to_string()));
        assert!(cache.is_empty());
    }
}
