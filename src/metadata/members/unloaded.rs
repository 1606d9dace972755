use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::metadata::member::MemberRc;

/// Name-keyed holding area for handles whose backing declaration was unloaded.
///
/// Parked handles wait here so that a later reload of a same-named declaration can
/// recover the original handle instead of fabricating a duplicate. Recovery by name
/// is best-effort: two differently-scoped declarations can share a display name, and
/// the pool hands out the first match. The rare mismatch is accepted — the
/// alternative would be duplicating handles that long-lived external references
/// still point at.
#[derive(Default)]
pub struct UnloadedPool {
    buckets: FxHashMap<String, Vec<MemberRc>>,
}

impl UnloadedPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a handle under its name.
    pub fn put(&mut self, member: MemberRc) {
        self.buckets
            .entry(member.name().to_string())
            .or_default()
            .push(member);
    }

    /// First parked handle with this name, left in place.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<MemberRc> {
        self.buckets.get(name).and_then(|b| b.first().cloned())
    }

    /// Removes and returns the first parked handle with this name.
    ///
    /// The recovery path uses this so a handle is never simultaneously parked and
    /// active.
    pub fn take_by_name(&mut self, name: &str) -> Option<MemberRc> {
        let bucket = self.buckets.get_mut(name)?;
        let member = bucket.remove(0);
        if bucket.is_empty() {
            self.buckets.remove(name);
        }
        Some(member)
    }

    /// Removes a specific parked handle, located through its name bucket.
    ///
    /// Returns false when the handle is not parked here.
    pub fn remove(&mut self, member: &MemberRc) -> bool {
        let Some(bucket) = self.buckets.get_mut(member.name()) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|m| Arc::ptr_eq(m, member)) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(member.name());
        }
        true
    }

    /// Removes a parked handle by scanning every bucket with pointer comparison.
    ///
    /// Neither the handle's name nor any hash of it is consulted; safe to call while
    /// the handle is being torn down. Returns false when the handle is not parked.
    pub fn remove_by_ptr(&mut self, member: &MemberRc) -> bool {
        let mut removed = false;
        self.buckets.retain(|_, bucket| {
            if let Some(pos) = bucket.iter().position(|m| Arc::ptr_eq(m, member)) {
                bucket.remove(pos);
                removed = true;
            }
            !bucket.is_empty()
        });
        removed
    }

    /// Drops every parked handle.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Visits every parked handle.
    pub fn iter(&self) -> impl Iterator<Item = &MemberRc> {
        self.buckets.values().flatten()
    }

    /// Number of parked handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when nothing is parked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::member;

    #[test]
    fn test_put_and_find() {
        let mut pool = UnloadedPool::new();
        let m = member(1, "count");
        pool.put(m.clone());

        assert!(Arc::ptr_eq(&pool.find_by_name("count").unwrap(), &m));
        assert!(pool.find_by_name("missing").is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_take_removes() {
        let mut pool = UnloadedPool::new();
        pool.put(member(1, "count"));

        let taken = pool.take_by_name("count").unwrap();
        assert_eq!(taken.name(), "count");
        assert!(pool.is_empty());
        assert!(pool.take_by_name("count").is_none());
    }

    #[test]
    fn test_colliding_names_queue_in_order() {
        let mut pool = UnloadedPool::new();
        let first = member(1, "value");
        let second = member(2, "value");
        pool.put(first.clone());
        pool.put(second.clone());

        assert!(Arc::ptr_eq(&pool.take_by_name("value").unwrap(), &first));
        assert!(Arc::ptr_eq(&pool.take_by_name("value").unwrap(), &second));
    }

    #[test]
    fn test_remove_specific_handle() {
        let mut pool = UnloadedPool::new();
        let first = member(1, "value");
        let second = member(2, "value");
        pool.put(first.clone());
        pool.put(second.clone());

        assert!(pool.remove(&second));
        assert!(!pool.remove(&second));
        assert!(Arc::ptr_eq(&pool.find_by_name("value").unwrap(), &first));
    }

    #[test]
    fn test_remove_by_ptr() {
        let mut pool = UnloadedPool::new();
        let parked = member(1, "a");
        pool.put(parked.clone());
        pool.put(member(2, "b"));

        assert!(pool.remove_by_ptr(&parked));
        assert!(!pool.remove_by_ptr(&parked));
        assert_eq!(pool.len(), 1);
    }
}
