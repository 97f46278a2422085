//! Memoized car table projections.
//!
//! The cache lives as long as the [`CarList`](crate::CarList) that owns it,
//! storing filtered+sorted views keyed by the filter and sort settings. This
//! avoids re-running the filter and sort on every re-render while the user
//! leaves the settings alone.
//!
//! # Cache Key Structure
//! - `filter_field`: Column the filter looks at
//! - `filter_value`: Substring the column must contain
//! - `sort_field`: Column the view is ordered by
//! - `direction`: Ascending or descending
//!
//! # Cache Value Structure
//! - `Rc<[Car]>`: The ordered projection, shared read-only with callers
//!
//! Entries are never evicted individually; any write to the record set clears
//! the whole map.

use crate::{Car, CarField, FilterSpec, SortDirection, SortSpec};
use std::collections::HashMap;
use std::rc::Rc;

/// Cache key: (filter_field, filter_value, sort_field, direction)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(CarField, String, CarField, SortDirection);

impl CacheKey {
    pub fn new(filter: &FilterSpec, sort: &SortSpec) -> Self {
        CacheKey(filter.field, filter.value.clone(), sort.field, sort.direction)
    }
}

/// Cache value: the projected cars in display order
pub type CacheValue = Rc<[Car]>;

#[derive(Debug, Default)]
pub struct ProjectionCache {
    entries: HashMap<CacheKey, CacheValue>,
    computations: usize,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.entries.get(key).cloned()
    }

    /// Store a freshly computed projection. Counts as one computation.
    pub(crate) fn insert(&mut self, key: CacheKey, value: CacheValue) {
        self.computations += 1;
        self.entries.insert(key, value);
    }

    /// Drop every cached projection.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of projections computed over the cache's lifetime.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_do_not_collide_on_delimiters() {
        let sort = SortSpec::default();
        let a = CacheKey::new(&FilterSpec::new(CarField::Make, "a:b"), &sort);
        let b = CacheKey::new(&FilterSpec::new(CarField::Make, "a"), &sort);
        assert_ne!(a, b);

        let asc = CacheKey::new(&FilterSpec::default(), &SortSpec::default());
        let desc = CacheKey::new(
            &FilterSpec::default(),
            &SortSpec::new(CarField::Id, SortDirection::Descending),
        );
        assert_ne!(asc, desc);
    }

    #[test]
    fn invalidate_clears_entries_but_keeps_counter() {
        let mut cache = ProjectionCache::new();
        let key = CacheKey::new(&FilterSpec::default(), &SortSpec::default());
        cache.insert(key.clone(), Rc::from(Vec::new()));

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key).is_some());

        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.computations(), 1);
    }
}
