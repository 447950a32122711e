//! Lazy, wholesale-invalidated result cache.
//!
//! Results are stored type-erased under a string key and handed out as
//! [`Rc`] so repeated queries share one computed value. The cache is
//! single-threaded (`!Sync`); an index is rebuilt rather than mutated, so
//! there is no partial invalidation, only [`clear`](ComputeCache::clear).

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
pub struct ComputeCache {
    entries: RefCell<HashMap<String, Rc<dyn Any>>>,
}

impl ComputeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` may itself query the cache; no borrow is held while it runs.
    /// A hit stored under a different type is recomputed and replaced.
    pub fn get_or_compute<T: 'static>(&self, key: &str, compute: impl FnOnce() -> T) -> Rc<T> {
        let hit = self.entries.borrow().get(key).cloned();
        if let Some(value) = hit {
            if let Ok(typed) = value.downcast::<T>() {
                return typed;
            }
        }

        let value = Rc::new(compute());
        self.entries
            .borrow_mut()
            .insert(key.to_string(), Rc::clone(&value) as Rc<dyn Any>);
        value
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl fmt::Debug for ComputeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        f.debug_struct("ComputeCache").field("keys", &keys).finish()
    }
}
