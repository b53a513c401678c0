// shellkit/src/map.rs

//! Defines `ConcurrentMap<V>`, a string-keyed map guarded by a single
//! reader/writer lock.

use parking_lot::RwLock;
use std::collections::HashMap;

/// A map from `String` keys to values of type `V`, safe to share between
/// threads or tasks (typically behind an `Arc`).
///
/// Every operation takes the lock for its own duration only: `set` and `delete`
/// hold it exclusively, lookups hold it shared, so readers run in parallel with
/// each other but never with a writer. The lock itself is never handed out.
///
/// Lookups clone the stored value. Store `Arc<T>` for reference semantics, or
/// `Arc<dyn Any + Send + Sync>` if one map must hold heterogeneous values.
///
/// IMPORTANT: the lock is blocking. The closure given to
/// [`get_with`](Self::get_with) runs while it is held and must not block or
/// touch the same map.
#[derive(Debug)]
pub struct ConcurrentMap<V> {
  items: RwLock<HashMap<String, V>>,
}

impl<V> ConcurrentMap<V> {
  pub fn new() -> Self {
    Self {
      items: RwLock::new(HashMap::new()),
    }
  }

  /// Inserts `value` under `key`, replacing any previous value.
  pub fn set(&self, key: impl Into<String>, value: V) {
    self.items.write().insert(key.into(), value);
  }

  /// Removes `key`. Removing an absent key is a no-op.
  pub fn delete(&self, key: &str) {
    self.items.write().remove(key);
  }

  /// Runs `f` on the stored value under the read lock, without cloning it.
  pub fn get_with<R>(&self, key: &str, f: impl FnOnce(&V) -> R) -> Option<R> {
    self.items.read().get(key).map(f)
  }
}

impl<V: Clone> ConcurrentMap<V> {
  /// A copy of the value stored under `key`, or `None` when absent.
  pub fn get(&self, key: &str) -> Option<V> {
    self.items.read().get(key).cloned()
  }
}

impl<V: Clone + Default> ConcurrentMap<V> {
  /// The stored value and `true`, or `V::default()` and `false` when absent.
  pub fn get_or_default(&self, key: &str) -> (V, bool) {
    match self.get(key) {
      Some(value) => (value, true),
      None => (V::default(), false),
    }
  }
}

impl<V> Default for ConcurrentMap<V> {
  fn default() -> Self {
    Self::new()
  }
}
