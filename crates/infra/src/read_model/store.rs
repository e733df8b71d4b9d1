use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use storefront_catalog::StoreError;

/// Key/value store abstraction for disposable read models.
///
/// `list` returns values in first-insertion order; re-upserting an existing
/// key replaces the value in place.
pub trait ReadModelStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Result<Option<V>, StoreError>;
    fn upsert(&self, key: K, value: V) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<V>, StoreError>;
    /// Drop every record (reseed support).
    fn clear(&self) -> Result<(), StoreError>;
}

impl<K, V, S> ReadModelStore<K, V> for Arc<S>
where
    S: ReadModelStore<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) -> Result<(), StoreError> {
        (**self).upsert(key, value)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

#[derive(Debug)]
struct Ordered<K, V> {
    index: HashMap<K, usize>,
    values: Vec<V>,
}

/// In-memory ordered store for tests/dev.
#[derive(Debug)]
pub struct InMemoryReadModelStore<K, V> {
    inner: RwLock<Ordered<K, V>>,
}

impl<K, V> InMemoryReadModelStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Ordered {
                index: HashMap::new(),
                values: Vec::new(),
            }),
        }
    }
}

impl<K, V> Default for InMemoryReadModelStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(what: &str) -> StoreError {
    StoreError::Unavailable(format!("read model lock poisoned ({what})"))
}

impl<K, V> InMemoryReadModelStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Clone out the values accepted by `keep`, preserving order.
    pub fn select(&self, keep: impl Fn(&V) -> bool) -> Result<Vec<V>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned("read"))?;
        Ok(inner.values.iter().filter(|v| keep(v)).cloned().collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned("read"))?;
        Ok(inner.values.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Upsert unless some stored value satisfies `conflicts`. The check and
    /// the write happen under one write guard. Returns `false` when rejected.
    pub fn upsert_unless(
        &self,
        key: K,
        value: V,
        conflicts: impl Fn(&V) -> bool,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned("write"))?;
        if inner.values.iter().any(|v| conflicts(v)) {
            return Ok(false);
        }
        inner.put(key, value);
        Ok(true)
    }
}

impl<K: Eq + Hash, V> Ordered<K, V> {
    fn put(&mut self, key: K, value: V) {
        match self.index.get(&key).copied() {
            Some(i) => self.values[i] = value,
            None => {
                let i = self.values.len();
                self.values.push(value);
                self.index.insert(key, i);
            }
        }
    }
}

#[cfg(test)]
impl<K, V> InMemoryReadModelStore<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    /// Panic on another thread while holding the write guard.
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = self.inner.write();
                    panic!("writer died holding the read model lock");
                })
                .join();
        });
    }
}

impl<K, V> ReadModelStore<K, V> for InMemoryReadModelStore<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned("read"))?;
        Ok(inner.index.get(key).map(|&i| inner.values[i].clone()))
    }

    fn upsert(&self, key: K, value: V) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned("write"))?;
        inner.put(key, value);
        Ok(())
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        self.select(|_| true)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned("write"))?;
        inner.index.clear();
        inner.values.clear();
        Ok(())
    }
}
