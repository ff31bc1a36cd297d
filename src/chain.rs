/// A single key-value pair stored in a bucket's chain.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// One bucket's worth of entries, in insertion order.
///
/// Every key in a chain hashed to the same bucket index, so lookups
/// are a linear scan. Chains stay short as long as the owning table
/// resizes on time.
#[derive(Debug)]
pub(crate) struct Chain<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Chain<K, V> {
    /// Creates a new, empty chain
    ///
    /// # Note
    ///
    /// This is a `const` function since it does not allocate
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Appends an entry without looking for a duplicate key.
    /// Only valid when the caller knows the key is absent,
    /// e.g. while re-bucketing during a resize.
    pub(crate) fn push(&mut self, entry: Entry<K, V>) {
        self.entries.push(entry);
    }
}

impl<K: Eq, V> Chain<K, V> {
    /// Insert a key-value pair into the chain,
    /// returning the previous value (if there was any)
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(e) => {
                let old = std::mem::replace(&mut e.value, value);
                Some(old)
            }
            None => {
                self.entries.push(Entry { key, value });
                None
            }
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|e| &e.key == key).map(|e| &e.value)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|e| &e.key == key)
            .map(|e| &mut e.value)
    }

    /// Removes the entry for `key`, shifting later entries down
    /// so insertion order survives
    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.entries.iter().position(|e| &e.key == key)?;
        Some(self.entries.remove(i).value)
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = Entry<K, V>;
    type IntoIter = std::vec::IntoIter<Entry<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::Chain;

    #[test]
    fn insert_and_get() {
        let mut c = Chain::new();

        assert_eq!(c.insert("foo", 1), None);
        assert_eq!(c.insert("bar", 2), None);
        assert_eq!(c.as_slice().len(), 2);

        assert_eq!(c.get(&"foo"), Some(&1));
        assert_eq!(c.get(&"bar"), Some(&2));
        assert_eq!(c.get(&"baz"), None);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut c = Chain::new();

        c.insert("foo", 1);
        let old = c.insert("foo", 2);

        assert_eq!(old, Some(1));
        assert_eq!(c.as_slice().len(), 1);
        assert_eq!(c.get(&"foo"), Some(&2));
    }

    #[test]
    fn remove_keeps_order() {
        let mut c = Chain::new();

        c.insert("a", 1);
        c.insert("b", 2);
        c.insert("c", 3);

        assert_eq!(c.remove(&"b"), Some(2));
        assert_eq!(c.remove(&"b"), None);

        let keys: Vec<_> = c.as_slice().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
