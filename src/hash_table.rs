use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};

use log::debug;

use crate::CapacityError;
use crate::chain::{Chain, Entry};

/// Bucket count used by [`HashTable::new`] and [`Default`].
pub const DEFAULT_CAPACITY: usize = 8;

/// An in-memory key-value table with separate chaining.
///
/// Keys that hash to the same bucket share a chain and are found by
/// a linear scan within it. The bucket count is always a power of two,
/// so the bucket index is `hash & (bucket_count - 1)` instead of a full
/// modulo. Once the load factor reaches [`Self::LOAD_FACTOR_THRESHOLD`]
/// the table doubles its bucket count and re-buckets every entry.
///
/// The hasher `S` is pluggable; the default is the deterministic
/// [`DefaultHasher`] without per-instance seeding. Any [`BuildHasher`]
/// works as long as it agrees with `K`'s [`Eq`].
///
/// The table is single-threaded. Callers sharing one across threads
/// must serialize access themselves, since a resize rewrites the whole
/// bucket array.
#[derive(Debug)]
pub struct HashTable<K, V, S = BuildHasherDefault<DefaultHasher>> {
    buckets: Vec<Chain<K, V>>,
    items: usize,
    mask: usize,
    hasher: S,
}

/// Borrowing iterator over a table's entries,
/// in bucket order then insertion order within each chain.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    buckets: &'a [Chain<K, V>],
    bucket_idx: usize,
    entry_idx: usize,
}

impl<K, V> HashTable<K, V> {
    /// Creates a table with [`DEFAULT_CAPACITY`] buckets and the
    /// default hasher.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY, BuildHasherDefault::default())
    }

    /// Creates a table with `cap` buckets and the default hasher.
    ///
    /// `cap` must be a nonzero power of two, otherwise the masked
    /// index computation would skip buckets; anything else is
    /// rejected with a [`CapacityError`] rather than rounded.
    pub fn with_capacity(cap: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(cap, BuildHasherDefault::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Load factor (items per bucket) at or above which the next
    /// insert grows the table.
    pub const LOAD_FACTOR_THRESHOLD: f64 = 0.75;

    /// Creates a table with `cap` buckets, hashing keys with `hasher`.
    ///
    /// Same capacity rules as [`HashTable::with_capacity`].
    pub fn with_capacity_and_hasher(cap: usize, hasher: S) -> Result<Self, CapacityError> {
        if cap == 0 {
            return Err(CapacityError::Zero);
        }
        if !cap.is_power_of_two() {
            return Err(CapacityError::NotPowerOfTwo { got: cap });
        }
        Ok(Self::with_buckets(cap, hasher))
    }

    /// Builds the table unchecked; `cap` must be a nonzero power of two.
    fn with_buckets(cap: usize, hasher: S) -> Self {
        Self {
            buckets: (0..cap).map(|_| Chain::new()).collect(),
            items: 0,
            mask: cap - 1,
            hasher,
        }
    }

    /// Returns the number of live entries in the table
    pub fn len(&self) -> usize {
        self.items
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns the number of buckets, or "slots" of the table
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load factor of the table,
    /// computed as num of items / num of buckets
    pub fn load_factor(&self) -> f64 {
        self.items as f64 / self.buckets.len() as f64
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket_idx: 0,
            entry_idx: 0,
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Insert a key-value pair into the table,
    /// returning the previous value (if there was any).
    ///
    /// The load factor is checked *before* this entry is written, from
    /// the current item count. A table can therefore sit one entry past
    /// the threshold until the following insert triggers the growth.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.load_factor() >= Self::LOAD_FACTOR_THRESHOLD {
            self.resize();
        }

        let i = self.idx(&key);
        let old = self.buckets[i].insert(key, value);
        if old.is_none() {
            self.items += 1;
        }
        old
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.idx(key)].get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.idx(key);
        self.buckets[i].get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    /// `None` means the key was not present. The bucket count never
    /// shrinks, no matter how many entries are removed.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.idx(key);
        let removed = self.buckets[i].remove(key);
        if removed.is_some() {
            self.items -= 1;
        }
        removed
    }

    // [private]

    fn idx(&self, key: &K) -> usize {
        self.hasher.hash_one(key) as usize & self.mask
    }

    /// Doubles the bucket count and re-buckets every entry under the
    /// new mask. Entries are pushed into their chains directly, so the
    /// load-factor check in [`Self::insert`] cannot fire again while
    /// rehashing.
    ///
    /// # Panics
    ///
    /// This will not allocate more than `isize::MAX`
    /// and will panic if it ever tries to
    fn resize(&mut self) {
        let old_cap = self.buckets.len();
        let new_cap = old_cap * 2;
        self.mask = new_cap - 1;

        let new_buckets: Vec<_> = (0..new_cap).map(|_| Chain::new()).collect();
        let old_buckets = std::mem::replace(&mut self.buckets, new_buckets);

        for chain in old_buckets {
            for entry in chain {
                let i = self.hasher.hash_one(&entry.key) as usize & self.mask;
                self.buckets[i].push(entry);
            }
        }

        debug!(
            target: "chaintable",
            "resized {old_cap} -> {new_cap} buckets, load factor: {:.2}",
            self.load_factor()
        );
    }
}

impl<K, V, S: Default> Default for HashTable<K, V, S> {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY, S::default())
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let chain = self.buckets.get(self.bucket_idx)?.as_slice();
            match chain.get(self.entry_idx) {
                Some(Entry { key, value }) => {
                    self.entry_idx += 1;
                    return Some((key, value));
                }
                None => {
                    self.bucket_idx += 1;
                    self.entry_idx = 0;
                }
            }
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
