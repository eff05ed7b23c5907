use core::fmt::Debug;

use crate::hash_table::DuplicateError;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hash_table::OccupiedEntry as TableOccupiedEntry;
use crate::hash_table::VacantEntry as TableVacantEntry;
use crate::policy::CastPolicy;
use crate::policy::HashPolicy;

/// A key-value map implemented over the chained [`HashTable`].
///
/// `HashMap<K, V, P>` stores `(K, V)` pairs in the table and projects the
/// [`HashPolicy`] onto the key component only, so hashing, equality, and
/// removal never look at the value. The default policy is [`CastPolicy`].
///
/// Keys must be treated as immutable once inserted: the cached hash is
/// computed from the key at insertion and changing the key afterwards makes
/// the entry unfindable. Values may be overwritten freely; an overwrite
/// leaves the entry's slot and chain position untouched.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map: HashMap<u64, &str> = HashMap::new();
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.insert(1, "uno"), Some("one"));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, P = CastPolicy> {
    table: HashTable<(K, V)>,
    policy: P,
}

impl<K, V, P> Debug for HashMap<K, V, P>
where
    K: Debug,
    V: Debug,
    P: HashPolicy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, P> Default for HashMap<K, V, P>
where
    P: HashPolicy<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P> HashMap<K, V, P>
where
    P: HashPolicy<K> + Default,
{
    /// Creates an empty map with a default-constructed policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<u64, u32> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_policy(P::default())
    }

    /// Creates a map that can hold at least `capacity` entries without
    /// growing, with a default-constructed policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<u64, u32> = HashMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity, P::default())
    }
}

impl<K, V, P> HashMap<K, V, P>
where
    P: HashPolicy<K>,
{
    /// Creates an empty map with the given policy.
    pub fn with_policy(policy: P) -> Self {
        Self::with_capacity_and_policy(0, policy)
    }

    /// Creates a map with the given capacity and policy.
    pub fn with_capacity_and_policy(capacity: usize, policy: P) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            policy,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of entries the map can hold before its bucket
    /// array grows.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all entries and releases the bucket array; the next insert
    /// re-allocates lazily.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Inserts a key-value pair, overwriting the value of an existing equal
    /// key in place.
    ///
    /// Returns the previous value if the key was present. An overwrite does
    /// not touch the entry's slot or chain position, and the stored key is
    /// not replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// assert_eq!(map.insert(1, 10), None);
    /// assert_eq!(map.insert(1, 11), Some(10));
    /// assert_eq!(map.get(&1), Some(&11));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Inserts a key-value pair, failing if the key is present.
    ///
    /// On success returns a mutable reference to the inserted value; on
    /// failure the map is unchanged and the rejected pair is carried inside
    /// the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// assert!(map.try_insert("a", 1).is_ok());
    ///
    /// let err = map.try_insert("a", 2).unwrap_err();
    /// assert_eq!(err.into_value(), ("a", 2));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V, DuplicateError<(K, V)>> {
        match self.entry(key) {
            Entry::Occupied(entry) => Err(DuplicateError::new((entry.into_lookup_key(), value))),
            Entry::Vacant(entry) => Ok(entry.insert(value)),
        }
    }

    /// Returns a reference to the value for `key`, if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// assert_eq!(map.get(&1), Some(&10));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.policy.hash(key);
        self.table
            .find(hash, |(k, _)| self.policy.equals(k, key))
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key`, if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(map.get(&1), Some(&15));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.policy.hash(key);
        let Self { table, policy } = self;
        table
            .find_mut(hash, |(k, _)| policy.equals(k, key))
            .map(|(_, v)| v)
    }

    /// Returns the value for `key`, or `default` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// assert_eq!(map.get_or(&1, 0), 10);
    /// assert_eq!(map.get_or(&2, 0), 0);
    /// ```
    pub fn get_or(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// The key is compared on its own; no value is constructed for the
    /// lookup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// assert_eq!(map.remove(&1), Some(10));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.policy.hash(key);
        let Self { table, policy } = self;
        table.remove(hash, |(k, _)| policy.equals(k, key))
    }

    /// Returns the entry for `key`, vacant or occupied.
    ///
    /// `entry(key).or_default()` is this map's indexing-with-default-insert
    /// operation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    ///
    /// *map.entry("counter").or_default() += 1;
    /// *map.entry("counter").or_default() += 1;
    /// assert_eq!(map.get(&"counter"), Some(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.policy.hash(&key);
        let Self { table, policy } = self;
        match table.entry(hash, |(k, _)| policy.equals(k, &key)) {
            TableEntry::Occupied(inner) => Entry::Occupied(OccupiedEntry { inner, key }),
            TableEntry::Vacant(inner) => Entry::Vacant(VacantEntry { inner, key }),
        }
    }

    /// Returns an iterator over `(&key, &value)` pairs in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// let mut pairs: Vec<(u64, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// pairs.sort_unstable();
    /// assert_eq!(pairs, vec![(1, 10), (2, 20)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Empties the map, returning an iterator over the owned `(K, V)`
    /// pairs.
    ///
    /// The map is emptied immediately; dropping the iterator drops any
    /// pairs not yet yielded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u64, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// let pairs: Vec<(u64, u32)> = map.drain().collect();
    /// assert!(map.is_empty());
    /// assert_eq!(pairs.len(), 2);
    /// ```
    pub fn drain(&mut self) -> Drain<K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, P> FromIterator<(K, V)> for HashMap<K, V, P>
where
    P: HashPolicy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, P> Extend<(K, V)> for HashMap<K, V, P>
where
    P: HashPolicy<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, P> IntoIterator for &'a HashMap<K, V, P>
where
    P: HashPolicy<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, P> IntoIterator for HashMap<K, V, P> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// A view into a single key of a [`HashMap`], occupied or vacant.
///
/// Created by [`HashMap::entry`].
pub enum Entry<'a, K, V> {
    /// The key is not present.
    Vacant(VacantEntry<'a, K, V>),
    /// The key is present.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts `default` if the key is absent; returns a mutable reference
    /// to the value either way.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// map.entry("poneyland").or_insert(3);
    /// assert_eq!(map.get(&"poneyland"), Some(&3));
    ///
    /// *map.entry("poneyland").or_insert(10) *= 2;
    /// assert_eq!(map.get(&"poneyland"), Some(&6));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value computed by `default` if the key is absent;
    /// returns a mutable reference to the value either way.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to the value if the key is present, then returns the
    /// entry for further chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// map.insert("a", 1);
    ///
    /// map.entry("a").and_modify(|v| *v += 1).or_insert(42);
    /// assert_eq!(map.get(&"a"), Some(&2));
    ///
    /// map.entry("b").and_modify(|v| *v += 1).or_insert(42);
    /// assert_eq!(map.get(&"b"), Some(&42));
    /// ```
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the key is absent; returns a mutable
    /// reference to the value either way.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry of a [`HashMap`].
pub struct VacantEntry<'a, K, V> {
    inner: TableVacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Returns a reference to the key that would be inserted.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the view, returning the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the key with `value` and returns a mutable reference to the
    /// value.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.inner.insert((self.key, value)).1
    }
}

/// A view into an occupied entry of a [`HashMap`].
pub struct OccupiedEntry<'a, K, V> {
    inner: TableOccupiedEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Returns a reference to the stored key.
    pub fn key(&self) -> &K {
        &self.inner.get().0
    }

    /// Returns a reference to the value.
    pub fn get(&self) -> &V {
        &self.inner.get().1
    }

    /// Returns a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.inner.get_mut().1
    }

    /// Converts the view into a mutable reference bounded by the map's
    /// lifetime.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.inner.into_mut().1
    }

    /// Replaces the value, returning the previous one. The stored key and
    /// the entry's slot are untouched.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry, returning the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.inner.remove()
    }

    /// The key the caller looked up with, surrendered when a strict insert
    /// is rejected.
    fn into_lookup_key(self) -> K {
        self.key
    }
}

/// An iterator over `(&K, &V)` pairs of a [`HashMap`].
///
/// Created by [`HashMap::iter`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> core::iter::FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a [`HashMap`].
///
/// Created by [`HashMap::keys`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the values of a [`HashMap`].
///
/// Created by [`HashMap::values`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A draining iterator over the `(K, V)` pairs of a [`HashMap`].
///
/// Created by [`HashMap::drain`].
pub struct Drain<K, V> {
    inner: crate::hash_table::Drain<(K, V)>,
}

impl<K, V> Iterator for Drain<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<K, V> {}

/// An owning iterator over the `(K, V)` pairs of a [`HashMap`].
///
/// Created by the [`IntoIterator`] implementation.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use crate::policy::HasherPolicy;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            Self {
                k1: OsRng.try_next_u64().unwrap_or(0),
                k2: OsRng.try_next_u64().unwrap_or(0),
            }
        }
    }

    type SipPolicy = HasherPolicy<SipHashBuilder>;

    /// A value type with no `Default` impl; removal must not require one.
    #[derive(Debug, PartialEq, Eq)]
    struct Opaque(u64);

    #[test]
    fn insert_get_and_overwrite() {
        let mut map: HashMap<u64, u32> = HashMap::new();

        assert_eq!(map.insert(1, 10), None);
        assert_eq!(map.insert(2, 20), None);
        assert_eq!(map.insert(3, 30), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&1), Some(&10));
        assert_eq!(map.get(&2), Some(&20));
        assert_eq!(map.get(&4), None);

        // Upsert returns the old value and keeps the entry in its slot, so
        // iteration order is unchanged.
        assert_eq!(map.insert(2, 21), Some(20));
        assert_eq!(map.get(&2), Some(&21));
        assert_eq!(map.len(), 3);
        let keys: Vec<u64> = map.keys().copied().collect();
        assert_eq!(keys, alloc::vec![1, 2, 3]);
    }

    #[test]
    fn try_insert_rejects_duplicates() {
        let mut map: HashMap<String, u64> = HashMap::new();
        assert!(map.try_insert("a".to_string(), 1).is_ok());

        let err = map.try_insert("a".to_string(), 2).unwrap_err();
        assert_eq!(err.into_value(), ("a".to_string(), 2));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"a".to_string()), Some(&1));
    }

    #[test]
    fn get_mut_modifies_in_place() {
        let mut map: HashMap<u64, u32, SipPolicy> = HashMap::new();
        map.insert(1, 10);

        *map.get_mut(&1).unwrap() += 5;
        assert_eq!(map.get(&1), Some(&15));
        assert!(map.get_mut(&2).is_none());
    }

    #[test]
    fn get_or_falls_back_to_default() {
        let mut map: HashMap<u64, u32> = HashMap::new();
        map.insert(1, 10);
        assert_eq!(map.get_or(&1, 99), 10);
        assert_eq!(map.get_or(&2, 99), 99);
    }

    #[test]
    fn remove_by_key_without_value_construction() {
        let mut map: HashMap<u64, Opaque> = HashMap::new();
        map.insert(1, Opaque(10));
        map.insert(2, Opaque(20));

        assert_eq!(map.remove(&1), Some(Opaque(10)));
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove_entry(&2), Some((2, Opaque(20))));
        assert!(map.is_empty());
    }

    #[test]
    fn remove_on_empty_map_is_none() {
        let mut map: HashMap<&str, u64> = HashMap::new();
        assert_eq!(map.remove(&"missing"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn entry_api_inserts_and_modifies() {
        let mut map: HashMap<&str, u32> = HashMap::new();

        *map.entry("counter").or_insert(0) += 1;
        *map.entry("counter").or_insert(0) += 1;
        assert_eq!(map.get(&"counter"), Some(&2));

        map.entry("other").and_modify(|v| *v += 1).or_insert(10);
        assert_eq!(map.get(&"other"), Some(&10));
        map.entry("other").and_modify(|v| *v += 1).or_insert(10);
        assert_eq!(map.get(&"other"), Some(&11));

        assert_eq!(*map.entry("defaulted").or_default(), 0);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn entry_exposes_keys() {
        let mut map: HashMap<&str, u32> = HashMap::new();
        map.insert("present", 1);

        assert_eq!(*map.entry("present").key(), "present");
        assert_eq!(*map.entry("absent").key(), "absent");

        match map.entry("absent") {
            Entry::Vacant(entry) => assert_eq!(entry.into_key(), "absent"),
            Entry::Occupied(_) => unreachable!(),
        }
        // Looking at a vacant entry inserts nothing.
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn occupied_entry_remove() {
        let mut map: HashMap<u64, u32, SipPolicy> = HashMap::new();
        map.insert(1, 10);
        map.insert(2, 20);

        match map.entry(1) {
            Entry::Occupied(entry) => {
                assert_eq!(entry.remove_entry(), (1, 10));
            }
            Entry::Vacant(_) => unreachable!(),
        }
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));
    }

    #[test]
    fn string_keys_under_cast_policy() {
        let mut map: HashMap<String, u64> = HashMap::new();
        map.insert("alpha".to_string(), 1);
        map.insert("beta".to_string(), 2);

        assert_eq!(map.get(&"alpha".to_string()), Some(&1));
        assert_eq!(map.insert("alpha".to_string(), 10), Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map.remove(&"beta".to_string()), Some(2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn iter_keys_values() {
        let mut map: HashMap<u64, u32> = HashMap::new();
        map.insert(1, 10);
        map.insert(2, 20);
        map.insert(3, 30);
        map.remove(&2);

        let pairs: Vec<(u64, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, alloc::vec![(1, 10), (3, 30)]);

        let keys: Vec<u64> = map.keys().copied().collect();
        assert_eq!(keys, alloc::vec![1, 3]);

        let values: Vec<u32> = map.values().copied().collect();
        assert_eq!(values, alloc::vec![10, 30]);
    }

    #[test]
    fn drain_and_into_iter() {
        let mut map: HashMap<u64, u32, SipPolicy> = HashMap::new();
        map.insert(1, 10);
        map.insert(2, 20);

        let mut drained: Vec<(u64, u32)> = map.drain().collect();
        drained.sort_unstable();
        assert_eq!(drained, alloc::vec![(1, 10), (2, 20)]);
        assert!(map.is_empty());

        map.insert(3, 30);
        let owned: Vec<(u64, u32)> = map.into_iter().collect();
        assert_eq!(owned, alloc::vec![(3, 30)]);
    }

    #[test]
    fn from_iterator_and_extend() {
        let mut map: HashMap<u64, u32> = [(1u64, 10u32), (2, 20)].into_iter().collect();
        assert_eq!(map.len(), 2);

        map.extend([(2u64, 21u32), (3, 30)]);
        assert_eq!(map.len(), 3);
        // Extend upserts like repeated insert calls.
        assert_eq!(map.get(&2), Some(&21));
    }

    #[test]
    fn churn_scenario() {
        let mut map: HashMap<u64, u64, SipPolicy> = HashMap::new();
        for k in 0..10000u64 {
            map.insert(k, k);
        }
        assert_eq!(map.len(), 10000);
        assert_eq!(map.get(&5000), Some(&5000));

        for k in 0..5000u64 {
            assert!(map.remove(&k).is_some());
        }
        assert_eq!(map.len(), 5000);
        assert_eq!(map.get(&123), None);
        assert_eq!(map.get(&7000), Some(&7000));

        map.insert(123, 999);
        assert_eq!(map.get(&123), Some(&999));
        assert_eq!(map.len(), 5001);
    }

    #[test]
    fn clone_is_independent() {
        let mut map: HashMap<u64, u32> = HashMap::new();
        map.insert(1, 10);

        let mut cloned = map.clone();
        cloned.insert(2, 20);
        assert_eq!(map.len(), 1);
        assert_eq!(cloned.len(), 2);
        assert_eq!(cloned.get(&1), Some(&10));
    }
}
