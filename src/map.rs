//! `OrderedMap` — insertion-ordered associative map.
//!
//! Pairs a hash index (`HashMap<K, V>`) with an order sequence (`Vec<K>`)
//! holding the keys in first-insertion order. The two structures are only
//! ever mutated together through the map's own methods, which is what keeps
//! them consistent: the order sequence contains exactly the keys of the
//! index, with no duplicates.
//!
//! Iteration and the textual encoders walk the order sequence, so the
//! unordered index never dictates output order.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EncodeError;

/// An associative container that preserves key insertion order.
///
/// Lookup, insertion, and membership checks are O(1) on average. Removal is
/// O(n) in the worst case because the removed key's slot in the order
/// sequence is found by linear scan — an accepted tradeoff for a structure
/// where removals are not the dominant operation.
///
/// Updating an existing key keeps its position. Removing a key and inserting
/// it again later places it at the end of the order.
///
/// # Example
///
/// ```
/// use ordered_ds::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("z", 26);
/// map.insert("a", 1);
/// map.insert("z", 260); // update, position unchanged
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["z", "a"]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    index: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Creates an empty map with pre-sized internal storage.
    ///
    /// Purely a performance hint; observable behavior is identical to
    /// [`OrderedMap::new`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Removes all entries. Retains the allocated capacity of both internal
    /// structures for reuse.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq,
{
    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// A new key is appended to the end of the order; an existing key keeps
    /// its position and only its value is replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Clone,
    {
        match self.index.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(value);
                None
            }
        }
    }

    /// Returns a reference to the value for `key`, or `None` if absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key)
    }

    /// Returns a mutable reference to the value for `key`, or `None` if
    /// absent.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get_mut(key)
    }

    /// Returns the value for `key`, or `V::default()` if absent.
    ///
    /// Does not distinguish an absent key from a key stored with the default
    /// value; callers needing that distinction use [`OrderedMap::get`].
    pub fn get_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Default + Clone,
    {
        self.index.get(key).cloned().unwrap_or_default()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    ///
    /// When the map becomes empty the order sequence is reset wholesale;
    /// otherwise the key's slot is located by linear scan and removed,
    /// shifting later entries down (worst case O(n)).
    ///
    /// # Panics
    ///
    /// Panics if the key was present in the hash index but missing from the
    /// order sequence. That state is unreachable in correct single-threaded
    /// use and indicates unsynchronized concurrent mutation.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.index.remove(key)?;
        if self.index.is_empty() {
            self.order.clear();
            return Some(value);
        }
        let pos = self
            .order
            .iter()
            .position(|k| k.borrow() == key)
            .expect("OrderedMap::remove: order sequence out of sync with index");
        self.order.remove(pos);
        Some(value)
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().map(|k| &self.index[k])
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    ///
    /// The iterator is lazy and may be dropped early; partial consumption
    /// has no effect on the map.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            order: self.order.iter(),
            index: &self.index,
        }
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: Hash + Eq + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Order-sensitive equality: two maps are equal when they hold the same
/// keys in the same insertion order with equal values.
impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.order.iter().all(|k| self.index[k] == other.index[k])
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Borrowing iterator over `(&K, &V)` in insertion order.
pub struct Iter<'a, K, V> {
    order: std::slice::Iter<'a, K>,
    index: &'a HashMap<K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.order.next()?;
        Some((key, &self.index[key]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> where K: Hash + Eq {}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over `(K, V)` in insertion order.
pub struct IntoIter<K, V> {
    order: std::vec::IntoIter<K>,
    index: HashMap<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V>
where
    K: Hash + Eq,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.order.next()?;
        let value = self
            .index
            .remove(&key)
            .expect("OrderedMap::into_iter: order sequence out of sync with index");
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> where K: Hash + Eq {}

impl<K, V> IntoIterator for OrderedMap<K, V>
where
    K: Hash + Eq,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            order: self.order.into_iter(),
            index: self.index,
        }
    }
}

/// Serializes as a map with entries in insertion order.
///
/// serde's `serialize_map` emits entries in the order they are fed, so any
/// order-respecting format (including `serde_json` and `serde_yaml`)
/// reproduces the insertion order.
impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize + Hash + Eq,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Deserializes from a map, preserving the order entries appear in the
/// input. A duplicate key keeps its first position; the later value wins.
impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
        where
            K: Deserialize<'de> + Hash + Eq + Clone,
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: AsRef<str> + Hash + Eq,
    V: Serialize,
{
    /// Serializes the map as a JSON object with keys in insertion order.
    ///
    /// A generic whole-map serializer would walk the hash index in
    /// unspecified order, so this method walks the order sequence itself and
    /// only delegates per-key and per-value encoding to `serde_json` (which
    /// handles quoting, escaping, and arbitrarily nested values).
    ///
    /// The key type must be string-like because JSON object keys are
    /// strings; a non-string key type does not compile:
    ///
    /// ```compile_fail
    /// let mut map = ordered_ds::OrderedMap::new();
    /// map.insert(1, "x");
    /// map.to_json_vec().unwrap();
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("z", "last");
    /// map.insert("a", "first");
    /// assert_eq!(map.to_json_vec().unwrap(), br#"{"z":"last","a":"first"}"#);
    /// ```
    pub fn to_json_vec(&self) -> Result<Vec<u8>, EncodeError> {
        if self.order.is_empty() {
            return Ok(b"{}".to_vec());
        }
        let mut buf = Vec::with_capacity(self.order.len() * 20);
        buf.push(b'{');
        for (i, key) in self.order.iter().enumerate() {
            if i > 0 {
                buf.push(b',');
            }
            serde_json::to_writer(&mut buf, key.as_ref())?;
            buf.push(b':');
            serde_json::to_writer(&mut buf, &self.index[key])?;
        }
        buf.push(b'}');
        Ok(buf)
    }

    /// [`OrderedMap::to_json_vec`], as a `String`.
    pub fn to_json_string(&self) -> Result<String, EncodeError> {
        // serde_json writes UTF-8 and the framing bytes are ASCII
        let buf = self.to_json_vec()?;
        Ok(String::from_utf8(buf).expect("JSON output is valid UTF-8"))
    }
}
