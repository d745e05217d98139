//! `OrderedSet` — deduplicating collection that preserves insertion order.
//!
//! Same dual-structure layout as [`OrderedMap`](crate::OrderedMap): a hash
//! membership index plus an order sequence, kept consistent by mutating both
//! only through the set's own methods.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of unique values iterated in first-insertion order.
///
/// Membership checks and insertion are O(1) on average; removal is O(n) in
/// the worst case (linear scan of the order sequence).
///
/// # Example
///
/// ```
/// use ordered_ds::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// set.insert("b");
/// set.insert("a");
/// set.insert("b"); // already present, no-op
///
/// assert_eq!(set.as_slice(), ["b", "a"]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T> {
    seen: HashSet<T>,
    order: Vec<T>,
}

impl<T> OrderedSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Creates an empty set with pre-sized internal storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.order.iter()
    }

    /// The values in insertion order, as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.order
    }

    /// Removes all values. Retains the allocated capacity of both internal
    /// structures for reuse.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.order.clear();
    }
}

impl<T> OrderedSet<T>
where
    T: Hash + Eq,
{
    /// Inserts a value. Returns `false` (and leaves the set untouched) when
    /// the value is already present.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Clone,
    {
        if !self.seen.insert(value.clone()) {
            return false;
        }
        self.order.push(value);
        true
    }

    /// Removes a value, shifting later values down one slot. Returns whether
    /// the value was present.
    ///
    /// # Panics
    ///
    /// Panics if the value was in the membership index but missing from the
    /// order sequence, which indicates unsynchronized concurrent mutation.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.seen.remove(value) {
            return false;
        }
        let pos = self
            .order
            .iter()
            .position(|v| v.borrow() == value)
            .expect("OrderedSet::remove: order sequence out of sync with membership index");
        self.order.remove(pos);
        true
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.seen.contains(value)
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Order-sensitive equality: two sets are equal when they hold the same
/// values in the same insertion order.
impl<T: PartialEq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<T: Eq> Eq for OrderedSet<T> {}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T> Extend<T> for OrderedSet<T>
where
    T: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

/// Serializes as a plain sequence of the values in insertion order.
impl<T: Serialize> Serialize for OrderedSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.order.serialize(serializer)
    }
}

/// Deserializes from a sequence, rebuilding the order sequence in input
/// order and the membership index from it. Malformed input surfaces the
/// deserializer's own error unchanged; duplicate input values collapse to
/// their first occurrence so the no-duplicates invariant holds.
impl<'de, T> Deserialize<'de> for OrderedSet<T>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<T>::deserialize(deserializer)?;
        let mut set = OrderedSet::with_capacity(values.len());
        for value in values {
            set.insert(value);
        }
        Ok(set)
    }
}
