//! Growable array shared by the chunk code, its line table and the constant pool.
//!
//! Capacity is tracked explicitly so growth follows a fixed schedule
//! (0, 8, 16, 32, ...) regardless of what the allocator hands back.
//! Indices returned by [`GrowArray::write`] stay valid until [`GrowArray::free`].

use core::{ops::Index, slice};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity reached on the first write.
pub const MIN_CAPACITY: usize = 8;

/// Next capacity for an array that is full at `capacity`.
pub const fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        capacity * 2
    }
}

/// Append-only sequence with amortised O(1) writes.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        from = "Vec<T>",
        into = "Vec<T>",
        bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>")
    )
)]
pub struct GrowArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for GrowArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GrowArray<T> {
    /// Empty array; nothing is allocated until the first write.
    pub const fn new() -> Self {
        Self { items: Vec::new(), capacity: 0 }
    }

    /// Number of elements in use (`count`).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no element has been written.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of slots reserved by the growth schedule.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `item`, growing first when full, and returns its index.
    pub fn write(&mut self, item: T) -> usize {
        if self.items.len() >= self.capacity {
            let new_capacity = grow_capacity(self.capacity);
            self.items.reserve_exact(new_capacity.saturating_sub(self.items.len()));
            self.capacity = new_capacity;
        }
        let index = self.items.len();
        self.items.push(item);
        index
    }

    /// Element at `index`, if written.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Last written element.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Elements in write order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates in write order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Drops every element and releases the backing storage.
    ///
    /// The array is empty afterwards and can be written to again.
    pub fn free(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }
}

impl<T> From<Vec<T>> for GrowArray<T> {
    fn from(items: Vec<T>) -> Self {
        let capacity = items.len();
        Self { items, capacity }
    }
}

impl<T> From<GrowArray<T>> for Vec<T> {
    fn from(array: GrowArray<T>) -> Self {
        array.items
    }
}

// Equality ignores capacity: two arrays holding the same items are equal.
impl<T: PartialEq> PartialEq for GrowArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> Index<usize> for GrowArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a GrowArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
