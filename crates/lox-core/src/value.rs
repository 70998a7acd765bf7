//! Runtime values and the constant pool.

use core::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::memory::GrowArray;

/// A Lox value. Numbers only for now.
pub type Value = f64;

/// Renders a value the way listings and traces show it (`1.2`, `3`, `-0.5`).
pub fn format_value(value: Value) -> String {
    format!("{value}")
}

/// Append-only pool of constants addressed by index.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueArray {
    values: GrowArray<Value>,
}

impl ValueArray {
    /// Empty pool.
    pub const fn new() -> Self {
        Self { values: GrowArray::new() }
    }

    /// Appends `value` and returns its index. Equal values are not merged.
    pub fn write(&mut self, value: Value) -> usize {
        self.values.write(value)
    }

    /// Number of stored constants.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reserved slots.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Constant at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Constants as a slice.
    pub fn as_slice(&self) -> &[Value] {
        self.values.as_slice()
    }

    /// Releases every constant.
    pub fn free(&mut self) {
        self.values.free();
    }
}

impl<'a> IntoIterator for &'a ValueArray {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_start_at_zero_and_increase() {
        let mut pool = ValueArray::new();
        assert_eq!(pool.write(1.2), 0);
        assert_eq!(pool.write(1.2), 1);
        assert_eq!(pool.write(-3.0), 2);
        assert_eq!(pool.get(0), Some(1.2));
        assert_eq!(pool.get(2), Some(-3.0));
        assert_eq!(pool.get(3), None);
    }

    #[test]
    fn free_empties_pool() {
        let mut pool = ValueArray::new();
        pool.write(7.0);
        pool.free();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 0);
    }

    #[test]
    fn formats_like_source_literals() {
        assert_eq!(format_value(1.2), "1.2");
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-0.5), "-0.5");
    }
}
