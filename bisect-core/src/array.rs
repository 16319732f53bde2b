//! Sorted input arrays
//!
//! A [`SortedArray`] is strictly ascending by construction. It can be generated
//! as `1..=n` or validated from a caller-supplied vector, and is never mutated
//! afterwards.

use crate::error::BenchError;
use std::ops::Deref;

/// Bytes used per stored element (`i64`)
pub const BYTES_PER_ELEMENT: u64 = std::mem::size_of::<i64>() as u64;

/// Immutable, strictly ascending integer array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedArray {
    values: Vec<i64>,
}

impl SortedArray {
    /// Generate `[1, 2, ..., size]`
    pub fn generate(size: usize) -> Result<Self, BenchError> {
        if size == 0 {
            return Err(BenchError::NonPositiveSize);
        }
        Ok(Self {
            values: (1..=size as i64).collect(),
        })
    }

    /// Validate and wrap an existing vector. Empty input is allowed.
    pub fn from_vec(values: Vec<i64>) -> Result<Self, BenchError> {
        check_ascending(&values)?;
        Ok(Self { values })
    }

    /// Borrow the underlying values
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Heap bytes used by the element storage
    pub fn byte_size(&self) -> u64 {
        self.values.len() as u64 * BYTES_PER_ELEMENT
    }
}

impl Deref for SortedArray {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.values
    }
}

impl AsRef<[i64]> for SortedArray {
    fn as_ref(&self) -> &[i64] {
        &self.values
    }
}

/// Check that `values` is strictly ascending
pub fn check_ascending(values: &[i64]) -> Result<(), BenchError> {
    match values.windows(2).position(|w| w[0] >= w[1]) {
        Some(index) => Err(BenchError::NotAscending { index }),
        None => Ok(()),
    }
}

/// Generate the sorted array `1..=size`
pub fn generate_sorted_array(size: usize) -> Result<SortedArray, BenchError> {
    SortedArray::generate(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let arr = SortedArray::generate(5).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(arr.len(), 5);
        assert_eq!(arr.byte_size(), 40);
    }

    #[test]
    fn test_generate_zero_rejected() {
        assert_eq!(SortedArray::generate(0), Err(BenchError::NonPositiveSize));
    }

    #[test]
    fn test_from_vec_validates() {
        assert!(SortedArray::from_vec(vec![-3, 0, 9]).is_ok());
        assert!(SortedArray::from_vec(Vec::new()).is_ok());
        assert_eq!(
            SortedArray::from_vec(vec![1, 2, 2, 3]),
            Err(BenchError::NotAscending { index: 1 })
        );
        assert_eq!(
            SortedArray::from_vec(vec![5, 4]),
            Err(BenchError::NotAscending { index: 0 })
        );
    }
}
