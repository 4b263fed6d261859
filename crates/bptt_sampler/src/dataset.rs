//! src/dataset.rs
//!
//! The only thing the samplers need from a dataset is its length. They never
//! index into it; callers apply the emitted ranges to their own storage.

use std::collections::VecDeque;
use std::ops::Range;

/// A sequential dataset whose positions are addressed by `0..sequence_len()`.
pub trait SequenceLength {
    fn sequence_len(&self) -> usize;
}

impl<T> SequenceLength for [T] {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> SequenceLength for [T; N] {
    fn sequence_len(&self) -> usize {
        N
    }
}

impl<T> SequenceLength for Vec<T> {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl<T> SequenceLength for VecDeque<T> {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

/// Byte length, matching how `&text[range]` addresses a string.
impl SequenceLength for str {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl SequenceLength for String {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl SequenceLength for Range<usize> {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl<S: SequenceLength + ?Sized> SequenceLength for &S {
    fn sequence_len(&self) -> usize {
        (**self).sequence_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_lengths() {
        assert_eq!(vec![1, 2, 3].sequence_len(), 3);
        assert_eq!([0u8; 7].sequence_len(), 7);
        assert_eq!("hello".sequence_len(), 5);
        assert_eq!((10usize..25).sequence_len(), 15);
        assert_eq!(VecDeque::<i32>::new().sequence_len(), 0);

        let tokens = vec![0u32; 4];
        let borrowed: &[u32] = &tokens;
        assert_eq!((&borrowed).sequence_len(), 4);
    }
}
