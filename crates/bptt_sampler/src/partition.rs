//! src/partition.rs
//!
//! Splits a sequence of `length` positions into `batch_size` contiguous chunks,
//! one per row of the mini-batch.
//!
//! ```text
//! length = 10, batch_size = 3
//!
//! drop_last = false (remainder goes to the leading chunks)
//!   Chunk 0: [0, 4)
//!   Chunk 1: [4, 7)
//!   Chunk 2: [7, 10)
//!
//! drop_last = true (truncate to 9 positions)
//!   Chunk 0: [0, 3)
//!   Chunk 1: [3, 6)
//!   Chunk 2: [6, 9)   // 9 is never referenced
//! ```

use crate::error::{ensure_positive, Result};
use std::ops::Range;

/// A contiguous chunk of the global index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    /// Global index of the chunk's first position.
    pub offset: usize,
    /// Number of positions in the chunk.
    pub size: usize,
}

impl Partition {
    /// Global span `[offset, offset + size)` covered by this chunk.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Computes the `batch_size` chunks covering `[0, length)`.
///
/// Every chunk gets `length / batch_size` positions. With `drop_last = false`
/// the first `length % batch_size` chunks get one extra position, so the
/// chunks cover the full range. With `drop_last = true` the trailing
/// `length % batch_size` positions are discarded.
pub fn partition(length: usize, batch_size: usize, drop_last: bool) -> Result<Vec<Partition>> {
    ensure_positive("batch_size", batch_size)?;

    let base = length / batch_size;
    let remainder = if drop_last { 0 } else { length % batch_size };

    let mut offset = 0;
    let partitions = (0..batch_size)
        .map(|i| {
            let size = base + usize::from(i < remainder);
            let partition = Partition { offset, size };
            offset += size;
            partition
        })
        .collect();
    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(partitions: &[Partition]) -> Vec<usize> {
        partitions.iter().map(|p| p.size).collect()
    }

    #[test]
    fn distributes_remainder_to_leading_chunks() {
        let partitions = partition(100, 3, false).unwrap();
        assert_eq!(sizes(&partitions), vec![34, 33, 33]);
        assert_eq!(
            partitions.iter().map(|p| p.offset).collect::<Vec<_>>(),
            vec![0, 34, 67]
        );
    }

    #[test]
    fn drop_last_truncates_remainder() {
        let partitions = partition(10, 3, true).unwrap();
        assert_eq!(sizes(&partitions), vec![3, 3, 3]);
        assert_eq!(partitions[2].range(), 6..9);
    }

    #[test]
    fn more_chunks_than_positions() {
        let kept = partition(2, 4, false).unwrap();
        assert_eq!(sizes(&kept), vec![1, 1, 0, 0]);
        assert_eq!(kept[3].range(), 2..2);

        let dropped = partition(2, 4, true).unwrap();
        assert!(dropped.iter().all(Partition::is_empty));
    }

    #[test]
    fn chunks_tile_the_covered_range() {
        for length in 0..40 {
            for batch_size in 1..8 {
                for drop_last in [false, true] {
                    let partitions = partition(length, batch_size, drop_last).unwrap();
                    assert_eq!(partitions.len(), batch_size);

                    let mut expected_start = 0;
                    for p in &partitions {
                        assert_eq!(p.offset, expected_start);
                        expected_start = p.range().end;
                    }

                    let covered = if drop_last {
                        batch_size * (length / batch_size)
                    } else {
                        length
                    };
                    assert_eq!(expected_start, covered);
                }
            }
        }
    }

    #[test]
    fn rejects_zero_batch_size() {
        assert!(partition(10, 0, false).is_err());
    }
}
