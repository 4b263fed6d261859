use crate::config::BpttConfig;
use crate::dataset::SequenceLength;
use crate::error::{ensure_positive, Result};
use crate::partition::{partition, Partition};
use crate::window::{Batch, Window};
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// A `Sampler` defines the strategy for how to iterate over a dataset.
///
/// # Associated type
/// - `Item`: The handle yielded by the iterator
///    - For `BpttSampler` this is a single `Window`
///    - For `BpttBatchSampler` this is a `Batch` of windows, one per chunk.
///
/// # Method
/// - `iter(epoch)`: returns the sequence for that epoch.
///    - BPTT sampling is strictly sequential, so both samplers in this crate
///      ignore `epoch` and produce the same sequence every time.
///
/// Implementations must be `Send + Sync` so the same sampler instance can be
/// safely shared across threads.
pub trait Sampler: Send + Sync {
    type Item: Send + Sync;

    fn iter(&self, epoch: usize) -> Box<dyn Iterator<Item = Self::Item> + Send + '_>;
}

/// ============================================================================
/// Slices a single chunk of `chunk_length` positions into windows of up to
/// `bptt_length` positions, with the target one step ahead of the source.
///
/// The last position of the chunk is never part of a source range. It is
/// reserved so that the final target stays inside the chunk.
///
/// # Arguments:
/// - `chunk_length`: Number of positions in the chunk
/// - `bptt_length`: Maximum window length. Must be >= 1
///
/// # Example
/// ```text
/// chunk_length = 6, bptt_length = 2
///   source [0, 2)  target [1, 3)
///   source [2, 4)  target [3, 5)
///   source [4, 5)  target [5, 6)   // partial: position 5 is reserved
/// ```
///
/// ```ignore
/// let sampler = BpttSampler::new(6, 2)?;
/// assert_eq!(sampler.len(), 3);
/// for window in sampler.windows() {
///     println!("{:?} -> {:?}", window.source, window.target);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpttSampler {
    chunk_length: usize,
    bptt_length: usize,
}

impl BpttSampler {
    pub fn new(chunk_length: usize, bptt_length: usize) -> Result<Self> {
        ensure_positive("bptt_length", bptt_length)?;
        Ok(Self {
            chunk_length,
            bptt_length,
        })
    }

    /// Builds a sampler spanning the whole of `data`.
    pub fn from_data<D: SequenceLength + ?Sized>(data: &D, bptt_length: usize) -> Result<Self> {
        Self::new(data.sequence_len(), bptt_length)
    }

    pub fn chunk_length(&self) -> usize {
        self.chunk_length
    }

    pub fn bptt_length(&self) -> usize {
        self.bptt_length
    }

    /// Number of windows: `ceil(max(chunk_length - 1, 0) / bptt_length)`.
    pub fn len(&self) -> usize {
        self.chunk_length.saturating_sub(1).div_ceil(self.bptt_length)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a fresh pass over the chunk.
    pub fn windows(&self) -> BpttIter {
        BpttIter {
            position: 0,
            end: self.chunk_length.saturating_sub(1),
            bptt_length: self.bptt_length,
        }
    }
}

impl Sampler for BpttSampler {
    type Item = Window;

    fn iter(&self, _epoch: usize) -> Box<dyn Iterator<Item = Window> + Send + '_> {
        Box::new(self.windows())
    }
}

impl<'a> IntoIterator for &'a BpttSampler {
    type Item = Window;
    type IntoIter = BpttIter;

    fn into_iter(self) -> BpttIter {
        self.windows()
    }
}

/// Iterator over the windows of one chunk. Created by [`BpttSampler::windows`].
#[derive(Debug, Clone)]
pub struct BpttIter {
    position: usize,
    // Exclusive bound on source positions: `chunk_length - 1`.
    end: usize,
    bptt_length: usize,
}

impl Iterator for BpttIter {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.position >= self.end {
            return None;
        }
        let start = self.position;
        let stop = start.saturating_add(self.bptt_length).min(self.end);
        // Advance by the full window length even when this window was cut short.
        self.position = start.saturating_add(self.bptt_length);
        Some(Window::new(start, stop))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .end
            .saturating_sub(self.position)
            .div_ceil(self.bptt_length);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BpttIter {}

impl FusedIterator for BpttIter {}

/// ============================================================================
/// Yields synchronized mini-batches of BPTT windows over one long sequence.
///
/// The sequence is split into `batch_size` contiguous chunks (one per batch
/// row) and each chunk is sliced by its own [`BpttSampler`]. Every batch holds
/// the next window of each chunk, translated into global index space.
///
/// # Arguments:
/// - `length`: Number of positions in the full sequence
/// - `bptt_length`: Maximum window length. Must be >= 1
/// - `batch_size`: Number of chunks. Must be >= 1
/// - `drop_last`: If true, the trailing `length % batch_size` positions are dropped.
///                If false, they are handed out one each to the leading chunks.
///
/// # Chunk allocation
/// - For `length = 100`, `batch_size = 3`, `bptt_length = 2`:
/// ```text
/// Chunks: [0, 34)  [34, 67)  [67, 100)
///
/// Batch 0: [([0, 2), [1, 3)),   ([34, 36), [35, 37)), ([67, 69), [68, 70))]
/// Batch 1: [([2, 4), [3, 5)),   ([36, 38), [37, 39)), ([69, 71), [70, 72))]
/// ...
/// Batch 16: [([32, 33), [33, 34))]   // only chunk 0 still has a window
/// ```
///
/// Chunks that run out of windows early are skipped, so the final batches can
/// be shorter than `batch_size`. Iteration ends once every chunk is exhausted.
///
/// # Restarting
/// Chunk samplers are built once at construction. Each call to `batches()`
/// allocates fresh cursors, so the sampler can be iterated any number of
/// times and independent passes never affect each other. A single
/// `BpttBatchIter` has no internal locking; sharing one pass between threads
/// requires external synchronization.
///
/// # Example
/// ```ignore
/// let sampler = BpttBatchSampler::new(tokens.len(), 35, 20, false)?;
/// for batch in sampler.batches() {
///     for window in &batch {
///         let input = &tokens[window.source.clone()];
///         let label = &tokens[window.target.clone()];
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BpttBatchSampler {
    length: usize,
    bptt_length: usize,
    drop_last: bool,
    chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, Copy)]
struct Chunk {
    partition: Partition,
    sampler: BpttSampler,
}

impl BpttBatchSampler {
    pub fn new(
        length: usize,
        bptt_length: usize,
        batch_size: usize,
        drop_last: bool,
    ) -> Result<Self> {
        ensure_positive("bptt_length", bptt_length)?;

        let chunks = partition(length, batch_size, drop_last)?
            .into_iter()
            .map(|partition| {
                BpttSampler::new(partition.size, bptt_length)
                    .map(|sampler| Chunk { partition, sampler })
            })
            .collect::<Result<Vec<_>>>()?;

        let sampler = Self {
            length,
            bptt_length,
            drop_last,
            chunks,
        };

        debug!(
            length,
            bptt_length,
            batch_size,
            drop_last,
            dropped = sampler.dropped(),
            batches = sampler.len(),
            "built BPTT batch sampler"
        );
        if length > 0 && sampler.chunks.iter().all(|c| c.partition.is_empty()) {
            warn!(
                length,
                batch_size, "drop_last discards every position; the sampler yields no batches"
            );
        }

        Ok(sampler)
    }

    pub fn from_config(length: usize, config: &BpttConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            length,
            config.bptt_length,
            config.batch_size,
            config.drop_last,
        )
    }

    /// Builds a sampler from the length of `data`.
    pub fn from_data<D: SequenceLength + ?Sized>(data: &D, config: &BpttConfig) -> Result<Self> {
        Self::from_config(data.sequence_len(), config)
    }

    /// Declared number of batches, taken from the first chunk.
    ///
    /// The first chunk is never smaller than any other chunk, so this matches
    /// the number of batches a full pass yields.
    pub fn len(&self) -> usize {
        self.chunks.first().map_or(0, |chunk| chunk.sampler.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn bptt_length(&self) -> usize {
        self.bptt_length
    }

    pub fn batch_size(&self) -> usize {
        self.chunks.len()
    }

    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    /// The chunks in batch-row order.
    pub fn partitions(&self) -> impl ExactSizeIterator<Item = Partition> + '_ {
        self.chunks.iter().map(|chunk| chunk.partition)
    }

    /// Number of trailing positions never referenced by any window.
    pub fn dropped(&self) -> usize {
        let covered: usize = self.chunks.iter().map(|chunk| chunk.partition.size).sum();
        self.length - covered
    }

    /// Starts a fresh pass over all chunks.
    pub fn batches(&self) -> BpttBatchIter {
        BpttBatchIter {
            cursors: self
                .chunks
                .iter()
                .map(|chunk| Cursor {
                    offset: chunk.partition.offset,
                    windows: chunk.sampler.windows(),
                    active: true,
                })
                .collect(),
        }
    }
}

impl Sampler for BpttBatchSampler {
    type Item = Batch;

    fn iter(&self, _epoch: usize) -> Box<dyn Iterator<Item = Batch> + Send + '_> {
        Box::new(self.batches())
    }
}

impl<'a> IntoIterator for &'a BpttBatchSampler {
    type Item = Batch;
    type IntoIter = BpttBatchIter;

    fn into_iter(self) -> BpttBatchIter {
        self.batches()
    }
}

/// Iterator over the batches of a [`BpttBatchSampler`]. Created by
/// [`BpttBatchSampler::batches`].
#[derive(Debug, Clone)]
pub struct BpttBatchIter {
    cursors: Vec<Cursor>,
}

/// Per-chunk iteration state. Once `active` is false it stays false.
#[derive(Debug, Clone)]
struct Cursor {
    offset: usize,
    windows: BpttIter,
    active: bool,
}

impl Iterator for BpttBatchIter {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        let mut batch = Vec::with_capacity(self.cursors.len());

        for (index, cursor) in self.cursors.iter_mut().enumerate() {
            if !cursor.active {
                continue;
            }
            match cursor.windows.next() {
                Some(window) => batch.push(window.shifted(cursor.offset)),
                None => {
                    trace!(chunk = index, "chunk exhausted");
                    cursor.active = false;
                }
            }
        }

        // Every chunk is exhausted
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .cursors
            .iter()
            .filter(|cursor| cursor.active)
            .map(|cursor| cursor.windows.len())
            .max()
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BpttBatchIter {}

impl FusedIterator for BpttBatchIter {}
