//! src/window.rs
//!
//! Index-range value types emitted by the samplers.

use std::ops::Range;

/// One BPTT training step: a `source` range and a `target` range shifted
/// one position ahead.
///
/// Both ranges are half-open and always have the same length:
/// - `target.start == source.start + 1`
/// - `target.stop  == source.stop + 1`
///
/// Windows carry indices only. Callers use them to slice their own data:
/// ```ignore
/// let tokens: Vec<u32> = load_tokens();
/// for window in BpttSampler::new(tokens.len(), 35)?.iter() {
///     let input = &tokens[window.source.clone()];
///     let label = &tokens[window.target.clone()];
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Window {
    pub source: Range<usize>,
    pub target: Range<usize>,
}

impl Window {
    /// Builds the window whose source covers `[start, stop)`.
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop, "window start {start} exceeds stop {stop}");
        Self {
            source: start..stop,
            target: start + 1..stop + 1,
        }
    }

    /// Translates both ranges by `offset` positions.
    pub fn shifted(&self, offset: usize) -> Self {
        Self::new(self.source.start + offset, self.source.end + offset)
    }

    /// Number of positions covered by the source (and target) range.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl From<Window> for (Range<usize>, Range<usize>) {
    fn from(window: Window) -> Self {
        (window.source, window.target)
    }
}

/// One synchronized step across all still-active partitions, in partition order.
pub type Batch = Vec<Window>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_one_step_ahead() {
        let window = Window::new(4, 9);
        assert_eq!(window.source, 4..9);
        assert_eq!(window.target, 5..10);
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn shift_moves_both_ranges() {
        let window = Window::new(0, 2).shifted(34);
        assert_eq!(window, Window::new(34, 36));
        assert_eq!(window.target, 35..37);
    }

    #[test]
    fn converts_into_range_pair() {
        let pair: (Range<usize>, Range<usize>) = Window::new(2, 4).into();
        assert_eq!(pair, (2..4, 3..5));
    }
}
