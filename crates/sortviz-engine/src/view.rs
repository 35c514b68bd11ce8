use std::collections::BTreeSet;

use crate::error::EngineError;
use crate::events::{SortEvent, SortObserver};

/// Renderer-side mirror of the sequence: one bar height per index plus the
/// set of bars currently under comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarView {
    heights: Vec<u32>,
    highlighted: BTreeSet<usize>,
    rejected: usize,
}

impl BarView {
    pub fn new(heights: Vec<u32>) -> Self {
        Self {
            heights,
            highlighted: BTreeSet::new(),
            rejected: 0,
        }
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = usize> + '_ {
        self.highlighted.iter().copied()
    }

    pub fn max_height(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Replaces every bar, clearing highlights.
    pub fn replace(&mut self, heights: Vec<u32>) {
        self.heights = heights;
        self.highlighted.clear();
    }

    pub fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    /// Events that referenced bars outside the view while observing.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn apply(&mut self, event: SortEvent<u32>) -> Result<(), EngineError> {
        match event {
            SortEvent::Compare { a, b } => {
                self.check(a)?;
                self.check(b)?;
                self.highlighted.insert(a);
                self.highlighted.insert(b);
            }
            SortEvent::Settle { a, b } => {
                self.check(a)?;
                self.check(b)?;
                self.highlighted.remove(&a);
                self.highlighted.remove(&b);
            }
            SortEvent::ValueChanged { index, value } => {
                self.check(index)?;
                self.heights[index] = value;
            }
        }
        Ok(())
    }

    fn check(&self, index: usize) -> Result<(), EngineError> {
        if index < self.heights.len() {
            Ok(())
        } else {
            Err(EngineError::IndexOutOfRange {
                index,
                len: self.heights.len(),
            })
        }
    }
}

impl SortObserver<u32> for BarView {
    fn notify(&mut self, event: SortEvent<u32>) {
        if self.apply(event).is_err() {
            self.rejected += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_and_settle_toggle_highlights() {
        let mut view = BarView::new(vec![5, 3, 8]);
        view.apply(SortEvent::Compare { a: 0, b: 1 }).unwrap();
        assert!(view.is_highlighted(0) && view.is_highlighted(1));
        view.apply(SortEvent::Settle { a: 0, b: 1 }).unwrap();
        assert_eq!(view.highlighted().count(), 0);
    }

    #[test]
    fn value_changes_update_heights() {
        let mut view = BarView::new(vec![5, 3, 8]);
        view.apply(SortEvent::ValueChanged { index: 0, value: 3 })
            .unwrap();
        view.apply(SortEvent::ValueChanged { index: 1, value: 5 })
            .unwrap();
        assert_eq!(view.heights(), &[3, 5, 8]);
        assert_eq!(view.max_height(), 8);
    }

    #[test]
    fn out_of_range_events_are_rejected() {
        let mut view = BarView::new(vec![1]);
        assert_eq!(
            view.apply(SortEvent::Compare { a: 0, b: 4 }),
            Err(EngineError::IndexOutOfRange { index: 4, len: 1 })
        );
        view.notify(SortEvent::ValueChanged { index: 9, value: 1 });
        assert_eq!(view.rejected(), 1);
        assert_eq!(view.heights(), &[1]);
        assert!(!view.is_highlighted(0));
    }
}
