use crate::error::EngineError;
use crate::events::{SortEvent, SortObserver};
use crate::pacing::{CancelToken, Pacer, SpeedControl};

/// Shared primitives every algorithm is written against.
///
/// The context is the only path through which a run touches the sequence, so
/// every mutation is bounds-checked and mirrored to the observer.
pub struct StepContext<'a, T> {
    values: &'a mut [T],
    observer: &'a mut dyn SortObserver<T>,
    pacer: &'a mut dyn Pacer,
    speed: &'a SpeedControl,
    cancel: &'a CancelToken,
}

impl<'a, T> StepContext<'a, T>
where
    T: Ord + Copy,
{
    pub fn new(
        values: &'a mut [T],
        observer: &'a mut dyn SortObserver<T>,
        pacer: &'a mut dyn Pacer,
        speed: &'a SpeedControl,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            values,
            observer,
            pacer,
            speed,
            cancel,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Suspension point. The delay is read from the speed control on every
    /// call.
    pub fn pause(&mut self) -> Result<(), EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        self.pacer.pause(self.speed.delay(), self.cancel);
        if self.cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        Ok(())
    }

    pub fn value(&self, index: usize) -> Result<T, EngineError> {
        self.values
            .get(index)
            .copied()
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    pub fn compare(&mut self, a: usize, b: usize) -> Result<(), EngineError> {
        self.check(a)?;
        self.check(b)?;
        self.observer.notify(SortEvent::Compare { a, b });
        Ok(())
    }

    pub fn settle(&mut self, a: usize, b: usize) -> Result<(), EngineError> {
        self.check(a)?;
        self.check(b)?;
        self.observer.notify(SortEvent::Settle { a, b });
        Ok(())
    }

    /// Exchanges two elements. Elements that compare equal still trade
    /// places in storage but produce no notifications.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), EngineError> {
        let left = self.value(a)?;
        let right = self.value(b)?;
        if a == b {
            return Ok(());
        }
        self.values.swap(a, b);
        if left != right {
            self.observer.notify(SortEvent::ValueChanged {
                index: a,
                value: right,
            });
            self.observer.notify(SortEvent::ValueChanged {
                index: b,
                value: left,
            });
        }
        Ok(())
    }

    /// Stores `value` at `index`, notifying only when it differs from the
    /// element it replaces.
    pub fn write(&mut self, index: usize, value: T) -> Result<(), EngineError> {
        let current = self.value(index)?;
        self.values[index] = value;
        if current != value {
            self.observer
                .notify(SortEvent::ValueChanged { index, value });
        }
        Ok(())
    }

    /// Copies `range` out of the sequence for algorithms that merge through
    /// scratch buffers.
    pub fn copy_range(&self, start: usize, end: usize) -> Result<Vec<T>, EngineError> {
        if start > end {
            return Err(EngineError::IndexOutOfRange {
                index: start,
                len: self.values.len(),
            });
        }
        self.values
            .get(start..end)
            .map(|slice| slice.to_vec())
            .ok_or(EngineError::IndexOutOfRange {
                index: end,
                len: self.values.len(),
            })
    }

    fn check(&self, index: usize) -> Result<(), EngineError> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(EngineError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
        }
    }
}
