//! Step pacing: the live speed setting, the delay provider and the
//! cancellation token consulted at every suspension point.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::SpeedSetting;

const SLEEP_SLICE: Duration = Duration::from_millis(5);

/// Shared handle to the live speed setting.
///
/// Clones observe the same value, so controls can retune a run that is
/// already executing on another thread.
#[derive(Debug, Clone)]
pub struct SpeedControl {
    setting: Arc<AtomicU8>,
}

impl SpeedControl {
    pub fn new(setting: SpeedSetting) -> Self {
        Self {
            setting: Arc::new(AtomicU8::new(setting.get())),
        }
    }

    pub fn setting(&self) -> SpeedSetting {
        // Only validated settings are ever stored.
        SpeedSetting::new(self.setting.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn set(&self, setting: SpeedSetting) {
        self.setting.store(setting.get(), Ordering::Release);
    }

    /// Delay for the next suspension point.
    pub fn delay(&self) -> Duration {
        self.setting().delay()
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new(SpeedSetting::default())
    }
}

/// Cooperative cancellation flag for a single run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Delay provider invoked at each suspension point.
pub trait Pacer: Send {
    fn pause(&mut self, delay: Duration, cancel: &CancelToken);
}

/// Sleeps on the calling thread, waking early when the run is cancelled.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration, cancel: &CancelToken) {
        let deadline = Instant::now() + delay;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPacer;

impl Pacer for NoopPacer {
    fn pause(&mut self, _delay: Duration, _cancel: &CancelToken) {}
}

/// Records every requested delay without waiting.
///
/// Clones share the same record, which lets a test keep one handle while the
/// session owns another.
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }

    pub fn pauses(&self) -> usize {
        self.delays.lock().len()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration, _cancel: &CancelToken) {
        self.delays.lock().push(delay);
    }
}
