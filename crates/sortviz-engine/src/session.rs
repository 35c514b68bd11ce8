use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::algorithms::Algorithm;
use crate::config::SpeedSetting;
use crate::engine::SortEngine;
use crate::error::EngineError;
use crate::events::{ChannelObserver, SortEvent};
use crate::pacing::{CancelToken, Pacer, SpeedControl, ThreadPacer};

/// Builds the delay provider for each new run.
pub type PacerFactory = Arc<dyn Fn() -> Box<dyn Pacer> + Send + Sync>;

/// Messages delivered to renderers while a run executes on the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMessage {
    Started {
        algorithm: Algorithm,
        values: Vec<u32>,
    },
    Step(SortEvent<u32>),
    Finished {
        algorithm: Algorithm,
        cancelled: bool,
        values: Vec<u32>,
    },
}

struct ActiveRun {
    algorithm: Algorithm,
    cancel: CancelToken,
    handle: JoinHandle<Result<(), EngineError>>,
}

/// Clears the run-in-progress flag when dropped. The worker drops it before
/// reporting `Finished`, and unwinding drops it on a panic.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs one algorithm at a time on a background worker.
///
/// The worker holds the engine lock for the whole run, so the sequence has a
/// single writer. Notifications reach the renderer through [`Self::events`],
/// on a channel that belongs to one run. A start request while a run is
/// active is rejected rather than queued.
pub struct SortSession {
    engine: Arc<Mutex<SortEngine>>,
    speed: SpeedControl,
    active: Arc<AtomicBool>,
    current: Option<ActiveRun>,
    next_events: (Sender<RunMessage>, Receiver<RunMessage>),
    pacer_factory: PacerFactory,
}

impl fmt::Debug for SortSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSession")
            .field("running", &self.is_running())
            .field("speed", &self.speed.setting())
            .finish_non_exhaustive()
    }
}

impl SortSession {
    /// Paces runs with real sleeps.
    pub fn new(engine: SortEngine) -> Self {
        Self::with_pacer(engine, Arc::new(|| Box::new(ThreadPacer) as Box<dyn Pacer>))
    }

    pub fn with_pacer(engine: SortEngine, pacer_factory: PacerFactory) -> Self {
        Self {
            speed: engine.speed(),
            engine: Arc::new(Mutex::new(engine)),
            active: Arc::new(AtomicBool::new(false)),
            current: None,
            next_events: crossbeam_channel::unbounded(),
            pacer_factory,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Receiver for the notifications of the next run started on this
    /// session. Subscribe again for every run; a run nobody subscribed to
    /// queues nothing.
    pub fn events(&self) -> Receiver<RunMessage> {
        self.next_events.1.clone()
    }

    pub fn speed(&self) -> SpeedControl {
        self.speed.clone()
    }

    /// Takes effect at the next suspension point of an active run.
    pub fn set_speed(&self, setting: SpeedSetting) {
        self.speed.set(setting);
    }

    pub fn start(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(%algorithm, "start rejected: a run is already active");
            return Err(EngineError::ConcurrentRunRejected);
        }
        let guard = RunGuard(Arc::clone(&self.active));

        if let Some(previous) = self.current.take() {
            // The flag was clear, so the previous worker has released the
            // engine and is at most sending its last message.
            if previous.handle.join().is_err() {
                error!(algorithm = %previous.algorithm, "previous sort worker panicked");
            }
        }

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let engine = Arc::clone(&self.engine);
        // The session keeps no receiver for a started run.
        let (tx, _) = std::mem::replace(&mut self.next_events, crossbeam_channel::unbounded());
        let factory = Arc::clone(&self.pacer_factory);

        let handle = thread::Builder::new()
            .name(format!("sortviz-{algorithm}"))
            .spawn(move || {
                let (result, values) = {
                    let mut engine = engine.lock();
                    let _ = tx.send(RunMessage::Started {
                        algorithm,
                        values: engine.sequence().to_vec(),
                    });
                    let mut observer = ChannelObserver::new(tx.clone(), RunMessage::Step);
                    let mut pacer = factory();
                    let result =
                        engine.run(algorithm, &mut observer, pacer.as_mut(), &worker_cancel);
                    (result, engine.sequence().to_vec())
                };
                // Idle before `Finished` goes out, so a receiver may start the
                // next run straight away.
                drop(guard);
                let _ = tx.send(RunMessage::Finished {
                    algorithm,
                    cancelled: matches!(result, Err(EngineError::Cancelled)),
                    values,
                });
                result
            })
            .map_err(|err| EngineError::WorkerSpawn(err.to_string()))?;

        debug!(%algorithm, "sort worker spawned");
        self.current = Some(ActiveRun {
            algorithm,
            cancel,
            handle,
        });
        Ok(())
    }

    /// Requests cancellation of the active run. The worker stops at its next
    /// suspension point.
    pub fn cancel(&self) {
        if let Some(run) = &self.current {
            debug!(algorithm = %run.algorithm, "cancelling sort run");
            run.cancel.cancel();
        }
    }

    /// Blocks until the current run ends and returns its result. Returns
    /// `Ok(())` when no run was started.
    pub fn wait(&mut self) -> Result<(), EngineError> {
        match self.current.take() {
            Some(run) => run.handle.join().map_err(|_| EngineError::WorkerPanicked)?,
            None => Ok(()),
        }
    }

    /// Regenerates the sequence. Rejected while a run is active.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.ensure_idle("reset")?;
        self.engine.lock().reset();
        Ok(())
    }

    pub fn set_size(&mut self, size: usize) -> Result<(), EngineError> {
        self.ensure_idle("resize")?;
        self.engine.lock().set_size(size)
    }

    pub fn load(&mut self, values: Vec<u32>) -> Result<(), EngineError> {
        self.ensure_idle("load")?;
        self.engine.lock().load(values);
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Vec<u32>, EngineError> {
        self.ensure_idle("snapshot")?;
        Ok(self.engine.lock().sequence().to_vec())
    }

    fn ensure_idle(&self, request: &'static str) -> Result<(), EngineError> {
        if self.is_running() {
            warn!(request, "request rejected: a run is active");
            return Err(EngineError::ConcurrentRunRejected);
        }
        Ok(())
    }
}

impl Drop for SortSession {
    fn drop(&mut self) {
        if let Some(run) = self.current.take() {
            run.cancel.cancel();
            if run.handle.join().is_err() {
                error!(algorithm = %run.algorithm, "failed to join sort worker");
            }
        }
    }
}
