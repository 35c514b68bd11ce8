//! Sortviz Engine
//! ==============
//! Step-by-step execution of classical comparison sorts for visualization.
//! Every algorithm mutates the sequence through a shared set of primitives
//! that pace the run and report each compare, change and settle to an
//! observer, so a renderer can animate the sort at a controllable speed.

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod pacing;
pub mod sequence;
pub mod session;
pub mod step;
pub mod view;

pub use algorithms::Algorithm;
pub use config::{EngineConfig, SpeedSetting, ValueRange, MAX_SIZE, MIN_SIZE};
pub use engine::SortEngine;
pub use error::EngineError;
pub use events::{ChannelObserver, EventLog, NullObserver, SortEvent, SortObserver};
pub use pacing::{CancelToken, NoopPacer, Pacer, RecordingPacer, SpeedControl, ThreadPacer};
pub use sequence::{FixedSource, RandomSource, SequenceSource};
pub use session::{PacerFactory, RunMessage, SortSession};
pub use step::StepContext;
pub use view::BarView;

/// Sorts `values` in place with `algorithm`, without pacing, and returns the
/// notifications the run produced.
pub fn trace<T: Ord + Copy>(
    algorithm: Algorithm,
    values: &mut [T],
) -> Result<EventLog<T>, EngineError> {
    let mut log = EventLog::new();
    let speed = SpeedControl::default();
    let cancel = CancelToken::new();
    let mut pacer = NoopPacer;
    let mut ctx = StepContext::new(values, &mut log, &mut pacer, &speed, &cancel);
    algorithm.sort(&mut ctx)?;
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_sorts_and_records() {
        let mut values = [5, 3, 8, 1];
        let log = trace(Algorithm::Bubble, &mut values).unwrap();
        assert_eq!(values, [1, 3, 5, 8]);
        assert_eq!(log.compares(), 6);
    }
}
