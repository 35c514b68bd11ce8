use tracing::{debug, warn};

use crate::algorithms::Algorithm;
use crate::config::{validate_size, EngineConfig, SpeedSetting};
use crate::error::EngineError;
use crate::events::{NullObserver, SortObserver};
use crate::pacing::{CancelToken, NoopPacer, Pacer, SpeedControl};
use crate::sequence::{RandomSource, SequenceSource};
use crate::step::StepContext;

/// Owns the sequence being sorted together with its size and speed.
///
/// Runs execute synchronously on the calling thread; see
/// [`SortSession`](crate::SortSession) for a background worker.
pub struct SortEngine {
    config: EngineConfig,
    values: Vec<u32>,
    speed: SpeedControl,
    source: Box<dyn SequenceSource>,
}

impl SortEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let source: Box<dyn SequenceSource> = match config.seed {
            Some(seed) => Box::new(RandomSource::seeded(config.value_range, seed)),
            None => Box::new(RandomSource::new(config.value_range)),
        };
        Self::with_source(config, source)
    }

    pub fn with_source(
        config: EngineConfig,
        mut source: Box<dyn SequenceSource>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let values = source.generate(config.size);
        Ok(Self {
            speed: SpeedControl::new(config.speed),
            config,
            values,
            source,
        })
    }

    /// Current configuration, with the speed read from the live control.
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            speed: self.speed.setting(),
            ..self.config.clone()
        }
    }

    pub fn sequence(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces the sequence with explicit values. Any length is accepted,
    /// including zero.
    pub fn load(&mut self, values: Vec<u32>) {
        debug!(len = values.len(), "sequence loaded");
        self.values = values;
    }

    /// Regenerates the sequence at the configured size.
    pub fn reset(&mut self) {
        self.values = self.source.generate(self.config.size);
        debug!(len = self.values.len(), "sequence regenerated");
    }

    /// Changes the size and regenerates. Rejected sizes leave the engine
    /// untouched.
    pub fn set_size(&mut self, size: usize) -> Result<(), EngineError> {
        if let Err(err) = validate_size(size) {
            warn!(size, "rejected sequence size");
            return Err(err);
        }
        self.config.size = size;
        self.reset();
        Ok(())
    }

    /// Applies to the next suspension point, including one inside a run that
    /// is already executing elsewhere through a cloned [`SpeedControl`].
    pub fn set_speed(&self, setting: SpeedSetting) {
        self.speed.set(setting);
    }

    /// Shared speed handle for controls living on other threads.
    pub fn speed(&self) -> SpeedControl {
        self.speed.clone()
    }

    pub fn run(
        &mut self,
        algorithm: Algorithm,
        observer: &mut dyn SortObserver<u32>,
        pacer: &mut dyn Pacer,
        cancel: &CancelToken,
    ) -> Result<(), EngineError> {
        debug!(%algorithm, len = self.values.len(), "sort run started");
        let speed = self.speed.clone();
        let mut ctx = StepContext::new(&mut self.values, observer, pacer, &speed, cancel);
        let result = algorithm.sort(&mut ctx);
        match &result {
            Ok(()) => debug!(%algorithm, "sort run finished"),
            Err(EngineError::Cancelled) => debug!(%algorithm, "sort run cancelled"),
            Err(err) => warn!(%algorithm, %err, "sort run failed"),
        }
        result
    }

    /// Runs to completion without delays or notifications.
    pub fn sort_instantly(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        self.run(
            algorithm,
            &mut NullObserver,
            &mut NoopPacer,
            &CancelToken::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::pacing::RecordingPacer;
    use crate::sequence::FixedSource;

    fn engine_with(values: Vec<u32>) -> SortEngine {
        let config = EngineConfig::default().with_size(values.len().max(1));
        let mut engine =
            SortEngine::with_source(config, Box::new(FixedSource::new(values.clone()))).unwrap();
        engine.load(values);
        engine
    }

    #[test]
    fn new_engine_generates_configured_size() {
        let engine = SortEngine::new(EngineConfig::default().with_seed(3)).unwrap();
        assert_eq!(engine.len(), 50);
        assert!(engine.sequence().iter().all(|value| (1..=250).contains(value)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = SortEngine::new(EngineConfig::default().with_size(0));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration { field: "size", .. })
        ));
    }

    #[test]
    fn set_size_regenerates_and_rejects_out_of_range() {
        let mut engine = engine_with(vec![4, 2, 7]);
        engine.set_size(5).unwrap();
        assert_eq!(engine.sequence(), &[4, 2, 7, 4, 2]);

        let before = engine.sequence().to_vec();
        assert!(engine.set_size(501).is_err());
        assert_eq!(engine.sequence(), before.as_slice());
        assert_eq!(engine.config().size, 5);
    }

    #[test]
    fn run_uses_live_speed() {
        let mut engine = engine_with(vec![3, 2, 1]);
        engine.set_speed(SpeedSetting::new(100).unwrap());
        assert_eq!(engine.config().speed.get(), 100);
        let mut pacer = RecordingPacer::new();
        let mut log = EventLog::new();
        engine
            .run(Algorithm::Bubble, &mut log, &mut pacer, &CancelToken::new())
            .unwrap();
        assert_eq!(engine.sequence(), &[1, 2, 3]);
        assert_eq!(pacer.pauses(), 3);
        assert!(pacer
            .delays()
            .iter()
            .all(|delay| delay.as_millis() == 1));
    }

    #[test]
    fn heap_sort_pauses_while_building_the_heap() {
        let mut engine = engine_with(vec![5, 3, 8, 1]);
        let mut pacer = RecordingPacer::new();
        let mut log = EventLog::new();
        engine
            .run(Algorithm::Heap, &mut log, &mut pacer, &CancelToken::new())
            .unwrap();
        // One pause per compare, build phase included, plus one before each
        // of the three extractions.
        assert_eq!(log.compares(), 8);
        assert_eq!(pacer.pauses(), 11);
    }

    #[test]
    fn cancelled_run_reports_cancellation() {
        let mut engine = engine_with(vec![5, 4, 3, 2, 1]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut log = EventLog::new();
        let result = engine.run(Algorithm::Quick, &mut log, &mut NoopPacer, &cancel);
        assert_eq!(result, Err(EngineError::Cancelled));
        assert!(log.is_empty());
        assert_eq!(engine.sequence(), &[5, 4, 3, 2, 1]);
    }

    #[test]
    fn sort_instantly_sorts() {
        let mut engine = engine_with(vec![9, 1, 8, 2, 7, 3]);
        engine.sort_instantly(Algorithm::Heap).unwrap();
        assert_eq!(engine.sequence(), &[1, 2, 3, 7, 8, 9]);
    }
}
