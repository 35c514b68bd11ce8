use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// Notification emitted by a sort run for each unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortEvent<T> {
    /// Two indices are under examination.
    Compare { a: usize, b: usize },
    /// The element stored at `index` now holds `value`.
    ValueChanged { index: usize, value: T },
    /// The two indices are no longer under examination.
    Settle { a: usize, b: usize },
}

impl<T> SortEvent<T> {
    pub fn is_compare(&self) -> bool {
        matches!(self, SortEvent::Compare { .. })
    }

    pub fn is_value_change(&self) -> bool {
        matches!(self, SortEvent::ValueChanged { .. })
    }

    pub fn is_settle(&self) -> bool {
        matches!(self, SortEvent::Settle { .. })
    }
}

/// Subscriber for run notifications. Renderers and tests both implement it.
pub trait SortObserver<T> {
    fn notify(&mut self, event: SortEvent<T>);
}

impl<T, F> SortObserver<T> for F
where
    F: FnMut(SortEvent<T>),
{
    fn notify(&mut self, event: SortEvent<T>) {
        self(event)
    }
}

/// Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl<T> SortObserver<T> for NullObserver {
    fn notify(&mut self, _event: SortEvent<T>) {}
}

/// Records notifications in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<T> {
    events: Vec<SortEvent<T>>,
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<T> EventLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SortEvent<T>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SortEvent<T>> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn compares(&self) -> usize {
        self.events.iter().filter(|event| event.is_compare()).count()
    }

    pub fn value_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.is_value_change())
            .count()
    }

    pub fn settles(&self) -> usize {
        self.events.iter().filter(|event| event.is_settle()).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> SortObserver<T> for EventLog<T> {
    fn notify(&mut self, event: SortEvent<T>) {
        self.events.push(event);
    }
}

/// Forwards notifications into a channel, wrapping each one with `wrap`.
///
/// Used when the run executes on a worker thread and the renderer lives
/// elsewhere. A disconnected receiver is not an error: the run keeps going
/// and the notifications are discarded.
pub struct ChannelObserver<M, W> {
    sender: Sender<M>,
    wrap: W,
}

impl<M, W> ChannelObserver<M, W> {
    pub fn new(sender: Sender<M>, wrap: W) -> Self {
        Self { sender, wrap }
    }
}

impl<T, M, W> SortObserver<T> for ChannelObserver<M, W>
where
    W: FnMut(SortEvent<T>) -> M,
{
    fn notify(&mut self, event: SortEvent<T>) {
        let message = (self.wrap)(event);
        let _ = self.sender.send(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_log_counts_by_kind() {
        let mut log = EventLog::new();
        log.notify(SortEvent::Compare { a: 0, b: 1 });
        log.notify(SortEvent::ValueChanged { index: 0, value: 4u32 });
        log.notify(SortEvent::ValueChanged { index: 1, value: 9u32 });
        log.notify(SortEvent::Settle { a: 0, b: 1 });
        assert_eq!(log.compares(), 1);
        assert_eq!(log.value_changes(), 2);
        assert_eq!(log.settles(), 1);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn closures_observe_events() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: SortEvent<u32>| seen.push(event);
            observer.notify(SortEvent::Settle { a: 2, b: 3 });
        }
        assert_eq!(seen, vec![SortEvent::Settle { a: 2, b: 3 }]);
    }

    #[test]
    fn channel_observer_survives_disconnect() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut observer = ChannelObserver::new(tx, |event: SortEvent<u32>| event);
        observer.notify(SortEvent::Compare { a: 1, b: 2 });
        assert_eq!(rx.try_recv().unwrap(), SortEvent::Compare { a: 1, b: 2 });
        drop(rx);
        observer.notify(SortEvent::Compare { a: 3, b: 4 });
    }

    #[test]
    fn events_serialize_with_kind_tag() {
        let json = serde_json::to_string(&SortEvent::ValueChanged {
            index: 3,
            value: 17u32,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"value_changed","index":3,"value":17}"#);
    }
}
