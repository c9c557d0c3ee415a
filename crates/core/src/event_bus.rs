//! Publish/subscribe bus for lifecycle and error events.
//!
//! Publishers (sources, panels, the orchestrator) never know who listens.
//! Every published event is first appended to a bounded history, then handed
//! synchronously to the handlers registered for its type, in registration
//! order. A failing handler (an `Err` or a panic) does not stop the others;
//! the failure itself becomes a [`EventType::HandlerError`] event.

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::constants::EVENTBUS_SOURCE;
use crate::error::EventBusError;

/// Kind of event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SourceReady,
    SourceInitFailed,
    SourceUnavailable,
    SourceError,
    SourceRecovered,
    SourceStopped,
    PanelFieldMissing,
    LayoutRejected,
    FrameComposed,
    HandlerError,
}

impl EventType {
    /// Error events are never re-dispatched when one of their handlers fails.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            EventType::SourceInitFailed
                | EventType::SourceError
                | EventType::PanelFieldMissing
                | EventType::LayoutRejected
                | EventType::HandlerError
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::SourceReady => "source_ready",
            EventType::SourceInitFailed => "source_init_failed",
            EventType::SourceUnavailable => "source_unavailable",
            EventType::SourceError => "source_error",
            EventType::SourceRecovered => "source_recovered",
            EventType::SourceStopped => "source_stopped",
            EventType::PanelFieldMissing => "panel_field_missing",
            EventType::LayoutRejected => "layout_rejected",
            EventType::FrameComposed => "frame_composed",
            EventType::HandlerError => "handler_error",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    /// ID of the source, panel or component that raised it
    pub source_id: String,
    pub payload: Value,
    /// Dashboard time in milliseconds
    pub timestamp_ms: u64,
}

impl Event {
    pub fn new(
        event_type: EventType,
        source_id: impl Into<String>,
        payload: Value,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            event_type,
            source_id: source_id.into(),
            payload,
            timestamp_ms,
        }
    }
}

/// Subscriber callback. Identity is the `Arc` allocation, so subscribing the
/// same `Handler` twice is a no-op while two separately created handlers
/// with identical code are distinct.
pub type Handler = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure as a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Bounded-history event bus
pub struct EventBus {
    capacity: usize,
    history: Mutex<VecDeque<Event>>,
    handlers: Mutex<HashMap<EventType, Vec<Handler>>>,
}

/// Recover the guard from a poisoned mutex; the data is still consistent
/// because every critical section here is a single push/pop/clone.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}

impl EventBus {
    /// Create a bus keeping at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register `handler` for `event_type`. Returns false if it was already
    /// registered for that type.
    pub fn subscribe(&self, event_type: EventType, handler: Handler) -> bool {
        let mut handlers = relock(&self.handlers);
        let list = handlers.entry(event_type).or_default();
        if list.iter().any(|existing| Arc::ptr_eq(existing, &handler)) {
            return false;
        }
        list.push(handler);
        true
    }

    pub fn unsubscribe(&self, event_type: EventType, handler: &Handler) -> Result<(), EventBusError> {
        let mut handlers = relock(&self.handlers);
        let list = handlers
            .get_mut(&event_type)
            .ok_or(EventBusError::HandlerNotFound(event_type))?;
        let position = list
            .iter()
            .position(|existing| Arc::ptr_eq(existing, handler))
            .ok_or(EventBusError::HandlerNotFound(event_type))?;
        list.remove(position);
        Ok(())
    }

    pub fn subscriber_count(&self, event_type: EventType) -> usize {
        relock(&self.handlers)
            .get(&event_type)
            .map_or(0, Vec::len)
    }

    /// Record `event` and deliver it to its subscribers.
    pub fn publish(&self, event: Event) {
        trace!("Publishing {} from {}", event.event_type, event.source_id);
        self.record(event.clone());

        // Handlers run without any lock held so they may publish themselves.
        let handlers: Vec<Handler> = relock(&self.handlers)
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        for handler in handlers {
            let message = match panic::catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => format!("{e:#}"),
                Err(panic) => panic_message(panic.as_ref()),
            };
            warn!(
                "Handler for {} from {} failed: {}",
                event.event_type, event.source_id, message
            );

            let failure = Event::new(
                EventType::HandlerError,
                EVENTBUS_SOURCE,
                json!({
                    "event_type": event.event_type,
                    "source_id": event.source_id,
                    "error": message,
                }),
                event.timestamp_ms,
            );
            if event.event_type.is_error() {
                self.record(failure);
            } else {
                self.publish(failure);
            }
        }
    }

    fn record(&self, event: Event) {
        let mut history = relock(&self.history);
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(event);
    }

    /// The most recent `limit` events, optionally of one type, oldest first.
    pub fn history(&self, event_type: Option<EventType>, limit: usize) -> Vec<Event> {
        let history = relock(&self.history);
        let matching: Vec<&Event> = history
            .iter()
            .filter(|event| event_type.map_or(true, |t| event.event_type == t))
            .collect();
        let start = matching.len().saturating_sub(limit);
        matching[start..].iter().map(|event| (*event).clone()).collect()
    }

    /// Number of events currently held in history
    pub fn len(&self) -> usize {
        relock(&self.history).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_EVENT_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event(event_type: EventType, n: u64) -> Event {
        Event::new(event_type, "test", json!({ "n": n }), n)
    }

    fn counter() -> (Arc<AtomicUsize>, Handler) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let h = handler(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (count, h)
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let bus = EventBus::new(8);
        let (count, h) = counter();

        assert!(bus.subscribe(EventType::SourceReady, Arc::clone(&h)));
        assert!(!bus.subscribe(EventType::SourceReady, Arc::clone(&h)));
        assert_eq!(bus.subscriber_count(EventType::SourceReady), 1);

        bus.publish(event(EventType::SourceReady, 1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_handler() {
        let bus = EventBus::new(8);
        let (_, h) = counter();
        let (_, other) = counter();

        assert_eq!(
            bus.unsubscribe(EventType::SourceError, &h),
            Err(EventBusError::HandlerNotFound(EventType::SourceError))
        );

        bus.subscribe(EventType::SourceError, Arc::clone(&h));
        assert!(bus.unsubscribe(EventType::SourceError, &other).is_err());
        // Registered for a different type only
        assert!(bus.unsubscribe(EventType::SourceReady, &h).is_err());
        assert!(bus.unsubscribe(EventType::SourceError, &h).is_ok());
        assert_eq!(bus.subscriber_count(EventType::SourceError), 0);
    }

    #[test]
    fn test_all_handlers_run_when_one_fails() {
        let bus = EventBus::new(16);
        let (first, h1) = counter();
        let (third, h3) = counter();
        let (fourth, h4) = counter();

        bus.subscribe(EventType::SourceRecovered, h1);
        bus.subscribe(EventType::SourceRecovered, handler(|_| bail!("boom")));
        bus.subscribe(EventType::SourceRecovered, h3);
        bus.subscribe(EventType::SourceRecovered, handler(|_| panic!("kaboom")));
        bus.subscribe(EventType::SourceRecovered, h4);

        bus.publish(event(EventType::SourceRecovered, 7));

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 1);
        assert_eq!(fourth.load(Ordering::SeqCst), 1);

        let failures = bus.history(Some(EventType::HandlerError), 10);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].source_id, EVENTBUS_SOURCE);
        assert_eq!(failures[0].payload["error"], "boom");
        assert_eq!(failures[1].payload["error"], "handler panicked: kaboom");
    }

    #[test]
    fn test_failing_error_handler_does_not_recurse() {
        let bus = EventBus::new(16);
        let (errors_seen, counting) = counter();
        bus.subscribe(EventType::HandlerError, counting);
        bus.subscribe(EventType::HandlerError, handler(|_| bail!("always")));
        bus.subscribe(EventType::SourceError, handler(|_| bail!("also")));

        bus.publish(event(EventType::SourceError, 1));

        // SourceError is an error type: its handler failure is recorded only.
        assert_eq!(errors_seen.load(Ordering::SeqCst), 0);
        assert_eq!(bus.history(Some(EventType::HandlerError), 10).len(), 1);
    }

    #[test]
    fn test_handler_failure_on_normal_event_is_dispatched_once() {
        let bus = EventBus::new(16);
        let (errors_seen, counting) = counter();
        bus.subscribe(EventType::HandlerError, counting);
        bus.subscribe(EventType::HandlerError, handler(|_| bail!("error handler broken")));
        bus.subscribe(EventType::FrameComposed, handler(|_| bail!("broken")));

        bus.publish(event(EventType::FrameComposed, 1));

        assert_eq!(errors_seen.load(Ordering::SeqCst), 1);
        // One for the frame handler, one recorded for the broken error handler
        assert_eq!(bus.history(Some(EventType::HandlerError), 10).len(), 2);
    }

    #[test]
    fn test_history_is_bounded_fifo() {
        let bus = EventBus::new(5);
        for n in 0..12 {
            bus.publish(event(EventType::FrameComposed, n));
            assert!(bus.len() <= 5);
        }

        let all = bus.history(None, 100);
        let ns: Vec<u64> = all.iter().map(|e| e.timestamp_ms).collect();
        assert_eq!(ns, vec![7, 8, 9, 10, 11]);

        let last_two: Vec<u64> = bus.history(None, 2).iter().map(|e| e.timestamp_ms).collect();
        assert_eq!(last_two, vec![10, 11]);
    }

    #[test]
    fn test_history_filters_by_type() {
        let bus = EventBus::new(10);
        bus.publish(event(EventType::SourceReady, 1));
        bus.publish(event(EventType::SourceError, 2));
        bus.publish(event(EventType::SourceReady, 3));

        let ready = bus.history(Some(EventType::SourceReady), 10);
        assert_eq!(ready.len(), 2);
        assert!(ready.iter().all(|e| e.event_type == EventType::SourceReady));
        assert!(bus.history(Some(EventType::SourceStopped), 10).is_empty());
    }

    #[test]
    fn test_handler_may_publish() {
        let bus = Arc::new(EventBus::new(10));
        let inner = Arc::clone(&bus);
        bus.subscribe(
            EventType::SourceError,
            handler(move |e| {
                inner.publish(Event::new(EventType::FrameComposed, "relay", json!(null), e.timestamp_ms));
                Ok(())
            }),
        );

        bus.publish(event(EventType::SourceError, 4));
        assert_eq!(bus.history(Some(EventType::FrameComposed), 10).len(), 1);
    }

    #[test]
    fn test_error_classification() {
        assert!(EventType::SourceError.is_error());
        assert!(EventType::HandlerError.is_error());
        assert!(!EventType::SourceRecovered.is_error());
        assert!(!EventType::FrameComposed.is_error());
        assert_eq!(
            serde_json::to_string(&EventType::PanelFieldMissing).unwrap(),
            "\"panel_field_missing\""
        );
    }
}
