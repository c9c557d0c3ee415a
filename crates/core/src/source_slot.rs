//! Scheduling and auto-recovery wrapper around one data source.

use arc_swap::ArcSwap;
use log::{debug, error, info, trace, warn};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tickboard_types::{FieldMetadata, FieldSelector, Snapshot};

use crate::cadence::Cadence;
use crate::data_source::{BoxedDataSource, SourceMetadata};
use crate::error::{CoreError, InitError};
use crate::event_bus::{Event, EventBus, EventType};

/// Lifecycle status of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Uninitialized,
    /// Initialized, no successful poll yet
    Ready,
    /// Last poll succeeded
    Running,
    /// Last poll (or init) failed
    Error,
    /// Terminal
    Stopped,
    /// Cannot run on this system; never polled
    Unavailable(String),
}

impl SourceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SourceStatus::Uninitialized => "uninitialized",
            SourceStatus::Ready => "ready",
            SourceStatus::Running => "running",
            SourceStatus::Error => "error",
            SourceStatus::Stopped => "stopped",
            SourceStatus::Unavailable(_) => "unavailable",
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceStatus::Unavailable(reason) => write!(f, "unavailable ({reason})"),
            other => f.write_str(other.label()),
        }
    }
}

/// A data source together with its cadence, status and current snapshot.
///
/// The snapshot is only ever replaced, never mutated: a successful poll
/// swaps in a new `Arc<Snapshot>` and readers holding the old one keep a
/// consistent view. A failed poll leaves the previous snapshot in place.
pub struct SourceSlot {
    id: String,
    source: BoxedDataSource,
    cadence: Cadence,
    enabled: bool,
    /// Set once `init` succeeds; a source whose init failed is never polled
    initialized: bool,
    status: SourceStatus,
    error_count: u64,
    consecutive_error_count: u64,
    last_error: Option<String>,
    last_poll_time: Option<u64>,
    snapshot: ArcSwap<Snapshot>,
}

impl SourceSlot {
    pub fn new(id: impl Into<String>, source: BoxedDataSource, cadence_ms: u64) -> Self {
        Self {
            id: id.into(),
            source,
            cadence: Cadence::new(cadence_ms),
            enabled: true,
            initialized: false,
            status: SourceStatus::Uninitialized,
            error_count: 0,
            consecutive_error_count: 0,
            last_error: None,
            last_poll_time: None,
            snapshot: ArcSwap::from_pointee(Snapshot::empty()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &SourceMetadata {
        self.source.metadata()
    }

    pub fn fields(&self) -> Vec<FieldMetadata> {
        self.source.fields()
    }

    /// Check that `selector` names a field this source declares.
    ///
    /// Returns the declaration when there is one to check against, `None`
    /// for the whole-snapshot selector or a source without declared fields.
    pub fn check_field(
        &self,
        panel: &str,
        selector: &FieldSelector,
    ) -> Result<Option<FieldMetadata>, CoreError> {
        let FieldSelector::Field(name) = selector else {
            return Ok(None);
        };
        let declared = self.fields();
        if declared.is_empty() {
            return Ok(None);
        }
        match FieldMetadata::find(&declared, name) {
            Some(field) => Ok(Some(field.clone())),
            None => Err(CoreError::UnknownField {
                panel: panel.to_string(),
                source_id: self.id.clone(),
                field: name.clone(),
                declared: declared
                    .iter()
                    .map(|field| field.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    pub fn status(&self) -> &SourceStatus {
        &self.status
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn consecutive_error_count(&self) -> u64 {
        self.consecutive_error_count
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Time of the last successful poll
    pub fn last_poll_time(&self) -> Option<u64> {
        self.last_poll_time
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled sources stay in place but are skipped without touching
    /// their timers.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The current snapshot (empty before the first successful poll)
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Run the source's one-time init. Failure is reported once and leaves
    /// the source permanently out of the schedule.
    pub fn init(&mut self, bus: &EventBus, now: u64) -> bool {
        if self.status != SourceStatus::Uninitialized {
            return self.initialized;
        }

        match self.source.init() {
            Ok(()) => {
                self.initialized = true;
                self.status = SourceStatus::Ready;
                info!("Source {} ready (cadence {}ms)", self.id, self.cadence.interval_ms());
                bus.publish(Event::new(
                    EventType::SourceReady,
                    &self.id,
                    json!({ "cadence_ms": self.cadence.interval_ms() }),
                    now,
                ));
            }
            Err(InitError::Unavailable(reason)) => {
                warn!("Source {} unavailable: {}", self.id, reason);
                bus.publish(Event::new(
                    EventType::SourceUnavailable,
                    &self.id,
                    json!({ "reason": reason }),
                    now,
                ));
                self.status = SourceStatus::Unavailable(reason);
            }
            Err(InitError::Failed(message)) => {
                error!("Source {} failed to initialize: {}", self.id, message);
                bus.publish(Event::new(
                    EventType::SourceInitFailed,
                    &self.id,
                    json!({ "error": message }),
                    now,
                ));
                self.error_count += 1;
                self.last_error = Some(message);
                self.status = SourceStatus::Error;
            }
        }
        self.initialized
    }

    pub fn due(&self, now: u64) -> bool {
        self.enabled
            && self.initialized
            && !matches!(
                self.status,
                SourceStatus::Stopped | SourceStatus::Unavailable(_)
            )
            && self.cadence.due(now)
    }

    /// Poll the source, isolating any failure.
    ///
    /// Returns the new snapshot on success and `None` when the poll was
    /// skipped or failed. A success always clears the error streak.
    pub fn poll_safe(&mut self, now: u64, bus: &EventBus) -> Option<Arc<Snapshot>> {
        if !self.enabled {
            trace!("Source {} disabled, skipping", self.id);
            return None;
        }
        if !self.initialized
            || matches!(
                self.status,
                SourceStatus::Stopped | SourceStatus::Unavailable(_)
            )
        {
            return None;
        }

        match self.source.poll() {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot.store(Arc::clone(&snapshot));
                // Only a success starts a new cadence window; failures retry next tick
                self.cadence.mark(now);
                self.last_poll_time = Some(now);
                let recovered_from = self.consecutive_error_count;
                self.consecutive_error_count = 0;
                self.last_error = None;

                if self.status == SourceStatus::Error {
                    info!(
                        "Source {} recovered after {} failed poll(s)",
                        self.id, recovered_from
                    );
                    bus.publish(Event::new(
                        EventType::SourceRecovered,
                        &self.id,
                        json!({ "failed_polls": recovered_from }),
                        now,
                    ));
                }
                self.status = SourceStatus::Running;
                debug!("Source {} polled: {} field(s)", self.id, snapshot.len());
                Some(snapshot)
            }
            Err(e) => {
                let message = format!("{e:#}");
                self.error_count += 1;
                self.consecutive_error_count += 1;
                warn!(
                    "Source {} poll failed ({} in a row): {}",
                    self.id, self.consecutive_error_count, message
                );
                bus.publish(Event::new(
                    EventType::SourceError,
                    &self.id,
                    json!({
                        "error": message,
                        "consecutive": self.consecutive_error_count,
                    }),
                    now,
                ));
                self.last_error = Some(message);
                self.status = SourceStatus::Error;
                None
            }
        }
    }

    /// Make a one-shot (or any) source due again. Has no effect once stopped.
    pub fn reset(&mut self) {
        if self.status != SourceStatus::Stopped {
            self.cadence.reset();
        }
    }

    /// Stop the source for good.
    pub fn stop(&mut self, bus: &EventBus, now: u64) {
        if self.status == SourceStatus::Stopped {
            return;
        }
        info!("Stopping source {}", self.id);
        self.source.shutdown();
        self.status = SourceStatus::Stopped;
        bus.publish(Event::new(EventType::SourceStopped, &self.id, json!(null), now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::DataSource;
    use anyhow::{bail, Result};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Source that replays a script of outcomes, then keeps succeeding.
    struct Scripted {
        metadata: SourceMetadata,
        init: Result<(), InitError>,
        script: VecDeque<bool>,
        polls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(script: &[bool]) -> (Self, Arc<AtomicUsize>) {
            let polls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                metadata: SourceMetadata::new("scripted", "Scripted", "", Duration::ZERO),
                init: Ok(()),
                script: script.iter().copied().collect(),
                polls: Arc::clone(&polls),
            };
            (source, polls)
        }
    }

    impl DataSource for Scripted {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        fn fields(&self) -> Vec<FieldMetadata> {
            Vec::new()
        }

        fn init(&mut self) -> Result<(), InitError> {
            self.init.clone()
        }

        fn poll(&mut self) -> Result<Snapshot> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            if !self.script.pop_front().unwrap_or(true) {
                bail!("scripted failure {n}");
            }
            Ok([("n", json!(n))].into_iter().collect())
        }
    }

    fn slot(script: &[bool], cadence_ms: u64) -> (SourceSlot, Arc<AtomicUsize>) {
        let (source, polls) = Scripted::new(script);
        (SourceSlot::new("s", Box::new(source), cadence_ms), polls)
    }

    #[test]
    fn test_state_machine_happy_path() {
        let bus = EventBus::new(32);
        let (mut slot, _) = slot(&[], 100);
        assert_eq!(slot.status(), &SourceStatus::Uninitialized);
        assert!(!slot.due(0), "not due before init");

        assert!(slot.init(&bus, 0));
        assert_eq!(slot.status(), &SourceStatus::Ready);
        assert!(slot.due(0));

        let snapshot = slot.poll_safe(0, &bus).unwrap();
        assert_eq!(snapshot.get("n"), Some(&json!(0)));
        assert_eq!(slot.status(), &SourceStatus::Running);
        assert_eq!(slot.last_poll_time(), Some(0));
        assert!(Arc::ptr_eq(&snapshot, &slot.snapshot()));
    }

    #[test]
    fn test_auto_recovery_after_failures() {
        for k in 1..5usize {
            let bus = EventBus::new(32);
            let mut script = vec![true];
            script.extend(std::iter::repeat(false).take(k));
            let (mut slot, _) = slot(&script, 0);
            slot.init(&bus, 0);

            let good = slot.poll_safe(0, &bus).unwrap();
            for i in 0..k {
                assert!(slot.poll_safe(1 + i as u64, &bus).is_none());
                assert_eq!(slot.status(), &SourceStatus::Error);
                // Stale data is kept
                assert!(Arc::ptr_eq(&good, &slot.snapshot()));
            }
            assert_eq!(slot.consecutive_error_count(), k as u64);
            assert!(slot.last_error().unwrap().starts_with("scripted failure"));

            assert!(slot.poll_safe(100, &bus).is_some());
            assert_eq!(slot.consecutive_error_count(), 0);
            assert_eq!(slot.error_count(), k as u64);
            assert_eq!(slot.status(), &SourceStatus::Running);
            assert!(slot.last_error().is_none());
            assert_eq!(bus.history(Some(EventType::SourceRecovered), 10).len(), 1);
            assert_eq!(bus.history(Some(EventType::SourceError), 10).len(), k);
        }
    }

    #[test]
    fn test_first_poll_failure_then_success() {
        let bus = EventBus::new(8);
        let (mut slot, _) = slot(&[false], 50);
        slot.init(&bus, 0);

        assert!(slot.poll_safe(0, &bus).is_none());
        assert!(slot.snapshot().is_empty());
        assert_eq!(slot.last_poll_time(), None);
        assert!(slot.due(10));
        assert!(slot.poll_safe(10, &bus).is_some());
        assert_eq!(slot.status(), &SourceStatus::Running);
        assert!(!slot.due(59));
        assert!(slot.due(60));
    }

    #[test]
    fn test_failed_poll_is_retried_before_cadence_elapses() {
        let bus = EventBus::new(16);
        let (mut slot, polls) = slot(&[true, false], 1_000);
        slot.init(&bus, 0);

        let mut polled_at = Vec::new();
        for now in (0..=1_200).step_by(100) {
            if slot.due(now) {
                slot.poll_safe(now, &bus);
                polled_at.push(now);
            }
        }
        // 1000 fails, 1100 recovers, and the next window opens at 2100
        assert_eq!(polled_at, vec![0, 1_000, 1_100]);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(slot.last_poll_time(), Some(1_100));
        assert_eq!(slot.status(), &SourceStatus::Running);
    }

    #[test]
    fn test_failing_cadence_window_start_retries_next_tick() {
        let bus = EventBus::new(16);
        let (mut slot, polls) = slot(&[false], 1_000);
        slot.init(&bus, 0);

        assert!(slot.poll_safe(0, &bus).is_none());
        assert_eq!(slot.status(), &SourceStatus::Error);
        assert!(slot.due(100));
        assert!(slot.poll_safe(100, &bus).is_some());
        assert_eq!(polls.load(Ordering::SeqCst), 2);
        assert!(!slot.due(1_000));
        assert!(slot.due(1_100));
    }

    #[test]
    fn test_one_shot_recovers_from_failed_first_poll() {
        let bus = EventBus::new(16);
        let (mut slot, polls) = slot(&[false, false], 0);
        slot.init(&bus, 0);

        for now in (0..2_000).step_by(100) {
            if slot.due(now) {
                slot.poll_safe(now, &bus);
            }
        }
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(slot.status(), &SourceStatus::Running);
        assert_eq!(slot.last_poll_time(), Some(200));
        assert_eq!(bus.history(Some(EventType::SourceRecovered), 10).len(), 1);
    }

    #[test]
    fn test_disabled_source_skips_without_touching_timers() {
        let bus = EventBus::new(8);
        let (mut slot, polls) = slot(&[], 100);
        slot.init(&bus, 0);
        slot.set_enabled(false);

        assert!(!slot.due(0));
        assert!(slot.poll_safe(0, &bus).is_none());
        assert_eq!(polls.load(Ordering::SeqCst), 0);
        assert_eq!(slot.cadence().last(), None);

        slot.set_enabled(true);
        assert!(slot.due(0));
    }

    #[test]
    fn test_init_failure_is_permanent_and_reported_once() {
        let bus = EventBus::new(8);
        let (mut source, polls) = Scripted::new(&[]);
        source.init = Err(InitError::Failed("no device".to_string()));
        let mut slot = SourceSlot::new("dev", Box::new(source), 100);

        assert!(!slot.init(&bus, 0));
        assert!(!slot.init(&bus, 1));
        assert_eq!(slot.status(), &SourceStatus::Error);
        assert_eq!(slot.last_error(), Some("no device"));
        assert_eq!(bus.history(Some(EventType::SourceInitFailed), 10).len(), 1);

        for now in [0, 100, 1_000] {
            assert!(!slot.due(now));
            assert!(slot.poll_safe(now, &bus).is_none());
        }
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unavailable_is_distinct_from_error() {
        let bus = EventBus::new(8);
        let (mut source, _) = Scripted::new(&[]);
        source.init = Err(InitError::Unavailable("no sensors".to_string()));
        let mut slot = SourceSlot::new("temp", Box::new(source), 100);

        slot.init(&bus, 0);
        assert_eq!(
            slot.status(),
            &SourceStatus::Unavailable("no sensors".to_string())
        );
        assert_eq!(slot.status().to_string(), "unavailable (no sensors)");
        assert!(!slot.due(0));
        let events = bus.history(Some(EventType::SourceUnavailable), 10);
        assert_eq!(events[0].payload["reason"], "no sensors");
    }

    #[test]
    fn test_stop_is_terminal() {
        let bus = EventBus::new(8);
        let (mut slot, polls) = slot(&[], 0);
        slot.init(&bus, 0);
        slot.stop(&bus, 0);
        slot.stop(&bus, 1);

        assert_eq!(slot.status(), &SourceStatus::Stopped);
        assert!(!slot.due(0));
        assert!(slot.poll_safe(0, &bus).is_none());
        slot.reset();
        assert!(!slot.due(10));
        assert_eq!(polls.load(Ordering::SeqCst), 0);
        assert_eq!(bus.history(Some(EventType::SourceStopped), 10).len(), 1);
    }

    struct Declared(SourceMetadata);

    impl DataSource for Declared {
        fn metadata(&self) -> &SourceMetadata {
            &self.0
        }

        fn fields(&self) -> Vec<FieldMetadata> {
            vec![
                FieldMetadata::caption("caption"),
                FieldMetadata::new(
                    "usage",
                    "Usage",
                    tickboard_types::FieldType::Percentage,
                    tickboard_types::FieldPurpose::Value,
                ),
            ]
        }

        fn poll(&mut self) -> Result<Snapshot> {
            Ok(Snapshot::default())
        }
    }

    #[test]
    fn test_check_field_against_declarations() {
        let metadata = SourceMetadata::new("cpu", "CPU", "", Duration::ZERO);
        let slot = SourceSlot::new("cpu", Box::new(Declared(metadata)), 100);

        let usage = slot
            .check_field("bar", &FieldSelector::parse("usage"))
            .unwrap()
            .unwrap();
        assert!(usage.field_type.is_numeric());
        assert_eq!(slot.check_field("table", &FieldSelector::Whole).unwrap(), None);

        let err = slot
            .check_field("bar", &FieldSelector::parse("usgae"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "panel `bar`: source `cpu` has no field `usgae` (declared: caption, usage)"
        );

        // Run-time keys cannot be checked up front
        let (undeclared, _) = self::slot(&[], 100);
        assert_eq!(
            undeclared.check_field("p", &FieldSelector::parse("anything")).unwrap(),
            None
        );
    }

    #[test]
    fn test_one_shot_reset() {
        let bus = EventBus::new(8);
        let (mut slot, polls) = slot(&[], 0);
        slot.init(&bus, 0);

        for now in (0..1_000).step_by(100) {
            if slot.due(now) {
                slot.poll_safe(now, &bus);
            }
        }
        assert_eq!(polls.load(Ordering::SeqCst), 1);

        slot.reset();
        assert!(slot.due(2_000));
    }
}
