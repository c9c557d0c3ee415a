//! Ordered collection of source slots, addressed by handle.

use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use tickboard_types::Snapshot;

use crate::data_source::BoxedDataSource;
use crate::error::CoreError;
use crate::event_bus::EventBus;
use crate::source_slot::SourceSlot;

/// Index of a source in its [`SourceTable`]. Panels hold one of these
/// instead of a reference to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceHandle(usize);

impl SourceHandle {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Sources in configuration order. Slots are never removed, so handles
/// stay valid for the table's lifetime.
#[derive(Default)]
pub struct SourceTable {
    slots: Vec<SourceSlot>,
    by_id: HashMap<String, SourceHandle>,
}

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        source: BoxedDataSource,
        cadence_ms: u64,
    ) -> Result<SourceHandle, CoreError> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(CoreError::DuplicateSource(id));
        }
        let handle = SourceHandle(self.slots.len());
        self.by_id.insert(id.clone(), handle);
        self.slots.push(SourceSlot::new(id, source, cadence_ms));
        Ok(handle)
    }

    pub fn handle(&self, id: &str) -> Option<SourceHandle> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, handle: SourceHandle) -> Option<&SourceSlot> {
        self.slots.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: SourceHandle) -> Option<&mut SourceSlot> {
        self.slots.get_mut(handle.0)
    }

    pub fn by_id(&self, id: &str) -> Option<&SourceSlot> {
        self.handle(id).and_then(|handle| self.get(handle))
    }

    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut SourceSlot> {
        let handle = self.handle(id)?;
        self.get_mut(handle)
    }

    /// Current snapshot of the source behind `handle`
    pub fn snapshot(&self, handle: SourceHandle) -> Option<Arc<Snapshot>> {
        self.get(handle).map(SourceSlot::snapshot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceHandle, &SourceSlot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (SourceHandle(i), slot))
    }

    /// Initialize every source. Returns how many came up ready.
    pub fn init_all(&mut self, bus: &EventBus, now: u64) -> usize {
        self.slots
            .iter_mut()
            .map(|slot| slot.init(bus, now))
            .filter(|ready| *ready)
            .count()
    }

    /// Poll every due source in order. Returns the handles that produced a
    /// new snapshot.
    pub fn poll_due(&mut self, bus: &EventBus, now: u64) -> Vec<SourceHandle> {
        let mut updated = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.due(now) && slot.poll_safe(now, bus).is_some() {
                updated.push(SourceHandle(i));
            }
        }
        if !updated.is_empty() {
            debug!("{} source(s) updated at {}", updated.len(), now);
        }
        updated
    }

    pub fn stop_all(&mut self, bus: &EventBus, now: u64) {
        for slot in &mut self.slots {
            slot.stop(bus, now);
        }
    }
}
