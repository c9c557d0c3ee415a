//! Update manager: the per-tick orchestrator
//!
//! One tick polls every due source, feeds every due panel from its source's
//! current snapshot, renders all panels and composes a single frame. Every
//! per-tick failure stays inside the tick; it is logged and published on the
//! event bus but never returned to the caller.

use anyhow::{Context, Result};
use log::{debug, info, trace, warn};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tickboard_core::constants::COMPOSITOR_SOURCE;
use tickboard_core::{
    BuildContext, Event, EventBus, EventType, Panel, Registry, SimClock, SourceTable,
};
use tickboard_render::Compositor;

use crate::config::AppConfig;

pub struct UpdateManager {
    clock: Arc<SimClock>,
    bus: Arc<EventBus>,
    sources: SourceTable,
    panels: Vec<Panel>,
    compositor: Compositor,
    started: bool,
    ticks: u64,
}

impl UpdateManager {
    pub fn new(
        sources: SourceTable,
        panels: Vec<Panel>,
        compositor: Compositor,
        bus: Arc<EventBus>,
        clock: Arc<SimClock>,
    ) -> Self {
        Self {
            clock,
            bus,
            sources,
            panels,
            compositor,
            started: false,
            ticks: 0,
        }
    }

    /// Validate `config` and resolve every source and panel through the
    /// registry.
    pub fn from_config(
        config: &AppConfig,
        registry: &Registry,
        terminal: (u16, u16),
    ) -> Result<Self> {
        config.validate().context("invalid layout")?;

        let clock = Arc::new(SimClock::new());
        let bus = Arc::new(EventBus::new(config.event_history));
        let ctx = BuildContext::new(Arc::clone(&clock));

        let mut sources = SourceTable::new();
        for data in &config.sources {
            let source = registry
                .create_source(&data.config, &ctx)
                .with_context(|| format!("failed to create source `{}`", data.id))?;
            let handle = sources.insert(data.id.clone(), source, data.cadence_ms())?;
            if let Some(slot) = sources.get_mut(handle) {
                slot.set_enabled(data.enabled);
            }
        }

        let mut panels = Vec::with_capacity(config.panels.len());
        for data in &config.panels {
            let handle = sources
                .handle(&data.source)
                .with_context(|| format!("panel `{}`: unknown source `{}`", data.id, data.source))?;
            if let Some(slot) = sources.get(handle) {
                let declared = slot.check_field(&data.id, &data.field)?;
                if let Some(field) = declared {
                    if data.displayer.plots_numbers() && !field.field_type.is_numeric() {
                        warn!(
                            "Panel {}: {} displayer bound to non-numeric field `{}`",
                            data.id,
                            data.displayer.displayer_type(),
                            field.id
                        );
                    }
                }
            }
            let displayer = registry
                .create_displayer(&data.displayer)
                .with_context(|| format!("failed to create displayer for panel `{}`", data.id))?;
            panels.push(Panel::new(
                data.id.clone(),
                handle,
                data.field.clone(),
                data.cadence_ms,
                data.geometry,
                displayer,
            )?);
        }

        info!(
            "Dashboard built: {} source(s), {} panel(s) on {}x{}",
            sources.len(),
            panels.len(),
            terminal.0,
            terminal.1
        );

        Ok(Self::new(
            sources,
            panels,
            Compositor::new(terminal.0, terminal.1),
            bus,
            clock,
        ))
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn clock(&self) -> &Arc<SimClock> {
        &self.clock
    }

    pub fn sources(&self) -> &SourceTable {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceTable {
        &mut self.sources
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.compositor.resize(width, height);
    }

    /// Initialize every source. Called by the first tick if not done before.
    pub fn start(&mut self, now: u64) {
        if self.started {
            return;
        }
        self.clock.set(now);
        let ready = self.sources.init_all(&self.bus, now);
        info!("{}/{} source(s) ready", ready, self.sources.len());
        self.started = true;
    }

    /// Run one tick at dashboard time `now` (ms) and return the frame.
    pub fn tick(&mut self, now: u64) -> String {
        self.start(now);
        self.clock.set(now);
        self.ticks += 1;

        let polled = self.sources.poll_due(&self.bus, now);
        trace!("Tick {} at {}ms: {} source(s) polled", self.ticks, now, polled.len());

        for panel in &mut self.panels {
            if !panel.due(now) {
                continue;
            }
            let Some(slot) = self.sources.get(panel.source()) else {
                continue;
            };
            // Nothing to show until the source has produced data once
            if slot.last_poll_time().is_none() {
                continue;
            }
            let snapshot = slot.snapshot();
            if let Err(e) = panel.update(&snapshot, now) {
                debug!("{}", e);
                self.bus.publish(Event::new(
                    EventType::PanelFieldMissing,
                    panel.id(),
                    json!({ "source": slot.id(), "field": e.field }),
                    now,
                ));
            }
        }

        self.compositor.clear();
        for panel in &mut self.panels {
            let geometry = panel.geometry();
            let block = panel.render();
            if let Err(e) = self.compositor.submit(
                block,
                geometry.x,
                geometry.y,
                geometry.width,
                geometry.height,
            ) {
                warn!("Panel {} not drawn: {}", panel.id(), e);
                self.bus.publish(Event::new(
                    EventType::LayoutRejected,
                    panel.id(),
                    json!({ "error": e.to_string() }),
                    now,
                ));
            }
        }

        let frame = self.compositor.compose();
        self.bus.publish(Event::new(
            EventType::FrameComposed,
            COMPOSITOR_SOURCE,
            json!({ "blocks": self.compositor.len(), "bytes": frame.len() }),
            now,
        ));
        frame
    }

    /// Stop every source. Sources are never polled again.
    pub fn stop(&mut self, now: u64) {
        self.sources.stop_all(&self.bus, now);
    }

    /// One line per source: id, status, error counts
    pub fn status_report(&self) -> Vec<String> {
        self.sources
            .iter()
            .map(|(_, slot)| {
                let mut line = format!(
                    "{:<16} {:<12} errors={} consecutive={}",
                    slot.id(),
                    slot.status(),
                    slot.error_count(),
                    slot.consecutive_error_count()
                );
                if let Some(err) = slot.last_error() {
                    line.push_str(&format!(" last_error={}", err));
                }
                line
            })
            .collect()
    }

    /// Drive ticks on a fixed interval until `max_ticks` is reached or
    /// Ctrl-C is pressed, handing each frame to `sink`.
    ///
    /// `size` is consulted before every tick so terminal resizes are picked
    /// up; returning `None` keeps the current size.
    pub async fn run<S, F>(
        &mut self,
        interval: Duration,
        max_ticks: Option<u64>,
        mut size: S,
        mut sink: F,
    ) -> Result<()>
    where
        S: FnMut() -> Option<(u16, u16)>,
        F: FnMut(&str) -> std::io::Result<()>,
    {
        let start = tokio::time::Instant::now();
        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = timer.tick() => {}
                _ = &mut shutdown => {
                    info!("Interrupted, shutting down");
                    break;
                }
            }

            if let Some((width, height)) = size() {
                self.resize(width, height);
            }

            let now = start.elapsed().as_millis() as u64;
            let frame = self.tick(now);
            sink(&frame).context("failed to write frame")?;

            if max_ticks.is_some_and(|max| self.ticks >= max) {
                break;
            }
        }

        let now = start.elapsed().as_millis() as u64;
        self.stop(now);
        Ok(())
    }
}
