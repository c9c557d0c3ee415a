//! Shared constants for the scheduler

use std::time::Duration;

/// Default orchestrator tick (100ms)
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Default number of events kept in the event bus history
pub const DEFAULT_EVENT_HISTORY: usize = 256;

/// Source id used for events the event bus raises about itself
pub const EVENTBUS_SOURCE: &str = "eventbus";

/// Source id used for events raised by the compositor
pub const COMPOSITOR_SOURCE: &str = "compositor";
