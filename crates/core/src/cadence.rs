//! Elapsed-time gate shared by data sources and panels.

/// Decides whether an entity is due, given the current time in milliseconds.
///
/// An interval of 0 means one-shot: due until the first mark, then never
/// again until [`Cadence::reset`]. Callers decide what counts as a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval_ms: u64,
    last: Option<u64>,
}

impl Cadence {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    pub fn one_shot() -> Self {
        Self::new(0)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_one_shot(&self) -> bool {
        self.interval_ms == 0
    }

    /// Time of the last mark, if any
    pub fn last(&self) -> Option<u64> {
        self.last
    }

    pub fn due(&self, now: u64) -> bool {
        match self.last {
            None => true,
            Some(_) if self.is_one_shot() => false,
            // A clock that went backwards counts as no time elapsed
            Some(last) => now.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Start a new window at `now`.
    pub fn mark(&mut self, now: u64) {
        self.last = Some(now);
    }

    /// Forget the last mark, making the entity due again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
