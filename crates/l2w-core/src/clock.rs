use instant::Instant;
use std::time::Duration;

/// Source of "now" in seconds, injected wherever fade timing matters.
pub trait Clock {
    fn now_sec(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Clone, Debug)]
pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_sec(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to. Used for offline replay and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now_sec: f64,
}

impl ManualClock {
    pub fn starting_at(now_sec: f64) -> Self {
        Self { now_sec }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now_sec += dt.as_secs_f64();
    }

    pub fn set(&mut self, now_sec: f64) {
        self.now_sec = now_sec;
    }
}

impl Clock for ManualClock {
    fn now_sec(&self) -> f64 {
        self.now_sec
    }
}
