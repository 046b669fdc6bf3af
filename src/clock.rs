use std::time::Duration;

/// A repeating timer fed by frame deltas.
///
/// `poll` fires at most once per call. Leftover time carries over, but never
/// more than one interval's worth, so a stalled frame does not turn into a
/// burst of catch-up ticks.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker {
            interval,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes effect from the next tick; time already accumulated is kept.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn poll(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed < self.interval {
            return false;
        }

        self.elapsed = (self.elapsed - self.interval).min(self.interval);
        true
    }
}
