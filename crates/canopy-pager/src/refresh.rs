use std::cell::Cell;

use web_time::{Duration, Instant};

/// Pull-to-refresh indicator that ends itself after a fixed delay.
///
/// Fire and forget: once begun it cannot be cancelled, and it never touches
/// scroll geometry.
pub struct RefreshControl {
    started: Cell<Option<Instant>>,
    delay: Duration,
}

impl RefreshControl {
    pub fn new(delay: Duration) -> Self {
        Self {
            started: Cell::new(None),
            delay,
        }
    }

    /// Start refreshing. Returns false if already refreshing.
    pub fn begin(&self) -> bool {
        if self.started.get().is_some() {
            return false;
        }
        self.started.set(Some(canopy_core::now()));
        true
    }

    pub fn is_refreshing(&self) -> bool {
        self.started.get().is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// End the refresh once the delay has passed. Returns true while still
    /// refreshing.
    pub fn tick(&self) -> bool {
        let Some(started) = self.started.get() else {
            return false;
        };
        if canopy_core::now().saturating_duration_since(started) >= self.delay {
            log::debug!("refresh finished after {:?}", self.delay);
            self.started.set(None);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::TestClock;

    #[test]
    fn test_refresh_ends_after_delay() {
        let clock = TestClock::install();
        let r = RefreshControl::new(Duration::from_secs(2));
        assert!(!r.tick());

        assert!(r.begin());
        assert!(!r.begin());
        clock.advance(Duration::from_millis(1999));
        assert!(r.tick());
        assert!(r.is_refreshing());

        clock.advance(Duration::from_millis(1));
        assert!(!r.tick());
        assert!(!r.is_refreshing());
        assert!(r.begin());
    }
}
