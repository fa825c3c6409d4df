use std::time::{Duration, Instant};

/// Pending-timer handle. Each `schedule` cancels the previous deadline, so a
/// burst of inputs fires once after the quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending deadline, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once per scheduled deadline, when it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_into_one_fire() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(100));

        debounce.schedule(start);
        debounce.schedule(start + Duration::from_millis(40));
        debounce.schedule(start + Duration::from_millis(80));

        assert!(!debounce.fire_if_due(start + Duration::from_millis(150)));
        assert!(debounce.fire_if_due(start + Duration::from_millis(180)));
        assert!(!debounce.fire_if_due(start + Duration::from_millis(400)));
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(100));
        debounce.schedule(start);
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert!(!debounce.fire_if_due(start + Duration::from_secs(1)));
    }

    #[test]
    fn zero_delay_fires_immediately() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::ZERO);
        debounce.schedule(start);
        assert_eq!(debounce.remaining(start), Some(Duration::ZERO));
        assert!(debounce.fire_if_due(start));
    }
}
