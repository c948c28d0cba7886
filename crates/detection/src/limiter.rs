//! Generic cooldown gate

use std::time::{Duration, Instant};

/// A monotonic-clock cooldown timer.
///
/// Answers "is firing allowed now" and records the last-fired instant when
/// used. Firing is allowed when the gate has never fired, or when strictly
/// more than the configured interval has elapsed since the last firing.
///
/// The caller supplies `now` so the clock can be driven deterministically
/// in tests; comparisons are always between `Instant`s, never wall-clock
/// time.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl CooldownGate {
    /// Create a gate with the given minimum interval between firings
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Whether firing is allowed at `now`
    pub fn ready(&self, now: Instant) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        }
    }

    /// Record a firing at `now`
    pub fn fire(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }

    /// Fire if allowed; returns whether the firing happened
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }

    /// Last recorded firing instant
    pub fn last_fired(&self) -> Option<Instant> {
        self.last_fired
    }

    /// Configured minimum interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfired_gate_is_ready() {
        let gate = CooldownGate::new(Duration::from_secs(30));
        assert!(gate.ready(Instant::now()));
    }

    #[test]
    fn test_blocked_within_interval() {
        let base = Instant::now();
        let mut gate = CooldownGate::new(Duration::from_secs(30));

        assert!(gate.try_fire(base));
        assert!(!gate.ready(base + Duration::from_secs(10)));
        assert!(!gate.try_fire(base + Duration::from_secs(29)));
    }

    #[test]
    fn test_interval_boundary_is_exclusive() {
        let base = Instant::now();
        let mut gate = CooldownGate::new(Duration::from_secs(30));
        gate.fire(base);

        // Exactly the interval has not yet "elapsed past" the cooldown
        assert!(!gate.ready(base + Duration::from_secs(30)));
        assert!(gate.ready(base + Duration::from_secs(30) + Duration::from_millis(1)));
    }

    #[test]
    fn test_refire_after_interval() {
        let base = Instant::now();
        let mut gate = CooldownGate::new(Duration::from_secs(5));

        assert!(gate.try_fire(base));
        assert!(gate.try_fire(base + Duration::from_secs(6)));
        assert_eq!(gate.last_fired(), Some(base + Duration::from_secs(6)));
    }

    #[test]
    fn test_out_of_order_now_does_not_panic() {
        let base = Instant::now();
        let mut gate = CooldownGate::new(Duration::from_secs(5));
        gate.fire(base + Duration::from_secs(10));

        // An earlier `now` saturates to zero elapsed and stays blocked
        assert!(!gate.ready(base));
    }
}
