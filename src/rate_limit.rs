//! Debounce/throttle combinator state, kept clock-free.
//!
//! The browser layer owns the actual timers; these types hold the decision
//! logic so the timing semantics can be unit-tested on the host with a fake
//! clock (see `web::timers` for the wiring).

/// Trailing-edge debounce: every call re-arms the quiet period and only the
/// most recent arm survives. The caller schedules a timer per `arm()` and
/// consults `should_fire` when it expires; stale generations are dropped.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate any pending generation and return the new one.
    pub fn arm(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// True only for the generation armed last.
    pub fn should_fire(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Leading-edge throttle: the first call fires immediately and opens a
/// cooldown window of `limit_ms`; calls inside the window are dropped, not
/// queued, and the first call after it is again immediate.
#[derive(Debug)]
pub struct ThrottleGate {
    limit_ms: f64,
    closed_until_ms: f64,
}

impl ThrottleGate {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            closed_until_ms: f64::NEG_INFINITY,
        }
    }

    /// Returns true when the caller should invoke the wrapped function now.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        if now_ms >= self.closed_until_ms {
            self.closed_until_ms = now_ms + self.limit_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_only_latest_generation_fires() {
        let mut d = Debouncer::new();

        // N calls within the quiet period: each re-arm invalidates the prior.
        let g1 = d.arm();
        let g2 = d.arm();
        let g3 = d.arm();
        assert!(!d.should_fire(g1));
        assert!(!d.should_fire(g2));
        assert!(d.should_fire(g3));

        // After the surviving timer fires, a fresh burst starts over.
        let g4 = d.arm();
        assert!(!d.should_fire(g3));
        assert!(d.should_fire(g4));
    }

    #[test]
    fn throttle_fires_at_t_and_t_plus_limit_only() {
        let mut g = ThrottleGate::new(100.0);

        // Calls at t, t+eps, t+limit-eps, t+limit: exactly two invocations.
        assert!(g.try_fire(0.0));
        assert!(!g.try_fire(1.0));
        assert!(!g.try_fire(99.0));
        assert!(g.try_fire(100.0));

        // The second fire restarts the window.
        assert!(!g.try_fire(150.0));
        assert!(g.try_fire(200.0));
    }

    #[test]
    fn throttle_is_immediate_after_an_idle_stretch() {
        let mut g = ThrottleGate::new(100.0);
        assert!(g.try_fire(0.0));
        assert!(g.try_fire(5000.0));
    }
}
