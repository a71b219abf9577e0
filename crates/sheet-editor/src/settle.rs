//! Settle timer: a cancelable, replaceable debounce.
//!
//! The engine re-measures widget geometry only after layout has been quiet
//! for `delay_ms`. Every new trigger replaces the pending deadline, so a burst
//! of changes produces one measurement. Time is passed in by the caller.

/// Debounce state for layout re-measurement.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay_ms: f64,
    deadline: Option<f64>,
    /// Bumped on every schedule; lets callers tell stale triggers apart.
    generation: u64,
}

impl SettleTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            deadline: None,
            generation: 0,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Change the delay. A pending deadline keeps its original time.
    pub fn set_delay(&mut self, delay_ms: f64) {
        self.delay_ms = delay_ms.max(0.0);
    }

    /// Arm (or re-arm) the timer at `now_ms + delay`. Last write wins.
    pub fn schedule(&mut self, now_ms: f64) -> u64 {
        self.deadline = Some(now_ms + self.delay_ms);
        self.generation += 1;
        self.generation
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fire if the deadline has passed. Fires at most once per schedule.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
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
    fn fires_once_after_delay() {
        let mut timer = SettleTimer::new(75.0);
        timer.schedule(1000.0);
        assert!(!timer.poll(1074.0));
        assert!(timer.poll(1075.0));
        assert!(!timer.poll(1200.0));
        assert!(!timer.is_pending());
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut timer = SettleTimer::new(50.0);
        let first = timer.schedule(0.0);
        let second = timer.schedule(40.0);
        assert!(second > first);
        assert!(!timer.poll(60.0));
        assert!(timer.poll(90.0));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timer = SettleTimer::new(10.0);
        timer.schedule(0.0);
        timer.cancel();
        assert!(!timer.poll(100.0));
    }

    #[test]
    fn negative_delay_is_clamped() {
        let mut timer = SettleTimer::new(-5.0);
        assert_eq!(timer.delay_ms(), 0.0);
        timer.schedule(3.0);
        assert!(timer.poll(3.0));
    }
}
