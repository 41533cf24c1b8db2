//! Time-based rate limiting: throttle and debounce.
//!
//! Time is always passed in explicitly so the host owns the clock and tests
//! stay deterministic.

use std::time::{Duration, Instant};

/// Leading-edge throttle that keeps the most recent suppressed value.
///
/// The first value of a window is emitted immediately. Values offered while
/// the window is open replace a single pending slot, which `poll` releases
/// once the window has elapsed, so the final value is never lost.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Throttle letting one value through per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    fn window_open(&self, now: Instant) -> bool {
        self.last_emit
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval)
    }

    /// Offer a value. Returns it back if it may be applied now.
    pub fn offer(&mut self, now: Instant, value: T) -> Option<T> {
        if self.window_open(now) {
            self.pending = Some(value);
            None
        } else {
            self.last_emit = Some(now);
            self.pending = None;
            Some(value)
        }
    }

    /// Release the trailing value once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && !self.window_open(now) {
            self.last_emit = Some(now);
            return self.pending.take();
        }
        None
    }

    /// Take the trailing value regardless of timing.
    pub fn take_pending(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Forget the window and any pending value.
    pub fn reset(&mut self) {
        self.last_emit = None;
        self.pending = None;
    }
}

/// Trailing-edge debounce holding one value.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    /// Debounce firing `delay` after the last value.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// (Re)start the delay with `value`.
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn throttle_emits_leading_value() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(16));
        assert_eq!(throttle.offer(t0, 1), Some(1));
    }

    #[test]
    fn throttle_keeps_latest_suppressed_value() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(16));
        throttle.offer(t0, 1);
        assert_eq!(throttle.offer(t0 + ms(5), 2), None);
        assert_eq!(throttle.offer(t0 + ms(10), 3), None);
        assert_eq!(throttle.poll(t0 + ms(12)), None, "window still open");
        assert_eq!(throttle.poll(t0 + ms(16)), Some(3));
        assert_eq!(throttle.poll(t0 + ms(40)), None, "nothing left");
    }

    #[test]
    fn throttle_reopens_after_interval() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(16));
        throttle.offer(t0, 1);
        assert_eq!(throttle.offer(t0 + ms(20), 2), Some(2));
    }

    #[test]
    fn throttle_take_pending_ignores_timing() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(16));
        throttle.offer(t0, 1);
        throttle.offer(t0 + ms(1), 2);
        assert_eq!(throttle.take_pending(), Some(2));
        assert_eq!(throttle.take_pending(), None);
    }

    #[test]
    fn debounce_fires_after_delay() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(ms(100));
        debounce.schedule(t0, "done");
        assert_eq!(debounce.poll(t0 + ms(99)), None);
        assert_eq!(debounce.poll(t0 + ms(100)), Some("done"));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn debounce_cancel_drops_value() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(ms(100));
        debounce.schedule(t0, "done");
        debounce.cancel();
        assert_eq!(debounce.poll(t0 + ms(500)), None);
    }

    #[test]
    fn debounce_reschedule_moves_deadline() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(ms(100));
        debounce.schedule(t0, 1);
        debounce.schedule(t0 + ms(50), 2);
        assert_eq!(debounce.poll(t0 + ms(120)), None);
        assert_eq!(debounce.poll(t0 + ms(150)), Some(2));
    }
}
