//! Timer-gated slot collapsing bursts of one logical event into its latest value
//!
//! Time is passed in by the caller so the UI loop and tests drive it alike.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    last_event: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Record an event; replaces any pending value and restarts the quiet window
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending { value, last_event: now });
    }

    /// Take the pending value once the quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.last_event) >= self.quiet);
        if ready {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Take the pending value without waiting for the quiet window
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns true if something was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes deliverable
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.last_event + self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_poll_before_quiet_window_returns_none() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(150);
        debouncer.push(1, start);
        assert_eq!(debouncer.poll(start + ms(149)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + ms(150)), Some(1));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_burst_collapses_to_latest_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(100);
        debouncer.push(1, start);
        debouncer.push(2, start + ms(60));
        debouncer.push(3, start + ms(120));
        // Window restarts on every push
        assert_eq!(debouncer.poll(start + ms(200)), None);
        assert_eq!(debouncer.poll(start + ms(220)), Some(3));
        assert_eq!(debouncer.poll(start + ms(500)), None);
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(100);
        assert!(!debouncer.cancel());
        debouncer.push("x", start);
        assert!(debouncer.cancel());
        assert_eq!(debouncer.poll(start + ms(1000)), None);
    }

    #[test]
    fn test_flush_delivers_early_once() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(100);
        assert_eq!(debouncer.flush(), None);
        debouncer.push(7, start);
        assert_eq!(debouncer.flush(), Some(7));
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + ms(500)), None);
    }

    #[test]
    fn test_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(150);
        assert_eq!(debouncer.deadline(), None);
        debouncer.push((), start);
        assert_eq!(debouncer.deadline(), Some(start + ms(150)));
    }
}
