// src/search/debounce.rs

use std::time::{Duration, Instant};

/// Holds back a value until input has been quiet for a fixed period.
///
/// Time is passed in explicitly, so callers drive it from their own clock
/// (an event loop tick, a test, a request timestamp).
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet_period));
    }

    /// Releases the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(300);

    #[test]
    fn test_releases_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(D);
        debouncer.push("er", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + D), Some("er"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_new_input_restarts_the_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(D);
        debouncer.push("er", start);
        debouncer.push("err", start + Duration::from_millis(200));
        assert_eq!(debouncer.poll(start + D), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("err")
        );
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(D);
        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        debouncer.push(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + D * 2), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
