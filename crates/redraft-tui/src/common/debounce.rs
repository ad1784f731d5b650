//! Trailing-edge debouncer driven by the runtime tick.
//!
//! A trigger replaces whatever is pending: the deadline moves to
//! `now + delay` and the stored arguments are overwritten. `poll` hands the
//! arguments out exactly once, when the deadline has passed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn trigger(&mut self, now: Instant, args: T) {
        self.pending = Some((now + self.delay, args));
    }

    /// Takes the pending arguments if their deadline is due.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_rapid_triggers_fire_once_with_last_args() {
        let t = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.trigger(t, 1);
        debouncer.trigger(t + ms(50), 2);
        debouncer.trigger(t + ms(100), 3);

        assert_eq!(debouncer.poll(t + ms(450)), None);
        assert_eq!(debouncer.poll(t + ms(499)), None);
        assert_eq!(debouncer.poll(t + ms(500)), Some(3));
        assert_eq!(debouncer.poll(t + ms(2000)), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let t = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(t, "x");
        assert_eq!(debouncer.deadline(), Some(t + DELAY));

        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t + ms(1000)), None);
    }

    #[test]
    fn test_independent_slots_do_not_interfere() {
        let t = Instant::now();
        let mut rephrase = Debouncer::new(DELAY);
        let mut translate = Debouncer::new(DELAY);

        rephrase.trigger(t, "a");
        translate.trigger(t + ms(300), "b");

        assert_eq!(rephrase.poll(t + ms(400)), Some("a"));
        assert_eq!(translate.poll(t + ms(400)), None);
        assert_eq!(translate.poll(t + ms(700)), Some("b"));
    }
}
