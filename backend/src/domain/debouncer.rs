//! Cancel-and-reschedule debouncing driven by an external clock.
//!
//! A [`Debouncer`] never runs anything itself. The owner schedules it on every
//! mutation and polls it from the host event loop; `poll` reports `true`
//! exactly once per burst, after the window has elapsed since the last
//! schedule.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: u64 },
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            state: DebounceState::Idle,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// (Re)start the window at `now`, dropping any earlier deadline
    pub fn schedule(&mut self, now: u64) {
        self.state = DebounceState::Pending {
            deadline: now.saturating_add(self.delay_ms),
        };
    }

    /// Fire if the deadline has passed, returning to `Idle`
    pub fn poll(&mut self, now: u64) -> bool {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_window() {
        let mut debouncer = Debouncer::new(50);
        debouncer.schedule(0);

        assert!(!debouncer.poll(49));
        assert!(debouncer.poll(50));
        assert!(!debouncer.poll(100)); // already fired
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[test]
    fn test_reschedule_pushes_deadline() {
        let mut debouncer = Debouncer::new(50);
        debouncer.schedule(0);
        debouncer.schedule(40);
        debouncer.schedule(80);

        assert!(!debouncer.poll(100));
        assert_eq!(debouncer.state(), DebounceState::Pending { deadline: 130 });
        assert!(debouncer.poll(130));
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let mut debouncer = Debouncer::new(50);
        debouncer.schedule(0);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(1_000));
    }
}
