//! Time source for the picker.
//!
//! The sheet generator reads "today" and the controller reads a monotonic
//! millisecond counter for its debouncers. Both go through [`Clock`] so tests
//! can drive time by hand.

use chrono::Local;
use shared::CalendarDate;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub trait Clock {
    /// Monotonic milliseconds since an arbitrary origin
    fn now_millis(&self) -> u64;

    /// Today's local date, i.e. now truncated to local midnight
    fn today(&self) -> CalendarDate;
}

/// Wall clock backed by `Instant` and the local timezone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(Local::now().date_naive())
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Rc<Cell<u64>>,
    today: Rc<Cell<CalendarDate>>,
}

impl ManualClock {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            millis: Rc::new(Cell::new(0)),
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get() + millis);
    }

    pub fn set_today(&self, today: CalendarDate) {
        self.today.set(today);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.get()
    }

    fn today(&self) -> CalendarDate {
        self.today.get()
    }
}
