//! Clock: source of "now" for scoring and seeding
use chrono::{Local, NaiveDateTime};
use std::sync::Mutex;

/// Supplies the current local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a settable instant, for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    at: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at: Mutex::new(at) }
    }

    pub fn set(&self, at: NaiveDateTime) {
        match self.at.lock() {
            Ok(mut guard) => *guard = at,
            Err(poisoned) => *poisoned.into_inner() = at,
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.at.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
