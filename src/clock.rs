use chrono::{Local, NaiveDateTime};

/// Source of "now" for resolving year-less listing dates
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the server's frame of reference
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
