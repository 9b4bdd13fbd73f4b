//! services/api/src/adapters/clock.rs
//!
//! Implements the `Clock` port with the host's local wall clock.

use chrono::{Local, NaiveDateTime};
use daily_fortune_core::Clock;

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
