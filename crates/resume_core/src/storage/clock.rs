//! Time source for record timestamps.

use chrono::{DateTime, SubsecRound, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Current time truncated to the persisted millisecond precision.
pub(crate) fn now_millis(clock: &impl Clock) -> DateTime<Utc> {
    clock.now().trunc_subsecs(3)
}
