use chrono::DateTime;
use chrono::Utc;

/// Wall-clock collaborator (UTC, second resolution is all callers rely on).
///
/// The time-dependent rules of the reset workflow and access policy are
/// written against this port so tests can pin the clock.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
