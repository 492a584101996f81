use chrono::{DateTime, Utc};

/// Clock read used wherever wall-clock time enters the core.
///
/// Injected so the advanced signature timestamp and object key stamps are
/// deterministic under test.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
