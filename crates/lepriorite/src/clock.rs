//! Reference clock used for deadline proximity

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Source of the current instant
///
/// Offset-aware deadlines are compared against [`Clock::now`] shifted into
/// the deadline's own offset. Offset-less deadlines are compared against the
/// wall clock in [`Clock::local_offset`].
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the local wall clock
    fn local_offset(&self) -> FixedOffset;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    local_offset: FixedOffset,
}

impl FixedClock {
    /// Freeze the clock at `now` with a UTC local offset
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            local_offset: Utc.fix(),
        }
    }

    /// Use `offset` as the local wall clock offset
    pub fn with_local_offset(mut self, offset: FixedOffset) -> Self {
        self.local_offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_offset(&self) -> FixedOffset {
        self.local_offset
    }
}
