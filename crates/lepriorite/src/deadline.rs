//! Deadline parsing and proximity windows
//!
//! Deadlines are ISO-8601 text. A trailing `Z` is read as `+00:00`. Text
//! without an offset is kept as a wall-clock timestamp and compared against
//! the local wall clock.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use thiserror::Error;

use crate::clock::Clock;
use crate::iso;

/// Deadline text that is not a recognised ISO-8601 timestamp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid deadline '{input}': expected an ISO-8601 timestamp")]
pub struct DeadlineParseError {
    /// Text that failed to parse
    pub input: String,
}

/// A parsed deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Deadline carrying its own UTC offset
    Aware(DateTime<FixedOffset>),

    /// Wall-clock deadline without an offset
    Naive(NaiveDateTime),
}

impl Deadline {
    /// Time left until the deadline, negative once it has passed
    ///
    /// "Now" is read in the deadline's own offset. Naive deadlines use the
    /// clock's local wall time.
    pub fn remaining(&self, clock: &dyn Clock) -> TimeDelta {
        match self {
            Deadline::Aware(at) => {
                let now = clock.now().with_timezone(at.offset());
                *at - now
            }
            Deadline::Naive(at) => {
                let now = clock
                    .now()
                    .with_timezone(&clock.local_offset())
                    .naive_local();
                at.signed_duration_since(now)
            }
        }
    }
}

/// Parse ISO-8601 deadline text
///
/// Accepts calendar (`2024-01-15`, `20240115`) and week (`2024-W03-1`)
/// dates, optionally followed by a separator and `HH[:MM[:SS[.f]]]` (or the
/// colon-less form) and an offset `±HH[[:]MM]`. Date-only text resolves to
/// midnight.
pub fn parse_deadline(text: &str) -> Result<Deadline, DeadlineParseError> {
    let normalized = match text.strip_suffix('Z') {
        Some(head) => format!("{}+00:00", head),
        None => text.to_string(),
    };

    let (at, offset) = iso::parse(&normalized).ok_or_else(|| DeadlineParseError {
        input: text.to_string(),
    })?;

    match offset {
        Some(offset) => at
            .and_local_timezone(offset)
            .single()
            .map(Deadline::Aware)
            .ok_or_else(|| DeadlineParseError {
                input: text.to_string(),
            }),
        None => Ok(Deadline::Naive(at)),
    }
}

/// Proximity bucket for a parsed deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineWindow {
    /// Deadline already passed
    Overdue,

    /// At most one whole day left
    WithinDay,

    /// At most three whole days left
    WithinThreeDays,

    /// At most seven whole days left
    WithinWeek,

    /// More than a week left
    Later,
}

impl DeadlineWindow {
    /// Bucket the remaining time; whole days are floored
    pub fn from_remaining(remaining: TimeDelta) -> Self {
        if remaining < TimeDelta::zero() {
            return DeadlineWindow::Overdue;
        }

        match remaining.num_days() {
            days if days <= 1 => DeadlineWindow::WithinDay,
            days if days <= 3 => DeadlineWindow::WithinThreeDays,
            days if days <= 7 => DeadlineWindow::WithinWeek,
            _ => DeadlineWindow::Later,
        }
    }

    /// Score contribution
    pub fn boost(self) -> i32 {
        match self {
            DeadlineWindow::Overdue => 5,
            DeadlineWindow::WithinDay => 4,
            DeadlineWindow::WithinThreeDays => 2,
            DeadlineWindow::WithinWeek => 1,
            DeadlineWindow::Later => 0,
        }
    }

    /// Reason text recorded for this window
    pub fn reason(self) -> &'static str {
        match self {
            DeadlineWindow::Overdue => "Task is overdue",
            DeadlineWindow::WithinDay => "Due within 1 day",
            DeadlineWindow::WithinThreeDays => "Due within 3 days",
            DeadlineWindow::WithinWeek => "Due within 1 week",
            DeadlineWindow::Later => "Due in more than 1 week",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rstest::rstest;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_parse_trailing_z_as_utc() {
        let deadline = parse_deadline("2024-01-15T10:00:00Z").unwrap();
        match deadline {
            Deadline::Aware(at) => {
                assert_eq!(at.offset().local_minus_utc(), 0);
                let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
                assert_eq!(at.with_timezone(&Utc), expected);
            }
            Deadline::Naive(_) => panic!("expected offset-aware deadline"),
        }
    }

    #[rstest]
    #[case("2024-01-15T10:00:00+02:00", 7200)]
    #[case("2024-01-15T10:00:00.250-05:00", -18000)]
    #[case("2024-01-15 10:00:00+0530", 19800)]
    #[case("2024-01-15T10:00+01:00", 3600)]
    #[case("2024-01-15T10:00:00+05", 18000)]
    #[case("2024-01-15T10Z", 0)]
    #[case("20240115T100000Z", 0)]
    #[case("2024-01-15T10:00:00-0130", -5400)]
    fn test_parse_explicit_offsets(#[case] text: &str, #[case] offset_secs: i32) {
        match parse_deadline(text).unwrap() {
            Deadline::Aware(at) => assert_eq!(at.offset().local_minus_utc(), offset_secs),
            Deadline::Naive(_) => panic!("expected offset-aware deadline for {}", text),
        }
    }

    #[rstest]
    #[case("2024-01-15T10:00:00")]
    #[case("2024-01-15T10:00")]
    #[case("2024-01-15 10:00:00.5")]
    #[case("2024-01-15")]
    fn test_parse_naive(#[case] text: &str) {
        assert!(matches!(parse_deadline(text), Ok(Deadline::Naive(_))));
    }

    #[rstest]
    #[case("2024-01-15T10", 10, 0, 0, 0)]
    #[case("2024-01-15T10:30", 10, 30, 0, 0)]
    #[case("2024-01-15T10:00:00,5", 10, 0, 0, 500)]
    #[case("2024-01-15 10:00:00.250", 10, 0, 0, 250)]
    #[case("20240115T103045", 10, 30, 45, 0)]
    #[case("2024-01-15X10:00", 10, 0, 0, 0)]
    fn test_parse_time_shapes(
        #[case] text: &str,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: u32,
        #[case] milli: u32,
    ) {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_milli_opt(hour, minute, second, milli)
            .unwrap();
        assert_eq!(parse_deadline(text).unwrap(), Deadline::Naive(expected));
    }

    #[rstest]
    #[case("2024-W03-1", 2024, 1, 15)]
    #[case("2024W031", 2024, 1, 15)]
    #[case("2024-W03", 2024, 1, 15)]
    #[case("2024-W03-7", 2024, 1, 21)]
    #[case("2020-W53-5", 2021, 1, 1)]
    #[case("20240120", 2024, 1, 20)]
    fn test_parse_date_shapes(
        #[case] text: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let expected = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(parse_deadline(text).unwrap(), Deadline::Naive(expected));
    }

    #[test]
    fn test_week_date_with_time_and_offset() {
        let deadline = parse_deadline("2024-W03-1T10:00:00Z").unwrap();
        assert_eq!(
            deadline.remaining(&clock()),
            TimeDelta::zero(),
            "{:?}",
            deadline
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let deadline = parse_deadline("2024-01-20").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 20)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(deadline, Deadline::Naive(expected));
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("")]
    #[case(" 2024-01-15T10:00:00Z")]
    #[case("2024-13-01T00:00:00Z")]
    #[case("15/01/2024")]
    #[case("Z")]
    #[case("2024-1-5")]
    #[case("2024-01-5")]
    #[case("2024-01-15T1:5")]
    #[case("2024-01-15T10:5")]
    #[case("2024-01-15T1")]
    #[case("2024-01-15T")]
    #[case("2024-01-15T10:00.5")]
    #[case("2024-01-15T10:00:00+5")]
    #[case("2024-01-15T10:00:00+24:00")]
    #[case("2024-01-15T25:00")]
    #[case("2024-W54-1")]
    #[case("2024-W03-8")]
    #[case("2024-01-15T10:00:00 ")]
    fn test_parse_rejects(#[case] text: &str) {
        let err = parse_deadline(text).unwrap_err();
        assert_eq!(err.input, text);
    }

    #[test]
    fn test_remaining_aware() {
        let deadline = parse_deadline("2024-01-15T22:00:00Z").unwrap();
        assert_eq!(deadline.remaining(&clock()), TimeDelta::hours(12));
    }

    #[test]
    fn test_remaining_aware_is_offset_independent() {
        let deadline = parse_deadline("2024-01-15T12:00:00+02:00").unwrap();
        assert_eq!(deadline.remaining(&clock()), TimeDelta::zero());
    }

    #[test]
    fn test_remaining_naive_uses_local_wall_clock() {
        let deadline = parse_deadline("2024-01-15T11:00:00").unwrap();
        assert_eq!(deadline.remaining(&clock()), TimeDelta::hours(1));

        let shifted = clock().with_local_offset(FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(deadline.remaining(&shifted), TimeDelta::hours(-1));
    }

    #[rstest]
    #[case(TimeDelta::seconds(-1), DeadlineWindow::Overdue)]
    #[case(TimeDelta::days(-400), DeadlineWindow::Overdue)]
    #[case(TimeDelta::zero(), DeadlineWindow::WithinDay)]
    #[case(TimeDelta::hours(12), DeadlineWindow::WithinDay)]
    #[case(TimeDelta::hours(47), DeadlineWindow::WithinDay)]
    #[case(TimeDelta::hours(48), DeadlineWindow::WithinThreeDays)]
    #[case(TimeDelta::hours(95), DeadlineWindow::WithinThreeDays)]
    #[case(TimeDelta::days(4), DeadlineWindow::WithinWeek)]
    #[case(TimeDelta::hours(191), DeadlineWindow::WithinWeek)]
    #[case(TimeDelta::days(8), DeadlineWindow::Later)]
    fn test_window_from_remaining(
        #[case] remaining: TimeDelta,
        #[case] expected: DeadlineWindow,
    ) {
        assert_eq!(DeadlineWindow::from_remaining(remaining), expected);
    }

    #[test]
    fn test_window_boosts() {
        assert_eq!(DeadlineWindow::Overdue.boost(), 5);
        assert_eq!(DeadlineWindow::WithinDay.boost(), 4);
        assert_eq!(DeadlineWindow::WithinThreeDays.boost(), 2);
        assert_eq!(DeadlineWindow::WithinWeek.boost(), 1);
        assert_eq!(DeadlineWindow::Later.boost(), 0);
    }
}
