//! Strict ISO-8601 timestamp reader
//!
//! Date: `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-Www[-D]`, `YYYYWww[D]`.
//! Time (after any single separator character): `HH[:MM[:SS[.f]]]` or
//! `HH[MM[SS[.f]]]`, fraction introduced by `.` or `,`.
//! Offset: `±HH`, `±HHMM`, `±HH:MM`, `±HH:MM:SS`, `±HHMMSS`.
//! Every numeric field has a fixed width.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse a timestamp into wall-clock time and an optional offset
pub(crate) fn parse(text: &str) -> Option<(NaiveDateTime, Option<FixedOffset>)> {
    let date_len = date_len(text)?;
    let date = parse_date(text.get(..date_len)?)?;

    let mut rest = text.get(date_len..)?.chars();
    if rest.next().is_none() {
        return Some((date.and_time(NaiveTime::MIN), None));
    }

    let (time, offset) = parse_time(rest.as_str())?;
    Some((date.and_time(time), offset))
}

/// Length of the date portion, decided from the separators present
fn date_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let extended = *bytes.get(4)? == b'-';
    let week_at = if extended { 5 } else { 4 };

    let len = match (bytes.get(week_at) == Some(&b'W'), extended) {
        (true, true) if bytes.get(8) == Some(&b'-') => 10,
        (true, true) => 8,
        (true, false) if bytes.get(7).is_some_and(|b| b.is_ascii_digit()) => 8,
        (true, false) => 7,
        (false, true) => 10,
        (false, false) => 8,
    };
    Some(len)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let year = i32::try_from(digits(date.get(..4)?, 4)?).ok()?;
    let rest = date.get(4..)?;
    let (extended, rest) = match rest.strip_prefix('-') {
        Some(tail) => (true, tail),
        None => (false, rest),
    };

    if let Some(week) = rest.strip_prefix('W') {
        let number = digits(week.get(..2)?, 2)?;
        let day = match (week.get(2..)?, extended) {
            ("", _) => 1,
            (tail, true) => digits(tail.strip_prefix('-')?, 1)?,
            (tail, false) => digits(tail, 1)?,
        };
        let weekday = *WEEKDAYS.get(usize::try_from(day).ok()?.checked_sub(1)?)?;
        return NaiveDate::from_isoywd_opt(year, number, weekday);
    }

    let (month, day) = if extended {
        let (month, day) = rest.split_once('-')?;
        (digits(month, 2)?, digits(day, 2)?)
    } else {
        (digits(rest.get(..2)?, 2)?, digits(rest.get(2..)?, 2)?)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(text: &str) -> Option<(NaiveTime, Option<FixedOffset>)> {
    let (clock, offset) = match text.find(|c: char| c == '+' || c == '-') {
        Some(at) => (&text[..at], Some(parse_offset(&text[at..])?)),
        None => (text, None),
    };

    let (whole, fraction) = match clock.find(|c: char| c == '.' || c == ',') {
        Some(at) => (&clock[..at], Some(&clock[at + 1..])),
        None => (clock, None),
    };

    let (fields, count) = clock_fields(whole)?;
    let nanos = match fraction {
        // Fractions only follow whole seconds
        Some(fraction) if count == 3 => fraction_nanos(fraction)?,
        Some(_) => return None,
        None => 0,
    };

    let time = NaiveTime::from_hms_nano_opt(fields[0], fields[1], fields[2], nanos)?;
    Some((time, offset))
}

fn parse_offset(text: &str) -> Option<FixedOffset> {
    let sign = match text.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };

    let ([hours, minutes, seconds], _) = clock_fields(&text[1..])?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = i32::try_from(hours * 3600 + minutes * 60 + seconds).ok()?;
    FixedOffset::east_opt(sign * total)
}

/// `HH`, `HH:MM`, `HH:MM:SS` or the colon-less forms; missing fields are zero
fn clock_fields(text: &str) -> Option<([u32; 3], usize)> {
    if !text.is_ascii() {
        return None;
    }

    let parts: Vec<&str> = if text.as_bytes().get(2) == Some(&b':') {
        text.split(':').collect()
    } else if text.len() % 2 == 0 {
        (0..text.len()).step_by(2).map(|i| &text[i..i + 2]).collect()
    } else {
        return None;
    };

    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut fields = [0; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = digits(part, 2)?;
    }
    Some((fields, parts.len()))
}

/// Fraction digits as nanoseconds; digits past nanosecond precision are dropped
fn fraction_nanos(fraction: &str) -> Option<u32> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let kept = &fraction[..fraction.len().min(9)];
    let scale = 10u32.pow(9 - kept.len() as u32);
    kept.parse::<u32>().ok().map(|value| value * scale)
}

/// Exactly `width` ASCII digits
fn digits(text: &str, width: usize) -> Option<u32> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_len_shapes() {
        assert_eq!(date_len("2024-01-15T10"), Some(10));
        assert_eq!(date_len("20240115T10"), Some(8));
        assert_eq!(date_len("2024-W03-1"), Some(10));
        assert_eq!(date_len("2024-W03"), Some(8));
        assert_eq!(date_len("2024W031"), Some(8));
        assert_eq!(date_len("2024W03"), Some(7));
        assert_eq!(date_len("2024"), None);
    }

    #[test]
    fn test_clock_fields() {
        assert_eq!(clock_fields("10"), Some(([10, 0, 0], 1)));
        assert_eq!(clock_fields("10:30"), Some(([10, 30, 0], 2)));
        assert_eq!(clock_fields("103045"), Some(([10, 30, 45], 3)));
        assert_eq!(clock_fields("1:5"), None);
        assert_eq!(clock_fields("10:3"), None);
        assert_eq!(clock_fields(""), None);
        assert_eq!(clock_fields("10:30:45:00"), None);
    }

    #[test]
    fn test_fraction_nanos() {
        assert_eq!(fraction_nanos("5"), Some(500_000_000));
        assert_eq!(fraction_nanos("250"), Some(250_000_000));
        assert_eq!(fraction_nanos("1234567891"), Some(123_456_789));
        assert_eq!(fraction_nanos(""), None);
        assert_eq!(fraction_nanos("5a"), None);
    }

    #[test]
    fn test_fraction_requires_seconds() {
        assert!(parse("2024-01-15T10:00.5").is_none());
    }

    #[test]
    fn test_offset_bounds() {
        assert!(parse_offset("+24:00").is_none());
        assert!(parse_offset("+05:60").is_none());
        assert_eq!(parse_offset("-0330").map(|o| o.local_minus_utc()), Some(-12_600));
    }
}
