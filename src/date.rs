//! The canonical date representation shared by cutoffs and date columns.
//!
//! Every date value, whether it is the cutoff given on the command line or
//! a cell in the date column, goes through [`parse_date`]. The accepted
//! shapes are, in the order they are tried:
//!
//! 1. RFC 3339 with an offset or `Z`, e.g. `2021-01-01T10:00:00+02:00`.
//!    These are normalised to UTC and become [`CanonicalDate::Aware`].
//! 2. `YYYY-MM-DDTHH:MM:SS`, optionally with a fractional second.
//! 3. `YYYY-MM-DDTHH:MM`.
//! 4. `YYYY-MM-DD`, taken as midnight.
//!
//! A space may stand in for the `T` separator anywhere above. Shapes 2-4
//! become [`CanonicalDate::Naive`]. Every field is fixed width and zero
//! padded, the year has no sign, the `T` and `Z` are upper case and offsets
//! are written `+HH:MM` or `-HH:MM`. Nothing else is accepted; there is no
//! locale-dependent guessing.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A parsed point in time.
///
/// Aware and naive values are never ordered against each other, since a
/// naive value carries no information about which instant it denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalDate {
    /// A wall-clock date and time without a timezone.
    Naive(NaiveDateTime),
    /// An instant, stored in UTC.
    Aware(DateTime<Utc>),
}

impl CanonicalDate {
    pub fn is_aware(&self) -> bool {
        matches!(self, CanonicalDate::Aware(_))
    }
}

impl PartialOrd for CanonicalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (CanonicalDate::Naive(a), CanonicalDate::Naive(b)) => Some(a.cmp(b)),
            (CanonicalDate::Aware(a), CanonicalDate::Aware(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<NaiveDateTime> for CanonicalDate {
    fn from(value: NaiveDateTime) -> Self {
        CanonicalDate::Naive(value)
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(value: NaiveDate) -> Self {
        CanonicalDate::Naive(value.and_time(NaiveTime::MIN))
    }
}

impl From<DateTime<Utc>> for CanonicalDate {
    fn from(value: DateTime<Utc>) -> Self {
        CanonicalDate::Aware(value)
    }
}

impl FromStr for CanonicalDate {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        parse_date(value)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CanonicalDate::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            CanonicalDate::Aware(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

/// Parse a string into a [`CanonicalDate`].
///
/// The error carries no row index; callers parsing column values attach
/// their own.
pub fn parse_date(value: &str) -> Result<CanonicalDate> {
    let trimmed = value.trim();
    let normalised = normalise_separator(trimmed);
    let unparseable = || Error::DateParse {
        value: value.to_string(),
        row: None,
    };
    if !has_canonical_shape(&normalised) {
        return Err(unparseable());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Ok(CanonicalDate::Aware(dt.with_timezone(&Utc)));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalised, format) {
            return Ok(CanonicalDate::Naive(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalised, DATE_FORMAT) {
        return Ok(date.into());
    }
    Err(unparseable())
}

/// Whether `value` is spelled in one of the fixed-width shapes listed in the
/// module docs. Chrono alone would also take unpadded fields, signed years
/// and a lower case `z`.
fn has_canonical_shape(value: &str) -> bool {
    let mut rest = value.as_bytes();
    let date = take_digits(&mut rest, 4)
        && take(&mut rest, b'-')
        && take_digits(&mut rest, 2)
        && take(&mut rest, b'-')
        && take_digits(&mut rest, 2);
    if !date {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    let hours_minutes = take(&mut rest, b'T')
        && take_digits(&mut rest, 2)
        && take(&mut rest, b':')
        && take_digits(&mut rest, 2);
    if !hours_minutes {
        return false;
    }
    if !take(&mut rest, b':') {
        return rest.is_empty();
    }
    if !take_digits(&mut rest, 2) {
        return false;
    }
    if take(&mut rest, b'.') {
        let fraction = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if fraction == 0 {
            return false;
        }
        rest = &rest[fraction..];
    }
    // Offsets only follow a full time.
    if rest.is_empty() || rest == b"Z" {
        return true;
    }

    (take(&mut rest, b'+') || take(&mut rest, b'-'))
        && take_digits(&mut rest, 2)
        && take(&mut rest, b':')
        && take_digits(&mut rest, 2)
        && rest.is_empty()
}

fn take(rest: &mut &[u8], byte: u8) -> bool {
    match rest.split_first() {
        Some((&first, tail)) if first == byte => {
            *rest = tail;
            true
        }
        _ => false,
    }
}

fn take_digits(rest: &mut &[u8], count: usize) -> bool {
    if rest.len() >= count && rest[..count].iter().all(u8::is_ascii_digit) {
        *rest = &rest[count..];
        true
    } else {
        false
    }
}

/// Replace a space between the date and time parts with `T`.
fn normalise_separator(value: &str) -> String {
    let mut normalised = value.to_string();
    if normalised.len() > 10 && normalised.as_bytes()[10] == b' ' {
        normalised.replace_range(10..11, "T");
    }
    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> CanonicalDate {
        CanonicalDate::Naive(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    #[test]
    fn parses_plain_date_as_midnight() {
        assert_eq!(parse_date("2021-01-01").unwrap(), naive(2021, 1, 1, 0, 0, 0));
        assert_eq!(parse_date("  2021-01-01 ").unwrap(), naive(2021, 1, 1, 0, 0, 0));
    }

    #[test]
    fn parses_naive_datetimes() {
        assert_eq!(
            parse_date("2021-03-04T05:06:07").unwrap(),
            naive(2021, 3, 4, 5, 6, 7)
        );
        assert_eq!(
            parse_date("2021-03-04 05:06:07").unwrap(),
            naive(2021, 3, 4, 5, 6, 7)
        );
        assert_eq!(
            parse_date("2021-03-04 05:06").unwrap(),
            naive(2021, 3, 4, 5, 6, 0)
        );
        let fractional = parse_date("2021-03-04T05:06:07.250").unwrap();
        assert!(fractional > naive(2021, 3, 4, 5, 6, 7));
        assert!(fractional < naive(2021, 3, 4, 5, 6, 8));
    }

    #[test]
    fn parses_offsets_into_utc() {
        let utc = parse_date("2021-01-01T10:00:00Z").unwrap();
        let shifted = parse_date("2021-01-01 12:00:00+02:00").unwrap();
        assert!(utc.is_aware());
        assert_eq!(utc, shifted);
    }

    #[test]
    fn rejects_garbage() {
        for value in [
            "not-a-date",
            "",
            "2021-13-01",
            "2021-01-01 junk",
            "01/02/2021",
            "2021-1-1",
            "+2021-01-01",
            "2021-01-01T10:00:00z",
            "2021-01-01t10:00:00Z",
            "2021-01-01T1:00",
            "2021-01-01T10:00:00.",
            "2021-01-01T10:00:00+0200",
            "2021-01-01T10:00Z",
        ] {
            match parse_date(value) {
                Err(Error::DateParse { value: v, row: None }) => assert_eq!(v, value),
                other => panic!("expected parse error for {value:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn shape_check_accepts_documented_forms() {
        for value in [
            "2021-01-01",
            "2021-01-01T10:00",
            "2021-01-01T10:00:00",
            "2021-01-01T10:00:00.123456",
            "2021-01-01T10:00:00Z",
            "2021-01-01T10:00:00.5-05:30",
        ] {
            assert!(has_canonical_shape(value), "{value}");
            assert!(parse_date(value).is_ok(), "{value}");
        }
    }

    #[test]
    fn aware_and_naive_are_unordered() {
        let aware = parse_date("2021-01-01T00:00:00Z").unwrap();
        let naive = parse_date("2021-01-01").unwrap();
        assert_eq!(aware.partial_cmp(&naive), None);
        assert_ne!(aware, naive);
    }

    #[test]
    fn display_parses_back() {
        for value in ["2021-01-01", "2021-01-01T10:30:00.5", "2021-01-01T10:00:00+02:00"] {
            let date = parse_date(value).unwrap();
            assert_eq!(date.to_string().parse::<CanonicalDate>().unwrap(), date);
        }
    }
}
