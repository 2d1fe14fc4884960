// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The civil date-time value type.
//!
//! [`DateTime`] stores nine canonical fields, from year down to nanosecond,
//! in one implicit zone. Construction never fails: out-of-range input is
//! carried into the neighbouring fields by the normalization engine, so
//! `DateTime::new(2012, 3, 32)` is April 1st.
//!
//! Arithmetic takes any [`Span`] (or the unit newtypes such as
//! [`Months`](crate::Months)) and a compound [`Delta`]. Every result is
//! re-normalized; nothing here mutates an existing value.

use crate::calendar::{self, Weekday};
use crate::clock;
use crate::format::{self, Formatted};
use crate::normalize::{self, Fields};
use crate::span::{
    Days, Delta, Hours, Microseconds, Milliseconds, Minutes, Months, Nanoseconds, Seconds, Span,
    Weeks, Years,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const SECONDS_PER_DAY: i128 = 86_400;

/// An instant in the proleptic Gregorian calendar at nanosecond resolution.
///
/// Field order is significant: the derived ordering is lexicographic over
/// `(year, month, day, hour, minute, second, millisecond, microsecond,
/// nanosecond)`, which is chronological order.
///
/// ```
/// use almanac::{DateTime, Months, Nanoseconds};
///
/// let date = DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 200, 1300);
/// assert_eq!(date.microsecond(), 201);
/// assert_eq!(date.nanosecond(), 300);
///
/// let leap = DateTime::new(2012, 1, 31) + Months(1);
/// assert_eq!(leap, DateTime::new(2012, 2, 29));
///
/// let later = date + Nanoseconds(700);
/// assert_eq!(later.microsecond(), 202);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    microsecond: u16,
    nanosecond: u16,
}

impl DateTime {
    /// Latest representable instant; arithmetic beyond it saturates here.
    pub const MAX: Self = Self::from_canonical(i32::MAX, 12, 31, 23, 59, 59, 999, 999, 999);

    /// Earliest representable instant; arithmetic before it saturates here.
    pub const MIN: Self = Self::from_canonical(i32::MIN, 1, 1, 0, 0, 0, 0, 0, 0);

    /// 1970-01-01T00:00:00.
    pub const UNIX_EPOCH: Self = Self::from_canonical(1970, 1, 1, 0, 0, 0, 0, 0, 0);

    // ── constructors ──────────────────────────────────────────────────

    /// Midnight at the start of the given date.
    #[inline]
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        Self::at(year, month, day, 0, 0, 0)
    }

    /// Date and wall-clock time with a zero sub-second part.
    #[inline]
    pub fn at(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        Self::at_nanos(year, month, day, hour, minute, second, 0, 0, 0)
    }

    /// All nine fields. Any value is accepted and normalized.
    #[allow(clippy::too_many_arguments)]
    pub fn at_nanos(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
        microsecond: i64,
        nanosecond: i64,
    ) -> Self {
        Self::from_fields(Fields {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
        })
    }

    /// Normalizes an arbitrary field set.
    #[inline]
    pub fn from_fields(fields: Fields) -> Self {
        normalize::normalize(fields)
    }

    /// The current instant according to the clock in effect on this thread.
    ///
    /// See [`clock::install`] for overriding it in tests.
    #[inline]
    pub fn now() -> Self {
        clock::now()
    }

    /// Only for fields already known to be canonical.
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn from_canonical(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        nanosecond: u16,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// 1–12.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// 1–31.
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    #[inline]
    pub const fn microsecond(&self) -> u16 {
        self.microsecond
    }

    #[inline]
    pub const fn nanosecond(&self) -> u16 {
        self.nanosecond
    }

    /// Millisecond, microsecond and nanosecond fields as one count.
    #[inline]
    pub const fn subsec_nanos(&self) -> u32 {
        self.millisecond as u32 * 1_000_000 + self.microsecond as u32 * 1_000 + self.nanosecond as u32
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        calendar::is_leap_year(self.year as i64)
    }

    /// Ordinal day, January 1st being 1.
    pub fn day_of_year(&self) -> u16 {
        calendar::day_of_year(self.year.into(), self.month, self.day)
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_days_since_epoch(self.days_since_epoch())
    }

    /// Whole days between 1970-01-01 and this date.
    pub fn days_since_epoch(&self) -> i64 {
        calendar::days_from_civil(self.year.into(), self.month, self.day)
    }

    /// Seconds since 1970-01-01T00:00:00, rounded toward negative infinity.
    pub fn timestamp(&self) -> i64 {
        let seconds = i64::from(self.hour) * 3_600 + i64::from(self.minute) * 60 + i64::from(self.second);
        self.days_since_epoch() * 86_400 + seconds
    }

    /// Nanoseconds since 1970-01-01T00:00:00.
    pub fn timestamp_nanos(&self) -> i128 {
        i128::from(self.timestamp()) * NANOS_PER_SECOND + i128::from(self.subsec_nanos())
    }

    /// Exact signed nanoseconds from `earlier` to `self`.
    #[inline]
    pub fn nanoseconds_since(&self, earlier: &DateTime) -> i128 {
        self.timestamp_nanos() - earlier.timestamp_nanos()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// `self` moved by one span. Month and year spans clamp the day.
    #[inline]
    pub fn add_span(self, span: impl Into<Span>) -> Self {
        self.add_delta(&Delta::from(span.into()))
    }

    /// `self` moved back by one span.
    #[inline]
    pub fn sub_span(self, span: impl Into<Span>) -> Self {
        self.add_span(span.into().negate())
    }

    /// `self` moved by a compound delta: months, then years, then the
    /// fixed-length units.
    #[inline]
    pub fn add_delta(self, delta: &Delta) -> Self {
        normalize::apply(self, delta)
    }

    // ── formatting ────────────────────────────────────────────────────

    /// Renders `fmt` with strftime-style directives.
    ///
    /// ```
    /// use almanac::DateTime;
    ///
    /// let date = DateTime::at(2012, 3, 21, 12, 21, 43);
    /// assert_eq!(date.strftime("%Y-%m-%d %H:%M:%S %Z"), "2012-03-21 12:21:43 UTC");
    /// ```
    pub fn strftime(&self, fmt: &str) -> String {
        self.format(fmt).to_string()
    }

    /// Lazy [`Display`](fmt::Display) adapter for [`strftime`](Self::strftime).
    #[inline]
    pub fn format<'f>(&self, fmt: &'f str) -> Formatted<'f> {
        Formatted::new(*self, fmt)
    }

    /// `YYYY-MM-DDTHH:MM:SS`, plus a fraction when the sub-second part is
    /// non-zero.
    pub fn iso8601(&self) -> String {
        self.to_string()
    }

    /// Strict inverse of [`iso8601`](Self::iso8601).
    ///
    /// Unlike the constructors, parsing validates: `2012-02-30` is an error.
    pub fn parse_iso8601(input: &str) -> Result<Self, crate::ParseError> {
        format::parse_iso8601(input)
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// Convert to a `chrono::NaiveDateTime`.
    ///
    /// Returns `None` if the year falls outside chrono's representable range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month.into(), self.day.into())?;
        date.and_hms_nano_opt(
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
            self.subsec_nanos(),
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display / FromStr ─────────────────────────────────────────────────────

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_iso8601(f, self)
    }
}

impl FromStr for DateTime {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        format::parse_iso8601(s)
    }
}

// ── chrono ────────────────────────────────────────────────────────────────

impl From<NaiveDateTime> for DateTime {
    /// A chrono leap second (`nanosecond >= 1e9`) carries into the next second.
    fn from(value: NaiveDateTime) -> Self {
        let nanos = i64::from(value.nanosecond());
        Self::at_nanos(
            value.year().into(),
            value.month().into(),
            value.day().into(),
            value.hour().into(),
            value.minute().into(),
            value.second().into(),
            nanos / 1_000_000,
            nanos / 1_000 % 1_000,
            nanos % 1_000,
        )
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    #[inline]
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self::from(value.naive_utc())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.iso8601())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Iso8601Visitor;

        impl de::Visitor<'_> for Iso8601Visitor {
            type Value = DateTime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an ISO-8601 date-time string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DateTime, E> {
                DateTime::parse_iso8601(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Iso8601Visitor)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

macro_rules! impl_span_arithmetic {
    ($($rhs:ty),* $(,)?) => {$(
        impl Add<$rhs> for DateTime {
            type Output = DateTime;
            #[inline]
            fn add(self, rhs: $rhs) -> DateTime {
                self.add_span(rhs)
            }
        }

        impl AddAssign<$rhs> for DateTime {
            #[inline]
            fn add_assign(&mut self, rhs: $rhs) {
                *self = self.add_span(rhs);
            }
        }

        impl Sub<$rhs> for DateTime {
            type Output = DateTime;
            #[inline]
            fn sub(self, rhs: $rhs) -> DateTime {
                self.sub_span(rhs)
            }
        }

        impl SubAssign<$rhs> for DateTime {
            #[inline]
            fn sub_assign(&mut self, rhs: $rhs) {
                *self = self.sub_span(rhs);
            }
        }
    )*};
}

impl_span_arithmetic!(
    Span,
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
);

impl Add<Delta> for DateTime {
    type Output = DateTime;
    #[inline]
    fn add(self, rhs: Delta) -> DateTime {
        self.add_delta(&rhs)
    }
}

impl Sub<Delta> for DateTime {
    type Output = DateTime;
    #[inline]
    fn sub(self, rhs: Delta) -> DateTime {
        self.add_delta(&rhs.negate())
    }
}

impl AddAssign<Delta> for DateTime {
    #[inline]
    fn add_assign(&mut self, rhs: Delta) {
        *self = self.add_delta(&rhs);
    }
}

impl SubAssign<Delta> for DateTime {
    #[inline]
    fn sub_assign(&mut self, rhs: Delta) {
        *self = self.add_delta(&rhs.negate());
    }
}

/// Elapsed time between two instants, in days.
impl Sub for DateTime {
    type Output = qtty::Days;
    fn sub(self, rhs: Self) -> qtty::Days {
        let nanos = self.nanoseconds_since(&rhs);
        let whole = nanos.div_euclid(NANOS_PER_SECOND * SECONDS_PER_DAY);
        let rest = nanos.rem_euclid(NANOS_PER_SECOND * SECONDS_PER_DAY);
        qtty::Days::new(whole as f64 + rest as f64 / (NANOS_PER_SECOND * SECONDS_PER_DAY) as f64)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
