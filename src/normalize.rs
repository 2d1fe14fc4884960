// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Normalization engine
//!
//! Turns a tentative field set, where any field may be out of range or
//! negative, into the unique canonical [`DateTime`].
//!
//! ## Fixed-length cascade
//!
//! ```text
//! nanosecond ─1000→ microsecond ─1000→ millisecond ─1000→ second
//!            ─60→ minute ─60→ hour ─24→ day
//! ```
//!
//! Each boundary uses floor division, so the remainder always lands in
//! `[0, modulus)` even for negative input.
//!
//! ## Day ↔ month
//!
//! The modulus depends on `(year, month)`, so days are not carried by plain
//! division. Instead the date is turned into a day count within its 400-year
//! cycle (the Gregorian calendar repeats every 146 097 days), the offset is
//! added, whole cycles go into the year, and the remainder is turned back
//! into a civil date. Every call is constant-time.
//!
//! ## Calendar-relative deltas
//!
//! Months and years shift the `(year, month)` pair and clamp the day to the
//! last day of the target month ("ultimo"). Sub-day fields are untouched.
//!
//! ## Range
//!
//! The engine works in `i128`, which no `i64` input can overflow. A final
//! year outside `i32` saturates to [`DateTime::MAX`] or [`DateTime::MIN`].

use crate::calendar::{self, DAYS_PER_CYCLE, YEARS_PER_CYCLE};
use crate::datetime::DateTime;
use crate::span::Delta;

/// A field set with no range requirements.
///
/// This is the constructor input for [`DateTime::from_fields`]. Fields left
/// at their default describe `1970-01-01T00:00:00`.
///
/// ```
/// use almanac::{DateTime, Fields};
///
/// let dt = DateTime::from_fields(Fields {
///     year: 2012,
///     month: 3,
///     day: 32,
///     ..Fields::default()
/// });
/// assert_eq!(dt, DateTime::new(2012, 4, 1));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub millisecond: i64,
    pub microsecond: i64,
    pub nanosecond: i64,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            microsecond: 0,
            nanosecond: 0,
        }
    }
}

impl From<DateTime> for Fields {
    fn from(dt: DateTime) -> Self {
        Self {
            year: dt.year() as i64,
            month: dt.month() as i64,
            day: dt.day() as i64,
            hour: dt.hour() as i64,
            minute: dt.minute() as i64,
            second: dt.second() as i64,
            millisecond: dt.millisecond() as i64,
            microsecond: dt.microsecond() as i64,
            nanosecond: dt.nanosecond() as i64,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Working set
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Copy, Clone)]
struct Work {
    year: i128,
    month: i128,
    day: i128,
    hour: i128,
    minute: i128,
    second: i128,
    millisecond: i128,
    microsecond: i128,
    nanosecond: i128,
}

impl From<Fields> for Work {
    fn from(f: Fields) -> Self {
        Self {
            year: f.year.into(),
            month: f.month.into(),
            day: f.day.into(),
            hour: f.hour.into(),
            minute: f.minute.into(),
            second: f.second.into(),
            millisecond: f.millisecond.into(),
            microsecond: f.microsecond.into(),
            nanosecond: f.nanosecond.into(),
        }
    }
}

/// Length of `month` (already in `1..=12`) of an arbitrarily large year.
#[inline]
fn month_len(year: i128, month: i128) -> i128 {
    // Leap years repeat every 400 years.
    calendar::days_in_month(year.rem_euclid(400) as i64, month as u8).into()
}

/// Moves `floor(value / modulus)` into `next`, leaving `value` in `[0, modulus)`.
#[inline]
fn carry(value: &mut i128, next: &mut i128, modulus: i128) {
    *next += value.div_euclid(modulus);
    *value = value.rem_euclid(modulus);
}

impl Work {
    fn normalize_month(&mut self) {
        let zero_based = self.month - 1;
        self.year += zero_based.div_euclid(12);
        self.month = zero_based.rem_euclid(12) + 1;
    }

    fn cascade_fixed(&mut self) {
        carry(&mut self.nanosecond, &mut self.microsecond, 1_000);
        carry(&mut self.microsecond, &mut self.millisecond, 1_000);
        carry(&mut self.millisecond, &mut self.second, 1_000);
        carry(&mut self.second, &mut self.minute, 60);
        carry(&mut self.minute, &mut self.hour, 60);
        carry(&mut self.hour, &mut self.day, 24);
    }

    /// Requires a month in `1..=12`.
    ///
    /// Works on the epoch-day count of the year's position in its 400-year
    /// cycle, so the cost does not depend on the size of the day offset.
    fn carry_days(&mut self) {
        let cycle = i128::from(DAYS_PER_CYCLE);
        let years_per_cycle = i128::from(YEARS_PER_CYCLE);

        let base = self.year.div_euclid(years_per_cycle);
        let year_of_cycle = self.year.rem_euclid(years_per_cycle) as i64;
        let first_of_month = calendar::days_from_civil(year_of_cycle, self.month as u8, 1);
        let days = i128::from(first_of_month) + self.day - 1;

        let cycles = days.div_euclid(cycle);
        // In `0..DAYS_PER_CYCLE`, so it fits `i64`.
        let rest = days.rem_euclid(cycle) as i64;
        let (year, month, day) = calendar::civil_from_days(rest);

        self.year = (base + cycles) * years_per_cycle + i128::from(year);
        self.month = month.into();
        self.day = day.into();
    }

    /// Requires canonical month and day.
    fn add_months(&mut self, months: i128) {
        let total = (self.month - 1) + months;
        self.year += total.div_euclid(12);
        self.month = total.rem_euclid(12) + 1;
        self.clamp_day();
    }

    /// Requires canonical month and day.
    fn add_years(&mut self, years: i128) {
        self.year += years;
        self.clamp_day();
    }

    fn clamp_day(&mut self) {
        self.day = self.day.min(month_len(self.year, self.month));
    }

    fn finish(mut self) -> DateTime {
        self.normalize_month();
        self.cascade_fixed();
        self.carry_days();

        if self.year > i128::from(i32::MAX) {
            tracing::debug!(year = %self.year, "year above i32 range, saturating to DateTime::MAX");
            return DateTime::MAX;
        }
        if self.year < i128::from(i32::MIN) {
            tracing::debug!(year = %self.year, "year below i32 range, saturating to DateTime::MIN");
            return DateTime::MIN;
        }

        // Every field is in its canonical range here.
        DateTime::from_canonical(
            self.year as i32,
            self.month as u8,
            self.day as u8,
            self.hour as u8,
            self.minute as u8,
            self.second as u8,
            self.millisecond as u16,
            self.microsecond as u16,
            self.nanosecond as u16,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════════════════════════════════════

/// Canonical instant for an arbitrary field set.
///
/// A month outside `1..=12` is carried into the year first (month 13 is
/// January of the next year, month 0 is December of the previous one), then
/// the fixed-length cascade runs, then days are carried across months.
pub(crate) fn normalize(fields: Fields) -> DateTime {
    Work::from(fields).finish()
}

/// `dt + delta`: months, then years (each clamping the day), then the
/// fixed-length part, then one carry pass.
pub(crate) fn apply(dt: DateTime, delta: &Delta) -> DateTime {
    let mut work = Work::from(Fields::from(dt));

    if delta.months != 0 {
        work.add_months(delta.months.into());
    }
    if delta.years != 0 {
        work.add_years(delta.years.into());
    }

    work.day += i128::from(delta.weeks) * 7 + i128::from(delta.days);
    work.hour += i128::from(delta.hours);
    work.minute += i128::from(delta.minutes);
    work.second += i128::from(delta.seconds);
    work.millisecond += i128::from(delta.milliseconds);
    work.microsecond += i128::from(delta.microseconds);
    work.nanosecond += i128::from(delta.nanoseconds);

    work.finish()
}
