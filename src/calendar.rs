// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar rules.
//!
//! Pure functions over `(year, month, day)` triples. Nothing here keeps
//! state. Month arguments outside `1..=12` are clamped into that range
//! rather than rejected.
//!
//! The epoch-day helpers count days relative to 1970-01-01 and are exact
//! for every `i32` year. The normalization engine carries days through them,
//! and the formatter uses them for `%j`, `%a` and `%s`.

use std::fmt;

/// Days in a full 400-year Gregorian cycle: `97 * 366 + 303 * 365`.
pub const DAYS_PER_CYCLE: i64 = 146_097;

/// Years in a full Gregorian cycle.
pub const YEARS_PER_CYCLE: i64 = 400;

/// Month lengths for a common year, January first.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;

/// Zero-based table index for `month`, clamped to `1..=12`.
#[inline]
const fn month_index(month: u8) -> usize {
    if month == 0 {
        0
    } else if month > 12 {
        11
    } else {
        (month - 1) as usize
    }
}

/// `true` iff `year` is a Gregorian leap year.
///
/// ```
/// use almanac::calendar::is_leap_year;
///
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2000));
/// assert!(is_leap_year(1980));
/// ```
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in `month` (1–12) of `year`.
///
/// Month 0 is treated as January and anything above 12 as December.
#[inline]
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    let index = month_index(month);
    if index == 1 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[index]
    }
}

/// 366 for leap years, 365 otherwise.
#[inline]
pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Ordinal day within the year, January 1st being day 1.
pub fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    let before: u16 = (1..month).map(|m| days_in_month(year, m) as u16).sum();
    before + day as u16
}

/// Signed number of days from 1970-01-01 to the given civil date.
///
/// Shifts the year to start on March 1st so that the leap day falls at the
/// end of each year, then counts whole 400-year eras.
pub fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let month = month as i64;
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(YEARS_PER_CYCLE);
    let yoe = y - era * YEARS_PER_CYCLE;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_CYCLE + doe - EPOCH_SHIFT
}

/// Inverse of [`days_from_civil`].
pub fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_CYCLE);
    let doe = z - era * DAYS_PER_CYCLE;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * YEARS_PER_CYCLE + i64::from(month <= 2);
    (year, month, day)
}

/// English name of `month` (1–12), clamped like [`days_in_month`].
#[inline]
pub const fn month_name(month: u8) -> &'static str {
    MONTH_NAMES[month_index(month)]
}

// ═══════════════════════════════════════════════════════════════════════════
// Weekday
// ═══════════════════════════════════════════════════════════════════════════

/// Day of the week, ISO order (Monday first).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a day counted from 1970-01-01 (a Thursday).
    pub fn from_days_since_epoch(days: i64) -> Self {
        Self::ALL[(days + 3).rem_euclid(7) as usize]
    }

    /// ISO number: Monday = 1 … Sunday = 7.
    #[inline]
    pub const fn number_from_monday(self) -> u8 {
        self as u8 + 1
    }

    /// Sunday = 0 … Saturday = 6.
    #[inline]
    pub const fn number_from_sunday(self) -> u8 {
        (self as u8 + 1) % 7
    }

    pub const fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
