// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Duration units.
//!
//! A [`Span`] is a `(unit, magnitude)` pair. The unit set is closed:
//!
//! | Unit | Kind | Factor to next coarser unit |
//! |------|------|-----------------------------|
//! | [`Unit::Nanosecond`]  | fixed | 1000 |
//! | [`Unit::Microsecond`] | fixed | 1000 |
//! | [`Unit::Millisecond`] | fixed | 1000 |
//! | [`Unit::Second`]      | fixed | 60 |
//! | [`Unit::Minute`]      | fixed | 60 |
//! | [`Unit::Hour`]        | fixed | 24 |
//! | [`Unit::Day`]         | fixed | 7 |
//! | [`Unit::Week`]        | fixed | none |
//! | [`Unit::Month`]       | calendar-relative | none |
//! | [`Unit::Year`]        | calendar-relative | none |
//!
//! Fixed-length spans always reduce to a tick count. Calendar-relative spans
//! do not: what "one month" means depends on the date it is added to.
//!
//! The newtypes [`Nanoseconds`] … [`Years`] convert into [`Span`], so call
//! sites can write `date + Months(1)`.
//!
//! [`Delta`] bundles all ten magnitudes for arithmetic that mixes unit kinds
//! in a single step.

use std::fmt;
use std::ops::{Add, Neg};

// ═══════════════════════════════════════════════════════════════════════════
// Unit
// ═══════════════════════════════════════════════════════════════════════════

/// The closed set of duration units, finest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Factor from each unit to the next coarser fixed-length unit, indexed by
/// `Unit as usize`. `None` past the last fixed unit.
const FACTOR_TO_NEXT: [Option<i64>; 10] = [
    Some(1_000),
    Some(1_000),
    Some(1_000),
    Some(60),
    Some(60),
    Some(24),
    Some(7),
    None,
    None,
    None,
];

impl Unit {
    /// All units, finest first.
    pub const ALL: [Unit; 10] = [
        Unit::Nanosecond,
        Unit::Microsecond,
        Unit::Millisecond,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::Week,
        Unit::Month,
        Unit::Year,
    ];

    /// `true` for nanosecond through week.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        !self.is_calendar()
    }

    /// `true` for month and year.
    #[inline]
    pub const fn is_calendar(self) -> bool {
        matches!(self, Unit::Month | Unit::Year)
    }

    /// Conversion factor to the next coarser fixed-length unit.
    #[inline]
    pub const fn factor_to_next(self) -> Option<i64> {
        FACTOR_TO_NEXT[self as usize]
    }

    /// Length of one unit in nanoseconds, `None` for calendar-relative units.
    pub const fn nanoseconds(self) -> Option<i128> {
        if self.is_calendar() {
            return None;
        }
        let mut length: i128 = 1;
        let mut i = 0;
        while i < self as usize {
            // Every unit below a fixed unit has a factor.
            if let Some(factor) = FACTOR_TO_NEXT[i] {
                length *= factor as i128;
            }
            i += 1;
        }
        Some(length)
    }

    /// Lower-case singular name.
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Nanosecond => "nanosecond",
            Unit::Microsecond => "microsecond",
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Span
// ═══════════════════════════════════════════════════════════════════════════

/// A signed magnitude tagged with its [`Unit`].
///
/// ```
/// use almanac::{Span, Unit};
///
/// let span = Span::hours(36);
/// assert_eq!(span.unit(), Unit::Hour);
/// assert_eq!(span.to_nanoseconds(), Some(36 * 3_600_000_000_000));
/// assert_eq!(Span::months(1).to_nanoseconds(), None);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    unit: Unit,
    magnitude: i64,
}

impl Span {
    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn new(unit: Unit, magnitude: i64) -> Self {
        Self { unit, magnitude }
    }

    #[inline]
    pub const fn nanoseconds(n: i64) -> Self {
        Self::new(Unit::Nanosecond, n)
    }

    #[inline]
    pub const fn microseconds(n: i64) -> Self {
        Self::new(Unit::Microsecond, n)
    }

    #[inline]
    pub const fn milliseconds(n: i64) -> Self {
        Self::new(Unit::Millisecond, n)
    }

    #[inline]
    pub const fn seconds(n: i64) -> Self {
        Self::new(Unit::Second, n)
    }

    #[inline]
    pub const fn minutes(n: i64) -> Self {
        Self::new(Unit::Minute, n)
    }

    #[inline]
    pub const fn hours(n: i64) -> Self {
        Self::new(Unit::Hour, n)
    }

    #[inline]
    pub const fn days(n: i64) -> Self {
        Self::new(Unit::Day, n)
    }

    #[inline]
    pub const fn weeks(n: i64) -> Self {
        Self::new(Unit::Week, n)
    }

    #[inline]
    pub const fn months(n: i64) -> Self {
        Self::new(Unit::Month, n)
    }

    #[inline]
    pub const fn years(n: i64) -> Self {
        Self::new(Unit::Year, n)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    #[inline]
    pub const fn magnitude(&self) -> i64 {
        self.magnitude
    }

    #[inline]
    pub const fn is_fixed(&self) -> bool {
        self.unit.is_fixed()
    }

    /// Same unit, opposite sign. `i64::MIN` saturates to `i64::MAX`.
    #[inline]
    pub const fn negate(self) -> Self {
        Self::new(self.unit, self.magnitude.saturating_neg())
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Exact tick count for fixed-length spans.
    #[inline]
    pub const fn to_nanoseconds(&self) -> Option<i128> {
        match self.unit.nanoseconds() {
            Some(length) => Some(self.magnitude as i128 * length),
            None => None,
        }
    }

    /// Length as a [`qtty::Seconds`] quantity, for fixed-length spans.
    pub fn to_seconds(&self) -> Option<qtty::Seconds> {
        let nanos = self.to_nanoseconds()?;
        Some(qtty::Seconds::new(nanos as f64 / 1e9))
    }

    /// Length in days as a [`qtty::Days`] quantity, for fixed-length spans.
    pub fn to_days(&self) -> Option<qtty::Days> {
        Some(self.to_seconds()?.to::<qtty::Day>())
    }

    /// Sum of two spans of the same family.
    ///
    /// Two fixed-length spans combine into the finer of the two units; two
    /// calendar-relative spans combine into months (or years, if both are
    /// years). Mixing families, or overflowing `i64`, yields `None`.
    ///
    /// For fixed-length spans, adding `a` then `b` to a date gives the same
    /// result as adding `a.combine(b)`. Calendar spans clamp at each step,
    /// so the property does not hold for them.
    pub fn combine(self, other: Span) -> Option<Span> {
        match (self.unit.is_fixed(), other.unit.is_fixed()) {
            (true, true) => {
                let unit = self.unit.min(other.unit);
                let step = unit.nanoseconds()?;
                // Both lengths are exact multiples of the finer unit.
                let total = self.to_nanoseconds()? / step + other.to_nanoseconds()? / step;
                Some(Span::new(unit, i64::try_from(total).ok()?))
            }
            (false, false) if self.unit == other.unit => {
                Some(Span::new(self.unit, self.magnitude.checked_add(other.magnitude)?))
            }
            (false, false) => {
                let months = self.calendar_months()?.checked_add(other.calendar_months()?)?;
                Some(Span::months(months))
            }
            _ => None,
        }
    }

    fn calendar_months(&self) -> Option<i64> {
        match self.unit {
            Unit::Month => Some(self.magnitude),
            Unit::Year => self.magnitude.checked_mul(12),
            _ => None,
        }
    }
}

impl Neg for Span {
    type Output = Span;
    #[inline]
    fn neg(self) -> Span {
        self.negate()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.magnitude.abs() == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.magnitude, self.unit, plural)
    }
}

// ── Unit newtypes ─────────────────────────────────────────────────────────

macro_rules! unit_newtype {
    ($(#[$doc:meta])* $name:ident => $unit:ident) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i64);

        impl From<$name> for Span {
            #[inline]
            fn from(value: $name) -> Span {
                Span::new(Unit::$unit, value.0)
            }
        }

        impl Neg for $name {
            type Output = $name;
            #[inline]
            fn neg(self) -> $name {
                $name(self.0.saturating_neg())
            }
        }
    };
}

unit_newtype!(Nanoseconds => Nanosecond);
unit_newtype!(Microseconds => Microsecond);
unit_newtype!(Milliseconds => Millisecond);
unit_newtype!(Seconds => Second);
unit_newtype!(Minutes => Minute);
unit_newtype!(Hours => Hour);
unit_newtype!(Days => Day);
unit_newtype!(Weeks => Week);
unit_newtype!(
    /// Calendar months; adding clamps to the last day of the target month.
    Months => Month
);
unit_newtype!(
    /// Calendar years; Feb 29 clamps to Feb 28 in common years.
    Years => Year
);

// ═══════════════════════════════════════════════════════════════════════════
// Delta
// ═══════════════════════════════════════════════════════════════════════════

/// All ten unit magnitudes at once.
///
/// Adding a `Delta` to a date applies the calendar part (years and months)
/// first, with end-of-month clamping, then the fixed-length part, then a
/// single carry pass.
///
/// ```
/// use almanac::{DateTime, Delta, Days, Months};
///
/// let delta = Delta::default() + Months(1) + Days(1);
/// let date = DateTime::new(2012, 1, 31) + delta;
/// assert_eq!(date, DateTime::new(2012, 3, 1));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub microseconds: i64,
    pub nanoseconds: i64,
}

impl Delta {
    fn field_mut(&mut self, unit: Unit) -> &mut i64 {
        match unit {
            Unit::Nanosecond => &mut self.nanoseconds,
            Unit::Microsecond => &mut self.microseconds,
            Unit::Millisecond => &mut self.milliseconds,
            Unit::Second => &mut self.seconds,
            Unit::Minute => &mut self.minutes,
            Unit::Hour => &mut self.hours,
            Unit::Day => &mut self.days,
            Unit::Week => &mut self.weeks,
            Unit::Month => &mut self.months,
            Unit::Year => &mut self.years,
        }
    }

    /// Every magnitude negated (saturating).
    pub fn negate(self) -> Self {
        Self {
            years: self.years.saturating_neg(),
            months: self.months.saturating_neg(),
            weeks: self.weeks.saturating_neg(),
            days: self.days.saturating_neg(),
            hours: self.hours.saturating_neg(),
            minutes: self.minutes.saturating_neg(),
            seconds: self.seconds.saturating_neg(),
            milliseconds: self.milliseconds.saturating_neg(),
            microseconds: self.microseconds.saturating_neg(),
            nanoseconds: self.nanoseconds.saturating_neg(),
        }
    }

    /// `true` when the delta has a year or month component.
    pub fn has_calendar_part(&self) -> bool {
        self.years != 0 || self.months != 0
    }
}

impl<T: Into<Span>> Add<T> for Delta {
    type Output = Delta;
    fn add(mut self, rhs: T) -> Delta {
        let span = rhs.into();
        let field = self.field_mut(span.unit());
        *field = field.saturating_add(span.magnitude());
        self
    }
}

impl From<Span> for Delta {
    fn from(span: Span) -> Self {
        Delta::default() + span
    }
}

impl Neg for Delta {
    type Output = Delta;
    fn neg(self) -> Delta {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_table() {
        let factors: Vec<Option<i64>> = Unit::ALL.iter().map(|u| u.factor_to_next()).collect();
        assert_eq!(
            factors,
            vec![
                Some(1000),
                Some(1000),
                Some(1000),
                Some(60),
                Some(60),
                Some(24),
                Some(7),
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn test_unit_lengths() {
        assert_eq!(Unit::Nanosecond.nanoseconds(), Some(1));
        assert_eq!(Unit::Second.nanoseconds(), Some(1_000_000_000));
        assert_eq!(Unit::Day.nanoseconds(), Some(86_400_000_000_000));
        assert_eq!(Unit::Week.nanoseconds(), Some(604_800_000_000_000));
        assert_eq!(Unit::Month.nanoseconds(), None);
        assert_eq!(Unit::Year.nanoseconds(), None);
    }

    #[test]
    fn test_kinds() {
        assert!(Unit::Week.is_fixed());
        assert!(Unit::Month.is_calendar());
        assert!(!Span::years(1).is_fixed());
    }

    #[test]
    fn test_newtypes_convert() {
        assert_eq!(Span::from(Months(3)), Span::months(3));
        assert_eq!(Span::from(Nanoseconds(-7)), Span::nanoseconds(-7));
        assert_eq!(Span::from(Seconds(2)).unit(), Unit::Second);
        assert_eq!(-Days(2), Days(-2));
    }

    #[test]
    fn test_negate_saturates() {
        assert_eq!(Span::days(i64::MIN).negate().magnitude(), i64::MAX);
        assert_eq!((-Span::hours(3)).magnitude(), -3);
    }

    #[test]
    fn test_combine_fixed_uses_finer_unit() {
        let a = Span::seconds(1);
        let b = Span::milliseconds(500);
        assert_eq!(a.combine(b), Some(Span::milliseconds(1_500)));
        assert_eq!(Span::weeks(1).combine(Span::days(-2)), Some(Span::days(5)));
    }

    #[test]
    fn test_combine_calendar() {
        assert_eq!(Span::years(1).combine(Span::years(2)), Some(Span::years(3)));
        assert_eq!(Span::years(1).combine(Span::months(2)), Some(Span::months(14)));
    }

    #[test]
    fn test_combine_rejects_mixed_and_overflow() {
        assert_eq!(Span::days(1).combine(Span::months(1)), None);
        assert_eq!(Span::weeks(i64::MAX).combine(Span::nanoseconds(1)), None);
        assert_eq!(Span::months(i64::MAX).combine(Span::months(1)), None);
    }

    #[test]
    fn test_to_seconds_quantity() {
        let s = Span::minutes(2).to_seconds().expect("fixed");
        assert_eq!(s, qtty::Seconds::new(120.0));
        assert!(Span::months(1).to_seconds().is_none());
        let d = Span::hours(36).to_days().expect("fixed");
        assert!((d.value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::months(1).to_string(), "1 month");
        assert_eq!(Span::days(-3).to_string(), "-3 days");
    }

    #[test]
    fn test_delta_accumulates() {
        let delta = Delta::default() + Months(1) + Days(2) + Days(3) + Span::years(-1);
        assert_eq!(delta.months, 1);
        assert_eq!(delta.days, 5);
        assert_eq!(delta.years, -1);
        assert!(delta.has_calendar_part());
        assert_eq!((-delta).days, -5);
        assert!(!Delta::from(Span::hours(1)).has_calendar_part());
    }
}
