// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar date-times
//!
//! This crate provides a single immutable instant type for the proleptic
//! Gregorian calendar, with nanosecond fields and carrying arithmetic.
//!
//! # Core types
//!
//! - [`DateTime`]: nine canonical fields, year down to nanosecond.
//! - [`Span`]: a signed magnitude tagged with a [`Unit`].
//! - [`Delta`]: all ten unit magnitudes, for mixed arithmetic in one step.
//! - [`Fields`]: an unchecked field set; the constructor input.
//! - [`Clock`]: the injectable source of [`DateTime::now`].
//!
//! # Units
//!
//! | Newtype | Unit | Kind |
//! |---------|------|------|
//! | [`Nanoseconds`] | [`Unit::Nanosecond`] | fixed |
//! | [`Microseconds`] | [`Unit::Microsecond`] | fixed |
//! | [`Milliseconds`] | [`Unit::Millisecond`] | fixed |
//! | [`Seconds`] | [`Unit::Second`] | fixed |
//! | [`Minutes`] | [`Unit::Minute`] | fixed |
//! | [`Hours`] | [`Unit::Hour`] | fixed |
//! | [`Days`] | [`Unit::Day`] | fixed |
//! | [`Weeks`] | [`Unit::Week`] | fixed |
//! | [`Months`] | [`Unit::Month`] | calendar-relative |
//! | [`Years`] | [`Unit::Year`] | calendar-relative |
//!
//! # Normalization
//!
//! Constructors accept any field values and carry them into range:
//!
//! ```
//! use almanac::DateTime;
//!
//! assert_eq!(DateTime::new(2012, 3, 32), DateTime::new(2012, 4, 1));
//! assert_eq!(DateTime::new(2011, 2, 29), DateTime::new(2011, 3, 1));
//! assert_eq!(DateTime::at(2012, 3, 21, 12, 21, 61), DateTime::at(2012, 3, 21, 12, 22, 1));
//! ```
//!
//! Month and year arithmetic clamps to the end of the target month instead:
//!
//! ```
//! use almanac::{DateTime, Months, Years};
//!
//! assert_eq!(DateTime::new(2012, 1, 31) + Months(1), DateTime::new(2012, 2, 29));
//! assert_eq!(DateTime::new(2012, 2, 29) + Years(1), DateTime::new(2013, 2, 28));
//! ```
//!
//! # Time zones
//!
//! There is exactly one implicit zone. `%Z` renders `UTC` and nothing is
//! ever converted.
//!
//! # Range
//!
//! Years are `i32`. Arithmetic that would leave that range saturates to
//! [`DateTime::MAX`] or [`DateTime::MIN`].

pub mod calendar;
pub mod clock;
mod datetime;
mod error;
mod format;
mod normalize;
mod span;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::Weekday;
pub use clock::{Clock, ClockGuard, FixedClock, SteppingClock, SystemClock};
pub use datetime::DateTime;
pub use error::ParseError;
pub use format::{Formatted, ZONE_LABEL};
pub use normalize::Fields;
pub use span::{
    Days, Delta, Hours, Microseconds, Milliseconds, Minutes, Months, Nanoseconds, Seconds, Span,
    Unit, Weeks, Years,
};
