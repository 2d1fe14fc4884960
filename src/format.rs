// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! strftime-style formatting and ISO-8601 parsing.
//!
//! # Directives
//!
//! | Directive | Output |
//! |-----------|--------|
//! | `%Y` | year, at least four digits, `-` for negative years |
//! | `%C` `%y` | year divided by 100 and its remainder, truncated toward zero |
//! | `%m` `%d` `%e` | month, day, space-padded day |
//! | `%j` | day of year, three digits |
//! | `%H` `%k` | hour 00–23, space-padded hour |
//! | `%I` `%l` | hour 01–12, space-padded |
//! | `%p` `%P` | `AM`/`PM`, `am`/`pm` |
//! | `%M` `%S` | minute, second |
//! | `%L` | milliseconds, three digits |
//! | `%f` `%N` | nanoseconds of the second, nine digits |
//! | `%s` | seconds since 1970-01-01T00:00:00 |
//! | `%a` `%A` | weekday name, abbreviated and full |
//! | `%b` `%h` `%B` | month name, abbreviated and full |
//! | `%u` `%w` | weekday number, Monday = 1 and Sunday = 0 |
//! | `%F` `%T` `%D` `%R` | `%Y-%m-%d`, `%H:%M:%S`, `%m/%d/%y`, `%H:%M` |
//! | `%Z` `%z` | always `UTC` and `+0000` |
//! | `%n` `%t` `%%` | newline, tab, percent |
//!
//! Unknown directives are written out literally (`%Q` stays `%Q`), as is a
//! lone trailing `%`. Formatting never fails.

use crate::calendar;
use crate::datetime::DateTime;
use crate::error::ParseError;
use std::fmt::{self, Write};

/// The only zone this crate knows about.
pub const ZONE_LABEL: &str = "UTC";

const ZONE_OFFSET: &str = "+0000";

// ═══════════════════════════════════════════════════════════════════════════
// Formatting
// ═══════════════════════════════════════════════════════════════════════════

/// A [`DateTime`] paired with a format string; renders on [`Display`](fmt::Display).
///
/// Returned by [`DateTime::format`].
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'f> {
    datetime: DateTime,
    fmt: &'f str,
}

impl<'f> Formatted<'f> {
    pub(crate) fn new(datetime: DateTime, fmt: &'f str) -> Self {
        Self { datetime, fmt }
    }
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_strftime(f, &self.datetime, self.fmt)
    }
}

fn write_strftime<W: Write>(w: &mut W, dt: &DateTime, fmt: &str) -> fmt::Result {
    let mut chars = fmt.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            w.write_char(c)?;
            continue;
        }
        match chars.next() {
            None => w.write_char('%')?,
            Some(directive) => {
                if !write_directive(w, dt, directive)? {
                    w.write_char('%')?;
                    w.write_char(directive)?;
                }
            }
        }
    }
    Ok(())
}

/// Writes one directive. `Ok(false)` means the directive is unknown and
/// nothing was written.
fn write_directive<W: Write>(w: &mut W, dt: &DateTime, directive: char) -> Result<bool, fmt::Error> {
    match directive {
        'Y' => write_year(w, dt.year())?,
        'C' => write!(w, "{:02}", dt.year() / 100)?,
        'y' => write!(w, "{:02}", (dt.year() % 100).unsigned_abs())?,
        'm' => write!(w, "{:02}", dt.month())?,
        'd' => write!(w, "{:02}", dt.day())?,
        'e' => write!(w, "{:>2}", dt.day())?,
        'j' => write!(w, "{:03}", dt.day_of_year())?,
        'H' => write!(w, "{:02}", dt.hour())?,
        'k' => write!(w, "{:>2}", dt.hour())?,
        'I' => write!(w, "{:02}", hour12(dt.hour()))?,
        'l' => write!(w, "{:>2}", hour12(dt.hour()))?,
        'p' => w.write_str(if dt.hour() < 12 { "AM" } else { "PM" })?,
        'P' => w.write_str(if dt.hour() < 12 { "am" } else { "pm" })?,
        'M' => write!(w, "{:02}", dt.minute())?,
        'S' => write!(w, "{:02}", dt.second())?,
        'L' => write!(w, "{:03}", dt.millisecond())?,
        'f' | 'N' => write!(w, "{:09}", dt.subsec_nanos())?,
        's' => write!(w, "{}", dt.timestamp())?,
        'a' => w.write_str(&dt.weekday().name()[..3])?,
        'A' => w.write_str(dt.weekday().name())?,
        'b' | 'h' => w.write_str(&calendar::month_name(dt.month())[..3])?,
        'B' => w.write_str(calendar::month_name(dt.month()))?,
        'u' => write!(w, "{}", dt.weekday().number_from_monday())?,
        'w' => write!(w, "{}", dt.weekday().number_from_sunday())?,
        'F' => write_strftime(w, dt, "%Y-%m-%d")?,
        'T' => write_strftime(w, dt, "%H:%M:%S")?,
        'D' => write_strftime(w, dt, "%m/%d/%y")?,
        'R' => write_strftime(w, dt, "%H:%M")?,
        'Z' => w.write_str(ZONE_LABEL)?,
        'z' => w.write_str(ZONE_OFFSET)?,
        'n' => w.write_char('\n')?,
        't' => w.write_char('\t')?,
        '%' => w.write_char('%')?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn write_year<W: Write>(w: &mut W, year: i32) -> fmt::Result {
    if year < 0 {
        write!(w, "-{:04}", i64::from(year).unsigned_abs())
    } else {
        write!(w, "{year:04}")
    }
}

#[inline]
fn hour12(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// `YYYY-MM-DDTHH:MM:SS[.fff[fff[fff]]]`, using the shortest exact fraction.
pub(crate) fn write_iso8601<W: Write>(w: &mut W, dt: &DateTime) -> fmt::Result {
    write_strftime(w, dt, "%Y-%m-%dT%H:%M:%S")?;
    let nanos = dt.subsec_nanos();
    if nanos == 0 {
        Ok(())
    } else if nanos % 1_000_000 == 0 {
        write!(w, ".{:03}", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        write!(w, ".{:06}", nanos / 1_000)
    } else {
        write!(w, ".{nanos:09}")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════════

struct Cursor<'i> {
    input: &'i str,
    pos: usize,
}

impl<'i> Cursor<'i> {
    fn new(input: &'i str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'i str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn is_done(&self) -> bool {
        self.pos == self.input.len()
    }

    /// Consumes `c` if it is next.
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(ParseError::UnexpectedChar {
                expected,
                found,
                position: self.pos,
            }),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    /// Between `min` and `max` ASCII digits, returned with their count.
    fn digits(&mut self, min: usize, max: usize, expected: &'static str) -> Result<(i64, usize), ParseError> {
        let mut value: i64 = 0;
        let mut count = 0;
        while count < max {
            match self.peek() {
                Some(c @ '0'..='9') => {
                    value = value * 10 + i64::from(c as u8 - b'0');
                    self.pos += 1;
                    count += 1;
                }
                _ => break,
            }
        }
        if count >= min {
            return Ok((value, count));
        }
        match self.peek() {
            Some(found) => Err(ParseError::UnexpectedChar {
                expected,
                found,
                position: self.pos,
            }),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    fn fixed(&mut self, width: usize, expected: &'static str) -> Result<i64, ParseError> {
        Ok(self.digits(width, width, expected)?.0)
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ParseError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParseError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Accepts `[+-]YYYY-MM-DD[(T| )HH:MM[:SS[(.|,)f{1,9}]]][Z|±00:00|±0000]`.
pub(crate) fn parse_iso8601(input: &str) -> Result<DateTime, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut cur = Cursor::new(input);

    let negative = if cur.eat('-') {
        true
    } else {
        cur.eat('+');
        false
    };
    // Ten digits cover every i32 year.
    let (year, _) = cur.digits(4, 10, "a four-digit year")?;
    let year = if negative { -year } else { year };
    check_range("year", year, i32::MIN.into(), i32::MAX.into())?;

    cur.expect('-', "'-' after the year")?;
    let month = cur.fixed(2, "a two-digit month")?;
    check_range("month", month, 1, 12)?;
    cur.expect('-', "'-' after the month")?;
    let day = cur.fixed(2, "a two-digit day")?;
    let month_len = calendar::days_in_month(year, month as u8);
    check_range("day", day, 1, month_len.into())?;

    let (mut hour, mut minute, mut second, mut nanos) = (0, 0, 0, 0);
    if cur.eat('T') || cur.eat('t') || cur.eat(' ') {
        hour = cur.fixed(2, "a two-digit hour")?;
        check_range("hour", hour, 0, 23)?;
        cur.expect(':', "':' after the hour")?;
        minute = cur.fixed(2, "a two-digit minute")?;
        check_range("minute", minute, 0, 59)?;
        if cur.eat(':') {
            second = cur.fixed(2, "a two-digit second")?;
            check_range("second", second, 0, 59)?;
            if cur.eat('.') || cur.eat(',') {
                let (fraction, count) = cur.digits(1, 9, "fractional-second digits")?;
                nanos = fraction * 10_i64.pow((9 - count) as u32);
            }
        }
    }

    parse_offset(&mut cur)?;
    if !cur.is_done() {
        return Err(ParseError::TrailingInput { position: cur.pos });
    }

    // Every field was range-checked, so normalization is the identity here.
    Ok(DateTime::at_nanos(
        year,
        month,
        day,
        hour,
        minute,
        second,
        nanos / 1_000_000,
        nanos / 1_000 % 1_000,
        nanos % 1_000,
    ))
}

fn parse_offset(cur: &mut Cursor<'_>) -> Result<(), ParseError> {
    if cur.eat('Z') || cur.eat('z') {
        return Ok(());
    }
    let start = cur.pos;
    if !(cur.eat('+') || cur.eat('-')) {
        return Ok(());
    }
    let hours = cur.fixed(2, "a two-digit offset hour")?;
    cur.eat(':');
    let minutes = cur.fixed(2, "a two-digit offset minute")?;
    if hours != 0 || minutes != 0 {
        return Err(ParseError::NonZeroOffset {
            offset: cur.input[start..cur.pos].to_string(),
        });
    }
    Ok(())
}
