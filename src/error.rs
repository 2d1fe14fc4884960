// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use thiserror::Error;

/// Why an ISO-8601 string was rejected.
///
/// Construction and arithmetic are total and never produce this; only
/// [`DateTime::parse_iso8601`](crate::DateTime::parse_iso8601) and `FromStr`
/// do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected} at position {position}, found {found:?}")]
    UnexpectedChar {
        expected: &'static str,
        found: char,
        position: usize,
    },

    #[error("{field} {value} is out of range {min}..={max}")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("UTC offset {offset:?} is not supported, only zero offsets are accepted")]
    NonZeroOffset { offset: String },

    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },
}
