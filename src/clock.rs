// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The source of "now".
//!
//! [`DateTime::now`] reads whatever [`Clock`] is in effect on the calling
//! thread. By default that is [`SystemClock`]. Tests pin it with a scoped
//! override:
//!
//! ```
//! use almanac::clock::{self, FixedClock};
//! use almanac::DateTime;
//!
//! let pinned = DateTime::at(2012, 3, 21, 12, 21, 43);
//! {
//!     let _guard = clock::install(FixedClock(pinned));
//!     assert_eq!(DateTime::now(), pinned);
//! }
//! assert_ne!(DateTime::now(), pinned);
//! ```
//!
//! Overrides nest and are per-thread. Dropping the [`ClockGuard`] restores
//! the clock that was in effect when it was installed, on every exit path
//! including panics.

use crate::datetime::DateTime;
use crate::span::Span;
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

/// Anything that can report the current instant.
pub trait Clock {
    fn now(&self) -> DateTime;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    #[inline]
    fn now(&self) -> DateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> DateTime {
        (**self).now()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Implementations
// ═══════════════════════════════════════════════════════════════════════════

/// The operating system's wall clock, read through `chrono::Utc::now()`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        DateTime::from(Utc::now())
    }
}

/// Always reports the same instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime {
        self.0
    }
}

/// Reports `start`, then advances by `step` on every read.
///
/// ```
/// use almanac::clock::{Clock, SteppingClock};
/// use almanac::{DateTime, Seconds};
///
/// let clock = SteppingClock::new(DateTime::new(2012, 1, 1), Seconds(30));
/// assert_eq!(clock.now(), DateTime::at(2012, 1, 1, 0, 0, 0));
/// assert_eq!(clock.now(), DateTime::at(2012, 1, 1, 0, 0, 30));
/// ```
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next: Cell<DateTime>,
    step: Span,
}

impl SteppingClock {
    pub fn new(start: DateTime, step: impl Into<Span>) -> Self {
        Self {
            next: Cell::new(start),
            step: step.into(),
        }
    }

    /// The instant the next read will return, without advancing.
    pub fn peek(&self) -> DateTime {
        self.next.get()
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime {
        let current = self.next.get();
        self.next.set(current.add_span(self.step));
        current
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scoped override
// ═══════════════════════════════════════════════════════════════════════════

thread_local! {
    static OVERRIDES: RefCell<Vec<(u64, Rc<dyn Clock>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Restores the previous clock when dropped.
///
/// Each guard owns exactly the override it installed. Dropping it removes
/// that override and any nested inside it; if an enclosing guard was
/// dropped first, the override is already gone and this is a no-op.
///
/// Not `Send`: the override belongs to the thread that installed it.
#[must_use = "the override is removed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ClockGuard {
    id: u64,
    _thread_bound: PhantomData<Rc<()>>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        OVERRIDES.with(|stack| {
            let mut stack = stack.borrow_mut();
            let Some(position) = stack.iter().position(|(id, _)| *id == self.id) else {
                tracing::trace!(id = self.id, "clock override already discarded");
                return;
            };
            if stack.len() > position + 1 {
                tracing::debug!(
                    id = self.id,
                    nested = stack.len() - position - 1,
                    "clock guard dropped out of order, discarding nested overrides"
                );
            }
            stack.truncate(position);
            tracing::trace!(id = self.id, depth = position, "clock override removed");
        });
    }
}

/// Makes `clock` the source of [`DateTime::now`] on this thread until the
/// returned guard is dropped.
pub fn install<C: Clock + 'static>(clock: C) -> ClockGuard {
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    let depth = OVERRIDES.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push((id, Rc::new(clock)));
        stack.len() - 1
    });
    tracing::trace!(id, depth, "clock override installed");
    ClockGuard {
        id,
        _thread_bound: PhantomData,
    }
}

/// Runs `f` with `clock` installed, restoring the previous clock afterwards.
pub fn with_clock<C, F, R>(clock: C, f: F) -> R
where
    C: Clock + 'static,
    F: FnOnce() -> R,
{
    let _guard = install(clock);
    f()
}

/// `true` while an override is installed on this thread.
pub fn is_overridden() -> bool {
    OVERRIDES.with(|stack| !stack.borrow().is_empty())
}

/// The current instant from the innermost override, or the system clock.
pub fn now() -> DateTime {
    // Clone out of the borrow so a clock may itself consult this module.
    let active = OVERRIDES.with(|stack| stack.borrow().last().map(|(_, clock)| Rc::clone(clock)));
    match active {
        Some(clock) => clock.now(),
        None => SystemClock.now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Minutes, Seconds};
    use std::panic;

    #[test]
    fn test_fixed_clock_pins_now() {
        let pinned = DateTime::at(2012, 3, 21, 12, 21, 43);
        with_clock(FixedClock(pinned), || {
            assert_eq!(DateTime::now(), pinned);
            assert_eq!(DateTime::now(), pinned);
        });
    }

    #[test]
    fn test_overrides_nest_and_restore() {
        let outer = DateTime::new(2000, 1, 1);
        let inner = DateTime::new(2012, 2, 29);
        assert!(!is_overridden());

        let outer_guard = install(FixedClock(outer));
        {
            let _inner = install(FixedClock(inner));
            assert_eq!(now(), inner);
        }
        assert_eq!(now(), outer);
        drop(outer_guard);
        assert!(!is_overridden());
    }

    #[test]
    fn test_stepping_clock_advances_per_read() {
        let clock = Rc::new(SteppingClock::new(DateTime::new(2012, 1, 31), Minutes(90)));
        let _guard = install(Rc::clone(&clock));
        assert_eq!(DateTime::now(), DateTime::at(2012, 1, 31, 0, 0, 0));
        assert_eq!(DateTime::now(), DateTime::at(2012, 1, 31, 1, 30, 0));
        assert_eq!(clock.peek(), DateTime::at(2012, 1, 31, 3, 0, 0));
    }

    #[test]
    fn test_override_is_restored_after_panic() {
        let result = panic::catch_unwind(|| {
            with_clock(FixedClock(DateTime::new(1999, 12, 31)), || {
                panic!("boom");
            })
        });
        assert!(result.is_err());
        assert!(!is_overridden());
    }

    #[test]
    fn test_out_of_order_drop_discards_nested() {
        let outer = install(FixedClock(DateTime::new(2000, 1, 1)));
        let inner = install(SteppingClock::new(DateTime::new(2001, 1, 1), Seconds(1)));
        drop(outer);
        assert!(!is_overridden());
        drop(inner);
        assert!(!is_overridden());
    }

    #[test]
    fn test_stale_guard_leaves_later_overrides_alone() {
        let outer = install(FixedClock(DateTime::new(2000, 1, 1)));
        let stale = install(FixedClock(DateTime::new(2001, 1, 1)));
        drop(outer);

        let first = install(FixedClock(DateTime::new(2002, 1, 1)));
        let second = install(FixedClock(DateTime::new(2003, 1, 1)));
        drop(stale);
        assert_eq!(now(), DateTime::new(2003, 1, 1));

        drop(second);
        assert_eq!(now(), DateTime::new(2002, 1, 1));
        drop(first);
        assert!(!is_overridden());
    }

    #[test]
    fn test_system_clock_is_recent() {
        let now = SystemClock.now();
        assert!(now > DateTime::new(2020, 1, 1));
    }

    #[test]
    fn test_overrides_are_per_thread() {
        let pinned = DateTime::new(1980, 2, 29);
        let _guard = install(FixedClock(pinned));
        let other = std::thread::spawn(is_overridden).join().unwrap();
        assert!(!other);
        assert_eq!(now(), pinned);
    }
}
