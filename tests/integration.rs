use almanac::clock::{self, FixedClock, SteppingClock};
use almanac::{
    DateTime, Days, Delta, Hours, Microseconds, Milliseconds, Minutes, Months, Nanoseconds,
    Seconds, Span, Unit, Weeks, Years,
};

fn sample() -> DateTime {
    DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 200, 300)
}

#[test]
fn now_can_be_captured() {
    let now = DateTime::now();
    assert!(now > DateTime::new(2020, 1, 1));
}

#[test]
fn construction_keeps_canonical_fields() {
    let date = sample();
    assert_eq!(date.year(), 2012);
    assert_eq!(date.month(), 3);
    assert_eq!(date.day(), 21);
    assert_eq!(date.hour(), 12);
    assert_eq!(date.minute(), 21);
    assert_eq!(date.second(), 43);
    assert_eq!(date.millisecond(), 100);
    assert_eq!(date.microsecond(), 200);
    assert_eq!(date.nanosecond(), 300);
}

#[test]
fn canonical_fields_survive_construction_for_every_day() {
    let times = [
        (0, 0, 0, 0, 0, 0),
        (12, 21, 43, 100, 200, 300),
        (23, 59, 59, 999, 999, 999),
    ];
    for year in [2011, 2012] {
        for month in 1..=12u8 {
            for day in 1..=almanac::calendar::days_in_month(year, month) {
                for (hour, minute, second, ms, us, ns) in times {
                    let date = DateTime::at_nanos(
                        year,
                        month.into(),
                        day.into(),
                        hour,
                        minute,
                        second,
                        ms,
                        us,
                        ns,
                    );
                    let got = (
                        i64::from(date.year()),
                        date.month(),
                        date.day(),
                        i64::from(date.hour()),
                        i64::from(date.minute()),
                        i64::from(date.second()),
                        i64::from(date.millisecond()),
                        i64::from(date.microsecond()),
                        i64::from(date.nanosecond()),
                    );
                    assert_eq!(got, (year, month, day, hour, minute, second, ms, us, ns));
                }
            }
        }
    }
}

#[test]
fn strftime_renders_fixed_zone_label() {
    let date = DateTime::at(2012, 3, 21, 12, 21, 43);
    assert_eq!(date.strftime("%Y-%m-%d %H:%M:%S %Z"), "2012-03-21 12:21:43 UTC");
}

#[test]
fn fixed_units_add_to_their_own_field() {
    let date = sample();
    assert_eq!(date + Nanoseconds(10), DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 200, 310));
    assert_eq!(date + Microseconds(10), DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 210, 300));
    assert_eq!(date + Milliseconds(10), DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 110, 200, 300));
    assert_eq!(date + Seconds(10), DateTime::at_nanos(2012, 3, 21, 12, 21, 53, 100, 200, 300));
    assert_eq!(date + Minutes(10), DateTime::at_nanos(2012, 3, 21, 12, 31, 43, 100, 200, 300));
    assert_eq!(date + Hours(10), DateTime::at_nanos(2012, 3, 21, 22, 21, 43, 100, 200, 300));
    assert_eq!(date + Days(10), DateTime::at_nanos(2012, 3, 31, 12, 21, 43, 100, 200, 300));
    assert_eq!(date + Weeks(1), DateTime::at_nanos(2012, 3, 28, 12, 21, 43, 100, 200, 300));
}

#[test]
fn overflow_carries_at_every_fixed_boundary() {
    let expect = |got: DateTime, want: DateTime| assert_eq!(got, want);
    expect(
        DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 200, 1300),
        DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 201, 300),
    );
    expect(
        DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 100, 1200, 300),
        DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 101, 200, 300),
    );
    expect(
        DateTime::at_nanos(2012, 3, 21, 12, 21, 43, 1100, 200, 300),
        DateTime::at_nanos(2012, 3, 21, 12, 21, 44, 100, 200, 300),
    );
    expect(
        DateTime::at_nanos(2012, 3, 21, 12, 21, 61, 100, 200, 300),
        DateTime::at_nanos(2012, 3, 21, 12, 22, 1, 100, 200, 300),
    );
    expect(
        DateTime::at_nanos(2012, 3, 21, 12, 61, 43, 100, 200, 300),
        DateTime::at_nanos(2012, 3, 21, 13, 1, 43, 100, 200, 300),
    );
    expect(
        DateTime::at_nanos(2012, 3, 21, 25, 21, 43, 100, 200, 300),
        DateTime::at_nanos(2012, 3, 22, 1, 21, 43, 100, 200, 300),
    );
}

#[test]
fn day_overflow_respects_month_length() {
    assert_eq!(
        DateTime::at_nanos(2012, 3, 32, 12, 21, 43, 100, 200, 300),
        DateTime::at_nanos(2012, 4, 1, 12, 21, 43, 100, 200, 300)
    );
    assert_eq!(DateTime::at(2011, 2, 29, 12, 21, 43), DateTime::at(2011, 3, 1, 12, 21, 43));
    assert_eq!(DateTime::at(2012, 2, 30, 12, 21, 43), DateTime::at(2012, 3, 1, 12, 21, 43));
}

#[test]
fn leap_year_rule_applies_century_exceptions() {
    assert_eq!(DateTime::new(1900, 2, 29).month(), 3);
    assert_eq!(DateTime::new(2000, 2, 29).month(), 2);
    assert_eq!(DateTime::new(1980, 2, 29).month(), 2);
}

#[test]
fn month_addition_keeps_day_or_clamps_to_ultimo() {
    let date = sample();
    assert_eq!(date + Months(1), DateTime::at_nanos(2012, 4, 21, 12, 21, 43, 100, 200, 300));

    let end_of_january = DateTime::at_nanos(2012, 1, 31, 12, 21, 43, 100, 200, 300);
    assert_eq!(
        end_of_january + Months(1),
        DateTime::at_nanos(2012, 2, 29, 12, 21, 43, 100, 200, 300)
    );
    assert_eq!(DateTime::new(2011, 1, 31) + Months(1), DateTime::new(2011, 2, 28));
    assert_eq!(DateTime::new(2012, 11, 30) + Months(3), DateTime::new(2013, 2, 28));
}

#[test]
fn year_addition_clamps_leap_day() {
    assert_eq!(DateTime::at(2012, 2, 29, 0, 0, 0) + Years(1), DateTime::at(2013, 2, 28, 0, 0, 0));
    assert_eq!(DateTime::new(2012, 2, 29) + Years(4), DateTime::new(2016, 2, 29));
    assert_eq!(DateTime::new(2012, 2, 29) - Years(112), DateTime::new(1900, 2, 28));
}

#[test]
fn subtraction_borrows_across_boundaries() {
    let new_year = DateTime::new(2013, 1, 1);
    assert_eq!(
        new_year - Nanoseconds(1),
        DateTime::at_nanos(2012, 12, 31, 23, 59, 59, 999, 999, 999)
    );
    assert_eq!(DateTime::new(2012, 3, 1) - Days(1), DateTime::new(2012, 2, 29));
    assert_eq!(DateTime::new(2012, 3, 31) - Months(1), DateTime::new(2012, 2, 29));
}

#[test]
fn sequential_fixed_additions_match_combined_span() {
    let date = sample();
    let pairs = [
        (Span::nanoseconds(999), Span::nanoseconds(2)),
        (Span::seconds(59), Span::milliseconds(1_001)),
        (Span::hours(23), Span::minutes(61)),
        (Span::weeks(1), Span::days(-8)),
        (Span::days(400), Span::hours(-1)),
    ];
    for (a, b) in pairs {
        let combined = a.combine(b).expect("same family");
        assert_eq!(date + a + b, date + combined, "{a} + {b}");
    }
}

#[test]
fn mixed_delta_applies_calendar_part_first() {
    let delta = Delta::default() + Months(1) + Hours(36);
    assert_eq!(
        DateTime::new(2012, 1, 31) + delta,
        DateTime::at(2012, 3, 1, 12, 0, 0)
    );
    assert_eq!(
        DateTime::at(2012, 3, 1, 12, 0, 0) - delta,
        DateTime::new(2012, 1, 31)
    );
}

#[test]
fn every_unit_kind_is_accepted_by_the_operators() {
    let date = sample();
    for unit in Unit::ALL {
        let span = Span::new(unit, 1);
        assert_eq!(date + span, date.add_span(span));
        assert_eq!(date - span, date.add_span(-span));
    }
}

#[test]
fn clock_override_pins_and_restores_now() {
    let pinned = DateTime::at(2012, 3, 21, 12, 21, 43);
    let seen = clock::with_clock(FixedClock(pinned), DateTime::now);
    assert_eq!(seen, pinned);
    assert!(!clock::is_overridden());
}

#[test]
fn stepping_clock_drives_elapsed_time() {
    let start = DateTime::new(2012, 12, 31);
    let _guard = clock::install(SteppingClock::new(start, Hours(12)));
    let first = DateTime::now();
    let second = DateTime::now();
    let third = DateTime::now();
    assert_eq!(first, start);
    assert_eq!(third, DateTime::new(2013, 1, 1));
    assert_eq!(third - first, qtty::Days::new(1.0));
    assert_eq!(second.nanoseconds_since(&first), 12 * 3_600 * 1_000_000_000);
}

#[test]
fn iso8601_roundtrips_through_parse() {
    let date = sample();
    assert_eq!(date.iso8601(), "2012-03-21T12:21:43.100200300");
    assert_eq!(DateTime::parse_iso8601(&date.iso8601()), Ok(date));
}

#[cfg(feature = "serde")]
#[test]
fn serde_datetime_uses_iso8601() {
    let json = serde_json::to_string(&DateTime::at(2012, 3, 21, 12, 21, 43)).unwrap();
    assert_eq!(json, "\"2012-03-21T12:21:43\"");
}
