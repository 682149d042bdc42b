//! Calendar and clock arithmetic for delta terms

use chrono::{
    DateTime, Days, LocalResult, Months, NaiveDateTime, Offset, TimeDelta, TimeZone,
};
use chrono_tz::Tz;

use crate::parser::ast::{DeltaTerm, Sign, Unit};

/// Shift a time by one delta term
///
/// Years and months move the calendar month (clamping to the last day of a shorter
/// month) and days move the calendar date, both on the local wall clock. A wall-clock
/// time repeated by a backward transition resolves to its earlier instant; one skipped
/// by a forward transition is read with the offset in force before it, so 02:30 in a
/// one-hour gap becomes 03:30. Hours, minutes and seconds add exact elapsed time.
/// Returns `None` when the result is out of range.
pub fn shift(time: &DateTime<Tz>, term: &DeltaTerm) -> Option<DateTime<Tz>> {
    match term.unit {
        Unit::Year => {
            let months = u32::try_from(term.magnitude).ok()?.checked_mul(12)?;
            shift_months(time, term.sign, months)
        }
        Unit::Month => shift_months(time, term.sign, u32::try_from(term.magnitude).ok()?),
        Unit::Day => {
            let days = Days::new(term.magnitude);
            let local = match term.sign {
                Sign::Plus => time.naive_local().checked_add_days(days),
                Sign::Minus => time.naive_local().checked_sub_days(days),
            }?;
            resolve_local(&time.timezone(), local)
        }
        Unit::Hour | Unit::Minute | Unit::Second => {
            let magnitude = i64::try_from(term.magnitude).ok()?;
            let elapsed = match term.unit {
                Unit::Hour => TimeDelta::try_hours(magnitude)?,
                Unit::Minute => TimeDelta::try_minutes(magnitude)?,
                _ => TimeDelta::try_seconds(magnitude)?,
            };
            match term.sign {
                Sign::Plus => time.checked_add_signed(elapsed),
                Sign::Minus => time.checked_sub_signed(elapsed),
            }
        }
    }
}

fn shift_months(time: &DateTime<Tz>, sign: Sign, months: u32) -> Option<DateTime<Tz>> {
    let months = Months::new(months);
    let local = match sign {
        Sign::Plus => time.naive_local().checked_add_months(months),
        Sign::Minus => time.naive_local().checked_sub_months(months),
    }?;
    resolve_local(&time.timezone(), local)
}

/// Map a wall-clock time back into its zone
fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(time) => Some(time),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            // Gaps last hours, so a day earlier is still on the old offset
            let before = local.checked_sub_days(Days::new(1))?;
            let offset = tz.offset_from_utc_datetime(&before).fix();
            let utc = local.checked_sub_signed(TimeDelta::try_seconds(i64::from(
                offset.local_minus_utc(),
            ))?)?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}
