//! Day counts from a reference instant to month boundaries.
//!
//! A month "ends" when its last calendar day ends, i.e. at local midnight on
//! the first day of the following month. Counts are rounded up to whole days
//! and never negative. Calendar fields are read in the reference's own time
//! zone; the `*_now` variants use the process's local zone.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDateTime, TimeZone};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Days from `reference` until the end of its month.
pub fn days_to_end_of_month<Tz: TimeZone>(reference: &DateTime<Tz>) -> i64 {
    days_until_month_end(reference, 0)
}

/// Days from `reference` until the end of the following month.
pub fn days_to_end_of_next_month<Tz: TimeZone>(reference: &DateTime<Tz>) -> i64 {
    days_until_month_end(reference, 1)
}

pub fn days_to_end_of_month_now() -> i64 {
    days_to_end_of_month(&Local::now())
}

pub fn days_to_end_of_next_month_now() -> i64 {
    days_to_end_of_next_month(&Local::now())
}

fn days_until_month_end<Tz: TimeZone>(reference: &DateTime<Tz>, months_ahead: u32) -> i64 {
    let Some(boundary) = month_end(reference, months_ahead) else {
        return 0;
    };

    let millis = boundary
        .signed_duration_since(reference.clone())
        .num_milliseconds();

    ceil_days(millis).max(0)
}

/// Local midnight that closes the month `months_ahead` after the reference's month.
fn month_end<Tz: TimeZone>(reference: &DateTime<Tz>, months_ahead: u32) -> Option<DateTime<Tz>> {
    let midnight = reference
        .date_naive()
        .with_day(1)?
        .checked_add_months(Months::new(months_ahead + 1))?
        .and_hms_opt(0, 0, 0)?;

    let tz = reference.timezone();
    resolve_local(&tz, midnight)
        // Zones that skip midnight on a DST switch start the day an hour later.
        .or_else(|| resolve_local(&tz, midnight + Duration::hours(1)))
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&local).earliest()
}

fn ceil_days(millis: i64) -> i64 {
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}
