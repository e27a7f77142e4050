//! Calendar arithmetic and the per-day workload aggregation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

pub const MONTH_NAMES: [&str; 12] = [
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

/// Anything that occupies calendar days and carries a weight.
pub trait Workload {
    fn weight(&self) -> i64;

    fn falls_on(&self, date: NaiveDate) -> bool;
}

pub fn month_name(month: u32) -> Option<&'static str> {
    let index = month.checked_sub(1)? as usize;
    MONTH_NAMES.get(index).copied()
}

/// First and last day of a month, `None` for a month outside 1..=12.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    Some((first, next - Duration::days(1)))
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    month_bounds(year, month).map(|(_, last)| last.day())
}

/// Weekday of the first of the month, Monday = 1 through Sunday = 7.
pub fn first_weekday(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.weekday().number_from_monday())
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn day_weight<A, S>(date: NaiveDate, assignments: &[A], schedules: &[S]) -> i64
where
    A: Workload,
    S: Workload,
{
    let assigned: i64 = assignments
        .iter()
        .filter(|a| a.falls_on(date))
        .map(Workload::weight)
        .sum();
    let scheduled: i64 = schedules
        .iter()
        .filter(|s| s.falls_on(date))
        .map(Workload::weight)
        .sum();

    assigned + scheduled
}

/// Combined weight for every day of the month, keyed by day of month.
///
/// Days with nothing on them are present with a weight of 0. Items are
/// matched on full calendar dates, so a schedule running across a month
/// boundary only counts towards the days it actually covers.
pub fn combined_weights<A, S>(
    year: i32,
    month: u32,
    assignments: &[A],
    schedules: &[S],
) -> Option<BTreeMap<u32, i64>>
where
    A: Workload,
    S: Workload,
{
    let (first, last) = month_bounds(year, month)?;

    let weights = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| (date.day(), day_weight(date, assignments, schedules)))
        .collect();

    Some(weights)
}
