//! Calendar-date and time-of-day primitives shared across the crate.
//!
//! Everything here is naive local time: the dashboard shows the user their
//! own day, so no timezone conversion happens anywhere in the core. Dates
//! travel as canonical `YYYY-MM-DD` strings, times of day as zero-padded
//! 24-hour `HH:MM` strings, and weekday sets as comma-joined lowercase
//! three-letter codes (`"mon,wed,fri"`), the same shapes the rows are
//! stored with.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef};
use thiserror::Error;

/// Day of the week, keyed by the lowercase three-letter codes used at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    /// All seven days, sunday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Weekday::Sun => "sun",
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
        }
    }

    /// The weekday a calendar date falls on.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Sun => Weekday::Sun,
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid weekday code: {0}")]
pub struct ParseWeekdayError(String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sun" => Ok(Weekday::Sun),
            "mon" => Ok(Weekday::Mon),
            "tue" => Ok(Weekday::Tue),
            "wed" => Ok(Weekday::Wed),
            "thu" => Ok(Weekday::Thu),
            "fri" => Ok(Weekday::Fri),
            "sat" => Ok(Weekday::Sat),
            _ => Err(ParseWeekdayError(s.to_string())),
        }
    }
}

/// An unordered set of weekdays, the repeat pattern of a recurrence rule.
///
/// Parses from and renders to the stored `"mon,wed"` form. The empty set is
/// a representable value; whether it is acceptable is the caller's call
/// (series creation rejects it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        WeekdaySet(0)
    }

    /// The set containing every day of the week.
    pub fn full() -> Self {
        let mut set = WeekdaySet::new();
        for day in Weekday::ALL {
            set.insert(day);
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in the set, sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(day.code())?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for WeekdaySet {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = WeekdaySet::new();
        for code in s.split(',') {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            set.insert(code.parse()?);
        }
        Ok(set)
    }
}

impl TryFrom<String> for WeekdaySet {
    type Error = ParseWeekdayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WeekdaySet> for String {
    fn from(set: WeekdaySet) -> String {
        set.to_string()
    }
}

impl sqlx::Type<Sqlite> for WeekdaySet {
    fn type_info() -> SqliteTypeInfo {
        <&str as sqlx::Type<Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, Sqlite> for WeekdaySet {
    fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
        buf.push(SqliteArgumentValue::Text(Cow::Owned(self.to_string())));
        IsNull::No
    }
}

impl<'r> sqlx::Decode<'r, Sqlite> for WeekdaySet {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as sqlx::Decode<Sqlite>>::decode(value)?;
        Ok(text.parse()?)
    }
}

/// A naive local time of day with minute resolution, stored as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

#[derive(Error, Debug, PartialEq)]
#[error("Invalid time of day: {0}")]
pub struct ParseTimeOfDayError(String);

impl TimeOfDay {
    /// Builds a time of day; `None` when out of the 24-hour range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(u16::from(hour) * 60 + u16::from(minute)))
        } else {
            None
        }
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Minutes since midnight, the unit the timeline layout works in.
    pub fn minutes_from_midnight(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| ParseTimeOfDayError(s.to_string()))?;
        let hour: u8 = hour
            .parse()
            .map_err(|_| ParseTimeOfDayError(s.to_string()))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| ParseTimeOfDayError(s.to_string()))?;
        TimeOfDay::new(hour, minute).ok_or_else(|| ParseTimeOfDayError(s.to_string()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeOfDayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}

impl sqlx::Type<Sqlite> for TimeOfDay {
    fn type_info() -> SqliteTypeInfo {
        <&str as sqlx::Type<Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, Sqlite> for TimeOfDay {
    fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
        buf.push(SqliteArgumentValue::Text(Cow::Owned(self.to_string())));
        IsNull::No
    }
}

impl<'r> sqlx::Decode<'r, Sqlite> for TimeOfDay {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as sqlx::Decode<Sqlite>>::decode(value)?;
        Ok(text.parse()?)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid date (expected YYYY-MM-DD): {0}")]
pub struct ParseDateError(String);

/// Parses a canonical zero-padded `YYYY-MM-DD` string.
///
/// Malformed input is rejected, not recovered from; callers validate at the
/// boundary before dates reach the core.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseDateError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ParseDateError(s.to_string()))
}

/// Renders a date back to its canonical zero-padded form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Inclusive range of calendar days.
///
/// Empty when `start > end`. `Clone` so a range can be walked more than
/// once.
#[derive(Debug, Clone)]
pub struct DateRange {
    cursor: NaiveDate,
    end: NaiveDate,
    exhausted: bool,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            cursor: start,
            end,
            exhausted: start > end,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.exhausted {
            return None;
        }
        let current = self.cursor;
        if current == self.end {
            self.exhausted = true;
        } else {
            self.cursor = current + Duration::days(1);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn weekday_of_known_dates() {
        // 2026-01-05 is a Monday
        assert_eq!(Weekday::from_date(date("2026-01-05")), Weekday::Mon);
        assert_eq!(Weekday::from_date(date("2026-01-04")), Weekday::Sun);
        assert_eq!(Weekday::from_date(date("2026-01-10")), Weekday::Sat);
    }

    #[test]
    fn weekday_set_round_trips() {
        let set: WeekdaySet = "mon,wed,fri".parse().unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(!set.contains(Weekday::Sun));
        assert_eq!(set.to_string(), "mon,wed,fri");
    }

    #[test]
    fn weekday_set_ignores_order_and_whitespace() {
        let set: WeekdaySet = " fri , mon ".parse().unwrap();
        assert_eq!(set.to_string(), "mon,fri");
    }

    #[test]
    fn weekday_set_rejects_unknown_codes() {
        assert!("mon,funday".parse::<WeekdaySet>().is_err());
    }

    #[test]
    fn weekday_set_full_has_seven_days() {
        assert_eq!(WeekdaySet::full().len(), 7);
    }

    #[rstest]
    #[case("00:00", 0)]
    #[case("09:05", 545)]
    #[case("23:59", 1439)]
    fn time_of_day_parses(#[case] input: &str, #[case] minutes: u16) {
        let t: TimeOfDay = input.parse().unwrap();
        assert_eq!(t.minutes_from_midnight(), minutes);
        assert_eq!(t.to_string(), input);
    }

    #[rstest]
    #[case("24:00")]
    #[case("12:60")]
    #[case("9am")]
    #[case("12")]
    fn time_of_day_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn parse_date_rejects_malformed() {
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("Jan 5 2026").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn format_date_zero_pads() {
        assert_eq!(format_date(date("2026-01-05")), "2026-01-05");
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let days: Vec<_> = DateRange::new(date("2026-01-05"), date("2026-01-07")).collect();
        assert_eq!(
            days,
            vec![date("2026-01-05"), date("2026-01-06"), date("2026-01-07")]
        );
    }

    #[test]
    fn date_range_empty_when_inverted() {
        assert_eq!(DateRange::new(date("2026-01-07"), date("2026-01-05")).count(), 0);
    }

    #[test]
    fn date_range_single_day() {
        let days: Vec<_> = DateRange::new(date("2026-01-05"), date("2026-01-05")).collect();
        assert_eq!(days, vec![date("2026-01-05")]);
    }

    #[test]
    fn date_range_restartable_via_clone() {
        let range = DateRange::new(date("2026-01-01"), date("2026-01-31"));
        assert_eq!(range.clone().count(), 31);
        assert_eq!(range.count(), 31);
    }
}
