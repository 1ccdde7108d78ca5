// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `YearMonth` type, which identifies a calendar
//! month, and the calendar helpers built on top of it.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The conventional number of hours in an average month, used for months
/// that can't be placed on the calendar.
pub const AVERAGE_HOURS_IN_MONTH: u32 = 730;

/// A calendar month, written as `YYYY-MM`.
///
/// `YearMonth`s order chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a new `YearMonth`.
    ///
    /// Returns an error if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_month(format!(
                "Month must be between 1 and 12, found {year}-{month:02}."
            )));
        }
        Ok(Self { year, month })
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month of the year, in `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the number of hours in this month.
    pub fn hours(&self) -> u32 {
        hours_in_month(self.year, self.month)
    }

    /// Returns the month that follows this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns the twelve months of the given year, January first.
    pub fn months_of_year(year: i32) -> MonthRange {
        months_between(Self { year, month: 1 }, Self { year, month: 12 })
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parses the leading `YYYY-MM` of a date string.
///
/// Finer-grained values like `2024-01-15` or `2024-01-15T00:00:00Z` are
/// accepted, and everything after the month is ignored.
impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::invalid_month(format!("Can't parse '{s}' as YYYY-MM."));

        let (year, rest) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let month_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if !(1..=2).contains(&month_len) {
            return Err(invalid());
        }
        let (month, tail) = rest.split_at(month_len);
        if !(tail.is_empty() || tail.starts_with(['-', 'T', ' '])) {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Returns the exact number of hours in the given calendar month.
///
/// Leap years are accounted for.  A month number outside `1..=12` gets
/// [`AVERAGE_HOURS_IN_MONTH`].
pub fn hours_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return AVERAGE_HOURS_IN_MONTH;
    };
    let Some(next) = first.checked_add_months(Months::new(1)) else {
        return AVERAGE_HOURS_IN_MONTH;
    };
    u32::try_from((next - first).num_days() * 24).unwrap_or(AVERAGE_HOURS_IN_MONTH)
}

/// Returns an iterator over the months from `start` to `end`, both
/// inclusive.
///
/// The iterator is empty when `start` is after `end`.
pub fn months_between(start: YearMonth, end: YearMonth) -> MonthRange {
    MonthRange {
        next: (start <= end).then_some(start),
        end,
    }
}

/// A lazy iterator over consecutive calendar months.
///
/// Cloning a `MonthRange` restarts it from its current position.
#[derive(Clone, Debug)]
pub struct MonthRange {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl MonthRange {
    /// Returns the months between two `YYYY-MM` tokens, both inclusive.
    ///
    /// If either token can't be parsed, the range is empty.
    pub fn parse(start: &str, end: &str) -> Self {
        let (Ok(start), Ok(end)) = (start.parse::<YearMonth>(), end.parse::<YearMonth>()) else {
            return Self::empty();
        };
        months_between(start, end)
    }

    /// Returns a range that yields no months.
    pub fn empty() -> Self {
        let origin = YearMonth { year: 0, month: 1 };
        Self {
            next: None,
            end: origin,
        }
    }
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = (current < self.end).then(|| current.next());
        Some(current)
    }
}
