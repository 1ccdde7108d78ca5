// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `ContractWindow` struct, which is the inclusive
//! range of months in which a contract is valid.

use std::ops::RangeInclusive;

use crate::year_month::{months_between, MonthRange};
use crate::{Error, YearMonth};

/// The inclusive range of calendar months in which a contract is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractWindow {
    start: YearMonth,
    end: YearMonth,
}

impl ContractWindow {
    /// Creates a new `ContractWindow` from its first and last month.
    ///
    /// Returns an error if `start` is after `end`.
    pub fn try_new(start: YearMonth, end: YearMonth) -> Result<Self, Error> {
        if start > end {
            return Err(Error::invalid_window(format!(
                "Contract window starts ({start}) after it ends ({end})."
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses a `ContractWindow` from two `YYYY-MM`-or-finer date strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        let parse = |value: &str, which: &str| {
            value.parse::<YearMonth>().map_err(|e| {
                Error::invalid_window(format!("Invalid {which} of contract window: {e}"))
            })
        };
        Self::try_new(parse(start, "start")?, parse(end, "end")?)
    }

    /// Returns the first month of the window.
    pub fn start(&self) -> YearMonth {
        self.start
    }

    /// Returns the last month of the window.
    pub fn end(&self) -> YearMonth {
        self.end
    }

    /// Returns true if the given month is part of the window.
    pub fn contains(&self, month: &YearMonth) -> bool {
        (self.start..=self.end).contains(month)
    }

    /// Returns the calendar years that overlap the window, fully or
    /// partially.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }

    /// Returns an iterator over all months of the window.
    pub fn months(&self) -> MonthRange {
        months_between(self.start, self.end)
    }
}
