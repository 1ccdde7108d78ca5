// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over the rows and tabs of a `PricingGrid`.

use crate::grid::TabRange;
use crate::{MonthRow, YearMonth};

/// The rows of one calendar year of a `PricingGrid`.
#[derive(Clone, Copy, Debug)]
pub struct YearTab<'a> {
    pub(crate) year: i32,
    pub(crate) rows: &'a [MonthRow],
}

impl<'a> YearTab<'a> {
    /// Returns the calendar year of the tab.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the rows of the tab, in chronological order.
    pub fn rows(&self) -> &'a [MonthRow] {
        self.rows
    }

    /// Returns the first month of the tab.
    pub fn start_month(&self) -> Option<YearMonth> {
        self.rows.first().map(MonthRow::month)
    }

    /// Returns the last month of the tab.
    pub fn end_month(&self) -> Option<YearMonth> {
        self.rows.last().map(MonthRow::month)
    }
}

/// An iterator over the tabs of a `PricingGrid`.
pub struct YearTabs<'a> {
    pub(crate) rows: &'a [MonthRow],
    pub(crate) iter: std::slice::Iter<'a, TabRange>,
}

impl<'a> Iterator for YearTabs<'a> {
    type Item = YearTab<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.rows;
        self.iter.next().map(|tab| YearTab {
            year: tab.year,
            rows: &rows[tab.rows.clone()],
        })
    }
}

/// An iterator over the rows of a `PricingGrid`.
pub struct Rows<'a> {
    pub(crate) iter: std::slice::Iter<'a, MonthRow>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a MonthRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
