// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving rows, tabs and state from a [`PricingGrid`].

use std::ops::Range;

use crate::iterators::{Rows, YearTab, YearTabs};
use crate::{
    ContractWindow, Error, FlexibilityParams, IndexStatus, MonthRow, PeriodizationConfig,
    PricingGrid, YearMonth,
};

/// `MonthRow` and `YearTab` retrieval.
impl PricingGrid {
    /// Returns the row of the given month, if it is part of the grid.
    pub fn row(&self, month: YearMonth) -> Result<&MonthRow, Error> {
        self.row_index(month).map(|index| &self.rows[index])
    }

    /// Returns an iterator over all rows of the grid, in chronological order.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            iter: self.rows.iter(),
        }
    }

    /// Returns the tab of the given year, if it is part of the grid.
    pub fn year_tab(&self, year: i32) -> Result<YearTab<'_>, Error> {
        self.tab_range(year).map(|rows| YearTab {
            year,
            rows: &self.rows[rows],
        })
    }

    /// Returns an iterator over the tabs of the grid, one per calendar year.
    pub fn year_tabs(&self) -> YearTabs<'_> {
        YearTabs {
            rows: &self.rows,
            iter: self.tabs.iter(),
        }
    }

    /// Returns the year of the tab that is currently being edited.
    pub fn active_year(&self) -> i32 {
        self.active_year
    }

    /// Makes the tab of the given year the one being edited.
    ///
    /// Returns an error if there is no tab for the year.
    pub fn set_active_year(&mut self, year: i32) -> Result<(), Error> {
        self.tab_range(year)?;
        self.active_year = year;
        Ok(())
    }

    /// Returns the contract window of the grid, or `None` if the grid was
    /// built for the fallback year.
    pub fn window(&self) -> Option<&ContractWindow> {
        self.window.as_ref()
    }

    /// Returns the flexibility parameters the bounds are computed with.
    pub fn flexibility(&self) -> FlexibilityParams {
        self.flexibility
    }

    /// Returns the availability of index data.
    pub fn index_status(&self) -> &IndexStatus {
        &self.index_status
    }

    /// Returns true if adjusted prices may currently be entered by hand.
    pub fn allows_manual_prices(&self) -> bool {
        self.index_status.allows_manual_prices()
    }

    /// Returns the configuration the grid was built with.
    pub fn config(&self) -> &PeriodizationConfig {
        &self.config
    }

    pub(crate) fn row_index(&self, month: YearMonth) -> Result<usize, Error> {
        self.row_indices
            .get(&month)
            .copied()
            .ok_or_else(|| {
                Error::month_not_found(format!("Month {month} is not part of the grid."))
            })
    }

    pub(crate) fn tab_range(&self, year: i32) -> Result<Range<usize>, Error> {
        self.tabs
            .iter()
            .find(|tab| tab.year == year)
            .map(|tab| tab.rows.clone())
            .ok_or_else(|| {
                Error::year_not_found(format!("Year {year} is not part of the grid."))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_utils::GridBuilder;

    #[test]
    fn test_row() -> Result<(), Error> {
        let grid = GridBuilder::new("2024-11", "2025-01").build();

        assert_eq!(grid.row(YearMonth::new(2024, 12)?)?.hours_in_month(), 744);
        assert_eq!(
            grid.row(YearMonth::new(2024, 10)?),
            Err(Error::month_not_found("Month 2024-10 is not part of the grid."))
        );
        assert!(grid.rows().map(|row| row.month().to_string()).eq([
            "2024-11", "2024-12", "2025-01"
        ]));

        Ok(())
    }

    #[test]
    fn test_year_tab() -> Result<(), Error> {
        let grid = GridBuilder::new("2024-11", "2025-01").build();

        let tab = grid.year_tab(2025)?;
        assert_eq!(tab.year(), 2025);
        assert_eq!(tab.rows().len(), 1);
        assert_eq!(tab.start_month(), Some(YearMonth::new(2025, 1)?));
        assert_eq!(tab.end_month(), Some(YearMonth::new(2025, 1)?));

        assert!(grid
            .year_tab(2023)
            .is_err_and(|e| e == Error::year_not_found("Year 2023 is not part of the grid.")));

        Ok(())
    }

    #[test]
    fn test_active_year() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-11", "2025-01").build();

        assert_eq!(grid.active_year(), 2024);
        grid.set_active_year(2025)?;
        assert_eq!(grid.active_year(), 2025);
        assert_eq!(
            grid.set_active_year(2026),
            Err(Error::year_not_found("Year 2026 is not part of the grid."))
        );
        assert_eq!(grid.active_year(), 2025);

        Ok(())
    }
}
