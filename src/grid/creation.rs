// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`PricingGrid`] instances from a contract window and
//! a persisted periods structure.

use std::collections::HashMap;

use crate::{
    ContractWindow, Error, FlexibilityParams, IndexStatus, MonthRow, Period,
    PeriodizationConfig, PersistedMonth, YearMonth,
};

use super::{PendingTextMap, PricingGrid, RowIndexMap, TabRange};

/// `PricingGrid` instantiation.
impl PricingGrid {
    /// Creates a new [`PricingGrid`] for the contract window between the
    /// given `YYYY-MM`-or-finer `start` and `end` dates.
    ///
    /// If the window can't be parsed, the grid falls back to a single tab for
    /// the [configured fallback year][PeriodizationConfig::fallback_year].
    pub fn new(
        start: &str,
        end: &str,
        flexibility: FlexibilityParams,
        persisted: &[Period],
        config: PeriodizationConfig,
    ) -> Self {
        let window = match ContractWindow::parse(start, end) {
            Ok(window) => Some(window),
            Err(err) => {
                tracing::warn!(
                    "{}. Falling back to a single tab for {}.",
                    err,
                    config.fallback_year()
                );
                None
            }
        };
        Self::build(window, flexibility, persisted, config)
    }

    /// Creates a new [`PricingGrid`] for the contract window between the
    /// given `start` and `end` dates.
    ///
    /// Returns an error if the window can't be parsed.
    pub fn try_new(
        start: &str,
        end: &str,
        flexibility: FlexibilityParams,
        persisted: &[Period],
        config: PeriodizationConfig,
    ) -> Result<Self, Error> {
        let window = ContractWindow::parse(start, end)?;
        Ok(Self::build(Some(window), flexibility, persisted, config))
    }

    /// Rebuilds the grid from scratch for a new contract window or persisted
    /// structure.
    ///
    /// Unsaved edits are dropped, and the index table has to be applied
    /// again.  The active year is kept if it is still part of the grid.
    pub fn rebuild(&mut self, start: &str, end: &str, persisted: &[Period]) {
        let active_year = self.active_year;
        *self = Self::new(start, end, self.flexibility, persisted, self.config.clone());
        if self.tabs.iter().any(|tab| tab.year == active_year) {
            self.active_year = active_year;
        }
        tracing::debug!(
            "Rebuilt pricing grid with {} tabs and {} months.",
            self.tabs.len(),
            self.rows.len()
        );
    }

    fn build(
        window: Option<ContractWindow>,
        flexibility: FlexibilityParams,
        persisted: &[Period],
        config: PeriodizationConfig,
    ) -> Self {
        let seeds = Self::seeds(persisted);
        let years = match &window {
            Some(window) => window.years(),
            None => {
                let year = config.fallback_year();
                year..=year
            }
        };

        let mut rows = Vec::new();
        let mut row_indices = RowIndexMap::new();
        let mut tabs = Vec::new();

        for year in years {
            let first = rows.len();
            let months = YearMonth::months_of_year(year)
                .filter(|month| window.as_ref().map_or(true, |w| w.contains(month)));
            for month in months {
                row_indices.insert(month, rows.len());
                rows.push(MonthRow::seeded(
                    month,
                    seeds.get(&month).copied(),
                    &flexibility,
                ));
            }
            tabs.push(TabRange {
                year,
                rows: first..rows.len(),
            });
        }

        let active_year = tabs.first().map_or_else(|| config.fallback_year(), |tab| tab.year);

        Self {
            rows,
            row_indices,
            tabs,
            window,
            flexibility,
            index_status: IndexStatus::Loading,
            pending: PendingTextMap::new(),
            active_year,
            config,
        }
    }

    /// Returns the persisted entry for each month.  When a month appears in
    /// more than one period, the last one wins.
    fn seeds(persisted: &[Period]) -> HashMap<YearMonth, &PersistedMonth> {
        persisted
            .iter()
            .flat_map(|period| &period.months)
            .map(|month| (month.month, month))
            .collect()
    }
}
