// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for copying the values of one month across a year, or across the
//! whole grid.

use std::ops::Range;

use crate::{Error, MonthRow, PriceSource, PricingGrid, VolumeSource};

/// The values of a source month that get copied by a fill.
#[derive(Debug)]
struct FillSource {
    index: usize,
    volume: Option<(VolumeSource, f64)>,
    base_price: Option<f64>,
    manual_adjusted_price: Option<f64>,
}

impl FillSource {
    fn from_row(index: usize, row: &MonthRow) -> Self {
        let volume = match (row.volume_source, row.volume_avg_power, row.volume_energy) {
            (Some(VolumeSource::Energy), _, Some(energy)) | (_, None, Some(energy)) => {
                Some((VolumeSource::Energy, energy))
            }
            (_, Some(avg_power), _) => Some((VolumeSource::AvgPower, avg_power)),
            (_, None, None) => None,
        };
        let manual_adjusted_price = match row.adjusted_price_source {
            PriceSource::Manual => row.adjusted_price,
            PriceSource::Derived | PriceSource::Persisted => None,
        };
        Self {
            index,
            volume,
            base_price: row.base_price,
            manual_adjusted_price,
        }
    }

    fn is_empty(&self) -> bool {
        self.volume.is_none() && self.base_price.is_none()
    }
}

/// Fill operations.
impl PricingGrid {
    /// Copies the volume and price of the first month of the active tab that
    /// has any, to every other month of that tab.
    ///
    /// Returns `false` if no month of the tab has a volume or price.
    pub fn fill_active_year(&mut self) -> Result<bool, Error> {
        self.fill_year(self.active_year)
    }

    /// Copies the volume and price of the first month of the given year that
    /// has any, to every other month of that year.
    ///
    /// The volume is copied through the field it was entered in, so copying
    /// an average power gives each month the same average power but its own
    /// energy.  Returns `false` if no month of the year has a volume or
    /// price.
    pub fn fill_year(&mut self, year: i32) -> Result<bool, Error> {
        let range = self.tab_range(year)?;
        let source = self.rows[range.clone()]
            .iter()
            .position(MonthRow::has_volume_or_price)
            .map(|offset| range.start + offset)
            .map(|index| FillSource::from_row(index, &self.rows[index]));

        let Some(source) = source else {
            tracing::debug!("Nothing to fill in year {}.", year);
            return Ok(false);
        };
        self.propagate(&source, range);
        Ok(true)
    }

    /// Copies the volume and price of the very first month of the grid to
    /// every other month of every year.
    ///
    /// Returns `false` if the first month has no volume or price.
    pub fn fill_all_years(&mut self) -> bool {
        let Some(first) = self.rows.first() else {
            return false;
        };
        let source = FillSource::from_row(0, first);
        if source.is_empty() {
            tracing::debug!("Nothing to fill: the first month of the grid is empty.");
            return false;
        }
        self.propagate(&source, 0..self.rows.len());
        true
    }

    fn propagate(&mut self, source: &FillSource, targets: Range<usize>) {
        let manual_adjusted_price = source
            .manual_adjusted_price
            .filter(|_| self.index_status.allows_manual_prices());
        let mut filled = 0;

        for index in targets.filter(|index| *index != source.index) {
            let row = &mut self.rows[index];
            match source.volume {
                Some((VolumeSource::AvgPower, avg_power)) => {
                    row.apply_avg_power(Some(avg_power), &self.flexibility)
                }
                Some((VolumeSource::Energy, energy)) => {
                    row.apply_energy(Some(energy), &self.flexibility)
                }
                None => {}
            }
            if source.base_price.is_some() {
                row.apply_base_price(source.base_price, &self.index_status);
            }
            if manual_adjusted_price.is_some() {
                row.apply_manual_adjusted_price(manual_adjusted_price);
            }

            let month = row.month;
            self.pending.retain(|(pending_month, _), _| *pending_month != month);
            filled += 1;
        }

        tracing::debug!(
            "Filled {} months from {}.",
            filled,
            self.rows[source.index].month
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_utils::{assert_close, GridBuilder};
    use crate::{EditableField, IndexTable, YearMonth};

    #[test]
    fn test_fill_year_with_avg_power() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-01", "2024-03")
            .flexibility(10.0, 10.0)
            .build();
        grid.set_volume_avg_power(YearMonth::new(2024, 1)?, Some(50.0))?;

        assert!(grid.fill_active_year()?);

        let rows = grid.year_tab(2024)?.rows();
        assert!(rows.iter().all(|row| row.volume_avg_power() == Some(50.0)));
        assert!(rows
            .iter()
            .map(|row| row.volume_energy())
            .eq([Some(37200.0), Some(34800.0), Some(37200.0)]));
        assert!(rows
            .iter()
            .all(|row| row.volume_seasonalized() == row.volume_energy()));
        assert_close(rows[1].flexibility_max(), 38280.0);
        assert_close(rows[1].flexibility_min(), 31320.0);

        Ok(())
    }

    #[test]
    fn test_fill_year_distinct_energy() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2023-01", "2023-12").build();
        grid.set_volume_avg_power(YearMonth::new(2023, 1)?, Some(50.0))?;
        grid.fill_year(2023)?;

        let energies = grid
            .rows()
            .take(4)
            .map(|row| row.volume_energy())
            .collect::<Vec<_>>();
        assert_eq!(
            energies,
            [Some(37200.0), Some(33600.0), Some(37200.0), Some(36000.0)]
        );

        Ok(())
    }

    #[test]
    fn test_fill_year_with_energy() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-01", "2024-04").build();
        grid.set_volume_energy(YearMonth::new(2024, 2)?, Some(72000.0))?;

        assert!(grid.fill_year(2024)?);

        let rows = grid.year_tab(2024)?.rows();
        assert!(rows.iter().all(|row| row.volume_energy() == Some(72000.0)));
        assert_eq!(rows[3].volume_avg_power(), Some(100.0));
        assert!(rows
            .iter()
            .all(|row| row.volume_source() == Some(VolumeSource::Energy)));

        Ok(())
    }

    #[test]
    fn test_fill_year_uses_first_filled_month() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-01", "2024-06").build();
        grid.set_base_price(YearMonth::new(2024, 3)?, Some(90.0))?;
        grid.set_base_price(YearMonth::new(2024, 5)?, Some(70.0))?;
        grid.set_volume_seasonalized(YearMonth::new(2024, 1)?, Some(1.0))?;

        assert!(grid.fill_year(2024)?);

        assert!(grid.rows().all(|row| row.base_price() == Some(90.0)));
        assert!(grid.rows().all(|row| row.adjusted_price() == Some(90.0)));
        // No volume in the source month, so the volumes are left alone.
        assert_eq!(
            grid.row(YearMonth::new(2024, 1)?)?.volume_seasonalized(),
            Some(1.0)
        );
        assert!(grid.rows().all(|row| row.volume_energy().is_none()));

        Ok(())
    }

    #[test]
    fn test_fill_year_applies_index() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-01", "2024-03").build();
        grid.apply_index_table(IndexTable::from_entries([
            ("2024-02", 1.1),
            ("2024-03", 1.2),
        ]));
        grid.set_base_price(YearMonth::new(2024, 1)?, Some(100.0))?;

        grid.fill_year(2024)?;

        let rows = grid.year_tab(2024)?.rows();
        assert_close(rows[0].adjusted_price(), 100.0);
        assert_close(rows[1].adjusted_price(), 110.0);
        assert_close(rows[2].adjusted_price(), 120.0);

        Ok(())
    }

    #[test]
    fn test_fill_year_stays_in_year() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-11", "2025-02").build();
        grid.set_active_year(2025)?;

        assert!(!grid.fill_active_year()?);

        grid.set_volume_avg_power(YearMonth::new(2025, 2)?, Some(10.0))?;
        assert!(grid.fill_active_year()?);
        assert_eq!(
            grid.row(YearMonth::new(2025, 1)?)?.volume_energy(),
            Some(7440.0)
        );
        assert_eq!(grid.row(YearMonth::new(2024, 12)?)?.volume_energy(), None);

        assert_eq!(
            grid.fill_year(2026),
            Err(Error::year_not_found("Year 2026 is not part of the grid."))
        );

        Ok(())
    }

    #[test]
    fn test_fill_keeps_source_override() -> Result<(), Error> {
        let jan = YearMonth::new(2024, 1)?;
        let mut grid = GridBuilder::new("2024-01", "2024-02").build();
        grid.set_volume_avg_power(jan, Some(1.0))?;
        grid.set_volume_seasonalized(jan, Some(500.0))?;

        grid.fill_year(2024)?;

        assert_eq!(grid.row(jan)?.volume_seasonalized(), Some(500.0));
        assert_eq!(
            grid.row(YearMonth::new(2024, 2)?)?.volume_seasonalized(),
            Some(696.0)
        );

        Ok(())
    }

    #[test]
    fn test_fill_drops_pending_text() -> Result<(), Error> {
        let feb = YearMonth::new(2024, 2)?;
        let mut grid = GridBuilder::new("2024-01", "2024-02").build();
        grid.set_base_price(YearMonth::new(2024, 1)?, Some(10.0))?;
        grid.input(feb, EditableField::BasePrice, "12,")?;

        grid.fill_year(2024)?;

        assert_eq!(grid.pending_text(feb, EditableField::BasePrice), None);
        assert_eq!(grid.display_text(feb, EditableField::BasePrice)?, "10");

        Ok(())
    }

    #[test]
    fn test_fill_manual_adjusted_price() -> Result<(), Error> {
        let jan = YearMonth::new(2024, 1)?;
        let mut grid = GridBuilder::new("2024-01", "2024-03").build();
        grid.index_unavailable();
        grid.set_base_price(jan, Some(100.0))?;
        grid.set_adjusted_price(jan, Some(104.0))?;

        grid.fill_year(2024)?;

        for row in grid.rows() {
            assert_eq!(row.base_price(), Some(100.0));
            assert_eq!(row.adjusted_price(), Some(104.0));
            assert_eq!(row.adjusted_price_source(), PriceSource::Manual);
        }

        Ok(())
    }

    #[test]
    fn test_fill_all_years() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-12", "2026-01").build();
        let first = YearMonth::new(2024, 12)?;

        // The first month of the grid is the source, even if later months
        // have values.
        grid.set_volume_avg_power(YearMonth::new(2025, 6)?, Some(3.0))?;
        assert!(!grid.fill_all_years());
        assert_eq!(
            grid.row(YearMonth::new(2025, 6)?)?.volume_avg_power(),
            Some(3.0)
        );

        grid.set_volume_avg_power(first, Some(2.0))?;
        grid.set_base_price(first, Some(60.0))?;
        assert!(grid.fill_all_years());

        assert_eq!(grid.rows().count(), 14);
        for row in grid.rows() {
            assert_eq!(row.volume_avg_power(), Some(2.0));
            assert_eq!(
                row.volume_energy(),
                Some(2.0 * f64::from(row.hours_in_month()))
            );
            assert_eq!(row.base_price(), Some(60.0));
        }

        Ok(())
    }
}
