// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for turning a [`PricingGrid`] back into its persisted form.

use crate::summary::{summarize, Summary};
use crate::{MonthRow, Period, PersistedMonth, PricingGrid};

impl From<&MonthRow> for PersistedMonth {
    fn from(row: &MonthRow) -> Self {
        Self {
            month: row.month,
            hours_in_month: Some(row.hours_in_month),
            volume_avg_power: row.volume_avg_power,
            volume_energy: row.volume_energy,
            volume_seasonalized: row.volume_seasonalized,
            flexibility_max: row.flexibility_max,
            flexibility_min: row.flexibility_min,
            base_price: row.base_price,
            adjusted_price: None,
        }
    }
}

/// Persistence.
impl PricingGrid {
    /// Returns the persisted form of the grid: one [`Period`] per tab, with
    /// only the months that have a volume or price.
    ///
    /// Tabs without any such month are left out.
    pub fn to_periods(&self) -> Vec<Period> {
        self.year_tabs()
            .filter_map(|tab| {
                let months = tab
                    .rows()
                    .iter()
                    .map(PersistedMonth::from)
                    .filter(|month| !month.is_empty())
                    .collect::<Vec<_>>();
                if months.is_empty() {
                    return None;
                }
                Some(Period {
                    start_month: tab.start_month()?,
                    end_month: tab.end_month()?,
                    months,
                })
            })
            .collect()
    }

    /// Returns the number of priced months of the grid and their average
    /// base price.
    pub fn summary(&self) -> Summary {
        summarize(&self.to_periods())
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::test_utils::GridBuilder;
    use crate::{Error, Period, YearMonth};

    #[test]
    fn test_to_periods_drops_empty() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-11", "2026-02").build();
        grid.set_volume_avg_power(YearMonth::new(2024, 12)?, Some(10.0))?;
        grid.set_base_price(YearMonth::new(2026, 2)?, Some(75.0))?;
        grid.set_volume_seasonalized(YearMonth::new(2026, 1)?, Some(1.0))?;

        let periods = grid.to_periods();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].start_month, YearMonth::new(2024, 11)?);
        assert_eq!(periods[0].end_month, YearMonth::new(2024, 12)?);
        assert_eq!(periods[0].months.len(), 1);
        assert_eq!(periods[0].months[0].month, YearMonth::new(2024, 12)?);
        assert_eq!(periods[0].months[0].volume_energy, Some(7440.0));
        assert_eq!(periods[0].months[0].hours_in_month, Some(744));

        assert_eq!(periods[1].start_month, YearMonth::new(2026, 1)?);
        assert_eq!(periods[1].end_month, YearMonth::new(2026, 2)?);
        assert!(periods[1]
            .months
            .iter()
            .map(|month| month.month.to_string())
            .eq(["2026-01", "2026-02"]));

        assert!(GridBuilder::new("2024-01", "2024-12").build().to_periods().is_empty());

        Ok(())
    }

    #[test]
    fn test_adjusted_price_not_persisted() -> Result<(), Box<dyn std::error::Error>> {
        let jan = YearMonth::new(2024, 1)?;
        let feb = YearMonth::new(2024, 2)?;
        let mut grid = GridBuilder::new("2024-01", "2024-02").build();
        grid.apply_index_entries([("2024-01", 1.5)]);
        grid.set_base_price(jan, Some(100.0))?;
        grid.index_unavailable();
        grid.set_adjusted_price(feb, Some(42.0))?;

        let periods = grid.to_periods();
        assert_eq!(periods[0].months.len(), 1);
        assert_eq!(periods[0].months[0].adjusted_price, None);

        let json = serde_json::to_value(&periods)?;
        assert_eq!(
            json,
            serde_json::json!([{
                "startMonth": "2024-01",
                "endMonth": "2024-02",
                "months": [{
                    "month": "2024-01",
                    "hoursInMonth": 744,
                    "volumeAvgPower": null,
                    "volumeEnergy": null,
                    "volumeSeasonalized": null,
                    "flexibilityMax": null,
                    "flexibilityMin": null,
                    "basePrice": 100.0
                }]
            }])
        );

        Ok(())
    }

    #[test]
    fn test_round_trip_through_grid() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-01", "2024-06")
            .flexibility(10.0, 5.0)
            .build();
        grid.set_volume_energy(YearMonth::new(2024, 4)?, Some(36000.0))?;
        grid.set_base_price(YearMonth::new(2024, 4)?, Some(61.5))?;
        let periods = grid.to_periods();

        let restored = GridBuilder::new("2024-01", "2024-06")
            .flexibility(10.0, 5.0)
            .persisted(&periods)
            .build();

        assert_eq!(restored.to_periods(), periods);
        assert_eq!(
            restored.row(YearMonth::new(2024, 4)?)?.volume_avg_power(),
            Some(50.0)
        );

        Ok(())
    }

    #[test]
    fn test_summary() -> Result<(), Error> {
        let mut grid = GridBuilder::new("2024-12", "2025-02").build();
        assert_eq!(grid.summary().filled_months, 0);
        assert_eq!(grid.summary().average_price, None);

        grid.set_base_price(YearMonth::new(2024, 12)?, Some(100.0))?;
        grid.set_base_price(YearMonth::new(2025, 2)?, Some(50.0))?;
        grid.set_volume_avg_power(YearMonth::new(2025, 1)?, Some(1.0))?;

        let summary = grid.summary();
        assert_eq!(summary.filled_months, 2);
        assert_eq!(summary.average_price, Some(75.0));

        let empty: &[Period] = &[];
        assert_eq!(crate::summarize(empty), crate::Summary::default());

        Ok(())
    }
}
