// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Frequenz Contract Periodization

This is a library for splitting the validity window of an energy supply
contract into calendar years and months, and for editing the contracted
volumes and prices of each month.

## The pricing grid

The main struct is [`PricingGrid`], instances of which can be created by
passing the start and end dates of a contract window, the contractual
[`FlexibilityParams`] and the previously persisted [`Period`]s to the
[`new`][PricingGrid::new] or [`try_new`][PricingGrid::try_new] methods.

The grid has one tab per calendar year that overlaps the window, and each tab
has one [`MonthRow`] per month of that year inside the window.  A row holds:

- the volume, both as an average power and as energy over the month.  Either
  one can be edited, and the other is derived from it using the number of
  hours in the month.
- the seasonalized volume, which normally mirrors the energy volume, and the
  flexibility bounds computed from it.
- the base price, and the adjusted price derived from it.

Every edit re-derives the dependent fields of the edited month right away.
Text typed into a field that can't be parsed as a number yet is kept aside
until it can, see [`input`][PricingGrid::input].

## Index adjustment

Adjusted prices are base prices scaled by a monthly inflation index
multiplier.  The index table is fetched separately and may arrive after the
grid was built, so it is applied with
[`apply_index_table`][PricingGrid::apply_index_table] whenever it becomes
available.  Months without an entry use a [neutral][NEUTRAL_MULTIPLIER]
multiplier.

Index entries can be of any type that implements the [`IndexEntry`] trait.

When there is no index data at all, the grid should be told so with
[`index_unavailable`][PricingGrid::index_unavailable], after which adjusted
prices may be entered by hand.

## Filling

The values of one month can be copied to the rest of its year with
[`fill_year`][PricingGrid::fill_year], or to the whole grid with
[`fill_all_years`][PricingGrid::fill_all_years].  Volumes are copied as
entered, so each month gets its own derived values.

## Persistence

[`to_periods`][PricingGrid::to_periods] returns the grid in its persisted
form, which can be serialized with `serde`, and [`summarize`] computes the
number of priced months and their average price from it.
*/

mod config;
pub use config::PeriodizationConfig;

mod conversion;
pub use conversion::{to_avg_power, to_energy};

mod error;
pub use error::{Error, ErrorKind};

mod flexibility;
pub use flexibility::{flex_max, flex_min, FlexibilityParams};

mod grid;
pub use grid::{
    iterators, EditOutcome, EditableField, MonthRow, PriceSource, PricingGrid, VolumeSource,
};

mod index;
pub use index::{adjusted_price, IndexStatus, IndexTable, NEUTRAL_MULTIPLIER};

mod index_traits;
pub use index_traits::IndexEntry;

mod periods;
pub use periods::{Period, PersistedMonth};

mod summary;
pub use summary::{summarize, Summary};

mod window;
pub use window::ContractWindow;

mod year_month;
pub use year_month::{
    hours_in_month, months_between, MonthRange, YearMonth, AVERAGE_HOURS_IN_MONTH,
};
