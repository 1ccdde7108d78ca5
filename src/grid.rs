// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A per-month grid of the contracted volumes and prices of a contract,
//! split into one tab per calendar year.

mod creation;
mod editing;
mod filling;
mod index_adjustment;
mod pending;
mod retrieval;
mod serialization;

pub mod iterators;

#[cfg(test)]
mod test_utils;

use std::collections::HashMap;
use std::ops::Range;

use crate::conversion::{to_avg_power, to_energy};
use crate::{
    ContractWindow, FlexibilityParams, IndexStatus, PeriodizationConfig, PersistedMonth,
    YearMonth,
};

pub use editing::EditableField;
pub use pending::EditOutcome;

/// `MonthRow`s are stored in a single chronologically ordered `Vec`.
///
/// `RowIndexMap` stores the position of each month in it, so that rows can
/// be addressed by their `YearMonth`.
pub(crate) type RowIndexMap = HashMap<YearMonth, usize>;

/// Raw text typed into a field that couldn't be parsed as a number yet,
/// keyed by the month and the field it was typed into.
pub(crate) type PendingTextMap = HashMap<(YearMonth, EditableField), String>;

/// The volume field that was last edited by the user, and from which the
/// other one is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeSource {
    /// The average power was edited, and the energy derived from it.
    AvgPower,
    /// The energy was edited, and the average power derived from it.
    Energy,
}

/// Where the adjusted price of a month comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriceSource {
    /// Derived from the base price and the index table.
    #[default]
    Derived,
    /// Restored from a persisted structure.  Kept until an index table is
    /// applied.
    Persisted,
    /// Entered by hand while there is no index data.
    Manual,
}

/// The contracted volumes and prices of a single month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthRow {
    pub(crate) month: YearMonth,
    pub(crate) hours_in_month: u32,
    pub(crate) volume_avg_power: Option<f64>,
    pub(crate) volume_energy: Option<f64>,
    pub(crate) volume_seasonalized: Option<f64>,
    pub(crate) flexibility_max: Option<f64>,
    pub(crate) flexibility_min: Option<f64>,
    pub(crate) base_price: Option<f64>,
    pub(crate) adjusted_price: Option<f64>,
    pub(crate) volume_source: Option<VolumeSource>,
    pub(crate) adjusted_price_source: PriceSource,
}

impl MonthRow {
    /// Creates a row for the given month, with values from the persisted
    /// entry for that month if there is one.
    ///
    /// The hours are always computed from the calendar, and the flexibility
    /// bounds from the current parameters.
    pub(crate) fn seeded(
        month: YearMonth,
        seed: Option<&PersistedMonth>,
        flexibility: &FlexibilityParams,
    ) -> Self {
        let mut row = Self {
            month,
            hours_in_month: month.hours(),
            volume_avg_power: None,
            volume_energy: None,
            volume_seasonalized: None,
            flexibility_max: None,
            flexibility_min: None,
            base_price: None,
            adjusted_price: None,
            volume_source: None,
            adjusted_price_source: PriceSource::Derived,
        };
        if let Some(seed) = seed {
            row.volume_avg_power = seed.volume_avg_power.filter(|v| v.is_finite());
            row.volume_energy = seed.volume_energy.filter(|v| v.is_finite());
            row.volume_seasonalized = seed.volume_seasonalized.filter(|v| v.is_finite());
            row.base_price = seed.base_price.filter(|v| v.is_finite());
            row.adjusted_price = seed.adjusted_price.filter(|v| v.is_finite());
            if row.adjusted_price.is_some() {
                row.adjusted_price_source = PriceSource::Persisted;
            }
        }
        row.recompute_flexibility(flexibility);
        row
    }

    /// Returns the month of the row.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Returns the number of hours in the month.
    pub fn hours_in_month(&self) -> u32 {
        self.hours_in_month
    }

    /// Returns the volume as an average power over the month.
    pub fn volume_avg_power(&self) -> Option<f64> {
        self.volume_avg_power
    }

    /// Returns the volume as energy over the month.
    pub fn volume_energy(&self) -> Option<f64> {
        self.volume_energy
    }

    /// Returns the energy volume the flexibility bounds are based on.
    pub fn volume_seasonalized(&self) -> Option<f64> {
        self.volume_seasonalized
    }

    /// Returns the upper flexibility bound of the seasonalized volume.
    pub fn flexibility_max(&self) -> Option<f64> {
        self.flexibility_max
    }

    /// Returns the lower flexibility bound of the seasonalized volume.
    pub fn flexibility_min(&self) -> Option<f64> {
        self.flexibility_min
    }

    /// Returns the price before index adjustment.
    pub fn base_price(&self) -> Option<f64> {
        self.base_price
    }

    /// Returns the base price scaled by the index multiplier of the month,
    /// or the manually entered price.
    pub fn adjusted_price(&self) -> Option<f64> {
        self.adjusted_price
    }

    /// Returns the volume field the other one is derived from, if the user
    /// has edited either of them.
    pub fn volume_source(&self) -> Option<VolumeSource> {
        self.volume_source
    }

    /// Returns where the adjusted price comes from.
    pub fn adjusted_price_source(&self) -> PriceSource {
        self.adjusted_price_source
    }

    /// Returns the committed value of the given field.
    pub fn value(&self, field: EditableField) -> Option<f64> {
        match field {
            EditableField::VolumeAvgPower => self.volume_avg_power,
            EditableField::VolumeEnergy => self.volume_energy,
            EditableField::VolumeSeasonalized => self.volume_seasonalized,
            EditableField::BasePrice => self.base_price,
            EditableField::AdjustedPrice => self.adjusted_price,
        }
    }

    /// Returns true if the row has a volume or a base price that a fill
    /// operation can copy.
    pub(crate) fn has_volume_or_price(&self) -> bool {
        self.volume_avg_power.is_some()
            || self.volume_energy.is_some()
            || self.base_price.is_some()
    }

    /// Sets the average power, and derives the energy volumes from it.
    pub(crate) fn apply_avg_power(
        &mut self,
        value: Option<f64>,
        flexibility: &FlexibilityParams,
    ) {
        let Some(avg_power) = value else {
            self.clear_volumes();
            return;
        };
        self.volume_avg_power = Some(avg_power);
        self.volume_energy = to_energy(avg_power, self.hours_in_month);
        self.volume_seasonalized = self.volume_energy;
        self.volume_source = Some(VolumeSource::AvgPower);
        self.recompute_flexibility(flexibility);
    }

    /// Sets the energy volume, and derives the average power from it.
    pub(crate) fn apply_energy(
        &mut self,
        value: Option<f64>,
        flexibility: &FlexibilityParams,
    ) {
        let Some(energy) = value else {
            self.clear_volumes();
            return;
        };
        self.volume_energy = Some(energy);
        self.volume_avg_power = to_avg_power(energy, self.hours_in_month);
        self.volume_seasonalized = Some(energy);
        self.volume_source = Some(VolumeSource::Energy);
        self.recompute_flexibility(flexibility);
    }

    pub(crate) fn apply_seasonalized(
        &mut self,
        value: Option<f64>,
        flexibility: &FlexibilityParams,
    ) {
        self.volume_seasonalized = value;
        self.recompute_flexibility(flexibility);
    }

    /// Sets the base price and re-derives the adjusted price, dropping any
    /// manual override.
    pub(crate) fn apply_base_price(&mut self, value: Option<f64>, index_status: &IndexStatus) {
        self.base_price = value;
        self.derive_adjusted_price(index_status);
    }

    pub(crate) fn apply_manual_adjusted_price(&mut self, value: Option<f64>) {
        self.adjusted_price = value;
        self.adjusted_price_source = match value {
            Some(_) => PriceSource::Manual,
            None => PriceSource::Derived,
        };
    }

    pub(crate) fn derive_adjusted_price(&mut self, index_status: &IndexStatus) {
        self.adjusted_price = self
            .base_price
            .map(|price| price * index_status.lookup(&self.month));
        self.adjusted_price_source = PriceSource::Derived;
    }

    pub(crate) fn recompute_flexibility(&mut self, flexibility: &FlexibilityParams) {
        self.flexibility_max = flexibility.max_for(self.volume_seasonalized);
        self.flexibility_min = flexibility.min_for(self.volume_seasonalized);
    }

    fn clear_volumes(&mut self) {
        self.volume_avg_power = None;
        self.volume_energy = None;
        self.volume_seasonalized = None;
        self.flexibility_max = None;
        self.flexibility_min = None;
        self.volume_source = None;
    }
}

/// The rows of one calendar year, as a range of positions in the row arena.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TabRange {
    pub(crate) year: i32,
    pub(crate) rows: Range<usize>,
}

/// The editable volume-and-price grid of a contract.
///
/// The grid has one tab per calendar year overlapping the contract window,
/// and each tab has one [`MonthRow`] per month of that year inside the
/// window.  Every edit re-derives the dependent fields of the edited month
/// immediately.
#[derive(Debug)]
pub struct PricingGrid {
    rows: Vec<MonthRow>,
    row_indices: RowIndexMap,
    tabs: Vec<TabRange>,
    window: Option<ContractWindow>,
    flexibility: FlexibilityParams,
    index_status: IndexStatus,
    pending: PendingTextMap,
    active_year: i32,
    config: PeriodizationConfig,
}
