// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for editing the values of a [`PricingGrid`].
//!
//! Each edit commits the new value to the edited month and re-derives all
//! dependent fields of that month right away.

use std::fmt::Display;

use crate::{Error, FlexibilityParams, PricingGrid, YearMonth};

/// The fields of a `MonthRow` that can be edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditableField {
    /// The volume as an average power over the month.
    VolumeAvgPower,
    /// The volume as energy over the month.
    VolumeEnergy,
    /// The energy volume the flexibility bounds are based on.
    VolumeSeasonalized,
    /// The price before index adjustment.
    BasePrice,
    /// The index-adjusted price.
    AdjustedPrice,
}

impl Display for EditableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditableField::VolumeAvgPower => write!(f, "VolumeAvgPower"),
            EditableField::VolumeEnergy => write!(f, "VolumeEnergy"),
            EditableField::VolumeSeasonalized => write!(f, "VolumeSeasonalized"),
            EditableField::BasePrice => write!(f, "BasePrice"),
            EditableField::AdjustedPrice => write!(f, "AdjustedPrice"),
        }
    }
}

/// Single-field edits.
///
/// Non-finite values are treated like `None`.  An edit that returns an
/// error doesn't change the grid.
impl PricingGrid {
    /// Sets the average-power volume of a month.
    ///
    /// The energy and seasonalized volumes are derived from it, and the
    /// flexibility bounds from those.  `None` clears all volumes of the
    /// month.
    pub fn set_volume_avg_power(
        &mut self,
        month: YearMonth,
        value: Option<f64>,
    ) -> Result<(), Error> {
        let index = self.row_index(month)?;
        self.rows[index].apply_avg_power(finite(value), &self.flexibility);
        self.pending.remove(&(month, EditableField::VolumeAvgPower));
        Ok(())
    }

    /// Sets the energy volume of a month.
    ///
    /// The average power is derived from it, the seasonalized volume mirrors
    /// it, and the flexibility bounds are derived from that.  `None` clears
    /// all volumes of the month.
    pub fn set_volume_energy(&mut self, month: YearMonth, value: Option<f64>) -> Result<(), Error> {
        let index = self.row_index(month)?;
        self.rows[index].apply_energy(finite(value), &self.flexibility);
        self.pending.remove(&(month, EditableField::VolumeEnergy));
        Ok(())
    }

    /// Overrides the seasonalized volume of a month, and recomputes its
    /// flexibility bounds.
    pub fn set_volume_seasonalized(
        &mut self,
        month: YearMonth,
        value: Option<f64>,
    ) -> Result<(), Error> {
        let index = self.row_index(month)?;
        self.rows[index].apply_seasonalized(finite(value), &self.flexibility);
        self.pending.remove(&(month, EditableField::VolumeSeasonalized));
        Ok(())
    }

    /// Sets the base price of a month, and derives its adjusted price.
    ///
    /// Any manually entered adjusted price of the month is replaced.
    pub fn set_base_price(&mut self, month: YearMonth, value: Option<f64>) -> Result<(), Error> {
        let index = self.row_index(month)?;
        self.rows[index].apply_base_price(finite(value), &self.index_status);
        self.pending.remove(&(month, EditableField::BasePrice));
        Ok(())
    }

    /// Sets the adjusted price of a month by hand.
    ///
    /// This is only possible when there is no index data for the contract.
    /// The value sticks until it is cleared, the base price changes, or an
    /// index table that adjusts the month is loaded.
    pub fn set_adjusted_price(
        &mut self,
        month: YearMonth,
        value: Option<f64>,
    ) -> Result<(), Error> {
        let index = self.row_index(month)?;
        self.ensure_manual_prices_allowed(month)?;
        self.rows[index].apply_manual_adjusted_price(finite(value));
        self.pending.remove(&(month, EditableField::AdjustedPrice));
        Ok(())
    }

    /// Sets the given field of a month.
    pub fn set_value(
        &mut self,
        month: YearMonth,
        field: EditableField,
        value: Option<f64>,
    ) -> Result<(), Error> {
        match field {
            EditableField::VolumeAvgPower => self.set_volume_avg_power(month, value),
            EditableField::VolumeEnergy => self.set_volume_energy(month, value),
            EditableField::VolumeSeasonalized => self.set_volume_seasonalized(month, value),
            EditableField::BasePrice => self.set_base_price(month, value),
            EditableField::AdjustedPrice => self.set_adjusted_price(month, value),
        }
    }

    /// Replaces the flexibility parameters of the contract, and recomputes
    /// the flexibility bounds of every month.
    pub fn set_flexibility(&mut self, flexibility: FlexibilityParams) {
        self.flexibility = flexibility;
        for row in &mut self.rows {
            row.recompute_flexibility(&flexibility);
        }
        tracing::debug!(
            "Recomputed flexibility bounds of {} months for +{}%/-{}%.",
            self.rows.len(),
            flexibility.upper_pct(),
            flexibility.lower_pct()
        );
    }

    pub(crate) fn ensure_manual_prices_allowed(&self, month: YearMonth) -> Result<(), Error> {
        if self.index_status.allows_manual_prices() {
            return Ok(());
        }
        tracing::warn!(
            "Rejected manual adjusted price for {}: index data is {:?}.",
            month,
            self.index_status
        );
        Err(Error::read_only_field(format!(
            "Adjusted price of {month} is derived from the index table."
        )))
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
