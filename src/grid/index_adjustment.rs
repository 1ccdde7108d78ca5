// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for updating a [`PricingGrid`] as index data arrives.

use crate::index::adjusted_price;
use crate::{EditableField, IndexEntry, IndexStatus, IndexTable, PriceSource, PricingGrid};

/// Index data updates.
impl PricingGrid {
    /// Marks the index table as being fetched.
    ///
    /// No values are changed, but adjusted prices can't be entered by hand
    /// until the fetch is over.
    pub fn begin_index_load(&mut self) {
        self.index_status = IndexStatus::Loading;
        self.drop_pending_adjusted_prices();
    }

    /// Applies a freshly loaded index table to every month of the grid.
    ///
    /// Adjusted prices are re-derived from the base prices, including those
    /// restored from a persisted structure.  A manually entered adjusted
    /// price is only replaced if the table has a non-neutral multiplier for
    /// its month.  A table without entries for any month of the grid is
    /// treated like missing index data.
    pub fn apply_index_table(&mut self, table: IndexTable) {
        if !self.rows.iter().any(|row| table.get(&row.month).is_some()) {
            tracing::debug!(
                "Index table with {} entries has none for the contract window.",
                table.len()
            );
            self.index_unavailable();
            return;
        }

        let mut kept = 0;
        for row in &mut self.rows {
            if row.adjusted_price_source == PriceSource::Manual && !table.adjusts(&row.month) {
                kept += 1;
                continue;
            }
            row.adjusted_price = adjusted_price(row.base_price, &table, &row.month);
            row.adjusted_price_source = PriceSource::Derived;
        }

        tracing::debug!(
            "Applied index table with {} entries; kept {} manual adjusted prices.",
            table.len(),
            kept
        );
        self.index_status = IndexStatus::Available(table);
        self.drop_pending_adjusted_prices();
    }

    /// Builds an [`IndexTable`] from the given entries and applies it.
    pub fn apply_index_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator,
        I::Item: IndexEntry,
    {
        self.apply_index_table(IndexTable::from_entries(entries));
    }

    /// Records that there is no index data for the contract window, for
    /// example because fetching it failed.
    ///
    /// Derived adjusted prices fall back to the base prices, and adjusted
    /// prices may from now on be entered by hand.  Restored and manual
    /// adjusted prices are kept.
    pub fn index_unavailable(&mut self) {
        self.index_status = IndexStatus::Unavailable;
        for row in &mut self.rows {
            if row.adjusted_price_source == PriceSource::Derived {
                row.derive_adjusted_price(&self.index_status);
            }
        }
    }

    /// Drops half-typed adjusted prices once the field is read-only.
    fn drop_pending_adjusted_prices(&mut self) {
        self.pending
            .retain(|(_, field), _| *field != EditableField::AdjustedPrice);
    }
}
