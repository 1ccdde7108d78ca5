// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The index multiplier table, and the price adjustment derived from it.

use std::collections::BTreeMap;

use crate::{IndexEntry, YearMonth};

/// The multiplier used for months without an index entry.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// A month-keyed table of inflation index multipliers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexTable {
    multipliers: BTreeMap<YearMonth, f64>,
}

impl IndexTable {
    /// Creates an `IndexTable` from the given entries.
    ///
    /// Entries with an unparsable month or a non-finite multiplier are
    /// skipped.  When a month appears more than once, the last entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: IndexEntry,
    {
        let mut multipliers = BTreeMap::new();
        for entry in entries {
            let month = match entry.month_key().parse::<YearMonth>() {
                Ok(month) => month,
                Err(err) => {
                    tracing::warn!("Skipping index entry: {}", err);
                    continue;
                }
            };
            let multiplier = entry.multiplier();
            if !multiplier.is_finite() {
                tracing::warn!(
                    "Skipping index entry for {}: multiplier {} is not finite.",
                    month,
                    multiplier
                );
                continue;
            }
            multipliers.insert(month, multiplier);
        }
        Self { multipliers }
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    /// Returns the number of months in the table.
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    /// Returns the multiplier for the given month, if there is one.
    pub fn get(&self, month: &YearMonth) -> Option<f64> {
        self.multipliers.get(month).copied()
    }

    /// Returns the multiplier for the given month, or
    /// [`NEUTRAL_MULTIPLIER`] if the table has no entry for it.
    pub fn lookup(&self, month: &YearMonth) -> f64 {
        self.get(month).unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// Returns true if the table has an entry for the given month that
    /// actually changes prices.
    pub fn adjusts(&self, month: &YearMonth) -> bool {
        self.get(month)
            .is_some_and(|multiplier| multiplier != NEUTRAL_MULTIPLIER)
    }

    /// Returns an iterator over the `(month, multiplier)` pairs of the table,
    /// in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, f64)> + '_ {
        self.multipliers.iter().map(|(month, value)| (*month, *value))
    }
}

/// Returns `base_price` scaled by the multiplier for `month`.
///
/// Returns `None` if there is no base price.
pub fn adjusted_price(
    base_price: Option<f64>,
    table: &IndexTable,
    month: &YearMonth,
) -> Option<f64> {
    base_price.map(|price| price * table.lookup(month))
}

/// The availability of index data for a grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum IndexStatus {
    /// The table has not arrived yet.
    #[default]
    Loading,
    /// There is no index data for the contract window, either because the
    /// table was empty or because it couldn't be fetched.
    Unavailable,
    /// Index data is available.
    Available(IndexTable),
}

impl IndexStatus {
    /// Returns true if adjusted prices may be entered by hand.
    ///
    /// That is only the case when there is no index data at all.
    pub fn allows_manual_prices(&self) -> bool {
        matches!(self, IndexStatus::Unavailable)
    }

    /// Returns the multiplier for the given month, or [`NEUTRAL_MULTIPLIER`]
    /// if no table has been loaded.
    pub fn lookup(&self, month: &YearMonth) -> f64 {
        self.table()
            .map_or(NEUTRAL_MULTIPLIER, |table| table.lookup(month))
    }

    /// Returns the table, if one has been loaded.
    pub fn table(&self) -> Option<&IndexTable> {
        match self {
            IndexStatus::Available(table) => Some(table),
            IndexStatus::Loading | IndexStatus::Unavailable => None,
        }
    }
}
