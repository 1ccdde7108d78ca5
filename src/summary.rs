// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Aggregation of the prices in a persisted periods structure.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Period, YearMonth};

/// The number of priced months of a contract, and their average base price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The number of distinct months with a base price.
    pub filled_months: usize,
    /// The mean base price of those months.
    ///
    /// `None` when no month has a price.
    pub average_price: Option<f64>,
}

/// Summarizes the base prices of the given periods.
///
/// Each distinct month is counted once.  If a month shows up in more than
/// one period, the price from the last one is used.
pub fn summarize(periods: &[Period]) -> Summary {
    let mut prices = BTreeMap::<YearMonth, f64>::new();
    for month in periods.iter().flat_map(|period| &period.months) {
        if let Some(price) = month.base_price.filter(|price| price.is_finite()) {
            prices.insert(month.month, price);
        }
    }

    let filled_months = prices.len();
    let average_price = if filled_months == 0 {
        None
    } else {
        Some(prices.values().sum::<f64>() / filled_months as f64)
    };

    Summary {
        filled_months,
        average_price,
    }
}
