// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The persisted form of a pricing grid.
//!
//! A contract stores one [`Period`] per calendar year, each holding the
//! months of that year that have any volume or price set.

use serde::{Deserialize, Serialize};

use crate::YearMonth;

/// The persisted volumes and prices of one calendar year of a contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// First month of the period.
    pub start_month: YearMonth,
    /// Last month of the period.
    pub end_month: YearMonth,
    /// The months of the period, in chronological order.
    #[serde(default)]
    pub months: Vec<PersistedMonth>,
}

/// The persisted volumes and prices of one month.
///
/// The adjusted price is derived from the base price and the index table
/// every time a grid is built, so it is read from older payloads but never
/// written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMonth {
    /// The month the values belong to.
    pub month: YearMonth,
    /// Hours in the month.  Only informative, it is recomputed on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_in_month: Option<u32>,
    /// Volume as an average power over the month.
    #[serde(default)]
    pub volume_avg_power: Option<f64>,
    /// Volume as energy over the month.
    #[serde(default)]
    pub volume_energy: Option<f64>,
    /// Energy volume the flexibility bounds are based on.
    #[serde(default)]
    pub volume_seasonalized: Option<f64>,
    /// Upper flexibility bound.  Recomputed on load.
    #[serde(default)]
    pub flexibility_max: Option<f64>,
    /// Lower flexibility bound.  Recomputed on load.
    #[serde(default)]
    pub flexibility_min: Option<f64>,
    /// Price before index adjustment.
    #[serde(default)]
    pub base_price: Option<f64>,
    /// Index-adjusted price, only present in older payloads.
    #[serde(default, skip_serializing)]
    pub adjusted_price: Option<f64>,
}

impl PersistedMonth {
    /// Returns true if none of the volume or price fields are set.
    pub fn is_empty(&self) -> bool {
        [
            self.volume_avg_power,
            self.volume_energy,
            self.volume_seasonalized,
            self.flexibility_max,
            self.flexibility_min,
            self.base_price,
            self.adjusted_price,
        ]
        .iter()
        .all(Option::is_none)
    }
}
