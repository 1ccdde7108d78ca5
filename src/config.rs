// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `PricingGrid`.

/// Configuration options for the `PricingGrid`.
#[derive(Clone, Default, Debug)]
pub struct PeriodizationConfig {
    /// The year of the single tab that is built when the contract validity
    /// window is missing or can't be parsed.  When this is `None`, the
    /// current calendar year is used.
    pub fallback_year: Option<i32>,
}

impl PeriodizationConfig {
    /// Returns the year to fall back to when there is no usable window.
    pub(crate) fn fallback_year(&self) -> i32 {
        use chrono::Datelike;

        self.fallback_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}
