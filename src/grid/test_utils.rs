// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `grid` module.
//!
//! - the `GridBuilder`, which can declaratively build pricing grids with a
//!   given contract window, flexibility and persisted values.
//! - helpers for creating persisted months and comparing computed values.

use crate::{FlexibilityParams, Period, PeriodizationConfig, PersistedMonth, PricingGrid};

/// Builds a `PricingGrid` for tests.
///
/// Flexibility defaults to `0%` in both directions, and the fallback year to
/// `2024`, so that tests don't depend on the current date.
pub(crate) struct GridBuilder {
    start: String,
    end: String,
    flexibility: FlexibilityParams,
    persisted: Vec<Period>,
    config: PeriodizationConfig,
}

impl GridBuilder {
    pub(crate) fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_owned(),
            end: end.to_owned(),
            flexibility: FlexibilityParams::default(),
            persisted: Vec::new(),
            config: PeriodizationConfig {
                fallback_year: Some(2024),
            },
        }
    }

    pub(crate) fn flexibility(mut self, upper_pct: f64, lower_pct: f64) -> Self {
        self.flexibility = FlexibilityParams::new(upper_pct, lower_pct);
        self
    }

    pub(crate) fn persisted(mut self, periods: &[Period]) -> Self {
        self.persisted = periods.to_vec();
        self
    }

    pub(crate) fn fallback_year(mut self, year: i32) -> Self {
        self.config.fallback_year = Some(year);
        self
    }

    pub(crate) fn build(self) -> PricingGrid {
        PricingGrid::new(
            &self.start,
            &self.end,
            self.flexibility,
            &self.persisted,
            self.config,
        )
    }
}

/// Returns a persisted month with no values set.
///
/// Panics if `month` is not a valid `YYYY-MM` string.
pub(crate) fn persisted_month(month: &str) -> PersistedMonth {
    PersistedMonth {
        month: month.parse().unwrap(),
        hours_in_month: None,
        volume_avg_power: None,
        volume_energy: None,
        volume_seasonalized: None,
        flexibility_max: None,
        flexibility_min: None,
        base_price: None,
        adjusted_price: None,
    }
}

/// Asserts that `actual` is set and within floating point noise of
/// `expected`.
#[track_caller]
pub(crate) fn assert_close(actual: Option<f64>, expected: f64) {
    match actual {
        Some(actual) => assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, found {actual}"
        ),
        None => panic!("expected {expected}, found None"),
    }
}
