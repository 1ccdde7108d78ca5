// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the contractual flexibility band calculations.

/// The allowed deviation of the consumed energy from the seasonalized
/// volume, as percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexibilityParams {
    upper_pct: f64,
    lower_pct: f64,
}

impl FlexibilityParams {
    /// Creates a new `FlexibilityParams` from the upper and lower deviation
    /// percentages.
    ///
    /// Percentages must be non-negative.  Negative or non-finite values are
    /// replaced by `0`.
    pub fn new(upper_pct: f64, lower_pct: f64) -> Self {
        Self {
            upper_pct: Self::sanitize(upper_pct, "upper"),
            lower_pct: Self::sanitize(lower_pct, "lower"),
        }
    }

    fn sanitize(pct: f64, which: &str) -> f64 {
        if pct.is_finite() && pct >= 0.0 {
            return pct;
        }
        tracing::warn!(
            "Invalid {} flexibility percentage {}, using 0 instead.",
            which,
            pct
        );
        0.0
    }

    /// Returns the upper deviation percentage.
    pub fn upper_pct(&self) -> f64 {
        self.upper_pct
    }

    /// Returns the lower deviation percentage.
    pub fn lower_pct(&self) -> f64 {
        self.lower_pct
    }

    /// Returns the upper bound for the given seasonalized volume.
    pub fn max_for(&self, seasonalized: Option<f64>) -> Option<f64> {
        seasonalized.map(|volume| flex_max(volume, self.upper_pct))
    }

    /// Returns the lower bound for the given seasonalized volume.
    pub fn min_for(&self, seasonalized: Option<f64>) -> Option<f64> {
        seasonalized.map(|volume| flex_min(volume, self.lower_pct))
    }
}

/// Returns the upper flexibility bound: `volume × (1 + upper_pct / 100)`.
pub fn flex_max(volume: f64, upper_pct: f64) -> f64 {
    volume * (1.0 + upper_pct / 100.0)
}

/// Returns the lower flexibility bound: `volume × (1 − lower_pct / 100)`.
///
/// Percentages above 100 can't take the bound below zero.
pub fn flex_min(volume: f64, lower_pct: f64) -> f64 {
    volume * (1.0 - lower_pct / 100.0).max(0.0)
}
