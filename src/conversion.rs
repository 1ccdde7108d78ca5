// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Conversion between average-power volumes and energy volumes.
//!
//! An average-power volume is a constant power level sustained over a whole
//! month, so the energy of the month is the power times the hours in it.

/// Returns the energy volume of a month with the given number of `hours`,
/// for a constant `avg_power`.
///
/// Returns `None` if `avg_power` is not a finite number.
pub fn to_energy(avg_power: f64, hours: u32) -> Option<f64> {
    avg_power
        .is_finite()
        .then(|| avg_power * f64::from(hours))
}

/// Returns the average power over a month with the given number of `hours`,
/// for the given `energy` volume.
///
/// Returns `None` if `energy` is not a finite number, or if `hours` is zero.
pub fn to_avg_power(energy: f64, hours: u32) -> Option<f64> {
    (energy.is_finite() && hours != 0).then(|| energy / f64::from(hours))
}
