//! Interest rates tied to a time unit
//!
//! A rate quoted per month, per year, etc. converts to any other unit by
//! compounding equivalence:
//! `(1 + rate)^(periods_per_year[unit] / periods_per_year[target]) - 1`

use serde::{Deserialize, Serialize};

use super::TimeUnit;

/// Effective rate per period of `unit`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    rate: f64,
    unit: TimeUnit,
}

impl InterestRate {
    pub fn new(rate: f64, unit: TimeUnit) -> Self {
        Self { rate, unit }
    }

    /// Effective annual rate
    pub fn annual(rate: f64) -> Self {
        Self::new(rate, TimeUnit::Year)
    }

    /// Zero rate, used as the growth of a flat stream
    pub fn zero() -> Self {
        Self::annual(0.0)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Equivalent effective rate per period of `target`
    ///
    /// Converting to the rate's own unit returns the stored rate untouched.
    pub fn rate_in(&self, target: TimeUnit) -> f64 {
        if target == self.unit {
            return self.rate;
        }

        let exponent = self.unit.periods_per_year() / target.periods_per_year();
        (1.0 + self.rate).powf(exponent) - 1.0
    }

    /// Same rate re-expressed in another unit
    pub fn convert_to(&self, target: TimeUnit) -> Self {
        Self::new(self.rate_in(target), target)
    }

    /// Effective annual equivalent
    pub fn per_year(&self) -> f64 {
        self.rate_in(TimeUnit::Year)
    }
}

impl Default for InterestRate {
    fn default() -> Self {
        Self::zero()
    }
}
