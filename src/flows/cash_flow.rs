//! Single future cash flow

use serde::{Deserialize, Serialize};

use super::PresentValue;
use crate::error::{ValuationError, ValuationResult};
use crate::rates::{InterestRate, TimeUnit};

/// One payment of `amount`, received after `receivable_in` periods of `unit`
///
/// Negative amounts are outflows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    amount: f64,
    receivable_in: f64,
    unit: TimeUnit,
}

impl CashFlow {
    pub fn new(amount: f64, receivable_in: f64, unit: TimeUnit) -> ValuationResult<Self> {
        if !amount.is_finite() {
            return Err(ValuationError::domain(format!("cash flow amount must be finite, got {}", amount)));
        }
        if !receivable_in.is_finite() || receivable_in < 0.0 {
            return Err(ValuationError::domain(format!(
                "periods until receipt must be non-negative, got {}",
                receivable_in
            )));
        }

        Ok(Self { amount, receivable_in, unit })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn receivable_in(&self) -> f64 {
        self.receivable_in
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Discount factor to the receipt date at `discount_rate`
    pub fn discount_factor(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let rate = self.periodic_rate(discount_rate)?;
        Ok(1.0 / (1.0 + rate).powf(self.receivable_in))
    }

    /// `discount_rate` expressed per period of this flow's unit
    fn periodic_rate(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let rate = discount_rate.rate_in(self.unit);
        if !rate.is_finite() || 1.0 + rate <= 0.0 {
            return Err(ValuationError::domain(format!(
                "discount rate of {} per {} is -100% or below; present value is undefined",
                rate, self.unit
            )));
        }
        Ok(rate)
    }
}

impl PresentValue for CashFlow {
    fn present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let rate = self.periodic_rate(discount_rate)?;
        Ok(self.amount / (1.0 + rate).powf(self.receivable_in))
    }
}
