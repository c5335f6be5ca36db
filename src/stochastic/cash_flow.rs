//! Single cash flow that may not be paid

use rand::Rng;

use super::{check_chance_of_zero, draw_zero, SamplePresentValue};
use crate::error::ValuationResult;
use crate::flows::{CashFlow, PresentValue};
use crate::rates::{InterestRate, TimeUnit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloCashFlow {
    flow: CashFlow,
    chance_of_zero: f64,
}

impl MonteCarloCashFlow {
    pub fn new(
        amount: f64,
        receivable_in: f64,
        unit: TimeUnit,
        chance_of_zero: f64,
    ) -> ValuationResult<Self> {
        Self::from_cash_flow(CashFlow::new(amount, receivable_in, unit)?, chance_of_zero)
    }

    pub fn from_cash_flow(flow: CashFlow, chance_of_zero: f64) -> ValuationResult<Self> {
        check_chance_of_zero(chance_of_zero)?;
        Ok(Self { flow, chance_of_zero })
    }

    pub fn cash_flow(&self) -> &CashFlow {
        &self.flow
    }

    pub fn chance_of_zero(&self) -> f64 {
        self.chance_of_zero
    }
}

impl SamplePresentValue for MonteCarloCashFlow {
    fn sample_present_value<R: Rng + ?Sized>(
        &self,
        discount_rate: &InterestRate,
        rng: &mut R,
    ) -> ValuationResult<f64> {
        // discount first so an invalid rate fails regardless of the draw
        let pv = self.flow.present_value(discount_rate)?;
        if draw_zero(rng, self.chance_of_zero) {
            Ok(0.0)
        } else {
            Ok(pv)
        }
    }

    fn expected_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        Ok(self.flow.present_value(discount_rate)? * (1.0 - self.chance_of_zero))
    }
}
