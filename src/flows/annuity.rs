//! Finite sequences of periodic cash flows

use log::debug;

use super::{round_cents, CashFlow, PresentValue};
use crate::error::{ValuationError, ValuationResult};
use crate::formulas;
use crate::rates::{InterestRate, TimeUnit};

/// Upper bound on materialized payments (1,000 years of daily flows fit comfortably)
pub const MAX_PAYMENTS: u32 = 1_000_000;

/// `num_payments` payments made at the end of each period of `unit`
///
/// Payment *n* (1-based) is `amount * (1 + g)^n`, where `g` is the growth rate
/// expressed per period of `unit`. A flat annuity has zero growth.
#[derive(Debug, Clone)]
pub struct Annuity {
    amount: f64,
    num_payments: u32,
    unit: TimeUnit,
    growth: InterestRate,
    cash_flows: Vec<CashFlow>,
}

impl Annuity {
    /// Level payments
    pub fn new(amount: f64, num_payments: u32, unit: TimeUnit) -> ValuationResult<Self> {
        Self::growing(amount, num_payments, unit, InterestRate::zero())
    }

    /// Payments growing geometrically at `growth` (quoted in any unit)
    pub fn growing(
        amount: f64,
        num_payments: u32,
        unit: TimeUnit,
        growth: InterestRate,
    ) -> ValuationResult<Self> {
        if num_payments == 0 {
            return Err(ValuationError::domain("number of payments must be positive"));
        }
        if num_payments > MAX_PAYMENTS {
            return Err(ValuationError::domain(format!(
                "number of payments {} exceeds the limit of {}",
                num_payments, MAX_PAYMENTS
            )));
        }

        let g = growth.rate_in(unit);
        if !g.is_finite() {
            return Err(ValuationError::domain(format!("growth rate must be finite, got {}", g)));
        }

        let cash_flows = (1..=num_payments)
            .map(|n| CashFlow::new(amount * (1.0 + g).powf(n as f64), n as f64, unit))
            .collect::<ValuationResult<Vec<_>>>()?;

        debug!(
            "materialized annuity: {} payments of {} per {} (growth {:.6} per period)",
            num_payments, amount, unit, g
        );

        Ok(Self {
            amount,
            num_payments,
            unit,
            growth,
            cash_flows,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn num_payments(&self) -> u32 {
        self.num_payments
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn growth(&self) -> InterestRate {
        self.growth
    }

    /// Materialized payments, ordered by due period
    pub fn cash_flows(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Unrounded sum of the payments' present values
    pub fn exact_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        self.cash_flows
            .iter()
            .map(|cf| cf.present_value(discount_rate))
            .sum()
    }

    /// Same value as [`exact_present_value`](Self::exact_present_value), in constant time
    pub fn closed_form_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let r = discount_rate.rate_in(self.unit);
        let g = self.growth.rate_in(self.unit);

        // every discounted payment equals `amount` when growth offsets discounting
        if r == g {
            if !r.is_finite() || r <= -1.0 {
                return Err(ValuationError::domain(format!(
                    "discount rate of {} per {} is -100% or below",
                    r, self.unit
                )));
            }
            return Ok(self.amount * self.num_payments as f64);
        }

        if g == 0.0 {
            formulas::present_value_annuity(self.amount, r, self.num_payments, None)
        } else {
            let first_payment = self.amount * (1.0 + g);
            formulas::present_value_annuity(first_payment, r, self.num_payments, Some(g))
        }
    }
}

impl PresentValue for Annuity {
    /// Sum of the payments' present values, rounded to cents
    fn present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        Ok(round_cents(self.exact_present_value(discount_rate)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_five_year_annuity() {
        let annuity = Annuity::new(100.0, 5, TimeUnit::Year).unwrap();
        let pv = annuity.present_value(&InterestRate::annual(0.10)).unwrap();
        assert_eq!(pv, 379.08);
    }

    #[test]
    fn test_materialized_schedule() {
        let annuity = Annuity::growing(100.0, 3, TimeUnit::Year, InterestRate::annual(0.10)).unwrap();
        let flows = annuity.cash_flows();

        assert_eq!(flows.len(), 3);
        assert_relative_eq!(flows[0].amount(), 110.0, epsilon = 1e-10);
        assert_relative_eq!(flows[1].amount(), 121.0, epsilon = 1e-10);
        assert_relative_eq!(flows[2].amount(), 133.1, epsilon = 1e-10);
        assert_eq!(flows[2].receivable_in(), 3.0);
    }

    #[test]
    fn test_growth_converted_to_payment_unit() {
        let annuity = Annuity::growing(1000.0, 24, TimeUnit::Month, InterestRate::annual(0.03)).unwrap();
        // after 12 monthly growth steps the payment has grown by exactly one year of growth
        let ratio = annuity.cash_flows()[12].amount() / annuity.cash_flows()[0].amount();
        assert_relative_eq!(ratio, 1.03, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_annuity_matches_closed_form() {
        let discount = InterestRate::annual(0.06);
        for unit in TimeUnit::ALL {
            let annuity = Annuity::new(250.0, 120, unit).unwrap();
            let summed = annuity.exact_present_value(&discount).unwrap();
            let closed = annuity.closed_form_present_value(&discount).unwrap();
            assert_relative_eq!(summed, closed, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_growing_annuity_matches_closed_form() {
        let discount = InterestRate::annual(0.08);
        let annuity = Annuity::growing(1500.0, 360, TimeUnit::Month, InterestRate::annual(0.025)).unwrap();

        let summed = annuity.exact_present_value(&discount).unwrap();
        let closed = annuity.closed_form_present_value(&discount).unwrap();
        assert_relative_eq!(summed, closed, max_relative = 1e-10);
    }

    #[test]
    fn test_growth_equal_to_discount() {
        let rate = InterestRate::annual(0.04);
        let annuity = Annuity::growing(100.0, 10, TimeUnit::Year, rate).unwrap();

        assert_relative_eq!(annuity.closed_form_present_value(&rate).unwrap(), 1000.0, epsilon = 1e-9);
        assert_eq!(annuity.present_value(&rate).unwrap(), 1000.0);
    }

    #[test]
    fn test_zero_discount_rate() {
        let annuity = Annuity::new(100.0, 12, TimeUnit::Month).unwrap();
        assert_eq!(annuity.present_value(&InterestRate::zero()).unwrap(), 1200.0);
        assert_eq!(annuity.closed_form_present_value(&InterestRate::zero()).unwrap(), 1200.0);
    }

    #[test]
    fn test_payment_count_bounds() {
        assert!(matches!(
            Annuity::new(100.0, 0, TimeUnit::Year),
            Err(ValuationError::Domain(_))
        ));
        assert!(matches!(
            Annuity::new(100.0, MAX_PAYMENTS + 1, TimeUnit::Day),
            Err(ValuationError::Domain(_))
        ));
    }
}
