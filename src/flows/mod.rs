//! Deterministic cash flow model
//!
//! - [`CashFlow`]: a single amount due after a number of periods
//! - [`Annuity`]: a finite, optionally growing, sequence of periodic cash flows
//! - [`Perpetuity`]: a never-ending stream, valued in closed form
//!
//! Every type implements [`PresentValue`] against an [`InterestRate`] quoted in
//! any time unit; conversion to the flow's own unit happens inside the model.

mod cash_flow;
mod annuity;
mod perpetuity;

pub use cash_flow::CashFlow;
pub use annuity::{Annuity, MAX_PAYMENTS};
pub use perpetuity::{Perpetuity, DEFAULT_HORIZON_MULTIPLIER};

use crate::error::ValuationResult;
use crate::rates::InterestRate;

/// Anything that can be discounted to a present value
pub trait PresentValue {
    /// Present value at `discount_rate`
    fn present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64>;
}

/// Round an aggregate amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(379.0786769), 379.08);
        assert_eq!(round_cents(-909.090909), -909.09);
        assert_eq!(round_cents(1000.0), 1000.0);
    }
}
