//! Monte Carlo cash flows
//!
//! Each stochastic type wraps its deterministic counterpart and a
//! `chance_of_zero`. Every evaluation draws once per payment from the
//! caller's random source: with probability `chance_of_zero` the payment is
//! worth nothing, otherwise it keeps its discounted value. Evaluation is
//! therefore a random variable; pass a seeded RNG for reproducible runs.
//!
//! Repeating evaluations and summarizing the distribution is left to callers.

mod cash_flow;
mod annuity;

pub use cash_flow::MonteCarloCashFlow;
pub use annuity::{MonteCarloAnnuity, MonteCarloPerpetuity};

use rand::Rng;

use crate::error::{ValuationError, ValuationResult};
use crate::rates::InterestRate;

/// A present value that is sampled rather than computed
pub trait SamplePresentValue {
    /// One draw of the present value at `discount_rate`
    fn sample_present_value<R: Rng + ?Sized>(
        &self,
        discount_rate: &InterestRate,
        rng: &mut R,
    ) -> ValuationResult<f64>;

    /// Mean of the sampled present value
    fn expected_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64>;
}

pub(crate) fn check_chance_of_zero(chance_of_zero: f64) -> ValuationResult<()> {
    if !(0.0..=1.0).contains(&chance_of_zero) {
        return Err(ValuationError::ProbabilityOutOfRange(chance_of_zero));
    }
    Ok(())
}

/// True when the payment is lost on this draw
///
/// `gen::<f64>()` is uniform on [0, 1), so a chance of 1 always zeroes the
/// payment and a chance of 0 never does.
pub(crate) fn draw_zero<R: Rng + ?Sized>(rng: &mut R, chance_of_zero: f64) -> bool {
    rng.gen::<f64>() < chance_of_zero
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chance_bounds() {
        assert!(check_chance_of_zero(0.0).is_ok());
        assert!(check_chance_of_zero(1.0).is_ok());
        assert_eq!(
            check_chance_of_zero(1.5),
            Err(ValuationError::ProbabilityOutOfRange(1.5))
        );
        assert!(check_chance_of_zero(-0.1).is_err());
        assert!(check_chance_of_zero(f64::NAN).is_err());
    }

    #[test]
    fn test_draw_frequency() {
        let mut rng = StdRng::seed_from_u64(7);
        let zeros = (0..10_000).filter(|_| draw_zero(&mut rng, 0.3)).count();
        let freq = zeros as f64 / 10_000.0;
        assert!((freq - 0.3).abs() < 0.02, "observed frequency {}", freq);
    }
}
