//! Annuities and perpetuities whose payments may each be lost

use rand::Rng;

use super::{check_chance_of_zero, draw_zero, SamplePresentValue};
use crate::error::ValuationResult;
use crate::flows::{round_cents, Annuity, PresentValue, Perpetuity};
use crate::rates::{InterestRate, TimeUnit};

/// Annuity whose every payment is independently zero with `chance_of_zero`
#[derive(Debug, Clone)]
pub struct MonteCarloAnnuity {
    annuity: Annuity,
    chance_of_zero: f64,
}

impl MonteCarloAnnuity {
    pub fn new(
        amount: f64,
        num_payments: u32,
        unit: TimeUnit,
        chance_of_zero: f64,
    ) -> ValuationResult<Self> {
        Self::growing(amount, num_payments, unit, InterestRate::zero(), chance_of_zero)
    }

    pub fn growing(
        amount: f64,
        num_payments: u32,
        unit: TimeUnit,
        growth: InterestRate,
        chance_of_zero: f64,
    ) -> ValuationResult<Self> {
        check_chance_of_zero(chance_of_zero)?;
        Self::from_annuity(Annuity::growing(amount, num_payments, unit, growth)?, chance_of_zero)
    }

    pub fn from_annuity(annuity: Annuity, chance_of_zero: f64) -> ValuationResult<Self> {
        check_chance_of_zero(chance_of_zero)?;
        Ok(Self { annuity, chance_of_zero })
    }

    pub fn annuity(&self) -> &Annuity {
        &self.annuity
    }

    pub fn chance_of_zero(&self) -> f64 {
        self.chance_of_zero
    }
}

impl SamplePresentValue for MonteCarloAnnuity {
    /// Sum of independent per-payment draws, rounded to cents
    fn sample_present_value<R: Rng + ?Sized>(
        &self,
        discount_rate: &InterestRate,
        rng: &mut R,
    ) -> ValuationResult<f64> {
        let mut total = 0.0;
        for cf in self.annuity.cash_flows() {
            let pv = cf.present_value(discount_rate)?;
            if !draw_zero(rng, self.chance_of_zero) {
                total += pv;
            }
        }
        Ok(round_cents(total))
    }

    fn expected_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let pv = self.annuity.exact_present_value(discount_rate)?;
        Ok(round_cents(pv * (1.0 - self.chance_of_zero)))
    }
}

/// Perpetuity sampled over its finite horizon
///
/// No closed form exists for a per-payment draw, so the stream is
/// materialized for `horizon_multiplier` years (see [`Perpetuity::horizon`]).
#[derive(Debug, Clone)]
pub struct MonteCarloPerpetuity {
    perpetuity: Perpetuity,
    stream: MonteCarloAnnuity,
}

impl MonteCarloPerpetuity {
    pub fn new(perpetuity: Perpetuity, chance_of_zero: f64) -> ValuationResult<Self> {
        check_chance_of_zero(chance_of_zero)?;
        let stream = MonteCarloAnnuity::from_annuity(perpetuity.to_annuity()?, chance_of_zero)?;
        Ok(Self { perpetuity, stream })
    }

    pub fn perpetuity(&self) -> &Perpetuity {
        &self.perpetuity
    }

    pub fn chance_of_zero(&self) -> f64 {
        self.stream.chance_of_zero()
    }

    pub fn horizon(&self) -> u32 {
        self.stream.annuity().num_payments()
    }
}

impl SamplePresentValue for MonteCarloPerpetuity {
    fn sample_present_value<R: Rng + ?Sized>(
        &self,
        discount_rate: &InterestRate,
        rng: &mut R,
    ) -> ValuationResult<f64> {
        // reject divergent streams the truncated sum would silently accept
        self.perpetuity.exact_present_value(discount_rate)?;
        self.stream.sample_present_value(discount_rate, rng)
    }

    /// Closed-form value scaled by the survival chance
    fn expected_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let pv = self.perpetuity.exact_present_value(discount_rate)?;
        Ok(round_cents(pv * (1.0 - self.chance_of_zero())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValuationError;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_risk_matches_deterministic_annuity() {
        let stochastic = MonteCarloAnnuity::new(100.0, 5, TimeUnit::Year, 0.0).unwrap();
        let discount = InterestRate::annual(0.10);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(stochastic.sample_present_value(&discount, &mut rng).unwrap(), 379.08);
    }

    #[test]
    fn test_certain_loss_is_zero() {
        let stochastic = MonteCarloAnnuity::growing(
            100.0,
            60,
            TimeUnit::Month,
            InterestRate::annual(0.03),
            1.0,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {
            assert_eq!(
                stochastic.sample_present_value(&InterestRate::annual(0.05), &mut rng).unwrap(),
                0.0
            );
        }
    }

    #[test]
    fn test_sample_mean_converges_to_expected() {
        let stochastic = MonteCarloAnnuity::new(100.0, 20, TimeUnit::Year, 0.2).unwrap();
        let discount = InterestRate::annual(0.06);
        let mut rng = StdRng::seed_from_u64(2024);

        let samples = 4000;
        let mean = (0..samples)
            .map(|_| stochastic.sample_present_value(&discount, &mut rng).unwrap())
            .sum::<f64>()
            / samples as f64;

        let expected = stochastic.expected_present_value(&discount).unwrap();
        // standard error of the mean is about 1.7 here
        assert_abs_diff_eq!(mean, expected, epsilon = 6.0);
    }

    #[test]
    fn test_perpetuity_without_risk_approaches_closed_form() {
        let perpetuity = Perpetuity::growing(1000.0, TimeUnit::Year, InterestRate::annual(0.02))
            .unwrap()
            .with_horizon_multiplier(999.0)
            .unwrap();
        let stochastic = MonteCarloPerpetuity::new(perpetuity, 0.0).unwrap();
        let discount = InterestRate::annual(0.06);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(stochastic.horizon(), 999);
        let sampled = stochastic.sample_present_value(&discount, &mut rng).unwrap();
        let closed = perpetuity.present_value(&discount).unwrap();
        assert_abs_diff_eq!(sampled, closed, epsilon = 0.02);
    }

    #[test]
    fn test_divergent_perpetuity_is_rejected() {
        let perpetuity = Perpetuity::growing(1000.0, TimeUnit::Year, InterestRate::annual(0.08))
            .unwrap()
            .with_horizon_multiplier(10.0)
            .unwrap();
        let stochastic = MonteCarloPerpetuity::new(perpetuity, 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        assert!(matches!(
            stochastic.sample_present_value(&InterestRate::annual(0.05), &mut rng),
            Err(ValuationError::Domain(_))
        ));
    }

    #[test]
    fn test_out_of_range_chance() {
        assert_eq!(
            MonteCarloAnnuity::new(100.0, 5, TimeUnit::Year, 1.5).unwrap_err(),
            ValuationError::ProbabilityOutOfRange(1.5)
        );
    }
}
