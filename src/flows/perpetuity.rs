//! Never-ending payment streams

use log::warn;

use super::{round_cents, Annuity, PresentValue, MAX_PAYMENTS};
use crate::error::{ValuationError, ValuationResult};
use crate::formulas;
use crate::rates::{InterestRate, TimeUnit};

/// Years of payments used when a perpetuity is approximated by a finite annuity
pub const DEFAULT_HORIZON_MULTIPLIER: f64 = 1000.0;

/// Horizons above this many payments are logged as expensive
const LARGE_HORIZON: u32 = 100_000;

/// Payment of `amount` at the end of every period of `unit`, forever,
/// growing by `growth` per period
///
/// Valued in closed form as `amount * (1 + g) / (r - g)`, which is the limit of
/// the equivalent [`Annuity`] as its length goes to infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perpetuity {
    amount: f64,
    unit: TimeUnit,
    growth: InterestRate,
    horizon_multiplier: f64,
}

impl Perpetuity {
    /// Level payments
    pub fn new(amount: f64, unit: TimeUnit) -> ValuationResult<Self> {
        Self::growing(amount, unit, InterestRate::zero())
    }

    pub fn growing(amount: f64, unit: TimeUnit, growth: InterestRate) -> ValuationResult<Self> {
        if !amount.is_finite() {
            return Err(ValuationError::domain(format!("perpetuity amount must be finite, got {}", amount)));
        }

        Ok(Self {
            amount,
            unit,
            growth,
            horizon_multiplier: DEFAULT_HORIZON_MULTIPLIER,
        })
    }

    /// Set the number of years covered by the finite approximation
    pub fn with_horizon_multiplier(mut self, horizon_multiplier: f64) -> ValuationResult<Self> {
        if !horizon_multiplier.is_finite() || horizon_multiplier <= 0.0 {
            return Err(ValuationError::domain(format!(
                "horizon multiplier must be positive, got {}",
                horizon_multiplier
            )));
        }
        let horizon = (horizon_multiplier * self.unit.periods_per_year()).round();
        if horizon > MAX_PAYMENTS as f64 {
            return Err(ValuationError::domain(format!(
                "perpetuity horizon of {} payments exceeds the limit of {}",
                horizon, MAX_PAYMENTS
            )));
        }

        self.horizon_multiplier = horizon_multiplier;
        Ok(self)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn growth(&self) -> InterestRate {
        self.growth
    }

    pub fn horizon_multiplier(&self) -> f64 {
        self.horizon_multiplier
    }

    /// Number of payments in the finite approximation
    pub fn horizon(&self) -> u32 {
        ((self.horizon_multiplier * self.unit.periods_per_year()).round() as u32).max(1)
    }

    /// Materialize the finite approximation: an annuity of [`horizon`](Self::horizon) payments
    pub fn to_annuity(&self) -> ValuationResult<Annuity> {
        let horizon = self.horizon();
        if horizon > LARGE_HORIZON {
            warn!(
                "approximating perpetuity with {} cash flows per {}; prefer the closed form",
                horizon, self.unit
            );
        }
        Annuity::growing(self.amount, horizon, self.unit, self.growth)
    }

    /// Unrounded closed-form present value
    pub fn exact_present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        let r = discount_rate.rate_in(self.unit);
        let g = self.growth.rate_in(self.unit);

        if g > r {
            return Err(ValuationError::domain(format!(
                "growth rate {} exceeds discount rate {} per {}; perpetuity does not converge",
                g, r, self.unit
            )));
        }

        let growth = if g == 0.0 { None } else { Some(g) };
        formulas::present_value_perpetuity(self.amount, r, growth)
    }
}

impl PresentValue for Perpetuity {
    /// Closed-form present value, rounded to cents
    fn present_value(&self, discount_rate: &InterestRate) -> ValuationResult<f64> {
        Ok(round_cents(self.exact_present_value(discount_rate)?))
    }
}
