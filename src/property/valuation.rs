//! Present value and affordability of a property purchase
//!
//! The purchase is modelled as four cash flow streams, all discounted at the
//! scenario's discount rate:
//! - the down payment, paid today
//! - the mortgage: a monthly annuity of payments amortizing the principal
//! - maintenance: a yearly, growing perpetuity of costs
//! - rent: a monthly, growing perpetuity of income

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{PropertyScenario, SimulationSummary};
use crate::error::{ValuationError, ValuationResult};
use crate::flows::{round_cents, Annuity, Perpetuity, PresentValue};
use crate::formulas;
use crate::rates::{InterestRate, TimeUnit};
use crate::stochastic::{check_chance_of_zero, MonteCarloPerpetuity, SamplePresentValue};

/// Breakdown of a purchase's present value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValuation {
    pub property_price: f64,
    pub down_payment: f64,
    pub monthly_mortgage_payment: f64,

    /// Present value of the mortgage payments (negative)
    pub mortgage_pv: f64,

    /// Present value of maintenance costs (negative)
    pub maintenance_pv: f64,

    pub rent_pv: f64,

    /// Net present value of the purchase
    pub present_value: f64,
}

impl PropertyScenario {
    /// Monthly payment amortizing the principal over the mortgage term
    pub fn mortgage_payment(&self) -> ValuationResult<f64> {
        let principal = self.principal();
        if principal == 0.0 {
            return Ok(0.0);
        }

        let months = self.mortgage_months();
        let monthly_rate = self.mortgage().rate_in(TimeUnit::Month);
        if monthly_rate == 0.0 {
            return Ok(principal / months as f64);
        }
        formulas::payment_annuity(principal, monthly_rate, months)
    }

    /// Present value of monthly rent, growing forever
    pub fn rent_present_value(&self) -> ValuationResult<f64> {
        if self.monthly_rent == 0.0 {
            return Ok(0.0);
        }
        Perpetuity::growing(self.monthly_rent, TimeUnit::Month, self.rent_growth_rate())?
            .present_value(&self.discount())
    }

    /// Present value of yearly maintenance, growing forever (negative)
    pub fn maintenance_present_value(&self) -> ValuationResult<f64> {
        if self.maintenance_cost == 0.0 {
            return Ok(0.0);
        }
        Perpetuity::growing(-self.maintenance_cost, TimeUnit::Year, self.cost_growth_rate())?
            .present_value(&self.discount())
    }

    fn mortgage_present_value(&self, monthly_payment: f64) -> ValuationResult<f64> {
        if monthly_payment == 0.0 {
            return Ok(0.0);
        }
        Annuity::new(-monthly_payment, self.mortgage_months(), TimeUnit::Month)?
            .present_value(&self.discount())
    }

    /// Full breakdown of the purchase at `property_price`
    pub fn valuation(&self) -> ValuationResult<PropertyValuation> {
        self.validate_purchase()?;

        let monthly_mortgage_payment = self.mortgage_payment()?;
        let mortgage_pv = self.mortgage_present_value(monthly_mortgage_payment)?;
        let maintenance_pv = self.maintenance_present_value()?;
        let rent_pv = self.rent_present_value()?;
        let present_value = round_cents(-self.down_payment + mortgage_pv + maintenance_pv + rent_pv);

        debug!(
            "price {:.2}: payment {:.2}, mortgage {:.2}, maintenance {:.2}, rent {:.2} -> {:.2}",
            self.property_price, monthly_mortgage_payment, mortgage_pv, maintenance_pv, rent_pv, present_value
        );

        Ok(PropertyValuation {
            property_price: self.property_price,
            down_payment: self.down_payment,
            monthly_mortgage_payment,
            mortgage_pv,
            maintenance_pv,
            rent_pv,
            present_value,
        })
    }

    /// Net present value of buying at `property_price`
    pub fn present_value(&self) -> ValuationResult<f64> {
        Ok(self.valuation()?.present_value)
    }

    /// Highest price at which the purchase still has a present value of zero
    ///
    /// The rent and maintenance surplus over the down payment fixes the largest
    /// mortgage payment whose present value (at the discount rate) the property
    /// can carry; that payment, capitalized at the mortgage rate, is the
    /// affordable principal.
    pub fn maximum_property_price(&self) -> ValuationResult<f64> {
        self.validate()?;

        let surplus = self.rent_present_value()? + self.maintenance_present_value()? - self.down_payment;
        if surplus < 0.0 {
            return Err(ValuationError::domain(format!(
                "rent does not cover maintenance and the down payment (shortfall {:.2}); no price is affordable",
                -surplus
            )));
        }

        let months = self.mortgage_months();
        let discount_monthly = self.discount().rate_in(TimeUnit::Month);
        let max_payment = if discount_monthly == 0.0 {
            surplus / months as f64
        } else {
            formulas::payment_annuity(surplus, discount_monthly, months)?
        };

        let mortgage_monthly = self.mortgage().rate_in(TimeUnit::Month);
        let principal = if mortgage_monthly == 0.0 {
            max_payment * months as f64
        } else {
            formulas::present_value_annuity(max_payment, mortgage_monthly, months, None)?
        };

        debug!(
            "surplus {:.2} supports {:.2}/month over {} months -> principal {:.2}",
            surplus, max_payment, months, principal
        );

        Ok(round_cents(principal + self.down_payment))
    }

    /// Monte Carlo model of the purchase where each month's rent is lost
    /// with probability `vacancy_chance`
    pub fn rent_simulation(
        &self,
        vacancy_chance: f64,
        horizon_multiplier: f64,
    ) -> ValuationResult<RentSimulation> {
        check_chance_of_zero(vacancy_chance)?;
        let valuation = self.valuation()?;
        let fixed_present_value = -valuation.down_payment + valuation.mortgage_pv + valuation.maintenance_pv;

        let rent = if self.monthly_rent == 0.0 {
            None
        } else {
            let perpetuity = Perpetuity::growing(self.monthly_rent, TimeUnit::Month, self.rent_growth_rate())?
                .with_horizon_multiplier(horizon_multiplier)?;
            Some(MonteCarloPerpetuity::new(perpetuity, vacancy_chance)?)
        };

        Ok(RentSimulation {
            discount: self.discount(),
            fixed_present_value,
            rent,
        })
    }
}

/// Purchase valuation with stochastic rent
#[derive(Debug, Clone)]
pub struct RentSimulation {
    discount: InterestRate,
    /// Down payment, mortgage and maintenance
    fixed_present_value: f64,
    rent: Option<MonteCarloPerpetuity>,
}

impl RentSimulation {
    /// One draw of the purchase's present value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ValuationResult<f64> {
        let rent = match &self.rent {
            Some(rent) => rent.sample_present_value(&self.discount, rng)?,
            None => 0.0,
        };
        Ok(round_cents(self.fixed_present_value + rent))
    }

    /// Draw `samples` present values and summarize them
    pub fn run<R: Rng + ?Sized>(
        &self,
        samples: usize,
        rng: &mut R,
    ) -> ValuationResult<Option<SimulationSummary>> {
        let values = (0..samples)
            .map(|_| self.sample(rng))
            .collect::<ValuationResult<Vec<f64>>>()?;
        debug!("drew {} samples", values.len());
        Ok(SimulationSummary::from_samples(values))
    }

    pub fn expected_present_value(&self) -> ValuationResult<f64> {
        let rent = match &self.rent {
            Some(rent) => rent.expected_present_value(&self.discount)?,
            None => 0.0,
        };
        Ok(round_cents(self.fixed_present_value + rent))
    }
}
