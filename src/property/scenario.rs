//! Inputs of a property purchase

use serde::{Deserialize, Serialize};

use crate::error::{ValuationError, ValuationResult};
use crate::rates::{InterestRate, TimeUnit};

fn default_mortgage_years() -> u32 { 30 }

/// A property purchase financed by a mortgage and rented out
///
/// All rates are annual effective decimals (0.05 for 5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyScenario {
    /// Purchase price (ignored when solving for the maximum price)
    #[serde(default)]
    pub property_price: f64,

    pub down_payment: f64,

    /// Annual rate used to discount every cash flow
    pub discount_rate: f64,

    /// Nominal annual mortgage rate (APR), compounded monthly
    pub mortgage_rate: f64,

    #[serde(default = "default_mortgage_years")]
    pub mortgage_years: u32,

    /// Rent received at the end of every month
    pub monthly_rent: f64,

    /// Annual rent growth
    #[serde(default)]
    pub rent_growth: f64,

    /// Maintenance paid at the end of every year
    #[serde(default)]
    pub maintenance_cost: f64,

    /// Annual growth of maintenance costs
    #[serde(default)]
    pub cost_growth: f64,
}

impl Default for PropertyScenario {
    fn default() -> Self {
        Self {
            property_price: 0.0,
            down_payment: 0.0,
            discount_rate: 0.0,
            mortgage_rate: 0.0,
            mortgage_years: default_mortgage_years(),
            monthly_rent: 0.0,
            rent_growth: 0.0,
            maintenance_cost: 0.0,
            cost_growth: 0.0,
        }
    }
}

impl PropertyScenario {
    /// Check amounts and terms before any valuation
    pub fn validate(&self) -> ValuationResult<()> {
        let amounts = [
            ("property price", self.property_price),
            ("down payment", self.down_payment),
            ("monthly rent", self.monthly_rent),
            ("maintenance cost", self.maintenance_cost),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ValuationError::domain(format!("{} must be non-negative, got {}", name, value)));
            }
        }

        let rates = [
            ("discount rate", self.discount_rate),
            ("mortgage rate", self.mortgage_rate),
            ("rent growth", self.rent_growth),
            ("cost growth", self.cost_growth),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value <= -1.0 {
                return Err(ValuationError::domain(format!("{} must be above -100%, got {}", name, value)));
            }
        }

        if self.mortgage_years == 0 {
            return Err(ValuationError::domain("mortgage length must be at least one year"));
        }

        Ok(())
    }

    /// Validate a scenario for a known purchase price
    pub fn validate_purchase(&self) -> ValuationResult<()> {
        self.validate()?;
        if self.down_payment > self.property_price {
            return Err(ValuationError::domain(format!(
                "down payment {} exceeds property price {}",
                self.down_payment, self.property_price
            )));
        }
        Ok(())
    }

    pub fn discount(&self) -> InterestRate {
        InterestRate::annual(self.discount_rate)
    }

    /// Monthly mortgage rate: the quoted APR divided by 12
    pub fn mortgage(&self) -> InterestRate {
        InterestRate::new(self.mortgage_rate / 12.0, TimeUnit::Month)
    }

    pub fn rent_growth_rate(&self) -> InterestRate {
        InterestRate::annual(self.rent_growth)
    }

    pub fn cost_growth_rate(&self) -> InterestRate {
        InterestRate::annual(self.cost_growth)
    }

    pub fn mortgage_months(&self) -> u32 {
        self.mortgage_years.saturating_mul(12)
    }

    /// Amount borrowed
    pub fn principal(&self) -> f64 {
        self.property_price - self.down_payment
    }

    /// Copy of this scenario at a different price
    pub fn at_price(&self, property_price: f64) -> Self {
        Self {
            property_price,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> PropertyScenario {
        PropertyScenario {
            property_price: 300_000.0,
            down_payment: 60_000.0,
            discount_rate: 0.05,
            mortgage_rate: 0.04,
            mortgage_years: 25,
            monthly_rent: 1_500.0,
            rent_growth: 0.02,
            maintenance_cost: 3_000.0,
            cost_growth: 0.02,
        }
    }

    #[test]
    fn test_valid_scenario() {
        let s = scenario();
        assert!(s.validate_purchase().is_ok());
        assert_eq!(s.mortgage_months(), 300);
        assert_eq!(s.principal(), 240_000.0);
    }

    #[test]
    fn test_mortgage_rate_is_nominal() {
        let s = scenario();
        assert_eq!(s.mortgage().unit(), TimeUnit::Month);
        assert_eq!(s.mortgage().rate_in(TimeUnit::Month), 0.04 / 12.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut s = scenario();
        s.down_payment = 400_000.0;
        assert!(s.validate().is_ok());
        assert!(s.validate_purchase().is_err());

        let mut s = scenario();
        s.mortgage_years = 0;
        assert!(s.validate().is_err());

        let mut s = scenario();
        s.monthly_rent = -10.0;
        assert!(s.validate().is_err());

        let mut s = scenario();
        s.discount_rate = f64::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "down_payment": 50000,
            "discount_rate": 0.06,
            "mortgage_rate": 0.045,
            "monthly_rent": 1800
        }"#;
        let s: PropertyScenario = serde_json::from_str(json).unwrap();

        assert_eq!(s.mortgage_years, 30);
        assert_eq!(s.property_price, 0.0);
        assert_eq!(s.rent_growth, 0.0);
        assert_eq!(s.monthly_rent, 1800.0);
    }
}
