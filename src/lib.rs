//! Property PV - time-value-of-money valuation engine
//!
//! This library provides:
//! - Interest rates tied to a time unit, with effective-rate conversion
//! - Single cash flows, annuities and perpetuities (flat or growing)
//! - Monte Carlo variants whose payments may each be lost
//! - Closed-form present value and payment formulas
//! - A real-estate affordability calculator (purchase PV, maximum price)

pub mod error;
pub mod rates;
pub mod flows;
pub mod formulas;
pub mod stochastic;
pub mod property;

// Re-export commonly used types
pub use error::{ValuationError, ValuationResult};
pub use rates::{InterestRate, TimeUnit};
pub use flows::{Annuity, CashFlow, Perpetuity, PresentValue};
pub use stochastic::{MonteCarloAnnuity, MonteCarloCashFlow, MonteCarloPerpetuity, SamplePresentValue};
pub use property::{PropertyScenario, PropertyValuation};
