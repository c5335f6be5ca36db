//! Real-estate affordability built on the valuation model
//!
//! A [`PropertyScenario`] describes one purchase. It can be valued at a given
//! price, solved for the highest affordable price, or simulated with rent
//! vacancies.

mod scenario;
mod valuation;
mod report;
pub mod loader;

pub use scenario::PropertyScenario;
pub use valuation::{PropertyValuation, RentSimulation};
pub use report::{format_currency, SimulationSummary, PERCENTILES};
pub use loader::{load_scenarios, read_scenarios, write_results, BatchResult, ScenarioRecord};
