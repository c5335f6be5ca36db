//! Rate model: time units and unit-aware interest rates

mod time_unit;
mod interest_rate;

pub use time_unit::{TimeUnit, WEEKS_PER_YEAR, DAYS_PER_YEAR};
pub use interest_rate::InterestRate;
