//! Time units used to express rates and payment timing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValuationError;

/// Weeks per year (365.25 / 7, rounded to the convention used throughout the crate)
pub const WEEKS_PER_YEAR: f64 = 52.18;

/// Days per year including the leap-year average
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Periodicity of a rate or of a cash flow schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeUnit {
    #[default]
    #[serde(rename = "Y")]
    Year,
    #[serde(rename = "M")]
    Month,
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "D")]
    Day,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [TimeUnit::Year, TimeUnit::Month, TimeUnit::Week, TimeUnit::Day];

    /// Number of periods of this unit in one year
    pub fn periods_per_year(&self) -> f64 {
        match self {
            TimeUnit::Year => 1.0,
            TimeUnit::Month => 12.0,
            TimeUnit::Week => WEEKS_PER_YEAR,
            TimeUnit::Day => DAYS_PER_YEAR,
        }
    }

    /// Single-letter code (Y/M/W/D)
    pub fn code(&self) -> &'static str {
        match self {
            TimeUnit::Year => "Y",
            TimeUnit::Month => "M",
            TimeUnit::Week => "W",
            TimeUnit::Day => "D",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TimeUnit {
    type Err = ValuationError;

    /// Accepts the single-letter codes and the full names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "year" => Ok(TimeUnit::Year),
            "m" | "month" => Ok(TimeUnit::Month),
            "w" | "week" => Ok(TimeUnit::Week),
            "d" | "day" => Ok(TimeUnit::Day),
            _ => Err(ValuationError::InvalidUnit(s.to_string())),
        }
    }
}

impl TryFrom<&str> for TimeUnit {
    type Error = ValuationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = ValuationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(TimeUnit::Year.periods_per_year(), 1.0);
        assert_eq!(TimeUnit::Month.periods_per_year(), 12.0);
        assert_eq!(TimeUnit::Week.periods_per_year(), 52.18);
        assert_eq!(TimeUnit::Day.periods_per_year(), 365.25);
    }

    #[test]
    fn test_default_is_year() {
        assert_eq!(TimeUnit::default(), TimeUnit::Year);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("Y".parse::<TimeUnit>().unwrap(), TimeUnit::Year);
        assert_eq!("m".parse::<TimeUnit>().unwrap(), TimeUnit::Month);
        assert_eq!("Week".parse::<TimeUnit>().unwrap(), TimeUnit::Week);
        assert_eq!(TimeUnit::try_from("D").unwrap(), TimeUnit::Day);

        for unit in TimeUnit::ALL {
            assert_eq!(unit.code().parse::<TimeUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_unrecognized_unit() {
        let err = "X".parse::<TimeUnit>().unwrap_err();
        assert_eq!(err, ValuationError::InvalidUnit("X".to_string()));
    }

    #[test]
    fn test_serde_codes() {
        let unit: TimeUnit = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(unit, TimeUnit::Month);
        assert_eq!(serde_json::to_string(&TimeUnit::Week).unwrap(), "\"W\"");

        let err = serde_json::from_str::<TimeUnit>("\"Q\"").unwrap_err();
        assert!(err.to_string().contains("Y/M/W/D"));
    }
}
