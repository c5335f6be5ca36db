//! Load property scenarios from CSV and write batch results

use super::PropertyScenario;
use csv::{Reader, Writer};
use serde::Serialize;
use std::error::Error;
use std::io::{Read, Write};
use std::path::Path;

/// Raw CSV row; optional columns may be absent or left empty
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: String,
    #[serde(rename = "PropertyPrice")]
    property_price: Option<f64>,
    #[serde(rename = "DownPayment")]
    down_payment: f64,
    #[serde(rename = "DiscountRate")]
    discount_rate: f64,
    #[serde(rename = "MortgageRate")]
    mortgage_rate: f64,
    #[serde(rename = "MortgageYears")]
    mortgage_years: Option<u32>,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: f64,
    #[serde(rename = "RentGrowth")]
    rent_growth: Option<f64>,
    #[serde(rename = "MaintenanceCost")]
    maintenance_cost: Option<f64>,
    #[serde(rename = "CostGrowth")]
    cost_growth: Option<f64>,
}

impl CsvRow {
    fn to_record(self) -> ScenarioRecord {
        let defaults = PropertyScenario::default();
        ScenarioRecord {
            id: self.scenario_id,
            scenario: PropertyScenario {
                property_price: self.property_price.unwrap_or(defaults.property_price),
                down_payment: self.down_payment,
                discount_rate: self.discount_rate,
                mortgage_rate: self.mortgage_rate,
                mortgage_years: self.mortgage_years.unwrap_or(defaults.mortgage_years),
                monthly_rent: self.monthly_rent,
                rent_growth: self.rent_growth.unwrap_or(defaults.rent_growth),
                maintenance_cost: self.maintenance_cost.unwrap_or(defaults.maintenance_cost),
                cost_growth: self.cost_growth.unwrap_or(defaults.cost_growth),
            },
        }
    }
}

/// A scenario tagged with its batch identifier
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRecord {
    pub id: String,
    pub scenario: PropertyScenario,
}

impl ScenarioRecord {
    /// Value the scenario; failures are kept as text so one bad row
    /// does not stop a batch
    pub fn evaluate(&self) -> BatchResult {
        let mut result = BatchResult {
            scenario_id: self.id.clone(),
            ..Default::default()
        };

        let mut errors = Vec::new();

        if self.scenario.property_price > 0.0 {
            match self.scenario.valuation() {
                Ok(v) => {
                    result.monthly_mortgage_payment = Some(v.monthly_mortgage_payment);
                    result.present_value = Some(v.present_value);
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        match self.scenario.maximum_property_price() {
            Ok(price) => result.maximum_price = Some(price),
            Err(e) => errors.push(e.to_string()),
        }

        if !errors.is_empty() {
            result.error = Some(errors.join("; "));
        }
        result
    }
}

/// One output row of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    #[serde(rename = "ScenarioID")]
    pub scenario_id: String,
    #[serde(rename = "MonthlyMortgagePayment")]
    pub monthly_mortgage_payment: Option<f64>,
    #[serde(rename = "PresentValue")]
    pub present_value: Option<f64>,
    #[serde(rename = "MaximumPrice")]
    pub maximum_price: Option<f64>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// Load scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioRecord>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    read_scenarios(file)
}

/// Load scenarios from any CSV source with a header row
pub fn read_scenarios<R: Read>(source: R) -> Result<Vec<ScenarioRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(source);
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record());
    }

    Ok(records)
}

/// Write batch results with a header row
pub fn write_results<W: Write>(sink: W, results: &[BatchResult]) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_writer(sink);
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
ScenarioID,PropertyPrice,DownPayment,DiscountRate,MortgageRate,MortgageYears,MonthlyRent,RentGrowth,MaintenanceCost,CostGrowth
A,300000,60000,0.05,0.04,25,1500,0.02,3000,0.02
B,,50000,0.06,0.045,,1800,,,
";

    #[test]
    fn test_read_scenarios() {
        let records = read_scenarios(CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let a = &records[0];
        assert_eq!(a.id, "A");
        assert_eq!(a.scenario.mortgage_years, 25);
        assert_eq!(a.scenario.monthly_rent, 1500.0);
        assert_eq!(a.scenario.cost_growth, 0.02);
    }

    #[test]
    fn test_missing_optional_columns() {
        let records = read_scenarios(CSV.as_bytes()).unwrap();
        let b = &records[1].scenario;

        assert_eq!(b.property_price, 0.0);
        assert_eq!(b.mortgage_years, 30);
        assert_eq!(b.rent_growth, 0.0);
        assert_eq!(b.maintenance_cost, 0.0);
    }

    #[test]
    fn test_bad_row_is_an_error() {
        let csv = "ScenarioID,DownPayment,DiscountRate,MortgageRate,MonthlyRent\nX,abc,0.05,0.04,1000\n";
        assert!(read_scenarios(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_evaluate() {
        let records = read_scenarios(CSV.as_bytes()).unwrap();

        let a = records[0].evaluate();
        assert_eq!(a.scenario_id, "A");
        assert!(a.present_value.is_some());
        assert!(a.maximum_price.is_some());
        assert!(a.error.is_none());

        // no price given: only the maximum price is computed
        let b = records[1].evaluate();
        assert!(b.present_value.is_none());
        assert!(b.maximum_price.is_some());
    }

    #[test]
    fn test_evaluate_keeps_errors() {
        let record = ScenarioRecord {
            id: "bad".to_string(),
            scenario: PropertyScenario {
                property_price: 100_000.0,
                down_payment: 200_000.0,
                discount_rate: 0.05,
                mortgage_rate: 0.04,
                monthly_rent: 10.0,
                ..Default::default()
            },
        };
        let result = record.evaluate();

        assert!(result.present_value.is_none());
        assert!(result.maximum_price.is_none());
        let error = result.error.unwrap();
        assert!(error.contains("exceeds property price"));
        assert!(error.contains("no price is affordable"));
    }

    #[test]
    fn test_write_results() {
        let results = vec![
            BatchResult {
                scenario_id: "A".to_string(),
                monthly_mortgage_payment: Some(1261.56),
                present_value: Some(-1234.5),
                maximum_price: Some(250_000.0),
                error: None,
            },
            BatchResult {
                scenario_id: "B".to_string(),
                error: Some("domain error: x".to_string()),
                ..Default::default()
            },
        ];

        let mut out = Vec::new();
        write_results(&mut out, &results).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ScenarioID,MonthlyMortgagePayment,PresentValue,MaximumPrice,Error");
        assert_eq!(lines[1], "A,1261.56,-1234.5,250000.0,");
        assert_eq!(lines[2], "B,,,,domain error: x");
    }
}
