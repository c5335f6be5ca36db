//! Display helpers for valuation results

use serde::Serialize;

/// Percentiles reported for simulation runs
pub const PERCENTILES: [f64; 3] = [0.05, 0.50, 0.95];

/// Format a currency value as `$1,234.56`
pub fn format_currency(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as u64;
    let dollars = (total_cents / 100).to_string();
    let cents = total_cents % 100;

    let mut grouped = String::new();
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && total_cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents)
}

/// Distribution of sampled present values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub samples: usize,
    pub mean: f64,
    /// (percentile, value) pairs for [`PERCENTILES`]
    pub percentiles: Vec<(f64, f64)>,
}

impl SimulationSummary {
    /// Summarize samples; `None` when there are none
    pub fn from_samples(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let percentiles = PERCENTILES
            .iter()
            .map(|&p| {
                let idx = (p * (n - 1) as f64).round() as usize;
                (p, values[idx])
            })
            .collect();

        Some(Self {
            samples: n,
            mean,
            percentiles,
        })
    }

    pub fn percentile(&self, target: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(p, _)| (*p - target).abs() < 1e-9)
            .map(|(_, v)| *v)
    }
}
