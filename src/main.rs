//! Property PV CLI
//!
//! Values a rented property purchase: its net present value at a given price,
//! the maximum affordable price, or a Monte Carlo run with rent vacancies.
//!
//! Environment:
//! - `MC_SEED` - seed for `simulate` when `--seed` is not given
//! - `PERPETUITY_HORIZON_MULTIPLIER` - years of rent enumerated per sample (default 1000)

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use property_pv::flows::DEFAULT_HORIZON_MULTIPLIER;
use property_pv::property::{format_currency, PropertyValuation, SimulationSummary};
use property_pv::PropertyScenario;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "property_pv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Net present value of buying at the given price
    PresentValue {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// Highest price at which the purchase breaks even
    MaxPrice {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// Monte Carlo present value with monthly rent vacancies
    Simulate {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Number of samples
        #[arg(long, default_value = "1000")]
        samples: usize,

        /// Chance that any given month is vacant
        #[arg(long, default_value = "0.05")]
        vacancy: f64,

        /// RNG seed (falls back to MC_SEED, then entropy)
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Scenario from a JSON file, with individual fields overridable by flags
#[derive(Args)]
struct ScenarioArgs {
    /// JSON file with the scenario
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long)]
    price: Option<f64>,

    #[arg(long)]
    down_payment: Option<f64>,

    /// Annual discount rate (0.05 for 5%)
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Nominal annual mortgage rate (APR), compounded monthly
    #[arg(long)]
    mortgage_rate: Option<f64>,

    #[arg(long)]
    mortgage_years: Option<u32>,

    #[arg(long)]
    monthly_rent: Option<f64>,

    #[arg(long)]
    rent_growth: Option<f64>,

    /// Yearly maintenance cost
    #[arg(long)]
    maintenance_cost: Option<f64>,

    #[arg(long)]
    cost_growth: Option<f64>,
}

impl ScenarioArgs {
    fn load(&self) -> Result<PropertyScenario> {
        let mut scenario = match &self.scenario {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading scenario file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing scenario file {}", path.display()))?
            }
            None => PropertyScenario::default(),
        };

        let overrides = [
            (self.price, &mut scenario.property_price),
            (self.down_payment, &mut scenario.down_payment),
            (self.discount_rate, &mut scenario.discount_rate),
            (self.mortgage_rate, &mut scenario.mortgage_rate),
            (self.monthly_rent, &mut scenario.monthly_rent),
            (self.rent_growth, &mut scenario.rent_growth),
            (self.maintenance_cost, &mut scenario.maintenance_cost),
            (self.cost_growth, &mut scenario.cost_growth),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(years) = self.mortgage_years {
            scenario.mortgage_years = years;
        }

        scenario.validate().context("invalid scenario")?;
        Ok(scenario)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::PresentValue { scenario } => {
            let scenario = scenario.load()?;
            require_price(&scenario)?;
            let valuation = scenario.valuation().context("valuing purchase")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&valuation)?);
            } else {
                print_valuation(&valuation);
            }
        }

        Commands::MaxPrice { scenario } => {
            let scenario = scenario.load()?;
            let price = scenario
                .maximum_property_price()
                .context("solving for the maximum price")?;
            if cli.json {
                println!("{}", serde_json::json!({ "maximum_property_price": price }));
            } else {
                println!("Maximum property price: {}", format_currency(price));
            }
        }

        Commands::Simulate { scenario, samples, vacancy, seed } => {
            let scenario = scenario.load()?;
            require_price(&scenario)?;

            let horizon_multiplier: f64 = env::var("PERPETUITY_HORIZON_MULTIPLIER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_HORIZON_MULTIPLIER);

            let seed: Option<u64> = seed.or_else(|| {
                env::var("MC_SEED")
                    .ok()
                    .and_then(|s| s.parse().ok())
            });
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            info!(
                "simulating {} samples, vacancy {}, horizon {} years, seed {:?}",
                samples, vacancy, horizon_multiplier, seed
            );

            let simulation = scenario
                .rent_simulation(vacancy, horizon_multiplier)
                .context("building rent simulation")?;
            let expected = simulation.expected_present_value()?;
            let summary = simulation
                .run(samples, &mut rng)
                .context("sampling present values")?
                .context("--samples must be at least 1")?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "expected_present_value": expected,
                        "summary": summary,
                    }))?
                );
            } else {
                print_summary(&summary, expected);
            }
        }
    }

    Ok(())
}

fn require_price(scenario: &PropertyScenario) -> Result<()> {
    if scenario.property_price <= 0.0 {
        bail!("a property price is required (--price or property_price in the scenario file)");
    }
    Ok(())
}

fn print_valuation(v: &PropertyValuation) {
    println!("Property price:          {:>16}", format_currency(v.property_price));
    println!("Down payment:            {:>16}", format_currency(v.down_payment));
    println!("Monthly mortgage:        {:>16}", format_currency(v.monthly_mortgage_payment));
    println!();
    println!("PV of mortgage:          {:>16}", format_currency(v.mortgage_pv));
    println!("PV of maintenance:       {:>16}", format_currency(v.maintenance_pv));
    println!("PV of rent:              {:>16}", format_currency(v.rent_pv));
    println!("Net present value:       {:>16}", format_currency(v.present_value));
}

fn print_summary(summary: &SimulationSummary, expected: f64) {
    println!("Samples:                 {:>16}", summary.samples);
    println!("Expected present value:  {:>16}", format_currency(expected));
    println!("Mean present value:      {:>16}", format_currency(summary.mean));
    for (p, value) in &summary.percentiles {
        println!("  P{:<2}                   {:>16}", (p * 100.0).round(), format_currency(*value));
    }
}
