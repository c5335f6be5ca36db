//! Value every property scenario in a CSV file
//!
//! Usage: run_batch <input.csv> [output.csv]
//!
//! Each row gets its present value (when a price is given) and its maximum
//! affordable price. Rows that fail keep their error text in the output.

use anyhow::{anyhow, Context, Result};
use property_pv::property::{format_currency, load_scenarios, write_results, BatchResult};
use std::env;
use std::fs::File;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.csv> [output.csv]", args[0]);
        std::process::exit(1);
    }
    let input_path = &args[1];
    let output_path = args.get(2).map(String::as_str).unwrap_or("batch_output.csv");

    let start = Instant::now();
    println!("Loading scenarios from {}...", input_path);

    let records = load_scenarios(input_path)
        .map_err(|e| anyhow!("failed to load {}: {}", input_path, e))?;
    println!("Loaded {} scenarios in {:?}", records.len(), start.elapsed());

    let results: Vec<BatchResult> = records.iter().map(|r| r.evaluate()).collect();

    let file = File::create(output_path)
        .with_context(|| format!("creating output file {}", output_path))?;
    write_results(file, &results)
        .map_err(|e| anyhow!("failed to write {}: {}", output_path, e))?;
    println!("Output written to {}", output_path);

    println!("\nBatch Summary:");
    for result in &results {
        let pv = result.present_value.map(format_currency).unwrap_or_else(|| "-".to_string());
        let max = result.maximum_price.map(format_currency).unwrap_or_else(|| "-".to_string());
        match &result.error {
            Some(error) => println!("  {:<12} PV={:>16}  Max={:>16}  ({})", result.scenario_id, pv, max, error),
            None => println!("  {:<12} PV={:>16}  Max={:>16}", result.scenario_id, pv, max),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        println!("\n{} of {} scenarios reported errors", failed, results.len());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
