//! Value every restaurant in a CSV file
//!
//! Writes per-year projections and portfolio totals as CSV, optionally the
//! full valuation records as JSON.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use restaurant_valuation::assumptions::load_restaurants;
use restaurant_valuation::portfolio::{apply_adjustments, value_portfolio, AdjustmentParams};
use restaurant_valuation::projection::{rates_around, sensitivity_grid, ValuationConfig, ValuationEngine};
use restaurant_valuation::report::{
    write_json, write_projections_csv, write_sensitivity_table, write_yearly_totals_csv,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Discounted-cash-flow valuation for a restaurant portfolio")]
struct Args {
    /// Restaurant assumptions CSV
    #[arg(long)]
    input: PathBuf,

    /// Calendar year of projection year 1
    #[arg(long, conflicts_with = "valuation_date")]
    base_year: Option<i32>,

    /// Valuation date (YYYY-MM-DD); its year is the base year
    #[arg(long)]
    valuation_date: Option<NaiveDate>,

    /// JSON file of portfolio adjustments
    #[arg(long)]
    adjustments: Option<PathBuf>,

    /// Recorded as the creator of each valuation
    #[arg(long)]
    created_by: Option<String>,

    #[arg(long, default_value = "portfolio_projections.csv")]
    projections_out: PathBuf,

    #[arg(long, default_value = "portfolio_totals.csv")]
    totals_out: PathBuf,

    /// Also write the full valuation records as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Print a discount × growth sensitivity table per restaurant
    #[arg(long)]
    sensitivity: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (config, valuation_date) = match (args.base_year, args.valuation_date) {
        (Some(year), None) => {
            let date = NaiveDate::from_ymd_opt(year, 1, 1)
                .with_context(|| format!("base year {} is out of range", year))?;
            (ValuationConfig::new(year), date)
        }
        (None, Some(date)) => (ValuationConfig::from_valuation_date(date), date),
        _ => bail!("one of --base-year or --valuation-date is required"),
    };

    let start = Instant::now();
    println!("Loading restaurants from {}...", args.input.display());
    let mut restaurants = load_restaurants(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    println!("Loaded {} restaurants in {:?}", restaurants.len(), start.elapsed());

    if let Some(path) = &args.adjustments {
        let file = File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let params: AdjustmentParams = serde_json::from_reader(file)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        restaurants = apply_adjustments(&restaurants, &params);
    }

    let engine = ValuationEngine::new(config);
    let portfolio = value_portfolio(&engine, &restaurants, valuation_date, args.created_by.as_deref());

    let projections = File::create(&args.projections_out)
        .with_context(|| format!("failed to create {}", args.projections_out.display()))?;
    write_projections_csv(BufWriter::new(projections), &portfolio.records)?;

    let totals = File::create(&args.totals_out)
        .with_context(|| format!("failed to create {}", args.totals_out.display()))?;
    write_yearly_totals_csv(BufWriter::new(totals), &portfolio.yearly_totals)?;

    if let Some(path) = &args.json_out {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_json(BufWriter::new(file), &portfolio)?;
    }

    println!("\nPortfolio Summary (base year {}):", config.base_year);
    for record in &portfolio.records {
        println!(
            "  {:<12} {:>3} yrs  valuation=${:.0}",
            record.restaurant_id,
            record.result.years(),
            record.result.final_valuation
        );
    }
    for rejected in &portfolio.rejected {
        println!("  {:<12} rejected: {}", rejected.restaurant_id, rejected.reason);
    }
    println!("  Total valuation: ${:.0}", portfolio.total_valuation);

    if args.sensitivity {
        for record in &portfolio.records {
            let input = &record.input;
            let grid = sensitivity_grid(
                &engine,
                input,
                &rates_around(input.discount_rate, 1.0, 2),
                &rates_around(input.sales_growth_rate, 1.0, 2),
            );
            println!("\nSensitivity for {}:", record.restaurant_id);
            write_sensitivity_table(std::io::stdout().lock(), &grid)?;
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
