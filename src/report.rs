//! CSV and JSON output for valuation results

use crate::error::Result;
use crate::portfolio::{ValuationRecord, YearlyTotal};
use crate::projection::SensitivityGrid;
use serde::Serialize;
use std::io::Write;

/// One restaurant-year in the projections CSV
#[derive(Debug, Serialize)]
struct ProjectionRow<'a> {
    restaurant_id: &'a str,
    year: i32,
    sales: f64,
    pac: f64,
    rent: f64,
    service_fees: f64,
    rent_index: f64,
    miscellaneous: f64,
    total_non_controllables: f64,
    soi: f64,
    cashflow: f64,
    free_cash_flow: f64,
    present_value: f64,
}

/// Write every projection row of every record
pub fn write_projections_csv<W: Write>(writer: W, records: &[ValuationRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in records {
        for row in &record.result.yearly_projections {
            wtr.serialize(ProjectionRow {
                restaurant_id: &record.restaurant_id,
                year: row.year,
                sales: row.sales,
                pac: row.pac,
                rent: row.rent,
                service_fees: row.service_fees,
                rent_index: row.rent_index,
                miscellaneous: row.miscellaneous,
                total_non_controllables: row.total_non_controllables,
                soi: row.soi,
                cashflow: row.cashflow,
                free_cash_flow: row.free_cash_flow,
                present_value: row.present_value,
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write portfolio totals, one row per calendar year
pub fn write_yearly_totals_csv<W: Write>(writer: W, totals: &[YearlyTotal]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["year", "restaurants", "sales", "soi", "free_cash_flow", "present_value"])?;

    for total in totals {
        wtr.write_record([
            total.year.to_string(),
            total.restaurants.to_string(),
            format!("{:.2}", total.sales),
            format!("{:.2}", total.soi),
            format!("{:.2}", total.free_cash_flow),
            format!("{:.2}", total.present_value),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Plain-text sensitivity table: growth rates down, discount rates across
pub fn write_sensitivity_table<W: Write>(mut writer: W, grid: &SensitivityGrid) -> Result<()> {
    write!(writer, "{:>10}", "g \\ r")?;
    for rate in &grid.discount_rates {
        write!(writer, " {:>14}", format!("{:.2}%", rate))?;
    }
    writeln!(writer)?;

    for (growth, row) in grid.growth_rates.iter().zip(&grid.valuations) {
        write!(writer, "{:>10}", format!("{:.2}%", growth))?;
        for value in row {
            write!(writer, " {:>14.0}", value)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Pretty-printed JSON of any serializable result
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}
