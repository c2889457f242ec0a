//! Restaurant portfolios: batch valuation, rejected inputs and yearly totals

pub mod adjuster;

pub use adjuster::{AdjustmentParams, apply_adjustments};

use crate::assumptions::ValuationInput;
use crate::projection::{ValuationEngine, ValuationResult};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A restaurant and the assumptions it is valued on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub input: ValuationInput,
}

/// A completed valuation as handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRecord {
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    pub valuation_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub input: ValuationInput,
    pub result: ValuationResult,
}

/// Restaurant skipped because its assumptions failed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRestaurant {
    pub restaurant_id: String,
    pub reason: String,
}

/// Portfolio totals for one calendar year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotal {
    pub year: i32,
    /// Restaurants still projecting in this year
    pub restaurants: usize,
    pub sales: f64,
    pub soi: f64,
    pub free_cash_flow: f64,
    pub present_value: f64,
}

/// Result of valuing a whole portfolio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub records: Vec<ValuationRecord>,
    pub rejected: Vec<RejectedRestaurant>,
    pub total_valuation: f64,
    pub yearly_totals: Vec<YearlyTotal>,
}

/// Value every restaurant in parallel.
///
/// Restaurants that fail validation are reported in `rejected`; the rest of
/// the portfolio is still valued. Records keep input order.
pub fn value_portfolio(
    engine: &ValuationEngine,
    restaurants: &[Restaurant],
    valuation_date: NaiveDate,
    created_by: Option<&str>,
) -> PortfolioValuation {
    log::info!(
        "Valuing {} restaurants as of {} (base year {})",
        restaurants.len(),
        valuation_date,
        engine.config().base_year
    );

    let outcomes: Vec<_> = restaurants
        .par_iter()
        .map(|restaurant| (restaurant, engine.value(&restaurant.input)))
        .collect();

    let mut records = Vec::with_capacity(outcomes.len());
    let mut rejected = Vec::new();

    for (restaurant, outcome) in outcomes {
        match outcome {
            Ok(result) => records.push(ValuationRecord {
                restaurant_id: restaurant.id.clone(),
                restaurant_name: restaurant.name.clone(),
                valuation_date,
                created_by: created_by.map(str::to_owned),
                input: restaurant.input,
                result,
            }),
            Err(err) => {
                log::warn!("Skipping restaurant {}: {}", restaurant.id, err);
                rejected.push(RejectedRestaurant {
                    restaurant_id: restaurant.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let total_valuation = records
        .iter()
        .fold(0.0, |acc, r| acc + r.result.final_valuation);
    let yearly_totals = aggregate_by_year(&records);

    log::info!(
        "Valued {} restaurants, rejected {}, total {:.2}",
        records.len(),
        rejected.len(),
        total_valuation
    );

    PortfolioValuation {
        records,
        rejected,
        total_valuation,
        yearly_totals,
    }
}

/// Sum projection rows across records by calendar year, ascending
pub fn aggregate_by_year(records: &[ValuationRecord]) -> Vec<YearlyTotal> {
    let mut by_year: BTreeMap<i32, YearlyTotal> = BTreeMap::new();

    for record in records {
        for row in &record.result.yearly_projections {
            let total = by_year.entry(row.year).or_insert_with(|| YearlyTotal {
                year: row.year,
                ..Default::default()
            });
            total.restaurants += 1;
            total.sales += row.sales;
            total.soi += row.soi;
            total.free_cash_flow += row.free_cash_flow;
            total.present_value += row.present_value;
        }
    }

    by_year.into_values().collect()
}
