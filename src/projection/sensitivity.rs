//! Valuation sensitivity to discount rate and sales growth
//!
//! Discount rate does not change the undiscounted cash flows, so each growth
//! rate is projected once and re-discounted for every column.

use super::engine::{present_value, ValuationEngine};
use crate::assumptions::ValuationInput;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Valuations for every (growth rate, discount rate) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityGrid {
    /// Column headers (%)
    pub discount_rates: Vec<f64>,
    /// Row headers (%)
    pub growth_rates: Vec<f64>,
    /// `valuations[row][col]` for growth_rates[row], discount_rates[col]
    pub valuations: Vec<Vec<f64>>,
}

impl SensitivityGrid {
    pub fn get(&self, growth_idx: usize, discount_idx: usize) -> Option<f64> {
        self.valuations.get(growth_idx)?.get(discount_idx).copied()
    }

    /// Lowest and highest valuation in the grid
    pub fn range(&self) -> Option<(f64, f64)> {
        self.valuations
            .iter()
            .flatten()
            .copied()
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Re-discount one projection at several discount rates
pub fn discount_rate_sweep(
    engine: &ValuationEngine,
    input: &ValuationInput,
    discount_rates: &[f64],
) -> Vec<f64> {
    let base = engine.compute(input);
    discount_rates
        .iter()
        .map(|&rate| present_value(&base.projected_cash_flows, rate))
        .collect()
}

/// Build the full growth × discount grid, one row per growth rate
pub fn sensitivity_grid(
    engine: &ValuationEngine,
    input: &ValuationInput,
    discount_rates: &[f64],
    growth_rates: &[f64],
) -> SensitivityGrid {
    let valuations: Vec<Vec<f64>> = growth_rates
        .par_iter()
        .map(|&growth| {
            let shifted = ValuationInput {
                sales_growth_rate: growth,
                ..*input
            };
            discount_rate_sweep(engine, &shifted, discount_rates)
        })
        .collect();

    SensitivityGrid {
        discount_rates: discount_rates.to_vec(),
        growth_rates: growth_rates.to_vec(),
        valuations,
    }
}

/// Evenly spaced rates centred on `center`, e.g. 10 ± 2 in steps of 1
pub fn rates_around(center: f64, step: f64, steps_each_side: u32) -> Vec<f64> {
    let n = steps_each_side as i32;
    (-n..=n).map(|k| center + step * k as f64).collect()
}
