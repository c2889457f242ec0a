//! Yearly projection rows and valuation results

use serde::{Deserialize, Serialize};

/// Single year of a restaurant projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    /// Calendar year (base year for projection year 1)
    pub year: i32,

    pub sales: f64,
    pub pac: f64,
    pub rent: f64,
    pub service_fees: f64,

    // Inflated fixed costs for this year
    pub rent_index: f64,
    pub miscellaneous: f64,

    /// Rent + service fees + depreciation + interest + rent index + misc
    pub total_non_controllables: f64,

    /// Store operating income
    pub soi: f64,

    /// SOI plus loan payment
    pub cashflow: f64,

    /// Cashflow with depreciation added back
    pub free_cash_flow: f64,

    /// Free cash flow discounted to the valuation date
    pub present_value: f64,
}

/// Complete valuation for one restaurant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Sum of discounted free cash flows
    pub final_valuation: f64,

    /// Undiscounted free cash flow per year, index 0 = projection year 1
    pub projected_cash_flows: Vec<f64>,

    pub yearly_projections: Vec<YearlyProjection>,
}

impl ValuationResult {
    /// Number of projected years
    pub fn years(&self) -> usize {
        self.yearly_projections.len()
    }

    /// Undiscounted free cash flow over the whole horizon
    pub fn total_free_cash_flow(&self) -> f64 {
        self.projected_cash_flows.iter().fold(0.0, |acc, cf| acc + cf)
    }

    /// Projection row for a calendar year
    pub fn for_year(&self, year: i32) -> Option<&YearlyProjection> {
        self.yearly_projections.iter().find(|row| row.year == year)
    }

    /// Last projected calendar year
    pub fn final_year(&self) -> Option<i32> {
        self.yearly_projections.last().map(|row| row.year)
    }
}
