//! What-if adjustments applied uniformly across a portfolio
//!
//! Shifts are in percentage points on the whole-number rate fields
//! (a growth_shift of 1.0 turns 3% growth into 4%).

use super::Restaurant;
use serde::{Deserialize, Serialize};

/// Parameters for adjusting every restaurant's assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentParams {
    /// Multiplier on initial sales (1.0 = no change)
    #[serde(default = "default_one")]
    pub sales_multiplier: f64,

    /// Percentage points added to the sales growth rate
    #[serde(default)]
    pub growth_shift: f64,

    /// Percentage points added to the inflation rate
    #[serde(default)]
    pub inflation_shift: f64,

    /// Percentage points added to the discount rate
    #[serde(default)]
    pub discount_shift: f64,

    /// Replace every restaurant's remaining years
    #[serde(default)]
    pub years_override: Option<u32>,

    /// Multiplier on the loan payment (0.0 drops debt service entirely)
    #[serde(default = "default_one")]
    pub loan_payment_multiplier: f64,
}

fn default_one() -> f64 { 1.0 }

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            sales_multiplier: 1.0,
            growth_shift: 0.0,
            inflation_shift: 0.0,
            discount_shift: 0.0,
            years_override: None,
            loan_payment_multiplier: 1.0,
        }
    }
}

impl AdjustmentParams {
    /// True when applying these parameters changes nothing
    pub fn is_identity(&self) -> bool {
        (self.sales_multiplier - 1.0).abs() < 1e-12 &&
        self.growth_shift.abs() < 1e-12 &&
        self.inflation_shift.abs() < 1e-12 &&
        self.discount_shift.abs() < 1e-12 &&
        self.years_override.is_none() &&
        (self.loan_payment_multiplier - 1.0).abs() < 1e-12
    }
}

/// Return adjusted copies of the restaurants
pub fn apply_adjustments(restaurants: &[Restaurant], params: &AdjustmentParams) -> Vec<Restaurant> {
    if params.is_identity() {
        return restaurants.to_vec();
    }

    log::debug!("Applying adjustments {:?} to {} restaurants", params, restaurants.len());

    restaurants
        .iter()
        .map(|restaurant| {
            let mut adjusted = restaurant.clone();
            let input = &mut adjusted.input;

            input.initial_sales *= params.sales_multiplier;
            input.sales_growth_rate += params.growth_shift;
            input.inflation_rate += params.inflation_shift;
            input.discount_rate += params.discount_shift;
            input.loan_payment *= params.loan_payment_multiplier;

            if let Some(years) = params.years_override {
                input.years_remaining = years;
            }

            adjusted
        })
        .collect()
}
