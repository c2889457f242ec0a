//! Load restaurant assumptions from CSV
//!
//! Expected header:
//! `restaurant_id,name,initial_sales,sales_growth_rate,inflation_rate,discount_rate,
//! years_remaining,pac_percentage,rent_percentage,service_fees_percentage,
//! depreciation,interest,rent_index,miscellaneous,loan_payment`

use super::ValuationInput;
use crate::error::Result;
use crate::portfolio::Restaurant;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One CSV row, flat so the csv crate can map headers directly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantRow {
    pub restaurant_id: String,
    pub name: Option<String>,
    pub initial_sales: f64,
    pub sales_growth_rate: f64,
    pub inflation_rate: f64,
    pub discount_rate: f64,
    pub years_remaining: u32,
    pub pac_percentage: f64,
    pub rent_percentage: f64,
    pub service_fees_percentage: f64,
    pub depreciation: f64,
    pub interest: f64,
    pub rent_index: f64,
    pub miscellaneous: f64,
    pub loan_payment: f64,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Restaurant {
            id: row.restaurant_id,
            name: row.name.filter(|n| !n.trim().is_empty()),
            input: ValuationInput {
                initial_sales: row.initial_sales,
                sales_growth_rate: row.sales_growth_rate,
                inflation_rate: row.inflation_rate,
                discount_rate: row.discount_rate,
                years_remaining: row.years_remaining,
                pac_percentage: row.pac_percentage,
                rent_percentage: row.rent_percentage,
                service_fees_percentage: row.service_fees_percentage,
                depreciation: row.depreciation,
                interest: row.interest,
                rent_index: row.rent_index,
                miscellaneous: row.miscellaneous,
                loan_payment: row.loan_payment,
            },
        }
    }
}

/// Load restaurants from a CSV file
pub fn load_restaurants<P: AsRef<Path>>(path: P) -> Result<Vec<Restaurant>> {
    let path = path.as_ref();
    log::debug!("Loading restaurants from {}", path.display());
    let file = File::open(path)?;
    load_restaurants_from_reader(file)
}

/// Load restaurants from any reader producing CSV
pub fn load_restaurants_from_reader<R: Read>(reader: R) -> Result<Vec<Restaurant>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut restaurants = Vec::new();
    for row in rdr.deserialize::<RestaurantRow>() {
        restaurants.push(Restaurant::from(row?));
    }

    log::debug!("Loaded {} restaurants", restaurants.len());
    Ok(restaurants)
}
