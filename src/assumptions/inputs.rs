//! Financial assumptions for a single restaurant valuation

use serde::{Deserialize, Serialize};

/// Assumptions entered for one restaurant.
///
/// Every percentage is a whole number (30.0 means 30%) and is divided by
/// 100 where it is applied. Field names serialize in camelCase so stored
/// valuations round-trip unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    /// Year-0 revenue base
    pub initial_sales: f64,

    /// Annual sales growth (%), compounded
    pub sales_growth_rate: f64,

    /// Annual inflation (%) applied to rent index and miscellaneous costs
    pub inflation_rate: f64,

    /// Annual discount rate (%) for present-value discounting
    pub discount_rate: f64,

    /// Number of projected years
    pub years_remaining: u32,

    /// PAC as a percentage of sales
    pub pac_percentage: f64,

    /// Rent as a percentage of sales
    pub rent_percentage: f64,

    /// Service fees as a percentage of sales
    pub service_fees_percentage: f64,

    /// Annual depreciation, held flat across years
    pub depreciation: f64,

    /// Annual interest, held flat across years
    pub interest: f64,

    /// Indexed rent base, inflated each year
    pub rent_index: f64,

    /// Miscellaneous fixed costs, inflated each year
    pub miscellaneous: f64,

    /// Net loan payment added into cash flow (negative for debt service)
    pub loan_payment: f64,
}

impl ValuationInput {
    /// Growth factor for a projection year: (1 + growth/100)^year
    pub fn growth_factor(&self, year: u32) -> f64 {
        (1.0 + self.sales_growth_rate / 100.0).powf(year as f64)
    }

    /// Inflation factor for a projection year: (1 + inflation/100)^year
    pub fn inflation_factor(&self, year: u32) -> f64 {
        (1.0 + self.inflation_rate / 100.0).powf(year as f64)
    }

    /// Every numeric field paired with its serialized name
    pub(crate) fn numeric_fields(&self) -> [(&'static str, f64); 12] {
        [
            ("initialSales", self.initial_sales),
            ("salesGrowthRate", self.sales_growth_rate),
            ("inflationRate", self.inflation_rate),
            ("discountRate", self.discount_rate),
            ("pacPercentage", self.pac_percentage),
            ("rentPercentage", self.rent_percentage),
            ("serviceFeesPercentage", self.service_fees_percentage),
            ("depreciation", self.depreciation),
            ("interest", self.interest),
            ("rentIndex", self.rent_index),
            ("miscellaneous", self.miscellaneous),
            ("loanPayment", self.loan_payment),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{
            "initialSales": 2500000,
            "salesGrowthRate": 3,
            "inflationRate": 2.5,
            "discountRate": 12,
            "yearsRemaining": 15,
            "pacPercentage": 58,
            "rentPercentage": 8.5,
            "serviceFeesPercentage": 4,
            "depreciation": 40000,
            "interest": 15000,
            "rentIndex": 12000,
            "miscellaneous": 20000,
            "loanPayment": -35000
        }"#;

        let input: ValuationInput = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(input.initial_sales, 2_500_000.0);
        assert_eq!(input.years_remaining, 15);
        assert_eq!(input.service_fees_percentage, 4.0);
        assert_eq!(input.loan_payment, -35_000.0);

        let back = serde_json::to_value(input).expect("Failed to serialize");
        assert!(back.get("rentIndex").is_some());
        assert!(back.get("rent_index").is_none());
    }

    #[test]
    fn test_factors_compound() {
        let input = ValuationInput {
            sales_growth_rate: 10.0,
            inflation_rate: 2.0,
            ..Default::default()
        };

        assert!((input.growth_factor(2) - 1.21).abs() < 1e-12);
        assert!((input.inflation_factor(3) - 1.02_f64.powi(3)).abs() < 1e-12);
        assert_eq!(input.growth_factor(0), 1.0);
    }
}
