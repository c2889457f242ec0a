//! Discounted-cash-flow projection engine
//!
//! Each projected year grows sales, applies percentage-of-sales costs,
//! inflates the indexed fixed costs, and derives store operating income and
//! free cash flow. Free cash flows are then discounted back year by year.

use super::cashflows::{ValuationResult, YearlyProjection};
use crate::assumptions::ValuationInput;
use crate::error::{Result, ValuationError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationConfig {
    /// Calendar year labelled on projection year 1
    pub base_year: i32,
}

impl ValuationConfig {
    pub fn new(base_year: i32) -> Self {
        Self { base_year }
    }

    /// Anchor projection year 1 on the calendar year of the valuation date
    pub fn from_valuation_date(date: NaiveDate) -> Self {
        Self { base_year: date.year() }
    }

    /// Every projected year must be a representable calendar date
    pub fn check_horizon(&self, years: u32) -> Result<()> {
        let last_year = i32::try_from(years.saturating_sub(1))
            .ok()
            .and_then(|offset| self.base_year.checked_add(offset));

        match last_year {
            Some(last) if self.base_year >= NaiveDate::MIN.year() && last <= NaiveDate::MAX.year() => Ok(()),
            _ => Err(ValuationError::BaseYearOutOfRange {
                base_year: self.base_year,
                years,
            }),
        }
    }
}

/// Discount factor for a projection year: (1 + rate/100)^year
pub fn discount_factor(discount_rate: f64, year: u32) -> f64 {
    (1.0 + discount_rate / 100.0).powf(year as f64)
}

/// Present value of yearly cash flows; index 0 is discounted one full year
pub fn present_value(cash_flows: &[f64], discount_rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, cf)| acc + cf / discount_factor(discount_rate, i as u32 + 1))
}

/// Stateless valuation engine; safe to share across threads
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Validate the assumptions, then project them
    pub fn value(&self, input: &ValuationInput) -> Result<ValuationResult> {
        input.validate()?;
        self.config.check_horizon(input.years_remaining)?;
        Ok(self.compute(input))
    }

    /// Project and discount without validating.
    ///
    /// Zero years yields an empty result valued at 0. Non-finite inputs
    /// propagate into the output.
    pub fn compute(&self, input: &ValuationInput) -> ValuationResult {
        let years = input.years_remaining as usize;
        let mut projected_cash_flows = Vec::with_capacity(years);
        let mut yearly_projections = Vec::with_capacity(years);

        for year in 1..=input.years_remaining {
            let row = self.project_year(input, year);
            projected_cash_flows.push(row.free_cash_flow);
            yearly_projections.push(row);
        }

        let final_valuation = present_value(&projected_cash_flows, input.discount_rate);

        log::debug!(
            "Valued {} years from base year {}: {:.2}",
            years,
            self.config.base_year,
            final_valuation
        );

        ValuationResult {
            final_valuation,
            projected_cash_flows,
            yearly_projections,
        }
    }

    /// Single projection year (1-indexed)
    fn project_year(&self, input: &ValuationInput, year: u32) -> YearlyProjection {
        let sales = input.initial_sales * input.growth_factor(year);

        // Variable costs scale with sales
        let pac = sales * input.pac_percentage / 100.0;
        let rent = sales * input.rent_percentage / 100.0;
        let service_fees = sales * input.service_fees_percentage / 100.0;

        // Depreciation and interest stay flat; only these two inflate
        let inflation_factor = input.inflation_factor(year);
        let rent_index = input.rent_index * inflation_factor;
        let miscellaneous = input.miscellaneous * inflation_factor;

        let total_non_controllables = rent
            + service_fees
            + input.depreciation
            + input.interest
            + rent_index
            + miscellaneous;

        let soi = sales - pac - total_non_controllables;
        let cashflow = soi + input.loan_payment;
        let free_cash_flow = cashflow + input.depreciation;
        let present_value = free_cash_flow / discount_factor(input.discount_rate, year);

        YearlyProjection {
            year: self.config.base_year.saturating_add(year as i32 - 1),
            sales,
            pac,
            rent,
            service_fees,
            rent_index,
            miscellaneous,
            total_non_controllables,
            soi,
            cashflow,
            free_cash_flow,
            present_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> ValuationEngine {
        ValuationEngine::new(ValuationConfig::new(2024))
    }

    /// $1M store, no growth or inflation, 10% discount, 30/10/5 cost split
    fn flat_store(years: u32) -> ValuationInput {
        ValuationInput {
            initial_sales: 1_000_000.0,
            discount_rate: 10.0,
            years_remaining: years,
            pac_percentage: 30.0,
            rent_percentage: 10.0,
            service_fees_percentage: 5.0,
            ..Default::default()
        }
    }

    fn typical_store() -> ValuationInput {
        ValuationInput {
            initial_sales: 2_600_000.0,
            sales_growth_rate: 3.0,
            inflation_rate: 2.5,
            discount_rate: 11.0,
            years_remaining: 10,
            pac_percentage: 58.0,
            rent_percentage: 8.5,
            service_fees_percentage: 4.0,
            depreciation: 45_000.0,
            interest: 12_000.0,
            rent_index: 18_000.0,
            miscellaneous: 22_000.0,
            loan_payment: -40_000.0,
        }
    }

    #[test]
    fn test_zero_years() {
        let result = engine().compute(&flat_store(0));

        assert!(result.projected_cash_flows.is_empty());
        assert!(result.yearly_projections.is_empty());
        assert_eq!(result.final_valuation, 0.0);
    }

    #[test]
    fn test_lengths_match_years() {
        for years in [1, 2, 7, 25] {
            let result = engine().compute(&ValuationInput {
                years_remaining: years,
                ..typical_store()
            });
            assert_eq!(result.projected_cash_flows.len(), years as usize);
            assert_eq!(result.yearly_projections.len(), years as usize);
        }
    }

    #[test]
    fn test_flat_two_year_scenario() {
        let result = engine().compute(&flat_store(2));

        for row in &result.yearly_projections {
            assert_relative_eq!(row.sales, 1_000_000.0);
            assert_relative_eq!(row.pac, 300_000.0);
            assert_relative_eq!(row.rent, 100_000.0);
            assert_relative_eq!(row.service_fees, 50_000.0);
            assert_relative_eq!(row.soi, 550_000.0);
            assert_relative_eq!(row.cashflow, 550_000.0);
            assert_relative_eq!(row.free_cash_flow, 550_000.0);
        }

        assert_eq!(result.yearly_projections[0].year, 2024);
        assert_eq!(result.yearly_projections[1].year, 2025);

        let expected = 550_000.0 / 1.1 + 550_000.0 / 1.21;
        assert_relative_eq!(result.final_valuation, expected, epsilon = 1e-6);
        assert!((result.final_valuation - 954_545.4545).abs() < 0.01);
    }

    #[test]
    fn test_single_year_growth() {
        let input = ValuationInput {
            initial_sales: 100.0,
            sales_growth_rate: 10.0,
            years_remaining: 1,
            ..Default::default()
        };
        let result = engine().compute(&input);

        assert_relative_eq!(result.yearly_projections[0].sales, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_compounds() {
        let input = ValuationInput {
            initial_sales: 100.0,
            sales_growth_rate: 10.0,
            years_remaining: 3,
            ..Default::default()
        };
        let result = engine().compute(&input);

        // 100 * 1.1^3, not 100 * (1 + 3 * 0.1)
        assert_relative_eq!(result.yearly_projections[2].sales, 133.1, epsilon = 1e-9);
    }

    #[test]
    fn test_higher_growth_raises_sales_every_year() {
        let base = typical_store();
        let faster = ValuationInput { sales_growth_rate: 4.0, ..base };

        let slow = engine().compute(&base);
        let fast = engine().compute(&faster);

        for (s, f) in slow.yearly_projections.iter().zip(&fast.yearly_projections) {
            assert!(f.sales > s.sales, "year {}: {} <= {}", s.year, f.sales, s.sales);
        }
    }

    #[test]
    fn test_zero_discount_is_plain_sum() {
        let input = ValuationInput { discount_rate: 0.0, ..typical_store() };
        let result = engine().compute(&input);

        let sum = result.projected_cash_flows.iter().fold(0.0, |acc, cf| acc + cf);
        assert_eq!(result.final_valuation, sum);
        assert_eq!(result.final_valuation, result.total_free_cash_flow());
    }

    #[test]
    fn test_fixed_cost_inflation_asymmetry() {
        let input = ValuationInput {
            initial_sales: 0.0,
            inflation_rate: 5.0,
            years_remaining: 4,
            depreciation: 10_000.0,
            interest: 3_000.0,
            rent_index: 8_000.0,
            miscellaneous: 2_000.0,
            ..Default::default()
        };
        let result = engine().compute(&input);

        for (i, row) in result.yearly_projections.iter().enumerate() {
            let factor = 1.05_f64.powi(i as i32 + 1);
            assert_relative_eq!(row.rent_index, 8_000.0 * factor, epsilon = 1e-9);
            assert_relative_eq!(row.miscellaneous, 2_000.0 * factor, epsilon = 1e-9);

            // Depreciation and interest enter unscaled
            let flat = row.total_non_controllables - row.rent_index - row.miscellaneous;
            assert_relative_eq!(flat, 13_000.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_depreciation_added_back() {
        let input = ValuationInput { depreciation: 50_000.0, ..flat_store(1) };
        let row = engine().compute(&input).yearly_projections[0];

        assert_relative_eq!(row.soi, 500_000.0);
        assert_relative_eq!(row.cashflow, 500_000.0);
        assert_relative_eq!(row.free_cash_flow, 550_000.0);
    }

    #[test]
    fn test_negative_loan_payment_reduces_cash() {
        let without = engine().compute(&typical_store_with_loan(0.0));
        let with = engine().compute(&typical_store_with_loan(-35_000.0));

        for (a, b) in without.yearly_projections.iter().zip(&with.yearly_projections) {
            assert_relative_eq!(a.soi, b.soi);
            assert_relative_eq!(a.cashflow - b.cashflow, 35_000.0, epsilon = 1e-6);
            assert_relative_eq!(a.free_cash_flow - b.free_cash_flow, 35_000.0, epsilon = 1e-6);
        }
        assert!(with.final_valuation < without.final_valuation);
    }

    fn typical_store_with_loan(loan_payment: f64) -> ValuationInput {
        ValuationInput { loan_payment, ..typical_store() }
    }

    #[test]
    fn test_row_present_values_sum_to_valuation() {
        let result = engine().compute(&typical_store());
        let pv_sum: f64 = result.yearly_projections.iter().map(|r| r.present_value).sum();

        assert_relative_eq!(pv_sum, result.final_valuation, max_relative = 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        let input = ValuationInput { inflation_rate: f64::NAN, ..typical_store() };
        let result = engine().compute(&input);

        assert_eq!(result.yearly_projections.len(), 10);
        assert!(result.final_valuation.is_nan());
    }

    #[test]
    fn test_value_validates_first() {
        let bad = ValuationInput { discount_rate: -100.0, ..typical_store() };
        assert!(engine().value(&bad).is_err());

        let good = engine().value(&typical_store()).expect("valid input");
        assert_eq!(good, engine().compute(&typical_store()));
    }

    #[test]
    fn test_compute_leaves_input_untouched() {
        let input = typical_store();
        let copy = input;
        let _ = engine().compute(&input);
        assert_eq!(input, copy);
    }

    #[test]
    fn test_base_year_from_valuation_date() {
        let date = NaiveDate::from_ymd_opt(2031, 9, 30).expect("valid date");
        let engine = ValuationEngine::new(ValuationConfig::from_valuation_date(date));
        let result = engine.compute(&flat_store(3));

        let years: Vec<i32> = result.yearly_projections.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2031, 2032, 2033]);
        assert_eq!(result.final_year(), Some(2033));
        assert!(result.for_year(2032).is_some());
    }

    #[test]
    fn test_base_year_outside_calendar_rejected() {
        let engine = ValuationEngine::new(ValuationConfig::new(i32::MAX));
        assert!(matches!(
            engine.value(&flat_store(2)),
            Err(ValuationError::BaseYearOutOfRange { base_year: i32::MAX, years: 2 })
        ));

        // Last projected year must also fit
        let edge = ValuationEngine::new(ValuationConfig::new(NaiveDate::MAX.year()));
        assert!(edge.value(&flat_store(1)).is_ok());
        assert!(edge.value(&flat_store(2)).is_err());

        let too_early = ValuationEngine::new(ValuationConfig::new(NaiveDate::MIN.year() - 1));
        assert!(too_early.value(&flat_store(1)).is_err());
    }

    #[test]
    fn test_compute_saturates_extreme_base_year() {
        let engine = ValuationEngine::new(ValuationConfig::new(i32::MAX));
        let result = engine.compute(&flat_store(3));

        assert_eq!(result.yearly_projections.len(), 3);
        assert!(result.yearly_projections.iter().all(|r| r.year == i32::MAX));
    }

    #[test]
    fn test_long_horizon_matches_float_power() {
        let input = ValuationInput {
            initial_sales: 1_000.0,
            sales_growth_rate: 7.0,
            discount_rate: 9.0,
            years_remaining: 60,
            ..Default::default()
        };
        let result = engine().compute(&input);
        let last = result.yearly_projections[59];

        assert_eq!(last.sales, 1_000.0 * (1.0 + 7.0 / 100.0_f64).powf(60.0));
        assert_eq!(discount_factor(9.0, 60), (1.0 + 9.0 / 100.0_f64).powf(60.0));
    }

    #[test]
    fn test_present_value_helper() {
        assert_eq!(present_value(&[], 10.0), 0.0);
        assert_relative_eq!(present_value(&[110.0, 121.0], 10.0), 200.0, epsilon = 1e-9);
        assert_relative_eq!(discount_factor(10.0, 2), 1.21, epsilon = 1e-12);
    }
}
