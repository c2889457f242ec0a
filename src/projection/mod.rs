//! Projection engine for single-restaurant valuations

mod engine;
mod cashflows;
pub mod sensitivity;

pub use engine::{ValuationEngine, ValuationConfig, discount_factor, present_value};
pub use cashflows::{YearlyProjection, ValuationResult};
pub use sensitivity::{SensitivityGrid, sensitivity_grid, discount_rate_sweep, rates_around};
