//! Restaurant Valuation - discounted-cash-flow engine for franchise restaurants
//!
//! This library provides:
//! - Multi-year sales, cost and free cash flow projections per restaurant
//! - Present-value discounting into a single valuation figure
//! - Input validation at the caller edge
//! - Parallel portfolio valuation with what-if adjustments
//! - Discount rate / growth rate sensitivity tables

pub mod api;
pub mod assumptions;
pub mod error;
pub mod portfolio;
pub mod projection;
pub mod report;

// Re-export commonly used types
pub use assumptions::{ValuationInput, MAX_PROJECTION_YEARS};
pub use error::ValuationError;
pub use portfolio::{Restaurant, ValuationRecord, PortfolioValuation};
pub use projection::{ValuationEngine, ValuationConfig, ValuationResult, YearlyProjection};
