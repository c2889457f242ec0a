//! Error type shared by the validation boundary, loaders and the HTTP handler

use thiserror::Error;

/// Errors raised at the edges of the valuation engine.
///
/// The projection itself never fails; these come from input validation
/// and from reading or writing restaurant files.
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("initialSales must not be negative (got {0})")]
    NegativeSales(f64),

    #[error("discountRate must be greater than -100 (got {0})")]
    DiscountRateOutOfRange(f64),

    #[error("yearsRemaining must be between 1 and {max} (got {years})")]
    YearsOutOfRange { years: u32, max: u32 },

    #[error("baseYear {base_year} with {years} projection years falls outside the supported calendar range")]
    BaseYearOutOfRange { base_year: i32, years: u32 },

    #[error("a base year or valuation date is required")]
    MissingBaseYear,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValuationError {
    /// True for errors caused by out-of-domain inputs rather than I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ValuationError::NonFinite { .. }
                | ValuationError::NegativeSales(_)
                | ValuationError::DiscountRateOutOfRange(_)
                | ValuationError::YearsOutOfRange { .. }
                | ValuationError::BaseYearOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ValuationError>;
