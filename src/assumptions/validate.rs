//! Validation boundary for caller-supplied assumptions
//!
//! The projection accepts anything and lets NaN propagate; callers that take
//! input from users or files run it through `validate` first.

use super::ValuationInput;
use crate::error::{Result, ValuationError};

/// Longest projection accepted at the validation boundary
pub const MAX_PROJECTION_YEARS: u32 = 100;

impl ValuationInput {
    /// Reject non-finite and out-of-domain assumptions
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ValuationError::NonFinite { field });
            }
        }

        if self.initial_sales < 0.0 {
            return Err(ValuationError::NegativeSales(self.initial_sales));
        }

        // (1 + r/100) must stay positive for discounting
        if self.discount_rate <= -100.0 {
            return Err(ValuationError::DiscountRateOutOfRange(self.discount_rate));
        }

        if self.years_remaining == 0 || self.years_remaining > MAX_PROJECTION_YEARS {
            return Err(ValuationError::YearsOutOfRange {
                years: self.years_remaining,
                max: MAX_PROJECTION_YEARS,
            });
        }

        Ok(())
    }
}
