//! JSON request handling for the HTTP valuation endpoint
//!
//! Kept free of any Lambda types so the status mapping is testable.

use crate::assumptions::ValuationInput;
use crate::error::ValuationError;
use crate::portfolio::ValuationRecord;
use crate::projection::{ValuationConfig, ValuationEngine};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of a valuation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub valuation_date: Option<NaiveDate>,
    /// Takes precedence over the valuation date's year
    #[serde(default)]
    pub base_year: Option<i32>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub input: ValuationInput,
}

impl ValuationRequest {
    pub fn config(&self) -> Result<ValuationConfig, ValuationError> {
        match (self.base_year, self.valuation_date) {
            (Some(year), _) => Ok(ValuationConfig::new(year)),
            (None, Some(date)) => Ok(ValuationConfig::from_valuation_date(date)),
            (None, None) => Err(ValuationError::MissingBaseYear),
        }
    }
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(err) => Self::error(500, &err.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }
}

/// Parse, validate and value a request body
pub fn handle_request(body: &[u8]) -> ApiResponse {
    let request: ValuationRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => return ApiResponse::error(400, &format!("invalid request: {}", err)),
    };

    let config = match request.config() {
        Ok(config) => config,
        Err(err) => return ApiResponse::error(400, &err.to_string()),
    };

    let engine = ValuationEngine::new(config);
    let result = match engine.value(&request.input) {
        Ok(result) => result,
        Err(err) if err.is_validation() => return ApiResponse::error(422, &err.to_string()),
        Err(err) => return ApiResponse::error(500, &err.to_string()),
    };

    match request.restaurant_id {
        Some(restaurant_id) => {
            let valuation_date = request
                .valuation_date
                .or_else(|| NaiveDate::from_ymd_opt(config.base_year, 1, 1));
            match valuation_date {
                Some(valuation_date) => ApiResponse::json(
                    200,
                    &ValuationRecord {
                        restaurant_id,
                        restaurant_name: None,
                        valuation_date,
                        created_by: request.created_by,
                        input: request.input,
                        result,
                    },
                ),
                None => ApiResponse::error(400, "baseYear is outside the supported date range"),
            }
        }
        None => ApiResponse::json(200, &result),
    }
}
