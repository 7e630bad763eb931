//! Stateless request builder and response parser for the car service.
//!
//! `CarApi` holds only a `base_url`. Each operation is a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes the
//! `HttpResponse`; the caller performs the round-trip in between.

use crate::error::ApiError;
use crate::http::{check_status, decode, trim_base, HttpRequest, HttpResponse};
use crate::types::{Car, NewCar};

/// Client for the car service's `/api/cars` routes.
#[derive(Debug, Clone)]
pub struct CarApi {
    base_url: String,
}

impl CarApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }

    pub fn build_list_cars(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/cars", self.base_url))
    }

    pub fn build_get_car(&self, id: i64) -> HttpRequest {
        HttpRequest::get(format!("{}/api/cars/{id}", self.base_url))
    }

    pub fn build_create_car(&self, input: &NewCar) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::post_json(format!("{}/api/cars", self.base_url), body))
    }

    pub fn parse_list_cars(&self, response: HttpResponse) -> Result<Vec<Car>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_car(&self, response: HttpResponse) -> Result<Car, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// The car service answers a create with 200 and the stored record.
    pub fn parse_create_car(&self, response: HttpResponse) -> Result<Car, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }
}
