//! Request builder and response parser for the remote client service.

use crate::error::ApiError;
use crate::http::{check_status, decode, trim_base, HttpRequest, HttpResponse};
use crate::types::Client;

/// Client for `GET /api/clients/{id}` on the client service.
#[derive(Debug, Clone)]
pub struct ClientApi {
    base_url: String,
}

impl ClientApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }

    pub fn build_get_client(&self, id: i64) -> HttpRequest {
        HttpRequest::get(format!("{}/api/clients/{id}", self.base_url))
    }

    pub fn parse_get_client(&self, response: HttpResponse) -> Result<Client, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }
}
