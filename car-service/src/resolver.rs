//! Remote client lookup.
//!
//! `HttpClientResolver` asks the locator for the client service's address,
//! builds the request with `car_core::ClientApi`, and executes it on a
//! shared, pooled `reqwest::Client`. Lookups are never retried or cached.
//! A failed lookup yields `None` and is logged; it never fails the caller.

use std::sync::Arc;

use async_trait::async_trait;
use car_core::{ApiError, Client, ClientApi, HttpMethod, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::locator::{ServiceLocator, CLIENT_SERVICE};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no address registered for service {0}")]
    UnknownService(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("client service requests are GET only, got {0:?}")]
    UnsupportedMethod(HttpMethod),
}

#[async_trait]
pub trait ClientResolver: Send + Sync {
    async fn resolve(&self, client_id: i64) -> Option<Client>;
}

#[derive(Clone)]
pub struct HttpClientResolver {
    http: reqwest::Client,
    locator: Arc<dyn ServiceLocator>,
}

impl HttpClientResolver {
    pub fn new(http: reqwest::Client, locator: Arc<dyn ServiceLocator>) -> Self {
        Self { http, locator }
    }

    /// Fetch one client, surfacing every failure.
    pub async fn fetch(&self, client_id: i64) -> Result<Client, ResolveError> {
        let base_url = self
            .locator
            .locate(CLIENT_SERVICE)
            .ok_or_else(|| ResolveError::UnknownService(CLIENT_SERVICE.to_string()))?;
        let api = ClientApi::new(&base_url);
        let response = self.execute(api.build_get_client(client_id)).await?;
        Ok(api.parse_get_client(response)?)
    }

    /// Runs a request built by `ClientApi`, which only ever builds bodiless
    /// GETs.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ResolveError> {
        if request.method != HttpMethod::Get {
            return Err(ResolveError::UnsupportedMethod(request.method));
        }
        let mut builder = self.http.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl ClientResolver for HttpClientResolver {
    async fn resolve(&self, client_id: i64) -> Option<Client> {
        match self.fetch(client_id).await {
            Ok(client) => Some(client),
            Err(ResolveError::Api(ApiError::NotFound)) => {
                tracing::debug!(client_id, "client not found on client service");
                None
            }
            Err(err) => {
                tracing::warn!(client_id, error = %err, "client lookup failed");
                None
            }
        }
    }
}
