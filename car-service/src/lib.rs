//! Car service: stores cars and enriches them with client data on read.
//!
//! # Overview
//! `GET /api/cars` and `GET /api/cars/{id}` load cars from the
//! [`store::CarRepository`] and pass each one through [`enrich`], which asks
//! the [`resolver::ClientResolver`] for the referenced client.
//! `POST /api/cars` validates and stores a car and returns it unenriched.
//!
//! # Design
//! - Storage and remote lookup are trait objects in [`AppState`], so tests
//!   swap either side without a network.
//! - Lookup failures degrade to `client: null` and a log line; a missing car
//!   is an explicit 404.

pub mod config;
pub mod enrich;
pub mod error;
pub mod locator;
pub mod resolver;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use config::Config;
use locator::{StaticLocator, CLIENT_SERVICE};
use resolver::{ClientResolver, HttpClientResolver};
use store::{CarRepository, InMemoryCarRepository};

pub use error::ServiceError;

#[derive(Clone)]
pub struct AppState {
    pub cars: Arc<dyn CarRepository>,
    pub clients: Arc<dyn ClientResolver>,
}

impl AppState {
    pub fn new(cars: Arc<dyn CarRepository>, clients: Arc<dyn ClientResolver>) -> Self {
        Self { cars, clients }
    }

    /// Empty in-memory store plus an HTTP resolver pointed at the configured
    /// client service.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let locator = StaticLocator::new().with(CLIENT_SERVICE, &config.client_service_url);
        let resolver = HttpClientResolver::new(config.http_client()?, Arc::new(locator));
        Ok(Self::new(
            Arc::new(InMemoryCarRepository::new()),
            Arc::new(resolver),
        ))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/cars", get(routes::list_cars).post(routes::create_car))
        .route("/api/cars/{id}", get(routes::get_car))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
