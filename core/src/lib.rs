//! Wire contract for the car service and the remote client service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Whoever holds an HTTP stack
//! executes the round-trip: the car service does it with a pooled async
//! client, the tests do it with a blocking agent.
//!
//! # Design
//! - `CarApi` speaks to the car service (`/api/cars`), `ClientApi` to the
//!   client service (`/api/clients`). Both hold only a base URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - DTOs are shared by the car service and its callers; the mock client
//!   service keeps its own copy so integration tests catch schema drift.

pub mod cars;
pub mod clients;
pub mod error;
pub mod http;
pub mod types;

pub use cars::CarApi;
pub use clients::ClientApi;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Car, Client, NewCar};
