//! Domain DTOs shared by the car service and its callers.
//!
//! Field names go over the wire in camelCase (`clientId`), matching the
//! services these records are exchanged with.

use serde::{Deserialize, Serialize};

/// A car as returned by the car service.
///
/// `client` is filled in at response time from the client service and is
/// never persisted. It serializes as `null` when the car has no client or
/// the lookup failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub matricule: String,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub client: Option<Client>,
}

/// Request payload for creating a car.
///
/// Unknown fields (including `id` and `client`) are ignored on input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub matricule: String,
    #[serde(default)]
    pub client_id: Option<i64>,
}

/// A client record owned by the remote client service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
