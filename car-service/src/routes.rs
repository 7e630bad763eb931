//! HTTP handlers for `/api/cars`.

use axum::{
    extract::{Path, State},
    Json,
};
use car_core::{Car, NewCar};
use serde_json::{json, Value};

use crate::enrich::{enrich, enrich_all};
use crate::error::ServiceError;
use crate::AppState;

pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, ServiceError> {
    let cars = state.cars.find_all().await?;
    Ok(Json(enrich_all(state.clients.as_ref(), cars).await))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Car>, ServiceError> {
    let car = state
        .cars
        .find_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;
    Ok(Json(enrich(state.clients.as_ref(), car).await))
}

/// Stores the payload and returns it unenriched.
pub async fn create_car(
    State(state): State<AppState>,
    Json(input): Json<NewCar>,
) -> Result<Json<Car>, ServiceError> {
    validate(&input)?;
    let car = state.cars.save(None, input).await?;
    tracing::info!(id = car.id, client_id = ?car.client_id, "car created");
    Ok(Json(car))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn validate(car: &NewCar) -> Result<(), ServiceError> {
    let required = [
        ("brand", &car.brand),
        ("model", &car.model),
        ("matricule", &car.matricule),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} must not be blank")));
        }
    }
    match car.client_id {
        Some(id) if id <= 0 => Err(ServiceError::Validation(format!(
            "clientId must be positive, got {id}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_car() -> NewCar {
        NewCar {
            brand: "Renault".to_string(),
            model: "Clio".to_string(),
            matricule: "AB-123-CD".to_string(),
            client_id: Some(1),
        }
    }

    #[test]
    fn complete_payload_is_valid() {
        assert!(validate(&new_car()).is_ok());
        assert!(validate(&NewCar { client_id: None, ..new_car() }).is_ok());
    }

    #[test]
    fn blank_field_is_named() {
        let err = validate(&NewCar {
            model: "   ".to_string(),
            ..new_car()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid car: model must not be blank");
    }

    #[test]
    fn non_positive_client_id_is_rejected() {
        let err = validate(&NewCar {
            client_id: Some(0),
            ..new_car()
        })
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
