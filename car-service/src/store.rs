//! Record store for cars.
//!
//! The service only needs `save` / `find` semantics, so storage sits behind
//! `CarRepository`. `InMemoryCarRepository` is the default backend: ids are
//! assigned sequentially and `find_all` returns records ascending by id.
//!
//! The store holds `CarRecord`, which has no `client` field, so enrichment
//! data cannot leak into persistence.

use std::collections::BTreeMap;

use async_trait::async_trait;
use car_core::{Car, NewCar};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no car with id {0} to update")]
    UnknownId(i64),
    #[error("car id space exhausted")]
    IdsExhausted,
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Car>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, StoreError>;
    /// Insert when `id` is `None`, otherwise overwrite the record with that
    /// id. Returns the stored form with `client` unset.
    async fn save(&self, id: Option<i64>, car: NewCar) -> Result<Car, StoreError>;
}

/// Persisted shape of a car.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CarRecord {
    id: i64,
    brand: String,
    model: String,
    matricule: String,
    client_id: Option<i64>,
}

impl CarRecord {
    fn new(id: i64, car: NewCar) -> Self {
        Self {
            id,
            brand: car.brand,
            model: car.model,
            matricule: car.matricule,
            client_id: car.client_id,
        }
    }
}

impl From<&CarRecord> for Car {
    fn from(record: &CarRecord) -> Self {
        Car {
            id: record.id,
            brand: record.brand.clone(),
            model: record.model.clone(),
            matricule: record.matricule.clone(),
            client_id: record.client_id,
            client: None,
        }
    }
}

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, CarRecord>,
}

#[derive(Default)]
pub struct InMemoryCarRepository {
    table: RwLock<Table>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn find_all(&self) -> Result<Vec<Car>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().map(Car::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).map(Car::from))
    }

    async fn save(&self, id: Option<i64>, car: NewCar) -> Result<Car, StoreError> {
        let mut table = self.table.write().await;
        let id = match id {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(id) => return Err(StoreError::UnknownId(id)),
            None => {
                table.last_id = table.last_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
                table.last_id
            }
        };
        let record = CarRecord::new(id, car);
        let stored = Car::from(&record);
        table.rows.insert(id, record);
        Ok(stored)
    }
}
