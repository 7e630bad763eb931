//! Attaches remote client data to cars at response time.
//!
//! Cars are processed one after another in input order, one lookup per car
//! that references a client. Repeated client ids are looked up again.

use car_core::Car;

use crate::resolver::ClientResolver;

pub async fn enrich(resolver: &dyn ClientResolver, mut car: Car) -> Car {
    car.client = match car.client_id {
        Some(client_id) => resolver.resolve(client_id).await,
        None => None,
    };
    car
}

pub async fn enrich_all(resolver: &dyn ClientResolver, cars: Vec<Car>) -> Vec<Car> {
    let mut enriched = Vec::with_capacity(cars.len());
    for car in cars {
        enriched.push(enrich(resolver, car).await);
    }
    enriched
}
