//! HashMap-backed engine and car stores for tests and local development.
//!
//! They mirror the PostgreSQL repositories: ids are parsed first, missing
//! rows are `NotFound`, a car may only reference an engine that exists, and
//! an engine still referenced by a car cannot be deleted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{parse_id, CarStore, EngineStore, StoreError};
use crate::models::{Car, CarRequest, Engine, EngineRequest};

type Table<T> = Arc<RwLock<HashMap<Uuid, T>>>;

fn read<T>(table: &Table<T>) -> Result<RwLockReadGuard<'_, HashMap<Uuid, T>>, StoreError> {
    table
        .read()
        .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
}

fn write<T>(table: &Table<T>) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, T>>, StoreError> {
    table
        .write()
        .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
}

/// Clone-friendly via Arc; clones share the same rows. The car table lives
/// here too so that deletes can see which engines are still in use.
#[derive(Clone, Default)]
pub struct InMemoryEngineStore {
    engines: Table<Engine>,
    cars: Table<Car>,
}

impl InMemoryEngineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        read(&self.engines).map(|engines| engines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &Uuid) -> Result<bool, StoreError> {
        Ok(read(&self.engines)?.contains_key(id))
    }

    fn find(&self, id: &Uuid) -> Result<Option<Engine>, StoreError> {
        Ok(read(&self.engines)?.get(id).cloned())
    }
}

#[async_trait]
impl EngineStore for InMemoryEngineStore {
    async fn get_by_id(&self, id: &str) -> Result<Engine, StoreError> {
        let engine_id = parse_id("engine", id)?;
        self.find(&engine_id)?
            .ok_or_else(|| StoreError::not_found("engine", id))
    }

    async fn create(&self, request: &EngineRequest) -> Result<Engine, StoreError> {
        let engine = Engine::new(request);
        write(&self.engines)?.insert(engine.id, engine.clone());
        Ok(engine)
    }

    async fn update(&self, id: &str, request: &EngineRequest) -> Result<Engine, StoreError> {
        let engine_id = parse_id("engine", id)?;
        let mut engines = write(&self.engines)?;
        let engine = engines
            .get_mut(&engine_id)
            .ok_or_else(|| StoreError::not_found("engine", id))?;

        engine.displacement = request.displacement;
        engine.no_of_cylinders = request.no_of_cylinders;
        engine.car_range = request.car_range;
        engine.updated_at = Some(Utc::now());
        Ok(engine.clone())
    }

    async fn delete(&self, id: &str) -> Result<Engine, StoreError> {
        let engine_id = parse_id("engine", id)?;
        let cars = read(&self.cars)?;
        let mut engines = write(&self.engines)?;
        if !engines.contains_key(&engine_id) {
            return Err(StoreError::not_found("engine", id));
        }
        if let Some(car) = cars.values().find(|car| car.engine.id == engine_id) {
            return Err(StoreError::ReferenceViolation(format!(
                "engine {} is still referenced by car {}",
                engine_id, car.id
            )));
        }
        engines
            .remove(&engine_id)
            .ok_or_else(|| StoreError::not_found("engine", id))
    }
}

/// Car rows keep only the engine id; reads join against the engine store.
#[derive(Clone, Default)]
pub struct InMemoryCarStore {
    cars: Table<Car>,
    engines: InMemoryEngineStore,
}

impl InMemoryCarStore {
    pub fn new(engines: InMemoryEngineStore) -> Self {
        Self {
            cars: Arc::clone(&engines.cars),
            engines,
        }
    }

    pub fn len(&self) -> usize {
        read(&self.cars).map(|cars| cars.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_engine_exists(&self, engine_id: &Uuid) -> Result<(), StoreError> {
        if self.engines.contains(engine_id)? {
            Ok(())
        } else {
            Err(StoreError::ReferenceViolation(format!(
                "engine {} referenced by car does not exist",
                engine_id
            )))
        }
    }

    fn with_engine(&self, mut car: Car, include_engine: bool) -> Result<Car, StoreError> {
        let engine_id = car.engine.id;
        car.engine = match self.engines.find(&engine_id)? {
            Some(engine) if include_engine => engine,
            _ => Engine::reference(engine_id),
        };
        Ok(car)
    }
}

#[async_trait]
impl CarStore for InMemoryCarStore {
    async fn get_by_id(&self, id: &str) -> Result<Car, StoreError> {
        let car_id = parse_id("car", id)?;
        let car = read(&self.cars)?
            .get(&car_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("car", id))?;
        self.with_engine(car, true)
    }

    async fn get_by_brand(
        &self,
        brand: &str,
        include_engine: bool,
    ) -> Result<Vec<Car>, StoreError> {
        let mut matching: Vec<Car> = read(&self.cars)?
            .values()
            .filter(|car| car.brand == brand)
            .cloned()
            .collect();
        matching.sort_by_key(|car| (car.created_at, car.id));

        matching
            .into_iter()
            .map(|car| self.with_engine(car, include_engine))
            .collect()
    }

    async fn create(&self, request: &CarRequest) -> Result<Car, StoreError> {
        self.ensure_engine_exists(&request.engine.id)?;
        let car = Car::new(request);
        write(&self.cars)?.insert(car.id, car.clone());
        Ok(car)
    }

    async fn update(&self, id: &str, request: &CarRequest) -> Result<Car, StoreError> {
        let car_id = parse_id("car", id)?;
        if !read(&self.cars)?.contains_key(&car_id) {
            return Err(StoreError::not_found("car", id));
        }
        self.ensure_engine_exists(&request.engine.id)?;

        let updated = {
            let mut cars = write(&self.cars)?;
            let car = cars
                .get_mut(&car_id)
                .ok_or_else(|| StoreError::not_found("car", id))?;

            car.name = request.name.clone();
            car.year = request.year.clone();
            car.fuel_type = request.fuel_type.clone();
            car.brand = request.brand.clone();
            car.price = request.price;
            car.engine = Engine::reference(request.engine.id);
            car.updated_at = Some(Utc::now());
            car.clone()
        };
        self.with_engine(updated, true)
    }

    async fn delete(&self, id: &str) -> Result<Car, StoreError> {
        let car_id = parse_id("car", id)?;
        let car = write(&self.cars)?
            .remove(&car_id)
            .ok_or_else(|| StoreError::not_found("car", id))?;
        self.with_engine(car, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_request() -> EngineRequest {
        EngineRequest {
            displacement: 100,
            no_of_cylinders: 4,
            car_range: 400,
        }
    }

    fn car_request(engine: Engine, brand: &str) -> CarRequest {
        CarRequest {
            name: "Model".to_string(),
            year: "2021".to_string(),
            fuel_type: "Electric".to_string(),
            brand: brand.to_string(),
            price: 42000.0,
            engine,
        }
    }

    #[tokio::test]
    async fn engine_round_trip() {
        let store = InMemoryEngineStore::new();
        let created = store.create(&engine_request()).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn engine_update_and_delete_missing_are_not_found() {
        let store = InMemoryEngineStore::new();
        let missing = Uuid::new_v4().to_string();

        let err = store.update(&missing, &engine_request()).await.unwrap_err();
        assert!(err.is_not_found());
        let err = store.delete(&missing).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn engine_delete_returns_prior_values() {
        let store = InMemoryEngineStore::new();
        let created = store.create(&engine_request()).await.unwrap();

        let deleted = store.delete(&created.id.to_string()).await.unwrap();
        assert_eq!(deleted, created);
        assert!(store
            .get_by_id(&created.id.to_string())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn malformed_id_is_invalid_argument() {
        let store = InMemoryEngineStore::new();
        let err = store.get_by_id("12345").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn car_requires_existing_engine() {
        let engines = InMemoryEngineStore::new();
        let cars = InMemoryCarStore::new(engines);
        let phantom = Engine {
            id: Uuid::new_v4(),
            ..Engine::default()
        };

        let err = cars.create(&car_request(phantom, "Tesla")).await.unwrap_err();
        assert!(matches!(err, StoreError::ReferenceViolation(_)));
        assert!(cars.is_empty());
    }

    #[tokio::test]
    async fn get_by_brand_joins_engine_only_when_asked() {
        let engines = InMemoryEngineStore::new();
        let engine = engines.create(&engine_request()).await.unwrap();
        let cars = InMemoryCarStore::new(engines.clone());

        cars.create(&car_request(engine.clone(), "Tesla")).await.unwrap();
        cars.create(&car_request(engine.clone(), "Tesla")).await.unwrap();
        cars.create(&car_request(engine.clone(), "Rivian")).await.unwrap();

        let bare = cars.get_by_brand("Tesla", false).await.unwrap();
        assert_eq!(bare.len(), 2);
        assert!(bare.iter().all(|car| car.engine == Engine::reference(engine.id)));

        let joined = cars.get_by_brand("Tesla", true).await.unwrap();
        assert!(joined.iter().all(|car| car.engine == engine));

        assert!(cars.get_by_brand("Lada", true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn engine_in_use_cannot_be_deleted() {
        let engines = InMemoryEngineStore::new();
        let engine = engines.create(&engine_request()).await.unwrap();
        let cars = InMemoryCarStore::new(engines.clone());
        let car = cars.create(&car_request(engine.clone(), "Tesla")).await.unwrap();

        let err = engines.delete(&engine.id.to_string()).await.unwrap_err();
        assert!(matches!(err, StoreError::ReferenceViolation(_)));
        assert_eq!(engines.len(), 1);

        cars.delete(&car.id.to_string()).await.unwrap();
        engines.delete(&engine.id.to_string()).await.unwrap();
        assert!(engines.is_empty());
    }

    #[tokio::test]
    async fn car_update_returns_stored_engine() {
        let engines = InMemoryEngineStore::new();
        let engine = engines.create(&engine_request()).await.unwrap();
        let cars = InMemoryCarStore::new(engines.clone());
        let car = cars.create(&car_request(engine.clone(), "Tesla")).await.unwrap();

        let stale = Engine {
            displacement: 1,
            ..engine.clone()
        };
        let updated = cars
            .update(&car.id.to_string(), &car_request(stale, "Tesla"))
            .await
            .unwrap();

        assert_eq!(updated.engine, engine);
        assert_eq!(
            updated,
            cars.get_by_id(&car.id.to_string()).await.unwrap()
        );
    }
}
